use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Checks a key event against a name like `esc`, `q`, `ctrl+c` or `shift+tab`.
///
/// Key releases never match. Shift is ignored for printable characters and
/// back-tab since it is already reflected in the key code itself.
pub fn key_matches(event: &KeyEvent, name: &str) -> bool {
    if event.kind == KeyEventKind::Release {
        return false;
    }
    let Some((code, modifiers)) = parse_key_name(name) else {
        return false;
    };

    let mut actual = event.modifiers;
    if matches!(event.code, KeyCode::Char(_) | KeyCode::BackTab) {
        actual.remove(KeyModifiers::SHIFT);
    }
    event.code == code && actual == modifiers
}

fn parse_key_name(name: &str) -> Option<(KeyCode, KeyModifiers)> {
    let mut modifiers = KeyModifiers::NONE;
    let mut parts: Vec<&str> = name.split('+').collect();
    // "ctrl++" names the plus key itself
    if name.ends_with("++") {
        parts.truncate(parts.len() - 2);
        parts.push("+");
    }
    let key = parts.pop()?;

    for part in parts {
        match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "opt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "super" | "cmd" => modifiers |= KeyModifiers::SUPER,
            _ => return None,
        }
    }

    let code = match key.to_ascii_lowercase().as_str() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" | "del" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "page_up" | "pgup" => KeyCode::PageUp,
        "page_down" | "pgdn" => KeyCode::PageDown,
        lower => {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => {
                    let n: u8 = lower.strip_prefix('f')?.parse().ok()?;
                    KeyCode::F(n)
                }
            }
        }
    };

    if key.eq_ignore_ascii_case("tab") && modifiers.contains(KeyModifiers::SHIFT) {
        return Some((KeyCode::BackTab, modifiers.difference(KeyModifiers::SHIFT)));
    }

    Some((code, modifiers))
}
