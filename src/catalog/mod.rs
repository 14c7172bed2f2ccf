//! The theme catalog downloaded at startup and the sources it can come from.
mod source;

pub use source::{CatalogSource, FetchError, FileCatalogSource, HttpCatalogSource};

use serde::Deserialize;
use std::collections::BTreeMap;

/// A single entry of the catalog.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub blurb: Option<String>,
    #[serde(default)]
    pub is_dark: bool,
    /// Raw color settings (`background`, `color0`, ...). Not interpreted here.
    #[serde(default)]
    pub settings: BTreeMap<String, String>,
}

/// The parsed catalog, sorted by theme name.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    pub themes: Vec<Theme>,
}

impl Catalog {
    pub fn new(mut themes: Vec<Theme>) -> Self {
        themes.sort_by_key(|theme| theme.name.to_lowercase());
        Self { themes }
    }

    /// Parses a catalog document of the form `{"themes": [...]}`.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: Catalog = serde_json::from_str(raw)?;
        Ok(Self::new(parsed.themes))
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Themes whose names are not listed in `exclude`.
    pub fn visible<'a>(&'a self, exclude: &'a [String]) -> impl Iterator<Item = &'a Theme> + 'a {
        self.themes
            .iter()
            .filter(move |theme| !exclude.iter().any(|name| name == &theme.name))
    }
}
