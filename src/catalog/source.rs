use super::Catalog;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP status {status}")]
    Status { url: String, status: u16 },

    #[error("could not read catalog file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog is not valid JSON")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// A blocking operation producing the catalog.
///
/// Implementations are called from a worker thread, never from the UI task,
/// so they are free to block for as long as the transfer takes.
pub trait CatalogSource: Send + Sync + 'static {
    fn fetch(&self) -> Result<Catalog, FetchError>;

    /// Short human-readable origin, used in logs.
    fn describe(&self) -> String;
}

pub struct HttpCatalogSource {
    url: String,
    timeout: Duration,
}

impl HttpCatalogSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

impl CatalogSource for HttpCatalogSource {
    fn fetch(&self) -> Result<Catalog, FetchError> {
        let request_error = |source| FetchError::Request {
            url: self.url.clone(),
            source,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("theme-picker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(request_error)?;

        debug!("GET {}", self.url);
        let response = client.get(&self.url).send().map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(request_error)?;
        debug!("Received {} bytes of catalog data", body.len());
        Ok(Catalog::from_json(&body)?)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalogSource {
    fn fetch(&self) -> Result<Catalog, FetchError> {
        let raw = std::fs::read_to_string(&self.path).map_err(|source| FetchError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(Catalog::from_json(&raw)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
