//! Product catalog loading.
//!
//! The catalog is a JSON array of categories:
//!
//! ```json
//! [{ "name": "Potions", "items": [{ "name": "Healing Draught", "price": 12, "image": "/static/img/draught.png" }] }]
//! ```
//!
//! It is read once at startup from a file or an `http(s)` URL. Until the load
//! finishes, pages see a [`CatalogState`] with `is_loading` set; if it fails
//! they see `error` set.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use goblin_store_core::Category;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use url::Url;

/// Timeout for fetching a remote catalog.
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog file unreadable: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetched over HTTP(S).
    Remote(Url),
    /// Read from the local filesystem.
    File(PathBuf),
}

impl CatalogSource {
    /// Interpret `value` as an `http`/`https` URL, or else as a file path.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match Url::parse(value) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Remote(url),
            _ => Self::File(PathBuf::from(value)),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load all categories from `source`.
///
/// # Errors
///
/// Returns `CatalogError` if the source cannot be read or does not contain
/// a JSON array of categories.
pub async fn load_categories(source: &CatalogSource) -> Result<Vec<Category>, CatalogError> {
    match source {
        CatalogSource::Remote(url) => {
            let client = reqwest::Client::builder().timeout(FETCH_TIMEOUT).build()?;
            let categories = client
                .get(url.clone())
                .send()
                .await?
                .error_for_status()?
                .json::<Vec<Category>>()
                .await?;
            Ok(categories)
        }
        CatalogSource::File(path) => {
            let raw = tokio::fs::read_to_string(path).await?;
            Ok(serde_json::from_str(&raw)?)
        }
    }
}

/// What the catalog page can show right now.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    pub categories: Vec<Category>,
    pub is_loading: bool,
    pub error: bool,
}

impl CatalogState {
    /// Load in progress, nothing to show yet.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            categories: Vec::new(),
            is_loading: true,
            error: false,
        }
    }

    /// Loaded successfully.
    #[must_use]
    pub const fn ready(categories: Vec<Category>) -> Self {
        Self {
            categories,
            is_loading: false,
            error: false,
        }
    }

    /// Load failed.
    #[must_use]
    pub const fn failed() -> Self {
        Self {
            categories: Vec::new(),
            is_loading: false,
            error: true,
        }
    }
}

/// Shared handle to the catalog state.
#[derive(Debug, Clone)]
pub struct Catalog {
    state: Arc<RwLock<CatalogState>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::with_state(CatalogState::loading())
    }
}

impl Catalog {
    /// A catalog that has not been loaded yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog fixed at `state`.
    #[must_use]
    pub fn with_state(state: CatalogState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Current state.
    pub async fn snapshot(&self) -> CatalogState {
        self.state.read().await.clone()
    }

    /// Load from `source` and publish the result.
    pub async fn load(&self, source: &CatalogSource) {
        *self.state.write().await = CatalogState::loading();

        let next = match load_categories(source).await {
            Ok(categories) => {
                tracing::info!(
                    source = %source,
                    categories = categories.len(),
                    "Catalog loaded"
                );
                CatalogState::ready(categories)
            }
            Err(e) => {
                tracing::error!(source = %source, error = %e, "Failed to load catalog");
                CatalogState::failed()
            }
        };

        *self.state.write().await = next;
    }

    /// Load from `source` in a background task.
    pub fn spawn_load(&self, source: CatalogSource) -> JoinHandle<()> {
        let catalog = self.clone();
        tokio::spawn(async move { catalog.load(&source).await })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use goblin_store_core::{Price, Product};

    use super::*;

    const CATALOG_JSON: &str = r#"[
        {"name": "Category Foo", "items": [
            {"name": "Product foo", "price": 55, "image": "/test.jpg"}
        ]}
    ]"#;

    fn catalog_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_source() {
        assert!(matches!(
            CatalogSource::parse("http://localhost:4000/products"),
            CatalogSource::Remote(_)
        ));
        assert!(matches!(
            CatalogSource::parse("https://catalog.example/products.json"),
            CatalogSource::Remote(_)
        ));
        assert_eq!(
            CatalogSource::parse("crates/storefront/catalog.json"),
            CatalogSource::File(PathBuf::from("crates/storefront/catalog.json"))
        );
        assert!(matches!(
            CatalogSource::parse("file:///tmp/catalog.json"),
            CatalogSource::File(_)
        ));
    }

    #[tokio::test]
    async fn test_load_categories_from_file() {
        let file = catalog_file(CATALOG_JSON);
        let source = CatalogSource::File(file.path().to_path_buf());

        let categories = load_categories(&source).await.unwrap();

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Category Foo");
        assert_eq!(
            categories[0].items,
            vec![Product::new("Product foo", Price::whole(55), "/test.jpg")]
        );
    }

    #[tokio::test]
    async fn test_load_categories_rejects_bad_json() {
        let file = catalog_file("{\"categories\": 1}");
        let source = CatalogSource::File(file.path().to_path_buf());
        assert!(matches!(
            load_categories(&source).await,
            Err(CatalogError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_new_catalog_is_loading() {
        let state = Catalog::new().snapshot().await;
        assert!(state.is_loading);
        assert!(!state.error);
        assert!(state.categories.is_empty());
    }

    #[tokio::test]
    async fn test_load_publishes_categories() {
        let file = catalog_file(CATALOG_JSON);
        let catalog = Catalog::new();

        catalog
            .spawn_load(CatalogSource::File(file.path().to_path_buf()))
            .await
            .unwrap();

        let state = catalog.snapshot().await;
        assert!(!state.is_loading);
        assert!(!state.error);
        assert_eq!(state.categories.len(), 1);
    }

    #[tokio::test]
    async fn test_load_failure_sets_error() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::new();

        catalog
            .load(&CatalogSource::File(dir.path().join("missing.json")))
            .await;

        assert_eq!(catalog.snapshot().await, CatalogState::failed());
    }
}
