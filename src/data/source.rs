use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{ChartError, ChartResult};

/// Where a named resource lives once the base path is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Path(PathBuf),
    Url(String),
    Inline(String),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
            Self::Inline(name) => write!(f, "inline:{name}"),
        }
    }
}

/// Resolves resource names under a deployment base path.
///
/// A base starting with `http://` or `https://` produces URLs; anything else
/// is treated as a filesystem root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResourceLocator {
    base_path: String,
}

impl ResourceLocator {
    #[must_use]
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.base_path.starts_with("http://") || self.base_path.starts_with("https://")
    }

    #[must_use]
    pub fn resolve(&self, name: &str) -> Resource {
        let name = name.trim_start_matches('/');
        if self.is_remote() {
            let base = self.base_path.trim_end_matches('/');
            return Resource::Url(format!("{base}/{name}"));
        }
        if self.base_path.is_empty() {
            return Resource::Path(PathBuf::from(name));
        }
        Resource::Path(PathBuf::from(&self.base_path).join(name))
    }
}

#[derive(Debug, Clone)]
enum SourceKind {
    Located {
        locator: ResourceLocator,
        #[cfg(feature = "http-source")]
        client: reqwest::Client,
    },
    InMemory(IndexMap<String, String>),
}

/// Fetches CSV text for the loaders.
#[derive(Debug, Clone)]
pub struct DataSource {
    kind: SourceKind,
}

impl DataSource {
    #[must_use]
    pub fn located(locator: ResourceLocator) -> Self {
        Self {
            kind: SourceKind::Located {
                locator,
                #[cfg(feature = "http-source")]
                client: reqwest::Client::new(),
            },
        }
    }

    /// Source backed by bundled text, keyed by resource name.
    #[must_use]
    pub fn in_memory<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(name, text)| (name.into(), text.into()))
            .collect();
        Self {
            kind: SourceKind::InMemory(entries),
        }
    }

    #[must_use]
    pub fn resolve(&self, name: &str) -> Resource {
        match &self.kind {
            SourceKind::Located { locator, .. } => locator.resolve(name),
            SourceKind::InMemory(_) => Resource::Inline(name.to_owned()),
        }
    }

    pub async fn fetch_text(&self, name: &str) -> ChartResult<String> {
        let resource = self.resolve(name);
        debug!(%resource, "fetching resource");
        match (&self.kind, &resource) {
            (SourceKind::InMemory(entries), _) => entries
                .get(name)
                .cloned()
                .ok_or_else(|| ChartError::load(resource.to_string(), "not bundled")),
            (_, Resource::Path(path)) => tokio::fs::read_to_string(path)
                .await
                .map_err(|err| ChartError::load(resource.to_string(), err)),
            (_, Resource::Url(url)) => self.fetch_url(url).await,
            (_, Resource::Inline(_)) => Err(ChartError::load(
                resource.to_string(),
                "inline resource outside an in-memory source",
            )),
        }
    }

    #[cfg(feature = "http-source")]
    async fn fetch_url(&self, url: &str) -> ChartResult<String> {
        let SourceKind::Located { client, .. } = &self.kind else {
            return Err(ChartError::load(url, "no http client"));
        };
        let response = client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|err| ChartError::load(url, err))?;
        response.text().await.map_err(|err| ChartError::load(url, err))
    }

    #[cfg(not(feature = "http-source"))]
    async fn fetch_url(&self, url: &str) -> ChartResult<String> {
        Err(ChartError::load(
            url,
            "fetching urls requires the `http-source` feature",
        ))
    }
}
