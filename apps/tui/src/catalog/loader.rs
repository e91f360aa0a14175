use std::path::PathBuf;

use thiserror::Error;

use super::models::Episode;

/// Everything that can go wrong during the one-shot catalog read. There is
/// no retry; a failure here is terminal for the session.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("catalog request returned status {0}")]
    Status(u16),
    #[error("could not read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("catalog is not a valid episode list: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the catalog JSON lives. Anything that does not look like an
/// http(s) URL is treated as a filesystem path.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    Url(String),
    File(PathBuf),
}

impl CatalogSource {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Url(url) => url.clone(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

/// Appends the cache-defeating query parameter to a catalog URL so a stale
/// copy is never served for the initial read.
pub fn cache_busted(url: &str, version: i64) -> String {
    if url.contains('?') {
        format!("{url}&v={version}")
    } else {
        format!("{url}?v={version}")
    }
}

pub fn parse_catalog(bytes: &[u8]) -> Result<Vec<Episode>, CatalogError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Performs the single catalog read and parse.
pub async fn load_catalog(source: &CatalogSource) -> Result<Vec<Episode>, CatalogError> {
    match source {
        CatalogSource::Url(url) => {
            let url = cache_busted(url, chrono::Utc::now().timestamp_millis());
            let response = reqwest::get(&url).await?;
            let status = response.status();
            if !status.is_success() {
                return Err(CatalogError::Status(status.as_u16()));
            }
            let body = response.bytes().await?;
            parse_catalog(&body)
        }
        CatalogSource::File(path) => {
            let bytes = tokio::fs::read(path).await?;
            parse_catalog(&bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{cache_busted, load_catalog, parse_catalog, CatalogError, CatalogSource};

    #[test]
    fn sources_are_classified_by_scheme() {
        assert!(matches!(
            CatalogSource::parse("https://example.org/catalog.json"),
            CatalogSource::Url(_)
        ));
        assert!(matches!(
            CatalogSource::parse("data/catalog.json"),
            CatalogSource::File(_)
        ));
    }

    #[test]
    fn cache_buster_starts_or_extends_the_query() {
        assert_eq!(
            cache_busted("https://example.org/catalog.json", 17),
            "https://example.org/catalog.json?v=17"
        );
        assert_eq!(
            cache_busted("https://example.org/catalog.json?lang=es", 17),
            "https://example.org/catalog.json?lang=es&v=17"
        );
    }

    #[test]
    fn well_formed_catalogs_parse() -> Result<(), CatalogError> {
        let episodes = parse_catalog(
            br#"[{"id": 1, "title": "Ep1", "season": "T1", "date": "2024-01-01"}]"#,
        )?;
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].title, "Ep1");
        assert!(!episodes[0].hidden);
        Ok(())
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = parse_catalog(b"{not json");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn an_object_instead_of_an_array_is_a_parse_error() {
        let result = parse_catalog(br#"{"episodes": []}"#);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[tokio::test]
    async fn file_sources_load_from_disk() -> Result<(), Box<dyn std::error::Error>> {
        let path = std::env::temp_dir().join("catalog-browser-loader-test.json");
        std::fs::write(
            &path,
            br#"[{"id": 2, "title": "Ep2", "season": "T1", "date": "2024-02-01", "hidden": true}]"#,
        )?;

        let episodes = load_catalog(&CatalogSource::File(path.clone())).await?;
        assert_eq!(episodes.len(), 1);
        assert!(episodes[0].hidden);

        std::fs::remove_file(&path)?;
        Ok(())
    }

    #[tokio::test]
    async fn a_missing_file_is_an_io_error() {
        let source = CatalogSource::File("does/not/exist/catalog.json".into());
        let result = load_catalog(&source).await;
        assert!(matches!(result, Err(CatalogError::Io(_))));
    }
}
