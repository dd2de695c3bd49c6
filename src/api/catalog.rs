//! Subtitle catalog client
//!
//! Talks to a SubHD-style catalog: search results come back as an HTML
//! page, download resolution as a small JSON ajax endpoint.

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use serde::Deserialize;
use std::time::Duration;

use crate::models::{DownloadDescriptor, SearchResult};

/// Label the catalog attaches to every listing; not a language
const TRANSLATION_LABEL: &str = "字幕翻译";

/// Ajax response for download resolution
#[derive(Debug, Default, Deserialize)]
struct AjaxResponse {
    #[serde(default)]
    #[allow(dead_code)]
    success: bool,
    #[serde(default)]
    url: String,
}

/// Catalog client
pub struct CatalogClient {
    base_url: String,
    client: reqwest::Client,
}

impl CatalogClient {
    /// Create a client against the default catalog
    pub fn new() -> Self {
        Self::with_base_url("https://subhd.tv")
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Search the catalog for subtitle listings matching a keyword.
    ///
    /// A page that fetches but yields no recognizable result containers is
    /// an empty list, not an error.
    pub async fn search(&self, keyword: &str) -> Result<Vec<SearchResult>> {
        let url = format!(
            "{}/search/{}",
            self.base_url,
            urlencoding::encode(keyword)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch search page")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Catalog returned HTTP {}", status);
        }

        let body = response
            .text()
            .await
            .context("Failed to read search page")?;

        Ok(parse_search_page(&body))
    }

    /// Resolve a listing id to its download descriptor.
    ///
    /// Malformed JSON from the ajax endpoint is not an error: the
    /// descriptor just carries an empty URL, meaning "no file".
    pub async fn resolve(&self, id: &str) -> Result<DownloadDescriptor> {
        let url = format!("{}/ajax/down_ajax", self.base_url);

        let response = self
            .client
            .post(&url)
            .form(&[("sub_id", id)])
            .send()
            .await
            .context("Failed to reach download endpoint")?;

        let body = response
            .text()
            .await
            .context("Failed to read download response")?;

        let data: AjaxResponse = serde_json::from_str(&body).unwrap_or_default();
        Ok(DownloadDescriptor::from_url(data.url))
    }
}

impl Default for CatalogClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the search page markup into results.
///
/// Containers missing a title, link or labels are still emitted with
/// empty fields rather than dropped.
fn parse_search_page(html: &str) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let container_sel = Selector::parse(".col-md-9 .box").expect("valid container selector");
    let title_sel = Selector::parse(".d_title").expect("valid title selector");
    let link_sel = Selector::parse(".d_title a").expect("valid link selector");
    let label_sel = Selector::parse(".label").expect("valid label selector");

    let mut results = Vec::new();
    for container in document.select(&container_sel) {
        let title = container
            .select(&title_sel)
            .next()
            .map(|node| node.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        // The listing id is the final path segment of the title link
        let id = container
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| href.rsplit('/').next())
            .unwrap_or_default()
            .to_string();

        let languages: Vec<String> = container
            .select(&label_sel)
            .map(|label| label.text().collect::<String>().trim().to_string())
            .filter(|text| !text.is_empty() && text != TRANSLATION_LABEL)
            .collect();

        results.push(SearchResult {
            id,
            title,
            languages,
        });
    }
    results
}
