use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::LookupService;
use crate::config::LookupConfig;
use crate::error::LookupError;

const USER_AGENT: &str = concat!("voxcmd/", env!("CARGO_PKG_VERSION"));

/// Summary lookup against the MediaWiki action API.
/// Two requests: a search for the best title, then its plain-text intro.
#[derive(Clone)]
pub struct WikipediaClient {
    client: Client,
    api_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    query: Option<ExtractQuery>,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    missing: bool,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    pageprops: Option<PageProps>,
}

#[derive(Debug, Deserialize)]
struct PageProps {
    #[serde(default)]
    disambiguation: Option<String>,
}

impl WikipediaClient {
    pub fn new(config: &LookupConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs)) // Bounded: expiry is a lookup failure
                .user_agent(USER_AGENT)
                .build()
                .unwrap_or_default(),
            api_url: config.api_url.clone(),
        }
    }

    async fn best_title(&self, topic: &str) -> Result<String, LookupError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", topic),
                ("srlimit", "1"),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .send()
            .await
            .map_err(failed)?;

        if !response.status().is_success() {
            return Err(LookupError::LookupFailed(format!("search returned {}", response.status())));
        }

        let body: SearchResponse = response.json().await.map_err(failed)?;
        parse_search(body, topic)
    }

    async fn intro(&self, title: &str, max_sentences: usize) -> Result<String, LookupError> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("prop", "extracts|pageprops"),
                ("exintro", "1"),
                ("explaintext", "1"),
                ("redirects", "1"),
                ("titles", title),
                ("format", "json"),
                ("formatversion", "2"),
            ])
            .send()
            .await
            .map_err(failed)?;

        if !response.status().is_success() {
            return Err(LookupError::LookupFailed(format!("extract returned {}", response.status())));
        }

        let body: ExtractResponse = response.json().await.map_err(failed)?;
        parse_extract(body, title, max_sentences)
    }
}

#[async_trait]
impl LookupService for WikipediaClient {
    async fn summarize(&self, topic: &str, max_sentences: usize) -> Result<String, LookupError> {
        let title = self.best_title(topic).await?;
        debug!(%title, "lookup resolved title");
        self.intro(&title, max_sentences).await
    }
}

fn failed(error: reqwest::Error) -> LookupError {
    LookupError::LookupFailed(error.to_string())
}

fn parse_search(body: SearchResponse, topic: &str) -> Result<String, LookupError> {
    body.query
        .and_then(|q| q.search.into_iter().next())
        .map(|hit| hit.title)
        .ok_or_else(|| LookupError::NotFound(topic.to_string()))
}

fn parse_extract(body: ExtractResponse, title: &str, max_sentences: usize) -> Result<String, LookupError> {
    let page = body
        .query
        .and_then(|q| q.pages.into_iter().next())
        .ok_or_else(|| LookupError::NotFound(title.to_string()))?;

    if page.missing {
        return Err(LookupError::NotFound(title.to_string()));
    }
    if page.pageprops.and_then(|p| p.disambiguation).is_some() {
        return Err(LookupError::LookupFailed(format!("'{title}' is ambiguous")));
    }

    let extract = page.extract.unwrap_or_default();
    let summary = first_sentences(&extract, max_sentences);
    if summary.is_empty() {
        return Err(LookupError::NotFound(title.to_string()));
    }
    Ok(summary)
}

/// Leading `count` sentences. A sentence ends at . ! or ? followed by
/// whitespace or the end of the text.
pub fn first_sentences(text: &str, count: usize) -> String {
    let text = text.trim();
    let mut seen = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = chars.peek().map_or(true, |(_, next)| next.is_whitespace());
            if at_boundary {
                seen += 1;
                if seen == count {
                    return text[..idx + c.len_utf8()].to_string();
                }
            }
        }
    }

    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_to_sentence_count() {
        let text = "Rust is a language. It is fast! Is it safe? Yes.";
        assert_eq!(first_sentences(text, 2), "Rust is a language. It is fast!");
        assert_eq!(first_sentences(text, 10), text);
    }

    #[test]
    fn decimal_points_do_not_end_sentences() {
        let text = "Version 1.75 added async traits. Then more.";
        assert_eq!(first_sentences(text, 1), "Version 1.75 added async traits.");
    }

    #[test]
    fn empty_search_is_not_found() {
        let body: SearchResponse =
            serde_json::from_str(r#"{"batchcomplete":true,"query":{"searchinfo":{"totalhits":0},"search":[]}}"#)
                .unwrap();
        assert_eq!(
            parse_search(body, "qwzx").unwrap_err(),
            LookupError::NotFound("qwzx".to_string())
        );
    }

    #[test]
    fn search_picks_first_title() {
        let body: SearchResponse = serde_json::from_str(
            r#"{"query":{"search":[{"ns":0,"title":"Alan Turing","pageid":1208}]}}"#,
        )
        .unwrap();
        assert_eq!(parse_search(body, "alan turing").unwrap(), "Alan Turing");
    }

    #[test]
    fn disambiguation_is_a_failure() {
        let body: ExtractResponse = serde_json::from_str(
            r#"{"query":{"pages":[{"pageid":5,"title":"Mercury","extract":"Mercury may refer to:","pageprops":{"disambiguation":""}}]}}"#,
        )
        .unwrap();
        assert!(matches!(
            parse_extract(body, "Mercury", 2),
            Err(LookupError::LookupFailed(_))
        ));
    }

    #[test]
    fn missing_page_is_not_found() {
        let body: ExtractResponse =
            serde_json::from_str(r#"{"query":{"pages":[{"title":"Nope","missing":true}]}}"#).unwrap();
        assert!(matches!(parse_extract(body, "Nope", 2), Err(LookupError::NotFound(_))));
    }

    #[test]
    fn extract_is_trimmed() {
        let body: ExtractResponse = serde_json::from_str(
            r#"{"query":{"pages":[{"title":"Rust","extract":"One. Two. Three."}]}}"#,
        )
        .unwrap();
        assert_eq!(parse_extract(body, "Rust", 2).unwrap(), "One. Two.");
    }
}
