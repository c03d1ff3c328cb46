//! Document fetch and HTML extraction.
//!
//! The document is fetched independently of the transport probe with its own
//! HTML-oriented client and timeout. Parsing happens synchronously so the
//! non-`Send` scraper document never lives across an await point.

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::analysis::AnalysisContext;
use crate::models::{PageContent, StageResult, TerminalFailure};

const TITLE_SELECTOR_STR: &str = "title";
const BODY_SELECTOR_STR: &str = "body";
const FORM_SELECTOR_STR: &str = "form";

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector(TITLE_SELECTOR_STR));
static BODY_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector(BODY_SELECTOR_STR));
static FORM_SELECTOR: LazyLock<Selector> = LazyLock::new(|| parse_selector(FORM_SELECTOR_STR));

fn parse_selector(selector: &str) -> Selector {
    Selector::parse(selector).unwrap_or_else(|e| {
        log::error!("Failed to parse selector '{selector}': {e}");
        // Fall back to a known-valid selector that matches nothing rather
        // than panicking at first use
        Selector::parse("*:not(*)").expect("fallback selector is valid")
    })
}

/// Fetches the document and extracts title, body text, and form actions.
///
/// Any failure — request error, HTTP error status, or an unreadable body —
/// is terminal: without a document none of the content signals can be
/// evaluated, so the pipeline stops with the fixed parse-failure outcome.
pub async fn fetch_page(url: &Url, ctx: &AnalysisContext) -> StageResult<PageContent> {
    let response = match ctx.content_client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            log::debug!("Content fetch failed for {url}: {e}");
            return StageResult::Terminal(TerminalFailure::ContentFetchError);
        }
    };

    // HTTP error statuses carry error pages, not the document being scored
    let response = match response.error_for_status() {
        Ok(response) => response,
        Err(e) => {
            log::debug!("Content fetch returned error status for {url}: {e}");
            return StageResult::Terminal(TerminalFailure::ContentFetchError);
        }
    };

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            log::debug!("Failed to read document body for {url}: {e}");
            return StageResult::Terminal(TerminalFailure::ContentFetchError);
        }
    };

    StageResult::Next {
        value: parse_page(&body),
        signals: Vec::new(),
    }
}

/// Parses an HTML document into the read-only `PageContent` view.
pub fn parse_page(html: &str) -> PageContent {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let body_text = document
        .select(&BODY_SELECTOR)
        .next()
        .map(|body| {
            body.text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default();

    let form_actions = document
        .select(&FORM_SELECTOR)
        .filter_map(|form| form.value().attr("action"))
        .map(str::to_string)
        .collect();

    PageContent {
        title,
        body_text,
        form_actions,
    }
}
