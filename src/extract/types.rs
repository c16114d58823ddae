//! Metadata record types.
//!
//! Raw tag snapshots, derived icon/alternate entries, and the output records
//! serialized by the `/meta` endpoint. Field names serialize in camelCase.

use std::collections::BTreeMap;

use serde::Serialize;

/// Error marker value carried by the non-HTML short-circuit record.
pub const NON_HTML_ERROR: &str = "non-html response";

/// Rel tokens that classify a `<link>` as an icon.
pub const ICON_RELS: &[&str] = &[
    "icon",
    "apple-touch-icon",
    "apple-touch-icon-precomposed",
    "shortcut",
];

/// Snapshot of one `<meta>` element, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMetaTag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_equiv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Snapshot of one `<link>` element that carried at least one rel token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLinkTag {
    /// Whitespace-split rel tokens, original case preserved.
    pub rels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
}

/// Icon link with its href resolved to an absolute URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub href: String,
    /// Lowercased icon rel token (`icon`, `apple-touch-icon`, ...)
    pub rel: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub icon_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
}

/// Alternate link (language variant or feed) with its href resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alternate {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub alternate_type: Option<String>,
    /// Taken from the link element's `title` attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Request-level facts supplied to the assembler alongside accumulated state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFacts {
    pub requested_url: String,
    /// URL after transport-level redirects; `None` means no redirect happened.
    pub final_url: Option<String>,
    pub status: u16,
    pub content_type: Option<String>,
}

/// Structured description of a page's `<head>` metadata.
///
/// Built once by [`crate::extract::build_result`] at the end of a stream and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaExtractionResult {
    pub requested_url: String,
    pub final_url: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub robots: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,

    pub icons: Vec<Icon>,
    pub alternates: Vec<Alternate>,

    pub og: BTreeMap<String, String>,
    pub twitter: BTreeMap<String, String>,

    pub meta_by_name: BTreeMap<String, String>,
    pub meta_by_property: BTreeMap<String, String>,
    pub meta_tags: Vec<RawMetaTag>,
    pub link_tags: Vec<RawLinkTag>,
}

/// Minimal record returned when the upstream response is not HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NonHtmlResponse {
    pub requested_url: String,
    pub final_url: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    pub error: &'static str,
}

impl NonHtmlResponse {
    pub fn new(facts: RequestFacts) -> Self {
        let final_url = facts
            .final_url
            .unwrap_or_else(|| facts.requested_url.clone());
        Self {
            requested_url: facts.requested_url,
            final_url,
            status: facts.status,
            content_type: facts.content_type,
            error: NON_HTML_ERROR,
        }
    }
}

/// Successful outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ExtractionOutcome {
    Extracted(Box<MetaExtractionResult>),
    NonHtml(NonHtmlResponse),
}

impl ExtractionOutcome {
    /// Returns the extracted metadata, if the response was HTML.
    pub fn as_extracted(&self) -> Option<&MetaExtractionResult> {
        match self {
            ExtractionOutcome::Extracted(result) => Some(result.as_ref()),
            ExtractionOutcome::NonHtml(_) => None,
        }
    }

    pub fn is_non_html(&self) -> bool {
        matches!(self, ExtractionOutcome::NonHtml(_))
    }
}
