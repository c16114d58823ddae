//! Result assembly.

use std::collections::BTreeMap;

use super::accumulator::MetaAccumulator;
use super::types::{MetaExtractionResult, RequestFacts};

/// Combines request facts with the finished accumulator state.
///
/// Derived scalars treat an empty value as absent:
/// - `title`: concatenated title chunks, trimmed
/// - `description`: `metaByName["description"]`, else `og["description"]`
/// - `themeColor`, `author`, `keywords`, `robots`, `generator`: `metaByName`
/// - `favicon`: first icon whose rel is exactly `icon`
pub fn build_result(facts: RequestFacts, state: MetaAccumulator) -> MetaExtractionResult {
    let title = state.title_chunks.concat().trim().to_string();

    let description = non_empty(&state.meta_by_name, "description")
        .or_else(|| non_empty(&state.og, "description"));
    let theme_color = non_empty(&state.meta_by_name, "theme-color");
    let author = non_empty(&state.meta_by_name, "author");
    let keywords = non_empty(&state.meta_by_name, "keywords");
    let robots = non_empty(&state.meta_by_name, "robots");
    let generator = non_empty(&state.meta_by_name, "generator");

    let favicon = state
        .icons
        .iter()
        .find(|icon| icon.rel == "icon")
        .map(|icon| icon.href.clone());

    let final_url = facts
        .final_url
        .unwrap_or_else(|| facts.requested_url.clone());

    MetaExtractionResult {
        requested_url: facts.requested_url,
        final_url,
        status: facts.status,
        content_type: facts.content_type,
        lang: state.lang,
        title: (!title.is_empty()).then_some(title),
        description,
        canonical: state.canonical,
        charset: state.charset,
        theme_color,
        author,
        keywords,
        robots,
        generator,
        favicon,
        icons: state.icons,
        alternates: state.alternates,
        og: state.og,
        twitter: state.twitter,
        meta_by_name: state.meta_by_name,
        meta_by_property: state.meta_by_property,
        meta_tags: state.meta_tags,
        link_tags: state.link_tags,
    }
}

fn non_empty(map: &BTreeMap<String, String>, key: &str) -> Option<String> {
    map.get(key).filter(|value| !value.is_empty()).cloned()
}
