//! Metadata accumulator.
//!
//! Receives scanner events one at a time and incrementally builds the
//! per-request metadata state. One accumulator belongs to exactly one request;
//! nothing in here is shared.
//!
//! Two merge policies coexist and are kept on separate code paths:
//! - `lang`, `canonical` and `charset` are first-wins.
//! - the keyed maps (`metaByName`, `metaByProperty`, and the `og`/`twitter`
//!   views derived from them) are last-wins.

use std::collections::BTreeMap;

use url::Url;

use super::resolve::resolve_href;
use super::scanner::{ScanEvent, TagAttributes};
use super::types::{Alternate, Icon, RawLinkTag, RawMetaTag, ICON_RELS};

const OG_PREFIX: &str = "og:";
const TWITTER_PREFIX: &str = "twitter:";

/// Accumulated `<head>` metadata for one response.
#[derive(Debug, Clone)]
pub struct MetaAccumulator {
    base: Url,
    pub(super) lang: Option<String>,
    pub(super) title_chunks: Vec<String>,
    pub(super) canonical: Option<String>,
    pub(super) charset: Option<String>,
    pub(super) meta_tags: Vec<RawMetaTag>,
    pub(super) link_tags: Vec<RawLinkTag>,
    pub(super) icons: Vec<Icon>,
    pub(super) alternates: Vec<Alternate>,
    pub(super) og: BTreeMap<String, String>,
    pub(super) twitter: BTreeMap<String, String>,
    pub(super) meta_by_name: BTreeMap<String, String>,
    pub(super) meta_by_property: BTreeMap<String, String>,
    unresolved_hrefs: usize,
}

impl MetaAccumulator {
    /// Creates an empty accumulator resolving relative hrefs against `base`,
    /// which should be the final (post-redirect) URL of the response.
    pub fn new(base: Url) -> Self {
        Self {
            base,
            lang: None,
            title_chunks: Vec::new(),
            canonical: None,
            charset: None,
            meta_tags: Vec::new(),
            link_tags: Vec::new(),
            icons: Vec::new(),
            alternates: Vec::new(),
            og: BTreeMap::new(),
            twitter: BTreeMap::new(),
            meta_by_name: BTreeMap::new(),
            meta_by_property: BTreeMap::new(),
            unresolved_hrefs: 0,
        }
    }

    /// Dispatches one scanner event to its handler.
    pub fn apply(&mut self, event: ScanEvent) {
        match event {
            ScanEvent::HtmlOpen(attrs) => self.on_html_open(&attrs),
            ScanEvent::TitleText(chunk) => self.on_title_text(chunk),
            ScanEvent::MetaOpen(attrs) => self.on_meta(meta_tag_from_attributes(&attrs)),
            ScanEvent::LinkOpen(attrs) => {
                if let Some(tag) = link_tag_from_attributes(&attrs) {
                    self.on_link(tag, attrs.get_owned("title"));
                }
            }
        }
    }

    pub fn on_html_open(&mut self, attrs: &TagAttributes) {
        let Some(lang) = attrs.get("lang").filter(|lang| !lang.is_empty()) else {
            return;
        };
        if self.lang.is_none() {
            self.lang = Some(lang.to_string());
        }
    }

    pub fn on_title_text(&mut self, chunk: String) {
        if !chunk.is_empty() {
            self.title_chunks.push(chunk);
        }
    }

    pub fn on_meta(&mut self, tag: RawMetaTag) {
        if let Some(charset) = tag.charset.as_deref().filter(|c| !c.is_empty()) {
            if self.charset.is_none() {
                self.charset = Some(charset.to_string());
            }
        }

        let content = tag.content.clone().unwrap_or_default();

        if let Some(name) = tag.name.as_deref().filter(|n| !n.is_empty()) {
            let key = name.to_lowercase();
            if let Some(suffix) = key.strip_prefix(TWITTER_PREFIX).filter(|s| !s.is_empty()) {
                self.twitter.insert(suffix.to_string(), content.clone());
            }
            self.meta_by_name.insert(key, content.clone());
        }

        if let Some(property) = tag.property.as_deref().filter(|p| !p.is_empty()) {
            let key = property.to_lowercase();
            if let Some(suffix) = key.strip_prefix(OG_PREFIX).filter(|s| !s.is_empty()) {
                self.og.insert(suffix.to_string(), content.clone());
            }
            self.meta_by_property.insert(key, content);
        }

        self.meta_tags.push(tag);
    }

    /// Records a `<link>` and derives canonical, icon and alternate entries.
    ///
    /// `title` is the element's `title` attribute, carried onto alternates.
    pub fn on_link(&mut self, tag: RawLinkTag, title: Option<String>) {
        let rels: Vec<String> = tag.rels.iter().map(|rel| rel.to_lowercase()).collect();
        let href = tag.href.as_deref().filter(|href| !href.is_empty());

        if let Some(href) = href {
            if rels.iter().any(|rel| rel == "canonical") && self.canonical.is_none() {
                if let Some(resolved) = self.resolve(href) {
                    self.canonical = Some(resolved);
                }
            }

            // The element's own rel order decides which icon token labels it.
            let icon_rel = rels.iter().find(|rel| ICON_RELS.contains(&rel.as_str()));
            if let Some(icon_rel) = icon_rel {
                if let Some(resolved) = self.resolve(href) {
                    self.icons.push(Icon {
                        href: resolved,
                        rel: icon_rel.clone(),
                        icon_type: tag.link_type.clone(),
                        sizes: tag.sizes.clone(),
                    });
                }
            }

            if rels.iter().any(|rel| rel == "alternate") {
                if let Some(resolved) = self.resolve(href) {
                    self.alternates.push(Alternate {
                        href: resolved,
                        hreflang: tag.hreflang.clone(),
                        alternate_type: tag.link_type.clone(),
                        title,
                    });
                }
            }
        }

        self.link_tags.push(tag);
    }

    /// Hrefs that failed to resolve and were omitted.
    pub fn unresolved_hrefs(&self) -> usize {
        self.unresolved_hrefs
    }

    /// Number of raw `<meta>` and `<link>` tags recorded so far.
    pub fn tag_count(&self) -> usize {
        self.meta_tags.len() + self.link_tags.len()
    }

    fn resolve(&mut self, href: &str) -> Option<String> {
        match resolve_href(href, &self.base) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                log::trace!("Omitting link: {e}");
                self.unresolved_hrefs += 1;
                None
            }
        }
    }
}

/// Snapshots the attributes of a `<meta>` element.
pub fn meta_tag_from_attributes(attrs: &TagAttributes) -> RawMetaTag {
    RawMetaTag {
        name: attrs.get_owned("name"),
        property: attrs.get_owned("property"),
        http_equiv: attrs.get_owned("http-equiv"),
        charset: attrs.get_owned("charset"),
        content: attrs.get_owned("content"),
    }
}

/// Snapshots the attributes of a `<link>` element.
///
/// Returns `None` when the `rel` attribute is absent or has no tokens; such
/// links are never recorded.
pub fn link_tag_from_attributes(attrs: &TagAttributes) -> Option<RawLinkTag> {
    let rels: Vec<String> = attrs
        .get("rel")?
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if rels.is_empty() {
        return None;
    }
    Some(RawLinkTag {
        rels,
        href: attrs.get_owned("href"),
        hreflang: attrs.get_owned("hreflang"),
        link_type: attrs.get_owned("type"),
        sizes: attrs.get_owned("sizes"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accumulator() -> MetaAccumulator {
        MetaAccumulator::new(Url::parse("https://example.com/docs/page").unwrap())
    }

    fn attrs(pairs: &[(&str, &str)]) -> TagAttributes {
        pairs.iter().copied().collect()
    }

    fn meta(pairs: &[(&str, &str)]) -> ScanEvent {
        ScanEvent::MetaOpen(attrs(pairs))
    }

    fn link(pairs: &[(&str, &str)]) -> ScanEvent {
        ScanEvent::LinkOpen(attrs(pairs))
    }

    #[test]
    fn test_lang_is_first_wins_and_ignores_empty() {
        let mut acc = accumulator();
        acc.apply(ScanEvent::HtmlOpen(attrs(&[("lang", "")])));
        acc.apply(ScanEvent::HtmlOpen(attrs(&[("lang", "en")])));
        acc.apply(ScanEvent::HtmlOpen(attrs(&[("lang", "de")])));
        assert_eq!(acc.lang.as_deref(), Some("en"));
    }

    #[test]
    fn test_charset_is_first_wins() {
        let mut acc = accumulator();
        acc.apply(meta(&[("charset", "utf-8")]));
        acc.apply(meta(&[("charset", "iso-8859-1")]));
        assert_eq!(acc.charset.as_deref(), Some("utf-8"));
        assert_eq!(acc.meta_tags.len(), 2);
    }

    #[test]
    fn test_meta_by_name_is_last_wins_with_lowercased_keys() {
        let mut acc = accumulator();
        acc.apply(meta(&[("name", "X"), ("content", "A")]));
        acc.apply(meta(&[("name", "x"), ("content", "B")]));
        assert_eq!(acc.meta_by_name.get("x").map(String::as_str), Some("B"));
        assert_eq!(acc.meta_by_name.len(), 1);
    }

    #[test]
    fn test_og_and_twitter_views() {
        let mut acc = accumulator();
        acc.apply(meta(&[("property", "OG:Title"), ("content", "Hello")]));
        acc.apply(meta(&[("property", "og:"), ("content", "nothing")]));
        acc.apply(meta(&[("name", "twitter:card"), ("content", "summary")]));
        acc.apply(meta(&[("property", "twitter:site"), ("content", "@x")]));
        assert_eq!(acc.og.get("title").map(String::as_str), Some("Hello"));
        assert_eq!(acc.og.len(), 1);
        assert_eq!(acc.meta_by_property.get("og:").map(String::as_str), Some("nothing"));
        assert_eq!(acc.twitter.get("card").map(String::as_str), Some("summary"));
        // twitter:* only comes from name=, never from property=
        assert!(acc.twitter.get("site").is_none());
    }

    #[test]
    fn test_meta_with_name_and_property_updates_both_maps() {
        let mut acc = accumulator();
        acc.apply(meta(&[
            ("name", "twitter:title"),
            ("property", "og:title"),
            ("content", "Both"),
        ]));
        assert_eq!(acc.og.get("title").map(String::as_str), Some("Both"));
        assert_eq!(acc.twitter.get("title").map(String::as_str), Some("Both"));
    }

    #[test]
    fn test_missing_content_maps_to_empty_string() {
        let mut acc = accumulator();
        acc.apply(meta(&[("name", "robots")]));
        assert_eq!(acc.meta_by_name.get("robots").map(String::as_str), Some(""));
        assert_eq!(acc.meta_tags[0].content, None);
    }

    #[test]
    fn test_og_image_is_stored_verbatim() {
        let mut acc = accumulator();
        acc.apply(meta(&[("property", "og:image"), ("content", "../images/og.png")]));
        assert_eq!(
            acc.og.get("image").map(String::as_str),
            Some("../images/og.png")
        );
    }

    #[test]
    fn test_canonical_resolves_and_is_first_wins() {
        let mut acc = accumulator();
        acc.apply(link(&[("rel", "canonical"), ("href", "/page")]));
        acc.apply(link(&[("rel", "canonical"), ("href", "/other")]));
        assert_eq!(acc.canonical.as_deref(), Some("https://example.com/page"));
        assert_eq!(acc.link_tags.len(), 2);
    }

    #[test]
    fn test_unresolvable_canonical_lets_a_later_one_win() {
        let mut acc = accumulator();
        acc.apply(link(&[("rel", "canonical"), ("href", "http://bad host/")]));
        acc.apply(link(&[("rel", "canonical"), ("href", "good")]));
        assert_eq!(acc.canonical.as_deref(), Some("https://example.com/docs/good"));
        assert_eq!(acc.unresolved_hrefs(), 1);
    }

    #[test]
    fn test_icon_rel_follows_element_token_order() {
        let mut acc = accumulator();
        acc.apply(link(&[("rel", "Shortcut Icon"), ("href", "/favicon.ico")]));
        acc.apply(link(&[
            ("rel", "apple-touch-icon icon"),
            ("href", "touch.png"),
            ("sizes", "180x180"),
            ("type", "image/png"),
        ]));
        assert_eq!(acc.icons.len(), 2);
        assert_eq!(acc.icons[0].rel, "shortcut");
        assert_eq!(acc.icons[0].href, "https://example.com/favicon.ico");
        assert_eq!(acc.icons[1].rel, "apple-touch-icon");
        assert_eq!(acc.icons[1].href, "https://example.com/docs/touch.png");
        assert_eq!(acc.icons[1].sizes.as_deref(), Some("180x180"));
        assert_eq!(acc.icons[1].icon_type.as_deref(), Some("image/png"));
        // Raw rels keep their original case.
        assert_eq!(acc.link_tags[0].rels, vec!["Shortcut", "Icon"]);
    }

    #[test]
    fn test_alternates_carry_title_attribute() {
        let mut acc = accumulator();
        acc.apply(link(&[
            ("rel", "alternate"),
            ("hreflang", "ja"),
            ("href", "https://example.com/ja/"),
        ]));
        acc.apply(link(&[
            ("rel", "alternate"),
            ("type", "application/rss+xml"),
            ("title", "RSS Feed"),
            ("href", "/feed.xml"),
        ]));
        assert_eq!(acc.alternates.len(), 2);
        assert_eq!(acc.alternates[0].hreflang.as_deref(), Some("ja"));
        assert_eq!(acc.alternates[0].title, None);
        assert_eq!(acc.alternates[1].href, "https://example.com/feed.xml");
        assert_eq!(acc.alternates[1].hreflang, None);
        assert_eq!(acc.alternates[1].title.as_deref(), Some("RSS Feed"));
    }

    #[test]
    fn test_link_without_rel_tokens_is_discarded() {
        let mut acc = accumulator();
        acc.apply(link(&[("href", "/x")]));
        acc.apply(link(&[("rel", "   "), ("href", "/y")]));
        assert!(acc.link_tags.is_empty());
    }

    #[test]
    fn test_link_without_href_is_recorded_but_derives_nothing() {
        let mut acc = accumulator();
        acc.apply(link(&[("rel", "icon canonical alternate")]));
        assert_eq!(acc.link_tags.len(), 1);
        assert!(acc.icons.is_empty());
        assert!(acc.alternates.is_empty());
        assert!(acc.canonical.is_none());
    }

    #[test]
    fn test_title_chunks_skip_empty() {
        let mut acc = accumulator();
        acc.apply(ScanEvent::TitleText(String::new()));
        acc.apply(ScanEvent::TitleText("Hello ".to_string()));
        acc.apply(ScanEvent::TitleText("World".to_string()));
        assert_eq!(acc.title_chunks, vec!["Hello ", "World"]);
    }
}
