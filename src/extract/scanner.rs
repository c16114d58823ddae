//! Incremental tag-level HTML scanner.
//!
//! The scanner is fed raw body chunks as they arrive and emits only the events
//! the metadata accumulator subscribes to:
//!
//! - `html` element open ([`ScanEvent::HtmlOpen`])
//! - text of a `head > title` element ([`ScanEvent::TitleText`])
//! - `head meta` element open ([`ScanEvent::MetaOpen`])
//! - `head link` element open ([`ScanEvent::LinkOpen`])
//!
//! Tokenizing is done by `lol_html`'s streaming rewriter with an output sink
//! that discards the rewritten bytes. No tree is built and the rewriter only
//! buffers the token straddling a chunk boundary, up to
//! [`MAX_SCANNER_MEMORY`]. Handlers push signals into a channel that is
//! drained after every chunk, so events keep document order.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};

use log::debug;
use lol_html::errors::RewritingError;
use lol_html::html_content::{Attribute, EndTag};
use lol_html::send::HtmlRewriter;
use lol_html::{element, text, HandlerResult, MemorySettings, Settings};

use crate::config::{MAX_SCANNER_MEMORY, MAX_TITLE_BYTES};

/// Attribute set of one element, captured when its open tag is complete.
///
/// Names are stored lowercased and looked up case-insensitively. When an
/// element repeats an attribute, the first occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAttributes {
    entries: Vec<(String, String)>,
}

impl TagAttributes {
    /// Returns the decoded value of `name`, or `None` if the attribute is absent.
    ///
    /// Valueless attributes (`<html lang>`) read as the empty string.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Owned copy of [`TagAttributes::get`].
    pub fn get_owned(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, name: String, value: String) {
        if self.get(&name).is_none() {
            self.entries.push((name, value));
        }
    }
}

impl<K, V> FromIterator<(K, V)> for TagAttributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = TagAttributes::default();
        for (name, value) in iter {
            attributes.insert(name.into().to_ascii_lowercase(), value.into());
        }
        attributes
    }
}

/// Structural event emitted by the scanner, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    HtmlOpen(TagAttributes),
    /// Entity-decoded text of one `head > title` element.
    TitleText(String),
    MetaOpen(TagAttributes),
    LinkOpen(TagAttributes),
}

/// What the rewriter's handlers report back to the scanner.
enum Signal {
    Html(TagAttributes),
    Body,
    Meta(TagAttributes),
    Link(TagAttributes),
    TitleOpen,
    TitleRaw(String),
    TitleClose,
}

type Rewriter = HtmlRewriter<'static, fn(&[u8])>;

/// Forward-only scanner over an HTML byte stream.
pub struct TagScanner {
    rewriter: Option<Rewriter>,
    signals: Receiver<Signal>,
    /// Raw text of the title element currently open.
    title: Option<String>,
    in_body: bool,
    aborted: bool,
}

impl fmt::Debug for TagScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagScanner")
            .field("running", &self.rewriter.is_some())
            .field("title", &self.title)
            .field("in_body", &self.in_body)
            .field("aborted", &self.aborted)
            .finish()
    }
}

impl Default for TagScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl TagScanner {
    pub fn new() -> Self {
        let (tx, signals) = mpsc::channel();
        Self {
            rewriter: Some(build_rewriter(tx)),
            signals,
            title: None,
            in_body: false,
            aborted: false,
        }
    }

    /// Scans the next chunk of the body and returns the events it completed.
    ///
    /// Chunk boundaries may fall anywhere, including inside tags, attribute
    /// values, entity references and multi-byte characters.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<ScanEvent> {
        if let Some(rewriter) = self.rewriter.as_mut() {
            if let Err(e) = rewriter.write(chunk) {
                self.abort(e);
            }
        }
        self.drain()
    }

    /// Flushes whatever is still pending at end of stream.
    ///
    /// A title that never closed is emitted with any trailing partial
    /// `</title` removed.
    pub fn finish(&mut self) -> Vec<ScanEvent> {
        if let Some(rewriter) = self.rewriter.take() {
            if let Err(e) = rewriter.end() {
                self.abort(e);
            }
        }
        let mut events = self.drain();
        if let Some(mut raw) = self.title.take() {
            strip_partial_end_tag(&mut raw);
            events.push(ScanEvent::TitleText(decode_title(&raw)));
        }
        events
    }

    /// Whether scanning stopped early because the rewriter failed.
    ///
    /// Events reported before the failure are kept; later input is ignored.
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    fn abort(&mut self, error: RewritingError) {
        debug!("Abandoning scan: {error}");
        self.rewriter = None;
        self.aborted = true;
    }

    fn drain(&mut self) -> Vec<ScanEvent> {
        let mut events = Vec::new();
        while let Ok(signal) = self.signals.try_recv() {
            match signal {
                Signal::Html(attrs) => events.push(ScanEvent::HtmlOpen(attrs)),
                Signal::Body => self.in_body = true,
                // `<body>` ends the head scope even when `</head>` is missing.
                _ if self.in_body => {}
                Signal::Meta(attrs) => events.push(ScanEvent::MetaOpen(attrs)),
                Signal::Link(attrs) => events.push(ScanEvent::LinkOpen(attrs)),
                Signal::TitleOpen => self.title = Some(String::new()),
                Signal::TitleRaw(text) => {
                    if let Some(title) = self.title.as_mut() {
                        push_capped(title, &text, MAX_TITLE_BYTES);
                    }
                }
                Signal::TitleClose => {
                    if let Some(raw) = self.title.take() {
                        events.push(ScanEvent::TitleText(decode_title(&raw)));
                    }
                }
            }
        }
        events
    }
}

fn build_rewriter(tx: Sender<Signal>) -> Rewriter {
    let html_tx = tx.clone();
    let body_tx = tx.clone();
    let meta_tx = tx.clone();
    let link_tx = tx.clone();
    let title_tx = tx.clone();
    let text_tx = tx;

    let mut memory_settings = MemorySettings::default();
    memory_settings.max_allowed_memory_usage = MAX_SCANNER_MEMORY;

    let settings = Settings {
        element_content_handlers: vec![
            element!("html", move |el| {
                emit(&html_tx, Signal::Html(collect_attributes(el.attributes())))
            }),
            element!("body", move |_el| emit(&body_tx, Signal::Body)),
            element!("head meta", move |el| {
                emit(&meta_tx, Signal::Meta(collect_attributes(el.attributes())))
            }),
            element!("head link", move |el| {
                emit(&link_tx, Signal::Link(collect_attributes(el.attributes())))
            }),
            element!("head > title", move |el| {
                emit(&title_tx, Signal::TitleOpen)?;
                if let Some(handlers) = el.end_tag_handlers() {
                    let close_tx = title_tx.clone();
                    handlers.push(Box::new(move |_end: &mut EndTag<'_>| -> HandlerResult {
                        emit(&close_tx, Signal::TitleClose)
                    }) as _);
                }
                Ok(())
            }),
            text!("head > title", move |chunk| {
                emit(&text_tx, Signal::TitleRaw(chunk.as_str().to_string()))
            }),
        ],
        memory_settings,
        strict: false,
        ..Settings::new_send()
    };

    HtmlRewriter::new(settings, discard as fn(&[u8]))
}

fn discard(_: &[u8]) {}

fn emit(tx: &Sender<Signal>, signal: Signal) -> HandlerResult {
    tx.send(signal).map_err(|_| "tag scanner dropped".into())
}

fn collect_attributes(attributes: &[Attribute<'_>]) -> TagAttributes {
    attributes
        .iter()
        .map(|attr| {
            let value = htmlize::unescape_attribute(attr.value()).into_owned();
            (attr.name(), value)
        })
        .collect()
}

fn decode_title(raw: &str) -> String {
    htmlize::unescape(raw).into_owned()
}

/// Appends `text` to `buf` without letting it grow past `limit` bytes.
fn push_capped(buf: &mut String, text: &str, limit: usize) {
    let room = limit.saturating_sub(buf.len());
    if text.len() <= room {
        buf.push_str(text);
        return;
    }
    let mut end = room;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    buf.push_str(&text[..end]);
}

/// Removes an end tag cut off by end of stream, e.g. `Hi</tit`.
fn strip_partial_end_tag(raw: &mut String) {
    const NAME: &str = "title";
    let Some(idx) = raw.rfind("</") else {
        return;
    };
    let tail = raw[idx + 2..].to_ascii_lowercase();
    let partial = if tail.len() <= NAME.len() {
        NAME.starts_with(&tail)
    } else {
        tail.starts_with(NAME)
            && tail[NAME.len()..].starts_with(|c: char| c.is_ascii_whitespace() || c == '/')
    };
    if partial {
        raw.truncate(idx);
    }
}
