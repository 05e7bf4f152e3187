//! Bare URL autolinking for GFM mode.
//!
//! CommonMark only links `<https://...>` autolinks. GitHub flavor also links
//! bare `http://`, `https://` and `www.` URLs in text, which is what this
//! module adds on top of the parser.

use std::sync::LazyLock;

use pulldown_cmark::{CowStr, Event};
use regex::Regex;

use crate::util::escape_html;

static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:https?://|www\.)[^\s<]+").unwrap());

/// Push `text` as events, turning bare URLs into links.
pub(crate) fn push_linked<'a>(text: CowStr<'a>, events: &mut Vec<Event<'a>>) {
    if !URL_PATTERN.is_match(&text) {
        events.push(Event::Text(text));
        return;
    }

    let mut last = 0;
    for m in URL_PATTERN.find_iter(&text) {
        let url = trim_trailing(m.as_str());
        if !has_host(url) {
            continue;
        }
        if m.start() > last {
            events.push(Event::Text(CowStr::from(text[last..m.start()].to_owned())));
        }
        events.push(Event::InlineHtml(CowStr::from(anchor(url))));
        last = m.start() + url.len();
    }
    if last < text.len() {
        events.push(Event::Text(CowStr::from(text[last..].to_owned())));
    }
}

/// Raw HTML anchor boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnchorTag {
    Open,
    Close,
}

/// Classify an inline HTML fragment as an `<a ...>` or `</a>` tag.
///
/// Text between raw anchor tags is already a link and must not be linked
/// again.
pub(crate) fn anchor_tag(html: &str) -> Option<AnchorTag> {
    let html = html.trim_start();
    let (tag, rest) = if let Some(rest) = strip_prefix_ignore_case(html, "</a") {
        (AnchorTag::Close, rest)
    } else {
        (AnchorTag::Open, strip_prefix_ignore_case(html, "<a")?)
    };
    match rest.chars().next() {
        Some(c) if c == '>' || c.is_whitespace() => Some(tag),
        _ => None,
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then_some(&s[prefix.len()..])
}

fn anchor(url: &str) -> String {
    let href = if url.len() >= 4 && url[..4].eq_ignore_ascii_case("www.") {
        format!("http://{url}")
    } else {
        url.to_owned()
    };
    format!(
        "<a href=\"{}\">{}</a>",
        escape_html(&href),
        escape_html(url)
    )
}

/// Check that something follows the scheme or `www.` prefix.
fn has_host(url: &str) -> bool {
    let rest = url
        .split_once("://")
        .map_or_else(|| url.get(4..).unwrap_or(""), |(_, rest)| rest);
    !rest.is_empty()
}

/// Drop trailing punctuation and unbalanced closing parentheses.
fn trim_trailing(url: &str) -> &str {
    let mut end = url.len();
    while let Some(c) = url[..end].chars().next_back() {
        let current = &url[..end];
        let strip = match c {
            '.' | ',' | ':' | ';' | '!' | '?' | '"' | '\'' | '*' | '_' | '~' => true,
            ')' => current.matches(')').count() > current.matches('(').count(),
            _ => false,
        };
        if !strip {
            break;
        }
        end -= c.len_utf8();
    }
    &url[..end]
}
