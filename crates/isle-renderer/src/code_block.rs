//! Fenced and indented code block rendering.

use pulldown_cmark::CodeBlockKind;
use tracing::warn;

use crate::highlight::Highlighter;
use crate::util::escape_html;

/// Code block collected from parser events.
#[derive(Debug, Default)]
pub(crate) struct CodeBlockState {
    language: Option<String>,
    code: String,
}

impl CodeBlockState {
    pub(crate) fn new(kind: &CodeBlockKind<'_>) -> Self {
        let language = match kind {
            CodeBlockKind::Fenced(info) => parse_fence_info(info),
            CodeBlockKind::Indented => None,
        };
        Self {
            language,
            code: String::new(),
        }
    }

    pub(crate) fn push(&mut self, text: &str) {
        self.code.push_str(text);
    }

    /// Render the block as `<pre><code>` with highlighted content.
    ///
    /// A known language is highlighted with its own grammar and tagged with a
    /// `language-*` class. Anything else, including a grammar failure, goes
    /// through auto-detection.
    pub(crate) fn render(&self, highlighter: &dyn Highlighter) -> String {
        if let Some(language) = self
            .language
            .as_deref()
            .filter(|lang| highlighter.is_known_language(lang))
        {
            match highlighter.highlight(&self.code, language) {
                Ok(html) => {
                    return format!(
                        "<pre><code class=\"hljs language-{}\">{html}</code></pre>\n",
                        escape_html(language)
                    );
                }
                Err(e) => warn!(language, error = %e, "Syntax highlighting failed"),
            }
        }

        let html = highlighter.highlight_auto(&self.code);
        format!("<pre><code class=\"hljs\">{html}</code></pre>\n")
    }
}

/// Extract the language tag from a fence info string.
///
/// The tag is the first whitespace-separated word; attributes after it are
/// ignored.
fn parse_fence_info(info: &str) -> Option<String> {
    info.split_whitespace()
        .next()
        .filter(|lang| !lang.is_empty())
        .map(str::to_owned)
}
