//! Markdown to HTML conversion.

use std::sync::Arc;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, TextMergeStream, html};

use crate::autolink::{self, AnchorTag};
use crate::code_block::CodeBlockState;
use crate::highlight::{Highlighter, SyntectHighlighter};

/// Markdown renderer producing HTML with highlighted code blocks.
///
/// Rendering is a pure function of the input and the renderer's settings, so
/// a single renderer can be shared between threads.
///
/// # Example
///
/// ```ignore
/// use isle_renderer::MarkdownRenderer;
///
/// let renderer = MarkdownRenderer::new();
/// let html = renderer.render("# Hello\n\nWorld");
/// assert!(html.contains("<h1>Hello</h1>"));
/// ```
#[derive(Clone)]
pub struct MarkdownRenderer {
    highlighter: Arc<dyn Highlighter>,
    breaks: bool,
    gfm: bool,
}

impl MarkdownRenderer {
    /// Create a renderer with the syntect highlighter, line breaks and GFM
    /// enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::with_highlighter(Arc::new(SyntectHighlighter::new()))
    }

    /// Create a renderer with a custom highlighter.
    #[must_use]
    pub fn with_highlighter(highlighter: Arc<dyn Highlighter>) -> Self {
        Self {
            highlighter,
            breaks: true,
            gfm: true,
        }
    }

    /// Render single newlines inside paragraphs as `<br />`.
    #[must_use]
    pub fn with_breaks(mut self, enabled: bool) -> Self {
        self.breaks = enabled;
        self
    }

    /// Enable GitHub Flavored Markdown: tables, strikethrough, task lists
    /// and bare URL autolinks.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }

    /// Render markdown to an HTML fragment.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let parser = TextMergeStream::new(Parser::new_ext(markdown, self.parser_options()));

        let mut events = Vec::new();
        let mut code_block: Option<CodeBlockState> = None;
        // Nesting depth of links, images and raw `<a>` tags; their text is
        // never autolinked.
        let mut link_depth = 0usize;

        for event in parser {
            if let Some(state) = code_block.as_mut() {
                match event {
                    Event::Text(text) => state.push(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let html = state.render(self.highlighter.as_ref());
                        events.push(Event::Html(html.into()));
                        code_block = None;
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    code_block = Some(CodeBlockState::new(&kind));
                }
                Event::Start(tag @ (Tag::Link { .. } | Tag::Image { .. })) => {
                    link_depth += 1;
                    events.push(Event::Start(tag));
                }
                Event::End(tag @ (TagEnd::Link | TagEnd::Image)) => {
                    link_depth = link_depth.saturating_sub(1);
                    events.push(Event::End(tag));
                }
                Event::InlineHtml(html) => {
                    match autolink::anchor_tag(&html) {
                        Some(AnchorTag::Open) => link_depth += 1,
                        Some(AnchorTag::Close) => link_depth = link_depth.saturating_sub(1),
                        None => {}
                    }
                    events.push(Event::InlineHtml(html));
                }
                Event::SoftBreak if self.breaks => events.push(Event::HardBreak),
                Event::Text(text) if self.gfm && link_depth == 0 => {
                    autolink::push_linked(text, &mut events);
                }
                other => events.push(other),
            }
        }

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());
        output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}
