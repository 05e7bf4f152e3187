//! Markdown rendering for CMS item bodies.
//!
//! Converts markdown to an HTML fragment with GitHub Flavored Markdown
//! extensions, single newlines rendered as line breaks, and code blocks
//! highlighted into highlight.js compatible markup:
//!
//! - fenced block with a known language:
//!   `<pre><code class="hljs language-{lang}">...</code></pre>`
//! - anything else: `<pre><code class="hljs">...</code></pre>` with the
//!   grammar picked by auto-detection
//!
//! # Example
//!
//! ```ignore
//! use isle_renderer::MarkdownRenderer;
//!
//! let renderer = MarkdownRenderer::new();
//! let html = renderer.render("```rust\nfn main() {}\n```");
//! assert!(html.contains("language-rust"));
//! ```

mod autolink;
mod code_block;
mod highlight;
mod renderer;
mod util;

pub use highlight::{HighlightError, Highlighter, SyntectHighlighter};
pub use renderer::MarkdownRenderer;
pub use util::escape_html;
