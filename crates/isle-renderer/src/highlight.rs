//! Syntax highlighting for code blocks.
//!
//! The renderer talks to a [`Highlighter`]; [`SyntectHighlighter`] is the
//! default implementation, producing class-based HTML with `hljs-` prefixed
//! scope classes so that highlight.js style sheets can target it.

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::util::escape_html;

/// Prefix for generated scope classes.
const CLASS_PREFIX: &str = "hljs-";

/// Error while highlighting a code block.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HighlightError {
    /// The language has no grammar.
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    /// The grammar failed on the input.
    #[error("failed to highlight {language}: {source}")]
    Syntax {
        /// Language that was requested.
        language: String,
        /// Underlying highlighting error.
        source: syntect::Error,
    },
}

/// Code highlighting engine.
///
/// Output is an HTML fragment for the inside of a `<code>` element, with
/// all code text escaped.
pub trait Highlighter: Send + Sync {
    /// Check if the engine has a grammar for a fence language tag.
    fn is_known_language(&self, language: &str) -> bool;

    /// Highlight with the grammar of `language`.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError`] if the language is unknown or its grammar fails.
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError>;

    /// Highlight with a detected grammar. Never fails.
    ///
    /// How much is detected depends on the engine. Implementations fall back
    /// to escaped plain text when nothing matches.
    fn highlight_auto(&self, code: &str) -> String;
}

/// Highlighter backed by syntect's default grammars.
///
/// Auto-detection only looks at the first line: shebangs
/// (`#!/usr/bin/env python`), editor modelines and declarations such as
/// `<?xml` or `<?php`. There is no relevance scoring over the whole block,
/// so an untagged block without such a line is rendered as plain text
/// inside the `hljs` wrapper. Tag fences with a language to get grammar
/// highlighting.
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
}

impl SyntectHighlighter {
    /// Load the default syntax set.
    ///
    /// Loading takes a noticeable amount of time; create one highlighter and
    /// share it.
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
        }
    }

    fn find_syntax(&self, language: &str) -> Option<&SyntaxReference> {
        self.syntax_set.find_syntax_by_token(language)
    }

    fn highlight_with(
        &self,
        code: &str,
        syntax: &SyntaxReference,
    ) -> Result<String, syntect::Error> {
        let mut generator = ClassedHTMLGenerator::new_with_class_style(
            syntax,
            &self.syntax_set,
            ClassStyle::SpacedPrefixed {
                prefix: CLASS_PREFIX,
            },
        );
        for line in LinesWithEndings::from(code) {
            generator.parse_html_for_line_which_includes_newline(line)?;
        }
        Ok(generator.finalize())
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn is_known_language(&self, language: &str) -> bool {
        self.find_syntax(language).is_some()
    }

    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        let syntax = self
            .find_syntax(language)
            .ok_or_else(|| HighlightError::UnknownLanguage(language.to_owned()))?;
        self.highlight_with(code, syntax)
            .map_err(|source| HighlightError::Syntax {
                language: language.to_owned(),
                source,
            })
    }

    fn highlight_auto(&self, code: &str) -> String {
        // First-line detection covers shebangs, modelines and XML declarations.
        let syntax = self
            .syntax_set
            .find_syntax_by_first_line(code)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        self.highlight_with(code, syntax)
            .unwrap_or_else(|_| escape_html(code))
    }
}
