//! Highlights names in an article's paragraphs. Each name is bolded exactly
//! once across the whole paragraph sequence: at its first literal occurrence
//! in the first paragraph that contains it. Later occurrences, and repeats of
//! the name in the list, are left alone.
//!
//! Paragraphs are split into [`Span`]s rather than rewritten as strings, so a
//! name is only ever matched against the article's own text and never against
//! markup inserted for an earlier name.

use crate::escape::EscapeHtml;
use std::collections::HashSet;
use std::fmt;

/// A run of paragraph text, either plain or highlighted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Span<'a> {
    Text(&'a str),
    Bold(&'a str),
}

/// A paragraph after name highlighting. Displays as escaped HTML with each
/// highlighted name wrapped in `<strong>`.
#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph<'a> {
    pub spans: Vec<Span<'a>>,
}

impl<'a> Paragraph<'a> {
    fn new(text: &'a str) -> Self {
        Paragraph {
            spans: vec![Span::Text(text)],
        }
    }

    /// Bolds the first occurrence of `name` in this paragraph's plain text.
    /// Returns whether a match was found.
    fn bold_first(&mut self, name: &str) -> bool {
        let found = self.spans.iter().enumerate().find_map(|(i, span)| match *span {
            Span::Text(text) => text.find(name).map(|start| (i, text, start)),
            Span::Bold(_) => None,
        });
        match found {
            None => false,
            Some((i, text, start)) => {
                let end = start + name.len();
                let replacement: Vec<Span<'a>> = vec![
                    Span::Text(&text[..start]),
                    Span::Bold(&text[start..end]),
                    Span::Text(&text[end..]),
                ]
                .into_iter()
                .filter(|span| *span != Span::Text(""))
                .collect();
                self.spans.splice(i..=i, replacement);
                true
            }
        }
    }
}

impl fmt::Display for Paragraph<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for span in &self.spans {
            match *span {
                Span::Text(text) => write!(f, "{}", EscapeHtml(text))?,
                Span::Bold(text) => {
                    write!(f, "<strong>{}</strong>", EscapeHtml(text))?
                }
            }
        }
        Ok(())
    }
}

/// Splits `paragraphs` into spans, highlighting the first occurrence of each
/// of `names`. Names are processed in order; empty names never match.
pub fn bold_names<'a>(paragraphs: &'a [String], names: &[String]) -> Vec<Paragraph<'a>> {
    let mut out: Vec<Paragraph> =
        paragraphs.iter().map(|p| Paragraph::new(p)).collect();
    let mut used: HashSet<&str> = HashSet::new();

    for name in names {
        if name.is_empty() || used.contains(name.as_str()) {
            continue;
        }
        for paragraph in out.iter_mut() {
            if paragraph.bold_first(name) {
                used.insert(name.as_str());
                break;
            }
        }
    }
    out
}
