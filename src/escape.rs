//! Escaping for text placed into HTML. There are two escapers with different
//! strengths: [`escape_html`] for element content and [`escape_attr`] for
//! quoted attribute values. The attribute escaper only handles `"`, so
//! callers must pick the one that matches the insertion point.
//!
//! Both are also exposed as [`fmt::Display`] wrappers ([`EscapeHtml`] and
//! [`EscapeAttr`]) so fragments can be assembled with `write!` without
//! allocating an intermediate string per field.

use pulldown_cmark::escape::{self, StrWrite};
use std::fmt::{self, Display};
use std::io;

/// Escapes `&`, `<`, `>`, and `"` for use in element content.
pub fn escape_html(s: &str) -> String {
    EscapeHtml(s).to_string()
}

/// Escapes `"` for use inside a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    EscapeAttr(s).to_string()
}

// Lets pulldown-cmark's escapers write into a `fmt::Formatter`, keeping the
// formatter's error so `fmt` can return it.
struct Adaptor<'a, T> {
    formatter: &'a mut T,
    result: fmt::Result,
}

impl<T> Adaptor<'_, T> {
    fn handle_result(&mut self, result: fmt::Result) -> io::Result<()> {
        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                self.result = result;
                Err(io::Error::new(io::ErrorKind::Other, e))
            }
        }
    }
}

impl<T: fmt::Write> StrWrite for Adaptor<'_, T> {
    fn write_str(&mut self, s: &str) -> io::Result<()> {
        let result = self.formatter.write_str(s);
        self.handle_result(result)
    }

    fn write_fmt(&mut self, args: fmt::Arguments) -> io::Result<()> {
        let result = self.formatter.write_fmt(args);
        self.handle_result(result)
    }
}

/// Displays the wrapped text with [`escape_html`] semantics.
pub struct EscapeHtml<'a>(pub &'a str);

impl Display for EscapeHtml<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut adaptor = Adaptor {
            formatter: f,
            result: Ok(()),
        };
        let _ = escape::escape_html(&mut adaptor, self.0);
        adaptor.result
    }
}

/// Displays the wrapped text with [`escape_attr`] semantics.
pub struct EscapeAttr<'a>(pub &'a str);

impl Display for EscapeAttr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pieces = self.0.split('"');
        if let Some(first) = pieces.next() {
            f.write_str(first)?;
        }
        for piece in pieces {
            f.write_str("&quot;")?;
            f.write_str(piece)?;
        }
        Ok(())
    }
}
