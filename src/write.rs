use crate::page::{Fragment, Page};
use gtmpl::Template;
use gtmpl_value::Value;
use log::info;
use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Responsible for templating rendered [`Fragment`]s and writing them to
/// disk.
pub struct Writer<'a> {
    /// Page templates, by page. A page without a template is written as the
    /// bare fragment.
    pub templates: &'a HashMap<Page, Template>,

    /// The directory in which the page files will be written. Each page is
    /// written to `{output_directory}/{container}.html`.
    pub output_directory: &'a Path,
}

impl Writer<'_> {
    /// The output file for `page`.
    pub fn file_path(&self, page: Page) -> PathBuf {
        self.output_directory
            .join(format!("{}.html", page.container()))
    }

    /// Takes a single [`Fragment`], templates it, and writes it to disk.
    pub fn write_fragment(&self, fragment: &Fragment) -> Result<()> {
        let path = self.file_path(fragment.page);
        let mut file = std::fs::File::create(&path)?;
        match self.templates.get(&fragment.page) {
            Some(template) => template.execute(
                &mut file,
                &gtmpl::Context::from(fragment_to_value(fragment))?,
            )?,
            None => file.write_all(fragment.html.as_bytes())?,
        }
        info!("wrote {} page to {}", fragment.page, path.display());
        Ok(())
    }
}

/// Converts a [`Fragment`] into a [`Value::Object`] with fields `container`
/// (the container id), `content` (the rendered HTML), and `loaded` (whether
/// the articles loaded).
fn fragment_to_value(fragment: &Fragment) -> Value {
    let mut m: HashMap<String, Value> = HashMap::new();
    m.insert(
        "container".to_owned(),
        Value::String(fragment.page.container().to_owned()),
    );
    m.insert("content".to_owned(), Value::String(fragment.html.clone()));
    m.insert("loaded".to_owned(), Value::Bool(fragment.loaded));
    Value::Object(m)
}

/// The result of a fallible page-writing operation.
type Result<T> = std::result::Result<T, Error>;

/// Represents an error in a page-writing operation.
#[derive(Debug)]
pub enum Error {
    /// An error during templating.
    Template(String),

    /// An error writing the output files.
    Io(io::Error),
}

impl From<io::Error> for Error {
    /// Converts an [`io::Error`] into an [`Error`]. This allows us to use the
    /// `?` operator for fallible I/O operations.
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<String> for Error {
    /// Converts a template error message ([`String`]) into an [`Error`]. This
    /// allows us to use the `?` operator for fallible template operations.
    fn from(err: String) -> Error {
        Error::Template(err)
    }
}

impl fmt::Display for Error {
    /// Displays an [`Error`] as presentable text.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Template(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements the [`std::error::Error`] trait for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Template(_) => None,
            Error::Io(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn fragment(page: Page, html: &str) -> Fragment {
        Fragment {
            page,
            html: html.to_owned(),
            loaded: true,
        }
    }

    #[test]
    fn test_write_bare_fragment() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let templates = HashMap::new();
        let writer = Writer {
            templates: &templates,
            output_directory: dir.path(),
        };
        writer.write_fragment(&fragment(Page::Feed, "<article></article>"))?;
        assert_eq!(
            std::fs::read_to_string(dir.path().join("articles.html"))?,
            "<article></article>"
        );
        Ok(())
    }

    #[test]
    fn test_write_templated_fragment() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let mut template = Template::default();
        template.parse(r#"<main id="{{.container}}">{{.content}}</main>"#)?;
        let mut templates = HashMap::new();
        templates.insert(Page::Archive, template);
        let writer = Writer {
            templates: &templates,
            output_directory: dir.path(),
        };
        writer.write_fragment(&fragment(Page::Archive, "<section></section>"))?;
        assert_eq!(
            std::fs::read_to_string(dir.path().join("archives.html"))?,
            r#"<main id="archives"><section></section></main>"#
        );
        Ok(())
    }
}
