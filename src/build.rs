//! Exports the [`build_site`] function which stitches together the high-level
//! steps of building the output pages: parsing the page templates, loading
//! and rendering each page ([`crate::page`]), and writing the results to the
//! output directory ([`crate::write`]).

use crate::config::Config;
use crate::page::Page;
use crate::write::{Error as WriteError, Writer};
use gtmpl::Template;
use log::info;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Builds every [`Page`] from a [`Config`] object. Each page loads its own
/// copy of the articles, so a page whose load fails is written with its
/// failure message while the others still render normally.
pub fn build_site(config: &Config) -> Result<()> {
    // Parse templates up front so a broken theme fails the build before
    // anything is written.
    let mut templates: HashMap<Page, Template> = HashMap::new();
    for &page in Page::ALL.iter() {
        let files = config.template(page);
        if !files.is_empty() {
            templates.insert(page, parse_template(files.iter())?);
        }
    }

    std::fs::create_dir_all(&config.output_directory).map_err(|err| {
        Error::CreateOutputDirectory {
            path: config.output_directory.clone(),
            err,
        }
    })?;

    let writer = Writer {
        templates: &templates,
        output_directory: &config.output_directory,
    };
    for &page in Page::ALL.iter() {
        let fragment = page.fragment(&config.source, &config.options);
        writer.write_fragment(&fragment)?;
    }

    info!(
        "built {} pages in {}",
        Page::ALL.len(),
        config.output_directory.display()
    );
    Ok(())
}

// Loads the template file contents, concatenates them, and parses the result
// into a single template.
fn parse_template<P: AsRef<Path>>(template_files: impl Iterator<Item = P>) -> Result<Template> {
    let mut contents = String::new();
    for template_file in template_files {
        use std::io::Read;
        let template_file = template_file.as_ref();
        File::open(&template_file)
            .and_then(|mut file| file.read_to_string(&mut contents))
            .map_err(|e| Error::OpenTemplateFile {
                path: template_file.to_owned(),
                err: e,
            })?;
        contents.push(' ');
    }

    let mut template = Template::default();
    template.parse(&contents).map_err(Error::ParseTemplate)?;
    Ok(template)
}

type Result<T> = std::result::Result<T, Error>;

/// The error type for building the pages. Errors can be during template
/// parsing, output directory creation, and writing.
#[derive(Debug)]
pub enum Error {
    /// Returned for I/O problems while opening template files.
    OpenTemplateFile { path: PathBuf, err: std::io::Error },

    /// Returned for errors parsing template files.
    ParseTemplate(String),

    /// Returned when the output directory can't be created.
    CreateOutputDirectory { path: PathBuf, err: std::io::Error },

    /// Returned for errors templating or writing pages to disk.
    Write(WriteError),
}

impl fmt::Display for Error {
    /// Implements [`fmt::Display`] for [`Error`].
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::OpenTemplateFile { path, err } => {
                write!(f, "Opening template file '{}': {}", path.display(), err)
            }
            Error::ParseTemplate(err) => write!(f, "{}", err),
            Error::CreateOutputDirectory { path, err } => {
                write!(f, "Creating output directory '{}': {}", path.display(), err)
            }
            Error::Write(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    /// Implements [`std::error::Error`] for [`Error`].
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::OpenTemplateFile { path: _, err } => Some(err),
            Error::ParseTemplate(_) => None,
            Error::CreateOutputDirectory { path: _, err } => Some(err),
            Error::Write(err) => Some(err),
        }
    }
}

impl From<WriteError> for Error {
    /// Converts [`WriteError`]s into [`Error`]. This allows us to use the `?`
    /// operator.
    fn from(err: WriteError) -> Error {
        Error::Write(err)
    }
}
