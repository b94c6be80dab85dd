use crate::feed::{Options, DEFAULT_CAPTION, DEFAULT_IMAGE};
use crate::load::Source;
use crate::page::Page;
use anyhow::{anyhow, Result};
use log::info;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// The project file name, looked up in the working directory and its
/// ancestors.
pub const PROJECT_FILE: &str = "byline.yaml";

#[derive(Deserialize)]
#[serde(default)]
struct Project {
    source: String,
    output_directory: PathBuf,
    default_image: String,
    default_caption: String,
    render_paragraphs: bool,
    templates: Templates,
}

impl Default for Project {
    fn default() -> Self {
        Project {
            source: String::from("data/articles.json"),
            output_directory: PathBuf::from("public"),
            default_image: DEFAULT_IMAGE.to_owned(),
            default_caption: DEFAULT_CAPTION.to_owned(),
            render_paragraphs: false,
            templates: Templates::default(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Templates {
    feed: Vec<PathBuf>,
    archive: Vec<PathBuf>,
}

/// Command-line values that take precedence over the project file.
#[derive(Default)]
pub struct Overrides<'a> {
    pub source: Option<&'a str>,
    pub output_directory: Option<&'a Path>,
}

pub struct Config {
    pub source: Source,
    pub output_directory: PathBuf,
    pub options: Options,
    pub feed_template: Vec<PathBuf>,
    pub archive_template: Vec<PathBuf>,
}

impl Config {
    /// Loads the configuration for a build. An explicit `project` file is
    /// used as given; otherwise `dir` and its ancestors are searched for
    /// [`PROJECT_FILE`], and if none exists the defaults apply relative to
    /// `dir`.
    pub fn load(project: Option<&Path>, dir: &Path, overrides: &Overrides) -> Result<Config> {
        match project {
            Some(path) => Config::from_project_file(path, overrides),
            None => match find_project_file(dir) {
                Some(path) => Config::from_project_file(&path, overrides),
                None => {
                    info!(
                        "no `{}` in `{}` or its parents; using defaults",
                        PROJECT_FILE,
                        dir.display()
                    );
                    Ok(Config::from_project(Project::default(), dir, overrides))
                }
            },
        }
    }

    pub fn from_project_file(path: &Path, overrides: &Overrides) -> Result<Config> {
        let file = File::open(path)
            .map_err(|e| anyhow!("Opening project file `{}`: {}", path.display(), e))?;
        let project: Project = match serde_yaml::from_reader(file) {
            Ok(project) => project,
            Err(e) => return Err(anyhow!("Loading configuration `{}`: {}", path.display(), e)),
        };
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )),
            Some(project_root) => Ok(Config::from_project(project, project_root, overrides)),
        }
    }

    fn from_project(project: Project, project_root: &Path, overrides: &Overrides) -> Config {
        Config {
            source: Source::parse(overrides.source.unwrap_or(project.source.as_str()), project_root),
            output_directory: match overrides.output_directory {
                Some(dir) => dir.to_owned(),
                None => project_root.join(project.output_directory),
            },
            options: Options {
                default_image: project.default_image,
                default_caption: project.default_caption,
                render_paragraphs: project.render_paragraphs,
            },
            feed_template: project
                .templates
                .feed
                .iter()
                .map(|relpath| project_root.join(relpath))
                .collect(),
            archive_template: project
                .templates
                .archive
                .iter()
                .map(|relpath| project_root.join(relpath))
                .collect(),
        }
    }

    /// The template files for `page`, in the order they're concatenated.
    pub fn template(&self, page: Page) -> &[PathBuf] {
        match page {
            Page::Feed => &self.feed_template,
            Page::Archive => &self.archive_template,
        }
    }
}

fn find_project_file(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .map(|ancestor| ancestor.join(PROJECT_FILE))
        .find(|path| path.is_file())
}
