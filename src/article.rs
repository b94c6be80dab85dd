//! Defines the [`Article`] type, the record both pages are rendered from.
//! Articles are deserialized straight from the JSON data file (see
//! [`crate::load`]) and never mutated afterwards.

use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use std::fmt;

/// A single article record. Every text field is optional; an empty string is
/// treated the same as a missing one by the accessor methods, which is what
/// the renderers use.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,

    /// The article's abstract (`abstract` in the JSON).
    #[serde(default, rename = "abstract")]
    pub summary: Option<String>,

    /// Credit line for the featured image.
    #[serde(default)]
    pub caption: Option<String>,

    /// Path or URL of the featured image.
    #[serde(default)]
    pub image: Option<String>,

    /// Link to the full article.
    #[serde(default)]
    pub url: Option<String>,

    /// The edition (e.g. `Spring 2024`) the article was published in.
    #[serde(default)]
    pub edition: Option<String>,

    #[serde(default)]
    pub author_first: Option<String>,

    #[serde(default)]
    pub author_last: Option<String>,

    /// When set, the byline takes the form `By {name} ‘{grad_year}` and is
    /// also used as the heading for untitled articles.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title_credit: bool,

    #[serde(default)]
    pub grad_year: Option<GradYear>,

    /// Publish date, nominally `YYYY-MM-DD`. See
    /// [`crate::date::parse_local_date`].
    #[serde(default)]
    pub published: Option<String>,

    /// Tag labels. Non-string entries (`2024`, `true`) are kept as their
    /// text rather than rejecting the whole document.
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub paragraphs: Vec<String>,

    /// Names to highlight in the paragraphs. See [`crate::bold`].
    #[serde(
        default,
        rename = "brophyNamesToBold",
        deserialize_with = "null_as_default"
    )]
    pub names_to_bold: Vec<String>,
}

/// A graduation year. The data file has it both as a string (`"24"`) and as
/// a number (`2024`); either is displayed as written.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum GradYear {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for GradYear {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            GradYear::Number(n) => write!(f, "{}", number_text(n)),
            GradYear::Text(s) => write!(f, "{}", s),
        }
    }
}

impl Article {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn summary(&self) -> Option<&str> {
        non_empty(&self.summary)
    }

    pub fn caption(&self) -> Option<&str> {
        non_empty(&self.caption)
    }

    pub fn image(&self) -> Option<&str> {
        non_empty(&self.image)
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    pub fn edition(&self) -> Option<&str> {
        non_empty(&self.edition)
    }

    pub fn published(&self) -> Option<&str> {
        non_empty(&self.published)
    }

    /// `{author_first} {author_last}`, with missing halves left blank.
    pub fn author_name(&self) -> String {
        format!(
            "{} {}",
            self.author_first.as_deref().unwrap_or_default(),
            self.author_last.as_deref().unwrap_or_default(),
        )
    }

    /// The author credit: `By {name} ‘{grad_year}` in title-credit mode,
    /// otherwise just the author's name.
    pub fn byline(&self) -> String {
        match self.title_credit {
            true => format!(
                "By {} \u{2018}{}",
                self.author_name(),
                self.grad_year
                    .as_ref()
                    .map(|year| year.to_string())
                    .unwrap_or_default(),
            ),
            false => self.author_name(),
        }
    }

    /// The feed heading: the title, or the byline for untitled articles.
    pub fn heading(&self) -> Cow<'_, str> {
        match self.title() {
            Some(title) => Cow::Borrowed(title),
            None => Cow::Owned(self.byline()),
        }
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

// Lets `null` stand in for a missing list or flag.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Lets scalar entries stand in for strings in a list: numbers and booleans
// become their text. Anything else (nested lists, objects) is still an error.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    values
        .unwrap_or_default()
        .into_iter()
        .map(|value| match value {
            serde_json::Value::String(s) => Ok(s),
            serde_json::Value::Number(n) => Ok(number_text(&n)),
            serde_json::Value::Bool(b) => Ok(b.to_string()),
            serde_json::Value::Null => Ok(String::from("null")),
            other => Err(<D::Error as serde::de::Error>::custom(format!(
                "expected a string or scalar tag, got {}",
                other
            ))),
        })
        .collect()
}

// Whole floats (`2026.0`) print without their fraction, the same as the
// integer they equal.
fn number_text(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(x) if n.is_f64() => x.to_string(),
        _ => n.to_string(),
    }
}
