//! Renders the archive: articles grouped by edition, newest edition first.
//! Edition labels are expected to look like `{Season} {Year}` (e.g. `Spring
//! 2024`). See [`sort_editions`] for how labels that don't fit that shape are
//! ordered.

use crate::article::Article;
use crate::escape::{EscapeAttr, EscapeHtml};
use log::debug;
use std::cmp::Reverse;
use std::collections::HashMap;

/// The group label for articles without an edition.
pub const UNSORTED: &str = "Unsorted";

/// The articles published in one edition, in input order.
#[derive(Debug)]
pub struct Edition<'a> {
    pub label: &'a str,
    pub articles: Vec<&'a Article>,
}

/// Renders the archive for `articles`: one `<section>` per edition, ordered
/// by [`sort_editions`].
pub fn render_archive(articles: &[Article]) -> String {
    let mut editions = group_by_edition(articles);
    sort_editions(&mut editions);
    debug!(
        "rendering {} archive sections for {} articles",
        editions.len(),
        articles.len()
    );
    editions.iter().map(render_edition).collect()
}

/// Groups articles by their edition label, with unlabeled articles under
/// [`UNSORTED`]. Groups appear in the order their first article does.
pub fn group_by_edition(articles: &[Article]) -> Vec<Edition<'_>> {
    let mut editions: Vec<Edition<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for article in articles {
        let label = article.edition().unwrap_or(UNSORTED);
        match index.get(label) {
            Some(&i) => editions[i].articles.push(article),
            None => {
                index.insert(label, editions.len());
                editions.push(Edition {
                    label,
                    articles: vec![article],
                });
            }
        }
    }
    editions
}

/// Orders editions newest first. A label is read as `{season} {year}`: years
/// compare descending (a missing or non-numeric year counts as 0), and within
/// a year `Spring` comes before `Fall`, with any other season after both.
/// Editions that compare equal keep their relative order.
pub fn sort_editions(editions: &mut [Edition<'_>]) {
    editions.sort_by_key(|edition| edition_key(edition.label));
}

fn edition_key(label: &str) -> (Reverse<i64>, u8) {
    let mut parts = label.split(' ');
    let season = parts.next().unwrap_or_default();
    let year = parts.next().map(leading_int).unwrap_or(0);
    (Reverse(year), season_rank(season))
}

fn season_rank(season: &str) -> u8 {
    match season {
        "Spring" => 1,
        "Fall" => 2,
        _ => 99,
    }
}

// Reads the integer at the start of `s` (after leading whitespace), ignoring
// anything that follows it. Returns 0 if there isn't one.
fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or_else(|| digits.len());
    match digits[..end].parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => 0,
    }
}

fn render_edition(edition: &Edition) -> String {
    let items: String = edition.articles.iter().map(|a| render_item(a)).collect();
    format!(
        concat!(
            "<section><h2>{}</h2><ul>{}</ul>",
            "<p class=\"back-top\"><a href=\"#top\">Back to top \u{2191}</a></p>",
            "</section>",
        ),
        EscapeHtml(edition.label),
        items,
    )
}

fn render_item(article: &Article) -> String {
    let title = EscapeHtml(article.title().unwrap_or_default());
    let link = match article.url() {
        Some(url) => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            EscapeAttr(url),
            title
        ),
        None => title.to_string(),
    };
    let summary = match article.summary() {
        Some(summary) => format!(" \u{2014} {}", EscapeHtml(summary)),
        None => String::new(),
    };
    format!("<li><strong>{}</strong>{}</li>", link, summary)
}
