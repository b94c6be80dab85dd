//! Renders the article feed: every article as a self-contained `<article>`
//! block, newest first. Each block is assembled from small fragment builders,
//! one per element, so every insertion point picks its escaper explicitly
//! ([`EscapeHtml`] for content, [`EscapeAttr`] for attribute values).

use crate::article::Article;
use crate::bold::bold_names;
use crate::date::{format_display_date, parse_local_date};
use crate::escape::{EscapeAttr, EscapeHtml};
use chrono::NaiveDate;
use log::debug;

/// The image shown for articles without one of their own.
pub const DEFAULT_IMAGE: &str = "assets/sjb-logo.jpg";

/// The caption shown for articles without one of their own.
pub const DEFAULT_CAPTION: &str = "Courtesy of Brophy Research Journal";

/// Presentation settings for the feed.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Image path used when an article has no `image`.
    pub default_image: String,

    /// Caption used when an article has no `caption`.
    pub default_caption: String,

    /// Whether to emit the article's paragraphs (with names bolded) in a
    /// `<div class="body">`. Off by default, which keeps the feed to the
    /// figure, heading, abstract, meta, and tag lines.
    pub render_paragraphs: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            default_image: DEFAULT_IMAGE.to_owned(),
            default_caption: DEFAULT_CAPTION.to_owned(),
            render_paragraphs: false,
        }
    }
}

/// Renders the feed for `articles`, newest first. See [`sort_by_published`]
/// for the ordering.
pub fn render_feed(articles: &[Article], options: &Options) -> String {
    let sorted = sort_by_published(articles);
    debug!("rendering {} feed entries", sorted.len());
    sorted
        .into_iter()
        .map(|article| render_article(article, options))
        .collect()
}

/// Orders articles by `published`, most recent first. Articles whose date is
/// missing or doesn't parse come last. Articles with equal dates keep their
/// relative input order.
pub fn sort_by_published(articles: &[Article]) -> Vec<&Article> {
    let mut sorted: Vec<&Article> = articles.iter().collect();
    sorted.sort_by(|a, b| published_key(b).cmp(&published_key(a)));
    sorted
}

// `None` orders before every date, so undated articles end up last in a
// descending sort.
fn published_key(article: &Article) -> Option<NaiveDate> {
    article.published().and_then(parse_local_date)
}

/// Renders a single `<article>` block.
pub fn render_article(article: &Article, options: &Options) -> String {
    let byline = article.byline();
    let mut html = String::from("\n<article>\n");
    html.push_str(&figure(article, options));
    html.push_str(&heading(article));
    html.push_str(&summary(article));
    if options.render_paragraphs {
        html.push_str(&body(article));
    }
    html.push_str(&meta(&byline, article.edition()));
    html.push_str(&actions(article.url()));
    html.push_str(&tags(&article.tags));
    html.push_str("</article>\n");
    html
}

fn figure(article: &Article, options: &Options) -> String {
    format!(
        concat!(
            "  <figure class=\"featured\">\n",
            "    <img src=\"{}\" alt=\"Featured image\">\n",
            "    <figcaption>{}</figcaption>\n",
            "  </figure>\n",
        ),
        EscapeAttr(article.image().unwrap_or(options.default_image.as_str())),
        EscapeHtml(article.caption().unwrap_or(options.default_caption.as_str())),
    )
}

fn heading(article: &Article) -> String {
    let pubdate = match article.published() {
        // `format_display_date` escapes its fallback itself.
        Some(published) => format!(
            "    <p class=\"pubdate\">{}</p>\n",
            format_display_date(published)
        ),
        None => String::new(),
    };
    format!(
        "  <div class=\"byline\">\n    <h2>{}</h2>\n{}  </div>\n",
        EscapeHtml(&*article.heading()),
        pubdate,
    )
}

fn summary(article: &Article) -> String {
    match article.summary() {
        Some(summary) => format!("  <p class=\"abstract\">{}</p>\n", EscapeHtml(summary)),
        None => String::new(),
    }
}

fn body(article: &Article) -> String {
    let paragraphs = bold_names(&article.paragraphs, &article.names_to_bold);
    if paragraphs.is_empty() {
        return String::new();
    }
    let mut html = String::from("  <div class=\"body\">\n");
    for paragraph in paragraphs {
        html.push_str(&format!("    <p>{}</p>\n", paragraph));
    }
    html.push_str("  </div>\n");
    html
}

fn meta(byline: &str, edition: Option<&str>) -> String {
    let edition = match edition {
        Some(edition) => format!(
            " \u{b7} <span class=\"edition\">{}</span>",
            EscapeHtml(edition)
        ),
        None => String::new(),
    };
    format!(
        "  <p class=\"meta\">\n    <em>{}</em>{}\n  </p>\n",
        EscapeHtml(byline),
        edition,
    )
}

fn actions(url: Option<&str>) -> String {
    match url {
        Some(url) => format!(
            concat!(
                "  <p class=\"actions\"><a class=\"btn\" href=\"{}\" ",
                "target=\"_blank\" rel=\"noopener\">Read full article</a></p>\n",
            ),
            EscapeAttr(url)
        ),
        None => String::new(),
    }
}

fn tags(tags: &[String]) -> String {
    let spans: Vec<String> = tags
        .iter()
        .map(|tag| format!("<span class=\"tag\">{}</span>", EscapeHtml(tag)))
        .collect();
    format!(
        "  <p class=\"tags\"><strong>Tags:</strong> {}</p>\n",
        spans.join(" ")
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::load::parse_articles;

    fn article(json: &str) -> Article {
        serde_json::from_str(json).unwrap()
    }

    fn fixture() -> Vec<Article> {
        parse_articles(include_bytes!("../testdata/articles.json")).unwrap()
    }

    fn titles(articles: &[&Article]) -> Vec<String> {
        articles.iter().map(|a| a.heading().into_owned()).collect()
    }

    #[test]
    fn test_sort_by_published_newest_first() {
        let articles = fixture();
        assert_eq!(
            titles(&sort_by_published(&articles)),
            vec![
                "By Sam Ortiz \u{2018}2026",
                "Cafeteria Compost <Study>",
                "Tide Pool Census",
                "Robotics Regional",
            ]
        );
    }

    #[test]
    fn test_sort_keeps_input_order_for_ties() {
        let articles = vec![
            article(r#"{"title": "a", "published": "2024-03-01"}"#),
            article(r#"{"title": "b"}"#),
            article(r#"{"title": "c", "published": "2024-03-01"}"#),
            article(r#"{"title": "d", "published": "garbage"}"#),
            article(r#"{"title": "e", "published": "1969-07-20"}"#),
        ];
        assert_eq!(
            titles(&sort_by_published(&articles)),
            vec!["a", "c", "e", "b", "d"]
        );
    }

    #[test]
    fn test_render_feed_orders_blocks() {
        let articles = vec![
            article(r#"{"title": "Older", "published": "2023-05-01"}"#),
            article(r#"{"title": "Newer", "published": "2024-01-10"}"#),
        ];
        let html = render_feed(&articles, &Options::default());
        let newer = html.find("<h2>Newer</h2>").unwrap();
        let older = html.find("<h2>Older</h2>").unwrap();
        assert!(newer < older);
        assert_eq!(html.matches("<article>").count(), 2);
    }

    #[test]
    fn test_render_article_full() {
        let articles = fixture();
        let html = render_article(&articles[0], &Options::default());
        assert_eq!(
            html,
            concat!(
                "\n<article>\n",
                "  <figure class=\"featured\">\n",
                "    <img src=\"assets/tide-pools.jpg\" alt=\"Featured image\">\n",
                "    <figcaption>Photo by Ana Reyes</figcaption>\n",
                "  </figure>\n",
                "  <div class=\"byline\">\n",
                "    <h2>Tide Pool Census</h2>\n",
                "    <p class=\"pubdate\">May 1, 2023</p>\n",
                "  </div>\n",
                "  <p class=\"abstract\">Students counted anemones along the breakwater for a semester.</p>\n",
                "  <p class=\"meta\">\n",
                "    <em>Ana Reyes</em> \u{b7} <span class=\"edition\">Spring 2023</span>\n",
                "  </p>\n",
                "  <p class=\"actions\"><a class=\"btn\" href=\"https://example.org/articles/tide-pools.pdf\" target=\"_blank\" rel=\"noopener\">Read full article</a></p>\n",
                "  <p class=\"tags\"><strong>Tags:</strong> <span class=\"tag\">biology</span> <span class=\"tag\">field work</span></p>\n",
                "</article>\n",
            )
        );
    }

    #[test]
    fn test_render_article_fallbacks() {
        let html = render_article(
            &article(r#"{"authorFirst": "Lee", "authorLast": "Park"}"#),
            &Options::default(),
        );
        assert!(html.contains(r#"<img src="assets/sjb-logo.jpg" alt="Featured image">"#));
        assert!(html.contains("<figcaption>Courtesy of Brophy Research Journal</figcaption>"));
        assert!(html.contains("<h2>Lee Park</h2>"));
        assert!(!html.contains("pubdate"));
        assert!(!html.contains("class=\"abstract\""));
        assert!(!html.contains("class=\"edition\""));
        assert!(html.contains("<p class=\"tags\"><strong>Tags:</strong> </p>"));
    }

    #[test]
    fn test_render_article_without_url_has_no_link() {
        let html = render_article(&article(r#"{"title": "Offline"}"#), &Options::default());
        assert!(!html.contains("class=\"actions\""));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_render_article_title_credit_heading() {
        let articles = fixture();
        let html = render_article(&articles[1], &Options::default());
        assert!(html.contains("<h2>By Sam Ortiz \u{2018}2026</h2>"));
        assert!(html.contains("<em>By Sam Ortiz \u{2018}2026</em>"));
        assert!(html.contains("<p class=\"pubdate\">January 10, 2024</p>"));
    }

    #[test]
    fn test_render_article_escapes() {
        let html = render_article(
            &article(
                r#"{"title": "A <b> & \"c\"", "url": "https://x.test/?a=1&b=\"2\"", "published": "<soon>"}"#,
            ),
            &Options::default(),
        );
        assert!(html.contains("<h2>A &lt;b&gt; &amp; &quot;c&quot;</h2>"));
        assert!(html.contains(r#"href="https://x.test/?a=1&b=&quot;2&quot;""#));
        assert!(html.contains("<p class=\"pubdate\">&lt;soon&gt;</p>"));
    }

    #[test]
    fn test_render_article_custom_defaults() {
        let options = Options {
            default_image: "img/fallback.png".to_owned(),
            default_caption: "Staff photo".to_owned(),
            render_paragraphs: false,
        };
        let html = render_article(&article(r#"{"title": "t"}"#), &options);
        assert!(html.contains(r#"<img src="img/fallback.png""#));
        assert!(html.contains("<figcaption>Staff photo</figcaption>"));
    }

    #[test]
    fn test_paragraphs_hidden_by_default() {
        let articles = fixture();
        let html = render_article(&articles[0], &Options::default());
        assert!(!html.contains("class=\"body\""));
        assert!(!html.contains("Okafor"));
    }

    #[test]
    fn test_paragraphs_rendered_with_bolded_names() {
        let articles = fixture();
        let options = Options {
            render_paragraphs: true,
            ..Options::default()
        };
        let html = render_article(&articles[0], &options);
        assert!(html.contains(concat!(
            "  <div class=\"body\">\n",
            "    <p><strong>Ana Reyes</strong> and <strong>Mr. Okafor</strong> started the census in January.</p>\n",
            "    <p>Mr. Okafor kept the tide tables; Ana Reyes kept the counts.</p>\n",
            "  </div>\n",
        )));
        assert_eq!(html.matches("<strong>Mr. Okafor</strong>").count(), 1);
    }
}
