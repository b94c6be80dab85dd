//! Defines the [`Page`] type: the two outputs (feed and archive), the
//! container each one fills, and the load-then-render flow that writes a
//! page's HTML into a sink. A page never fails because its data couldn't be
//! loaded; it renders a fixed failure message instead and logs the cause.

use crate::archive::render_archive;
use crate::article::Article;
use crate::feed::{render_feed, Options};
use crate::load::{load, Source};
use log::error;
use std::fmt;
use std::io;

/// One of the rendered pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    /// Every article, newest first. See [`crate::feed`].
    Feed,

    /// Articles grouped by edition. See [`crate::archive`].
    Archive,
}

/// The HTML produced for a page, along with whether the data loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    pub page: Page,
    pub html: String,
    pub loaded: bool,
}

impl Page {
    /// All pages, in build order.
    pub const ALL: [Page; 2] = [Page::Feed, Page::Archive];

    /// The id of the element the page's HTML belongs in.
    pub fn container(self) -> &'static str {
        match self {
            Page::Feed => "articles",
            Page::Archive => "archives",
        }
    }

    /// The markup shown in place of the page when its data can't be loaded.
    pub fn failure_message(self) -> &'static str {
        match self {
            Page::Feed => "<p>Failed to load articles.</p>",
            Page::Archive => "<p>Failed to load archives.</p>",
        }
    }

    /// Renders already-loaded articles.
    pub fn render_articles(self, articles: &[Article], options: &Options) -> String {
        match self {
            Page::Feed => render_feed(articles, options),
            Page::Archive => render_archive(articles),
        }
    }

    /// Loads a fresh copy of the articles from `source` and renders them. If
    /// loading fails, the error is logged and the fragment holds only
    /// [`Page::failure_message`].
    pub fn fragment(self, source: &Source, options: &Options) -> Fragment {
        match load(source) {
            Ok(articles) => Fragment {
                page: self,
                html: self.render_articles(&articles, options),
                loaded: true,
            },
            Err(err) => {
                error!("rendering {} page: {}", self, err);
                Fragment {
                    page: self,
                    html: self.failure_message().to_owned(),
                    loaded: false,
                }
            }
        }
    }

    /// Like [`Page::fragment`], but writes the HTML into `sink`. Only errors
    /// writing to the sink are returned.
    pub fn render<W: io::Write>(self, source: &Source, options: &Options, sink: &mut W) -> io::Result<()> {
        sink.write_all(self.fragment(source, options).html.as_bytes())
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Page::Feed => "feed",
            Page::Archive => "archive",
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::PathBuf;

    fn render(page: Page, path: &str) -> String {
        let mut sink: Vec<u8> = Vec::new();
        page.render(&Source::Path(PathBuf::from(path)), &Options::default(), &mut sink)
            .unwrap();
        String::from_utf8(sink).unwrap()
    }

    #[test]
    fn test_feed_page() {
        let html = render(Page::Feed, "./testdata/articles.json");
        assert_eq!(html.matches("<article>").count(), 4);
        assert!(html.find("January 10, 2024").unwrap() < html.find("May 1, 2023").unwrap());
    }

    #[test]
    fn test_archive_page() {
        let html = render(Page::Archive, "./testdata/articles.json");
        assert_eq!(html.matches("<section>").count(), 3);
    }

    #[test]
    fn test_missing_source_renders_failure_message_only() {
        assert_eq!(
            render(Page::Feed, "./testdata/missing.json"),
            "<p>Failed to load articles.</p>"
        );
        assert_eq!(
            render(Page::Archive, "./testdata/missing.json"),
            "<p>Failed to load archives.</p>"
        );
    }

    #[test]
    fn test_malformed_source_renders_failure_message_only() {
        assert_eq!(
            render(Page::Feed, "./testdata/malformed.json"),
            "<p>Failed to load articles.</p>"
        );
    }

    #[test]
    fn test_fragment_reports_load_status() {
        let options = Options::default();
        let ok = Page::Archive.fragment(&Source::Path(PathBuf::from("./testdata/articles.json")), &options);
        assert!(ok.loaded);
        let failed = Page::Archive.fragment(&Source::Path(PathBuf::from("./testdata/missing.json")), &options);
        assert!(!failed.loaded);
        assert_eq!(failed.page.container(), "archives");
    }

    #[test]
    fn test_unreachable_url_renders_failure_message_only() {
        // Bind and release a port so nothing is listening on it.
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let url = url::Url::parse(&format!("http://{}/articles.json", addr)).unwrap();
        let mut sink: Vec<u8> = Vec::new();
        Page::Feed
            .render(&Source::Url(url), &Options::default(), &mut sink)
            .unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "<p>Failed to load articles.</p>");
    }
}
