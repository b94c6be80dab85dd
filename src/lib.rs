//! The library code for the `byline` page renderer. It turns a JSON list of
//! articles into the HTML for two pages, and the architecture can be broken
//! down into three steps:
//!
//! 1. Loading the articles from the data file ([`crate::load`])
//! 2. Rendering them into a page fragment, either the date-sorted feed
//!    ([`crate::feed`]) or the edition-grouped archive ([`crate::archive`])
//! 3. Writing each fragment into its container ([`crate::page`]), optionally
//!    wrapped in a page template ([`crate::write`])
//!
//! Each page loads its own copy of the articles. A page whose load fails is
//! still written, with a fixed failure message in place of its content.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]

pub mod archive;
pub mod article;
pub mod bold;
pub mod build;
pub mod config;
pub mod date;
pub mod escape;
pub mod feed;
pub mod load;
pub mod logging;
pub mod page;
pub mod write;
