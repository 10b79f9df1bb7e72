pub mod collector;
pub mod html;

pub use collector::{FeedEntry, FeedSource, NewsCollector, RssFeedSource};
pub use html::clean_html;

pub mod prelude {
    pub use super::collector::{FeedSource, NewsCollector};
    pub use nr_core::{Article, Error, Result};
}
