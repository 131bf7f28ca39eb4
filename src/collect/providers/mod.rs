pub mod demo;
pub mod forum_rss;
