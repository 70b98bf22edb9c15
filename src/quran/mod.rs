pub mod api;
pub mod cache;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::QuranClient;
pub use error::QuranError;
pub use models::{ChapterInfo, ChapterListItem, Verse, VerseKey};
