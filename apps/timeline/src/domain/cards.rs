//! Card type and the ordering abstraction the rules are written against.

use serde::{Deserialize, Serialize};

/// Position of a team in the session's team list.
pub type TeamId = usize;

/// Anything with a totally ordered key a timeline can be sorted by.
///
/// The placement rule and timeline helpers only ever look at cards through
/// this trait, so the key can be a release year, a distance or a weight.
pub trait Ordered {
    type Key: Ord + Copy;

    fn ordering_key(&self) -> Self::Key;
}

/// One orderable unit of game content.
///
/// The field names follow the wire contract shared with the UI:
/// `{ id, title, artist, year, previewUrl? }`. `year` is the ordering key for
/// the song deck; other categories store their magnitude there.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub title: String,
    /// Secondary display label (attribution).
    pub artist: String,
    pub year: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_url: Option<String>,
}

impl Card {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        year: i64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            year,
            preview_url: None,
        }
    }

    pub fn with_preview_url(mut self, url: impl Into<String>) -> Self {
        self.preview_url = Some(url.into());
        self
    }
}

impl Ordered for Card {
    type Key = i64;

    fn ordering_key(&self) -> i64 {
        self.year
    }
}

impl Ordered for i64 {
    type Key = i64;

    fn ordering_key(&self) -> i64 {
        *self
    }
}
