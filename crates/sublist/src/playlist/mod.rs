mod reader;
mod writer;

pub use reader::parse;

/// Announced length of a track whose duration is unknown.
pub const UNKNOWN_LENGTH: i64 = -1;

/// A simple key/value pair, rendered as `key="value"` in the `#EXTINF` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn group_title(value: impl Into<String>) -> Self {
        Self::new("group-title", value)
    }

    /// Characters allowed in a rendered tag name: `[A-Za-z0-9_-]`.
    pub fn is_name_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-' || c == '_'
    }

    /// Tag name as rendered, with every disallowed character replaced by `-`.
    pub fn key(&self) -> String {
        self.name
            .chars()
            .map(|c| if Self::is_name_char(c) { c } else { '-' })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub length: i64,
    pub uri: String,
    pub tags: Vec<Tag>,
}

impl Track {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            length: UNKNOWN_LENGTH,
            uri: uri.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.push(tag);
        self
    }
}

/// Layout of the `#EXTINF` line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtInfStyle {
    /// `#EXTINF:-1, group-title="x", name`, or `#EXTINF:-1, name` without tags
    #[default]
    Comma,
    /// `#EXTINF:-1 group-title="x", name`, or `#EXTINF:-1 , name` without tags
    Spaced,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    pub tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    /// Sorts tracks by name, descending.
    pub fn sort_by_name_desc(&mut self) {
        self.tracks.sort_by(|a, b| b.name.cmp(&a.name));
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }
}
