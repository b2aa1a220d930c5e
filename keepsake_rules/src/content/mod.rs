//! Content store - the ordered sequence of sections shown on the page.

mod fallback;
mod media;

pub use media::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Content published by the server, baked in at build time.
const BUILTIN_TOML: &str = include_str!("anniversary.toml");

/// Errors raised while reading a content document.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("invalid content json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid content toml: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("duplicate section id '{0}'")]
    DuplicateSection(String),

    #[error("content fetch failed: {0}")]
    Fetch(String),
}

/// What a section is, which decides how it renders and how it unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    #[default]
    Plain,
    Gallery,
    Puzzle,
    Cards,
    Video,
    Bottle,
}

/// One ordered content block in the page's narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: SectionKind,

    /// Position in the store; the only ranking used for lock decisions.
    #[serde(default)]
    pub order: u32,

    pub title: String,

    #[serde(rename = "content", default)]
    pub body: String,

    #[serde(default)]
    pub year: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<MediaRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<GalleryPhoto>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub card_photos: Vec<MediaRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_src: Option<MediaRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_duration: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub papers: Vec<Paper>,
}

impl Section {
    /// Create a bare section of the given kind.
    pub fn new(id: impl Into<String>, kind: SectionKind, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            order: 0,
            title: title.into(),
            body: String::new(),
            year: String::new(),
            subtitle: None,
            image: None,
            photos: Vec::new(),
            card_photos: Vec::new(),
            video_src: None,
            video_duration: None,
            papers: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(MediaRef::new(image));
        self
    }

    pub fn with_card_photos<I, S>(mut self, photos: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.card_photos = photos.into_iter().map(MediaRef::new).collect();
        self
    }

    pub fn with_video(mut self, src: impl Into<String>, duration: Option<&str>) -> Self {
        self.video_src = Some(MediaRef::new(src));
        self.video_duration = duration.map(str::to_string);
        self
    }

    pub fn with_papers(mut self, papers: Vec<Paper>) -> Self {
        self.papers = papers;
        self
    }
}

/// The whole page document served at `/api/anniversary-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub title: String,
    pub subtitle: String,
    pub sections: Vec<Section>,
}

impl SiteContent {
    /// Build a document from sections, deriving `order` from position.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        sections: Vec<Section>,
    ) -> Result<Self, ContentError> {
        let mut content = Self {
            title: title.into(),
            subtitle: subtitle.into(),
            sections,
        };
        content.normalize()?;
        Ok(content)
    }

    /// Parse the JSON document returned by the content API.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ContentError> {
        let mut content: SiteContent = serde_json::from_slice(bytes)?;
        content.normalize()?;
        Ok(content)
    }

    /// Parse a TOML content document.
    pub fn from_toml(text: &str) -> Result<Self, ContentError> {
        let mut content: SiteContent = toml::from_str(text)?;
        content.normalize()?;
        Ok(content)
    }

    /// The document the server publishes.
    pub fn builtin() -> Result<Self, ContentError> {
        Self::from_toml(BUILTIN_TOML)
    }

    /// The document the client substitutes when the content API is unreachable.
    pub fn fallback() -> Self {
        fallback::document()
    }

    /// Re-derive `order` from sequence position and reject duplicate ids.
    pub fn normalize(&mut self) -> Result<(), ContentError> {
        let mut seen = HashSet::new();
        for (index, section) in self.sections.iter_mut().enumerate() {
            if !seen.insert(section.id.clone()) {
                return Err(ContentError::DuplicateSection(section.id.clone()));
            }
            section.order = index as u32;
        }
        Ok(())
    }

    /// Get a section by ID.
    pub fn section(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// First section of the given kind.
    pub fn first_of(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn puzzle_section(&self) -> Option<&Section> {
        self.first_of(SectionKind::Puzzle)
    }

    pub fn cards_section(&self) -> Option<&Section> {
        self.first_of(SectionKind::Cards)
    }

    pub fn bottle_section(&self) -> Option<&Section> {
        self.first_of(SectionKind::Bottle)
    }
}
