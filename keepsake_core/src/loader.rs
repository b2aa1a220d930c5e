//! Content loading with fallback substitution.

use keepsake_rules::{ContentError, SiteContent};
use tracing::warn;

/// Somewhere the page content can be fetched from.
pub trait ContentSource {
    fn fetch(&self) -> Result<SiteContent, ContentError>;
}

/// Raw body of a content API response.
#[derive(Debug, Clone)]
pub struct JsonSource {
    body: Vec<u8>,
}

impl JsonSource {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self { body: body.into() }
    }
}

impl ContentSource for JsonSource {
    fn fetch(&self) -> Result<SiteContent, ContentError> {
        SiteContent::from_json(&self.body)
    }
}

/// A source that always fails, standing in for an unreachable API.
#[derive(Debug, Clone)]
pub struct Unreachable(pub String);

impl ContentSource for Unreachable {
    fn fetch(&self) -> Result<SiteContent, ContentError> {
        Err(ContentError::Fetch(self.0.clone()))
    }
}

/// Fetch content, substituting [`SiteContent::fallback`] on any failure.
pub fn load_or_fallback<S: ContentSource + ?Sized>(source: &S) -> SiteContent {
    match source.fetch() {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "content fetch failed, using fallback content");
            SiteContent::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_source() {
        let body = serde_json::to_vec(&SiteContent::builtin().unwrap()).unwrap();
        let content = load_or_fallback(&JsonSource::new(body));
        assert_eq!(content.sections.len(), 7);
    }

    #[test]
    fn test_bad_json_falls_back() {
        let content = load_or_fallback(&JsonSource::new("<html>502</html>"));
        assert_eq!(content, SiteContent::fallback());
    }

    #[test]
    fn test_unreachable_falls_back() {
        let content = load_or_fallback(&Unreachable("connection refused".into()));
        assert_eq!(content.title, SiteContent::fallback().title);
    }
}
