//! Journey errors and the screen shown for them.

use keepsake_rules::ProgressError;
use serde::Serialize;
use thiserror::Error;

use crate::bottle::BottleError;
use crate::cards::{CardError, RevealRejected};
use crate::quiz::QuizError;

#[derive(Debug, Error)]
pub enum JourneyError {
    #[error("content is hidden until the gate is unlocked")]
    GateLocked,

    #[error("section '{0}' is locked")]
    SectionLocked(String),

    #[error("the quiz is not available")]
    QuizUnavailable,

    #[error("this page has no {0} section")]
    NoSuchSection(&'static str),

    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error(transparent)]
    Quiz(#[from] QuizError),

    #[error(transparent)]
    Cards(#[from] CardError),

    #[error(transparent)]
    Reveal(#[from] RevealRejected),

    #[error(transparent)]
    Bottle(#[from] BottleError),
}

/// Full-screen error replacing the page when a journey cannot continue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorScreen {
    pub heading: &'static str,
    pub message: String,
    pub hint: &'static str,
    pub action: &'static str,
}

impl From<&JourneyError> for ErrorScreen {
    fn from(error: &JourneyError) -> Self {
        Self {
            heading: "Sorry, something went wrong",
            message: error.to_string(),
            hint: "Please refresh the page to try again",
            action: "Refresh Page",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_screen_offers_reload() {
        let screen = ErrorScreen::from(&JourneyError::Cards(CardError::PhotoCount(3)));
        assert_eq!(screen.action, "Refresh Page");
        assert!(screen.message.contains("got 3"));
    }
}
