//! Quiz gate - two questions about the puzzle photo.
//!
//! Both answers must be right in the same submission. A pass hides the panel
//! after [`DISMISS_DELAY_MS`]; anything else leaves it open for another try.

use keepsake_rules::{SessionTime, Timeline};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Delay between a passing submission and the panel closing.
pub const DISMISS_DELAY_MS: u64 = 3000;

/// Days offered by the day selector.
pub const DAY_OPTIONS: std::ops::RangeInclusive<u8> = 1..=31;

/// Years offered by the year selector.
pub const YEAR_OPTIONS: std::ops::RangeInclusive<u16> = 2023..=2026;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("the quiz panel is not open")]
    NotOpen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Look a month up by its selector value.
    pub fn from_name(name: &str) -> Option<Month> {
        Month::ALL.into_iter().find(|m| m.name() == name)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// What the visitor entered. Unselected date parts are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer {
    pub place: String,
    pub day: Option<u8>,
    pub month: Option<Month>,
    pub year: Option<u16>,
}

impl QuizAnswer {
    pub fn new(place: impl Into<String>) -> Self {
        Self {
            place: place.into(),
            ..Default::default()
        }
    }

    pub fn with_date(mut self, day: u8, month: Month, year: u16) -> Self {
        self.day = Some(day);
        self.month = Some(month);
        self.year = Some(year);
        self
    }
}

/// The expected answers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizKey {
    pub place: String,
    pub day: u8,
    pub month: Month,
    pub year: u16,
}

impl Default for QuizKey {
    fn default() -> Self {
        Self {
            place: "Dog Ministry".to_string(),
            day: 22,
            month: Month::January,
            year: 2024,
        }
    }
}

impl QuizKey {
    /// Check both sub-answers independently.
    ///
    /// A day or year the selectors do not offer counts as not selected.
    pub fn evaluate(&self, answer: &QuizAnswer) -> QuizReport {
        let place = if answer.place.trim().to_lowercase() == self.place.to_lowercase() {
            FieldFeedback::Correct
        } else {
            FieldFeedback::Incorrect
        };

        let day = answer.day.filter(|d| DAY_OPTIONS.contains(d));
        let year = answer.year.filter(|y| YEAR_OPTIONS.contains(y));

        let date = match (day, answer.month, year) {
            (Some(day), Some(month), Some(year)) => {
                if (day, month, year) == (self.day, self.month, self.year) {
                    FieldFeedback::Correct
                } else {
                    FieldFeedback::Incorrect
                }
            }
            _ => FieldFeedback::Incomplete,
        };

        QuizReport { place, date }
    }
}

/// Per-field result of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldFeedback {
    Correct,
    Incorrect,
    /// At least one date selector left empty.
    Incomplete,
}

impl FieldFeedback {
    pub fn is_correct(&self) -> bool {
        *self == FieldFeedback::Correct
    }

    /// Message shown under the field; none when correct.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            FieldFeedback::Correct => None,
            FieldFeedback::Incorrect => Some("❌ Try again!"),
            FieldFeedback::Incomplete => Some("⚠️ Please select day, month, and year!"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizReport {
    pub place: FieldFeedback,
    pub date: FieldFeedback,
}

impl QuizReport {
    pub fn passed(&self) -> bool {
        self.place.is_correct() && self.date.is_correct()
    }

    /// Overall result line, shown only on a pass.
    pub fn result_message(&self) -> Option<&'static str> {
        self.passed()
            .then_some("🎉 Perfect! You got both answers right!")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QuizPhase {
    #[default]
    Hidden,
    Open,
    /// Answered correctly; waiting to close.
    Passed,
    Dismissed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuizAction {
    Dismiss,
}

/// The quiz panel beneath the puzzle.
#[derive(Debug, Clone)]
pub struct QuizPanel {
    key: QuizKey,
    phase: QuizPhase,
    attempts: u32,
    timeline: Timeline<QuizAction>,
}

impl Default for QuizPanel {
    fn default() -> Self {
        Self::new(QuizKey::default())
    }
}

impl QuizPanel {
    pub fn new(key: QuizKey) -> Self {
        Self {
            key,
            phase: QuizPhase::Hidden,
            attempts: 0,
            timeline: Timeline::new(),
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Show the panel. Returns false if it has already been passed.
    pub fn open(&mut self) -> bool {
        match self.phase {
            QuizPhase::Hidden | QuizPhase::Open => {
                self.phase = QuizPhase::Open;
                true
            }
            QuizPhase::Passed | QuizPhase::Dismissed => false,
        }
    }

    /// Grade a submission. Resubmission is unlimited while the panel is open.
    pub fn submit(&mut self, answer: &QuizAnswer, now: SessionTime) -> Result<QuizReport, QuizError> {
        if self.phase != QuizPhase::Open {
            return Err(QuizError::NotOpen);
        }

        self.attempts += 1;
        let report = self.key.evaluate(answer);
        debug!(attempt = self.attempts, ?report, "quiz submitted");

        if report.passed() {
            self.phase = QuizPhase::Passed;
            self.timeline
                .schedule(now.plus(DISMISS_DELAY_MS), 0, QuizAction::Dismiss);
        }
        Ok(report)
    }

    /// Take back a pass that could not be recorded: the panel is open again
    /// and its pending dismissal is dropped. Returns false unless `Passed`.
    pub fn reopen(&mut self) -> bool {
        if self.phase != QuizPhase::Passed {
            return false;
        }
        self.timeline.cancel_all();
        self.phase = QuizPhase::Open;
        true
    }

    /// Fire due actions. Returns true if the panel closed during this call.
    pub fn advance(&mut self, now: SessionTime) -> bool {
        let mut dismissed = false;
        while let Some((_, action)) = self.timeline.pop_due(now, 0) {
            match action {
                QuizAction::Dismiss => {
                    self.phase = QuizPhase::Dismissed;
                    dismissed = true;
                }
            }
        }
        dismissed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn right_answer() -> QuizAnswer {
        QuizAnswer::new("Dog Ministry").with_date(22, Month::January, 2024)
    }

    fn open_panel() -> QuizPanel {
        let mut panel = QuizPanel::default();
        assert!(panel.open());
        panel
    }

    #[test]
    fn test_both_correct_passes() {
        let report = QuizKey::default().evaluate(&right_answer());
        assert!(report.passed());
        assert_eq!(report.result_message(), Some("🎉 Perfect! You got both answers right!"));
    }

    #[test]
    fn test_place_is_case_insensitive_and_trimmed() {
        let answer = QuizAnswer::new("  dOG ministry ").with_date(22, Month::January, 2024);
        assert!(QuizKey::default().evaluate(&answer).passed());

        let near_miss = QuizAnswer::new("Dog Ministries").with_date(22, Month::January, 2024);
        let report = QuizKey::default().evaluate(&near_miss);
        assert_eq!(report.place, FieldFeedback::Incorrect);
        assert_eq!(report.date, FieldFeedback::Correct);
        assert!(!report.passed());
    }

    #[test]
    fn test_wrong_date_fails() {
        let answer = QuizAnswer::new("Dog Ministry").with_date(21, Month::January, 2024);
        let report = QuizKey::default().evaluate(&answer);
        assert_eq!(report.date, FieldFeedback::Incorrect);
        assert_eq!(report.date.message(), Some("❌ Try again!"));
        assert!(!report.passed());
    }

    #[test]
    fn test_missing_date_part_is_incomplete() {
        let mut answer = right_answer();
        answer.year = None;
        let report = QuizKey::default().evaluate(&answer);
        assert_eq!(report.date, FieldFeedback::Incomplete);
        assert_eq!(report.place, FieldFeedback::Correct);
        assert!(!report.passed());
    }

    #[test]
    fn test_values_outside_selectors_are_incomplete() {
        let key = QuizKey::default();
        for answer in [
            QuizAnswer::new("Dog Ministry").with_date(22, Month::January, 2022),
            QuizAnswer::new("Dog Ministry").with_date(22, Month::January, 2027),
            QuizAnswer::new("Dog Ministry").with_date(0, Month::January, 2024),
            QuizAnswer::new("Dog Ministry").with_date(32, Month::January, 2024),
        ] {
            assert_eq!(key.evaluate(&answer).date, FieldFeedback::Incomplete);
        }

        let edge = QuizAnswer::new("Dog Ministry").with_date(31, Month::December, 2026);
        assert_eq!(key.evaluate(&edge).date, FieldFeedback::Incorrect);
    }

    #[test]
    fn test_submit_requires_open_panel() {
        let mut panel = QuizPanel::default();
        assert_eq!(
            panel.submit(&right_answer(), SessionTime(0)),
            Err(QuizError::NotOpen)
        );
    }

    #[test]
    fn test_partial_answer_keeps_panel_open() {
        let mut panel = open_panel();
        let report = panel
            .submit(&QuizAnswer::new("Dog Ministry"), SessionTime(0))
            .unwrap();
        assert!(!report.passed());
        assert_eq!(panel.phase(), QuizPhase::Open);

        let report = panel.submit(&right_answer(), SessionTime(100)).unwrap();
        assert!(report.passed());
        assert_eq!(panel.attempts(), 2);
    }

    #[test]
    fn test_pass_dismisses_after_delay() {
        let mut panel = open_panel();
        panel.submit(&right_answer(), SessionTime(1_000)).unwrap();
        assert_eq!(panel.phase(), QuizPhase::Passed);

        assert!(!panel.advance(SessionTime(3_999)));
        assert_eq!(panel.phase(), QuizPhase::Passed);

        assert!(panel.advance(SessionTime(4_000)));
        assert_eq!(panel.phase(), QuizPhase::Dismissed);
        assert!(!panel.open());
    }

    #[test]
    fn test_reopen_cancels_dismissal() {
        let mut panel = open_panel();
        assert!(!panel.reopen());

        panel.submit(&right_answer(), SessionTime(0)).unwrap();
        assert!(panel.reopen());
        assert_eq!(panel.phase(), QuizPhase::Open);

        assert!(!panel.advance(SessionTime(10_000)));
        assert_eq!(panel.phase(), QuizPhase::Open);
        assert!(panel.submit(&right_answer(), SessionTime(10_000)).unwrap().passed());
    }

    #[test]
    fn test_month_names() {
        assert_eq!(Month::from_name("January"), Some(Month::January));
        assert_eq!(Month::from_name("january"), None);
        assert_eq!(Month::December.to_string(), "December");
    }
}
