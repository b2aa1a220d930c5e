//! Access gate - the 4-digit code shown before any content.
//!
//! Two input surfaces share one `Locked -> Unlocked` state machine: four PIN
//! boxes filled digit by digit, and four rotary dials that unlock as soon as
//! they line up. Retries are unlimited and there is no lockout.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// The code that opens the page (DDMM).
pub const DEFAULT_CODE: &str = "2110";

const CODE_LEN: usize = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("gate code must be exactly 4 digits, got '{0}'")]
    InvalidCode(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GateState {
    #[default]
    Locked,
    /// Terminal.
    Unlocked,
}

/// Result of one piece of gate input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Input accepted, code not complete yet.
    Pending,
    Unlocked,
    /// Full code entered and wrong; the PIN entry has been cleared.
    Rejected,
    /// Input not accepted (gate already open, bad digit, bad dial).
    Ignored,
}

/// Feedback line under the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateMessage {
    Success,
    Incorrect,
}

impl GateMessage {
    pub fn text(&self) -> &'static str {
        match self {
            GateMessage::Success => "✓ Perfect! You still remember",
            GateMessage::Incorrect => "✗ Incorrect PIN. Try again!",
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            GateMessage::Success => None,
            GateMessage::Incorrect => Some("💡 Hint: DDMM format"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Gate {
    secret: [u8; CODE_LEN],
    entry: Vec<u8>,
    dials: [u8; CODE_LEN],
    state: GateState,
    failed_attempts: u32,
    message: Option<GateMessage>,
}

impl Default for Gate {
    fn default() -> Self {
        Self::with_secret([2, 1, 1, 0])
    }
}

impl Gate {
    /// Gate guarded by [`DEFAULT_CODE`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate guarded by a custom 4-digit code.
    pub fn with_code(code: &str) -> Result<Self, GateError> {
        let digits = parse_digits(code).ok_or_else(|| GateError::InvalidCode(code.to_string()))?;
        Ok(Self::with_secret(digits))
    }

    fn with_secret(secret: [u8; CODE_LEN]) -> Self {
        Self {
            secret,
            entry: Vec::with_capacity(CODE_LEN),
            dials: [0; CODE_LEN],
            state: GateState::Locked,
            failed_attempts: 0,
            message: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == GateState::Unlocked
    }

    pub fn message(&self) -> Option<GateMessage> {
        self.message
    }

    pub fn failed_attempts(&self) -> u32 {
        self.failed_attempts
    }

    /// Digits typed so far into the PIN boxes.
    pub fn entry(&self) -> &[u8] {
        &self.entry
    }

    /// Index of the PIN box that should hold focus.
    pub fn focus_index(&self) -> usize {
        self.entry.len().min(CODE_LEN - 1)
    }

    /// Type one character into the next PIN box.
    pub fn press_digit(&mut self, c: char) -> GateOutcome {
        if self.is_unlocked() {
            return GateOutcome::Ignored;
        }
        let Some(digit) = c.to_digit(10) else {
            return GateOutcome::Ignored;
        };

        self.entry.push(digit as u8);
        if self.entry.len() == CODE_LEN {
            self.check_entry()
        } else {
            GateOutcome::Pending
        }
    }

    /// Clear the last filled PIN box.
    pub fn backspace(&mut self) -> GateOutcome {
        if self.is_unlocked() || self.entry.pop().is_none() {
            return GateOutcome::Ignored;
        }
        GateOutcome::Pending
    }

    /// Paste text into the PIN boxes: digits are kept, the first four fill the boxes.
    pub fn paste(&mut self, text: &str) -> GateOutcome {
        if self.is_unlocked() {
            return GateOutcome::Ignored;
        }

        self.entry = text
            .chars()
            .filter_map(|c| c.to_digit(10))
            .take(CODE_LEN)
            .map(|d| d as u8)
            .collect();

        if self.entry.len() == CODE_LEN {
            self.check_entry()
        } else {
            GateOutcome::Pending
        }
    }

    /// Turn dial `index` one notch (9 wraps to 0); unlocks when the dials match.
    pub fn rotate_dial(&mut self, index: usize) -> GateOutcome {
        if self.is_unlocked() || index >= CODE_LEN {
            return GateOutcome::Ignored;
        }

        self.dials[index] = (self.dials[index] + 1) % 10;
        debug!(dial = index, value = self.dials[index], "dial rotated");

        if self.dials == self.secret {
            self.unlock();
            GateOutcome::Unlocked
        } else {
            GateOutcome::Pending
        }
    }

    /// Explicitly check the dials. A wrong combination leaves the dials as they are.
    pub fn try_dials(&mut self) -> GateOutcome {
        if self.is_unlocked() {
            return GateOutcome::Ignored;
        }
        if self.dials == self.secret {
            self.unlock();
            GateOutcome::Unlocked
        } else {
            self.failed_attempts += 1;
            self.message = Some(GateMessage::Incorrect);
            GateOutcome::Rejected
        }
    }

    /// Current dial combination, e.g. `"2100"`.
    pub fn dial_display(&self) -> String {
        self.dials.iter().map(|d| char::from(b'0' + d)).collect()
    }

    fn check_entry(&mut self) -> GateOutcome {
        if self.entry[..] == self.secret[..] {
            self.unlock();
            GateOutcome::Unlocked
        } else {
            self.failed_attempts += 1;
            self.entry.clear();
            self.message = Some(GateMessage::Incorrect);
            debug!(attempts = self.failed_attempts, "gate code rejected");
            GateOutcome::Rejected
        }
    }

    fn unlock(&mut self) {
        self.state = GateState::Unlocked;
        self.message = Some(GateMessage::Success);
        info!("gate unlocked");
    }
}

fn parse_digits(code: &str) -> Option<[u8; CODE_LEN]> {
    if code.chars().count() != CODE_LEN {
        return None;
    }
    let mut digits = [0; CODE_LEN];
    for (slot, c) in digits.iter_mut().zip(code.chars()) {
        *slot = c.to_digit(10)? as u8;
    }
    Some(digits)
}
