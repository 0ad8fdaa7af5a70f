//! Feedback ratings for bot responses.

use serde::{Deserialize, Serialize};

/// Thumbs up / thumbs down rating attached to a bot message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackRating {
    Positive,
    Negative,
}

impl FeedbackRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackRating::Positive => "positive",
            FeedbackRating::Negative => "negative",
        }
    }
}
