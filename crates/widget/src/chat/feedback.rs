//! Thumbs-up/down feedback on bot messages.
//!
//! Two-phase flow: thumbs up submits immediately with no comment; thumbs
//! down expands a comment box whose submission is gated on non-empty text.
//! Cancel from the expanded state reverts to the unselected initial phase.

use contracts::FeedbackRating;
use leptos::prelude::*;

use crate::shared::icons::icon;

/// Where the feedback flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackPhase {
    /// Initial thumbs up/down choice.
    Choosing,
    /// Negative rating chosen; comment box open.
    Commenting,
    /// Feedback sent; nothing more to do.
    Submitted,
}

/// A completed rating ready to forward to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackSubmission {
    pub rating: FeedbackRating,
    pub comment: Option<String>,
}

/// Per-message feedback state machine. Pure so the transitions are
/// host-testable; the component wraps it in a signal.
#[derive(Debug, Clone, Default)]
pub struct FeedbackState {
    rating: Option<FeedbackRating>,
    comment: String,
    expanded: bool,
    submitted: bool,
}

impl FeedbackState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FeedbackPhase {
        if self.submitted {
            FeedbackPhase::Submitted
        } else if self.expanded {
            FeedbackPhase::Commenting
        } else {
            FeedbackPhase::Choosing
        }
    }

    pub fn rating(&self) -> Option<FeedbackRating> {
        self.rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Pick a rating. Positive submits immediately; negative opens the
    /// comment box and returns nothing yet.
    pub fn rate(&mut self, rating: FeedbackRating) -> Option<FeedbackSubmission> {
        self.rating = Some(rating);
        match rating {
            FeedbackRating::Positive => {
                self.submitted = true;
                Some(FeedbackSubmission {
                    rating,
                    comment: None,
                })
            }
            FeedbackRating::Negative => {
                self.expanded = true;
                None
            }
        }
    }

    pub fn set_comment(&mut self, text: String) {
        self.comment = text;
    }

    pub fn can_submit_comment(&self) -> bool {
        !self.comment.trim().is_empty()
    }

    /// Submit the expanded comment. Gated on a chosen rating and non-empty
    /// comment text.
    pub fn submit_comment(&mut self) -> Option<FeedbackSubmission> {
        let rating = self.rating?;
        if !self.can_submit_comment() {
            return None;
        }
        self.submitted = true;
        self.expanded = false;
        Some(FeedbackSubmission {
            rating,
            comment: Some(self.comment.clone()),
        })
    }

    /// Close the comment box. A negative rating is forgotten so the
    /// initial phase comes back unselected.
    pub fn cancel(&mut self) {
        self.expanded = false;
        if self.rating == Some(FeedbackRating::Negative) {
            self.rating = None;
        }
    }
}

/// Feedback widget rendered under each bot message when enabled.
#[component]
#[allow(non_snake_case)]
pub fn ChatFeedback(
    /// Id of the rated bot message
    message_id: String,
    /// Feedback sink: (message id, rating, optional comment)
    on_feedback_submit: Callback<(String, FeedbackRating, Option<String>)>,
    /// Submit button background override
    #[prop(optional_no_strip)]
    widget_color: Option<String>,
) -> impl IntoView {
    let state = RwSignal::new(FeedbackState::new());

    let submit_style = format!(
        "background-color: {};",
        widget_color.as_deref().unwrap_or("#4f46e5"),
    );

    // Callbacks to avoid move issues with the shared message id.
    let forward = Callback::new(move |submission: FeedbackSubmission| {
        on_feedback_submit.run((message_id.clone(), submission.rating, submission.comment));
    });

    let handle_rate = Callback::new(move |rating: FeedbackRating| {
        let mut submission = None;
        state.update(|s| submission = s.rate(rating));
        if let Some(submission) = submission {
            forward.run(submission);
        }
    });

    let handle_submit = Callback::new(move |()| {
        let mut submission = None;
        state.update(|s| submission = s.submit_comment());
        if let Some(submission) = submission {
            forward.run(submission);
        }
    });

    let rating_class = move |rating: FeedbackRating| {
        if state.with(|s| s.rating()) == Some(rating) {
            "chat-feedback__rating chat-feedback__rating--selected"
        } else {
            "chat-feedback__rating"
        }
    };

    view! {
        <div class="chat-feedback">
            {move || match state.with(|s| s.phase()) {
                FeedbackPhase::Choosing => view! {
                    <div class="chat-feedback__buttons">
                        <span class="chat-feedback__label">"Was this helpful?"</span>
                        <button
                            class=move || rating_class(FeedbackRating::Positive)
                            aria-label="Thumbs up"
                            on:click=move |_| handle_rate.run(FeedbackRating::Positive)
                        >
                            {icon("thumbs-up")}
                        </button>
                        <button
                            class=move || rating_class(FeedbackRating::Negative)
                            aria-label="Thumbs down"
                            on:click=move |_| handle_rate.run(FeedbackRating::Negative)
                        >
                            {icon("thumbs-down")}
                        </button>
                    </div>
                }
                .into_any(),
                FeedbackPhase::Commenting => view! {
                    <div class="chat-feedback__form">
                        <textarea
                            placeholder="How can we improve this response?"
                            rows=3
                            autofocus=true
                            prop:value=move || state.with(|s| s.comment().to_string())
                            on:input=move |ev| {
                                state.update(|s| s.set_comment(event_target_value(&ev)))
                            }
                        ></textarea>
                        <div class="chat-feedback__actions">
                            <button
                                class="chat-feedback__cancel"
                                on:click=move |_| state.update(|s| s.cancel())
                            >
                                "Cancel"
                            </button>
                            <button
                                class="chat-feedback__submit"
                                style=submit_style.clone()
                                disabled=move || !state.with(|s| s.can_submit_comment())
                                on:click=move |_| handle_submit.run(())
                            >
                                "Submit Feedback"
                            </button>
                        </div>
                    </div>
                }
                .into_any(),
                FeedbackPhase::Submitted => view! {
                    <div class="chat-feedback__thanks">"Thanks for your feedback!"</div>
                }
                .into_any(),
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbs_up_submits_immediately() {
        let mut state = FeedbackState::new();
        let submission = state.rate(FeedbackRating::Positive).unwrap();
        assert_eq!(submission.rating, FeedbackRating::Positive);
        assert_eq!(submission.comment, None);
        assert_eq!(state.phase(), FeedbackPhase::Submitted);
    }

    #[test]
    fn test_thumbs_down_opens_comment_box() {
        let mut state = FeedbackState::new();
        assert!(state.rate(FeedbackRating::Negative).is_none());
        assert_eq!(state.phase(), FeedbackPhase::Commenting);
    }

    #[test]
    fn test_comment_submission_gated_on_non_empty_text() {
        let mut state = FeedbackState::new();
        state.rate(FeedbackRating::Negative);
        state.set_comment("   ".to_string());
        assert!(!state.can_submit_comment());
        assert!(state.submit_comment().is_none());
        assert_eq!(state.phase(), FeedbackPhase::Commenting);

        state.set_comment("Too vague".to_string());
        let submission = state.submit_comment().unwrap();
        assert_eq!(submission.rating, FeedbackRating::Negative);
        assert_eq!(submission.comment.as_deref(), Some("Too vague"));
        assert_eq!(state.phase(), FeedbackPhase::Submitted);
    }

    #[test]
    fn test_cancel_reverts_to_unselected() {
        let mut state = FeedbackState::new();
        state.rate(FeedbackRating::Negative);
        state.cancel();
        assert_eq!(state.phase(), FeedbackPhase::Choosing);
        assert_eq!(state.rating(), None);
    }
}
