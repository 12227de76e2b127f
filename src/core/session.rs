//! View state of one chat interaction and the transitions that drive it.
//!
//! A [`Session`] is owned by whoever renders it. Submitting text does not
//! perform I/O itself: [`Session::submit`] hands back an [`ExchangeRequest`]
//! that the caller runs, and [`Session::complete`] folds the outcome back in.

use tracing::{debug, warn};
use unicode_segmentation::UnicodeSegmentation;

use crate::core::constants::FALLBACK_REPLY;
use crate::core::exchange::{ExchangeClient, ExchangeError};
use crate::core::message::Message;
use crate::core::persona::Persona;

/// Exchange the caller must perform after a successful [`Session::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRequest {
    pub instruction_prompt: String,
    pub user_text: String,
}

pub type ExchangeOutcome = Result<String, ExchangeError>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    selected_persona: Option<Persona>,
    messages: Vec<Message>,
    pending_input: String,
    busy: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_persona(&self) -> Option<&Persona> {
        self.selected_persona.as_ref()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Enter chat mode with `persona`, discarding any previous conversation.
    pub fn select_persona(&mut self, persona: Persona) {
        debug!(persona = %persona.id, "persona selected");
        self.selected_persona = Some(persona);
        self.messages.clear();
        self.pending_input.clear();
        self.busy = false;
    }

    /// Start an exchange for `text`.
    ///
    /// Returns `None` without touching state when the text is blank, no
    /// persona is selected, or an exchange is already in flight.
    pub fn submit(&mut self, text: &str) -> Option<ExchangeRequest> {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.busy {
            return None;
        }
        let persona = self.selected_persona.as_ref()?;

        let request = ExchangeRequest {
            instruction_prompt: persona.instruction_prompt.clone(),
            user_text: trimmed.to_string(),
        };
        self.messages.push(Message::user(trimmed));
        self.pending_input.clear();
        self.busy = true;
        Some(request)
    }

    /// Submit whatever is in the input buffer.
    pub fn submit_pending(&mut self) -> Option<ExchangeRequest> {
        let text = self.pending_input.clone();
        self.submit(&text)
    }

    /// Resolve the in-flight exchange with its outcome.
    ///
    /// Returns false when nothing was in flight; the outcome is dropped.
    pub fn complete(&mut self, outcome: ExchangeOutcome) -> bool {
        if !self.busy {
            debug!("dropping exchange outcome with no exchange in flight");
            return false;
        }

        let reply = match outcome {
            Ok(reply) => reply,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "exchange failed");
                FALLBACK_REPLY.to_string()
            }
        };
        self.messages.push(Message::character(reply));
        self.busy = false;
        true
    }

    /// Back to the selection screen with nothing retained.
    pub fn reset(&mut self) {
        self.selected_persona = None;
        self.messages.clear();
        self.pending_input.clear();
        self.busy = false;
    }

    pub fn push_input(&mut self, c: char) {
        if !self.busy {
            self.pending_input.push(c);
        }
    }

    pub fn push_input_str(&mut self, text: &str) {
        if !self.busy {
            self.pending_input.push_str(text);
        }
    }

    /// Remove the last grapheme cluster from the input buffer.
    pub fn pop_input(&mut self) {
        if self.busy {
            return;
        }
        if let Some((index, _)) = self.pending_input.grapheme_indices(true).next_back() {
            self.pending_input.truncate(index);
        }
    }
}

/// Run a full submit → exchange → complete cycle against `client`.
///
/// Returns false if the submission was refused.
pub async fn submit_and_wait<C>(session: &mut Session, client: &C, text: &str) -> bool
where
    C: ExchangeClient + ?Sized,
{
    let Some(request) = session.submit(text) else {
        return false;
    };
    let outcome = client
        .exchange(&request.instruction_prompt, &request.user_text)
        .await;
    session.complete(outcome);
    true
}
