//! Chat widget controller: reads the input, renders the provisional state,
//! asks the Answer Service, and reconciles the transcript from the outcome.
//!
//! Two states only. `Idle → Sending` on a non-empty submit, `Sending → Idle`
//! when the call settles either way. The send control is disabled exactly
//! while `Sending`, so at most one request is ever in flight.

use crate::client::{Answer, AnswerService, ClientError};
use crate::view::{ChatView, Message, MessageId};

/// Placeholder shown while waiting for the reply.
pub const LOADING_TEXT: &str = "Digitando...";

/// Prefix of every rendered error.
pub const ERROR_PREFIX: &str = "Erro: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Idle,
    Sending { loading: MessageId },
}

/// Controller over a [`ChatView`].
#[derive(Debug)]
pub struct ChatWidget<V> {
    view: V,
    state: WidgetState,
}

impl<V: ChatView> ChatWidget<V> {
    pub fn new(view: V) -> Self {
        Self {
            view,
            state: WidgetState::Idle,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.state, WidgetState::Sending { .. })
    }

    /// Append `message` to the list, scrolled into view.
    pub fn render(&mut self, message: Message) -> MessageId {
        self.view.append(message)
    }

    /// First half of a submit: take the trimmed input, echo it, clear the
    /// input, disable send and show the loading placeholder.
    ///
    /// Returns the question to send, or `None` when the input is blank or a
    /// request is already in flight (nothing is touched in either case).
    pub fn begin(&mut self) -> Option<String> {
        if self.is_sending() {
            return None;
        }
        let question = self.view.input_text().trim().to_string();
        if question.is_empty() {
            return None;
        }

        self.render(Message::user(question.as_str()));
        self.view.clear_input();
        self.view.set_send_enabled(false);
        let loading = self.render(Message::loading(LOADING_TEXT));
        self.state = WidgetState::Sending { loading };
        tracing::debug!(%question, "question submitted");
        Some(question)
    }

    /// Second half of a submit: swap the placeholder for the answer or the
    /// error, re-enable send and refocus the input. A no-op when idle.
    pub fn settle(&mut self, outcome: Result<Answer, ClientError>) {
        let WidgetState::Sending { loading } = self.state else {
            return;
        };
        self.view.remove(loading);

        match outcome {
            Ok(answer) => {
                self.render(Message::bot(answer.text));
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch answer");
                self.render(Message::bot(format!("{}{}", ERROR_PREFIX, e)));
            }
        }

        self.view.set_send_enabled(true);
        self.view.focus_input();
        self.state = WidgetState::Idle;
    }

    /// Full submit: [`begin`](Self::begin), one call to `service`, then
    /// [`settle`](Self::settle). Returns the question that was sent, if any.
    pub async fn submit<S: AnswerService>(&mut self, service: &S) -> Option<String> {
        let question = self.begin()?;
        let outcome = service.ask(&question).await;
        self.settle(outcome);
        Some(question)
    }
}
