use chat_widget_client::{Answer, AnswerClient, ChatPanel, ChatView, ChatWidget, ClientError};
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;

use crate::tui::AppEvent;

/// Which element has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    SendButton,
}

pub struct App {
    pub widget: ChatWidget<ChatPanel>,
    pub client: AnswerClient,
    pub should_quit: bool,
    /// Send button position from the last draw, for mouse hit-testing.
    pub send_button_area: Option<Rect>,
    /// Inner height of the message list from the last draw.
    pub chat_height: u16,
}

impl App {
    pub fn new(client: AnswerClient) -> Self {
        Self {
            widget: ChatWidget::new(ChatPanel::new()),
            client,
            should_quit: false,
            send_button_area: None,
            chat_height: 0,
        }
    }

    pub fn panel(&self) -> &ChatPanel {
        self.widget.view()
    }

    pub fn panel_mut(&mut self) -> &mut ChatPanel {
        self.widget.view_mut()
    }

    pub fn focus(&self) -> Focus {
        if self.panel().input_focused() {
            Focus::Input
        } else {
            Focus::SendButton
        }
    }

    pub fn toggle_focus(&mut self) {
        match self.focus() {
            Focus::Input => self.panel_mut().blur_input(),
            Focus::SendButton => self.panel_mut().focus_input(),
        }
    }

    /// Start a submit. The request runs on its own task and its outcome comes
    /// back through `tx` as [`AppEvent::Answer`]. Returns false when nothing
    /// was sent (blank input or a request already in flight).
    pub fn submit(&mut self, tx: &UnboundedSender<AppEvent>) -> bool {
        let Some(question) = self.widget.begin() else {
            return false;
        };
        let client = self.client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = client.ask(&question).await;
            // The receiver is gone only when the app is shutting down.
            let _ = tx.send(AppEvent::Answer(outcome));
        });
        true
    }

    pub fn settle(&mut self, outcome: Result<Answer, ClientError>) {
        self.widget.settle(outcome);
    }

    /// Rows moved by PageUp/PageDown: one screen of the message list.
    pub fn page_size(&self) -> u16 {
        self.chat_height.max(1)
    }

    /// Whether `(column, row)` falls on the send button.
    pub fn hits_send_button(&self, column: u16, row: u16) -> bool {
        self.send_button_area.is_some_and(|r| {
            column >= r.x && column < r.x + r.width && row >= r.y && row < r.y + r.height
        })
    }
}
