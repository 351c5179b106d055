//! The widget's three elements (message list, text input, send button) as a
//! trait, plus `ChatPanel`, the in-memory implementation the front-ends draw.

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// One transcript entry. Never edited after it is appended; the loading
/// placeholder is removed and replaced instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    pub is_loading: bool,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
            is_loading: false,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
            is_loading: false,
        }
    }

    pub fn loading(text: impl Into<String>) -> Self {
        Self {
            is_loading: true,
            ..Self::bot(text)
        }
    }

    /// Style classes: `message`, `<sender>-message`, and `loading` when loading.
    pub fn classes(&self) -> Vec<String> {
        let mut classes = vec![
            "message".to_string(),
            format!("{}-message", self.sender.as_str()),
        ];
        if self.is_loading {
            classes.push("loading".to_string());
        }
        classes
    }
}

/// Handle to an appended message, used to remove it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(u64);

/// What the controller needs from a front-end.
pub trait ChatView {
    /// Append a message and bring it into view.
    fn append(&mut self, message: Message) -> MessageId;
    /// Remove a message; unknown ids are ignored.
    fn remove(&mut self, id: MessageId);
    fn input_text(&self) -> String;
    fn clear_input(&mut self);
    fn set_send_enabled(&mut self, enabled: bool);
    fn focus_input(&mut self);
}

/// In-memory chat widget state: transcript, input buffer, send button.
#[derive(Debug, Clone)]
pub struct ChatPanel {
    messages: Vec<(MessageId, Message)>,
    next_id: u64,
    input: String,
    /// Cursor position in chars.
    cursor: usize,
    send_enabled: bool,
    input_focused: bool,
    /// Lines scrolled up from the newest message; 0 follows the latest.
    scroll_from_bottom: u16,
}

impl Default for ChatPanel {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 0,
            input: String::new(),
            cursor: 0,
            send_enabled: true,
            input_focused: true,
            scroll_from_bottom: 0,
        }
    }
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl ChatPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().map(|(_, m)| m)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last().map(|(_, m)| m)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn send_enabled(&self) -> bool {
        self.send_enabled
    }

    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    pub fn blur_input(&mut self) {
        self.input_focused = false;
    }

    pub fn scroll_from_bottom(&self) -> u16 {
        self.scroll_from_bottom
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
    }

    /// Clamp the scroll-back to what the rendered transcript can show.
    pub fn clamp_scroll(&mut self, max: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.min(max);
    }

    /// Replace the input buffer and put the cursor at its end.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.cursor = self.input.chars().count();
    }

    pub fn insert_char(&mut self, c: char) {
        let at = char_to_byte_index(&self.input, self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
    }

    pub fn insert_newline(&mut self) {
        self.insert_char('\n');
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let at = char_to_byte_index(&self.input, self.cursor - 1);
        self.input.remove(at);
        self.cursor -= 1;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }
}

impl ChatView for ChatPanel {
    fn append(&mut self, message: Message) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        self.messages.push((id, message));
        self.scroll_from_bottom = 0;
        id
    }

    fn remove(&mut self, id: MessageId) {
        self.messages.retain(|(mid, _)| *mid != id);
    }

    fn input_text(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    fn set_send_enabled(&mut self, enabled: bool) {
        self.send_enabled = enabled;
    }

    fn focus_input(&mut self) {
        self.input_focused = true;
    }
}
