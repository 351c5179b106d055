//! Chat widget client library (config, Answer Service wire types, HTTP client,
//! view model and controller). Used by the terminal widget and `chat-ask`.

pub mod client;
pub mod config;
pub mod messages;
pub mod view;
pub mod widget;

pub use client::{Answer, AnswerClient, AnswerService, ClientError, API_ERROR_FALLBACK};
pub use config::{default_config_path, ApiSection, Config, ConfigError, DEFAULT_API_URL};
pub use view::{ChatPanel, ChatView, Message, MessageId, Sender};
pub use widget::{ChatWidget, WidgetState, ERROR_PREFIX, LOADING_TEXT};
