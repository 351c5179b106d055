//! Terminal chat widget: message list, input box and send button wired to the
//! Answer Service through the `chat_widget_client` controller.

pub mod app;
pub mod handler;
pub mod tui;
pub mod ui;

use anyhow::Result;
use chat_widget_client::{AnswerClient, Config};

use crate::app::App;
use crate::tui::{EventHandler, Tui};

/// Set up the terminal, bind events once, and run until the user quits.
pub async fn run(config: &Config) -> Result<()> {
    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();
    let mut app = App::new(AnswerClient::from_config(config));

    let result = event_loop(&mut terminal, &mut events, &mut app).await;
    tui::restore()?;
    result
}

async fn event_loop(terminal: &mut Tui, events: &mut EventHandler, app: &mut App) -> Result<()> {
    let tx = events.sender();
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;
        match events.next().await {
            Some(event) => handler::handle_event(app, event, &tx),
            None => break,
        }
    }
    Ok(())
}
