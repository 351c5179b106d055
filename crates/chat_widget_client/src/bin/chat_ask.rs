//! chat-ask: one-shot chat widget on the command line.
//! Reads config, takes a question from the first positional argument or from
//! stdin, runs it through the widget controller, and prints the bot reply.

use chat_widget_client::config;
use chat_widget_client::{AnswerClient, ChatPanel, ChatWidget, Sender};
use std::io::{self, BufRead, Write};
use std::process;

/// First argument that is neither a flag nor the value of `--config`.
fn positional_question(args: &[String]) -> Option<String> {
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            iter.next();
            continue;
        }
        if !arg.starts_with("--") {
            return Some(arg.clone());
        }
    }
    None
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config_path = config::resolve_config_path(&args).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let cfg = match config::load_or_default(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: failed to load config from {}: {}", config_path.display(), e);
            process::exit(1);
        }
    };

    let question = positional_question(&args).unwrap_or_else(|| {
        let mut line = String::new();
        if let Err(e) = io::stdin().lock().read_line(&mut line) {
            eprintln!("Error: failed to read question from stdin: {}", e);
            process::exit(1);
        }
        line
    });

    let mut panel = ChatPanel::new();
    panel.set_input(question);
    let mut widget = ChatWidget::new(panel);
    let client = AnswerClient::from_config(&cfg);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("Error: failed to create runtime: {}", e);
            process::exit(1);
        });

    // Sources are only known to the client, so ask directly and hand the
    // outcome to the controller.
    let outcome = match widget.begin() {
        Some(q) => rt.block_on(client.ask(&q)),
        None => {
            eprintln!("Error: no question provided");
            process::exit(1);
        }
    };
    let failed = outcome.is_err();
    let sources = outcome
        .as_ref()
        .map(|a| a.sources.clone())
        .unwrap_or_default();
    widget.settle(outcome);

    let panel = widget.into_view();
    let reply = match panel.last_message() {
        Some(m) if m.sender == Sender::Bot => m.text.clone(),
        _ => {
            eprintln!("Error: no reply rendered");
            process::exit(1);
        }
    };

    if failed {
        eprintln!("{}", reply);
        process::exit(1);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let _ = writeln!(out, "{}", reply);
    if !sources.is_empty() {
        let _ = writeln!(out, "\nFontes:");
        for src in &sources {
            let _ = writeln!(out, "  {}", src);
        }
    }
}
