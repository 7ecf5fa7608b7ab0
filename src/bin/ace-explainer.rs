//! Interactive explainer for IBM App Connect Enterprise / IIB code.
//!
//! Paste ESQL, Java, or message flow XML and get a step-by-step explanation
//! from a Gemini model; export the conversation as a `.docx` report.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage; reads GOOGLE_API_KEY from the environment or a .env file
//! ace-explainer
//!
//! # Specify a model
//! ace-explainer --model gemini-2.5-pro
//!
//! # Write reports somewhere other than the current directory
//! ace-explainer --export-dir ~/reports
//!
//! # Disable colors (useful for piping output)
//! ace-explainer --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/paste` - Enter a multi-line message ending with `/end`
//! - `/export [path]` - Save the conversation as a report
//! - `/clear` - Clear conversation history
//! - `/model <name>` - Change the model
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use std::path::Path;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use ace_explainer::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, PASTE_TERMINATOR, PlainTextRenderer,
    Renderer, help_text, parse_command,
};
use ace_explainer::client::API_KEY_ENV;
use ace_explainer::{Error, Gemini, Model};

/// Main entry point for the ace-explainer application.
// Single-threaded so the local UTC offset can be read for report timestamps.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let (args, _) = ChatArgs::from_command_line_relaxed("ace-explainer [OPTIONS]");
    let config = ChatConfig::try_from(args)?;
    let use_color = config.use_color;

    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    let provider = match connect(&config, None) {
        Ok(client) => Some(client),
        Err(err) if err.is_configuration() => {
            renderer.print_warning(&format!("{err}"));
            prompt_for_key(&mut rl, &config, &mut renderer)
        }
        Err(err) => return Err(err.into()),
    };
    let mut session = ChatSession::new(provider, config);

    println!("IBM ACE / IIB Code Explainer (model: {})", session.model());
    println!("Paste code or ask a question. Type /help for commands, /quit to exit\n");
    if !session.has_provider() {
        renderer.print_warning("No API key configured; use /key before sending messages.");
    }

    loop {
        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                let message = match parse_command(line) {
                    Some(ChatCommand::Paste) => match read_paste(&mut rl) {
                        Some(text) => text,
                        None => continue,
                    },
                    Some(cmd) => {
                        if !handle_command(cmd, &mut session, &mut rl, &mut renderer) {
                            break;
                        }
                        continue;
                    }
                    None => line.to_string(),
                };

                send(&mut session, &message, &mut renderer).await;
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

async fn send(session: &mut ChatSession, message: &str, renderer: &mut PlainTextRenderer) {
    println!("Analyzing...");
    match session.send(message).await {
        Ok(reply) => renderer.print_reply(&reply),
        Err(err) if err.is_provider_call() => {
            renderer.print_error(&err.to_string());
            renderer.print_info("Try /clear to reset the conversation.");
        }
        Err(err) => renderer.print_error(&err.to_string()),
    }
}

/// Runs one command; returns false when the session should end.
fn handle_command(
    cmd: ChatCommand,
    session: &mut ChatSession,
    rl: &mut DefaultEditor,
    renderer: &mut PlainTextRenderer,
) -> bool {
    match cmd {
        ChatCommand::Quit => {
            println!("Goodbye!");
            return false;
        }
        ChatCommand::Clear => {
            session.clear();
            renderer.print_info("Conversation cleared.");
        }
        ChatCommand::Help => {
            for line in help_text().lines() {
                println!("    {}", line);
            }
        }
        ChatCommand::Export(target) => {
            if session.transcript().is_empty() {
                renderer.print_info("Nothing to export yet; paste some code first.");
                return true;
            }
            match session.export_to(target.as_deref().map(Path::new)) {
                Ok(path) => renderer.print_info(&format!("Report saved to {}", path.display())),
                Err(err) => renderer.print_error(&format!("Failed to export report: {}", err)),
            }
        }
        ChatCommand::Model(model_name) => {
            let model: Model = model_name.parse().unwrap_or_else(|never| match never {});
            session.set_model(model);
            renderer.print_info(&format!("Model changed to: {}", model_name));
        }
        ChatCommand::System(prompt) => {
            session.set_system_prompt(prompt.clone());
            match prompt {
                Some(p) => renderer.print_info(&format!("System prompt set to: {}", p)),
                None => renderer.print_info("System prompt restored to the built-in one."),
            }
        }
        ChatCommand::Temperature(value) => {
            session.set_temperature(Some(value));
            renderer.print_info(&format!("temperature set to {:.2}", value));
        }
        ChatCommand::ClearTemperature => {
            session.set_temperature(None);
            renderer.print_info("temperature reset to model default");
        }
        ChatCommand::Key => {
            if let Some(client) = prompt_for_key(rl, session.config(), renderer) {
                session.set_provider(client);
                renderer.print_info("API key set.");
            }
        }
        ChatCommand::Paste => {}
        ChatCommand::Stats => {
            print_stats(session);
        }
        ChatCommand::ShowConfig => {
            print_config(session);
        }
        ChatCommand::Invalid(message) => {
            renderer.print_error(&message);
        }
    }
    true
}

fn connect(config: &ChatConfig, api_key: Option<String>) -> Result<Gemini, Error> {
    Gemini::with_options(api_key, config.base_url.clone(), Some(config.timeout))
}

fn prompt_for_key(
    rl: &mut DefaultEditor,
    config: &ChatConfig,
    renderer: &mut PlainTextRenderer,
) -> Option<Gemini> {
    let key = match rl.readline(&format!("Enter {API_KEY_ENV} (blank to skip): ")) {
        Ok(key) => key.trim().to_string(),
        Err(_) => return None,
    };
    if key.is_empty() {
        return None;
    }
    match connect(config, Some(key)) {
        Ok(client) => Some(client),
        Err(err) => {
            renderer.print_error(&err.to_string());
            None
        }
    }
}

fn read_paste(rl: &mut DefaultEditor) -> Option<String> {
    println!("    Paste your message; finish with a line containing only {PASTE_TERMINATOR}");
    let mut lines = Vec::new();
    loop {
        match rl.readline("... ") {
            Ok(line) if line.trim() == PASTE_TERMINATOR => break,
            Ok(line) => lines.push(line),
            Err(_) => return None,
        }
    }
    let text = lines.join("\n");
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

fn print_stats(session: &ChatSession) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Model: {}", stats.model);
    println!("      Turns: {}", stats.turn_count);
    println!("      Temperature: {}", describe_float(stats.temperature));
    println!(
        "      System prompt: {}",
        if stats.default_system_prompt {
            "built-in"
        } else {
            "custom"
        }
    );
    println!(
        "      API key: {}",
        if stats.connected { "set" } else { "(not set)" }
    );
    println!(
        "      Total tokens: {} in / {} out ({} requests, {} failed)",
        stats.total_prompt_tokens,
        stats.total_reply_tokens,
        stats.total_requests,
        stats.failed_requests
    );
    if let Some(prompt) = stats.last_turn_prompt_tokens {
        let reply = stats.last_turn_reply_tokens.unwrap_or(0);
        println!("      Last turn tokens: {prompt} in / {reply} out");
    }
}

fn print_config(session: &ChatSession) {
    let config = session.config();
    println!("    Current Configuration:");
    println!("      Model: {}", config.model);
    println!("      Temperature: {}", describe_float(config.temperature));
    println!("      Timeout: {}s", config.timeout.as_secs());
    println!("      Export directory: {}", config.export_dir.display());
    match config.base_url.as_deref() {
        Some(url) => println!("      Base URL: {}", url),
        None => println!("      Base URL: (default)"),
    }
    println!("      System prompt: {}", config.system_prompt);
}

fn describe_float(value: Option<f32>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "default".to_string())
}
