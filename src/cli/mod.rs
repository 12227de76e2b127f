//! Command-line interface parsing and handling
//!
//! This module parses command-line arguments and dispatches to the
//! interactive chat or one of the one-shot commands.

pub mod persona_list;
pub mod say;
pub mod settings;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::cli::persona_list::list_personas;
use crate::cli::say::run_say;
use crate::cli::settings::{print_config, set_config_value, unset_config_value};
use crate::core::app::App;
use crate::core::config::{path_display, Config, ConfigKey};
use crate::core::endpoint::{resolve_client_from_env, EndpointError};
use crate::core::exchange::GeminiClient;
use crate::core::persona::PersonaCatalog;
use crate::ui::chat_loop::run_chat;
use crate::ui::theme::Theme;
use crate::utils::logging::{init_file_logging, init_stderr_logging};

#[derive(Parser)]
#[command(name = "qanat")]
#[command(about = "Chat with your channel's characters from the terminal")]
#[command(
    long_about = "Qanat is a full-screen terminal chat interface for talking with a fixed cast \
of characters. Pick a character, type a message, and the reply is generated through the \
Gemini generateContent API.\n\n\
Environment Variables:\n\
  GEMINI_API_KEY    API key (overrides the api-key config value)\n\
  RUST_LOG          Diagnostic log filter (used with --debug-log)\n\n\
Controls:\n\
  Up/Down, 1-8      Choose a character on the selection screen\n\
  Enter             Start chatting / send the message\n\
  Esc               Change character (clears the conversation)\n\
  PageUp/PageDown   Scroll through the chat\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Character to chat with (skips the selection screen)
    #[arg(short = 'c', long, global = true, value_name = "ID")]
    pub persona: Option<String>,

    /// Model to use instead of the configured one
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Write diagnostic logs to the given file
    #[arg(long, global = true, value_name = "FILE")]
    pub debug_log: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send one message and print the reply without starting the interface
    Say {
        /// Message to send (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// List the available characters
    Personas,
    /// Set a configuration value
    Set {
        /// Configuration key (model, base-url, api-key, theme)
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset a configuration value
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Show the current configuration
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Chat);

    match &args.debug_log {
        Some(path) => init_file_logging(path)?,
        None if command != Commands::Chat => {
            let _ = init_stderr_logging();
        }
        None => {}
    }

    match command {
        Commands::Chat => {
            let mut config = Config::load()?;
            apply_model_override(&mut config, args.model);
            let client = client_or_exit(&config);

            let mut app = App::new(
                PersonaCatalog::builtin(),
                Theme::from_name(config.theme.as_deref()),
                config.effective_model(),
            );
            if let Some(id) = args.persona.as_deref() {
                if let Err(message) = app.select_by_id(id) {
                    eprintln!("❌ {message}");
                    std::process::exit(1);
                }
            }
            run_chat(app, Arc::new(client)).await
        }
        Commands::Say { prompt } => {
            let mut config = Config::load()?;
            apply_model_override(&mut config, args.model);
            let client = client_or_exit(&config);
            run_say(prompt, args.persona, &PersonaCatalog::builtin(), &client).await
        }
        Commands::Personas => {
            list_personas(&PersonaCatalog::builtin());
            Ok(())
        }
        Commands::Set { key, value } => {
            let key = parse_key_or_exit(&key);
            set_config_value(key, value)
        }
        Commands::Unset { key } => {
            let key = parse_key_or_exit(&key);
            unset_config_value(key)
        }
        Commands::Config => {
            print_config()?;
            println!("\nConfig file: {}", path_display(Config::get_config_path()?));
            Ok(())
        }
    }
}

fn apply_model_override(config: &mut Config, model: Option<String>) {
    if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
        config.set_value(ConfigKey::Model, model);
    }
}

fn client_or_exit(config: &Config) -> GeminiClient {
    match resolve_client_from_env(config) {
        Ok(client) => client,
        Err(err) => {
            report_endpoint_error(&err);
            std::process::exit(1);
        }
    }
}

fn report_endpoint_error(err: &EndpointError) {
    eprintln!("❌ {err}");
    let fixes = err.quick_fixes();
    if !fixes.is_empty() {
        eprintln!();
        eprintln!("💡 Quick fixes:");
        for fix in fixes {
            eprintln!("  • {fix}");
        }
    }
}

fn parse_key_or_exit(key: &str) -> ConfigKey {
    match key.parse::<ConfigKey>() {
        Ok(key) => key,
        Err(message) => {
            eprintln!("❌ {message}");
            std::process::exit(1);
        }
    }
}
