//! TUI-less "say" command

use std::error::Error;

use crate::core::exchange::ExchangeClient;
use crate::core::persona::PersonaCatalog;
use crate::core::session::{submit_and_wait, Session};

/// One exchange outside the interface. Returns the reply that would have
/// been shown in the chat log (the fallback text when the exchange failed).
pub async fn say_once<C>(
    prompt: &str,
    persona_id: Option<&str>,
    catalog: &PersonaCatalog,
    client: &C,
) -> Result<String, Box<dyn Error>>
where
    C: ExchangeClient + ?Sized,
{
    if prompt.trim().is_empty() {
        return Err("Usage: qanat say [-c <id>] <message>".into());
    }

    let persona = match persona_id {
        Some(id) => catalog.require(id)?.clone(),
        None => catalog
            .get(0)
            .cloned()
            .ok_or("No characters are available")?,
    };

    let mut session = Session::new();
    session.select_persona(persona);
    submit_and_wait(&mut session, client, prompt).await;

    session
        .messages()
        .last()
        .filter(|m| !m.sender.is_user())
        .map(|m| m.text.clone())
        .ok_or_else(|| "No reply was recorded".into())
}

pub async fn run_say<C>(
    prompt: Vec<String>,
    persona_id: Option<String>,
    catalog: &PersonaCatalog,
    client: &C,
) -> Result<(), Box<dyn Error>>
where
    C: ExchangeClient + ?Sized,
{
    let prompt = prompt.join(" ");
    match say_once(&prompt, persona_id.as_deref(), catalog, client).await {
        Ok(reply) => {
            println!("{reply}");
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    }
}
