//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: the event loop that turns key presses into session
//!   transitions and applies exchange outcomes as they arrive.
//! - [`renderer`]: frame composition for the selector and chat screens.
//! - [`picker`] and [`theme`]: selection state and color policy.
//! - [`wrap`]: width-aware word wrapping for the chat log.
//!
//! This layer presents and captures interaction state; [`crate::core`] owns
//! the session and the exchange plumbing.

pub mod chat_loop;
pub mod picker;
pub mod renderer;
pub mod theme;
pub mod wrap;
