//! Qanat is a terminal chat client for talking with a fixed cast of
//! characters through a generative-language API.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the chat session, the persona catalog, configuration, and
//!   the exchange client that performs the single network call per message.
//! - [`ui`] renders the selector and chat screens and runs the interactive
//!   event loop.
//! - [`cli`] parses arguments and dispatches to the interactive UI or the
//!   one-shot commands.
//! - [`api`] defines the request/response payloads of the endpoint.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
