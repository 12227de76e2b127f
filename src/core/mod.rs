pub mod app;
pub mod builtin_personas;
pub mod config;
pub mod constants;
pub mod endpoint;
pub mod exchange;
pub mod exchange_service;
pub mod message;
pub mod persona;
pub mod session;
