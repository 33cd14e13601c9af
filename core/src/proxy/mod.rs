//! Proxy module - the relay's HTTP surface
//! Routing, CORS handling, and the upstream FPL client

pub mod cors;
pub mod handlers;
pub mod server;
pub mod upstream;

pub use server::{AppState, ProxyServer};
