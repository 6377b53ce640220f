pub mod stats;
pub mod store;
pub mod terminal; // Terminal output wrapper
pub mod user;

// WebSocket transport
pub mod websocket;
