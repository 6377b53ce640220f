pub mod websocket_client;

pub use websocket_client::{ClientCommand, WebSocketGameClient};
