mod websocket;

pub use websocket::{BroadcastFrame, WsBroadcaster};
