//! API layer - HTTP endpoints and live updates

pub mod health;
pub mod leaders;
pub mod parts;
pub mod router;
pub mod state;
pub mod system;
pub mod types;
pub mod ws;

pub use router::create_router;
pub use state::AppState;
