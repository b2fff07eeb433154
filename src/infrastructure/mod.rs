pub mod broadcast;
pub mod cache;
pub mod logging;
pub mod services;
pub mod store;
