//! Leader domain module

mod entity;

pub use entity::Leader;
