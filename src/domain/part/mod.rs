//! Part domain module
//!
//! A part is a named template of todo items. Activating a part makes its
//! checklist the one copied to newly registered leaders; at most one part
//! is active at any time.

mod entity;

pub use entity::{Part, TodoPatch};
