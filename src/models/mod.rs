//! Wire-format data model
//!
//! All traffic shares a single tagged envelope; payload shapes are decoded
//! only after the type tag is known.

pub mod element;
pub mod message;

pub use element::Element;
pub use message::{CursorPos, Envelope, SyncData, UserInfo};
