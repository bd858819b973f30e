//! Keyboard mapping shared by the terminal display and keyboard play

pub mod handler;

pub use handler::{InputHandler, KeyAction};
