//! HTTP Handlers

mod gemini;
mod mix;
mod ping;

pub use gemini::*;
pub use mix::*;
pub use ping::*;
