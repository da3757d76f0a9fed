//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod generate_handlers;
mod mix_handlers;
mod segment_decoder;

pub use generate_handlers::*;
pub use mix_handlers::*;
pub use segment_decoder::*;
