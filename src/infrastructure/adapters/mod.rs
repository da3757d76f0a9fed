//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod background;
pub mod codec;
pub mod llm;
pub mod storage;

pub use background::*;
pub use codec::*;
pub use llm::*;
pub use storage::*;
