//! API request handlers.

pub mod health;
pub mod index;
pub mod tasks;
pub mod ws;

pub use health::*;
pub use index::*;
pub use tasks::*;
pub use ws::*;
