//! Application Services
//!
//! Business logic orchestration layer that coordinates domain operations
//! and repository access.

mod author;
mod book;
mod external;

pub use author::*;
pub use book::*;
pub use external::*;
