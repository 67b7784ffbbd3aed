//! Data Transfer Objects (DTOs) for API layer
//!
//! DTOs provide a stable API contract separate from internal domain models.
//! They handle serialization, validation annotations, and API documentation.

mod author;
mod book;
mod external;

pub use author::*;
pub use book::*;
pub use external::*;
