//! # Director Business
//!
//! Business logic layer:
//! - [`AssignmentEngine`]: the ordered director-assignment pipeline
//! - [`DirectorService`]: engine plus the registry's lookup and maintenance
//!   operations, over one database

pub mod directory;
pub mod engine;
pub mod error;

pub use directory::DirectorService;
pub use engine::AssignmentEngine;
pub use error::{BusinessError, BusinessResult};
