//! # Director Core
//!
//! Domain types shared by every layer of the director registry:
//!
//! - [`Company`]: the closed set of tenants and their account namespaces
//! - [`normalize_account`]: rewrites an account into its company's namespace
//! - [`AssignmentRequest`] / [`AssignmentOutcome`]: input and result of a
//!   director assignment
//!
//! Nothing in this crate touches storage.

pub mod assignment;
pub mod company;
pub mod error;

pub use assignment::{AssignmentOutcome, AssignmentRequest, GroupId, DIRECTOR_ROLE};
pub use company::{normalize_account, Company};
pub use error::{CoreError, CoreResult};
