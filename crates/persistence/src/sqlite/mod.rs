//! SQLite persistence module
//!
//! Repository pattern cho SQLite database access.

pub mod repos;
pub mod schema;

pub use repos::{
    create_pool, in_memory_database, init_database, AccountDirectoryRepo, BusinessUnitRepo,
    ClassRepo, CompanyRepo, DirectorRepo,
};
pub use schema::{create_schema, AssociationRow, BusinessUnitRow, DirectorRow};
