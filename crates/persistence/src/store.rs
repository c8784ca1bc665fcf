//! Data-access capability consumed by the assignment engine.
//!
//! The engine only ever sees [`AssignmentStore`]; [`SqliteStore`] is the
//! production implementation and tests substitute their own.

use crate::error::PersistenceResult;
use crate::sqlite::{BusinessUnitRepo, ClassRepo, DirectorRepo};
use async_trait::async_trait;
use director_core::{Company, GroupId};
use sqlx::SqlitePool;

/// One method per pipeline query. Each call is an independent statement;
/// nothing here spans a transaction.
#[async_trait]
pub trait AssignmentStore: Send + Sync {
    /// Is the class registered in the BU-mapping table for this company?
    async fn class_exists(&self, company: Company, class: &str) -> PersistenceResult<bool>;

    /// Resolve a business-unit label to its group id
    async fn resolve_business_unit(
        &self,
        company: Company,
        label: &str,
    ) -> PersistenceResult<Option<GroupId>>;

    /// Does (company, class, group) already have a director, any account?
    async fn director_association_exists(
        &self,
        company: Company,
        class: &str,
        group: GroupId,
    ) -> PersistenceResult<bool>;

    /// Does the class have a director under a group other than `excluding`?
    async fn conflicting_association_exists(
        &self,
        company: Company,
        class: &str,
        excluding: GroupId,
    ) -> PersistenceResult<bool>;

    /// Atomic guarded insert; returns the rows written (0 or 1)
    async fn insert_association_if_absent(
        &self,
        company: Company,
        class: &str,
        group: GroupId,
        nt_account: &str,
    ) -> PersistenceResult<u64>;
}

/// [`AssignmentStore`] over a SQLite pool
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentStore for SqliteStore {
    async fn class_exists(&self, company: Company, class: &str) -> PersistenceResult<bool> {
        ClassRepo::exists(&self.pool, company, class).await
    }

    async fn resolve_business_unit(
        &self,
        company: Company,
        label: &str,
    ) -> PersistenceResult<Option<GroupId>> {
        BusinessUnitRepo::resolve(&self.pool, company, label).await
    }

    async fn director_association_exists(
        &self,
        company: Company,
        class: &str,
        group: GroupId,
    ) -> PersistenceResult<bool> {
        DirectorRepo::exists_for_unit(&self.pool, company, class, group).await
    }

    async fn conflicting_association_exists(
        &self,
        company: Company,
        class: &str,
        excluding: GroupId,
    ) -> PersistenceResult<bool> {
        DirectorRepo::exists_for_other_unit(&self.pool, company, class, excluding).await
    }

    async fn insert_association_if_absent(
        &self,
        company: Company,
        class: &str,
        group: GroupId,
        nt_account: &str,
    ) -> PersistenceResult<u64> {
        let inserted =
            DirectorRepo::insert_if_absent(&self.pool, company, class, group, nt_account).await?;
        tracing::debug!(%company, class, %group, nt_account, inserted, "guarded director insert");
        Ok(inserted)
    }
}
