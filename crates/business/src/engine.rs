//! Director assignment pipeline
//!
//! ```text
//! validate                  ──▶ InvalidInput / UnrecognizedCompany
//!  └─ class exists?          no ──▶ ClassNotFound
//!      └─ resolve BU        none ──▶ BusinessUnitNotFound
//!          └─ same-BU director?   yes ──▶ DuplicateDirector
//!              └─ other-BU director?  yes ──▶ ClassBusinessUnitConflict
//!                  └─ guarded insert       ──▶ Assigned{n}
//! ```
//!
//! Every step after validate is one independent store call. Steps 3 and 4 are pre-checks
//! only; the insert carries its own guard and is the one atomic step.
//! Two requests for the same class under different business units can both
//! pass the pre-checks if they interleave, and the engine does not prevent
//! that.

use crate::error::BusinessResult;
use director_core::{AssignmentOutcome, AssignmentRequest};
use director_persistence::AssignmentStore;

/// Stateless director assignment engine.
///
/// Holds nothing but the store handle, so one instance can serve any number
/// of concurrent requests.
#[derive(Debug, Clone)]
pub struct AssignmentEngine<S> {
    store: S,
}

impl<S: AssignmentStore> AssignmentEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Convenience wrapper over [`AssignmentEngine::assign_director`]
    pub async fn assign(
        &self,
        company: &str,
        business_unit: &str,
        class: &str,
        nt_account: &str,
    ) -> BusinessResult<AssignmentOutcome> {
        let request = AssignmentRequest::new(company, business_unit, class, nt_account);
        self.assign_director(&request).await
    }

    /// Run the pipeline for one request.
    ///
    /// Invalid input and unknown companies fail before the store is touched.
    /// Store failures are returned as-is; nothing is retried or undone.
    pub async fn assign_director(
        &self,
        request: &AssignmentRequest,
    ) -> BusinessResult<AssignmentOutcome> {
        let company = request.validate()?;
        let class = request.class.as_str();
        let label = request.business_unit.as_str();

        if !self.store.class_exists(company, class).await? {
            tracing::warn!(%company, class, "class not registered");
            return Ok(AssignmentOutcome::ClassNotFound);
        }

        let group = match self.store.resolve_business_unit(company, label).await? {
            Some(group) => group,
            None => {
                tracing::warn!(%company, business_unit = label, "business unit not found");
                return Ok(AssignmentOutcome::BusinessUnitNotFound);
            }
        };
        tracing::debug!(%company, business_unit = label, %group, "business unit resolved");

        if self
            .store
            .director_association_exists(company, class, group)
            .await?
        {
            tracing::warn!(%company, class, %group, "director already assigned");
            return Ok(AssignmentOutcome::DuplicateDirector);
        }

        if self
            .store
            .conflicting_association_exists(company, class, group)
            .await?
        {
            tracing::warn!(
                %company,
                class,
                %group,
                "class has a director under another business unit"
            );
            return Ok(AssignmentOutcome::ClassBusinessUnitConflict);
        }

        let nt_account = company.normalize_account(&request.nt_account);
        let rows_inserted = self
            .store
            .insert_association_if_absent(company, class, group, &nt_account)
            .await?;

        tracing::info!(
            %company,
            class,
            %group,
            nt_account = %nt_account,
            rows_inserted,
            "director assigned"
        );
        Ok(AssignmentOutcome::Assigned { rows_inserted })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BusinessError;
    use async_trait::async_trait;
    use director_core::{Company, GroupId};
    use director_persistence::{PersistenceError, PersistenceResult};
    use std::collections::HashMap;
    use std::sync::Mutex;

    type Association = (Company, String, GroupId, String);

    /// In-memory store that records which methods were called, in order
    #[derive(Default)]
    struct RecordingStore {
        classes: Vec<(Company, String)>,
        units: HashMap<(Company, String), GroupId>,
        associations: Mutex<Vec<Association>>,
        calls: Mutex<Vec<&'static str>>,
        /// Pre-checks see no associations, as if a twin request committed
        /// between step 3 and step 5
        blind_prechecks: bool,
        fail_on: Option<&'static str>,
    }

    impl RecordingStore {
        fn with_class(mut self, company: Company, class: &str) -> Self {
            self.classes.push((company, class.to_string()));
            self
        }

        fn with_unit(mut self, company: Company, label: &str, group: i64) -> Self {
            self.units.insert((company, label.to_string()), GroupId(group));
            self
        }

        fn with_director(self, company: Company, class: &str, group: i64, account: &str) -> Self {
            self.associations.lock().unwrap().push((
                company,
                class.to_string(),
                GroupId(group),
                account.to_string(),
            ));
            self
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn associations(&self) -> Vec<Association> {
            self.associations.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) -> PersistenceResult<()> {
            self.calls.lock().unwrap().push(call);
            if self.fail_on == Some(call) {
                return Err(PersistenceError::Database(sqlx::Error::PoolTimedOut));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl AssignmentStore for RecordingStore {
        async fn class_exists(&self, company: Company, class: &str) -> PersistenceResult<bool> {
            self.record("class_exists")?;
            Ok(self.classes.iter().any(|(c, k)| *c == company && k == class))
        }

        async fn resolve_business_unit(
            &self,
            company: Company,
            label: &str,
        ) -> PersistenceResult<Option<GroupId>> {
            self.record("resolve_business_unit")?;
            Ok(self.units.get(&(company, label.to_string())).copied())
        }

        async fn director_association_exists(
            &self,
            company: Company,
            class: &str,
            group: GroupId,
        ) -> PersistenceResult<bool> {
            self.record("director_association_exists")?;
            if self.blind_prechecks {
                return Ok(false);
            }
            Ok(self
                .associations()
                .iter()
                .any(|(c, k, g, _)| *c == company && k == class && *g == group))
        }

        async fn conflicting_association_exists(
            &self,
            company: Company,
            class: &str,
            excluding: GroupId,
        ) -> PersistenceResult<bool> {
            self.record("conflicting_association_exists")?;
            if self.blind_prechecks {
                return Ok(false);
            }
            Ok(self
                .associations()
                .iter()
                .any(|(c, k, g, _)| *c == company && k == class && *g != excluding))
        }

        async fn insert_association_if_absent(
            &self,
            company: Company,
            class: &str,
            group: GroupId,
            nt_account: &str,
        ) -> PersistenceResult<u64> {
            self.record("insert_association_if_absent")?;
            let row = (company, class.to_string(), group, nt_account.to_string());
            let mut rows = self.associations.lock().unwrap();
            if rows.contains(&row) {
                return Ok(0);
            }
            rows.push(row);
            Ok(1)
        }
    }

    fn sales_setup() -> RecordingStore {
        RecordingStore::default()
            .with_class(Company::Futa, "C100")
            .with_unit(Company::Futa, "Sales", 10)
            .with_unit(Company::Futa, "Marketing", 11)
    }

    #[tokio::test]
    async fn test_first_assignment_inserts_normalized_account() {
        let engine = AssignmentEngine::new(sales_setup());

        let outcome = engine.assign("FUTA", "Sales", "C100", "jdoe").await.unwrap();

        assert_eq!(outcome, AssignmentOutcome::Assigned { rows_inserted: 1 });
        assert_eq!(
            engine.store().associations(),
            vec![(Company::Futa, "C100".to_string(), GroupId(10), "ASIA\\jdoe".to_string())]
        );
        assert_eq!(
            engine.store().calls(),
            vec![
                "class_exists",
                "resolve_business_unit",
                "director_association_exists",
                "conflicting_association_exists",
                "insert_association_if_absent",
            ]
        );
    }

    #[tokio::test]
    async fn test_foreign_prefix_is_rewritten() {
        let engine = AssignmentEngine::new(sales_setup());
        engine.assign("FUTA", "Sales", "C100", "EUR\\jdoe").await.unwrap();
        assert_eq!(engine.store().associations()[0].3, "ASIA\\jdoe");
    }

    #[tokio::test]
    async fn test_missing_class_stops_pipeline() {
        // the class is absent even though everything else would conflict
        let store = sales_setup().with_director(Company::Futa, "C999", 11, "ASIA\\x");
        let engine = AssignmentEngine::new(store);

        let outcome = engine.assign("FUTA", "Sales", "C999", "jdoe").await.unwrap();

        assert_eq!(outcome, AssignmentOutcome::ClassNotFound);
        assert_eq!(engine.store().calls(), vec!["class_exists"]);
    }

    #[tokio::test]
    async fn test_class_scoped_by_company() {
        let engine = AssignmentEngine::new(sales_setup().with_unit(Company::Fute, "Sales", 20));
        let outcome = engine.assign("FUTE", "Sales", "C100", "jdoe").await.unwrap();
        assert_eq!(outcome, AssignmentOutcome::ClassNotFound);
    }

    #[tokio::test]
    async fn test_unknown_business_unit() {
        let engine = AssignmentEngine::new(sales_setup());

        let outcome = engine.assign("FUTA", "Legal", "C100", "jdoe").await.unwrap();

        assert_eq!(outcome, AssignmentOutcome::BusinessUnitNotFound);
        assert_eq!(
            engine.store().calls(),
            vec!["class_exists", "resolve_business_unit"]
        );
    }

    #[tokio::test]
    async fn test_duplicate_director_any_account() {
        let store = sales_setup().with_director(Company::Futa, "C100", 10, "ASIA\\jdoe");
        let engine = AssignmentEngine::new(store);

        for account in ["asmith", "jdoe", "ASIA\\jdoe"] {
            let outcome = engine.assign("FUTA", "Sales", "C100", account).await.unwrap();
            assert_eq!(outcome, AssignmentOutcome::DuplicateDirector);
        }
        assert_eq!(engine.store().associations().len(), 1);
    }

    #[tokio::test]
    async fn test_director_under_other_unit_conflicts() {
        let store = sales_setup().with_director(Company::Futa, "C100", 10, "ASIA\\jdoe");
        let engine = AssignmentEngine::new(store);

        let outcome = engine.assign("FUTA", "Marketing", "C100", "jdoe").await.unwrap();

        assert_eq!(outcome, AssignmentOutcome::ClassBusinessUnitConflict);
        assert!(!engine
            .store()
            .calls()
            .contains(&"insert_association_if_absent"));
    }

    #[tokio::test]
    async fn test_racing_identical_request_inserts_nothing() {
        let store = RecordingStore {
            blind_prechecks: true,
            ..sales_setup()
        }
        .with_director(Company::Futa, "C100", 10, "ASIA\\jdoe");
        let engine = AssignmentEngine::new(store);

        let outcome = engine.assign("FUTA", "Sales", "C100", "jdoe").await.unwrap();

        assert_eq!(outcome, AssignmentOutcome::Assigned { rows_inserted: 0 });
        assert_eq!(engine.store().associations().len(), 1);
    }

    #[tokio::test]
    async fn test_unrecognized_company_touches_no_store() {
        let engine = AssignmentEngine::new(sales_setup());

        let err = engine.assign("ACME", "Sales", "C100", "jdoe").await.unwrap_err();

        assert!(err.is_unrecognized_company());
        assert!(engine.store().calls().is_empty());
    }

    #[tokio::test]
    async fn test_blank_input_touches_no_store() {
        let engine = AssignmentEngine::new(sales_setup());

        let err = engine.assign("FUTA", "Sales", "C100", " ").await.unwrap_err();

        assert!(err.is_client_error());
        assert!(!err.is_unrecognized_company());
        assert!(engine.store().calls().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_propagates_without_retry() {
        let store = RecordingStore {
            fail_on: Some("director_association_exists"),
            ..sales_setup()
        };
        let engine = AssignmentEngine::new(store);

        let err = engine.assign("FUTA", "Sales", "C100", "jdoe").await.unwrap_err();

        assert!(matches!(err, BusinessError::DataAccess(_)));
        assert_eq!(
            engine.store().calls(),
            vec![
                "class_exists",
                "resolve_business_unit",
                "director_association_exists"
            ]
        );
    }
}
