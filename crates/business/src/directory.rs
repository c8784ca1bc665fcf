//! Director registry service
//!
//! Wraps the assignment engine and the read/maintenance queries behind one
//! type so the HTTP and CLI layers share a single entry point. Every method
//! takes the raw company code and rejects unknown codes before querying.

use crate::engine::AssignmentEngine;
use crate::error::BusinessResult;
use director_core::{AssignmentOutcome, AssignmentRequest, Company};
use director_persistence::{
    AccountDirectoryRepo, BusinessUnitRepo, ClassRepo, CompanyRepo, Database, DirectorRepo,
    DirectorRow, SqliteStore,
};
use sqlx::SqlitePool;

/// Director registry over one database
#[derive(Debug, Clone)]
pub struct DirectorService {
    db: Database,
    engine: AssignmentEngine<SqliteStore>,
}

impl DirectorService {
    pub fn new(db: Database) -> Self {
        let engine = AssignmentEngine::new(db.store());
        Self { db, engine }
    }

    fn pool(&self) -> &SqlitePool {
        self.db.pool()
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Run the assignment pipeline
    pub async fn assign_director(
        &self,
        request: &AssignmentRequest,
    ) -> BusinessResult<AssignmentOutcome> {
        self.engine.assign_director(request).await
    }

    /// Companies that have at least one director
    pub async fn list_companies(&self) -> BusinessResult<Vec<Company>> {
        Ok(CompanyRepo::with_directors(self.pool()).await?)
    }

    /// All business-unit labels of a company
    pub async fn list_business_units(&self, company: &str) -> BusinessResult<Vec<String>> {
        let company: Company = company.parse()?;
        let units = BusinessUnitRepo::get_by_company(self.pool(), company).await?;
        Ok(units.into_iter().map(|u| u.label).collect())
    }

    /// Labels of the units a directed class is mapped to
    pub async fn business_units_for_class(
        &self,
        company: &str,
        class: &str,
    ) -> BusinessResult<Vec<String>> {
        let company: Company = company.parse()?;
        Ok(BusinessUnitRepo::labels_for_class(self.pool(), company, class).await?)
    }

    /// Label of the unit the class's director sits under, if any
    pub async fn business_unit_for_class(
        &self,
        company: &str,
        class: &str,
    ) -> BusinessResult<Option<String>> {
        let company: Company = company.parse()?;
        Ok(BusinessUnitRepo::director_label_for_class(self.pool(), company, class).await?)
    }

    /// Classes with a director
    pub async fn list_director_classes(&self, company: &str) -> BusinessResult<Vec<String>> {
        let company: Company = company.parse()?;
        Ok(DirectorRepo::classes_for_company(self.pool(), company).await?)
    }

    /// Every class registered in the BU-mapping table
    pub async fn list_registered_classes(&self, company: &str) -> BusinessResult<Vec<String>> {
        let company: Company = company.parse()?;
        Ok(ClassRepo::get_by_company(self.pool(), company).await?)
    }

    pub async fn search_directors(
        &self,
        company: &str,
        business_unit: &str,
        class: &str,
    ) -> BusinessResult<Vec<DirectorRow>> {
        let company: Company = company.parse()?;
        Ok(DirectorRepo::search(self.pool(), company, business_unit, class).await?)
    }

    pub async fn list_all_directors(&self) -> BusinessResult<Vec<DirectorRow>> {
        Ok(DirectorRepo::get_all(self.pool()).await?)
    }

    pub async fn list_directors_for_company(
        &self,
        company: &str,
    ) -> BusinessResult<Vec<DirectorRow>> {
        let company: Company = company.parse()?;
        Ok(DirectorRepo::get_by_company(self.pool(), company).await?)
    }

    /// Directory accounts in the company's namespace
    pub async fn list_directory_accounts(&self, company: &str) -> BusinessResult<Vec<String>> {
        let company: Company = company.parse()?;
        Ok(AccountDirectoryRepo::get_by_company(self.pool(), company).await?)
    }

    /// Point the director of (company, unit, class) at another account.
    ///
    /// The account is normalized like an assignment. Returns rows updated.
    pub async fn update_director_account(
        &self,
        company: &str,
        business_unit: &str,
        class: &str,
        nt_account: &str,
    ) -> BusinessResult<u64> {
        let request = AssignmentRequest::new(company, business_unit, class, nt_account);
        let company = request.validate()?;
        let nt_account = company.normalize_account(nt_account);

        let updated =
            DirectorRepo::update_account(self.pool(), company, business_unit, class, &nt_account)
                .await?;
        tracing::info!(
            %company,
            class,
            business_unit,
            nt_account = %nt_account,
            updated,
            "director account updated"
        );
        Ok(updated)
    }

    /// Remove the class from the BU-mapping table
    pub async fn delete_class_mapping(&self, class: &str, company: &str) -> BusinessResult<u64> {
        let company: Company = company.parse()?;
        let deleted = ClassRepo::delete(self.pool(), company, class).await?;
        tracing::info!(%company, class, deleted, "class mapping deleted");
        Ok(deleted)
    }

    /// Remove every director row of the class
    pub async fn delete_director_association(
        &self,
        class: &str,
        company: &str,
    ) -> BusinessResult<u64> {
        let company: Company = company.parse()?;
        let deleted = DirectorRepo::delete_for_class(self.pool(), company, class).await?;
        tracing::info!(%company, class, deleted, "director association deleted");
        Ok(deleted)
    }
}
