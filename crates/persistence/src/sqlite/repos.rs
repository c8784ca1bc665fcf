//! Repository implementations cho SQLite
//!
//! Each repo is a unit struct with async associated functions that take the
//! pool explicitly, one SQL statement per function.

use crate::error::{PersistenceError, PersistenceResult};
use crate::sqlite::schema::*;
use director_core::{Company, GroupId, DIRECTOR_ROLE};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

const DIRECTOR_SELECT: &str = r#"
    SELECT DISTINCT a.company, g.label AS business_unit, a.class, a.role, a.nt_account
    FROM director_associations a
    JOIN business_units g ON a.group_id = g.group_id AND a.company = g.company
"#;

// ============================================================================
// Company Repository
// ============================================================================

/// Companies as seen through the association table
pub struct CompanyRepo;

impl CompanyRepo {
    /// Distinct companies that have at least one director
    pub async fn with_directors(pool: &SqlitePool) -> PersistenceResult<Vec<Company>> {
        let codes = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT company FROM director_associations WHERE role = ? ORDER BY company",
        )
        .bind(DIRECTOR_ROLE)
        .fetch_all(pool)
        .await?;

        codes
            .iter()
            .map(|code| {
                code.parse::<Company>()
                    .map_err(|_| PersistenceError::invalid_value("company", code))
            })
            .collect()
    }
}

// ============================================================================
// Business Unit Repository
// ============================================================================

/// Repository cho business_units table
pub struct BusinessUnitRepo;

impl BusinessUnitRepo {
    /// Thêm business unit mới
    pub async fn insert(
        pool: &SqlitePool,
        company: Company,
        group_id: GroupId,
        label: &str,
    ) -> PersistenceResult<()> {
        sqlx::query("INSERT INTO business_units (group_id, company, label) VALUES (?, ?, ?)")
            .bind(group_id.get())
            .bind(company.as_str())
            .bind(label)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Resolve a label to its group id within a company
    pub async fn resolve(
        pool: &SqlitePool,
        company: Company,
        label: &str,
    ) -> PersistenceResult<Option<GroupId>> {
        let id = sqlx::query_scalar::<_, i64>(
            "SELECT group_id FROM business_units WHERE company = ? AND label = ?",
        )
        .bind(company.as_str())
        .bind(label)
        .fetch_optional(pool)
        .await?;
        Ok(id.map(GroupId))
    }

    /// Lấy tất cả business units của company
    pub async fn get_by_company(
        pool: &SqlitePool,
        company: Company,
    ) -> PersistenceResult<Vec<BusinessUnitRow>> {
        let rows = sqlx::query_as::<_, BusinessUnitRow>(
            "SELECT group_id, company, label FROM business_units WHERE company = ? ORDER BY label",
        )
        .bind(company.as_str())
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Labels of the units a class is mapped to, for classes that have a director
    pub async fn labels_for_class(
        pool: &SqlitePool,
        company: Company,
        class: &str,
    ) -> PersistenceResult<Vec<String>> {
        let labels = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT g.label
            FROM director_associations a
            JOIN bu_classes b ON a.class = b.class AND a.company = b.company
            JOIN business_units g ON b.group_id = g.group_id
            WHERE a.company = ? AND a.class = ? AND a.role = ?
            ORDER BY g.label
            "#,
        )
        .bind(company.as_str())
        .bind(class)
        .bind(DIRECTOR_ROLE)
        .fetch_all(pool)
        .await?;
        Ok(labels)
    }

    /// Label of the unit the class's director sits under
    pub async fn director_label_for_class(
        pool: &SqlitePool,
        company: Company,
        class: &str,
    ) -> PersistenceResult<Option<String>> {
        let label = sqlx::query_scalar::<_, String>(
            r#"
            SELECT g.label
            FROM director_associations a
            JOIN business_units g ON a.group_id = g.group_id
            WHERE a.company = ? AND a.class = ? AND a.role = ?
            ORDER BY a.id
            LIMIT 1
            "#,
        )
        .bind(company.as_str())
        .bind(class)
        .bind(DIRECTOR_ROLE)
        .fetch_optional(pool)
        .await?;
        Ok(label)
    }
}

// ============================================================================
// Class Repository
// ============================================================================

/// Repository cho bu_classes table (the BU-mapping table)
pub struct ClassRepo;

impl ClassRepo {
    /// Register a class under a unit. Returns 0 if it was already there.
    pub async fn register(
        pool: &SqlitePool,
        company: Company,
        group_id: GroupId,
        class: &str,
    ) -> PersistenceResult<u64> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO bu_classes (group_id, class, company) VALUES (?, ?, ?)",
        )
        .bind(group_id.get())
        .bind(class)
        .bind(company.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Kiểm tra class đã được đăng ký cho company chưa
    pub async fn exists(
        pool: &SqlitePool,
        company: Company,
        class: &str,
    ) -> PersistenceResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            "SELECT EXISTS (SELECT 1 FROM bu_classes WHERE company = ? AND class = ?)",
        )
        .bind(company.as_str())
        .bind(class)
        .fetch_one(pool)
        .await?;
        Ok(found != 0)
    }

    /// Every class registered for a company
    pub async fn get_by_company(
        pool: &SqlitePool,
        company: Company,
    ) -> PersistenceResult<Vec<String>> {
        let classes = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT class FROM bu_classes WHERE company = ? ORDER BY class",
        )
        .bind(company.as_str())
        .fetch_all(pool)
        .await?;
        Ok(classes)
    }

    /// Xóa class khỏi BU-mapping table
    pub async fn delete(
        pool: &SqlitePool,
        company: Company,
        class: &str,
    ) -> PersistenceResult<u64> {
        let result = sqlx::query("DELETE FROM bu_classes WHERE class = ? AND company = ?")
            .bind(class)
            .bind(company.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

// ============================================================================
// Director Repository
// ============================================================================

/// Repository cho director_associations table
pub struct DirectorRepo;

impl DirectorRepo {
    /// Does the (company, class, unit) triple have a director, any account?
    pub async fn exists_for_unit(
        pool: &SqlitePool,
        company: Company,
        class: &str,
        group_id: GroupId,
    ) -> PersistenceResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM director_associations
                WHERE company = ? AND class = ? AND group_id = ? AND role = ?
            )
            "#,
        )
        .bind(company.as_str())
        .bind(class)
        .bind(group_id.get())
        .bind(DIRECTOR_ROLE)
        .fetch_one(pool)
        .await?;
        Ok(found != 0)
    }

    /// Does the class have a director under any unit other than `excluding`?
    pub async fn exists_for_other_unit(
        pool: &SqlitePool,
        company: Company,
        class: &str,
        excluding: GroupId,
    ) -> PersistenceResult<bool> {
        let found = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM director_associations
                WHERE company = ? AND class = ? AND group_id <> ? AND role = ?
            )
            "#,
        )
        .bind(company.as_str())
        .bind(class)
        .bind(excluding.get())
        .bind(DIRECTOR_ROLE)
        .fetch_one(pool)
        .await?;
        Ok(found != 0)
    }

    /// Insert a director row unless the exact tuple is already stored.
    ///
    /// Guard and insert are one statement, so two identical concurrent
    /// calls add one row between them.
    pub async fn insert_if_absent(
        pool: &SqlitePool,
        company: Company,
        class: &str,
        group_id: GroupId,
        nt_account: &str,
    ) -> PersistenceResult<u64> {
        let result = sqlx::query(
            r#"
            INSERT INTO director_associations (company, class, group_id, nt_account, role)
            SELECT ?, ?, ?, ?, ?
            WHERE NOT EXISTS (
                SELECT 1 FROM director_associations
                WHERE company = ? AND class = ? AND nt_account = ? AND group_id = ? AND role = ?
            )
            "#,
        )
        .bind(company.as_str())
        .bind(class)
        .bind(group_id.get())
        .bind(nt_account)
        .bind(DIRECTOR_ROLE)
        .bind(company.as_str())
        .bind(class)
        .bind(nt_account)
        .bind(group_id.get())
        .bind(DIRECTOR_ROLE)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Raw association rows for a class
    pub async fn get_by_class(
        pool: &SqlitePool,
        company: Company,
        class: &str,
    ) -> PersistenceResult<Vec<AssociationRow>> {
        let rows = sqlx::query_as::<_, AssociationRow>(
            r#"
            SELECT id, company, class, group_id, nt_account, role
            FROM director_associations
            WHERE company = ? AND class = ?
            ORDER BY id
            "#,
        )
        .bind(company.as_str())
        .bind(class)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Classes that have a director in the company
    pub async fn classes_for_company(
        pool: &SqlitePool,
        company: Company,
    ) -> PersistenceResult<Vec<String>> {
        let classes = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT class FROM director_associations
            WHERE company = ? AND role = ?
            ORDER BY class
            "#,
        )
        .bind(company.as_str())
        .bind(DIRECTOR_ROLE)
        .fetch_all(pool)
        .await?;
        Ok(classes)
    }

    /// Director rows matching company, unit label and class
    pub async fn search(
        pool: &SqlitePool,
        company: Company,
        label: &str,
        class: &str,
    ) -> PersistenceResult<Vec<DirectorRow>> {
        let sql = format!(
            "{} WHERE a.company = ? AND g.label = ? AND a.class = ? AND a.role = ? \
             ORDER BY a.nt_account",
            DIRECTOR_SELECT
        );
        let rows = sqlx::query_as::<_, DirectorRow>(&sql)
            .bind(company.as_str())
            .bind(label)
            .bind(class)
            .bind(DIRECTOR_ROLE)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Lấy tất cả directors
    pub async fn get_all(pool: &SqlitePool) -> PersistenceResult<Vec<DirectorRow>> {
        let sql = format!(
            "{} WHERE a.role = ? ORDER BY a.company, a.class, a.nt_account",
            DIRECTOR_SELECT
        );
        let rows = sqlx::query_as::<_, DirectorRow>(&sql)
            .bind(DIRECTOR_ROLE)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Lấy directors theo company
    pub async fn get_by_company(
        pool: &SqlitePool,
        company: Company,
    ) -> PersistenceResult<Vec<DirectorRow>> {
        let sql = format!(
            "{} WHERE a.company = ? AND a.role = ? ORDER BY a.class, a.nt_account",
            DIRECTOR_SELECT
        );
        let rows = sqlx::query_as::<_, DirectorRow>(&sql)
            .bind(company.as_str())
            .bind(DIRECTOR_ROLE)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Re-point the director of (company, unit label, class) at another account
    pub async fn update_account(
        pool: &SqlitePool,
        company: Company,
        label: &str,
        class: &str,
        nt_account: &str,
    ) -> PersistenceResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE director_associations SET nt_account = ?
            WHERE company = ? AND class = ? AND role = ?
              AND group_id IN (
                  SELECT group_id FROM business_units WHERE company = ? AND label = ?
              )
            "#,
        )
        .bind(nt_account)
        .bind(company.as_str())
        .bind(class)
        .bind(DIRECTOR_ROLE)
        .bind(company.as_str())
        .bind(label)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Xóa director rows của class
    pub async fn delete_for_class(
        pool: &SqlitePool,
        company: Company,
        class: &str,
    ) -> PersistenceResult<u64> {
        let result =
            sqlx::query("DELETE FROM director_associations WHERE class = ? AND company = ?")
                .bind(class)
                .bind(company.as_str())
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Đếm director rows
    pub async fn count(pool: &SqlitePool) -> PersistenceResult<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM director_associations")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}

// ============================================================================
// Account Directory Repository
// ============================================================================

/// Repository cho directory_accounts table
pub struct AccountDirectoryRepo;

impl AccountDirectoryRepo {
    /// Thêm account vào directory. Returns 0 if it was already known.
    pub async fn insert(pool: &SqlitePool, nt_account: &str) -> PersistenceResult<u64> {
        let result =
            sqlx::query("INSERT OR IGNORE INTO directory_accounts (nt_account) VALUES (?)")
                .bind(nt_account)
                .execute(pool)
                .await?;
        Ok(result.rows_affected())
    }

    /// Accounts in a company's namespace, sorted
    pub async fn get_by_company(
        pool: &SqlitePool,
        company: Company,
    ) -> PersistenceResult<Vec<String>> {
        // substr instead of LIKE: '\' and '_' stay literal
        let prefix = company.account_prefix();
        let accounts = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT nt_account FROM directory_accounts
            WHERE substr(nt_account, 1, ?) = ?
            ORDER BY nt_account
            "#,
        )
        .bind(prefix.len() as i64)
        .bind(prefix)
        .fetch_all(pool)
        .await?;
        Ok(accounts)
    }
}

// ============================================================================
// Database initialization
// ============================================================================

fn pool_options(max_connections: u32) -> PersistenceResult<SqlitePoolOptions> {
    if max_connections == 0 {
        return Err(PersistenceError::Configuration(
            "max_connections must be at least 1".to_string(),
        ));
    }
    Ok(SqlitePoolOptions::new().max_connections(max_connections))
}

/// Khởi tạo database connection pool
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
) -> PersistenceResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?;
    let pool = pool_options(max_connections)?.connect_with(options).await?;
    Ok(pool)
}

/// Tạo database mới với schema
pub async fn init_database(
    database_url: &str,
    max_connections: u32,
) -> PersistenceResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = pool_options(max_connections)?.connect_with(options).await?;

    create_schema(&pool).await?;

    Ok(pool)
}

/// Private in-memory database with the schema applied.
///
/// One connection that never expires: an in-memory SQLite database lives
/// exactly as long as its connection.
pub async fn in_memory_database() -> PersistenceResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    let pool = pool_options(1)?
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    create_schema(&pool).await?;

    Ok(pool)
}
