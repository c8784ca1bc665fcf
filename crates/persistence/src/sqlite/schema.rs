//! Database schema definitions
//!
//! Row types cho sqlx mapping từ SQLite tables, plus the bootstrap DDL.
//!
//! | table                   | holds                                            |
//! |-------------------------|--------------------------------------------------|
//! | `business_units`        | group id + label per company                     |
//! | `bu_classes`            | classes registered as assignable to a BU         |
//! | `director_associations` | (company, class, group id, account, role) rows   |
//! | `directory_accounts`    | known domain accounts                            |

use crate::error::PersistenceResult;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS business_units (
    group_id INTEGER PRIMARY KEY,
    company TEXT NOT NULL,
    label TEXT NOT NULL,
    UNIQUE(company, label)
);

CREATE TABLE IF NOT EXISTS bu_classes (
    group_id INTEGER NOT NULL,
    class TEXT NOT NULL,
    company TEXT NOT NULL,
    PRIMARY KEY (group_id, class, company),
    FOREIGN KEY (group_id) REFERENCES business_units(group_id)
);

CREATE TABLE IF NOT EXISTS director_associations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    company TEXT NOT NULL,
    class TEXT NOT NULL,
    group_id INTEGER NOT NULL,
    nt_account TEXT NOT NULL,
    role TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_director_associations_class
    ON director_associations (company, class, role);

CREATE TABLE IF NOT EXISTS directory_accounts (
    nt_account TEXT PRIMARY KEY
);
"#;

/// Create every table if it is missing. Safe to run repeatedly.
pub async fn create_schema(pool: &SqlitePool) -> PersistenceResult<()> {
    sqlx::query(SCHEMA).execute(pool).await?;
    Ok(())
}

/// Row type cho bảng `business_units`
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessUnitRow {
    pub group_id: i64,
    pub company: String,
    pub label: String,
}

/// Row type cho bảng `director_associations`
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationRow {
    pub id: i64,
    pub company: String,
    pub class: String,
    pub group_id: i64,
    pub nt_account: String,
    pub role: String,
}

/// A director association joined with its business-unit label.
///
/// This is the shape every listing endpoint returns.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectorRow {
    pub company: String,
    pub business_unit: String,
    pub class: String,
    pub role: String,
    pub nt_account: String,
}
