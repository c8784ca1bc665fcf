//! Database initialization and status

use anyhow::{Context, Result};
use director_core::{Company, GroupId};
use director_persistence::{AccountDirectoryRepo, BusinessUnitRepo, ClassRepo, Database};
use sqlx::SqlitePool;
use std::path::Path;

fn database_url(db_path: &Path) -> String {
    format!("sqlite:{}?mode=rwc", db_path.display())
}

/// Initialize the database with schema
pub async fn init_database(db_path: &Path, force: bool, seed: bool) -> Result<()> {
    if force && db_path.exists() {
        std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        println!("🗑️  Removed existing database");
    }

    println!("📦 Creating schema...");
    let db = Database::init(&database_url(db_path), 1)
        .await
        .context("Failed to initialize database")?;

    if seed {
        seed_demo_data(db.pool()).await?;
    }

    db.close().await;
    Ok(())
}

/// Show database status
pub async fn show_status(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        println!("❌ Database not found at {:?}", db_path);
        println!("   Run 'director init' to create the database");
        return Ok(());
    }

    let db = connect(db_path).await?;
    let pool = db.pool();

    println!("📊 Database Status");
    println!("   Path: {:?}", db_path);
    println!();

    println!("   Business units:     {}", count(pool, "business_units").await?);
    println!("   Registered classes: {}", count(pool, "bu_classes").await?);
    println!("   Directors:          {}", count(pool, "director_associations").await?);
    println!("   Directory accounts: {}", count(pool, "directory_accounts").await?);

    db.close().await;
    Ok(())
}

async fn count(pool: &SqlitePool, table: &str) -> Result<i64> {
    let (n,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .with_context(|| format!("Failed to count {table}"))?;
    Ok(n)
}

/// Seed demo units, classes and directory accounts
async fn seed_demo_data(pool: &SqlitePool) -> Result<()> {
    println!("🌱 Seeding demo data...");

    let units = [
        (Company::Futa, 10, "Sales", &["C100", "C101"][..]),
        (Company::Futa, 11, "Marketing", &["C200"][..]),
        (Company::Fute, 20, "Operations", &["E100"][..]),
        (Company::Futi, 30, "Research", &["N100", "N101"][..]),
    ];

    for (company, group_id, label, classes) in units {
        if BusinessUnitRepo::resolve(pool, company, label).await?.is_none() {
            BusinessUnitRepo::insert(pool, company, GroupId(group_id), label).await?;
        }
        for class in classes {
            ClassRepo::register(pool, company, GroupId(group_id), class).await?;
        }
    }

    for account in ["ASIA\\jdoe", "ASIA\\asmith", "EUR\\anna", "NA\\bob"] {
        AccountDirectoryRepo::insert(pool, account).await?;
    }

    Ok(())
}

/// Connect to an initialized database
pub async fn connect(db_path: &Path) -> Result<Database> {
    if !db_path.exists() {
        anyhow::bail!("Database not found at {:?}. Run 'director init' first.", db_path);
    }
    tracing::debug!(path = %db_path.display(), "connecting");
    Database::connect(&format!("sqlite:{}", db_path.display()), 1)
        .await
        .context("Failed to connect to database. Run 'director init' first.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use director_persistence::DirectorRepo;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_with_seed_is_repeatable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("director.db");

        init_database(&path, false, true).await.unwrap();
        init_database(&path, false, true).await.unwrap();

        let db = connect(&path).await.unwrap();
        assert_eq!(count(db.pool(), "business_units").await.unwrap(), 4);
        assert_eq!(count(db.pool(), "bu_classes").await.unwrap(), 6);
        assert_eq!(DirectorRepo::count(db.pool()).await.unwrap(), 0);
        db.close().await;
    }

    #[tokio::test]
    async fn test_connect_requires_init() {
        let dir = TempDir::new().unwrap();
        assert!(connect(&dir.path().join("missing.db")).await.is_err());
    }
}
