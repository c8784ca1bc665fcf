//! Listing commands

use anyhow::Result;
use director_business::DirectorService;
use director_persistence::DirectorRow;
use std::path::Path;

use crate::db;

/// List directors, optionally for one company
pub async fn list_directors(db_path: &Path, company: Option<&str>) -> Result<()> {
    let service = DirectorService::new(db::connect(db_path).await?);

    let rows = match company {
        Some(company) => service.list_directors_for_company(company).await?,
        None => service.list_all_directors().await?,
    };

    if rows.is_empty() {
        println!("No directors assigned");
    } else {
        print_table(&rows);
    }

    service.database().close().await;
    Ok(())
}

fn print_table(rows: &[DirectorRow]) {
    println!(
        "{:<8} {:<20} {:<12} {:<24}",
        "COMPANY", "BUSINESS UNIT", "CLASS", "ACCOUNT"
    );
    println!("{}", "-".repeat(67));
    for row in rows {
        println!(
            "{:<8} {:<20} {:<12} {:<24}",
            row.company, row.business_unit, row.class, row.nt_account
        );
    }
    println!();
    println!("Total: {} director(s)", rows.len());
}

/// Directory accounts in the company's namespace
pub async fn list_accounts(db_path: &Path, company: &str) -> Result<()> {
    let service = DirectorService::new(db::connect(db_path).await?);

    let accounts = service.list_directory_accounts(company).await?;
    for account in &accounts {
        println!("{}", account);
    }
    println!("Total: {} account(s)", accounts.len());

    service.database().close().await;
    Ok(())
}
