//! Assignment commands

use anyhow::{Context, Result};
use director_business::DirectorService;
use director_core::{AssignmentOutcome, AssignmentRequest};
use std::path::Path;

use crate::db;

/// Run the assignment pipeline and report the outcome
pub async fn assign(
    db_path: &Path,
    company: &str,
    business_unit: &str,
    class: &str,
    account: &str,
) -> Result<()> {
    let service = DirectorService::new(db::connect(db_path).await?);
    let request = AssignmentRequest::new(company, business_unit, class, account);

    let outcome = service
        .assign_director(&request)
        .await
        .context("Assignment failed")?;
    print_outcome(&request, &outcome);

    service.database().close().await;
    Ok(())
}

fn print_outcome(request: &AssignmentRequest, outcome: &AssignmentOutcome) {
    match outcome {
        AssignmentOutcome::Assigned { rows_inserted: 0 } => {
            println!("ℹ️  {} / {} already has this director", request.company, request.class);
        }
        AssignmentOutcome::Assigned { .. } => {
            println!(
                "✅ Director assigned: {} / {} / {}",
                request.company, request.business_unit, request.class
            );
        }
        rejected => println!("❌ {}", rejected.message()),
    }
}

/// Remove the director association of a class
pub async fn unassign(db_path: &Path, company: &str, class: &str) -> Result<()> {
    let service = DirectorService::new(db::connect(db_path).await?);

    let removed = service
        .delete_director_association(class, company)
        .await
        .context("Failed to remove director")?;

    if removed == 0 {
        println!("ℹ️  No director recorded for {} / {}", company, class);
    } else {
        println!("🗑️  Removed {} director row(s) for {} / {}", removed, company, class);
    }

    service.database().close().await;
    Ok(())
}
