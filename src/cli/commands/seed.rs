//! Seed command handler

use crate::config::Config;
use crate::services::seed::seed_books;
use crate::state::SharedState;

pub async fn cmd_seed(config: &Config) -> anyhow::Result<()> {
    let shared = SharedState::new(config.clone()).await?;

    println!("Seeding book catalogue...");
    let report = seed_books(shared.book_service.as_ref()).await?;

    println!("{:-<50}", "");
    println!("Added:   {}", report.inserted);
    println!("Skipped: {} (already present)", report.skipped);
    println!("Total books in database: {}", report.total_books);

    Ok(())
}
