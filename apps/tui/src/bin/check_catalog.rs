use catalog_browser::catalog::{parse_catalog, Catalog};
use catalog_browser::domain::parse_display_date;
use color_eyre::Result;
use dotenv::dotenv;
use std::env;

/// Parses a catalog file and reports what a browsing session would see.
/// Meant for catalog authors checking an edit before publishing it.
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let path = env::args().nth(1).unwrap_or_else(|| {
        env::var("CATALOG_SOURCE").unwrap_or_else(|_| "data/catalog.json".to_string())
    });

    println!("Checking catalog at {path}...");

    let bytes = tokio::fs::read(&path).await?;
    let episodes = parse_catalog(&bytes)?;
    println!("Parsed {} records", episodes.len());

    let mut date_problems = 0;
    for episode in &episodes {
        if parse_display_date(&episode.date).is_none() {
            date_problems += 1;
            println!(
                "- record {} ({:?}): unparseable date {:?}",
                episode.id, episode.title, episode.date
            );
        }
    }

    let catalog = Catalog::from_episodes(episodes);
    println!("Visible: {}  Hidden: {}", catalog.len(), catalog.hidden_count());

    for season in catalog.seasons() {
        println!("- {}: {} episodes", season.label, season.count);
    }

    if let Some(latest) = catalog.latest() {
        println!("Latest: {} ({})", latest.episode.title, latest.episode.date);
    }

    if date_problems > 0 {
        println!("{date_problems} records have unparseable dates and will sort last");
    }

    Ok(())
}
