use color_eyre::Result;
use crossterm::event::{self, Event};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::Stdout;
use tokio::task::JoinHandle;

use crate::app::{handle_input, App};
use crate::catalog::{load_catalog, Catalog, CatalogError, CatalogSource, Episode};
use crate::ui;

type LoadTask = JoinHandle<Result<Vec<Episode>, CatalogError>>;

/// Run the application in headless mode (no UI)
pub async fn run_headless(source: &CatalogSource, json: bool) -> Result<()> {
    let episodes = load_catalog(source).await?;
    let catalog = Catalog::from_episodes(episodes);
    let stats = build_headless_stats(&catalog);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        render_headless_stats(source, &stats);
    }

    Ok(())
}

fn render_headless_stats(source: &CatalogSource, stats: &HeadlessStats) {
    println!("\nPodcast Catalog Stats");
    println!("=====================");
    println!("Source: {}", source.describe());
    println!("Visible episodes: {}", stats.visible_episodes);
    println!("Hidden episodes: {}", stats.hidden_episodes);

    println!("\nEpisodes by Season:");
    for season in &stats.seasons {
        println!("- {}: {}", season.label, season.episodes);
    }

    if let Some(latest) = &stats.latest {
        println!("\nLatest Episode:");
        println!("- {} | {} | {}", latest.title, latest.season, latest.date);
    }
}

fn build_headless_stats(catalog: &Catalog) -> HeadlessStats {
    let seasons = catalog
        .seasons()
        .into_iter()
        .map(|summary| HeadlessSeason {
            label: summary.label,
            episodes: summary.count,
        })
        .collect();

    let latest = catalog.latest().map(|entry| HeadlessEpisode {
        title: entry.episode.title.clone(),
        season: entry.episode.season.clone(),
        date: entry.episode.date.clone(),
    });

    HeadlessStats {
        visible_episodes: catalog.len(),
        hidden_episodes: catalog.hidden_count(),
        seasons,
        latest,
    }
}

#[derive(serde::Serialize)]
struct HeadlessStats {
    visible_episodes: usize,
    hidden_episodes: usize,
    seasons: Vec<HeadlessSeason>,
    latest: Option<HeadlessEpisode>,
}

#[derive(serde::Serialize)]
struct HeadlessSeason {
    label: String,
    episodes: usize,
}

#[derive(serde::Serialize)]
struct HeadlessEpisode {
    title: String,
    season: String,
    date: String,
}

/// Run the main application event loop
pub async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    load: LoadTask,
) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    let mut load = Some(load);

    loop {
        // Update animations
        app.update();

        // Draw the UI with better error context
        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        // Handle events with improved error context
        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    handle_input(app, key.code);
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    // Force a redraw after resize
                    if terminal.draw(|f| ui::ui(app, f)).is_err() {
                        // Non-fatal redraw error
                    }
                }
                Ok(Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_))
                | Err(_) => {
                    // Ignore non-key events for now
                }
            }
        }

        // The single asynchronous suspension point: settle the catalog
        // fetch once its task finishes. There is no retry.
        if load.as_ref().is_some_and(JoinHandle::is_finished) {
            if let Some(task) = load.take() {
                match task.await {
                    Ok(result) => app.finish_load(result),
                    Err(join_error) => app.fail_load(&join_error.to_string()),
                }

                // Force a redraw to show the settled state
                if terminal.draw(|f| ui::ui(app, f)).is_err() {
                    // Non-fatal redraw error
                }
            }
        }
    }
    Ok(())
}
