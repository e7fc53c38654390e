//! Shared helpers for commands
//!
//! Level 4 - Loading and formatting utilities

use std::path::Path;

use anyhow::Result;

use fairway_core::{validate_holes, JsonFileStore, Tour, TourStore};

/// Open a tour file through the JSON store rooted at its directory
pub fn open_tour(path: &Path) -> Result<(JsonFileStore, Tour)> {
    let (store, id) = JsonFileStore::for_file(path)?;
    let tour = store.load(&id)?;

    tracing::info!(
        "Loaded tour {} ({} players, {} teams, {} rounds)",
        tour.name,
        tour.players.len(),
        tour.teams.len(),
        tour.rounds.len()
    );

    // Strict layout check; scoring itself falls back to default par and index
    for round in &tour.rounds {
        if let Err(e) = validate_holes(&round.holes) {
            tracing::warn!("Round {}: {}", round.id, e);
        }
    }

    Ok((store, tour))
}

/// "E", "+3", "-2"
pub fn format_to_par(to_par: i32) -> String {
    match to_par {
        0 => "E".to_string(),
        n if n > 0 => format!("+{}", n),
        n => n.to_string(),
    }
}

/// Position movement column: "+2", "-1", "-" when unknown or unchanged
pub fn format_change(change: Option<i32>) -> String {
    match change {
        Some(n) if n > 0 => format!("+{}", n),
        Some(n) if n < 0 => n.to_string(),
        _ => "-".to_string(),
    }
}
