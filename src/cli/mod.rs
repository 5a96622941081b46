//! Command-line interface for moodboard.
//!
//! Provides commands for composing a mood board from a catalog and profile,
//! showing exhibit details, listing generated tips, and inspecting config.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};

use crate::config::{self, ResolvedConfig};
use crate::core::{generate_tips, BoardOptions, MoodBoard, TipSelector};
use crate::detail::ExhibitDetail;
use crate::domain::{Content, PlacedItem, UserContext};
use crate::library::{load_profile, Catalog};

/// moodboard - Personalized cultural-discovery mood board
#[derive(Parser, Debug)]
#[command(name = "moodboard")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Input files and clock shared by the commands
#[derive(clap::Args, Debug, Clone)]
pub struct Inputs {
    /// Catalog JSON (defaults to the configured catalog)
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Profile JSON (defaults to the configured profile)
    #[arg(short, long)]
    pub profile: Option<PathBuf>,

    /// Compute as of this date (YYYY-MM-DD, midnight UTC) instead of now
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compose and print the mood board
    Board {
        #[command(flatten)]
        inputs: Inputs,

        /// Seed for tip variety (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Print the board as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details of an exhibit
    Show {
        /// Exhibit ID
        exhibit_id: String,

        #[command(flatten)]
        inputs: Inputs,
    },

    /// List the generated tips
    Tips {
        #[command(flatten)]
        inputs: Inputs,

        /// Seed for tip variety (overrides config)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Board { inputs, seed, json } => show_board(&inputs, seed, json).await,
            Commands::Show { exhibit_id, inputs } => show_exhibit(&exhibit_id, &inputs).await,
            Commands::Tips { inputs, seed } => list_tips(&inputs, seed).await,
            Commands::Config => show_config(),
        }
    }
}

impl Inputs {
    fn now(&self) -> DateTime<Utc> {
        self.date
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc())
            .unwrap_or_else(Utc::now)
    }

    async fn load(&self, config: &ResolvedConfig) -> Result<(Catalog, UserContext)> {
        let catalog_path = self.catalog.clone().unwrap_or_else(|| config.catalog.clone());
        let profile_path = self.profile.clone().unwrap_or_else(|| config.profile.clone());

        let catalog = Catalog::load(&catalog_path).await?;
        let user = load_profile(&profile_path).await?;
        Ok((catalog, user))
    }
}

fn board_options(config: &ResolvedConfig, seed: Option<u64>) -> BoardOptions {
    let mut options = config.curation.board_options();
    if let Some(seed) = seed {
        options.aggregate.tip_selector = TipSelector::Seeded(seed);
    }
    options
}

/// Compose and print the mood board
async fn show_board(inputs: &Inputs, seed: Option<u64>, json: bool) -> Result<()> {
    let config = config::config()?;
    let (catalog, user) = inputs.load(config).await?;

    let board = MoodBoard::compose(&catalog, &user, inputs.now(), &board_options(config, seed))
        .context("Failed to compose mood board")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    if board.is_empty() {
        println!("Nothing to show yet. Add interests and memberships to your profile.");
        return Ok(());
    }

    println!(
        "{:<4} {:<9} {:<5} {:>6} {:<11} {}",
        "#", "CELL", "SIZE", "SCORE", "TYPE", "TITLE"
    );
    println!("{}", "-".repeat(75));

    for (index, placed) in board.items.iter().enumerate() {
        println!(
            "{:<4} {:<9} {:<5} {:>6} {:<11} {}",
            index,
            format!("r{}c{}", placed.position.row, placed.position.col),
            format!("{}x{}", placed.footprint.columns, placed.footprint.rows),
            placed.score(),
            placed.item().kind().to_string(),
            card_title(placed, &catalog),
        );
    }

    println!();
    for row in board.cell_map() {
        let cells: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Some(index) => format!("{:>3}", index),
                None => "  .".to_string(),
            })
            .collect();
        println!("{}", cells.join(" "));
    }

    eprintln!("\n[Board {} with {} cards]", board.fingerprint(), board.len());

    Ok(())
}

fn card_title(placed: &PlacedItem, catalog: &Catalog) -> String {
    match &placed.item().content {
        Content::Exhibit(exhibit) => exhibit.title.clone(),
        Content::Tip(tip) => tip.title.clone(),
        Content::ReciprocalOffer(offer) => {
            let name = |id: &str| {
                catalog
                    .institution(id)
                    .map(|i| i.display_name().to_string())
                    .unwrap_or_else(|| id.to_string())
            };
            format!(
                "{} members: {}",
                name(&offer.from_institution_id),
                name(&offer.to_institution_id)
            )
        }
    }
}

/// Show details of an exhibit
async fn show_exhibit(exhibit_id: &str, inputs: &Inputs) -> Result<()> {
    let config = config::config()?;
    let (catalog, _) = inputs.load(config).await?;

    let exhibit = catalog.require_exhibit(exhibit_id)?;
    let detail = ExhibitDetail::build(exhibit, &catalog, inputs.now());

    println!("{}", detail.title);
    if let Some(name) = &detail.institution_name {
        println!("at {}", name);
    }
    if !detail.badges.is_empty() {
        let badges: Vec<String> = detail.badges.iter().map(ToString::to_string).collect();
        println!("[{}]", badges.join("] ["));
    }
    if !detail.description.is_empty() {
        println!("\n{}", detail.description);
    }

    if detail.is_permanent {
        println!("\nPermanent Collection: available year-round.");
    }
    if let Some(opens) = &detail.opens {
        println!("\nOpens: {}", opens);
    }
    if let Some(closes) = &detail.closes {
        println!("Closes: {}", closes);
    }
    if let Some(label) = &detail.remaining_label {
        println!("{}", label);
    }
    if let Some(free) = &detail.free_access {
        println!("\nFree Access: {}", free);
    }

    if let Some(address) = &detail.address {
        println!("\nLocation: {}", address);
        if let Some(neighborhood) = &detail.neighborhood {
            println!("          {}", neighborhood);
        }
    }
    if let Some(url) = &detail.maps_url {
        println!("Directions: {}", url);
    }
    if let (Some(label), Some(website)) = (&detail.website_label, &detail.website) {
        println!("{}: {}", label, website);
    }

    if !detail.tags.is_empty() {
        println!("\nTags: {}", detail.tags.join(", "));
    }

    Ok(())
}

/// List the generated tips
async fn list_tips(inputs: &Inputs, seed: Option<u64>) -> Result<()> {
    let config = config::config()?;
    let (catalog, user) = inputs.load(config).await?;
    let selector = board_options(config, seed).aggregate.tip_selector;

    for tip in generate_tips(&catalog, &user, selector) {
        println!("{:<16} {:<13} {}", tip.id, tip.label, tip.title);
        println!("{:<30} {}", "", tip.description);
    }

    Ok(())
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let config = config::config()?;

    println!("moodboard Configuration");
    println!("=======================");
    println!();
    println!(
        "Config file: {}",
        config
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none, using defaults)".to_string())
    );
    println!("Home:        {}", config.home.display());
    println!("Catalog:     {}", config.catalog.display());
    println!("Profile:     {}", config.profile.display());
    println!();
    println!("Curation:");
    println!("  ending_soon_days: {}", config.curation.ending_soon_days);
    println!("  max_rows:         {}", config.curation.max_rows);
    println!(
        "  tip_seed:         {}",
        config
            .curation
            .tip_seed
            .map(|s| s.to_string())
            .unwrap_or_else(|| "(deterministic)".to_string())
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_command_parsing() {
        let cli = Cli::try_parse_from([
            "moodboard",
            "board",
            "--catalog",
            "catalog.json",
            "--date",
            "2026-06-15",
            "--seed",
            "3",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Board { inputs, seed, json } => {
                assert_eq!(inputs.catalog, Some(PathBuf::from("catalog.json")));
                assert_eq!(inputs.profile, None);
                assert_eq!(inputs.date, NaiveDate::from_ymd_opt(2026, 6, 15));
                assert_eq!(seed, Some(3));
                assert!(json);
            }
            other => panic!("Expected Board, got {:?}", other),
        }
    }

    #[test]
    fn test_inputs_date_is_midnight_utc() {
        let inputs = Inputs {
            catalog: None,
            profile: None,
            date: NaiveDate::from_ymd_opt(2026, 1, 2),
        };
        assert_eq!(inputs.now().to_rfc3339(), "2026-01-02T00:00:00+00:00");
    }

    #[test]
    fn test_show_command_parsing() {
        let cli = Cli::try_parse_from(["moodboard", "show", "ex-1", "-p", "me.json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Show { ref exhibit_id, .. } if exhibit_id == "ex-1"
        ));
    }
}
