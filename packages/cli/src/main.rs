#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for rendering locality/region maps.
//!
//! Reads a CSV or `.xlsx` locality table and a `GeoJSON` boundary
//! collection, joins them on normalized names, and writes a standalone
//! Leaflet HTML page (plus, optionally, a themed `GeoJSON` file). The `check` subcommand
//! runs only the join and reports what did not match.

mod config;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use region_map_theme::JoinOutcome;
use region_map_theme_models::{GeometryFeature, LocalityRecord, MapArtifact};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "region_map", about = "Locality/region map renderer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the layered map to HTML
    Render {
        #[command(flatten)]
        input: InputArgs,

        /// Output HTML path
        #[arg(long, default_value = "map.html")]
        output: PathBuf,

        /// Also write matched boundaries, tagged with region and color, as `GeoJSON`
        #[arg(long)]
        geojson: Option<PathBuf>,

        /// Initial zoom level
        #[arg(long)]
        zoom: Option<u8>,

        /// Page title
        #[arg(long)]
        title: Option<String>,
    },
    /// Join the inputs and report unmatched names without rendering
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// CSV or `.xlsx` table of localities and their regions
    #[arg(long)]
    localities: PathBuf,

    /// `GeoJSON` `FeatureCollection` of boundary polygons
    #[arg(long)]
    boundaries: PathBuf,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Locality name column (overrides config)
    #[arg(long)]
    name_column: Option<String>,

    /// Region column (overrides config)
    #[arg(long)]
    region_column: Option<String>,

    /// Boundary name property (overrides config)
    #[arg(long)]
    name_property: Option<String>,
}

impl InputArgs {
    /// Loads the config file, if any, and applies flag overrides.
    fn config(&self) -> Result<Config, config::ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from_file(path)?,
            None => Config::default(),
        };

        if let Some(name) = &self.name_column {
            config.columns.name.clone_from(name);
        }
        if let Some(region) = &self.region_column {
            config.columns.region.clone_from(region);
        }
        if let Some(property) = &self.name_property {
            config.boundaries.name_property.clone_from(property);
        }

        Ok(config)
    }

    fn load(
        &self,
        config: &Config,
    ) -> Result<(Vec<LocalityRecord>, Vec<GeometryFeature>), Box<dyn std::error::Error>> {
        let localities =
            region_map_loader::load_localities_from_path(&self.localities, &config.columns)?;
        let boundaries = region_map_loader::load_boundaries_from_path(
            &self.boundaries,
            &config.boundaries.name_property,
        )?;
        Ok((localities, boundaries))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            geojson,
            zoom,
            title,
        } => {
            let mut config = input.config()?;
            if let Some(zoom) = zoom {
                config.map.zoom = zoom;
            }
            if let Some(title) = title {
                config.export.title = title;
            }
            render(&input, &config, &output, geojson.as_deref())?;
        }
        Commands::Check { input } => {
            let config = input.config()?;
            check(&input, &config)?;
        }
    }

    Ok(())
}

/// Runs the full pipeline and writes the requested outputs.
fn render(
    input: &InputArgs,
    config: &Config,
    output: &Path,
    geojson: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (localities, boundaries) = input.load(config)?;

    let artifact = region_map_theme::render(
        localities,
        &boundaries,
        &config.map.palette(),
        &config.map.options(),
    )?;
    log_unmatched(&artifact.unmatched_geometries, &artifact.unmatched_localities);

    log::info!("Writing map to {}", output.display());
    region_map_export::write_html(
        &artifact,
        &config.export,
        BufWriter::new(File::create(output)?),
    )?;

    if let Some(path) = geojson {
        log::info!("Writing themed GeoJSON to {}", path.display());
        region_map_export::write_feature_collection(
            &artifact,
            BufWriter::new(File::create(path)?),
        )?;
    }

    log_summary(&artifact);

    Ok(())
}

/// Runs only the join and prints unmatched names to stdout.
fn check(input: &InputArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let (localities, boundaries) = input.load(config)?;
    let outcome = region_map_theme::join::join(localities, &boundaries)?;

    print_check_report(&outcome, boundaries.len());

    Ok(())
}

fn print_check_report(outcome: &JoinOutcome, geometries: usize) {
    println!(
        "{geometries} boundaries, {} regions, {} matched, {} unmatched boundaries, {} unmatched localities",
        outcome.partition.len(),
        outcome.partition.feature_count(),
        outcome.unmatched_geometries.len(),
        outcome.unmatched_localities.len(),
    );

    for (region, features) in outcome.partition.iter() {
        println!("  {region}: {}", features.len());
    }

    if !outcome.unmatched_geometries.is_empty() {
        println!();
        println!("Boundaries with no locality row:");
        for feature in &outcome.unmatched_geometries {
            println!("  {}", feature.name);
        }
    }

    if !outcome.unmatched_localities.is_empty() {
        println!();
        println!("Localities with no boundary:");
        for locality in &outcome.unmatched_localities {
            println!("  {} ({})", locality.name, locality.region);
        }
    }
}

fn log_unmatched(geometries: &[GeometryFeature], localities: &[LocalityRecord]) {
    for feature in geometries {
        log::warn!("Boundary '{}' has no locality row", feature.name);
    }
    for locality in localities {
        log::warn!(
            "Locality '{}' ({}) has no matching boundary",
            locality.name,
            locality.region
        );
    }
}

fn log_summary(artifact: &MapArtifact) {
    log::info!("Rendered: {}", artifact.summary());
}
