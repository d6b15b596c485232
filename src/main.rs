//! VM Explorer - Vaca Muerta well data explorer
//!
//! Loads the well datasets once, applies the filter flags and prints the
//! resulting dashboard outputs.
//!
//! # Usage
//!
//! ```bash
//! # Summary for all wells
//! vm-explorer --data-dir ./data
//!
//! # One operator, 2019-2022, gas map with the bottom half hidden
//! vm-explorer --company YPF --year-min 2019 --year-max 2022 --map-metric gas --min-percentile 50
//!
//! # Full output bundle as JSON
//! vm-explorer --json > outputs.json
//! ```
//!
//! # Environment Variables
//!
//! - `VM_EXPLORER_CONFIG`: Path to the TOML config (default: ./explorer.toml)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use vm_explorer::config::DashboardConfig;
use vm_explorer::dataset::export;
use vm_explorer::types::{DashboardOutputs, FilterCriteria, MapMetric, Selection, YearRange};
use vm_explorer::{BaseTables, Engine, EngineState, RecomputeRequest};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "vm-explorer")]
#[command(about = "Vaca Muerta well data explorer")]
#[command(version)]
struct CliArgs {
    /// Path to explorer.toml (overrides VM_EXPLORER_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory that relative data paths resolve against
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Operator to include (repeatable; "All" or none for every operator)
    #[arg(long)]
    company: Vec<String>,

    /// Field to include (repeatable)
    #[arg(long)]
    field: Vec<String>,

    /// Well type to include (repeatable)
    #[arg(long)]
    well_type: Vec<String>,

    /// First year to include (default: earliest year in the data)
    #[arg(long)]
    year_min: Option<i32>,

    /// Last year to include (default: latest year in the data)
    #[arg(long)]
    year_max: Option<i32>,

    /// Map bubble metric: oil or gas
    #[arg(long)]
    map_metric: Option<MapMetric>,

    /// Hide wells below this percentile of the map metric (outside 0-100 shows all)
    #[arg(long, allow_hyphen_values = true)]
    min_percentile: Option<i32>,

    /// Number of wells in each top-N ranking
    #[arg(long)]
    top: Option<usize>,

    /// Print the full output bundle as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Write the filtered production rows to this CSV file
    #[arg(long, value_name = "PATH")]
    export_production: Option<PathBuf>,

    /// Write the filtered frac rows (with computed columns) to this CSV file
    #[arg(long, value_name = "PATH")]
    export_frac: Option<PathBuf>,
}

fn load_config(args: &CliArgs) -> Result<DashboardConfig> {
    let mut config = match &args.config {
        Some(path) => DashboardConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DashboardConfig::load(),
    };
    if let Some(top) = args.top {
        config.ranking.top_n = top;
        config.validate().context("Invalid --top")?;
    }
    Ok(config)
}

fn build_request(args: &CliArgs, config: &DashboardConfig, engine: &Engine) -> RecomputeRequest {
    let bounds = engine.year_bounds().unwrap_or(YearRange::ALL);
    let criteria = FilterCriteria {
        company: Selection::from_values(&args.company),
        field: Selection::from_values(&args.field),
        well_type: Selection::from_values(&args.well_type),
        year_range: YearRange::new(
            args.year_min.unwrap_or(bounds.min),
            args.year_max.unwrap_or(bounds.max),
        ),
    };

    let mut map = config.initial_map_settings();
    if let Some(metric) = args.map_metric {
        map.metric = metric;
    }
    if let Some(p) = args.min_percentile {
        map.min_percentile = p;
    }
    RecomputeRequest { criteria, map }
}

fn print_summary(state: &EngineState, outputs: &DashboardOutputs) {
    let k = &outputs.kpis;
    println!("Criteria");
    println!("  company:    {}", state.criteria.company);
    println!("  field:      {}", state.criteria.field);
    println!("  well type:  {}", state.criteria.well_type);
    println!(
        "  years:      {}-{}",
        state.criteria.year_range.min, state.criteria.year_range.max
    );
    println!();
    println!("Production");
    println!("  wells:              {}", k.production.n_wells);
    println!("  cum oil (km³):      {:.2}", k.production.total_oil);
    println!("  cum gas (Mm³):      {:.2}", k.production.total_gas);
    println!("  cum water (km³):    {:.2}", k.production.total_water);
    println!();
    println!("Frac");
    println!("  wells:              {}", k.frac.n_frac_wells);
    println!("  avg lateral (ft):   {:.0}", k.frac.avg_lateral_length);
    println!("  avg stages:         {:.1}", k.frac.avg_stages);
    println!("  proppant (klb):     {:.2}", k.frac.total_proppant_klb);
    println!("  fluid (kbbl):       {:.2}", k.frac.total_fluid_kbbl);
    println!("  proppant (lb/ft):   {:.1}", k.frac.avg_proppant_intensity);
    println!("  fluid (bbl/ft):     {:.2}", k.frac.avg_fluid_intensity);

    if outputs.filtered_drilling.is_some() || outputs.filtered_completion.is_some() {
        println!();
        println!("Activity");
        println!("  wells drilled:      {}", k.activity.total_wells_drilled);
        println!("  meters (km):        {:.2}", k.activity.total_meters_drilled_km);
        println!("  completions:        {}", k.activity.total_completions);
    }

    if !outputs.wells_by_type.is_empty() {
        println!();
        println!("Wells by type");
        for row in &outputs.wells_by_type {
            println!("  {:<20} {}", row.well_type, row.n_wells);
        }
    }

    println!();
    println!("Top wells by cumulative oil (m³)");
    for (rank, well) in outputs.top_oil_wells.iter().enumerate() {
        println!("  {:>3}. {:<30} {:.1}", rank + 1, well.well_name, well.value);
    }

    println!();
    println!(
        "Map: {} wells shown ({}, max oil {:.1}, max gas {:.1})",
        outputs.map.points.len(),
        if outputs.map.metric_label.is_empty() { "-" } else { outputs.map.metric_label.as_str() },
        outputs.map.max_oil,
        outputs.map.max_gas
    );

    for c in &outputs.intensity_response {
        println!(
            "  {} vs {}: r={:.3} p={:.4} (n={})",
            c.treatment, c.response, c.r_value, c.p_value, c.sample_count
        );
    }
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let config = load_config(&args)?;

    let tables = BaseTables::load(&config.data, args.data_dir.as_deref())
        .context("Failed to load well datasets")?;
    let engine = Engine::new(Arc::new(tables), &config);

    let request = build_request(&args, &config, &engine);
    let initial = EngineState::initial(request.criteria.clone(), request.map);
    let state = engine
        .recompute(&initial, request)
        .context("Failed to compute dashboard outputs")?;
    let Some(outputs) = state.outputs.as_ref() else {
        return Err(anyhow::anyhow!("Recomputation produced no outputs"));
    };

    if let Some(path) = &args.export_production {
        export::export_to_path(&outputs.filtered_production, path)
            .with_context(|| format!("Failed to export production to {}", path.display()))?;
    }
    if let Some(path) = &args.export_frac {
        export::export_to_path(&outputs.filtered_frac, path)
            .with_context(|| format!("Failed to export frac to {}", path.display()))?;
    }

    if args.json {
        let json = serde_json::to_string_pretty(&state).context("Failed to serialize outputs")?;
        println!("{json}");
    } else {
        print_summary(&state, outputs);
    }

    info!(generation = state.generation, "Done");
    Ok(())
}
