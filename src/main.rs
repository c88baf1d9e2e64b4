mod analysis;
mod app;
mod color;
mod config;
mod data;
mod report;
mod session;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::MetaboliteDashboardApp;
use clap::Parser;
use eframe::egui;

use analysis::dispatch::{evaluate, Action};
use config::{DashboardConfig, DatasetPaths};
use data::filter::TypeStrainFilter;
use session::Session;

/// Explore microbial metabolite production, utilization and antimicrobial
/// datasets by type-strain status.
#[derive(Parser, Debug)]
#[command(name = "metabolite-dashboard", version)]
struct Cli {
    /// JSON configuration file (dataset paths, header names, ranking length).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding prod.csv, util.csv and anti.csv; overrides the
    /// dataset paths of the configuration.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Length of the top-N rankings.
    #[arg(long)]
    top_n: Option<usize>,

    /// Print results to stdout instead of opening the dashboard.
    #[arg(long)]
    report: bool,

    /// Like --report, but as JSON.
    #[arg(long)]
    json: bool,

    /// Leave the "Show Type Strain (1)" checkbox unticked.
    #[arg(long)]
    hide_type_strain: bool,

    /// Leave the "Show Non-Type Strain (0)" checkbox unticked.
    #[arg(long)]
    hide_non_type_strain: bool,

    /// Analysis to include in the report, e.g. prod-count, util-species,
    /// anti-metabolites. Repeatable.
    #[arg(long = "action")]
    actions: Vec<Action>,

    /// Include all nine analyses in the report.
    #[arg(long)]
    all_actions: bool,
}

impl Cli {
    fn dashboard_config(&self) -> Result<DashboardConfig> {
        let mut config = DashboardConfig::load(self.config.as_deref())?;
        if let Some(dir) = &self.data_dir {
            config.datasets = DatasetPaths::in_dir(dir);
        }
        if let Some(n) = self.top_n {
            config.top_n = n;
        }
        Ok(config)
    }

    fn filter(&self) -> TypeStrainFilter {
        TypeStrainFilter {
            show_type_strain: !self.hide_type_strain,
            show_non_type_strain: !self.hide_non_type_strain,
        }
    }

    fn selected_actions(&self) -> Vec<Action> {
        let mut actions = if self.all_actions {
            Action::all()
        } else {
            self.actions.clone()
        };
        actions.sort();
        actions.dedup();
        actions
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.dashboard_config()?;
    let session = Session::load(config).context("loading datasets")?;

    if cli.report || cli.json {
        let filter = cli.filter();
        let results = evaluate(&session, &filter, &cli.selected_actions())?;
        if cli.json {
            println!("{}", report::render_json(&filter, &results)?);
        } else {
            print!("{}", report::render_text(&results));
        }
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Metabolites Overview",
        options,
        Box::new(|_cc| Ok(Box::new(MetaboliteDashboardApp::new(session)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard exited with an error: {e}"))
}
