use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use eframe::egui;
use sales_dashboard::app::SalesDashboardApp;
use sales_dashboard::config::DashboardConfig;
use sales_dashboard::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "sales-dashboard")]
#[command(about = "Explore a sales workbook and forecast daily sales with linear regression")]
#[command(version)]
struct Cli {
    /// JSON settings file (target column, split seed, input defaults)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Workbook or table to open on startup
    dataset: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    log::info!("target column {:?}, features {:?}", config.target_column, config.feature_columns);

    let mut state = AppState::new(config);
    if let Some(path) = &cli.dataset {
        state.load_path(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Analisis dan Prediksi Penjualan",
        options,
        Box::new(|_cc| Ok(Box::new(SalesDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
