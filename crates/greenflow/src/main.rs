mod bootstrap;

use anyhow::{Context, Result};
use greenflow_core::settings::Settings;
use greenflow_core::time_utils::TimezoneHandler;
use greenflow_data::aggregator::Aggregator;
use greenflow_data::dataset::Dataset;
use greenflow_ui::app::App;
use greenflow_ui::report::render_report;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used()?;

    bootstrap::ensure_directories()?;
    let log_file = match (&settings.log_file, settings.view.as_str()) {
        (Some(path), _) => Some(path.clone()),
        (None, "dashboard") => Some(bootstrap::default_log_file()),
        (None, _) => None,
    };
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("GreenFlow v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data: {}, View: {}, Theme: {}, Timezone: {}",
        settings.data.display(),
        settings.view,
        settings.theme,
        settings.timezone
    );

    let tz = TimezoneHandler::new(&settings.timezone)?;
    let dataset = Dataset::load(&settings.data, &tz).map_err(|e| {
        if e.is_data_load() {
            anyhow::Error::new(e).context(format!(
                "Failed to load dataset from {} (expected .csv or .jsonl sensor files)",
                settings.data.display()
            ))
        } else {
            anyhow::Error::new(e).context("Failed to build dataset")
        }
    })?;
    tracing::info!(
        "Loaded {} readings across {} units",
        dataset.len(),
        dataset.units().len()
    );

    let filter = settings
        .initial_filter(dataset.date_bounds())
        .context("Invalid --from/--to")?;

    match settings.view.as_str() {
        "report" => {
            let summary = Aggregator::aggregate(&dataset, &filter);
            print!("{}", render_report(&filter, &summary));
        }
        _ => {
            tracing::info!("Starting dashboard...");
            App::new(&dataset, filter, &settings.theme).run()?;
        }
    }

    Ok(())
}
