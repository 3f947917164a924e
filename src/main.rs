use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use itemgrid::cli::CliArgs;
use itemgrid::config::GridConfig;
use itemgrid::grid::GridViewport;
use itemgrid::keymap::{load_default_keymap, Keymap};
use itemgrid::model::AppModel;
use itemgrid::repository::JsonFileRepository;
use itemgrid::runtime::Session;
use itemgrid::script::{load_script, run_script};

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let startup = args
        .into_config(GridConfig::load())
        .map_err(anyhow::Error::msg)?;

    itemgrid::tracing::init(startup.grid.file_logging);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(run(startup))
}

async fn run(startup: itemgrid::cli::StartupConfig) -> Result<()> {
    let config = startup.grid;
    tracing::info!("Using item store {}", config.store.display());

    let repo = Arc::new(JsonFileRepository::new(config.store.clone()));
    let viewport = GridViewport::new(config.visible_rows);
    let keymap = Keymap::with_bindings(load_default_keymap());
    let mut session = Session::new(AppModel::new(config), repo, viewport, keymap);

    session.start();
    session.settle().await;

    let mut stdout = std::io::stdout().lock();

    if let Some(path) = startup.script {
        let steps = load_script(&path)?;
        tracing::info!("Replaying {} script steps from {}", steps.len(), path.display());
        run_script(&mut session, &steps, &mut stdout)
            .await
            .with_context(|| format!("script {} failed", path.display()))?;
    }

    stdout
        .write_all(session.render().as_bytes())
        .context("failed to write grid")?;

    session.close();
    Ok(())
}
