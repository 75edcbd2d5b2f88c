use slangbuild_core::{locate_compiler, Driver, Environment, RunSummary, Slangc};
use tracing_indicatif::IndicatifLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod cli;

pub use slangbuild_core::exit_code;

use crate::cli::Cli;

/// Installs the global subscriber: `RUST_LOG` filtering (default `info`),
/// log lines on stdout, and progress bars for spans.
pub fn init_tracing() {
    let indicatif_layer = IndicatifLayer::new();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(indicatif_layer.get_stdout_writer()),
        )
        .with(indicatif_layer)
        .try_init();
    if let Err(err) = result {
        tracing::warn!("Logger already initialized: {err}");
    }
}

/// Locates slangc, then compiles every shader under the configured root.
pub fn run(cli: Cli) -> anyhow::Result<RunSummary> {
    let environment = Environment::from_process();
    let compiler = locate_compiler()
        .maybe_explicit(cli.slangc.as_deref())
        .environment(&environment)
        .call()?;
    tracing::info!(
        source = %compiler.source(),
        "Found slangc compiler at {}",
        compiler.path().display()
    );

    let config = cli.into_config()?;
    let mut driver = Driver::new(config, Slangc::new(compiler));
    driver.run()
}
