use clap::Parser;
use slangbuild::cli::Cli;

fn main() {
    slangbuild::init_tracing();
    let cli = Cli::parse();
    match slangbuild::run(cli) {
        Ok(summary) => tracing::info!(
            "Compiled {} stages from {} of {} shader files",
            summary.stages_compiled,
            summary.files_compiled,
            summary.files_scanned
        ),
        Err(err) => {
            tracing::error!("{err:#}");
            std::process::exit(slangbuild::exit_code(&err));
        }
    }
}
