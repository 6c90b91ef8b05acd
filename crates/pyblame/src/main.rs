mod cli;
mod output;

use clap::Parser;
use cli::Cli;
use libpyblame_core::{blame_in, load_settings, BlameError, BlameOptions, NodeFilter, OutputFormat};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();

    // stdout carries the report, so logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // errors before the settings load are reported in the default format
    let mut format = OutputFormat::default();
    if let Err(e) = run(&cli, &mut format) {
        output::output_error(&e, format);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli, format: &mut OutputFormat) -> Result<(), BlameError> {
    let cwd = std::env::current_dir()?;
    let settings = load_settings(&cwd)?;
    *format = settings.format;
    debug!(?settings, "resolved settings");

    let filter = NodeFilter::tests_with_prefix(&settings.test_prefix);
    let provider = libpyblame_git::provider(settings.backend, settings.timeout());
    let options = BlameOptions {
        extension: settings.extension.clone(),
        jobs: settings.jobs,
    };

    let report = blame_in(&cwd, &cli.paths, &filter, &*provider, &options)?;

    let stdout = std::io::stdout();
    output::write_report(&mut stdout.lock(), &report, settings.format)
}
