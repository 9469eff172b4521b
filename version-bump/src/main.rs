use crate::{
    bump::bump,
    common::{
        constants::DEFAULT_TRACING_FILTER,
        error::{
            must,
            Error::{CliArgsParse, TracingSubscriberFilter},
            Result,
        },
    },
    opts::{validators::validate_working_dir, CliArgs},
};
use clap::Parser;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod bump;
mod chart;
mod common;
mod opts;
mod values;

fn main() {
    must(init_logging());

    let opts = must(parse_cli_args());

    must(bump(&opts));
}

/// Initialize logging components -- tracing.
fn init_logging() -> Result<()> {
    let fmt_layer = fmt::layer().with_target(false);
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_TRACING_FILTER))
        .map_err(|e| TracingSubscriberFilter {
            source: e,
            filter: DEFAULT_TRACING_FILTER.to_string(),
        })?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}

/// This function handles the following tasks -- 1. Argument parsing, 2. Validating arguments whose
/// validation depends on the filesystem.
fn parse_cli_args() -> Result<CliArgs> {
    let opts = match CliArgs::try_parse() {
        Ok(opts) => opts,
        // --help output is not an error.
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return Err(CliArgsParse { source: e }),
    };

    validate_working_dir(opts.working_dir().as_path())?;

    Ok(opts)
}
