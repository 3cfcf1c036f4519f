use anyhow::Result;
use clap::Parser;

mod cli;
#[cfg(feature = "gui")]
mod gui;
mod headless;
mod setup;

fn main() -> Result<()> {
    init_tracing();
    let args = cli::CliArgs::parse();
    match args.mode {
        Some(cli::Mode::Headless { command }) => headless::run_headless(&args.showcase, command),
        None => run_gui(&args.showcase),
    }
}

#[cfg(feature = "gui")]
fn run_gui(args: &cli::ShowcaseArgs) -> Result<()> {
    gui::run_gui(args)
}

#[cfg(not(feature = "gui"))]
fn run_gui(_args: &cli::ShowcaseArgs) -> Result<()> {
    anyhow::bail!("GUI support disabled. Rebuild with --features gui.");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
