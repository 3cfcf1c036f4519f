use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Interactive 3D product showcase")]
pub struct CliArgs {
    #[command(flatten)]
    pub showcase: ShowcaseArgs,
    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Args, Clone)]
pub struct ShowcaseArgs {
    /// JSON catalog replacing the built-in products.
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
    #[arg(long, default_value_t = 0, global = true)]
    pub product: usize,
    #[arg(long, value_enum, default_value_t = DeviceArg::Auto, global = true)]
    pub device: DeviceArg,
    #[arg(long, global = true)]
    pub prefs: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DeviceArg {
    Auto,
    Mobile,
    Desktop,
}

#[derive(Subcommand)]
pub enum Mode {
    Headless {
        #[command(subcommand)]
        command: HeadlessCommand,
    },
}

#[derive(Subcommand)]
pub enum HeadlessCommand {
    List,
    Describe(DescribeArgs),
    Replay(ReplayArgs),
}

/// Prints the renderable built for `--product`.
#[derive(Args)]
pub struct DescribeArgs {
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// JSON array of `{"at_ms": .., "type": .., ...}` entries.
    #[arg(long)]
    pub events: PathBuf,
    #[arg(long, default_value_t = 1280.0)]
    pub width: f64,
    #[arg(long, default_value_t = 720.0)]
    pub height: f64,
    #[arg(long)]
    pub pretty: bool,
}
