use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cynomap_cli::commands::{self, MapContext};
use cynomap_cli::output::OutputFormat;
use cynomap_lib::tracking::DEFAULT_TRACKING_URL;
use cynomap_lib::JumpRange;

#[derive(Parser, Debug)]
#[command(author, version, about = "Cyno map rendering and route utilities")]
struct Cli {
    /// Override the dataset directory or file path.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Base URL of the character-tracking gateway.
    #[arg(long, global = true, default_value = DEFAULT_TRACKING_URL)]
    tracking_url: String,

    /// API key identifier used for member tracking.
    #[arg(long, global = true)]
    key_id: Option<u64>,

    /// API verification code used for member tracking.
    #[arg(long, global = true)]
    vcode: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the cyno map.
    Render {
        /// Jump range in light-years.
        #[arg(long, default_value = "13")]
        range: JumpRange,
        /// Write the result to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
        format: OutputFormat,
    },
    /// List cyno routes between systems with tracked members.
    Routes {
        /// Jump range in light-years.
        #[arg(long, default_value = "13")]
        range: JumpRange,
    },
    /// List systems with tracked members.
    Presence,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let context = MapContext::new(
        cli.data_dir.as_deref(),
        &cli.tracking_url,
        cli.key_id,
        cli.vcode.as_deref(),
    )?;

    match cli.command {
        Command::Render {
            range,
            output,
            format,
        } => commands::render::handle_render(&context, range, format, output.as_deref()),
        Command::Routes { range } => commands::routes::handle_routes(&context, range),
        Command::Presence => commands::presence::handle_presence(&context),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
