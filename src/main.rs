use clap::{Parser, Subcommand};
use evobench::config::SweepAxes;
use std::process;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Headerless CSV dataset: one `f1,...,fn,label` row per sample.
    #[arg(global = true, short, long, default_value = "data/digits.csv")]
    data: String,

    /// Shared result log target.
    #[arg(global = true, short, long, default_value = "sweep_log.csv")]
    log: String,

    /// JSON file defining the sweep axes; replaces the axis flags wholesale.
    #[arg(global = true, long)]
    sweep: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Sweep(cmd::sweep::SweepArgs),
    Grid(cmd::grid::GridArgs),
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let axes_override = cli.sweep.as_deref().map(|path| {
        info!("Loading sweep axes from: {}", path);
        SweepAxes::load_from_file(path).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        })
    });

    let outcome = match cli.command {
        Commands::Sweep(mut args) => {
            if let Some(axes) = axes_override {
                args.config.axes = axes;
            }
            cmd::sweep::run(args, &cli.data, &cli.log)
        }
        Commands::Grid(mut args) => {
            if let Some(axes) = axes_override {
                args.config.axes = axes;
            }
            cmd::grid::run(args)
        }
    };

    if let Err(e) = outcome {
        error!("{}", e);
        process::exit(1);
    }
}
