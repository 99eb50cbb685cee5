use clap::Parser;
use owner_probe::core::system::{Options, System};
use std::path::PathBuf;
use std::process::ExitCode;

/// Print the owning account of files and folders as `DOMAIN\account`.
#[derive(Parser, Debug)]
#[command(name = "OwnerProbe", version, about)]
struct Args {
    /// Files or folders to inspect
    #[arg(required = true)]
    paths: Vec<String>,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Destination capacity in UTF-16 units, terminator included
    #[arg(long)]
    capacity: Option<usize>,

    /// Per-path deadline in milliseconds
    #[arg(long = "timeout-ms")]
    timeout_ms: Option<u64>,

    /// Print an empty owner instead of failing the path
    #[arg(long)]
    blank: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let system = match System::initialize(Options {
        config: args.config.as_deref(),
        capacity: args.capacity,
        timeout: args.timeout_ms,
    }) {
        Ok(system) => system,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let code = system.run(args.paths, args.blank);
    system.terminate();
    ExitCode::from(code)
}
