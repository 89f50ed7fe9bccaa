use std::path::PathBuf;

use clap::{ArgGroup, Parser};
use dotenv::dotenv;

use qhosp::app::{AppConfig, Session};
use qhosp::context;
use qhosp::opt::*;

/// Hospital search with a result carousel.
#[derive(Parser, Debug)]
#[command(name = "qhosp", version)]
#[command(group(ArgGroup::new("filter").multiple(true).args(["name", "location"])))]
struct Opts {
    /// Directory containing hospitals.json and municipalities.json
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Seed for the synthesized occupancy values
    #[arg(long)]
    seed: Option<u64>,

    /// Hospital name filter for a one-shot search
    #[arg(short, long)]
    name: Option<String>,

    /// Municipality filter for a one-shot search
    #[arg(short, long)]
    location: Option<String>,

    /// Print the one-shot result as JSON
    #[arg(long, requires = "filter")]
    json: bool,
}

fn main() {
    dotenv().ok();

    let opts = Opts::parse();
    if let Err(err) = run(opts) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(opts: Opts) -> Res<()> {
    let config = AppConfig::from_env()?.with_overrides(opts.data_dir.clone(), opts.seed);
    log_if(&format!("Config: {:?}", config), DbgFlg::Data);

    let mut session = Session::from_config(&config);

    if opts.name.is_some() || opts.location.is_some() {
        let name = opts.name.unwrap_or_default();
        let location = opts.location.unwrap_or_default();
        if opts.json {
            println!("{}", session.search_json(&name, &location)?);
        } else {
            println!("{}", session.search_reply(&name, &location)?);
        }
        return Ok(());
    }

    match context::create_context() {
        Ok(context) => session = session.with_context(context),
        Err(err) => log_if(&format!("Runtime context unavailable: {}", err), DbgFlg::Data),
    }

    qhosp::cli::main(&mut session).err_to_str()
}
