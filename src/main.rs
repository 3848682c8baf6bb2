use clap::Parser;
use log::warn;

mod args;
mod borda;

use crate::args::Args;

fn main() {
    let args = Args::parse();
    if args.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    if let Err(e) = borda::run_tally(&args) {
        warn!("run_tally failed: {:?}", e);
        eprintln!("Error processing CSV: {}", e);
        std::process::exit(1);
    }
}
