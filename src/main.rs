use clap::Parser;
use env_logger::Env;
use log::info;
use std::time::Instant;

mod chunking;
mod cli;
mod error;
mod filter;
mod io;

use cli::Args;
use error::Result;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Set thread pool size if specified
    if let Some(n_threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build_global()
            .expect("Failed to build thread pool");
        info!("Using {} threads", n_threads);
    } else {
        info!("Using all available threads");
    }

    // Validate radius before touching the input
    if args.radius < 0 {
        return Err(error::BlurError::InvalidRadius(args.radius));
    }

    let source = io::read_pixmap_file(&args.input)?;
    info!("Image size: {}x{}", source.width(), source.height());

    info!("Start filtering (radius: {} px)", args.radius);
    let start = Instant::now();
    let blurred = filter::box_blur(&source, args.radius)?;
    info!("Finished in {:.3} s", start.elapsed().as_secs_f64());

    io::write_pixmap_file(&args.output, &blurred)?;

    Ok(())
}
