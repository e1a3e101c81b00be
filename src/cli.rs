use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "ppmblur")]
#[command(about = "Apply a parallel box blur to a binary PPM image")]
#[command(version)]
pub struct Args {
    /// Blur radius in pixels (half-width of the averaging window)
    #[arg(value_name = "RADIUS", allow_negative_numbers = true)]
    pub radius: i64,

    /// Input PPM path (binary P6)
    #[arg(value_name = "INPUT")]
    pub input: String,

    /// Output PPM path
    #[arg(value_name = "OUTPUT")]
    pub output: String,

    /// Number of threads (default: all available)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
