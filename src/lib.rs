// Library exports for testing and reuse

pub mod chunking;
pub mod cli;
pub mod error;
pub mod filter;
pub mod io;

// Re-export commonly used types
pub use error::{BlurError, Result};
pub use filter::box_blur;
pub use io::{read_pixmap_file, write_pixmap_file, Pixmap};
