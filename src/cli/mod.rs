/// CLI layer: argument parsing, output formatting, and the progress indicator.
pub mod args;
pub mod output;
pub mod progress;

pub use args::Cli;
pub use output::{OutputCtx, write_error};
pub use progress::with_progress;
