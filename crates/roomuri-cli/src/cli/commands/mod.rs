//! CLI command handlers. Each command is in its own file and returns the text to print.

mod decode;
mod params;
mod parse;
mod stringify;

pub use decode::run_decode;
pub use params::run_params;
pub use parse::run_parse;
pub use stringify::{run_stringify, BagSource};
