mod config;
mod names;
mod parse;
mod types;

pub use config::*;
pub use names::*;
pub use parse::*;
pub use types::*;
