mod btrfs;
mod config;
mod telemetry;

pub use btrfs::*;
pub use config::*;
pub use telemetry::*;
