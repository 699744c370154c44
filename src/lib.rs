pub mod cli;
pub mod config;
pub mod detect;
pub mod error;
pub mod firmware;
pub mod inject;
pub mod output;
pub mod quirks;
pub mod snapshot;
pub mod sysfs;
