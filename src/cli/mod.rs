//! Command-line interface module.

mod args;
pub mod build;
pub mod image;
pub mod init;
pub mod serve;
pub mod shop;

pub use args::{BuildArgs, Cli, Commands};
