//! CLI module
//!
//! Command-line interface over [`crate::AfdianClient`].
//!
//! # Commands
//!
//! - `order <OUT_TRADE_NO>` - Look up one order
//! - `orders` - One page of orders, or every order with `--all`
//! - `sponsors` - One page of sponsors, or every sponsor with `--all`

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{render, Runner};
