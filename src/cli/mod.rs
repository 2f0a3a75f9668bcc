//! CLI command handlers

pub mod commands;

pub use commands::{inspect, process, serve};
