//! Linkfill API server module
//!
//! HTTP surface for the upload → analyze → confirm → download wizard.
//! Run with `linkfill serve` or the `linkfill-server` binary.

pub mod handlers;
pub mod server;
pub mod session;

pub use server::run_api_server;
