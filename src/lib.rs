//! BirdEdge Monitor - a terminal status dashboard for BirdEdge microphone units
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config;
pub mod device;
pub mod display;
pub mod error;
pub mod logging;
pub mod poller;
pub mod status;
pub mod terminal;
pub mod traits;
pub mod ui;
