#![deny(unsafe_code)]

//! CLI library components for the sensor column harmonizer.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
