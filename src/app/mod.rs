//! Application module for the marker-replay binary

pub mod cli;
pub mod config;
pub mod error;
pub mod report;
pub mod scenario;
pub mod startup;

#[cfg(test)]
mod tests;
