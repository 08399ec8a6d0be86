pub mod ann;
pub mod config;
pub mod dataset;
pub mod error;
pub mod optimizer;
pub mod sweep;
// cmd and reports are binary modules (declared in main.rs); everything the
// harness and its tests need lives in the library crate.
