// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod config;
pub mod dataset;
pub mod export;
pub mod hub;
pub mod profile;
pub mod scouting;
