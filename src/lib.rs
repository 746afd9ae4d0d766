// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod config;
pub mod db;
pub mod espn;
pub mod roster;
pub mod update;
pub mod valuation;
