//! CLI command implementations.

pub mod export;
pub mod init;
pub mod locations;
pub mod run;
