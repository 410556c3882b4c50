//! Side-effecting halves of the crate: temp files, file reads, child processes.

pub mod config;
pub mod expand;
pub mod process;
pub mod shorten;
