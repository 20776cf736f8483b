//! I/O helpers: process launch configuration and the launch-profile file.

pub mod config;
pub mod process;
