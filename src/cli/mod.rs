//! Command implementations behind the `hpr` binary.

pub mod commands;
