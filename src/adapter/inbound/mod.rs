//! Inbound adapters: the command-line surface.

pub mod cli;
