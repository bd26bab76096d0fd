//! Filesystem-facing helpers for the bootstrap.

pub mod config;
