//! Ferrous Zone Infrastructure Layer
pub mod filesystem;
pub mod process;
