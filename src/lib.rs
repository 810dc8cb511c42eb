// src/lib.rs
#![crate_type = "lib"]
#![crate_name = "eva_functions"]

// Core modules
pub mod domain;
pub mod functions;
pub mod infrastructure;

// Supporting modules
pub mod config;
pub mod util;

#[cfg(test)]
mod tests {}
