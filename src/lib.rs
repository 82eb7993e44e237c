pub mod components;
pub mod config;
pub mod error;
pub mod seed;
pub mod startup;
pub mod utils;
