#![doc = include_str!("../README.md")]

mod configuration;
mod error;

pub mod apis;
pub mod models;

pub use configuration::Configuration;
pub use error::Error;
