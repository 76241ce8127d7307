#![doc = include_str!("../README.md")]

pub mod auth;
pub mod client;
mod error;
pub mod platform;
pub mod session;

pub use client::{Client, ClientSettings};
pub use error::{MissingFieldError, NotAuthenticatedError};
// The profile models are part of this crate's public surface; consumers
// should not need to depend on the api crate directly.
pub use sampan_api::models::{Gender, UserInfoModel};
