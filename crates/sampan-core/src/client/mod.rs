//! Sampan SDK Client

#[allow(clippy::module_inception)]
mod client;
#[allow(missing_docs)]
pub mod client_settings;
#[allow(missing_docs)]
pub mod internal;
pub use internal::ApiConfigurations;

pub use client::Client;
pub use client_settings::ClientSettings;
