//! Session state, its publisher and its persistence.

mod identity;
pub(crate) mod publisher;
mod session_client;
pub(crate) mod store;

pub use identity::Identity;
pub use session_client::SessionClient;
