use crate::{Client, platform::StateClient};

/// Wrapper for platform specific functionality.
pub struct PlatformClient {
    pub(crate) client: Client,
}

impl PlatformClient {
    /// Access to state functionality.
    pub fn state(&self) -> StateClient {
        StateClient {
            client: self.client.clone(),
        }
    }
}

impl Client {
    /// Access to platform functionality.
    pub fn platform(&self) -> PlatformClient {
        PlatformClient {
            client: self.clone(),
        }
    }
}
