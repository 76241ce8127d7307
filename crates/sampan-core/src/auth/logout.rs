use tracing::{debug, warn};

use crate::{Client, session::Identity};

/// Tear down the current session. Infallible and idempotent; storage
/// failures are absorbed by the store.
pub(crate) async fn logout(client: &Client) {
    let internal = &client.internal;
    let _session_guard = internal.session_flight.lock().await;

    internal.clear_session().await;
}

/// Rehydrate the published session from storage.
///
/// Records without a token are discarded. Restoring publishes the loaded
/// identity but puts nothing back into storage.
pub(crate) async fn restore_session(client: &Client) -> Option<Identity> {
    let internal = &client.internal;
    let _session_guard = internal.session_flight.lock().await;

    let identity = internal.session_store().load().await?;
    if !identity.is_authenticated() {
        warn!("Discarding persisted session without a token");
        return None;
    }

    internal.publish_session(identity.clone());
    debug!("Restored session from storage");
    Some(identity)
}
