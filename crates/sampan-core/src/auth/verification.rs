use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use sampan_api::apis::auth_api;
use thiserror::Error;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::Client;

/// Seconds a successful dispatch locks the send button for.
pub(crate) const COOLDOWN_SECONDS: u8 = 60;

/// Errors from requesting a verification code.
#[derive(Debug, Error)]
pub enum SendCodeError {
    /// The phone number is not a valid mainland mobile number.
    #[error("Invalid phone number")]
    InvalidPhoneNumber,

    /// A code was dispatched less than a cooldown period ago.
    #[error("A verification code was already sent recently")]
    CooldownActive,

    #[allow(missing_docs)]
    #[error(transparent)]
    Api(#[from] sampan_api::Error),
}

/// Lifecycle of the send-code slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SendPhase {
    /// Ready to dispatch.
    Idle,
    /// A dispatch request is in flight.
    Sending,
    /// A dispatch succeeded less than a cooldown period ago.
    Cooldown,
}

/// Send-code cooldown state machine.
///
/// The phase gates dispatches; the countdown channel carries the remaining
/// seconds for views to render. A one-second tick task drives the countdown
/// and is torn down by cancellation on logout and on client teardown.
#[derive(Debug)]
pub(crate) struct Verification {
    phase: Mutex<SendPhase>,
    countdown: watch::Sender<u8>,
    /// Cancels the running tick task, when one exists.
    tick_cancellation: Mutex<Option<CancellationToken>>,
}

impl Verification {
    pub(crate) fn new() -> Self {
        let (countdown, _) = watch::channel(0);
        Self {
            phase: Mutex::new(SendPhase::Idle),
            countdown,
            tick_cancellation: Mutex::new(None),
        }
    }

    /// Remaining cooldown in seconds; zero when idle.
    pub(crate) fn cooldown_seconds(&self) -> u8 {
        *self.countdown.borrow()
    }

    /// A receiver observing every countdown update.
    pub(crate) fn subscribe(&self) -> watch::Receiver<u8> {
        self.countdown.subscribe()
    }

    /// Claim the dispatch slot. Fails while a send is in flight or a
    /// cooldown is running.
    pub(crate) fn try_begin_send(&self) -> Result<(), SendCodeError> {
        let mut phase = self.phase.lock().expect("Mutex is not poisoned");
        if *phase != SendPhase::Idle {
            return Err(SendCodeError::CooldownActive);
        }
        *phase = SendPhase::Sending;
        Ok(())
    }

    /// Release the dispatch slot after a failed send; no cooldown is consumed.
    pub(crate) fn abort_send(&self) {
        *self.phase.lock().expect("Mutex is not poisoned") = SendPhase::Idle;
    }

    /// Enter the cooldown after a successful dispatch and spawn the tick
    /// task. The task runs until the countdown reaches zero or its token,
    /// a child of `parent`, is cancelled.
    pub(crate) fn start_cooldown(self: &Arc<Self>, parent: &CancellationToken) {
        let cancellation = parent.child_token();
        *self
            .tick_cancellation
            .lock()
            .expect("Mutex is not poisoned") = Some(cancellation.clone());
        *self.phase.lock().expect("Mutex is not poisoned") = SendPhase::Cooldown;
        self.countdown.send_replace(COOLDOWN_SECONDS);

        let verification = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;

            loop {
                tokio::select! {
                    // Cancellation wins over a simultaneously ready tick.
                    biased;
                    _ = cancellation.cancelled() => {
                        debug!("Cooldown tick cancelled");
                        break;
                    }
                    _ = interval.tick() => {
                        let remaining = verification.cooldown_seconds().saturating_sub(1);
                        verification.countdown.send_replace(remaining);
                        if remaining == 0 {
                            verification.finish_cooldown();
                            break;
                        }
                    }
                }
            }
        });
    }

    fn finish_cooldown(&self) {
        *self.phase.lock().expect("Mutex is not poisoned") = SendPhase::Idle;
        self.tick_cancellation
            .lock()
            .expect("Mutex is not poisoned")
            .take();
    }

    /// Stop any running cooldown and return to idle with a zeroed counter.
    pub(crate) fn cancel_cooldown(&self) {
        if let Some(cancellation) = self
            .tick_cancellation
            .lock()
            .expect("Mutex is not poisoned")
            .take()
        {
            cancellation.cancel();
        }
        *self.phase.lock().expect("Mutex is not poisoned") = SendPhase::Idle;
        self.countdown.send_replace(0);
    }
}

/// Check for a mainland mobile number: 11 digits, `1` then `3..=9`.
pub(crate) fn is_valid_mobile_number(number: &str) -> bool {
    let bytes = number.as_bytes();
    bytes.len() == 11
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1])
        && bytes.iter().all(u8::is_ascii_digit)
}

/// Validate the number, claim the dispatch slot, and ask the backend to
/// text a verification code. A failed dispatch releases the slot; a
/// successful one starts the cooldown.
pub(crate) async fn send_verification_code(
    client: &Client,
    phone_number: String,
) -> Result<(), SendCodeError> {
    if !is_valid_mobile_number(&phone_number) {
        return Err(SendCodeError::InvalidPhoneNumber);
    }

    let internal = &client.internal;
    internal.verification.try_begin_send()?;

    let configurations = internal.get_api_configurations();
    match auth_api::post_send_code(&configurations.auth_config, phone_number).await {
        Ok(()) => {
            internal
                .verification
                .start_cooldown(&internal.cancellation_token);
            Ok(())
        }
        Err(e) => {
            internal.verification.abort_send();
            Err(e.into())
        }
    }
}
