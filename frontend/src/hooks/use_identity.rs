use gloo::timers::callback::Interval;
use shared::Identity;
use yew::prelude::*;

use crate::services::identity::current_identity;

/// How often the identity SDK is re-read, in milliseconds
const POLL_INTERVAL_MS: u32 = 500;

/// Current identity, kept in sync with the provider SDK.
///
/// The SDK loads asynchronously and has no Rust-visible event for sign-in
/// changes, so the global is polled and state only updates on a change.
#[hook]
pub fn use_identity() -> Identity {
    let identity = use_state_eq(current_identity);

    {
        let identity = identity.clone();
        use_effect_with((), move |_| {
            let mut last_seen = (*identity).clone();
            let interval = Interval::new(POLL_INTERVAL_MS, move || {
                let latest = current_identity();
                if last_seen != latest {
                    log::info!("Identity changed: signed_in={}", latest.signed_in);
                    last_seen = latest.clone();
                    identity.set(latest);
                }
            });

            move || drop(interval)
        });
    }

    (*identity).clone()
}
