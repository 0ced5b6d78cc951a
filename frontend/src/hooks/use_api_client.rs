use std::rc::Rc;

use web_sys::AbortController;
use yew::prelude::*;

use crate::services::api::ApiClient;

/// An API client scoped to the calling component.
///
/// Every request made through the returned client carries the component's
/// abort signal; unmounting aborts whatever is still in flight.
#[hook]
pub fn use_api_client() -> ApiClient {
    let scoped: Rc<(ApiClient, Option<AbortController>)> = use_memo((), |_| {
        let client = ApiClient::new();
        match AbortController::new() {
            Ok(controller) => (client.with_abort_signal(controller.signal()), Some(controller)),
            Err(e) => {
                log::warn!("AbortController unavailable, requests will not be cancelled: {:?}", e);
                (client, None)
            }
        }
    });

    {
        let scoped = scoped.clone();
        use_effect_with((), move |_| {
            move || {
                if let Some(controller) = &scoped.1 {
                    log::debug!("Aborting outstanding requests");
                    controller.abort();
                }
            }
        });
    }

    scoped.0.clone()
}
