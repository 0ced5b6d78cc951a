use shared::{sort_newest_first, AttendanceRecord, MonthlyStat, RecordStore};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const COMPONENT: &str = "use_records";

#[derive(Clone, PartialEq)]
pub struct RecordsState {
    /// Newest first
    pub records: Vec<AttendanceRecord>,
    pub monthly: Vec<MonthlyStat>,
    pub loading: bool,
}

#[derive(Clone)]
pub struct UseRecordsActions {
    pub refresh: Callback<()>,
    /// Delete a record, then report whether the store accepted it
    pub delete: Callback<(String, Callback<bool>)>,
}

pub struct UseRecordsResult {
    pub state: RecordsState,
    pub actions: UseRecordsActions,
}

/// Records and monthly statistics for `owner_email`.
///
/// Both are fetched when the owner changes and after every mutation. A failed
/// fetch keeps what was already shown. Nothing is written back once the
/// client's abort signal has fired.
#[hook]
pub fn use_records(api_client: &ApiClient, owner_email: &str) -> UseRecordsResult {
    let records = use_state(Vec::<AttendanceRecord>::new);
    let monthly = use_state(Vec::<MonthlyStat>::new);
    let loading = use_state(|| true);

    let refresh = {
        let api_client = api_client.clone();
        let records = records.clone();
        let monthly = monthly.clone();
        let loading = loading.clone();

        use_callback(owner_email.to_string(), move |_: (), owner_email| {
            let api_client = api_client.clone();
            let owner_email = owner_email.clone();
            let records = records.clone();
            let monthly = monthly.clone();
            let loading = loading.clone();

            spawn_local(async move {
                loading.set(true);

                let fetched = api_client.list_by_owner(&owner_email).await;
                let stats = api_client.monthly_stats(&owner_email).await;
                if api_client.is_aborted() {
                    return;
                }

                match fetched {
                    Ok(mut list) => {
                        sort_newest_first(&mut list);
                        Logger::debug_with_component(
                            COMPONENT,
                            &format!("Loaded {} records", list.len()),
                        );
                        records.set(list);
                    }
                    Err(e) => Logger::error_with_component(
                        COMPONENT,
                        &format!("Failed to fetch records: {}", e),
                    ),
                }

                match stats {
                    Ok(stats) => monthly.set(stats),
                    Err(e) => Logger::error_with_component(
                        COMPONENT,
                        &format!("Failed to fetch monthly stats: {}", e),
                    ),
                }

                loading.set(false);
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with(owner_email.to_string(), move |_| {
            refresh.emit(());
        });
    }

    let delete = {
        let api_client = api_client.clone();
        let refresh = refresh.clone();

        use_callback(refresh.clone(), move |(id, on_done): (String, Callback<bool>), _| {
            let api_client = api_client.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                match api_client.delete(&id).await {
                    Ok(()) => {
                        Logger::info_with_component(COMPONENT, &format!("Deleted record {}", id));
                        on_done.emit(true);
                        refresh.emit(());
                    }
                    Err(e) if e.is_aborted() => {
                        Logger::debug_with_component(COMPONENT, "Delete aborted");
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            COMPONENT,
                            &format!("Failed to delete record {}: {}", id, e),
                        );
                        on_done.emit(false);
                    }
                }
            });
        })
    };

    UseRecordsResult {
        state: RecordsState {
            records: (*records).clone(),
            monthly: (*monthly).clone(),
            loading: *loading,
        },
        actions: UseRecordsActions { refresh, delete },
    }
}
