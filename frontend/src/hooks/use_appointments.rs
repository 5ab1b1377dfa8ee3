use shared::Appointment;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Clone, PartialEq)]
pub struct AvailableSlotsState {
    pub slots: Vec<Appointment>,
    pub loading: bool,
}

pub struct UseAvailableSlotsResult {
    pub state: AvailableSlotsState,
    pub refresh: Callback<()>,
}

/// Bookable slots for the student grid. Fetches on mount; `refresh` refetches
/// the full list after any mutation — displayed state is always server truth.
#[hook]
pub fn use_available_slots(api_client: &ApiClient) -> UseAvailableSlotsResult {
    let slots = use_state(Vec::<Appointment>::new);
    let loading = use_state(|| true);

    let refresh = {
        let api_client = api_client.clone();
        let slots = slots.clone();
        let loading = loading.clone();

        Callback::from(move |_| {
            let api_client = api_client.clone();
            let slots = slots.clone();
            let loading = loading.clone();

            spawn_local(async move {
                loading.set(true);
                match api_client.list_available().await {
                    Ok(records) => {
                        // Belt and braces: the endpoint already filters, but
                        // only bookable records may reach the grid
                        slots.set(
                            records
                                .into_iter()
                                .filter(|a| a.status.is_bookable())
                                .collect(),
                        );
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "available-slots",
                            &format!("failed to fetch available slots: {}", e),
                        );
                    }
                }
                loading.set(false);
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    UseAvailableSlotsResult {
        state: AvailableSlotsState {
            slots: (*slots).clone(),
            loading: *loading,
        },
        refresh,
    }
}

#[derive(Clone, PartialEq)]
pub struct MyAppointmentsState {
    pub records: Vec<Appointment>,
    pub loading: bool,
}

pub struct UseMyAppointmentsResult {
    pub state: MyAppointmentsState,
    pub refresh: Callback<()>,
}

/// The student's own appointment history: everything the API returns for the
/// caller except still-available slots.
#[hook]
pub fn use_my_appointments(api_client: &ApiClient) -> UseMyAppointmentsResult {
    let records = use_state(Vec::<Appointment>::new);
    let loading = use_state(|| true);

    let refresh = {
        let api_client = api_client.clone();
        let records = records.clone();
        let loading = loading.clone();

        Callback::from(move |_| {
            let api_client = api_client.clone();
            let records = records.clone();
            let loading = loading.clone();

            spawn_local(async move {
                loading.set(true);
                match api_client.list_appointments().await {
                    Ok(all) => {
                        let mut history: Vec<Appointment> = all
                            .into_iter()
                            .filter(|a| !a.status.is_bookable())
                            .collect();
                        history.sort_by_key(|a| a.chronological_key());
                        records.set(history);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "my-appointments",
                            &format!("failed to fetch appointment history: {}", e),
                        );
                    }
                }
                loading.set(false);
            });
        })
    };

    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    UseMyAppointmentsResult {
        state: MyAppointmentsState {
            records: (*records).clone(),
            loading: *loading,
        },
        refresh,
    }
}
