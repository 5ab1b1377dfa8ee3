use shared::Appointment;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::components::{ActionModal, ActionMode, AppointmentTable, Notice, NotificationModal};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::SessionContext;

/// Admin review dashboard: full appointment list bounded by an optional
/// inclusive date range, with confirm/reject transitions. Every action is a
/// server call followed by a full refetch.
#[function_component(AdminAppointmentsPage)]
pub fn admin_appointments_page() -> Html {
    let session = use_context::<SessionContext>().expect("session context missing");

    let appointments = use_state(Vec::<Appointment>::new);
    let loading = use_state(|| true);
    let start_date = use_state(String::new);
    let end_date = use_state(String::new);

    let modal_mode = use_state(|| Option::<ActionMode>::None);
    let selected_id = use_state(|| Option::<i64>::None);
    let is_processing = use_state(|| false);
    let notice = use_state(|| Option::<Notice>::None);

    let fetch_appointments = {
        let appointments = appointments.clone();
        let loading = loading.clone();
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        let notice = notice.clone();

        Callback::from(move |_: ()| {
            let appointments = appointments.clone();
            let loading = loading.clone();
            let start = (*start_date).clone();
            let end = (*end_date).clone();
            let notice = notice.clone();

            spawn_local(async move {
                loading.set(true);
                match ApiClient::new()
                    .list_all_admin(Some(start.as_str()), Some(end.as_str()))
                    .await
                {
                    Ok(mut records) => {
                        records.sort_by_key(|a| a.chronological_key());
                        appointments.set(records);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "admin-dashboard",
                            &format!("failed to fetch appointments: {}", e),
                        );
                        notice.set(Some(Notice::error("Error", "Failed to fetch appointments.")));
                    }
                }
                loading.set(false);
            });
        })
    };

    {
        let fetch_appointments = fetch_appointments.clone();
        use_effect_with(
            ((*start_date).clone(), (*end_date).clone()),
            move |_| {
                fetch_appointments.emit(());
                || ()
            },
        );
    }

    let on_start_change = {
        let start_date = start_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            start_date.set(input.value());
        })
    };

    let on_end_change = {
        let end_date = end_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            end_date.set(input.value());
        })
    };

    let clear_filter = {
        let start_date = start_date.clone();
        let end_date = end_date.clone();
        Callback::from(move |_: MouseEvent| {
            start_date.set(String::new());
            end_date.set(String::new());
        })
    };

    let open_confirm = {
        let modal_mode = modal_mode.clone();
        let selected_id = selected_id.clone();
        Callback::from(move |id: i64| {
            selected_id.set(Some(id));
            modal_mode.set(Some(ActionMode::Confirm));
        })
    };

    let open_reject = {
        let modal_mode = modal_mode.clone();
        let selected_id = selected_id.clone();
        Callback::from(move |id: i64| {
            selected_id.set(Some(id));
            modal_mode.set(Some(ActionMode::Reject));
        })
    };

    let close_modal = {
        let modal_mode = modal_mode.clone();
        let selected_id = selected_id.clone();
        Callback::from(move |_| {
            modal_mode.set(None);
            selected_id.set(None);
        })
    };

    let execute_confirm = {
        let selected_id = selected_id.clone();
        let modal_mode = modal_mode.clone();
        let is_processing = is_processing.clone();
        let notice = notice.clone();
        let fetch_appointments = fetch_appointments.clone();

        Callback::from(move |_| {
            let id = match *selected_id {
                Some(id) => id,
                None => return,
            };
            let selected_id = selected_id.clone();
            let modal_mode = modal_mode.clone();
            let is_processing = is_processing.clone();
            let notice = notice.clone();
            let fetch_appointments = fetch_appointments.clone();

            spawn_local(async move {
                is_processing.set(true);
                match ApiClient::new().confirm(id).await {
                    Ok(()) => {
                        modal_mode.set(None);
                        selected_id.set(None);
                        notice.set(Some(Notice::success(
                            "Success",
                            "Appointment confirmed successfully.",
                        )));
                        fetch_appointments.emit(());
                    }
                    Err(e) => {
                        notice.set(Some(Notice::error("Error", &e.to_string())));
                    }
                }
                is_processing.set(false);
            });
        })
    };

    let execute_reject = {
        let selected_id = selected_id.clone();
        let modal_mode = modal_mode.clone();
        let is_processing = is_processing.clone();
        let notice = notice.clone();
        let fetch_appointments = fetch_appointments.clone();

        Callback::from(move |reason: String| {
            let id = match *selected_id {
                Some(id) => id,
                None => return,
            };
            let selected_id = selected_id.clone();
            let modal_mode = modal_mode.clone();
            let is_processing = is_processing.clone();
            let notice = notice.clone();
            let fetch_appointments = fetch_appointments.clone();

            spawn_local(async move {
                is_processing.set(true);
                match ApiClient::new().reject(id, reason.trim()).await {
                    Ok(()) => {
                        modal_mode.set(None);
                        selected_id.set(None);
                        notice.set(Some(Notice::success(
                            "Rejected",
                            "Appointment rejected and student notified.",
                        )));
                        fetch_appointments.emit(());
                    }
                    Err(e) => {
                        notice.set(Some(Notice::error("Error", &e.to_string())));
                    }
                }
                is_processing.set(false);
            });
        })
    };

    let on_notice_close = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };

    if !session.is_staff() {
        return html! {
            <main class="page admin-appointments-page">
                <div class="empty-state">
                    {"Administrator privileges are required to review appointments."}
                </div>
            </main>
        };
    }

    html! {
        <main class="page admin-appointments-page">
            <h1 class="page-title">{"Dashboard"}</h1>
            <p class="page-subtitle">{"Appointment Management"}</p>

            <div class="date-filter">
                <div class="form-group">
                    <label for="filter-from">{"From"}</label>
                    <input
                        type="date"
                        id="filter-from"
                        value={(*start_date).clone()}
                        onchange={on_start_change}
                    />
                </div>
                <div class="form-group">
                    <label for="filter-to">{"To"}</label>
                    <input
                        type="date"
                        id="filter-to"
                        value={(*end_date).clone()}
                        onchange={on_end_change}
                    />
                </div>
                {if !start_date.is_empty() || !end_date.is_empty() {
                    html! {
                        <button type="button" class="btn btn-ghost" onclick={clear_filter}>
                            {"Clear Filters"}
                        </button>
                    }
                } else {
                    html! {}
                }}
            </div>

            {if *loading {
                html! {
                    <div class="grid-loading">
                        <span class="spinner" />
                        <span class="grid-loading-label">{"Loading Data"}</span>
                    </div>
                }
            } else if appointments.is_empty() {
                html! { <div class="empty-state">{"No Appointments Found"}</div> }
            } else {
                html! {
                    <AppointmentTable
                        appointments={(*appointments).clone()}
                        is_admin={true}
                        on_confirm={open_confirm}
                        on_reject={open_reject}
                    />
                }
            }}

            <ActionModal
                mode={*modal_mode}
                is_processing={*is_processing}
                on_close={close_modal}
                on_confirm={execute_confirm}
                on_reject={execute_reject}
            />

            <NotificationModal notice={(*notice).clone()} on_close={on_notice_close} />
        </main>
    }
}
