use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::{AppointmentTable, Notice, NotificationModal};
use crate::hooks::use_appointments::use_my_appointments;
use crate::services::api::ApiClient;

/// Student appointment history with the revoke flow. Revocation asks for
/// confirmation first; the list is refetched after every server action so
/// displayed state is always server truth.
#[function_component(MyAppointmentsPage)]
pub fn my_appointments_page() -> Html {
    let api_client = ApiClient::new();
    let appointments = use_my_appointments(&api_client);

    let revoke_id = use_state(|| Option::<i64>::None);
    let is_revoking = use_state(|| false);
    let notice = use_state(|| Option::<Notice>::None);

    let on_cancel_click = {
        let revoke_id = revoke_id.clone();
        Callback::from(move |id: i64| revoke_id.set(Some(id)))
    };

    let close_revoke_modal = {
        let revoke_id = revoke_id.clone();
        Callback::from(move |_: MouseEvent| revoke_id.set(None))
    };

    let confirm_revocation = {
        let api_client = api_client.clone();
        let revoke_id = revoke_id.clone();
        let is_revoking = is_revoking.clone();
        let notice = notice.clone();
        let refresh = appointments.refresh.clone();

        Callback::from(move |_: MouseEvent| {
            let id = match *revoke_id {
                Some(id) => id,
                None => return,
            };
            let api_client = api_client.clone();
            let revoke_id = revoke_id.clone();
            let is_revoking = is_revoking.clone();
            let notice = notice.clone();
            let refresh = refresh.clone();

            spawn_local(async move {
                is_revoking.set(true);
                match api_client.cancel(id).await {
                    Ok(()) => {
                        revoke_id.set(None);
                        notice.set(Some(Notice::success(
                            "Revoked",
                            "The appointment has been successfully cancelled.",
                        )));
                        refresh.emit(());
                    }
                    Err(e) => {
                        revoke_id.set(None);
                        notice.set(Some(Notice::error("Error", &e.to_string())));
                    }
                }
                is_revoking.set(false);
            });
        })
    };

    let on_notice_close = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };

    html! {
        <main class="page my-appointments-page">
            <h1 class="page-title">{"Records"}</h1>
            <p class="page-subtitle">{"Appointment History & Status"}</p>

            {if appointments.state.loading {
                html! {
                    <div class="grid-loading">
                        <span class="spinner" />
                        <span class="grid-loading-label">{"Synchronizing"}</span>
                    </div>
                }
            } else if appointments.state.records.is_empty() {
                html! {
                    <div class="empty-state">{"No Records Found"}</div>
                }
            } else {
                html! {
                    <AppointmentTable
                        appointments={appointments.state.records.clone()}
                        on_cancel={on_cancel_click}
                    />
                }
            }}

            {if revoke_id.is_some() {
                html! {
                    <div class="modal-backdrop">
                        <div class="revoke-modal">
                            <h3 class="modal-title">{"Revoke Slot?"}</h3>
                            <p class="modal-body">
                                {"This action cannot be undone. Are you sure you want to proceed?"}
                            </p>
                            <div class="modal-actions">
                                <button
                                    type="button"
                                    class="btn btn-ghost"
                                    onclick={close_revoke_modal}
                                    disabled={*is_revoking}
                                >
                                    {"Abort"}
                                </button>
                                <button
                                    type="button"
                                    class="btn btn-danger"
                                    onclick={confirm_revocation}
                                    disabled={*is_revoking}
                                >
                                    {if *is_revoking { "Processing..." } else { "Confirm Revoke" }}
                                </button>
                            </div>
                        </div>
                    </div>
                }
            } else {
                html! {}
            }}

            <NotificationModal notice={(*notice).clone()} on_close={on_notice_close} />
        </main>
    }
}
