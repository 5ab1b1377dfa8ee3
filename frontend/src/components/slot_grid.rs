use shared::Appointment;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use super::booking_modal::{textarea_value, BookingModal};
use super::notification_modal::Notice;
use crate::hooks::use_appointments::use_available_slots;
use crate::hooks::use_week::use_week;
use crate::services::api::{ApiClient, ApiError};
use crate::services::date_utils::{add_days, iso_date, time_slots};

/// Record backing a grid cell: the `available` slot on that calendar day
/// whose stored time starts with the half-hour label (tolerates a longer
/// `HH:MM:SS` wire form).
fn find_slot<'a>(slots: &'a [Appointment], date_str: &str, label: &str) -> Option<&'a Appointment> {
    slots
        .iter()
        .find(|a| a.date == date_str && a.time_slot.starts_with(label))
}

/// Single-element selection toggle: clicking the current pick clears it,
/// clicking any other slot replaces it. Cardinality is always 0 or 1.
fn toggle_selection(current: Option<&Appointment>, clicked: &Appointment) -> Option<Appointment> {
    match current {
        Some(selected) if selected.id == clicked.id => None,
        _ => Some(clicked.clone()),
    }
}

#[derive(Properties, PartialEq)]
pub struct SlotGridProps {
    pub on_notify: Callback<Notice>,
}

/// Student-facing weekly grid of bookable slots: 5 weekday columns by 18
/// half-hour rows. Cells without a matching `available` record are inert
/// filler. Booking posts the picked slot with a free-text reason, then
/// refetches the whole list rather than patching it.
#[function_component(SlotGrid)]
pub fn slot_grid(props: &SlotGridProps) -> Html {
    let api_client = ApiClient::new();
    let week = use_week();
    let available = use_available_slots(&api_client);

    let selected = use_state(|| Option::<Appointment>::None);
    let show_modal = use_state(|| false);
    let reason = use_state(String::new);
    let is_submitting = use_state(|| false);

    let slot_labels = time_slots();

    let on_reason_change = {
        let reason = reason.clone();
        Callback::from(move |e: Event| {
            reason.set(textarea_value(&e));
        })
    };

    let open_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_: MouseEvent| show_modal.set(true))
    };

    let close_modal = {
        let show_modal = show_modal.clone();
        Callback::from(move |_| show_modal.set(false))
    };

    let on_confirm = {
        let api_client = api_client.clone();
        let selected = selected.clone();
        let reason = reason.clone();
        let show_modal = show_modal.clone();
        let is_submitting = is_submitting.clone();
        let refresh = available.refresh.clone();
        let on_notify = props.on_notify.clone();

        Callback::from(move |_| {
            let slot = match (*selected).clone() {
                Some(slot) => slot,
                None => return,
            };
            let api_client = api_client.clone();
            let selected = selected.clone();
            let reason = reason.clone();
            let show_modal = show_modal.clone();
            let is_submitting = is_submitting.clone();
            let refresh = refresh.clone();
            let on_notify = on_notify.clone();

            spawn_local(async move {
                is_submitting.set(true);
                let result = api_client.book(slot.id, reason.trim()).await;
                show_modal.set(false);
                is_submitting.set(false);

                match result {
                    Ok(()) => {
                        selected.set(None);
                        reason.set(String::new());
                        on_notify.emit(Notice::success(
                            "Operation Success",
                            "Your office hour slot has been secured.",
                        ));
                        refresh.emit(());
                    }
                    Err(ApiError::QuotaExceeded) => {
                        on_notify.emit(Notice::warning(
                            "Limit Reached",
                            "You have already booked a slot for this week.",
                        ));
                    }
                    Err(ApiError::SlotTaken) => {
                        on_notify.emit(Notice::error(
                            "Slot Unavailable",
                            "This slot was just taken by another student.",
                        ));
                    }
                    Err(ApiError::Unauthorized) => {
                        on_notify.emit(Notice::info(
                            "Sign In Required",
                            "Please sign in before booking a slot.",
                        ));
                    }
                    Err(e) => {
                        on_notify.emit(Notice::error("Booking Failed", &e.to_string()));
                    }
                }
            });
        })
    };

    if available.state.loading {
        return html! {
            <div class="grid-loading">
                <span class="spinner" />
                <span class="grid-loading-label">{"Syncing Slots"}</span>
            </div>
        };
    }

    html! {
        <section class="slot-grid-section">
            <div class="grid-toolbar">
                <h1 class="grid-title">{"Available Office Hours"}</h1>
                <div class="week-switcher">
                    <button type="button" class="btn btn-ghost" onclick={week.actions.prev_week.clone()}>
                        {"‹"}
                    </button>
                    <span class="week-range">
                        {format!(
                            "{} / {}",
                            iso_date(week.state.week_start),
                            iso_date(add_days(week.state.week_start, 4))
                        )}
                    </span>
                    <button type="button" class="btn btn-ghost" onclick={week.actions.next_week.clone()}>
                        {"›"}
                    </button>
                </div>
            </div>

            <div class="slot-grid">
                <div class="grid-corner" />
                {for week.state.week_days.iter().map(|day| {
                    html! {
                        <div class="grid-day-header" key={day.date_str.clone()}>
                            <div class="day-name">{day.day_name}</div>
                            <div class="day-date">{&day.display}</div>
                        </div>
                    }
                })}

                {for slot_labels.iter().map(|label| {
                    html! {
                        <>
                            <div class="grid-time-label" key={label.clone()}>{label}</div>
                            {for week.state.week_days.iter().map(|day| {
                                let cell_key = format!("{}-{}", day.date_str, label);
                                match find_slot(&available.state.slots, &day.date_str, label) {
                                    Some(appt) => {
                                        let is_selected = selected
                                            .as_ref()
                                            .map(|s| s.id == appt.id)
                                            .unwrap_or(false);
                                        let onclick = {
                                            let selected = selected.clone();
                                            let appt = appt.clone();
                                            Callback::from(move |_: MouseEvent| {
                                                selected.set(toggle_selection(selected.as_ref(), &appt));
                                            })
                                        };
                                        html! {
                                            <div class="grid-cell" key={cell_key}>
                                                <button
                                                    type="button"
                                                    class={if is_selected { "slot-button selected" } else { "slot-button" }}
                                                    {onclick}
                                                >
                                                    {if is_selected { "✓" } else { "Book" }}
                                                </button>
                                            </div>
                                        }
                                    }
                                    None => html! {
                                        <div class="grid-cell empty" key={cell_key} />
                                    },
                                }
                            })}
                        </>
                    }
                })}
            </div>

            {if selected.is_some() {
                html! {
                    <div class="selection-bar">
                        <span class="selection-label">{"Slot Selected"}</span>
                        <button type="button" class="btn btn-primary" onclick={open_modal}>
                            {"Proceed to Reason"}
                        </button>
                    </div>
                }
            } else {
                html! {}
            }}

            <BookingModal
                is_open={*show_modal}
                selected={(*selected).clone()}
                reason={(*reason).clone()}
                on_reason_change={on_reason_change}
                is_submitting={*is_submitting}
                on_confirm={on_confirm}
                on_close={close_modal}
            />
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::AppointmentStatus;
    use wasm_bindgen_test::*;

    fn slot(id: i64, date: &str, time_slot: &str) -> Appointment {
        Appointment {
            id,
            date: date.to_string(),
            time_slot: time_slot.to_string(),
            status: AppointmentStatus::Available,
            reason: None,
            rejection_reason: None,
            student_id: None,
            student_name: None,
            student_email: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[wasm_bindgen_test]
    fn lookup_matches_on_time_prefix() {
        let slots = vec![slot(1, "2025-03-10", "09:30:00"), slot(2, "2025-03-11", "09:30")];

        // Longer HH:MM:SS wire form still matches the half-hour label
        assert_eq!(find_slot(&slots, "2025-03-10", "09:30").map(|a| a.id), Some(1));
        assert_eq!(find_slot(&slots, "2025-03-11", "09:30").map(|a| a.id), Some(2));
        assert!(find_slot(&slots, "2025-03-10", "10:00").is_none());
        assert!(find_slot(&slots, "2025-03-12", "09:30").is_none());
    }

    #[wasm_bindgen_test]
    fn selection_is_single_valued() {
        let x = slot(1, "2025-03-10", "09:00");
        let y = slot(2, "2025-03-10", "09:30");

        let picked = toggle_selection(None, &x);
        assert_eq!(picked.as_ref().map(|a| a.id), Some(1));

        // Picking another slot replaces, never accumulates
        let picked = toggle_selection(picked.as_ref(), &y);
        assert_eq!(picked.as_ref().map(|a| a.id), Some(2));

        // Picking the current slot clears
        let picked = toggle_selection(picked.as_ref(), &y);
        assert!(picked.is_none());
    }
}
