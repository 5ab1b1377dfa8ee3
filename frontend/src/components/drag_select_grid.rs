use std::collections::HashSet;

use shared::SlotRelease;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::hooks::use_week::{use_week, WeekDay};
use crate::services::api::{ApiClient, ApiError};
use crate::services::date_utils::{add_days, iso_date, time_slots};
use crate::services::logging::Logger;

/// Positional cell token in the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragPoint {
    pub day_index: usize,
    pub time_index: usize,
}

/// Inclusive bounds of the axis-aligned rectangle spanned by a drag,
/// regardless of drag direction: `(min_day, max_day, min_time, max_time)`.
fn drag_bounds(start: DragPoint, current: DragPoint) -> (usize, usize, usize, usize) {
    (
        start.day_index.min(current.day_index),
        start.day_index.max(current.day_index),
        start.time_index.min(current.time_index),
        start.time_index.max(current.time_index),
    )
}

/// Whether a cell sits inside the live drag rectangle.
fn in_drag_range(start: DragPoint, current: DragPoint, day_index: usize, time_index: usize) -> bool {
    let (min_day, max_day, min_time, max_time) = drag_bounds(start, current);
    day_index >= min_day && day_index <= max_day && time_index >= min_time && time_index <= max_time
}

/// Expand a drag rectangle into its persisted `"date|time"` selection keys.
fn rect_keys(
    start: DragPoint,
    current: DragPoint,
    week_days: &[WeekDay],
    labels: &[String],
) -> Vec<String> {
    let (min_day, max_day, min_time, max_time) = drag_bounds(start, current);
    let mut keys = Vec::new();
    for day in min_day..=max_day.min(week_days.len().saturating_sub(1)) {
        for time in min_time..=max_time.min(labels.len().saturating_sub(1)) {
            keys.push(format!("{}|{}", week_days[day].date_str, labels[time]));
        }
    }
    keys
}

/// Split a persisted selection key back into its release payload.
fn release_from_key(key: &str) -> Option<SlotRelease> {
    let (date, time_slot) = key.split_once('|')?;
    Some(SlotRelease {
        date: date.to_string(),
        time_slot: time_slot.to_string(),
    })
}

#[derive(Clone, PartialEq)]
enum Feedback {
    Success(String),
    Error(String),
}

/// Admin batch-release grid. Every cell is a candidate slot; dragging selects
/// the rectangle between press and current cell, and releasing the pointer
/// unions that rectangle into the persisted selection. Selections accumulate
/// across drags until cleared or submitted as one bulk release.
#[function_component(DragSelectGrid)]
pub fn drag_select_grid() -> Html {
    let api_client = ApiClient::new();
    let week = use_week();

    let selected_slots = use_state(HashSet::<String>::new);
    let is_dragging = use_state(|| false);
    let drag_start = use_state(|| Option::<DragPoint>::None);
    let drag_current = use_state(|| Option::<DragPoint>::None);
    let loading = use_state(|| false);
    let feedback = use_state(|| Option::<Feedback>::None);

    let slot_labels = time_slots();

    // Resolve the in-progress drag: union its rectangle into the persisted
    // set, then return to idle. Safe to call when no drag is live.
    let resolve_drag = {
        let is_dragging = is_dragging.clone();
        let drag_start = drag_start.clone();
        let drag_current = drag_current.clone();
        let selected_slots = selected_slots.clone();
        let week_days = week.state.week_days.clone();
        let slot_labels = slot_labels.clone();

        Callback::from(move |_: ()| {
            if *is_dragging {
                if let (Some(start), Some(current)) = (*drag_start, *drag_current) {
                    let mut set = (*selected_slots).clone();
                    for key in rect_keys(start, current, &week_days, &slot_labels) {
                        set.insert(key);
                    }
                    selected_slots.set(set);
                }
            }
            is_dragging.set(false);
            drag_start.set(None);
            drag_current.set(None);
        })
    };

    // A release anywhere in the document must still resolve the drag, even
    // when the pointer leaves the grid first.
    {
        let resolve_drag = resolve_drag.clone();
        use_effect_with(
            (*is_dragging, *drag_start, *drag_current),
            move |_| {
                let document = web_sys::window()
                    .expect("should have window")
                    .document()
                    .expect("should have document");

                let on_mouseup = Closure::wrap(Box::new(move |_: web_sys::Event| {
                    resolve_drag.emit(());
                }) as Box<dyn FnMut(web_sys::Event)>);

                let _ = document
                    .add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());

                move || {
                    let _ = document.remove_event_listener_with_callback(
                        "mouseup",
                        on_mouseup.as_ref().unchecked_ref(),
                    );
                    drop(on_mouseup);
                }
            },
        );
    }

    let on_cell_mousedown = {
        let is_dragging = is_dragging.clone();
        let drag_start = drag_start.clone();
        let drag_current = drag_current.clone();
        Callback::from(move |point: DragPoint| {
            is_dragging.set(true);
            drag_start.set(Some(point));
            drag_current.set(Some(point));
        })
    };

    let on_cell_mouseenter = {
        let is_dragging = is_dragging.clone();
        let drag_current = drag_current.clone();
        Callback::from(move |point: DragPoint| {
            if *is_dragging {
                drag_current.set(Some(point));
            }
        })
    };

    let on_grid_mouseleave = {
        let resolve_drag = resolve_drag.clone();
        Callback::from(move |_: MouseEvent| resolve_drag.emit(()))
    };

    let clear_selection = {
        let selected_slots = selected_slots.clone();
        Callback::from(move |_: MouseEvent| selected_slots.set(HashSet::new()))
    };

    let on_submit = {
        let api_client = api_client.clone();
        let selected_slots = selected_slots.clone();
        let loading = loading.clone();
        let feedback = feedback.clone();

        Callback::from(move |_: MouseEvent| {
            if selected_slots.is_empty() {
                return;
            }
            let api_client = api_client.clone();
            let selected_slots = selected_slots.clone();
            let loading = loading.clone();
            let feedback = feedback.clone();

            spawn_local(async move {
                loading.set(true);
                feedback.set(None);

                let payload: Vec<SlotRelease> = selected_slots
                    .iter()
                    .filter_map(|key| release_from_key(key))
                    .collect();
                let count = payload.len();

                match api_client.release_batch(&payload).await {
                    Ok(()) => {
                        feedback.set(Some(Feedback::Success(format!(
                            "Successfully released {} slots",
                            count
                        ))));
                        selected_slots.set(HashSet::new());
                    }
                    Err(ApiError::Forbidden) => {
                        feedback.set(Some(Feedback::Error(
                            "Access denied. Administrator privileges required.".to_string(),
                        )));
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "drag-select-grid",
                            &format!("batch release failed: {}", e),
                        );
                        feedback.set(Some(Feedback::Error(
                            "Release failed. Please check your connection.".to_string(),
                        )));
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <section class="drag-grid-section">
            <div class="grid-toolbar">
                <h1 class="grid-title">{"Batch select slots by dragging"}</h1>
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

            {if let Some(feedback) = (*feedback).clone() {
                match feedback {
                    Feedback::Success(text) => html! { <div class="alert success">{text}</div> },
                    Feedback::Error(text) => html! { <div class="alert error">{text}</div> },
                }
            } else {
                html! {}
            }}

            <div class="drag-grid" onmouseleave={on_grid_mouseleave}>
                <div class="grid-corner" />
                {for week.state.week_days.iter().map(|day| {
                    html! {
                        <div class="grid-day-header" key={day.date_str.clone()}>
                            <div class="day-name">{day.day_name}</div>
                            <div class="day-date">{&day.display}</div>
                        </div>
                    }
                })}

                {for slot_labels.iter().enumerate().map(|(time_index, label)| {
                    html! {
                        <>
                            <div class="grid-time-label" key={label.clone()}>{label}</div>
                            {for week.state.week_days.iter().enumerate().map(|(day_index, day)| {
                                let key = format!("{}|{}", day.date_str, label);
                                let point = DragPoint { day_index, time_index };

                                let is_selected = selected_slots.contains(&key);
                                let is_in_drag = match (*drag_start, *drag_current) {
                                    (Some(start), Some(current)) if *is_dragging => {
                                        in_drag_range(start, current, day_index, time_index)
                                    }
                                    _ => false,
                                };
                                let class = if is_selected {
                                    "drag-cell selected"
                                } else if is_in_drag {
                                    "drag-cell in-drag"
                                } else {
                                    "drag-cell"
                                };

                                let onmousedown = {
                                    let on_cell_mousedown = on_cell_mousedown.clone();
                                    Callback::from(move |e: MouseEvent| {
                                        e.prevent_default();
                                        on_cell_mousedown.emit(point);
                                    })
                                };
                                let onmouseenter = {
                                    let on_cell_mouseenter = on_cell_mouseenter.clone();
                                    Callback::from(move |_: MouseEvent| on_cell_mouseenter.emit(point))
                                };
                                let onmouseup = {
                                    let resolve_drag = resolve_drag.clone();
                                    Callback::from(move |_: MouseEvent| resolve_drag.emit(()))
                                };

                                html! {
                                    <div
                                        {class}
                                        key={key}
                                        {onmousedown}
                                        {onmouseenter}
                                        {onmouseup}
                                    />
                                }
                            })}
                        </>
                    }
                })}
            </div>

            <div class="release-bar">
                <div class="release-count">
                    <span class="release-count-label">{"Total Selected"}</span>
                    <span class="release-count-value">
                        {format!("{:02} slots", selected_slots.len())}
                    </span>
                </div>
                {if !selected_slots.is_empty() {
                    html! {
                        <button type="button" class="btn btn-ghost" onclick={clear_selection}>
                            {"Clear Selection"}
                        </button>
                    }
                } else {
                    html! {}
                }}
                <button
                    type="button"
                    class="btn btn-primary"
                    onclick={on_submit}
                    disabled={*loading || selected_slots.is_empty()}
                >
                    {if *loading { "Releasing..." } else { "Release Slots" }}
                </button>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::use_week::week_days;
    use chrono::NaiveDate;
    use wasm_bindgen_test::*;

    fn monday_week() -> Vec<WeekDay> {
        week_days(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap())
    }

    fn point(day_index: usize, time_index: usize) -> DragPoint {
        DragPoint {
            day_index,
            time_index,
        }
    }

    #[wasm_bindgen_test]
    fn rectangle_is_order_independent() {
        let days = monday_week();
        let labels = time_slots();

        let mut forward = rect_keys(point(0, 1), point(2, 5), &days, &labels);
        let mut backward = rect_keys(point(2, 5), point(0, 1), &days, &labels);
        forward.sort();
        backward.sort();

        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 3 * 5);
    }

    #[wasm_bindgen_test]
    fn monday_morning_to_wednesday_ten_is_nine_keys() {
        let days = monday_week();
        let labels = time_slots();

        // 09:00 is index 0, 10:00 is index 2: 3 days x 3 half-hour slots
        let keys = rect_keys(point(0, 0), point(2, 2), &days, &labels);
        assert_eq!(keys.len(), 9);
        assert!(keys.contains(&"2025-03-10|09:00".to_string()));
        assert!(keys.contains(&"2025-03-11|09:30".to_string()));
        assert!(keys.contains(&"2025-03-12|10:00".to_string()));
    }

    #[wasm_bindgen_test]
    fn overlapping_drags_union_without_duplicates() {
        let days = monday_week();
        let labels = time_slots();

        let mut selection = HashSet::new();
        for key in rect_keys(point(0, 0), point(1, 1), &days, &labels) {
            selection.insert(key);
        }
        for key in rect_keys(point(1, 1), point(2, 2), &days, &labels) {
            selection.insert(key);
        }

        // 4 cells + 4 cells sharing exactly one: 7 distinct keys
        assert_eq!(selection.len(), 7);
    }

    #[wasm_bindgen_test]
    fn cell_membership_covers_reversed_drags() {
        assert!(in_drag_range(point(2, 5), point(0, 1), 1, 3));
        assert!(in_drag_range(point(2, 5), point(0, 1), 0, 1));
        assert!(in_drag_range(point(2, 5), point(0, 1), 2, 5));
        assert!(!in_drag_range(point(2, 5), point(0, 1), 3, 3));
        assert!(!in_drag_range(point(2, 5), point(0, 1), 1, 0));
    }

    #[wasm_bindgen_test]
    fn selection_key_roundtrips_to_release_payload() {
        let release = release_from_key("2025-03-10|09:30").unwrap();
        assert_eq!(release.date, "2025-03-10");
        assert_eq!(release.time_slot, "09:30");
        assert!(release_from_key("no-separator").is_none());
    }
}
