use shared::Appointment;
use web_sys::{HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BookingModalProps {
    pub is_open: bool,
    pub selected: Option<Appointment>,
    pub reason: String,
    pub on_reason_change: Callback<Event>,
    pub is_submitting: bool,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
}

/// Booking submission dialog: shows the picked slot and collects the
/// free-text consultation reason. Visibility is component-local state in the
/// parent, passed down as a prop.
#[function_component(BookingModal)]
pub fn booking_modal(props: &BookingModalProps) -> Html {
    if !props.is_open {
        return html! {};
    }

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_submit = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };

    let reason_empty = props.reason.trim().is_empty();

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="booking-modal" onclick={on_modal_click}>
                <div class="modal-header">
                    <h3>{"Confirm Office Hour"}</h3>
                    <button type="button" class="modal-close" onclick={on_close_click}>{"✕"}</button>
                </div>

                {if let Some(slot) = &props.selected {
                    html! {
                        <div class="selected-slot">
                            <span class="selected-slot-label">{"Selected Slot"}</span>
                            <span class="selected-slot-value">
                                {format!("{} {}", slot.date, slot.time_slot)}
                            </span>
                        </div>
                    }
                } else {
                    html! {}
                }}

                <div class="form-group">
                    <label for="booking-reason">{"Consultation Subject / Reason"}</label>
                    <textarea
                        id="booking-reason"
                        placeholder="Describe your questions or discussion topics..."
                        value={props.reason.clone()}
                        onchange={props.on_reason_change.clone()}
                        disabled={props.is_submitting}
                    />
                </div>

                <button
                    type="button"
                    class="btn btn-primary btn-block"
                    onclick={on_submit}
                    disabled={props.is_submitting || reason_empty}
                >
                    {if props.is_submitting { "Processing..." } else { "Submit Booking" }}
                </button>
            </div>
        </div>
    }
}

/// Read the textarea value out of a change event.
pub fn textarea_value(e: &Event) -> String {
    e.target_unchecked_into::<HtmlTextAreaElement>().value()
}
