use web_sys::{HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

/// Which admin transition the dialog is driving.
#[derive(Clone, Copy, PartialEq)]
pub enum ActionMode {
    Confirm,
    Reject,
}

#[derive(Properties, PartialEq)]
pub struct ActionModalProps {
    pub mode: Option<ActionMode>,
    pub is_processing: bool,
    pub on_close: Callback<()>,
    pub on_confirm: Callback<()>,
    /// Carries the typed rejection reason
    pub on_reject: Callback<String>,
}

/// Confirm/reject dialog for the review table. Reject requires a typed,
/// non-empty reason before the submit button enables.
#[function_component(ActionModal)]
pub fn action_modal(props: &ActionModalProps) -> Html {
    let reason = use_state(String::new);

    // Start each dialog with a blank reason
    {
        let reason = reason.clone();
        use_effect_with(props.mode, move |_| {
            reason.set(String::new());
            || ()
        });
    }

    let mode = match props.mode {
        Some(mode) => mode,
        None => return html! {},
    };

    let on_reason_change = {
        let reason = reason.clone();
        Callback::from(move |e: Event| {
            let textarea: HtmlTextAreaElement = e.target_unchecked_into();
            reason.set(textarea.value());
        })
    };

    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_submit = {
        let on_confirm = props.on_confirm.clone();
        let on_reject = props.on_reject.clone();
        let reason = reason.clone();
        Callback::from(move |_: MouseEvent| match mode {
            ActionMode::Confirm => on_confirm.emit(()),
            ActionMode::Reject => on_reject.emit((*reason).clone()),
        })
    };

    let reject_without_reason = mode == ActionMode::Reject && reason.trim().is_empty();

    html! {
        <div class="modal-backdrop">
            <div class="action-modal">
                <div class={if mode == ActionMode::Reject { "modal-header reject" } else { "modal-header confirm" }}>
                    <h3>
                        {if mode == ActionMode::Reject { "Reject Appointment" } else { "Confirm Appointment" }}
                    </h3>
                </div>

                {if mode == ActionMode::Reject {
                    html! {
                        <div class="form-group">
                            <label for="reject-reason">{"Reason for Rejection"}</label>
                            <textarea
                                id="reject-reason"
                                placeholder="Please explain why this appointment is being rejected..."
                                value={(*reason).clone()}
                                onchange={on_reason_change}
                                disabled={props.is_processing}
                            />
                        </div>
                    }
                } else {
                    html! {
                        <p class="action-prompt">{"Are you sure you want to confirm this appointment?"}</p>
                    }
                }}

                <div class="modal-actions">
                    <button
                        type="button"
                        class="btn btn-ghost"
                        onclick={on_close_click}
                        disabled={props.is_processing}
                    >
                        {"Cancel"}
                    </button>
                    <button
                        type="button"
                        class={if mode == ActionMode::Reject { "btn btn-danger" } else { "btn btn-success" }}
                        onclick={on_submit}
                        disabled={props.is_processing || reject_without_reason}
                    >
                        {if props.is_processing { "Processing..." } else { "Proceed" }}
                    </button>
                </div>
            </div>
        </div>
    }
}
