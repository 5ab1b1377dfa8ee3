use gloo::timers::future::TimeoutFuture;
use shared::ChangePasswordRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::{ApiClient, ApiError};
use crate::services::session::SessionContext;

const MIN_PASSWORD_LEN: usize = 8;

/// Password change for a signed-in user. Mismatch and length problems are
/// caught client-side; a successful change forces a fresh sign-in.
#[function_component(ChangePasswordPage)]
pub fn change_password_page() -> Html {
    let session = use_context::<SessionContext>().expect("session context missing");

    let old_password = use_state(String::new);
    let new_password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let error = use_state(|| Option::<String>::None);
    let success = use_state(|| false);
    let loading = use_state(|| false);

    let bind_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_old_change = bind_input(&old_password);
    let on_new_change = bind_input(&new_password);
    let on_confirm_change = bind_input(&confirm_password);

    let on_submit = {
        let old_password = old_password.clone();
        let new_password = new_password.clone();
        let confirm_password = confirm_password.clone();
        let error = error.clone();
        let success = success.clone();
        let loading = loading.clone();
        let logout = session.logout.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            error.set(None);

            if *new_password != *confirm_password {
                error.set(Some("New passwords do not match.".to_string()));
                return;
            }
            if new_password.len() < MIN_PASSWORD_LEN {
                error.set(Some(format!(
                    "New password must be at least {} characters.",
                    MIN_PASSWORD_LEN
                )));
                return;
            }

            let request = ChangePasswordRequest {
                old_password: (*old_password).clone(),
                new_password: (*new_password).clone(),
                confirm_password: (*confirm_password).clone(),
            };
            let error = error.clone();
            let success = success.clone();
            let loading = loading.clone();
            let logout = logout.clone();

            spawn_local(async move {
                loading.set(true);
                match ApiClient::new().change_password(&request).await {
                    Ok(()) => {
                        success.set(true);
                        // Let the confirmation render, then force re-auth
                        TimeoutFuture::new(2000).await;
                        logout.emit(());
                    }
                    Err(ApiError::Validation(message)) => {
                        error.set(Some(message));
                    }
                    Err(ApiError::Unauthorized) => {
                        error.set(Some("Current password is incorrect.".to_string()));
                    }
                    Err(e) => {
                        error.set(Some(e.to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <main class="page change-password-page">
            <div class="auth-card">
                <h2 class="auth-title">{"Change Password"}</h2>

                {if *success {
                    html! {
                        <div class="alert success">
                            {"Password updated. Signing you out to re-authenticate..."}
                        </div>
                    }
                } else {
                    html! {}
                }}

                {if let Some(error) = (*error).clone() {
                    html! { <div class="alert error">{error}</div> }
                } else {
                    html! {}
                }}

                <form class="auth-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="old-password">{"Current Password"}</label>
                        <input
                            type="password"
                            id="old-password"
                            value={(*old_password).clone()}
                            onchange={on_old_change}
                            disabled={*loading || *success}
                        />
                    </div>

                    <div class="form-group">
                        <label for="new-password">{"New Password"}</label>
                        <input
                            type="password"
                            id="new-password"
                            value={(*new_password).clone()}
                            onchange={on_new_change}
                            disabled={*loading || *success}
                        />
                    </div>

                    <div class="form-group">
                        <label for="confirm-password">{"Confirm New Password"}</label>
                        <input
                            type="password"
                            id="confirm-password"
                            value={(*confirm_password).clone()}
                            onchange={on_confirm_change}
                            disabled={*loading || *success}
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn btn-primary btn-block"
                        disabled={*loading || *success}
                    >
                        {if *loading { "Updating..." } else { "Update Password" }}
                    </button>
                </form>
            </div>
        </main>
    }
}
