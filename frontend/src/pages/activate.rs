use shared::ActivateRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::app::{Navigator, Route};
use crate::services::api::{ApiClient, ApiError};

const MIN_PASSWORD_LEN: usize = 8;

/// Minimal shape check: something before the `@`, a dot somewhere in the
/// domain part.
fn looks_like_email(candidate: &str) -> bool {
    match candidate.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    }
}

/// Two-step account activation: first an eligibility probe on the student
/// ID, then password + contact email with client-side validation before the
/// activation call.
#[function_component(ActivatePage)]
pub fn activate_page() -> Html {
    let nav = use_context::<Navigator>().expect("navigator context missing");

    let step = use_state(|| 1u8);
    let student_id = use_state(String::new);
    let email = use_state(String::new);
    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let error = use_state(|| Option::<String>::None);
    let loading = use_state(|| false);
    let activated = use_state(|| false);

    let bind_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_student_id_change = bind_input(&student_id);
    let on_email_change = bind_input(&email);
    let on_password_change = bind_input(&password);
    let on_confirm_change = bind_input(&confirm_password);

    let on_check = {
        let step = step.clone();
        let student_id = student_id.clone();
        let error = error.clone();
        let loading = loading.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if student_id.trim().is_empty() {
                return;
            }
            let step = step.clone();
            let student_id = student_id.clone();
            let error = error.clone();
            let loading = loading.clone();

            spawn_local(async move {
                loading.set(true);
                error.set(None);
                match ApiClient::new().check_student(student_id.trim()).await {
                    Ok(()) => step.set(2),
                    Err(ApiError::Validation(message)) => error.set(Some(message)),
                    Err(_) => {
                        error.set(Some(
                            "Student ID not found or not eligible for activation.".to_string(),
                        ));
                    }
                }
                loading.set(false);
            });
        })
    };

    let on_activate = {
        let student_id = student_id.clone();
        let email = email.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let activated = activated.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            error.set(None);

            if !email.trim().is_empty() && !looks_like_email(email.trim()) {
                error.set(Some("Please enter a valid email address.".to_string()));
                return;
            }
            if *password != *confirm_password {
                error.set(Some("Passwords do not match.".to_string()));
                return;
            }
            if password.len() < MIN_PASSWORD_LEN {
                error.set(Some(format!(
                    "Password must be at least {} characters.",
                    MIN_PASSWORD_LEN
                )));
                return;
            }

            let request = ActivateRequest {
                student_id: student_id.trim().to_string(),
                password: (*password).clone(),
                email: email.trim().to_string(),
            };
            let error = error.clone();
            let loading = loading.clone();
            let activated = activated.clone();

            spawn_local(async move {
                loading.set(true);
                match ApiClient::new().activate(&request).await {
                    Ok(()) => activated.set(true),
                    Err(ApiError::Validation(message)) => error.set(Some(message)),
                    Err(e) => error.set(Some(e.to_string())),
                }
                loading.set(false);
            });
        })
    };

    if *activated {
        return html! {
            <main class="page activate-page">
                <div class="auth-card">
                    <h2 class="auth-title">{"Account Activated"}</h2>
                    <p class="auth-subtitle">{"You can now sign in with your new password."}</p>
                    <button
                        type="button"
                        class="btn btn-primary btn-block"
                        onclick={{
                            let go = nav.go.clone();
                            Callback::from(move |_| go.emit(Route::Login))
                        }}
                    >
                        {"Go to Sign In"}
                    </button>
                </div>
            </main>
        };
    }

    html! {
        <main class="page activate-page">
            <div class="auth-card">
                <h2 class="auth-title">{"Activate Account"}</h2>
                <p class="auth-subtitle">
                    {if *step == 1 { "Step 1 of 2: verify your student ID" } else { "Step 2 of 2: set your credentials" }}
                </p>

                {if let Some(error) = (*error).clone() {
                    html! { <div class="alert error">{error}</div> }
                } else {
                    html! {}
                }}

                {if *step == 1 {
                    html! {
                        <form class="auth-form" onsubmit={on_check}>
                            <div class="form-group">
                                <label for="activate-student-id">{"Student ID"}</label>
                                <input
                                    type="text"
                                    id="activate-student-id"
                                    placeholder="e.g. B11209000"
                                    value={(*student_id).clone()}
                                    onchange={on_student_id_change}
                                    disabled={*loading}
                                />
                            </div>
                            <button type="submit" class="btn btn-primary btn-block" disabled={*loading}>
                                {if *loading { "Checking..." } else { "Check Eligibility" }}
                            </button>
                        </form>
                    }
                } else {
                    html! {
                        <form class="auth-form" onsubmit={on_activate}>
                            <div class="form-group">
                                <label for="activate-email">{"Contact Email (optional)"}</label>
                                <input
                                    type="email"
                                    id="activate-email"
                                    placeholder="you@example.edu"
                                    value={(*email).clone()}
                                    onchange={on_email_change}
                                    disabled={*loading}
                                />
                            </div>
                            <div class="form-group">
                                <label for="activate-password">{"Password"}</label>
                                <input
                                    type="password"
                                    id="activate-password"
                                    value={(*password).clone()}
                                    onchange={on_password_change}
                                    disabled={*loading}
                                />
                            </div>
                            <div class="form-group">
                                <label for="activate-confirm">{"Confirm Password"}</label>
                                <input
                                    type="password"
                                    id="activate-confirm"
                                    value={(*confirm_password).clone()}
                                    onchange={on_confirm_change}
                                    disabled={*loading}
                                />
                            </div>
                            <button type="submit" class="btn btn-primary btn-block" disabled={*loading}>
                                {if *loading { "Activating..." } else { "Activate" }}
                            </button>
                        </form>
                    }
                }}
            </div>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn email_shape_check_accepts_plausible_addresses() {
        assert!(looks_like_email("student@mail.example.edu"));
        assert!(looks_like_email("a@b.c"));
    }

    #[wasm_bindgen_test]
    fn email_shape_check_rejects_malformed_input() {
        assert!(!looks_like_email("no-at-sign"));
        assert!(!looks_like_email("@missing-local.example"));
        assert!(!looks_like_email("nodot@domain"));
        assert!(!looks_like_email("trailing@dot."));
    }
}
