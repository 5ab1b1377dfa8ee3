use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::app::{Navigator, Route};
use crate::services::api::{ApiClient, ApiError};

/// Reset-link request. A successful submission only ever reveals the masked
/// email hint returned by the server.
#[function_component(ForgotPasswordPage)]
pub fn forgot_password_page() -> Html {
    let nav = use_context::<Navigator>().expect("navigator context missing");

    let student_id = use_state(String::new);
    let is_sent = use_state(|| false);
    let email_hint = use_state(String::new);
    let error = use_state(|| Option::<String>::None);
    let loading = use_state(|| false);

    let on_student_id_change = {
        let student_id = student_id.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            student_id.set(input.value().to_uppercase());
        })
    };

    let on_submit = {
        let student_id = student_id.clone();
        let is_sent = is_sent.clone();
        let email_hint = email_hint.clone();
        let error = error.clone();
        let loading = loading.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if student_id.trim().is_empty() {
                return;
            }
            let student_id = student_id.clone();
            let is_sent = is_sent.clone();
            let email_hint = email_hint.clone();
            let error = error.clone();
            let loading = loading.clone();

            spawn_local(async move {
                loading.set(true);
                error.set(None);
                match ApiClient::new().forgot_password(student_id.trim()).await {
                    Ok(response) => {
                        email_hint.set(response.email);
                        is_sent.set(true);
                    }
                    Err(ApiError::Validation(message)) => error.set(Some(message)),
                    Err(_) => {
                        error.set(Some("Student ID not found or invalid.".to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    let try_again = {
        let is_sent = is_sent.clone();
        let student_id = student_id.clone();
        let error = error.clone();
        Callback::from(move |_: MouseEvent| {
            is_sent.set(false);
            student_id.set(String::new());
            error.set(None);
        })
    };

    html! {
        <main class="page forgot-password-page">
            <div class="auth-card">
                {if !*is_sent {
                    html! {
                        <>
                            <h2 class="auth-title">{"Forgot Password"}</h2>
                            <p class="auth-subtitle">{"Enter your ID to receive a reset link"}</p>

                            {if let Some(error) = (*error).clone() {
                                html! { <div class="alert error">{error}</div> }
                            } else {
                                html! {}
                            }}

                            <form class="auth-form" onsubmit={on_submit}>
                                <div class="form-group">
                                    <label for="forgot-student-id">{"Student ID"}</label>
                                    <input
                                        type="text"
                                        id="forgot-student-id"
                                        placeholder="e.g. B11209000"
                                        value={(*student_id).clone()}
                                        onchange={on_student_id_change}
                                        disabled={*loading}
                                    />
                                </div>
                                <button
                                    type="submit"
                                    class="btn btn-primary btn-block"
                                    disabled={*loading || student_id.is_empty()}
                                >
                                    {if *loading { "Sending..." } else { "Send Link" }}
                                </button>
                            </form>
                        </>
                    }
                } else {
                    html! {
                        <>
                            <h2 class="auth-title">{"Check Your Email"}</h2>
                            <p class="auth-subtitle">{"We have sent a password reset link to:"}</p>
                            <p class="email-hint">{(*email_hint).clone()}</p>
                            <p class="auth-note">{"The link will expire in 10 minutes."}</p>
                            <button type="button" class="btn btn-ghost" onclick={try_again}>
                                {"Try another ID"}
                            </button>
                        </>
                    }
                }}

                <button
                    type="button"
                    class="link-button auth-footer-link"
                    onclick={{
                        let go = nav.go.clone();
                        Callback::from(move |_| go.emit(Route::Login))
                    }}
                >
                    {"Back to Login"}
                </button>
            </div>
        </main>
    }
}
