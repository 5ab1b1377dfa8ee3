use shared::LoginRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::app::{Navigator, Route};
use crate::services::api::{ApiClient, ApiError};
use crate::services::session::SessionContext;

/// Sign-in form. A 401 maps to the invalid-credentials message; anything
/// else to a generic failure. On success the session context stores the
/// identity and the app navigates home.
#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_context::<SessionContext>().expect("session context missing");
    let nav = use_context::<Navigator>().expect("navigator context missing");

    let student_id = use_state(String::new);
    let password = use_state(String::new);
    let login_error = use_state(|| Option::<String>::None);
    let loading = use_state(|| false);

    let on_student_id_change = {
        let student_id = student_id.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            student_id.set(input.value());
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let student_id = student_id.clone();
        let password = password.clone();
        let login_error = login_error.clone();
        let loading = loading.clone();
        let session_login = session.login.clone();
        let go = nav.go.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if student_id.trim().is_empty() || password.is_empty() {
                login_error.set(Some("Student ID and password are required.".to_string()));
                return;
            }

            let credentials = LoginRequest {
                student_id: (*student_id).clone(),
                password: (*password).clone(),
            };
            let login_error = login_error.clone();
            let loading = loading.clone();
            let session_login = session_login.clone();
            let go = go.clone();

            spawn_local(async move {
                loading.set(true);
                login_error.set(None);

                match ApiClient::new().login(&credentials).await {
                    Ok(auth) => {
                        session_login.emit(auth);
                        go.emit(Route::Home);
                    }
                    Err(ApiError::Unauthorized) => {
                        login_error.set(Some("Invalid Student ID or Password".to_string()));
                    }
                    Err(_) => {
                        login_error.set(Some("System error. Please try again later.".to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    html! {
        <main class="page login-page">
            <div class="auth-card">
                <h2 class="auth-title">{"Sign In"}</h2>
                <p class="auth-subtitle">
                    {"No account yet? "}
                    <button
                        type="button"
                        class="link-button"
                        onclick={{
                            let go = nav.go.clone();
                            Callback::from(move |_| go.emit(Route::Activate))
                        }}
                    >
                        {"Activate your account"}
                    </button>
                </p>

                {if let Some(error) = (*login_error).clone() {
                    html! { <div class="alert error">{error}</div> }
                } else {
                    html! {}
                }}

                <form class="auth-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="student-id">{"Student ID"}</label>
                        <input
                            type="text"
                            id="student-id"
                            placeholder="Enter ID"
                            value={(*student_id).clone()}
                            onchange={on_student_id_change}
                            disabled={*loading}
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">{"Password"}</label>
                        <input
                            type="password"
                            id="password"
                            placeholder="Enter Password"
                            value={(*password).clone()}
                            onchange={on_password_change}
                            disabled={*loading}
                        />
                    </div>

                    <button type="submit" class="btn btn-primary btn-block" disabled={*loading}>
                        {if *loading { "Signing In..." } else { "Sign In" }}
                    </button>
                </form>

                <button
                    type="button"
                    class="link-button auth-footer-link"
                    onclick={{
                        let go = nav.go.clone();
                        Callback::from(move |_| go.emit(Route::ForgotPassword))
                    }}
                >
                    {"Forgot password?"}
                </button>
            </div>
        </main>
    }
}
