use shared::ResetPasswordRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::app::{Navigator, Route};
use crate::services::api::{ApiClient, ApiError};

const MIN_PASSWORD_LEN: usize = 6;

/// Pull one value out of a `?key=value&...` query string.
fn query_param(search: &str, key: &str) -> Option<String> {
    let query = search.strip_prefix('?').unwrap_or(search);
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        (k == key && !v.is_empty()).then(|| v.to_string())
    })
}

/// Final step of the reset flow. The uid and token arrive in the link's
/// query string; without both the page reports an invalid link instead of
/// submitting.
#[function_component(ResetPasswordPage)]
pub fn reset_password_page() -> Html {
    let nav = use_context::<Navigator>().expect("navigator context missing");

    let link = use_memo((), |_| {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        (
            query_param(&search, "uid"),
            query_param(&search, "token"),
        )
    });

    let password = use_state(String::new);
    let confirm_password = use_state(String::new);
    let error = use_state(|| Option::<String>::None);
    let loading = use_state(|| false);
    let is_success = use_state(|| false);

    let bind_input = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };

    let on_password_change = bind_input(&password);
    let on_confirm_change = bind_input(&confirm_password);

    let on_submit = {
        let link = link.clone();
        let password = password.clone();
        let confirm_password = confirm_password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let is_success = is_success.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            error.set(None);

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
            let (uid, token) = match (&link.0, &link.1) {
                (Some(uid), Some(token)) => (uid.clone(), token.clone()),
                _ => {
                    error.set(Some("Invalid or expired reset link.".to_string()));
                    return;
                }
            };

            let request = ResetPasswordRequest {
                uidb64: uid,
                token,
                otp: None,
                new_password: (*password).clone(),
            };
            let error = error.clone();
            let loading = loading.clone();
            let is_success = is_success.clone();

            spawn_local(async move {
                loading.set(true);
                match ApiClient::new().reset_password(&request).await {
                    Ok(()) => is_success.set(true),
                    Err(ApiError::Validation(message)) => error.set(Some(message)),
                    Err(_) => {
                        error.set(Some("Reset failed. The link may have expired.".to_string()));
                    }
                }
                loading.set(false);
            });
        })
    };

    if *is_success {
        return html! {
            <main class="page reset-password-page">
                <div class="auth-card">
                    <h2 class="auth-title">{"Password Reset"}</h2>
                    <p class="auth-subtitle">{"Your password has been updated."}</p>
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
        <main class="page reset-password-page">
            <div class="auth-card">
                <h2 class="auth-title">{"Reset Password"}</h2>
                <p class="auth-subtitle">{"Create a strong password for your account"}</p>

                {if let Some(error) = (*error).clone() {
                    html! { <div class="alert error">{error}</div> }
                } else {
                    html! {}
                }}

                <form class="auth-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="reset-password">{"New Password"}</label>
                        <input
                            type="password"
                            id="reset-password"
                            value={(*password).clone()}
                            onchange={on_password_change}
                            disabled={*loading}
                        />
                    </div>
                    <div class="form-group">
                        <label for="reset-confirm">{"Confirm Password"}</label>
                        <input
                            type="password"
                            id="reset-confirm"
                            value={(*confirm_password).clone()}
                            onchange={on_confirm_change}
                            disabled={*loading}
                        />
                    </div>
                    <button
                        type="submit"
                        class="btn btn-primary btn-block"
                        disabled={*loading || password.is_empty() || confirm_password.is_empty()}
                    >
                        {if *loading { "Resetting..." } else { "Reset Password" }}
                    </button>
                </form>
            </div>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn query_param_finds_values_with_or_without_leading_mark() {
        assert_eq!(
            query_param("?uid=abc&token=xyz", "uid").as_deref(),
            Some("abc")
        );
        assert_eq!(
            query_param("uid=abc&token=xyz", "token").as_deref(),
            Some("xyz")
        );
    }

    #[wasm_bindgen_test]
    fn query_param_ignores_missing_or_empty_values() {
        assert!(query_param("?uid=abc", "token").is_none());
        assert!(query_param("?token=", "token").is_none());
        assert!(query_param("", "uid").is_none());
        assert!(query_param("?flag&uid=abc", "uid").as_deref() == Some("abc"));
    }
}
