use yew::prelude::*;

use crate::app::{Navigator, Route};
use crate::services::session::SessionContext;

/// Identity card for the signed-in student. Re-syncs the profile from the
/// server on mount, overwriting the cached copy.
#[function_component(ProfilePage)]
pub fn profile_page() -> Html {
    let session = use_context::<SessionContext>().expect("session context missing");
    let nav = use_context::<Navigator>().expect("navigator context missing");

    {
        let refresh = session.refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    let user = match session.current() {
        Some(user) => user.clone(),
        None => {
            return html! {
                <main class="page profile-page">
                    <div class="empty-state">{"Sign in to view your profile."}</div>
                </main>
            }
        }
    };

    let on_change_password = {
        let go = nav.go.clone();
        Callback::from(move |_| go.emit(Route::ChangePassword))
    };

    html! {
        <main class="page profile-page">
            <h1 class="page-title">{"Profile"}</h1>

            <div class="profile-card">
                <div class="profile-field">
                    <span class="profile-label">{"Student ID"}</span>
                    <span class="profile-value">{&user.student_id}</span>
                </div>
                <div class="profile-field">
                    <span class="profile-label">{"Name"}</span>
                    <span class="profile-value">{user.name.as_deref().unwrap_or("-")}</span>
                </div>
                <div class="profile-field">
                    <span class="profile-label">{"Email"}</span>
                    <span class="profile-value">{user.email.as_deref().unwrap_or("-")}</span>
                </div>
                {if user.is_staff {
                    html! {
                        <div class="profile-field">
                            <span class="profile-label">{"Role"}</span>
                            <span class="profile-value">{"Administrator"}</span>
                        </div>
                    }
                } else {
                    html! {}
                }}

                <button type="button" class="btn btn-primary" onclick={on_change_password}>
                    {"Change Password"}
                </button>
            </div>
        </main>
    }
}
