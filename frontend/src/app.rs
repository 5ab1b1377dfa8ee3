use shared::AuthResponse;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::Navbar;
use crate::hooks::use_idle_logout::{use_idle_logout, IdleLogoutConfig};
use crate::pages::{
    ActivatePage, AdminAppointmentsPage, AdminSlotsPage, ChangePasswordPage, ForgotPasswordPage,
    HomePage, LoginPage, MyAppointmentsPage, ProfilePage, ResetPasswordPage,
};
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::session::{self, SessionContext};

/// The routed pages of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Activate,
    ForgotPassword,
    ResetPassword,
    MyAppointments,
    Profile,
    ChangePassword,
    AdminSlots,
    AdminAppointments,
}

/// In-memory navigation handle provided at the app root. Logout and the idle
/// watchdog redirect by sending `Route::Login` through `go`.
#[derive(Clone, PartialEq)]
pub struct Navigator {
    pub route: Route,
    pub go: Callback<Route>,
}

#[function_component(App)]
pub fn app() -> Html {
    let route = use_state(|| Route::Home);
    let user = use_state(session::current_user);

    let go = {
        let route = route.clone();
        Callback::from(move |next: Route| route.set(next))
    };

    let login = {
        let user = user.clone();
        let route = route.clone();
        Callback::from(move |auth: AuthResponse| {
            session::store_session(&auth);
            user.set(Some(auth.user));
            route.set(Route::Home);
        })
    };

    // Best-effort server notification; local clearing and the redirect to
    // sign-in happen even when that call fails.
    let logout = {
        let user = user.clone();
        let route = route.clone();
        Callback::from(move |_| {
            let user = user.clone();
            let route = route.clone();
            spawn_local(async move {
                if let Err(e) = ApiClient::new().logout().await {
                    Logger::warn_with_component(
                        "session",
                        &format!("logout notification failed: {}", e),
                    );
                }
                session::clear_session();
                user.set(None);
                route.set(Route::Login);
            });
        })
    };

    let refresh = {
        let user = user.clone();
        Callback::from(move |_| {
            let user = user.clone();
            spawn_local(async move {
                match ApiClient::new().profile().await {
                    Ok(profile) => {
                        session::store_user(&profile);
                        user.set(Some(profile));
                    }
                    Err(e) => {
                        Logger::warn_with_component(
                            "session",
                            &format!("profile re-sync failed: {}", e),
                        );
                    }
                }
            });
        })
    };

    use_idle_logout(IdleLogoutConfig::default(), logout.clone());

    let session_ctx = SessionContext {
        user: (*user).clone(),
        login,
        logout,
        refresh,
    };
    let navigator = Navigator { route: *route, go };

    let page = match *route {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Activate => html! { <ActivatePage /> },
        Route::ForgotPassword => html! { <ForgotPasswordPage /> },
        Route::ResetPassword => html! { <ResetPasswordPage /> },
        Route::MyAppointments => html! { <MyAppointmentsPage /> },
        Route::Profile => html! { <ProfilePage /> },
        Route::ChangePassword => html! { <ChangePasswordPage /> },
        Route::AdminSlots => html! { <AdminSlotsPage /> },
        Route::AdminAppointments => html! { <AdminAppointmentsPage /> },
    };

    html! {
        <ContextProvider<SessionContext> context={session_ctx}>
            <ContextProvider<Navigator> context={navigator}>
                <Navbar />
                {page}
            </ContextProvider<Navigator>>
        </ContextProvider<SessionContext>>
    }
}
