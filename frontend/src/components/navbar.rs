use web_sys::MouseEvent;
use yew::prelude::*;

use crate::app::{Navigator, Route};
use crate::services::session::SessionContext;

fn nav_link(nav: &Navigator, route: Route, label: &str) -> Html {
    let class = if nav.route == route {
        "nav-link active"
    } else {
        "nav-link"
    };
    let onclick = {
        let go = nav.go.clone();
        Callback::from(move |_: MouseEvent| go.emit(route))
    };
    html! {
        <button type="button" {class} {onclick}>{label}</button>
    }
}

/// Top navigation bar: brand, role-filtered route links and the session
/// affordance (current identity + sign-out, or sign-in).
#[function_component(Navbar)]
pub fn navbar() -> Html {
    let nav = use_context::<Navigator>().expect("navigator context missing");
    let session = use_context::<SessionContext>().expect("session context missing");

    let on_brand_click = {
        let go = nav.go.clone();
        Callback::from(move |_: MouseEvent| go.emit(Route::Home))
    };

    let on_logout = {
        let logout = session.logout.clone();
        Callback::from(move |_: MouseEvent| logout.emit(()))
    };

    html! {
        <header class="navbar">
            <div class="navbar-brand" onclick={on_brand_click}>
                {"Office Hours"}
            </div>

            <nav class="navbar-links">
                {nav_link(&nav, Route::Home, "Slots")}
                {if session.current().is_some() {
                    html! {
                        <>
                            {nav_link(&nav, Route::MyAppointments, "My Records")}
                            {nav_link(&nav, Route::Profile, "Profile")}
                        </>
                    }
                } else {
                    html! {}
                }}
                {if session.is_staff() {
                    html! {
                        <>
                            {nav_link(&nav, Route::AdminSlots, "Release Slots")}
                            {nav_link(&nav, Route::AdminAppointments, "Dashboard")}
                        </>
                    }
                } else {
                    html! {}
                }}
            </nav>

            <div class="navbar-session">
                {if let Some(user) = session.current() {
                    html! {
                        <>
                            <span class="navbar-user">{user.display_name()}</span>
                            <button type="button" class="btn btn-ghost" onclick={on_logout}>
                                {"Sign Out"}
                            </button>
                        </>
                    }
                } else {
                    html! {
                        {nav_link(&nav, Route::Login, "Sign In")}
                    }
                }}
            </div>
        </header>
    }
}
