use yew::prelude::*;

use crate::components::{Notice, NotificationModal, SlotGrid};

/// Landing page: hero banner plus the student slot grid. Notifications from
/// the grid surface through a page-owned modal.
#[function_component(HomePage)]
pub fn home_page() -> Html {
    let notice = use_state(|| Option::<Notice>::None);

    let on_notify = {
        let notice = notice.clone();
        Callback::from(move |n: Notice| notice.set(Some(n)))
    };

    let on_close = {
        let notice = notice.clone();
        Callback::from(move |_| notice.set(None))
    };

    html! {
        <main class="page home-page">
            <section class="hero">
                <h1 class="hero-title">{"Office Hours"}</h1>
                <p class="hero-subtitle">{"Pick an open slot below to book a consultation."}</p>
            </section>

            <SlotGrid {on_notify} />

            <NotificationModal notice={(*notice).clone()} {on_close} />
        </main>
    }
}
