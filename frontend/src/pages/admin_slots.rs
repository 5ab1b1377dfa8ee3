use yew::prelude::*;

use crate::components::DragSelectGrid;
use crate::services::session::SessionContext;

/// Batch-release page. Staff only; everyone else gets the access notice
/// instead of the grid (the server enforces the same rule on submission).
#[function_component(AdminSlotsPage)]
pub fn admin_slots_page() -> Html {
    let session = use_context::<SessionContext>().expect("session context missing");

    if !session.is_staff() {
        return html! {
            <main class="page admin-slots-page">
                <div class="empty-state">
                    {"Administrator privileges are required to release slots."}
                </div>
            </main>
        };
    }

    html! {
        <main class="page admin-slots-page">
            <h1 class="page-title">{"Release Slots"}</h1>
            <DragSelectGrid />
        </main>
    }
}
