use shared::AppointmentStatus;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatusBadgeProps {
    pub status: AppointmentStatus,
}

/// One visual style per lifecycle state.
#[function_component(StatusBadge)]
pub fn status_badge(props: &StatusBadgeProps) -> Html {
    let class = match props.status {
        AppointmentStatus::Available => "status-badge available",
        AppointmentStatus::Scheduled => "status-badge scheduled",
        AppointmentStatus::Confirmed => "status-badge confirmed",
        AppointmentStatus::Cancelled => "status-badge cancelled",
        AppointmentStatus::Completed => "status-badge completed",
    };

    html! {
        <span {class}>{props.status.to_string()}</span>
    }
}
