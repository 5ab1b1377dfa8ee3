use shared::Appointment;
use web_sys::MouseEvent;
use yew::prelude::*;

use super::status_badge::StatusBadge;

#[derive(Properties, PartialEq)]
pub struct AppointmentTableProps {
    pub appointments: Vec<Appointment>,
    #[prop_or_default]
    pub is_admin: bool,
    /// Student revoke, enabled for scheduled/confirmed rows
    #[prop_or_default]
    pub on_cancel: Option<Callback<i64>>,
    /// Admin confirm, enabled for scheduled rows only
    #[prop_or_default]
    pub on_confirm: Option<Callback<i64>>,
    /// Admin reject, enabled for scheduled/confirmed rows
    #[prop_or_default]
    pub on_reject: Option<Callback<i64>>,
}

fn action_button(label: &str, class: &'static str, id: i64, on_click: &Callback<i64>) -> Html {
    let onclick = {
        let on_click = on_click.clone();
        Callback::from(move |_: MouseEvent| on_click.emit(id))
    };
    html! {
        <button type="button" {class} {onclick}>{label}</button>
    }
}

/// Appointment listing shared by the student history page and the admin
/// dashboard. Row actions are gated by the record's status; the table never
/// mutates local state — every action goes through the server followed by a
/// full refetch in the owning page.
#[function_component(AppointmentTable)]
pub fn appointment_table(props: &AppointmentTableProps) -> Html {
    html! {
        <table class="appointment-table">
            <thead>
                <tr>
                    <th>{"Date"}</th>
                    <th>{"Time"}</th>
                    {if props.is_admin { html! { <th>{"Student"}</th> } } else { html! {} }}
                    <th>{"Status"}</th>
                    <th>{"Note / Reason"}</th>
                    <th>{"Action"}</th>
                </tr>
            </thead>
            <tbody>
                {for props.appointments.iter().map(|appt| {
                    html! {
                        <tr key={appt.id}>
                            <td class="cell-date">{&appt.date}</td>
                            <td class="cell-time">{&appt.time_slot}</td>
                            {if props.is_admin {
                                html! {
                                    <td class="cell-student">
                                        {if let Some(student_id) = &appt.student_id {
                                            html! {
                                                <div class="student-cell">
                                                    <span class="student-id">{student_id}</span>
                                                    {if let Some(name) = &appt.student_name {
                                                        html! { <span class="student-name">{name}</span> }
                                                    } else {
                                                        html! {}
                                                    }}
                                                </div>
                                            }
                                        } else {
                                            html! { <span class="cell-empty">{"-"}</span> }
                                        }}
                                    </td>
                                }
                            } else {
                                html! {}
                            }}
                            <td class="cell-status"><StatusBadge status={appt.status} /></td>
                            <td class="cell-reason">
                                {if let Some(rejection) = appt
                                    .rejection_reason
                                    .as_ref()
                                    .filter(|_| appt.status == shared::AppointmentStatus::Cancelled)
                                {
                                    html! { <span class="rejection-reason">{rejection}</span> }
                                } else {
                                    html! {
                                        <span class="booking-reason">
                                            {appt.reason.as_deref().unwrap_or("N/A")}
                                        </span>
                                    }
                                }}
                            </td>
                            <td class="cell-actions">
                                {if props.is_admin {
                                    html! {
                                        <>
                                            {if appt.status.can_confirm() {
                                                if let Some(on_confirm) = &props.on_confirm {
                                                    action_button("Confirm", "btn btn-success btn-sm", appt.id, on_confirm)
                                                } else {
                                                    html! {}
                                                }
                                            } else {
                                                html! {}
                                            }}
                                            {if appt.status.can_reject() {
                                                if let Some(on_reject) = &props.on_reject {
                                                    action_button("Reject", "btn btn-danger btn-sm", appt.id, on_reject)
                                                } else {
                                                    html! {}
                                                }
                                            } else {
                                                html! {}
                                            }}
                                        </>
                                    }
                                } else if appt.status.can_cancel() {
                                    if let Some(on_cancel) = &props.on_cancel {
                                        action_button("Revoke", "btn btn-danger btn-sm", appt.id, on_cancel)
                                    } else {
                                        html! {}
                                    }
                                } else {
                                    html! {}
                                }}
                            </td>
                        </tr>
                    }
                })}
            </tbody>
        </table>
    }
}
