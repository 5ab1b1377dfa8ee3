pub mod use_appointments;
pub mod use_idle_logout;
pub mod use_week;
