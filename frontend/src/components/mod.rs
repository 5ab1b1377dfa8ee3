pub mod action_modal;
pub mod appointment_table;
pub mod booking_modal;
pub mod drag_select_grid;
pub mod navbar;
pub mod notification_modal;
pub mod slot_grid;
pub mod status_badge;

pub use action_modal::{ActionModal, ActionMode};
pub use appointment_table::AppointmentTable;
pub use drag_select_grid::DragSelectGrid;
pub use navbar::Navbar;
pub use notification_modal::{ModalVariant, Notice, NotificationModal};
pub use slot_grid::SlotGrid;
