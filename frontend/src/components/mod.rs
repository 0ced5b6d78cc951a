pub mod attendance_form;
pub mod attendance_modal;
pub mod charts;
pub mod dashboard;
pub mod date_picker;
pub mod delete_modal;
pub mod header;
pub mod landing;
pub mod record_table;
pub mod sidebar;

pub use dashboard::Dashboard;
pub use landing::Landing;
