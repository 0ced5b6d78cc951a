pub mod use_api_client;
pub mod use_attendance_editor;
pub mod use_identity;
pub mod use_records;
pub mod use_route;
pub mod use_theme;
