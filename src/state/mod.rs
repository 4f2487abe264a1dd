pub mod app_settings;
pub mod app_state;
pub mod dashboard;
pub mod messages;
