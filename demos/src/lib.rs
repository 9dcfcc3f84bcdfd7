pub mod app_setup_options;
pub mod level_mechanics;
pub mod levels_setup;
pub mod ui;
