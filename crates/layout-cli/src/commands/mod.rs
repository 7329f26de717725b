//! Command implementations for layout-cli

pub mod check;
pub mod design;
pub mod install;
pub mod release;

pub use check::run_check;
pub use design::run_design_vs_device;
pub use install::run_install;
pub use release::run_create_release;
