//! UI components.

pub mod controls;
pub mod flow_field;
