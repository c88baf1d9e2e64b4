//! egui rendering. Everything here reads or mutates [`crate::state::AppState`];
//! no analysis happens in this module.

pub mod panels;
pub mod plot;
pub mod tables;
