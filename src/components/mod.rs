//! UI components, grouped by feature area.

pub mod auth;
pub mod citas;
pub mod common;
pub mod configuracion;
pub mod dashboard;
pub mod historia;
pub mod layout;
pub mod obras_sociales;
pub mod odontograma;
pub mod pacientes;
pub mod prestaciones;
