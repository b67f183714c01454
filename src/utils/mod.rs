//! Pure helpers shared across components.

pub mod color;
pub mod fechas;
pub mod odontograma;
