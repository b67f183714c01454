//! Dentissta UI Library
//!
//! This crate provides the Dentissta user interface - a single-page
//! management tool for a dental practice: patients, appointments,
//! odontograms, prestaciones and clinical histories.
//!
//! # Architecture
//!
//! The UI is a pure client over the practice's REST API. All data lives
//! on the backend; the crate holds only session state and per-page
//! signals, and every mutation round-trips through [`client`].
//!
//! # Modules
//!
//! - [`app`]: Root application component and routing
//! - [`client`]: REST client (bearer auth, error mapping, endpoints)
//! - [`components`]: UI components (pages, modals, the odontogram editor)
//! - [`state`]: Global session state
//! - [`utils`]: Domain helpers (FDI numbering, colors, date formatting)

pub mod app;
pub mod client;
pub mod components;
pub mod state;
pub mod utils;

pub use app::App;
