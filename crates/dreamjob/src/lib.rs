//! Job board core: candidates, vacancies, users and their attachments.
//!
//! Requests flow through [`board::web`] controllers into [`board::service`] and end in the
//! keyed stores of [`board::repository`].

pub mod board;
pub mod config;
pub mod error;
pub mod telemetry;
