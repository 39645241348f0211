//! psychlab-core
//!
//! Pure domain types for PsychLab: patient input, assessment tools, generated
//! reports and the local session marker. No I/O, no AWS dependency.

pub mod error;
pub mod models;
