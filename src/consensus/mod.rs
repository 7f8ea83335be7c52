//! Consensus Rules for Oracle Data

pub mod validator;

pub use validator::{RecordValidator, ValidationResult};
