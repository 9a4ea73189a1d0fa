//! Utility functions shared across layers.
//!
//! - [`validation`] - Long URL and custom short code validation
//! - [`code_generator`] - Random short code generation
//! - [`db_error`] - Database error classification

pub mod code_generator;
pub mod db_error;
pub mod validation;
