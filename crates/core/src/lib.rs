//! # College Core
//!
//! Domain types shared by the store and API crates: entity models, request
//! and response shapes, the error type, and the pure rules that do not touch
//! storage (shift classification, date parsing, identifier parsing).

pub mod calendar;
pub mod errors;
pub mod ids;
pub mod models;
pub mod patch;
pub mod shift;
