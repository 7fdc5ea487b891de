//! Entity ↔ model mappers
//!
//! Conversions from database rows to domain entities live here so that
//! repositories stay focused on SQL.

mod response;
mod survey;
mod user;
