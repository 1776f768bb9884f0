//! Row structs and insert DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the table and,
//! where the tools insert rows, a `Create*` DTO.

pub mod agent;
pub mod category;
pub mod notification;
pub mod ticket;
pub mod user;
