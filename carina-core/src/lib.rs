//! Carina Core
//!
//! Resource model and schema engine shared by Carina providers

pub mod provider;
pub mod resource;
pub mod schema;
