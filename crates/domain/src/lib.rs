//! newsfront domain crate
//!
//! This crate contains the core domain logic following hexagonal architecture:
//! - `payloads`: Wire shapes of the two upstream providers
//! - `model`: Domain entities and value objects
//! - `adapt`: Mapping of provider payloads onto the unified article
//! - `ports`: Trait definitions for external dependencies (adapters)
//! - `sections`, `routes`: Lookup tables and route helpers
//! - `usecases`: Featured list and page controllers

pub mod adapt;
pub mod model;
pub mod payloads;
pub mod ports;
pub mod routes;
pub mod sections;
pub mod usecases;

pub use model::*;
pub use ports::*;
