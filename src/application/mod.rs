//! Application layer - Use cases, ports and DTOs
//!
//! This layer contains:
//! - DTOs: response envelope and query parameter parsing
//! - Ports: the character store the services depend on
//! - Services: character sheet use cases

pub mod dto;
pub mod ports;
pub mod services;
