//! Networking modules for the remote authentication API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `gateway` owns bearer attachment and authorization-failure eviction, `api`
//! names the REST endpoints, and `types` defines the shared wire schema.

pub mod api;
pub mod gateway;
pub mod types;
