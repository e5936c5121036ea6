//! Raving Residents dashboard library.
//!
//! The web application behind the resident benefits dashboard, exposed as a
//! library so the router can be driven in tests with in-memory services.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod gateway;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
