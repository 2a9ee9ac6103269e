//! # IO Module
//!
//! Interface layer between HTTP clients and the domain services.
//!
//! Translates requests into service calls, domain errors into status codes
//! and results into JSON. No scheduling rules live here, with one exception:
//! the REST layer serializes work per minion (see [`rest::MinionLocks`]).

pub mod rest;

pub use rest::*;
