#![cfg_attr(not(test), forbid(unsafe_code))]
#![warn(clippy::pedantic)]
#![allow(clippy::multiple_crate_versions)] // TODO(deps-001): remove once transitive dependencies converge.

//! Shared building blocks for the RelayChat client.
//!
//! * [`ids`] reconciles gateway thread identifiers with stable local UUIDs.
//! * [`models`] normalizes the loosely shaped records the gateway returns.
//! * [`config`] resolves client settings from files and the environment.

pub mod config;
pub mod ids;
pub mod models;
