//! Team Roster API Library
//!
//! Manages teams and their player rosters as single aggregates: domain
//! model, the aggregate service, storage adapters and the HTTP adapter.

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
