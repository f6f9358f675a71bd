//! Portfolio site library.
//!
//! Serves the public pages (home, about, projects, contact) and the admin
//! panel from a single binary. Exposed as a library so the CLI can reuse the
//! configuration, repositories, and auth service for migrations and admin
//! bootstrapping.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod csrf;
pub mod db;
pub mod error;
pub mod filters;
pub mod flash;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
