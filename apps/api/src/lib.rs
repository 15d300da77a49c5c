//! PVZ API Library
//!
//! Pickup point management: PVZ registration, the reception/product
//! lifecycle, and the paginated history listing, behind an axum HTTP API.

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;
