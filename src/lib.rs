//! WorkMatrix: attendance, leave and holiday calendar service.
//!
//! [`calendar`] holds the month resolver; the rest is the HTTP service that
//! feeds it from the store.

pub mod api;
pub mod auth;
pub mod calendar;
pub mod config;
pub mod db;
pub mod docs;
pub mod error;
pub mod model;
pub mod models;
pub mod routes;
pub mod store;
