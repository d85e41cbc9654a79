//! Personalized cross-sell offer service.
//!
//! Loads a customer's joined banking profile from PostgreSQL, wraps it in a
//! fixed instruction prompt, and asks a hosted chat model for a recommendation.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
