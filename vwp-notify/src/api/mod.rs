//! HTTP API handlers for vwp-notify

pub mod health;
pub mod notify;

pub use health::health_routes;
pub use notify::accept_incident;
