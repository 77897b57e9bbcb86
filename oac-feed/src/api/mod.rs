//! HTTP API handlers for oac-feed

pub mod feed;
pub mod health;

pub use feed::feed_routes;
pub use health::health_routes;
