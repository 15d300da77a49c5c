pub mod auth;
pub mod metrics;
pub mod products;
pub mod pvz;
pub mod receptions;
