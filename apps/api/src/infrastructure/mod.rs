// Infrastructure layer module
// Contains database adapters and external service integrations
// Follows Hexagonal Architecture

pub mod memory;
pub mod metrics;
pub mod repositories;
