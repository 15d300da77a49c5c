pub mod auth;
pub mod metrics;

pub use auth::{AllowedRoles, AnyStaff, Authorized, EmployeeOnly, JwtAuth, ModeratorOnly};
pub use metrics::track_metrics;
