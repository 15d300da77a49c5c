use serde::Serialize;
use uuid::Uuid;

use super::value_objects::{Email, Role};

/// Registered user
///
/// The credential is only ever held as a bcrypt hash and never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: String,
}
