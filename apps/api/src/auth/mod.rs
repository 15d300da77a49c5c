// Authentication helpers
// Password hashing and token issuing, both free of global state

pub mod jwt;
pub mod password;
