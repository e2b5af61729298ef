//! Authentication and password hashing.
//!
//! Passwords are hashed with Argon2id and stored as PHC strings.

mod password;

pub use password::{PasswordError, hash_password, verify_password, verify_password_against_dummy};
