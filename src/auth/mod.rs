//! Account credentials and bearer tokens.
//!
//! Passwords are stored as Argon2id PHC hashes; access tokens are HS256
//! JWTs whose subject is the user id. The HTTP-side extractor that turns
//! an `Authorization: Bearer` header into a verified user lives with the
//! handlers in [`crate::server`].

mod password;
mod tokens;

pub use password::{hash_password, verify_password};
pub use tokens::{Claims, TokenIssuer};
