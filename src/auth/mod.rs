//! Authentication — bcrypt credentials + JWT sessions
//!
//! Provides:
//! - Password hashing and verification (`password` submodule)
//! - JWT token encoding/decoding (`jwt` submodule)
//! - Bearer-token middleware and the `AuthUser` extractor

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
