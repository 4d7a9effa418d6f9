//! Authentication utilities library
//!
//! Provides the credential and session-token infrastructure for the account
//! service:
//! - Password hashing (Argon2id)
//! - Signed session tokens (JWT, HS256) with a fixed lifetime
//! - An authentication coordinator tying the two together
//!
//! The service defines its own domain traits and adapts these implementations,
//! so this crate stays free of any storage or transport concerns.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::issue("account-id", Duration::days(7));
//! let token = handler.encode(&claims).unwrap();
//! let decoded = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "account-id");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::days(7));
//!
//! // Register: hash the password for storage
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify the password and mint a token
//! let result = auth.verify_credentials("password123", &hash, "account-id").unwrap();
//!
//! // Gate: validate the token on later requests
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.sub, "account-id");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
