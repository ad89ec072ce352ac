//! Security utilities library
//!
//! Provides reusable security infrastructure for account services:
//! - Password hashing (Argon2id) and password strength checking
//! - One-time token and diceware passphrase generation
//! - JWT token generation and validation
//! - Authentication coordination
//!
//! Each service defines its own ports and adapts these implementations.
//! This keeps services decoupled while avoiding duplicated crypto plumbing.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use security::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password1").unwrap();
//! assert!(hasher.verify("my_password1", &hash).unwrap());
//! ```
//!
//! ## One-time Tokens
//! ```
//! use security::TokenGenerator;
//!
//! let generator = TokenGenerator::new();
//! let token = generator.generate();
//! assert_eq!(token.len(), 25);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use security::{Authenticator, Claims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let claims = Claims::for_account("account123", "alice@example.com".to_string(), 24);
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Validate token
//! let decoded: Claims = auth.validate_token(&result.access_token).unwrap();
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenGenerator;
