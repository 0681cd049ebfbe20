//! Authentication module providing user registration, login and profile lookup.
//!
//! - Argon2id password hashing with a server-side pepper
//! - Login by email with a deliberately generic failure
//! - Signed JWT access tokens so each request can carry its own identity
//!
//! ## Example
//!
//! ```no_run
//! use workout_tracker::auth::{AuthManager, RegisterRequest};
//! use workout_tracker::db::Database;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let auth = AuthManager::new(
//!         Arc::new(db.pool().clone()),
//!         "secret_pepper".to_string(),
//!         "jwt_secret".to_string(),
//!     );
//!
//!     let user_id = auth
//!         .register(RegisterRequest {
//!             username: "alice".to_string(),
//!             email: "alice@example.com".to_string(),
//!             password: "Secret1!".to_string(),
//!             full_name: Some("Alice".to_string()),
//!         })
//!         .await?;
//!     println!("Registered user {user_id}");
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;

pub use errors::{AuthError, AuthResult};
pub use manager::AuthManager;
pub use models::{
    AccessTokenClaims, LoginOutcome, LoginRequest, RegisterRequest, User, UserId, UserProfile,
};
