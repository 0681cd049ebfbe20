//! Authentication manager implementation.

use super::{
    errors::{AuthError, AuthResult},
    models::{
        AccessTokenClaims, LoginOutcome, LoginRequest, RegisterRequest, User, UserId, UserProfile,
    },
};
use crate::errors::{has_nul, unique_violation};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use sqlx::{PgPool, Row, postgres::PgRow};
use std::sync::Arc;

/// Hashed at construction; logins for unknown emails verify against it
const DUMMY_PASSWORD: &str = "unused-login-timing-password";

const USER_COLUMNS: &str = "user_id, username, email, full_name, streak, total_workouts, created_at, last_login";

/// Authentication manager
#[derive(Clone)]
pub struct AuthManager {
    pool: Arc<PgPool>,
    pepper: String,
    jwt_secret: String,
    access_token_duration: Duration,
    dummy_hash: Arc<str>,
}

impl AuthManager {
    /// Create a new authentication manager
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `pepper` - Server-side pepper for password hashing
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(pool: Arc<PgPool>, pepper: String, jwt_secret: String) -> Self {
        let dummy_hash = match hash_with_pepper(DUMMY_PASSWORD, &pepper) {
            Ok(hash) => hash,
            Err(e) => {
                log::warn!("Failed to prepare login timing hash: {e}");
                String::new()
            }
        };

        Self {
            pool,
            pepper,
            jwt_secret,
            access_token_duration: Duration::hours(24),
            dummy_hash: dummy_hash.into(),
        }
    }

    /// Override the access token lifetime (default 24 hours)
    pub fn with_access_token_duration(mut self, duration: Duration) -> Self {
        self.access_token_duration = duration;
        self
    }

    /// Register a new user
    ///
    /// # Returns
    ///
    /// * `AuthResult<UserId>` - Id of the created user
    ///
    /// # Errors
    ///
    /// * `AuthError::MissingField` / `InvalidUsername` / `InvalidEmail` / `WeakPassword` - Bad input
    /// * `AuthError::UsernameTaken` - Username already exists
    /// * `AuthError::EmailTaken` - Email already exists
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<UserId> {
        let username = request.username.trim();
        let email = normalize_email(&request.email);
        let full_name = request
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        validate_username(username)?;
        validate_email(&email)?;
        validate_password(&request.password)?;
        if full_name.is_some_and(has_nul) {
            return Err(AuthError::InvalidFullName(
                "Full name must not contain NUL characters".to_string(),
            ));
        }

        let existing_user = sqlx::query("SELECT user_id FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(self.pool.as_ref())
            .await?;
        if existing_user.is_some() {
            return Err(AuthError::UsernameTaken);
        }

        let existing_email = sqlx::query("SELECT user_id FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(self.pool.as_ref())
            .await?;
        if existing_email.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.hash_password(&request.password)?;

        // A concurrent registration can still slip past the checks above;
        // the unique constraints are the final word.
        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, password_hash, full_name)
            VALUES ($1, $2, $3, $4)
            RETURNING user_id
            "#,
        )
        .bind(username)
        .bind(&email)
        .bind(&password_hash)
        .bind(full_name)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match unique_violation(&e) {
            Some(constraint) if constraint.contains("email") => AuthError::EmailTaken,
            Some(_) => AuthError::UsernameTaken,
            None => AuthError::Database(e),
        })?;

        let user_id: UserId = row.get("user_id");
        log::info!("Registered user {user_id} ({username})");

        Ok(user_id)
    }

    /// Login a user by email and password
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidCredentials` - Unknown email or wrong password
    pub async fn login(&self, request: LoginRequest) -> AuthResult<LoginOutcome> {
        let email = normalize_email(&request.email);

        let row = if has_nul(&email) {
            None
        } else {
            sqlx::query(&format!(
                "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = $1"
            ))
            .bind(&email)
            .fetch_optional(self.pool.as_ref())
            .await?
        };
        let Some(row) = row else {
            return Err(self.reject_unknown_email(&request.password));
        };

        let password_hash: String = row.get("password_hash");
        self.verify_password(&request.password, &password_hash)?;

        let user = user_from_row(&row);

        sqlx::query("UPDATE users SET last_login = NOW() WHERE user_id = $1")
            .bind(user.id)
            .execute(self.pool.as_ref())
            .await?;

        let access_token = self.generate_access_token(user.id, &user.username)?;

        Ok(LoginOutcome {
            user: UserProfile::from(user),
            access_token,
        })
    }

    /// Fetch the full user record
    pub async fn find_user(&self, user_id: UserId) -> AuthResult<User> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"))
            .bind(user_id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(user_from_row(&row))
    }

    /// Fetch the public projection of a user
    ///
    /// # Errors
    ///
    /// * `AuthError::UserNotFound` - No user with that id
    pub async fn get_user(&self, user_id: UserId) -> AuthResult<UserProfile> {
        self.find_user(user_id).await.map(UserProfile::from)
    }

    /// Delete a user; workouts and goals cascade with it
    pub async fn delete_user(&self, user_id: UserId) -> AuthResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(AuthError::UserNotFound);
        }

        log::info!("Deleted user {user_id}");
        Ok(())
    }

    /// Verify an access token
    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessTokenClaims> {
        let token_data = decode::<AccessTokenClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Hash password with Argon2id + pepper
    pub(crate) fn hash_password(&self, password: &str) -> AuthResult<String> {
        hash_with_pepper(password, &self.pepper)
    }

    /// Spend one verification on the dummy hash, then fail like a wrong password
    fn reject_unknown_email(&self, password: &str) -> AuthError {
        let _ = self.verify_password(password, &self.dummy_hash);
        AuthError::InvalidCredentials
    }

    /// Verify password against hash
    fn verify_password(&self, password: &str, hash: &str) -> AuthResult<()> {
        let peppered = format!("{}{}", password, self.pepper);
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
        let argon2 = Argon2::default();

        argon2
            .verify_password(peppered.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)
    }

    /// Generate JWT access token
    fn generate_access_token(&self, user_id: UserId, username: &str) -> AuthResult<String> {
        let now = Utc::now();
        let claims = AccessTokenClaims {
            sub: user_id,
            username: username.to_string(),
            exp: (now + self.access_token_duration).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }
}

fn hash_with_pepper(password: &str, pepper: &str) -> AuthResult<String> {
    let peppered = format!("{password}{pepper}");
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    Ok(argon2
        .hash_password(peppered.as_bytes(), &salt)
        .map_err(|_| AuthError::HashingFailed)?
        .to_string())
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("user_id"),
        username: row.get("username"),
        email: row.get("email"),
        full_name: row.get("full_name"),
        streak: row.get("streak"),
        total_workouts: row.get("total_workouts"),
        created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
        last_login: row
            .get::<Option<chrono::NaiveDateTime>, _>("last_login")
            .map(|dt| dt.and_utc()),
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate username format
pub(crate) fn validate_username(username: &str) -> AuthResult<()> {
    if username.is_empty() {
        return Err(AuthError::MissingField("username"));
    }

    let len = username.chars().count();
    if !(3..=20).contains(&len) {
        return Err(AuthError::InvalidUsername(
            "Username must be 3-20 characters".to_string(),
        ));
    }

    if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return Err(AuthError::InvalidUsername(
            "Username can only contain letters, numbers, and underscores".to_string(),
        ));
    }

    Ok(())
}

/// Validate email shape: one `@`, a non-empty local part and a dotted domain
pub(crate) fn validate_email(email: &str) -> AuthResult<()> {
    if email.is_empty() {
        return Err(AuthError::MissingField("email"));
    }

    let invalid = || AuthError::InvalidEmail(format!("'{email}' is not a valid email address"));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.chars().any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}

/// Validate password strength
pub(crate) fn validate_password(password: &str) -> AuthResult<()> {
    if password.is_empty() {
        return Err(AuthError::MissingField("password"));
    }

    if password.len() < 8 {
        return Err(AuthError::WeakPassword(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());

    if !has_digit || !has_uppercase || !has_lowercase {
        return Err(AuthError::WeakPassword(
            "Password must contain at least one number, one uppercase and one lowercase letter"
                .to_string(),
        ));
    }

    Ok(())
}
