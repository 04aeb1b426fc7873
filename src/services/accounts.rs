//! Customer account operations: registration and credential login.

use crate::auth;
use crate::database::customers;
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{0}")]
    MissingFields(&'static str),

    #[error("account already exists for {0}")]
    EmailTaken(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("token issuance failed: {0}")]
    Token(#[from] crate::auth::TokenError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Registration input as extracted from the form body.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Create a customer account. Validation happens before any storage
/// access, so a rejected registration never writes.
pub async fn register(state: &AppState, input: Registration) -> Result<(), AccountError> {
    if input.name.is_empty()
        || input.email.is_empty()
        || input.phone.is_empty()
        || input.password.is_empty()
    {
        return Err(AccountError::MissingFields(
            "Name, email, phone and password are required",
        ));
    }

    if customers::email_exists(&state.pool, &input.email).await? {
        return Err(AccountError::EmailTaken(input.email));
    }

    let password_hash = auth::hash_password(&input.password)?;

    // The pre-check above races concurrent registrations; the unique
    // index on customers.email is what rejects the second insert.
    match customers::insert(
        &state.pool,
        &input.name,
        &input.email,
        &input.phone,
        &password_hash,
    )
    .await
    {
        Ok(id) => {
            tracing::info!(customer_id = id, email = %input.email, "registered customer");
            state.mailer.spawn_welcome(input.email, input.name);
            Ok(())
        }
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            Err(AccountError::EmailTaken(input.email))
        }
        Err(other) => Err(AccountError::Database(other)),
    }
}

/// Verify credentials and mint a bearer token for the subject.
pub async fn login(state: &AppState, email: &str, password: &str) -> Result<String, AccountError> {
    if email.is_empty() || password.is_empty() {
        return Err(AccountError::MissingFields("Email and password are required"));
    }

    match customers::find_by_email(&state.pool, email).await? {
        Some(customer) => {
            if !auth::verify_password(password, &customer.password) {
                return Err(AccountError::InvalidCredentials);
            }
            Ok(auth::issue_token(&state.config.security, &customer.email)?)
        }
        None => {
            // Burn a verification so an unknown email costs roughly the
            // same as a bad password.
            let _ = auth::verify_password(password, auth::NO_ACCOUNT_HASH);
            Err(AccountError::InvalidCredentials)
        }
    }
}
