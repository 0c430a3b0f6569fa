// tests/support/mocks/security.rs
use nexus_inventory::application::{
    ApplicationResult, error::ApplicationError, ports::security::PasswordHasher,
};

/// Skips argon2; the "hash" is the password behind a marker prefix.
pub struct DummyPasswordHasher;

#[async_trait::async_trait]
impl PasswordHasher for DummyPasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        if expected_hash == format!("hashed:{password}") {
            Ok(())
        } else {
            Err(ApplicationError::validation("invalid credentials"))
        }
    }
}
