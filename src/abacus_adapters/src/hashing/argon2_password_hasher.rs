use abacus_core::{HashError, HashedPassword, Password, PasswordHasher};
use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{self, PasswordHasher as _, SaltString, rand_core},
};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};

/// Argon2id with a per-password random salt. Hashing runs on the blocking
/// pool so it never stalls the runtime.
#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

fn argon2() -> Result<Argon2<'static>, HashError> {
    let params = Params::new(15000, 2, 1, None).map_err(|e| HashError(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<HashedPassword, HashError> {
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt: SaltString = SaltString::generate(rand_core::OsRng);
                argon2()?
                    .hash_password(password.as_ref().expose_secret().as_bytes(), &salt)
                    .map(|h| HashedPassword::new(Secret::from(h.to_string())))
                    .map_err(|e| HashError(e.to_string()))
            })
        })
        .await
        .map_err(|e| HashError(e.to_string()))?
    }

    #[tracing::instrument(name = "Verify password hash", skip_all)]
    async fn matches(
        &self,
        candidate: Secret<String>,
        expected: HashedPassword,
    ) -> Result<bool, HashError> {
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected_hash = PasswordHash::new(expected.as_ref().expose_secret())
                    .map_err(|e| HashError(e.to_string()))?;

                match argon2()?
                    .verify_password(candidate.expose_secret().as_bytes(), &expected_hash)
                {
                    Ok(()) => Ok(true),
                    Err(password_hash::Error::Password) => Ok(false),
                    Err(e) => Err(HashError(e.to_string())),
                }
            })
        })
        .await
        .map_err(|e| HashError(e.to_string()))?
    }
}
