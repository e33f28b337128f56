use abacus_core::{
    Email, FullName, NewUser, NotificationGateway, Password, PasswordHasher, TokenService,
    UserStore, Username,
};

use super::{
    messages,
    session::{AuthSession, start_session},
};
use crate::error::AuthError;

#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub username: Username,
    pub email: Email,
    pub password: Password,
    pub full_name: FullName,
}

/// Signup use case - registers a user and signs them in
pub struct SignupUseCase<'a, U, T, H, N>
where
    U: UserStore,
    T: TokenService,
    H: PasswordHasher,
    N: NotificationGateway,
{
    user_store: &'a U,
    token_service: &'a T,
    password_hasher: &'a H,
    notifier: &'a N,
}

impl<'a, U, T, H, N> SignupUseCase<'a, U, T, H, N>
where
    U: UserStore,
    T: TokenService,
    H: PasswordHasher,
    N: NotificationGateway,
{
    pub fn new(
        user_store: &'a U,
        token_service: &'a T,
        password_hasher: &'a H,
        notifier: &'a N,
    ) -> Self {
        Self {
            user_store,
            token_service,
            password_hasher,
            notifier,
        }
    }

    /// Execute the signup use case
    ///
    /// The welcome email is best effort: a delivery failure is logged and the
    /// registration still succeeds.
    #[tracing::instrument(
        name = "SignupUseCase::execute",
        skip(self, request),
        fields(username = %request.username)
    )]
    pub async fn execute(&self, request: SignupRequest) -> Result<AuthSession, AuthError> {
        if self
            .user_store
            .exists_by_username(request.username.as_str())
            .await?
        {
            tracing::warn!("Username already taken");
            return Err(AuthError::UsernameTaken);
        }
        if self.user_store.exists_by_email(request.email.as_str()).await? {
            tracing::warn!("Email already registered");
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.password_hasher.hash(request.password).await?;

        // A concurrent signup can still win the race; the store's unique
        // constraints surface it as a duplicate error here.
        let user = self
            .user_store
            .create(NewUser::new(
                request.username,
                request.email,
                password_hash,
                request.full_name,
            ))
            .await?;

        let recipient = user.email().clone();
        let username = user.username().clone();
        let session = start_session(
            self.user_store,
            self.token_service,
            user,
            messages::USER_REGISTERED,
        )
        .await?;

        if let Err(e) = self.notifier.send_welcome_email(&recipient, &username).await {
            let error = AuthError::from(e);
            tracing::warn!(%error, "Welcome email not sent");
        }

        tracing::info!("User registered");
        Ok(session)
    }
}
