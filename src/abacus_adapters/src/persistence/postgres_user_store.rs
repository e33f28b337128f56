use abacus_core::{
    Email, FullName, HashedPassword, NewUser, User, UserId, UserParts, UserStore, UserStoreError,
    Username,
};
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use sqlx::{FromRow, PgPool, migrate::MigrateError};
use uuid::Uuid;

const USERNAME_CONSTRAINT: &str = "users_username_key";
const EMAIL_CONSTRAINT: &str = "users_email_key";

const SELECT_USER: &str = r#"
    SELECT id, username, email, password_hash, full_name, role, enabled,
           refresh_token, password_reset_token, password_reset_token_expiry,
           created_at, updated_at
    FROM users
"#;

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        PostgresUserStore { pool }
    }

    /// Applies the embedded schema migrations.
    pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations").run(pool).await
    }

    async fn find_one(&self, column: &str, value: &str) -> Result<Option<User>, UserStoreError> {
        let query = format!("{SELECT_USER} WHERE {column} = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(User::try_from).transpose()
    }

    async fn exists(&self, column: &str, value: &str) -> Result<bool, UserStoreError> {
        let query = format!("SELECT EXISTS (SELECT 1 FROM users WHERE {column} = $1)");
        sqlx::query_scalar::<_, bool>(&query)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create(&self, user: NewUser) -> Result<User, UserStoreError> {
        let user = User::create(UserId::new(), user, Utc::now());

        sqlx::query(
            r#"
                INSERT INTO users (id, username, email, password_hash, full_name, role, enabled,
                                   created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.username().as_str())
        .bind(user.email().as_str())
        .bind(user.password_hash().as_ref().expose_secret())
        .bind(user.full_name().as_str())
        .bind(user.role().as_str())
        .bind(user.is_enabled())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(user)
    }

    #[tracing::instrument(name = "Saving user to PostgreSQL", skip_all, fields(user_id = %user.id()))]
    async fn save(&self, user: &User) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET username = $2, email = $3, password_hash = $4, full_name = $5, role = $6,
                    enabled = $7, refresh_token = $8, password_reset_token = $9,
                    password_reset_token_expiry = $10, updated_at = $11
                WHERE id = $1
            "#,
        )
        .bind(user.id().as_uuid())
        .bind(user.username().as_str())
        .bind(user.email().as_str())
        .bind(user.password_hash().as_ref().expose_secret())
        .bind(user.full_name().as_str())
        .bind(user.role().as_str())
        .bind(user.is_enabled())
        .bind(user.refresh_token())
        .bind(user.password_reset_token())
        .bind(user.password_reset_token_expiry())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving user by username from PostgreSQL", skip_all)]
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserStoreError> {
        self.find_one("username", username).await
    }

    #[tracing::instrument(name = "Retrieving user by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        self.find_one("email", email).await
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, UserStoreError> {
        self.exists("username", username).await
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, UserStoreError> {
        self.exists("email", email).await
    }
}

#[derive(FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    full_name: String,
    role: String,
    enabled: bool,
    refresh_token: Option<String>,
    password_reset_token: Option<String>,
    password_reset_token_expiry: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let corrupt = |e: abacus_core::UserError| UserStoreError::UnexpectedError(e.to_string());

        Ok(User::from_parts(UserParts {
            id: UserId::from(row.id),
            username: Username::try_from(row.username).map_err(corrupt)?,
            email: Email::try_from(row.email).map_err(corrupt)?,
            password_hash: HashedPassword::new(Secret::from(row.password_hash)),
            full_name: FullName::try_from(row.full_name).map_err(corrupt)?,
            role: row.role.parse().map_err(corrupt)?,
            enabled: row.enabled,
            refresh_token: row.refresh_token,
            password_reset_token: row.password_reset_token,
            password_reset_token_expiry: row.password_reset_token_expiry,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}

fn map_sqlx_error(e: sqlx::Error) -> UserStoreError {
    if let Some(db_err) = e.as_database_error() {
        match db_err.constraint() {
            Some(USERNAME_CONSTRAINT) => return UserStoreError::DuplicateUsername,
            Some(EMAIL_CONSTRAINT) => return UserStoreError::DuplicateEmail,
            _ => {}
        }
    }
    UserStoreError::UnexpectedError(e.to_string())
}
