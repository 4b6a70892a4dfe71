//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    credential::{AuthProvider, Credential},
    email::Email,
    user_name::UserName,
    user_password::UserPassword,
};
use crate::error::{IdentityError, IdentityResult};

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    display_name,
    username,
    password_hash,
    provider,
    provider_id,
    avatar_url,
    federated_display_name,
    requires_profile_setup,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed identity repository
#[derive(Clone)]
pub struct PgIdentityRepository {
    pool: PgPool,
}

impl PgIdentityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, predicate: &str, value: &str) -> IdentityResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {predicate} = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }
}

/// Map unique-index violations to the matching conflict
fn map_unique_violation(err: sqlx::Error) -> IdentityError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            match db_err.constraint() {
                Some("users_username_key") => return IdentityError::UserNameTaken,
                Some("users_email_key") => return IdentityError::EmailTaken,
                _ => {}
            }
        }
    }
    IdentityError::Database(err)
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgIdentityRepository {
    async fn create(&self, user: &User) -> IdentityResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                user_id,
                email,
                display_name,
                username,
                password_hash,
                provider,
                provider_id,
                avatar_url,
                federated_display_name,
                requires_profile_setup,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(&user.display_name)
        .bind(user.username.as_ref().map(|u| u.as_str()))
        .bind(user.password().map(|p| p.as_phc_string()))
        .bind(user.provider().code())
        .bind(user.credential.provider_id())
        .bind(&user.avatar_url)
        .bind(&user.federated_display_name)
        .bind(user.requires_profile_setup)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> IdentityResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_email(&self, email: &str) -> IdentityResult<Option<User>> {
        self.find_one("email", email).await
    }

    async fn find_by_username(&self, username: &str) -> IdentityResult<Option<User>> {
        self.find_one("username", username).await
    }

    async fn find_by_provider(
        &self,
        provider: AuthProvider,
        provider_id: &str,
    ) -> IdentityResult<Option<User>> {
        let sql =
            format!("SELECT {USER_COLUMNS} FROM users WHERE provider = $1 AND provider_id = $2");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(provider.code())
            .bind(provider_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn update(&self, user: &User) -> IdentityResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                email = $2,
                display_name = $3,
                avatar_url = $4,
                federated_display_name = $5,
                requires_profile_setup = $6,
                updated_at = $7
            WHERE user_id = $1
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(&user.display_name)
        .bind(&user.avatar_url)
        .bind(&user.federated_display_name)
        .bind(user.requires_profile_setup)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    display_name: String,
    username: Option<String>,
    password_hash: Option<String>,
    provider: String,
    provider_id: Option<String>,
    avatar_url: Option<String>,
    federated_display_name: Option<String>,
    requires_profile_setup: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> IdentityResult<User> {
        let provider: AuthProvider = self.provider.parse().map_err(IdentityError::Internal)?;

        let credential = match (provider, self.password_hash, self.provider_id) {
            (AuthProvider::Local, Some(hash), None) => Credential::Password(
                UserPassword::from_db(hash).map_err(|e| IdentityError::Internal(e.to_string()))?,
            ),
            (provider, None, Some(provider_id)) if provider.is_federated() => {
                Credential::Federated {
                    provider,
                    provider_id,
                }
            }
            _ => {
                return Err(IdentityError::Internal(format!(
                    "User {} has an inconsistent credential path",
                    self.user_id
                )));
            }
        };

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            display_name: self.display_name,
            username: self.username.map(UserName::from_db),
            credential,
            avatar_url: self.avatar_url,
            federated_display_name: self.federated_display_name,
            requires_profile_setup: self.requires_profile_setup,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
