use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::Username;
use crate::account::ports::AccountRepository;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn account_from_row(row: &PgRow) -> Result<Account, AccountError> {
    Ok(Account {
        id: AccountId(
            row.try_get("id")
                .map_err(|e| AccountError::Repository(e.to_string()))?,
        ),
        username: Username::new(
            row.try_get("username")
                .map_err(|e| AccountError::Repository(e.to_string()))?,
        )?,
        email: EmailAddress::new(
            row.try_get("email")
                .map_err(|e| AccountError::Repository(e.to_string()))?,
        )?,
        password_hash: row
            .try_get("password_hash")
            .map_err(|e| AccountError::Repository(e.to_string()))?,
        created_at: row
            .try_get("created_at")
            .map_err(|e| AccountError::Repository(e.to_string()))?,
    })
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.id.0)
        .bind(account.username.as_str())
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                // The unique index on email is the source of truth for
                // duplicate registrations, including racing ones.
                if db_err.is_unique_violation() {
                    return AccountError::EmailAlreadyExists;
                }
            }
            AccountError::Repository(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Repository(e.to_string()))?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Repository(e.to_string()))?;

        row.as_ref().map(account_from_row).transpose()
    }
}
