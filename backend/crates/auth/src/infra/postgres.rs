//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountRepository, ResetMarkRepository};
use crate::domain::value_object::{
    account_id::AccountId, account_password::AccountPassword, display_name::DisplayName,
    email::Email, phone::Phone,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed account repository
///
/// Also carries the reset-mark state as a column on the accounts
/// table; the mark is per account and tiny, so a separate table buys
/// nothing.
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for PgAccountRepository {
    async fn create(&self, account: &Account) -> AuthResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                password_phc,
                display_name,
                phone,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.display_name.as_str())
        .bind(account.phone.as_ref().map(|p| p.as_str()))
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
                Err(AuthError::DuplicateEmail)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                password_phc,
                display_name,
                phone,
                created_at,
                updated_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                email,
                password_phc,
                display_name,
                phone,
                created_at,
                updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_account()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn replace_password(
        &self,
        account_id: &AccountId,
        password_hash: &AccountPassword,
    ) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts SET
                password_phc = $2,
                updated_at = $3
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(password_hash.as_phc_string())
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, account: &Account) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE accounts SET
                display_name = $2,
                phone = $3,
                updated_at = $4
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.display_name.as_str())
        .bind(account.phone.as_ref().map(|p| p.as_str()))
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl ResetMarkRepository for PgAccountRepository {
    async fn mark_consumed(&self, account_id: &AccountId, window: u64) -> AuthResult<()> {
        // GREATEST keeps the mark monotonic under concurrent resets.
        sqlx::query(
            r#"
            UPDATE accounts SET
                reset_consumed_window = GREATEST(COALESCE(reset_consumed_window, 0), $2)
            WHERE account_id = $1
            "#,
        )
        .bind(account_id.as_uuid())
        .bind(window as i64)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn last_consumed_window(&self, account_id: &AccountId) -> AuthResult<Option<u64>> {
        let mark = sqlx::query_scalar::<_, Option<i64>>(
            "SELECT reset_consumed_window FROM accounts WHERE account_id = $1",
        )
        .bind(account_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .flatten();

        Ok(mark.map(|m| m as u64))
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    password_phc: String,
    display_name: String,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AuthResult<Account> {
        let password_hash = AccountPassword::from_phc_string(self.password_phc)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            password_hash,
            display_name: DisplayName::from_db(self.display_name),
            phone: self.phone.map(Phone::from_db),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
