use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterAccountCommand;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
/// Argon2 work runs on the blocking pool so its CPU cost cannot starve the
/// cheap token-verification path on the async workers.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Credential hasher and token issuer (holds the
    ///   process-wide signing secret)
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError> {
        // Fast-path duplicate check. The store's unique constraint remains
        // the source of truth for concurrent registrations.
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(AccountError::EmailAlreadyExists);
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password.into_inner();
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(&password))
                .await
                .map_err(|e| AccountError::Hashing(e.to_string()))?
                .map_err(|e| AccountError::Hashing(e.to_string()))?;

        let account = Account {
            id: AccountId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        self.repository.create(account).await
    }

    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<(Account, String), AccountError> {
        let account = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let authenticator = Arc::clone(&self.authenticator);
        let password = password.to_string();
        let stored_hash = account.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || {
            authenticator.password_matches(&password, &stored_hash)
        })
        .await
        .map_err(|e| AccountError::Hashing(e.to_string()))?;

        if !matches {
            return Err(AccountError::InvalidCredentials);
        }

        let token = self
            .authenticator
            .issue_token(account.id)
            .map_err(|e| AccountError::Token(e.to_string()))?;

        Ok((account, token))
    }

    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::account::models::Password;
    use crate::account::models::Username;

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(
            b"test_secret_key_at_least_32_bytes!",
            Duration::days(7),
        ))
    }

    fn register_command(email: &str) -> RegisterAccountCommand {
        RegisterAccountCommand::new(
            Username::new("testuser".to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            Password::new("password12".to_string()).unwrap(),
        )
    }

    fn stored_account(auth: &Authenticator, email: &str, password: &str) -> Account {
        Account {
            id: AccountId::new(),
            username: Username::new("testuser".to_string()).unwrap(),
            email: EmailAddress::new(email.to_string()).unwrap(),
            password_hash: auth.hash_password(password).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|account| {
                account.username.as_str() == "testuser"
                    && account.email.as_str() == "test@example.com"
                    && account.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|account| Ok(account));

        let service = AccountService::new(Arc::new(repository), authenticator());

        let account = service
            .register(register_command("test@example.com"))
            .await
            .expect("registration failed");

        assert_eq!(account.email.as_str(), "test@example.com");
        // The plaintext never ends up in the stored hash field
        assert!(account.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_fast_path() {
        let auth = authenticator();
        let existing = stored_account(&auth, "test@example.com", "password12");

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        // No insert attempted when the fast path already found the email
        repository.expect_create().times(0);

        let service = AccountService::new(Arc::new(repository), auth);

        let result = service.register(register_command("test@example.com")).await;
        assert!(matches!(result, Err(AccountError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_at_store() {
        // Fast path misses but the store's unique constraint still rejects,
        // as happens when two registrations race.
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|_| Err(AccountError::EmailAlreadyExists));

        let service = AccountService::new(Arc::new(repository), authenticator());

        let result = service.register(register_command("test@example.com")).await;
        assert!(matches!(result, Err(AccountError::EmailAlreadyExists)));
    }

    #[tokio::test]
    async fn test_login_success_issues_valid_token() {
        let auth = authenticator();
        let account = stored_account(&auth, "test@example.com", "password12");
        let account_id = account.id;

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AccountService::new(Arc::new(repository), Arc::clone(&auth));

        let email = EmailAddress::new("test@example.com".to_string()).unwrap();
        let (logged_in, token) = service
            .login(&email, "password12")
            .await
            .expect("login failed");

        assert_eq!(logged_in.id, account_id);

        let claims = auth.validate_token(&token).expect("token rejected");
        assert_eq!(claims.sub, account_id.to_string());
    }

    #[tokio::test]
    async fn test_login_unknown_email() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(repository), authenticator());

        let email = EmailAddress::new("missing@example.com".to_string()).unwrap();
        let result = service.login(&email, "password12").await;
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_wrong_password_same_outcome() {
        let auth = authenticator();
        let account = stored_account(&auth, "test@example.com", "password12");

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AccountService::new(Arc::new(repository), auth);

        let email = EmailAddress::new("test@example.com".to_string()).unwrap();
        let result = service.login(&email, "password13").await;

        // Same variant as the unknown-email case: no account enumeration
        assert!(matches!(result, Err(AccountError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_get_account_success() {
        let auth = authenticator();
        let account = stored_account(&auth, "test@example.com", "password12");
        let account_id = account.id;

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == account_id)
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AccountService::new(Arc::new(repository), auth);

        let found = service.get_account(&account_id).await.expect("lookup failed");
        assert_eq!(found.id, account_id);
    }

    #[tokio::test]
    async fn test_get_account_not_found() {
        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = AccountService::new(Arc::new(repository), authenticator());

        let result = service.get_account(&AccountId::new()).await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }
}
