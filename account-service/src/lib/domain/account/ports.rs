use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::EmailAddress;
use crate::account::models::RegisterAccountCommand;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account with validated credentials.
    ///
    /// # Arguments
    /// * `command` - Validated command containing username, email, and password
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Hashing` - Password hashing infrastructure failed
    /// * `Repository` - Store operation failed
    async fn register(&self, command: RegisterAccountCommand) -> Result<Account, AccountError>;

    /// Verify credentials and mint a session token.
    ///
    /// # Arguments
    /// * `email` - Canonicalized email to look up
    /// * `password` - Plaintext password to verify
    ///
    /// # Returns
    /// The account and a signed session token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (one variant,
    ///   deliberately indistinguishable)
    /// * `Token` - Token issuance failed
    /// * `Repository` - Store operation failed
    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
    ) -> Result<(Account, String), AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Repository` - Store operation failed
    async fn get_account(&self, id: &AccountId) -> Result<Account, AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// The store's uniqueness constraint on email is the source of truth for
/// duplicate detection; `create` must be all-or-nothing.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email uniqueness constraint violated
    /// * `Repository` - Store operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Errors
    /// * `Repository` - Store operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve an account by email.
    ///
    /// # Errors
    /// * `Repository` - Store operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError>;
}
