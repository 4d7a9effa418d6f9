use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use account_service::account::errors::AccountError;
use account_service::account::models::Account;
use account_service::account::models::AccountId;
use account_service::account::models::EmailAddress;
use account_service::account::ports::AccountRepository;
use account_service::account::service::AccountService;
use account_service::catalog::errors::CatalogError;
use account_service::catalog::ports::CatalogReader;
use account_service::catalog::ports::TITLES_SECTION;
use account_service::inbound::http::router::create_router;
use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns the real router on a random port, backed by
/// in-memory adapters so the suite needs no external services.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, Duration::days(7)));

        let account_repository = Arc::new(InMemoryAccountRepository::new());
        let account_service = Arc::new(AccountService::new(
            account_repository,
            Arc::clone(&authenticator),
        ));
        let catalog = Arc::new(InMemoryCatalogReader::seeded());

        let router = create_router(account_service, catalog, Arc::clone(&authenticator));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register an account through the public endpoint
    pub async fn register(&self, username: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/register")
            .json(&json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in through the public endpoint
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/login")
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register then log in, returning the session token
    pub async fn register_and_login(&self, username: &str, email: &str, password: &str) -> String {
        let response = self.register(username, email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let response = self.login(email, password).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Login response missing token")
            .to_string()
    }
}

/// In-memory account store enforcing the same email-uniqueness contract as
/// the Postgres adapter: insertion is atomic under the lock, so of two
/// racing duplicates exactly one wins.
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AccountError::EmailAlreadyExists);
        }
        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.id == *id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.email == *email).cloned())
    }
}

/// In-memory catalog with a small fixed seed.
pub struct InMemoryCatalogReader {
    documents: HashMap<(String, String), Value>,
}

impl InMemoryCatalogReader {
    pub fn seeded() -> Self {
        let mut documents = HashMap::new();

        let mut insert = |section: &str, doc_id: &str, document: Value| {
            documents.insert((section.to_string(), doc_id.to_string()), document);
        };

        insert("trending", "t1", json!({"id": "t1", "title": "Echoes"}));
        insert("trending", "t2", json!({"id": "t2", "title": "Northbound"}));
        insert("top-rated", "r1", json!({"id": "r1", "title": "Still Water"}));
        insert(
            TITLES_SECTION,
            "m1",
            json!({"id": "m1", "title": "The Quiet Place"}),
        );
        insert(
            TITLES_SECTION,
            "m2",
            json!({"id": "m2", "title": "Quiet Storm"}),
        );
        insert(
            TITLES_SECTION,
            "m3",
            json!({"id": "m3", "title": "Loud City"}),
        );

        Self { documents }
    }
}

#[async_trait]
impl CatalogReader for InMemoryCatalogReader {
    async fn list_section(&self, section: &str) -> Result<Vec<Value>, CatalogError> {
        let mut entries: Vec<_> = self
            .documents
            .iter()
            .filter(|((s, _), _)| s == section)
            .collect();
        entries.sort_by_key(|((_, doc_id), _)| doc_id.clone());
        Ok(entries.into_iter().map(|(_, doc)| doc.clone()).collect())
    }

    async fn find_title(&self, title_id: &str) -> Result<Option<Value>, CatalogError> {
        Ok(self
            .documents
            .get(&(TITLES_SECTION.to_string(), title_id.to_string()))
            .cloned())
    }

    async fn search_titles(&self, query: &str) -> Result<Vec<Value>, CatalogError> {
        let needle = query.to_lowercase();
        let mut entries: Vec<_> = self
            .documents
            .iter()
            .filter(|((s, _), doc)| {
                s == TITLES_SECTION
                    && doc["title"]
                        .as_str()
                        .map(|t| t.to_lowercase().contains(&needle))
                        .unwrap_or(false)
            })
            .collect();
        entries.sort_by_key(|((_, doc_id), _)| doc_id.clone());
        Ok(entries.into_iter().map(|(_, doc)| doc.clone()).collect())
    }
}
