pub mod account;
pub mod catalog;

pub use account::PostgresAccountRepository;
pub use catalog::PostgresCatalogReader;
