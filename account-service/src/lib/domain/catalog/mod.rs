pub mod errors;
pub mod ports;

pub use errors::CatalogError;
pub use ports::CatalogReader;
