//! Remote catalog clients

pub mod catalog;

pub use catalog::CatalogClient;
