pub mod auth;
pub mod categories;
pub mod client;
pub mod options;
pub mod orders;
pub mod products;
pub mod vouchers;

pub use client::ApiClient;
