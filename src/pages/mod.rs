// src/pages/mod.rs

pub mod categories;
pub mod dashboard;
pub mod login;
pub mod options;
pub mod orders;
pub mod products;
pub mod vouchers;

pub use categories::CategoriesPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use options::OptionsPage;
pub use orders::OrdersPage;
pub use products::ProductsPage;
pub use vouchers::VouchersPage;
