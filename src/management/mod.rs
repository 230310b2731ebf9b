mod auth;
mod cache;
mod data;

pub use auth::FileTokenStore;
pub use auth::MemoryTokenStore;
pub use auth::TokenManager;
pub use auth::TokenStore;
pub use cache::DashboardCache;
pub use data::DashboardDataManager;
