pub mod client;
pub mod error;
pub mod provider;
pub mod session;

pub use client::{AuthClient, SessionSubscription};
pub use error::ProviderError;
pub use session::UserInfo;
