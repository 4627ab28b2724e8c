pub mod user;
pub mod crypto;
pub mod news;
pub mod beneficiary;

pub use user::{CurrentUser, User};
pub use crypto::CryptoSnapshot;
pub use news::{NewsCategory, NewsItem, Sentiment};
pub use beneficiary::Beneficiary;
