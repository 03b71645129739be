//! Mock social accounts.

mod model;

pub use model::{SocialAccount, default_accounts};
