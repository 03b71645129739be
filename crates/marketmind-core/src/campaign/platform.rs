//! Supported social platforms.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A social network a campaign targets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Platform {
    Instagram,
    LinkedIn,
    Twitter,
    Facebook,
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Instagram
    }
}
