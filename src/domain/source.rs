//! Rate provider identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a configured rate provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    /// Central Bank of Russia daily XML feed.
    CentralBank,
    /// Investing.com currency pages.
    Investing,
    /// Profinance.ru chart pages.
    Profinance,
}

impl SourceId {
    /// Every known provider, in report order.
    pub const ALL: [SourceId; 3] = [Self::CentralBank, Self::Investing, Self::Profinance];

    /// Human-readable provider name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CentralBank => "CBR",
            Self::Investing => "Investing",
            Self::Profinance => "Profinance",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
