use serde::Deserialize;

/// Subscription plan tier supplied by the caller.
///
/// The analysis core itself is plan-agnostic; the daily-limit gate runs in
/// the API layer before any acquisition starts. Unknown plan strings
/// deserialize as [`Plan::Free`] (limit 0), matching the upstream policy of
/// rejecting unrecognized tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Basic,
    Standard,
}

/// Result of checking today's usage against a plan's daily limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageCheck {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
}

impl Plan {
    /// Analyses permitted per day for this tier.
    #[must_use]
    pub fn daily_limit(self) -> u32 {
        match self {
            Plan::Free => 0,
            Plan::Basic => 50,
            Plan::Standard => 100,
        }
    }

    /// Check today's usage count against the plan limit.
    #[must_use]
    pub fn check_usage(self, today_usage: u32) -> UsageCheck {
        let limit = self.daily_limit();
        let remaining = limit.saturating_sub(today_usage);
        UsageCheck {
            allowed: remaining > 0,
            limit,
            remaining,
        }
    }
}

impl std::str::FromStr for Plan {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "basic" => Plan::Basic,
            "standard" => Plan::Standard,
            _ => Plan::Free,
        })
    }
}
