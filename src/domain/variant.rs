use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Independently deployable evaluation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// Risk-score tiered action rule, served on `/evaluate`
    Tiered,
    /// Amount-based fraud flag rule, served on `/rule`
    FraudFlag,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Tiered, Variant::FraudFlag];

    /// HTTP path this variant is served on.
    pub fn route(&self) -> &'static str {
        match self {
            Variant::Tiered => "/evaluate",
            Variant::FraudFlag => "/rule",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Tiered => "tiered",
            Variant::FraudFlag => "fraud-flag",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        assert_eq!(Variant::Tiered.route(), "/evaluate");
        assert_eq!(Variant::FraudFlag.route(), "/rule");
    }

    #[test]
    fn test_value_enum_matches_display() {
        for variant in Variant::ALL {
            let parsed = Variant::from_str(variant.as_str(), false).unwrap();
            assert_eq!(parsed, variant);
        }
    }
}
