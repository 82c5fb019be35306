//! Label to waste category lookup.

use serde::{Deserialize, Serialize};

/// Waste category reported for the top prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WasteType {
    /// Breaks down naturally.
    Biodegradable,
    /// Does not break down naturally.
    NonBiodegradable,
}

impl WasteType {
    /// Category used for labels with no explicit mapping.
    pub const DEFAULT: Self = Self::NonBiodegradable;

    /// Category for a model label, matched case-insensitively.
    pub fn for_label(label: &str) -> Self {
        label
            .to_lowercase()
            .parse::<KnownLabel>()
            .map_or(Self::DEFAULT, KnownLabel::waste_type)
    }
}

impl std::fmt::Display for WasteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Biodegradable => write!(f, "biodegradable"),
            Self::NonBiodegradable => write!(f, "non-biodegradable"),
        }
    }
}

/// Labels with an explicit waste category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownLabel {
    /// `bottle`
    Bottle,
    /// `carrybag` or `carry_bag`
    CarryBag,
}

impl KnownLabel {
    /// Category for this label.
    pub const fn waste_type(self) -> WasteType {
        match self {
            Self::Bottle | Self::CarryBag => WasteType::NonBiodegradable,
        }
    }
}

impl std::str::FromStr for KnownLabel {
    type Err = String;

    /// Expects an already lowercased label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottle" => Ok(Self::Bottle),
            "carrybag" | "carry_bag" => Ok(Self::CarryBag),
            other => Err(format!("unmapped label: {other}")),
        }
    }
}
