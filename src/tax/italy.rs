use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Upper bound of the 23% IRPEF bracket
pub const IRPEF_FIRST_THRESHOLD: Decimal = dec!(28000);
/// Upper bound of the 35% IRPEF bracket
pub const IRPEF_SECOND_THRESHOLD: Decimal = dec!(50000);

pub const IRPEF_FIRST_RATE: Decimal = dec!(0.23);
pub const IRPEF_SECOND_RATE: Decimal = dec!(0.35);
pub const IRPEF_TOP_RATE: Decimal = dec!(0.43);

/// ATECO activity category with its profitability coefficient (coefficiente di redditività)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivityCategory {
    pub key: &'static str,
    pub label: &'static str,
    pub coefficient: Decimal,
}

pub static ACTIVITY_CATEGORIES: [ActivityCategory; 9] = [
    ActivityCategory {
        key: "commercio",
        label: "Commercio (47.xx)",
        coefficient: dec!(0.40),
    },
    ActivityCategory {
        key: "alloggio",
        label: "Alloggio e ristorazione (55-56)",
        coefficient: dec!(0.40),
    },
    ActivityCategory {
        key: "intermediari",
        label: "Intermediari del commercio (46.1x)",
        coefficient: dec!(0.62),
    },
    ActivityCategory {
        key: "servizi",
        label: "Servizi professionali/tecnici (62-74)",
        coefficient: dec!(0.78),
    },
    ActivityCategory {
        key: "costruzioni",
        label: "Costruzioni (41-43)",
        coefficient: dec!(0.86),
    },
    ActivityCategory {
        key: "ambulante-food",
        label: "Commercio ambulante alimentari",
        coefficient: dec!(0.40),
    },
    ActivityCategory {
        key: "ambulante-nonfood",
        label: "Commercio ambulante non alimentari",
        coefficient: dec!(0.54),
    },
    ActivityCategory {
        key: "professionisti-cassa",
        label: "Attività professionali (con cassa)",
        coefficient: dec!(0.78),
    },
    ActivityCategory {
        key: "altre",
        label: "Altre attività economiche",
        coefficient: dec!(0.67),
    },
];

impl ActivityCategory {
    /// Look up a category by key, case-insensitive. Underscores are accepted in place of dashes.
    pub fn find(key: &str) -> Option<&'static ActivityCategory> {
        let key = key.trim().to_lowercase().replace('_', "-");
        ACTIVITY_CATEGORIES.iter().find(|c| c.key == key)
    }

    /// Professional/technical services, the most common case for freelancers
    pub fn default_category() -> &'static ActivityCategory {
        &ACTIVITY_CATEGORIES[3]
    }
}

/// Substitute tax rate of the flat-rate regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SubstituteRate {
    /// 5% for the first five years of a new activity
    StartUp,
    #[default]
    Standard,
}

impl SubstituteRate {
    pub fn rate(self) -> Decimal {
        match self {
            SubstituteRate::StartUp => dec!(0.05),
            SubstituteRate::Standard => dec!(0.15),
        }
    }

    pub fn percent(self) -> u8 {
        match self {
            SubstituteRate::StartUp => 5,
            SubstituteRate::Standard => 15,
        }
    }
}

impl TryFrom<u8> for SubstituteRate {
    type Error = String;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        match percent {
            5 => Ok(SubstituteRate::StartUp),
            15 => Ok(SubstituteRate::Standard),
            other => Err(format!("substitute rate must be 5 or 15, got {other}")),
        }
    }
}

impl From<SubstituteRate> for u8 {
    fn from(rate: SubstituteRate) -> Self {
        rate.percent()
    }
}

impl std::fmt::Display for SubstituteRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.percent())
    }
}
