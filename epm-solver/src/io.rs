use crate::{Map, MarketOutcome, clear_market};
use epm_core::models::{DemandStack, SupplyStack};
use serde::{Deserialize, Serialize};
use std::fmt;

// Scenarios are keyed by a plain string; the newtype keeps them from being
// confused with any other string in the file.

macro_rules! string_wrapper {
    ($struct:ident) => {
        #[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        #[doc = concat!("A newtype wrapper for ", stringify!($struct))]
        pub struct $struct(String);

        impl fmt::Display for $struct {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $struct {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl From<String> for $struct {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_wrapper!(ScenarioId);

/// a pair of bid stacks to be cleared against each other
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// the sell offers
    pub supply: SupplyStack,
    /// the buy bids
    pub demand: DemandStack,
}

impl Scenario {
    /// clear this scenario
    pub fn clear(&self) -> MarketOutcome {
        clear_market(&self.supply, &self.demand)
    }
}

/// a representation of a collection of independent markets
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// the scenarios, in the order they were given
    pub scenarios: Map<ScenarioId, Scenario>,
}

impl Market {
    /// clear every scenario, preserving their order
    pub fn clear(&self) -> Map<ScenarioId, MarketOutcome> {
        self.scenarios
            .iter()
            .map(|(id, scenario)| (id.clone(), scenario.clear()))
            .collect()
    }
}
