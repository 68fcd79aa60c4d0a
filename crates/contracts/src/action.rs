//! TilgangerAction - the closed set of actions this adapter understands

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ContractError;

/// Actions defined for the tilganger (access rights) domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TilgangerAction {
    GetAllIdentitet,
    GetIdentitet,
    UpdateIdentitet,
    GetAllRettighet,
    GetRettighet,
    UpdateRettighet,
}

impl TilgangerAction {
    /// Every known action, in declaration order
    pub const ALL: [TilgangerAction; 6] = [
        Self::GetAllIdentitet,
        Self::GetIdentitet,
        Self::UpdateIdentitet,
        Self::GetAllRettighet,
        Self::GetRettighet,
        Self::UpdateRettighet,
    ];

    /// Wire name of the action
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GetAllIdentitet => "GET_ALL_IDENTITET",
            Self::GetIdentitet => "GET_IDENTITET",
            Self::UpdateIdentitet => "UPDATE_IDENTITET",
            Self::GetAllRettighet => "GET_ALL_RETTIGHET",
            Self::GetRettighet => "GET_RETTIGHET",
            Self::UpdateRettighet => "UPDATE_RETTIGHET",
        }
    }
}

impl FromStr for TilgangerAction {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| ContractError::unknown_action(s))
    }
}

impl fmt::Display for TilgangerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
