//! Side facts tracked next to the deduction but never feeding into it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ActionError;

/// Which flag an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagId {
    BoneFound,
    CursedPossession,
}

impl fmt::Display for FlagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagId::BoneFound => f.write_str("bone_found"),
            FlagId::CursedPossession => f.write_str("cursed_possession"),
        }
    }
}

/// The cursed object found on the map, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursedPossession {
    TarotCards,
    OuijaBoard,
    HauntedMirror,
    MusicBox,
    SummoningCircle,
    VoodooDoll,
    MonkeyPaw,
}

/// Value carried by a flag update. `Toggle` for `bone_found`, `Choice` for
/// `cursed_possession` (`null` on the wire clears it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    Toggle(bool),
    Choice(Option<CursedPossession>),
}

/// Current value of every flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Flags {
    pub bone_found: bool,
    pub cursed_possession: Option<CursedPossession>,
}

impl Flags {
    pub fn get(&self, flag: FlagId) -> FlagValue {
        match flag {
            FlagId::BoneFound => FlagValue::Toggle(self.bone_found),
            FlagId::CursedPossession => FlagValue::Choice(self.cursed_possession),
        }
    }

    /// Check that `value` has the right kind for `flag` without mutating.
    pub fn validate(flag: FlagId, value: &FlagValue) -> Result<(), ActionError> {
        match (flag, value) {
            (FlagId::BoneFound, FlagValue::Toggle(_))
            | (FlagId::CursedPossession, FlagValue::Choice(_)) => Ok(()),
            (flag, value) => Err(ActionError::invalid(format!(
                "flag {flag} cannot take value {value:?}"
            ))),
        }
    }

    /// Assign `value` to `flag`, returning the previous value.
    pub fn set(&mut self, flag: FlagId, value: FlagValue) -> Result<FlagValue, ActionError> {
        Self::validate(flag, &value)?;
        let previous = self.get(flag);
        match value {
            FlagValue::Toggle(found) => self.bone_found = found,
            FlagValue::Choice(possession) => self.cursed_possession = possession,
        }
        Ok(previous)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
