use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Fixed muscle-group vocabulary.
///
/// Declaration order matches the priority ranking, so the derived `Ord`
/// sorts groups the way they are presented.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum MuscleGroup {
    Chest,
    Back,
    Delts,
    Legs,
    Biceps,
    Triceps,
    Abs,
    Forearms,
    Rehab,
}

impl MuscleGroup {
    pub const ALL: [MuscleGroup; 9] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Delts,
        MuscleGroup::Legs,
        MuscleGroup::Biceps,
        MuscleGroup::Triceps,
        MuscleGroup::Abs,
        MuscleGroup::Forearms,
        MuscleGroup::Rehab,
    ];

    /// Ranking used to reduce a label set to the (primary, secondary) pair.
    /// Lower ranks sort first; Rehab is unranked.
    pub fn priority(self) -> u8 {
        match self {
            MuscleGroup::Chest | MuscleGroup::Back => 1,
            MuscleGroup::Delts | MuscleGroup::Legs => 2,
            MuscleGroup::Biceps | MuscleGroup::Triceps => 3,
            MuscleGroup::Abs | MuscleGroup::Forearms => 4,
            MuscleGroup::Rehab => 99,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Delts => "Delts",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Abs => "Abs",
            MuscleGroup::Forearms => "Forearms",
            MuscleGroup::Rehab => "Rehab",
        }
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a label outside the fixed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMuscleGroup(pub String);

impl fmt::Display for UnknownMuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown muscle group label: '{}'", self.0)
    }
}

impl std::error::Error for UnknownMuscleGroup {}

impl FromStr for MuscleGroup {
    type Err = UnknownMuscleGroup;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MuscleGroup::ALL
            .iter()
            .find(|group| group.as_str() == s)
            .copied()
            .ok_or_else(|| UnknownMuscleGroup(s.to_string()))
    }
}
