//! Planet definitions.
//!
//! Planets are immutable values owned by the static tile catalog. Systems
//! borrow them as `&'static [Planet]`, so tiles stay cheap to clone.

use std::fmt;

use serde::Serialize;

/// Planet trait printed on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Trait {
    None,
    Industrial,
    Cultural,
    Hazardous,
}

/// Technology specialty color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Specialty {
    None,
    Red,
    Yellow,
    Green,
    Blue,
}

/// A single planet inside a system tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Planet {
    pub name: &'static str,
    pub resources: u32,
    pub influence: u32,
    pub planet_trait: Trait,
    pub specialty: Specialty,
}

impl Planet {
    /// Creates a planet with no trait and no specialty.
    pub const fn new(name: &'static str, resources: u32, influence: u32) -> Self {
        Planet {
            name,
            resources,
            influence,
            planet_trait: Trait::None,
            specialty: Specialty::None,
        }
    }

    /// Creates a planet with a trait and a specialty.
    pub const fn with_traits(
        name: &'static str,
        resources: u32,
        influence: u32,
        planet_trait: Trait,
        specialty: Specialty,
    ) -> Self {
        Planet {
            name,
            resources,
            influence,
            planet_trait,
            specialty,
        }
    }

    /// The larger of resources and ratio-weighted influence.
    #[inline]
    pub fn max_value(&self, influence_ratio: f64) -> f64 {
        (self.resources as f64).max(influence_ratio * self.influence as f64)
    }

    /// Resources plus ratio-weighted influence.
    #[inline]
    pub fn summed_value(&self, influence_ratio: f64) -> f64 {
        self.resources as f64 + influence_ratio * self.influence as f64
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({},{})", self.name, self.resources, self.influence)
    }
}
