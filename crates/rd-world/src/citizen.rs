//! Observable citizen facts owned by the host registry.

/// Coarse age bucket; drives school-vs-work routing and spare-time chances.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgeGroup {
    Child,
    Teen,
    Young,
    #[default]
    Adult,
    Senior,
}

impl AgeGroup {
    /// Children and teens go to school; everyone else may work.
    #[inline]
    pub fn is_school_age(self) -> bool {
        matches!(self, AgeGroup::Child | AgeGroup::Teen)
    }
}

/// Where the host currently places a citizen.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CitizenLocation {
    /// Not instantiated anywhere (despawned, or virtual).
    #[default]
    Hidden,
    Home,
    Work,
    Visit,
    Moving,
}

/// Host-owned status flags read by the classifier each tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CitizenFlags {
    pub dead: bool,
    pub sick: bool,
    pub arrested: bool,
    pub evacuating: bool,
    /// Synthetic through-traffic agent; never scheduled.
    pub dummy_traffic: bool,
    pub student: bool,
}
