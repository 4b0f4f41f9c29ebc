use serde::Serialize;

use crate::core::sample::Metric;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum Phase {
    L1,
    L2,
    L3,
}

impl Phase {
    pub const ALL: [Self; 3] = [Self::L1, Self::L2, Self::L3];

    pub const fn voltage(self) -> Metric {
        match self {
            Self::L1 => Metric::VoltageL1,
            Self::L2 => Metric::VoltageL2,
            Self::L3 => Metric::VoltageL3,
        }
    }

    pub const fn current(self) -> Metric {
        match self {
            Self::L1 => Metric::CurrentL1,
            Self::L2 => Metric::CurrentL2,
            Self::L3 => Metric::CurrentL3,
        }
    }

    pub const fn power(self) -> Metric {
        match self {
            Self::L1 => Metric::PowerL1,
            Self::L2 => Metric::PowerL2,
            Self::L3 => Metric::PowerL3,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// One value per line of a three-phase system.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct Phases<T> {
    pub l1: T,
    pub l2: T,
    pub l3: T,
}

impl<T> Phases<T> {
    pub fn from_fn(mut f: impl FnMut(Phase) -> T) -> Self {
        Self { l1: f(Phase::L1), l2: f(Phase::L2), l3: f(Phase::L3) }
    }

    pub const fn get(&self, phase: Phase) -> &T {
        match phase {
            Phase::L1 => &self.l1,
            Phase::L2 => &self.l2,
            Phase::L3 => &self.l3,
        }
    }

    pub fn map<R>(&self, mut f: impl FnMut(&T) -> R) -> Phases<R> {
        Phases { l1: f(&self.l1), l2: f(&self.l2), l3: f(&self.l3) }
    }

    pub fn zip<U, R>(&self, other: &Phases<U>, mut f: impl FnMut(&T, &U) -> R) -> Phases<R> {
        Phases {
            l1: f(&self.l1, &other.l1),
            l2: f(&self.l2, &other.l2),
            l3: f(&self.l3, &other.l3),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Phase, &T)> {
        Phase::ALL.into_iter().zip([&self.l1, &self.l2, &self.l3])
    }
}
