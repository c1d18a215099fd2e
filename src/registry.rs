//! Ordered, fixed-membership arm storage.
//!
//! Both policies keep their per-arm statistics in an [`ArmRegistry`]. The registry is
//! built once from an ordered list of identifiers; afterwards only the statistics of
//! existing arms change. Iteration order is always construction order, which is what
//! makes tie-breaks reproducible.

use std::collections::BTreeSet;

use crate::error::{BanditError, Result};

/// One selectable option and its statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arm<S> {
    id: String,
    pub stats: S,
}

impl<S> Arm<S> {
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Arms keyed by identifier, in insertion order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmRegistry<S> {
    arms: Vec<Arm<S>>,
}

impl<S> ArmRegistry<S> {
    /// Build a registry with one arm per identifier.
    ///
    /// `init` produces the starting statistics for each arm. Fails on the first
    /// repeated identifier; nothing is constructed in that case.
    pub fn new<I, T>(ids: I, mut init: impl FnMut() -> S) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut seen = BTreeSet::new();
        let mut arms = Vec::new();
        for id in ids {
            let id: String = id.into();
            if !seen.insert(id.clone()) {
                return Err(BanditError::DuplicateArm { id });
            }
            arms.push(Arm { id, stats: init() });
        }
        Ok(Self { arms })
    }

    pub fn len(&self) -> usize {
        self.arms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arms.is_empty()
    }

    /// All arms, in construction order.
    pub fn arms(&self) -> &[Arm<S>] {
        &self.arms
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.arms.iter().map(|a| a.id.as_str())
    }

    pub fn get(&self, id: &str) -> Result<&Arm<S>> {
        self.arms
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| BanditError::UnknownArm { id: id.to_string() })
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut Arm<S>> {
        self.arms
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| BanditError::UnknownArm { id: id.to_string() })
    }

    pub(crate) fn at(&self, idx: usize) -> &Arm<S> {
        &self.arms[idx]
    }
}
