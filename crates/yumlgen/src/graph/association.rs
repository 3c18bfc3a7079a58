//! Association index
//!
//! Merges directed association candidates into at most one edge per
//! unordered pair of types. Each edge remembers which directions were
//! observed (navigability) and the multiplicity seen on each side.

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::core::DiagramError;

/// Cardinality on one end of an association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Multiplicity {
    /// Exactly one, rendered as `1`
    #[default]
    One,
    /// Unbounded, rendered as `0..*`
    Many,
}

impl Multiplicity {
    /// Many absorbs One
    pub fn merge(self, other: Multiplicity) -> Multiplicity {
        if self == Multiplicity::Many || other == Multiplicity::Many {
            Multiplicity::Many
        } else {
            Multiplicity::One
        }
    }

    pub fn is_many(self) -> bool {
        self == Multiplicity::Many
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Multiplicity::One => write!(f, "1"),
            Multiplicity::Many => write!(f, "0..*"),
        }
    }
}

/// A directed observation: `source` holds `multiplicity` references to `target`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssociationCandidate {
    pub source: String,
    pub target: String,
    pub multiplicity: Multiplicity,
}

impl AssociationCandidate {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        multiplicity: Multiplicity,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            multiplicity,
        }
    }
}

/// Merged association between `first` and `second`
///
/// `first` is the source of the earliest observation. Multiplicities are
/// stored per side: `second_multiplicity` is how many `second`s a `first`
/// holds, and vice versa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationEdge {
    pub first: String,
    pub second: String,
    pub first_to_second: bool,
    pub second_to_first: bool,
    pub first_multiplicity: Multiplicity,
    pub second_multiplicity: Multiplicity,
}

impl AssociationEdge {
    fn from_candidate(candidate: &AssociationCandidate) -> Self {
        Self {
            first: candidate.source.clone(),
            second: candidate.target.clone(),
            first_to_second: true,
            second_to_first: false,
            first_multiplicity: Multiplicity::One,
            second_multiplicity: candidate.multiplicity,
        }
    }

    /// Fold another observation of this pair into the edge.
    ///
    /// Fails if the candidate names a different pair of types.
    pub fn observe(&mut self, candidate: &AssociationCandidate) -> Result<(), DiagramError> {
        let (source, target) = (candidate.source.as_str(), candidate.target.as_str());
        if source == self.first && target == self.second {
            self.first_to_second = true;
            self.second_multiplicity = self.second_multiplicity.merge(candidate.multiplicity);
            Ok(())
        } else if source == self.second && target == self.first {
            self.second_to_first = true;
            self.first_multiplicity = self.first_multiplicity.merge(candidate.multiplicity);
            Ok(())
        } else {
            Err(DiagramError::invariant_violation(format!(
                "candidate {} -> {} merged into association {} - {}",
                source, target, self.first, self.second
            )))
        }
    }

    pub fn is_bidirectional(&self) -> bool {
        self.first_to_second && self.second_to_first
    }

    pub fn has_many(&self) -> bool {
        self.first_multiplicity.is_many() || self.second_multiplicity.is_many()
    }
}

/// At most one [`AssociationEdge`] per unordered pair, in creation order
#[derive(Debug, Clone, Default)]
pub struct AssociationIndex {
    edges: Vec<AssociationEdge>,
    keys: HashMap<(String, String), usize>,
}

impl AssociationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one candidate: forward key first, then the reversed key, else a
    /// new edge keyed by the forward pair.
    pub fn observe(&mut self, candidate: &AssociationCandidate) -> Result<(), DiagramError> {
        let forward = (candidate.source.clone(), candidate.target.clone());
        if let Some(&i) = self.keys.get(&forward) {
            trace!(source = %candidate.source, target = %candidate.target, "Merged forward");
            return self.edges[i].observe(candidate);
        }

        let reverse = (candidate.target.clone(), candidate.source.clone());
        if let Some(&i) = self.keys.get(&reverse) {
            trace!(source = %candidate.source, target = %candidate.target, "Merged reverse");
            return self.edges[i].observe(candidate);
        }

        trace!(
            source = %candidate.source,
            target = %candidate.target,
            multiplicity = %candidate.multiplicity,
            "New association"
        );
        self.keys.insert(forward, self.edges.len());
        self.edges.push(AssociationEdge::from_candidate(candidate));
        Ok(())
    }

    pub fn observe_all<'a, I>(&mut self, candidates: I) -> Result<(), DiagramError>
    where
        I: IntoIterator<Item = &'a AssociationCandidate>,
    {
        for candidate in candidates {
            self.observe(candidate)?;
        }
        Ok(())
    }

    /// Look up the edge for a pair in either order
    pub fn get(&self, a: &str, b: &str) -> Option<&AssociationEdge> {
        self.keys
            .get(&(a.to_string(), b.to_string()))
            .or_else(|| self.keys.get(&(b.to_string(), a.to_string())))
            .map(|&i| &self.edges[i])
    }

    pub fn edges(&self) -> &[AssociationEdge] {
        &self.edges
    }

    /// Edges whose earliest observation came from `name`
    pub fn edges_from<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a AssociationEdge> {
        self.edges.iter().filter(move |edge| edge.first == name)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(source: &str, target: &str) -> AssociationCandidate {
        AssociationCandidate::new(source, target, Multiplicity::One)
    }

    fn many(source: &str, target: &str) -> AssociationCandidate {
        AssociationCandidate::new(source, target, Multiplicity::Many)
    }

    #[test]
    fn test_new_edge_is_one_directional() {
        let mut index = AssociationIndex::new();
        index.observe(&many("Eagle", "Wing")).unwrap();

        let edge = index.get("Eagle", "Wing").unwrap();
        assert!(edge.first_to_second);
        assert!(!edge.second_to_first);
        assert_eq!(edge.first_multiplicity, Multiplicity::One);
        assert_eq!(edge.second_multiplicity, Multiplicity::Many);
    }

    #[test]
    fn test_reverse_observation_makes_bidirectional() {
        let mut index = AssociationIndex::new();
        index.observe(&one("A", "B")).unwrap();
        index.observe(&one("B", "A")).unwrap();

        assert_eq!(index.len(), 1);
        let edge = index.get("B", "A").unwrap();
        assert_eq!(edge.first, "A");
        assert!(edge.is_bidirectional());
        assert!(!edge.has_many());
    }

    #[test]
    fn test_forward_many_sticks() {
        let mut index = AssociationIndex::new();
        index.observe(&many("Rock", "Mass")).unwrap();
        index.observe(&one("Rock", "Mass")).unwrap();

        let edge = index.get("Rock", "Mass").unwrap();
        assert_eq!(edge.second_multiplicity, Multiplicity::Many);
        assert!(!edge.is_bidirectional());
    }

    #[test]
    fn test_reverse_many_updates_first_side() {
        let mut index = AssociationIndex::new();
        index.observe(&one("Order", "Customer")).unwrap();
        index.observe(&many("Customer", "Order")).unwrap();

        let edge = index.get("Order", "Customer").unwrap();
        assert_eq!(edge.first_multiplicity, Multiplicity::Many);
        assert_eq!(edge.second_multiplicity, Multiplicity::One);
        assert!(edge.is_bidirectional());
    }

    #[test]
    fn test_many_to_many() {
        let mut index = AssociationIndex::new();
        index.observe(&many("Student", "Course")).unwrap();
        index.observe(&many("Course", "Student")).unwrap();

        let edge = index.get("Student", "Course").unwrap();
        assert_eq!(edge.first_multiplicity, Multiplicity::Many);
        assert_eq!(edge.second_multiplicity, Multiplicity::Many);
    }

    #[test]
    fn test_unrelated_pair_is_invariant_violation() {
        let mut edge = AssociationEdge::from_candidate(&one("A", "B"));
        let err = edge.observe(&one("A", "C")).unwrap_err();
        assert!(matches!(err, DiagramError::InvariantViolation { .. }));
    }

    #[test]
    fn test_edges_from_uses_first_observer() {
        let mut index = AssociationIndex::new();
        index
            .observe_all(&[one("A", "B"), one("B", "A"), one("B", "C")])
            .unwrap();

        assert_eq!(index.edges_from("A").count(), 1);
        assert_eq!(index.edges_from("B").count(), 1);
        assert_eq!(index.edges_from("C").count(), 0);
    }

    #[test]
    fn test_multiplicity_display() {
        assert_eq!(Multiplicity::One.to_string(), "1");
        assert_eq!(Multiplicity::Many.to_string(), "0..*");
        assert_eq!(Multiplicity::One.merge(Multiplicity::Many), Multiplicity::Many);
    }
}
