//! Static methodology definition and step ordering.
//!
//! The methodology is an immutable, injectable table of phases, each
//! holding an ordered list of step names. Flattening the table in
//! declaration order yields the single global sequence that drives
//! navigation: a step is reachable only when every gap before it has been
//! closed by approvals, and a step's input is chained from its immediate
//! predecessor only.

/// A top-level grouping of steps (e.g. "Preparation").
#[derive(Debug, Clone)]
pub struct Phase {
    pub name: String,
    pub steps: Vec<String>,
}

/// Position of a step in the flattened global sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRef {
    pub phase: String,
    pub name: String,
    pub ordinal: usize,
}

/// Ordered table of phases and step names.
///
/// Constructed once per deployment; steps are never reordered or inserted
/// at runtime. Tests may substitute alternate tables.
#[derive(Debug, Clone)]
pub struct Methodology {
    phases: Vec<Phase>,
}

impl Methodology {
    /// Build a methodology from an ordered phase table.
    pub fn new(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    /// The standard five-step, two-phase Rules-as-Code methodology.
    pub fn standard() -> Self {
        Self::new(vec![
            Phase {
                name: "Preparation".to_string(),
                steps: vec![
                    "Segment Text".to_string(),
                    "Extract Rules".to_string(),
                    "Detect Conflicts".to_string(),
                ],
            },
            Phase {
                name: "Modeling".to_string(),
                steps: vec![
                    "Create Data Model".to_string(),
                    "Generate Business Rules".to_string(),
                ],
            },
        ])
    }

    /// The phases in declaration order.
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Flatten the phase table into the global step sequence.
    ///
    /// Pure function of the static table: stable, deterministic and
    /// restartable.
    pub fn flatten(&self) -> Vec<StepRef> {
        let mut refs = Vec::new();
        for phase in &self.phases {
            for name in &phase.steps {
                refs.push(StepRef {
                    phase: phase.name.clone(),
                    name: name.clone(),
                    ordinal: refs.len(),
                });
            }
        }
        refs
    }

    /// Total number of steps across all phases.
    pub fn len(&self) -> usize {
        self.phases.iter().map(|p| p.steps.len()).sum()
    }

    /// Whether the methodology has no steps.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Global ordinal of a step, or None for an unknown identity.
    pub fn ordinal_of(&self, phase: &str, name: &str) -> Option<usize> {
        let mut ordinal = 0;
        for p in &self.phases {
            for s in &p.steps {
                if p.name == phase && s == name {
                    return Some(ordinal);
                }
                ordinal += 1;
            }
        }
        None
    }

    /// The step at a given global ordinal.
    pub fn step_at(&self, ordinal: usize) -> Option<StepRef> {
        self.flatten().into_iter().nth(ordinal)
    }

    /// The step immediately preceding the given ordinal.
    ///
    /// Chaining never skips over an unapproved intermediate step to reach
    /// an older approved one: an unapproved step is work the operator has
    /// not signed off on, so only the immediate predecessor qualifies.
    pub fn predecessor(&self, ordinal: usize) -> Option<StepRef> {
        ordinal.checked_sub(1).and_then(|o| self.step_at(o))
    }

    /// Whether a step is reachable under the given approval state.
    ///
    /// `approved` is indexed by ordinal (missing entries count as
    /// unapproved). A step is reachable iff its ordinal is at most one
    /// past the furthest approved ordinal; ordinal 0 is always reachable.
    pub fn is_reachable(&self, ordinal: usize, approved: &[bool]) -> bool {
        if ordinal >= self.len() {
            return false;
        }
        if ordinal == 0 {
            return true;
        }
        match approved.iter().rposition(|&a| a) {
            Some(furthest) => ordinal <= furthest + 1,
            None => false,
        }
    }
}

impl Default for Methodology {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_phase() -> Methodology {
        Methodology::new(vec![
            Phase {
                name: "A".to_string(),
                steps: vec!["one".to_string(), "two".to_string()],
            },
            Phase {
                name: "B".to_string(),
                steps: vec!["three".to_string()],
            },
        ])
    }

    #[test]
    fn test_flatten_is_stable_and_ordered() {
        let m = two_phase();
        let flat = m.flatten();
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[0].phase, "A");
        assert_eq!(flat[0].name, "one");
        assert_eq!(flat[2].phase, "B");
        assert_eq!(flat[2].name, "three");
        assert_eq!(flat, m.flatten());
        for (i, step) in flat.iter().enumerate() {
            assert_eq!(step.ordinal, i);
        }
    }

    #[test]
    fn test_ordinal_of() {
        let m = two_phase();
        assert_eq!(m.ordinal_of("A", "one"), Some(0));
        assert_eq!(m.ordinal_of("A", "two"), Some(1));
        assert_eq!(m.ordinal_of("B", "three"), Some(2));
        assert_eq!(m.ordinal_of("B", "one"), None);
        assert_eq!(m.ordinal_of("C", "one"), None);
    }

    #[test]
    fn test_first_step_always_reachable() {
        let m = two_phase();
        assert!(m.is_reachable(0, &[]));
        assert!(m.is_reachable(0, &[false, false, false]));
    }

    #[test]
    fn test_reachability_is_monotone_in_approvals() {
        let m = two_phase();
        // No approvals: only ordinal 0.
        assert!(!m.is_reachable(1, &[false, false, false]));
        assert!(!m.is_reachable(2, &[false, false, false]));

        // Approving step 0 extends the frontier by one, never shrinks it.
        let before: Vec<bool> = (0..3).map(|o| m.is_reachable(o, &[])).collect();
        let after: Vec<bool> = (0..3)
            .map(|o| m.is_reachable(o, &[true, false, false]))
            .collect();
        for (b, a) in before.iter().zip(&after) {
            assert!(!b || *a, "approval must not shrink the reachable set");
        }
        assert!(m.is_reachable(1, &[true, false, false]));
        assert!(!m.is_reachable(2, &[true, false, false]));
    }

    #[test]
    fn test_reachability_frontier_is_exact() {
        let m = two_phase();
        let approved = [true, true, false];
        for ordinal in 0..m.len() {
            let expected = ordinal <= 2;
            assert_eq!(m.is_reachable(ordinal, &approved), expected);
        }
        assert!(!m.is_reachable(3, &approved), "past-the-end is unreachable");
    }

    #[test]
    fn test_predecessor_is_immediate_only() {
        let m = two_phase();
        assert_eq!(m.predecessor(0), None);
        let pred = m.predecessor(2).expect("ordinal 2 has a predecessor");
        assert_eq!(pred.ordinal, 1);
        assert_eq!(pred.name, "two");
    }

    #[test]
    fn test_standard_methodology_shape() {
        let m = Methodology::standard();
        assert_eq!(m.len(), 5);
        assert_eq!(m.ordinal_of("Preparation", "Segment Text"), Some(0));
        assert_eq!(m.ordinal_of("Modeling", "Generate Business Rules"), Some(4));
    }
}
