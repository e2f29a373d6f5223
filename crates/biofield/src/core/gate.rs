/// Activation state of the backdrop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Ticks skip physics and rendering.
    Dormant,
    /// Ticks run physics and rendering.
    Active,
}

/// Result of feeding a new signal value to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Dormant -> Active; the scene must be regenerated.
    Activated,
    /// Active -> Dormant.
    Deactivated,
    Unchanged,
}

/// Two-state machine driven by an external string signal (the page theme).
#[derive(Debug, Clone)]
pub struct Gate {
    accepted: Vec<String>,
    signal: Option<String>,
    state: GateState,
}

impl Gate {
    /// A dormant gate accepting the given signal values.
    pub fn new(accepted: Vec<String>) -> Self {
        Self {
            accepted,
            signal: None,
            state: GateState::Dormant,
        }
    }

    /// Store a new signal value (`None` = attribute absent).
    pub fn set_signal(&mut self, signal: Option<&str>) -> Transition {
        self.signal = signal.map(str::to_owned);
        self.reevaluate()
    }

    /// Replace the accepted set and re-check the stored signal against it.
    pub fn set_accepted(&mut self, accepted: Vec<String>) -> Transition {
        self.accepted = accepted;
        self.reevaluate()
    }

    fn reevaluate(&mut self) -> Transition {
        let wanted = match &self.signal {
            Some(value) if self.accepted.iter().any(|a| a == value) => GateState::Active,
            _ => GateState::Dormant,
        };
        let transition = match (self.state, wanted) {
            (GateState::Dormant, GateState::Active) => Transition::Activated,
            (GateState::Active, GateState::Dormant) => Transition::Deactivated,
            _ => Transition::Unchanged,
        };
        self.state = wanted;
        transition
    }

    pub fn is_active(&self) -> bool {
        self.state == GateState::Active
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn signal(&self) -> Option<&str> {
        self.signal.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> Gate {
        Gate::new(vec!["academic".into(), "biotech".into()])
    }

    #[test]
    fn starts_dormant() {
        let g = gate();
        assert_eq!(g.state(), GateState::Dormant);
        assert_eq!(g.signal(), None);
    }

    #[test]
    fn accepted_value_activates_once() {
        let mut g = gate();
        assert_eq!(g.set_signal(Some("academic")), Transition::Activated);
        assert!(g.is_active());
        // Switching between two accepted variants is not a new activation
        assert_eq!(g.set_signal(Some("biotech")), Transition::Unchanged);
        assert!(g.is_active());
    }

    #[test]
    fn other_or_absent_value_deactivates() {
        let mut g = gate();
        g.set_signal(Some("academic"));
        assert_eq!(g.set_signal(Some("dark")), Transition::Deactivated);
        assert!(!g.is_active());
        assert_eq!(g.set_signal(None), Transition::Unchanged);
        assert_eq!(g.set_signal(Some("academic")), Transition::Activated);
        assert_eq!(g.set_signal(None), Transition::Deactivated);
    }

    #[test]
    fn matching_is_exact() {
        let mut g = gate();
        assert_eq!(g.set_signal(Some("Academic")), Transition::Unchanged);
        assert_eq!(g.set_signal(Some("")), Transition::Unchanged);
        assert!(!g.is_active());
    }

    #[test]
    fn narrowing_accepted_set_deactivates() {
        let mut g = gate();
        g.set_signal(Some("biotech"));
        assert_eq!(g.set_accepted(vec!["academic".into()]), Transition::Deactivated);
        assert_eq!(g.set_accepted(vec!["biotech".into()]), Transition::Activated);
    }
}
