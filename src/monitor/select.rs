use serde::{Deserialize, Serialize};

/// The one piece of state that survives across refresh ticks: which
/// patient's trends the front end is looking at.
///
/// This is an explicit value threaded through every snapshot rather than
/// ambient session state, so the transitions stay testable on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    NoSelection,
    Selected(String),
}

impl Selection {
    /// The user action "pick patient": unconditional, even for a patient
    /// absent from the current window. The next refresh falls back if the
    /// patient never shows up.
    pub fn pick(name: impl Into<String>) -> Selection {
        Selection::Selected(name.into())
    }

    /// Re-evaluate the selection against the patient set of a fresh fetch.
    ///
    /// A still-present patient stays selected; a vanished one falls back to
    /// the first patient in enumeration order; an empty set clears the
    /// selection entirely.
    pub fn on_refresh(&self, patients: &[String]) -> Selection {
        if let Selection::Selected(name) = self {
            if patients.iter().any(|patient| patient == name) {
                return self.clone();
            }
        }

        match patients.first() {
            Some(first) => Selection::Selected(first.clone()),
            None => Selection::NoSelection,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        match self {
            Selection::Selected(name) => Some(name),
            Selection::NoSelection => None,
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Selection::NoSelection
    }
}
