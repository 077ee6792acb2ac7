//! Outcome types for facade operations.
//!
//! The public facade API collapses these into `Option`/`bool`; keeping the
//! full outcome lets callers tell a genuine miss from a broken remote tier.

use serde_json::Value;

/// Result of reading a key through both tiers.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Fresh value found in memory or remotely
    Hit(Value),
    /// No fresh value anywhere
    Miss,
    /// The remote tier could not be consulted
    TransportError(String),
}

impl Lookup {
    /// Collapses to the legacy contract: a value or nothing.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Lookup::Hit(value) => Some(value),
            Lookup::Miss | Lookup::TransportError(_) => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Lookup::Hit(_))
    }
}

/// Result of a remote write or delete.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOutcome {
    /// Gateway replied `{success: true}`
    Acknowledged,
    /// Gateway replied, but not with success
    Rejected,
    /// The gateway could not be reached or answered non-2xx
    TransportError(String),
}

impl WriteOutcome {
    /// Collapses to the legacy contract.
    pub fn succeeded(&self) -> bool {
        matches!(self, WriteOutcome::Acknowledged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_collapse() {
        assert_eq!(Lookup::Hit(json!(1)).into_value(), Some(json!(1)));
        assert_eq!(Lookup::Miss.into_value(), None);
        assert_eq!(Lookup::TransportError("down".into()).into_value(), None);
    }

    #[test]
    fn test_write_outcome_collapse() {
        assert!(WriteOutcome::Acknowledged.succeeded());
        assert!(!WriteOutcome::Rejected.succeeded());
        assert!(!WriteOutcome::TransportError("down".into()).succeeded());
    }
}
