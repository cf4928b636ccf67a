//! Per-tick input snapshot consumed by the simulation
//!
//! The core never polls devices. The driver samples whatever backend it
//! uses and hands the result in as plain booleans, once per tick.

use serde::{Deserialize, Serialize};

/// Held-key snapshot for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// External cancellation signal, checked before any simulation work.
    pub quit: bool,
}

impl InputSnapshot {
    /// Unit deltas for each held cardinal, in screen coordinates
    /// (y grows downward). Opposing keys both report; the caller decides
    /// whether they cancel.
    pub fn held_deltas(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        [
            (self.up, (0, -1)),
            (self.down, (0, 1)),
            (self.left, (-1, 0)),
            (self.right, (1, 0)),
        ]
        .into_iter()
        .filter_map(|(held, delta)| held.then_some(delta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keys_no_deltas() {
        assert_eq!(InputSnapshot::default().held_deltas().count(), 0);
    }

    #[test]
    fn test_all_keys_report() {
        let input = InputSnapshot {
            up: true,
            down: true,
            left: true,
            right: true,
            quit: false,
        };
        let deltas: Vec<_> = input.held_deltas().collect();
        assert_eq!(deltas, vec![(0, -1), (0, 1), (-1, 0), (1, 0)]);
    }

    #[test]
    fn test_single_key() {
        let input = InputSnapshot {
            left: true,
            ..Default::default()
        };
        assert_eq!(input.held_deltas().collect::<Vec<_>>(), vec![(-1, 0)]);
    }
}
