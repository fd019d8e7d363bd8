//! LED topology: where the sculpture's LEDs sit in model space.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{BRANCH_COUNT, DEFAULT_LED_DELTA, LEDS_PER_BRANCH};

/// One arm of the sculpture. LED `i` sits at `first + delta * i`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub first: [f32; 2],
    pub delta: [f32; 2],
}

impl Branch {
    pub fn led_position(&self, i: usize) -> Vec2 {
        Vec2::from(self.first) + Vec2::from(self.delta) * i as f32
    }
}

/// The four default arms radiating from the hub along the cardinal axes.
pub fn default_branches() -> Vec<Branch> {
    let mk = |name: &str, dx: f32, dy: f32| Branch {
        name: name.to_string(),
        first: [0.0, 0.0],
        delta: [dx, dy],
    };
    vec![
        mk("Right", DEFAULT_LED_DELTA, 0.0),
        mk("Left", -DEFAULT_LED_DELTA, 0.0),
        mk("Up", 0.0, -DEFAULT_LED_DELTA),
        mk("Down", 0.0, DEFAULT_LED_DELTA),
    ]
}

/// LED coordinate generator. The two modes emit *different* element
/// orderings and downstream brightness-vector consumers depend on it, so the
/// iteration order of each mode is part of the contract.
#[derive(Clone, Debug, PartialEq)]
pub enum LedTopology {
    /// Explicit per-branch geometry, iterated branch-major then LED-minor.
    PerBranch {
        branches: Vec<Branch>,
        leds_per_branch: usize,
    },
    /// Mirrored four-axis layout from one scalar `(first, delta)` pair,
    /// iterated LED-major: all four axis points for index 0, then index 1,
    /// and so on. Axis order within an index is +x, -x, +y, -y.
    Synced {
        first: f32,
        delta: f32,
        leds_per_branch: usize,
    },
}

impl Default for LedTopology {
    fn default() -> Self {
        Self::PerBranch {
            branches: default_branches(),
            leds_per_branch: LEDS_PER_BRANCH,
        }
    }
}

impl LedTopology {
    pub fn led_count(&self) -> usize {
        match self {
            Self::PerBranch {
                branches,
                leds_per_branch,
            } => branches.len() * leds_per_branch,
            Self::Synced {
                leds_per_branch, ..
            } => BRANCH_COUNT * leds_per_branch,
        }
    }

    /// Model-space sample points, one per LED, in the mode's fixed order.
    pub fn positions(&self) -> Vec<Vec2> {
        match self {
            Self::PerBranch {
                branches,
                leds_per_branch,
            } => {
                let mut out = Vec::with_capacity(branches.len() * leds_per_branch);
                for b in branches {
                    for i in 0..*leds_per_branch {
                        out.push(b.led_position(i));
                    }
                }
                out
            }
            Self::Synced {
                first,
                delta,
                leds_per_branch,
            } => {
                let mut out = Vec::with_capacity(BRANCH_COUNT * leds_per_branch);
                for i in 0..*leds_per_branch {
                    let offs = first + delta * i as f32;
                    out.push(Vec2::new(offs, 0.0));
                    out.push(Vec2::new(-offs, 0.0));
                    out.push(Vec2::new(0.0, offs));
                    out.push(Vec2::new(0.0, -offs));
                }
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn branch_led_positions_are_affine() {
        let b = Branch {
            name: "Right".into(),
            first: [0.1, 0.0],
            delta: [0.05, 0.0],
        };
        assert_eq!(b.led_position(0), Vec2::new(0.1, 0.0));
        assert_eq!(b.led_position(3), Vec2::new(0.25, 0.0));
    }

    #[test]
    fn default_topology_has_four_arms() {
        let topo = LedTopology::default();
        assert_eq!(topo.led_count(), BRANCH_COUNT * LEDS_PER_BRANCH);
        assert_eq!(topo.positions().len(), topo.led_count());
    }
}
