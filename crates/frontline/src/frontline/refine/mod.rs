//! Hull refinement: local rewrite operators applied to a fixed point.
//!
//! Purpose
//! - Grow each seeded hull over nearby todo nodes and fold concave stretches
//!   away, while keeping every hull simple, enemy-free and within the angle
//!   and clearance limits.
//! - Split a hull that wraps around an enemy pocket into an outer hull and a
//!   hole hull (territory is the even-odd union of a side's hulls).
//!
//! Why this design
//! - Each operator only plans against an immutable `Run`; `Run::apply` is the
//!   single place that mutates bookkeeping. Operators never see half-applied
//!   state.
//! - Fixed priority plus scan restart keeps the result deterministic for a
//!   given graph. Every successful rewrite either shrinks todo or shrinks the
//!   hull, so the fixed point is reached.
//!
//! Code cross-refs: `ops::{MergeExpand, MergeTri, MergeQuad, Merge, Expand, Split}`,
//! `super::run::{Run, Edit}`.

mod ops;

use tracing::{trace, warn};

use super::cfg::FrontlineCfg;
use super::hull::Hull;
use super::run::{Edit, Run};

pub(crate) use ops::{Expand, Merge, MergeExpand, MergeQuad, MergeTri, Split};

/// One local rewrite at hull position `i`.
pub(crate) trait Rewrite {
    fn name(&self) -> &'static str;

    fn enabled(&self, _cfg: &FrontlineCfg) -> bool {
        true
    }

    /// Plan the rewrite at position `i` of `hull`; `None` when it does not apply.
    fn plan(&self, run: &Run<'_>, hull: &Hull, i: usize) -> Option<Edit>;
}

/// Operators in priority order.
pub(crate) const OPERATORS: [&dyn Rewrite; 6] =
    [&MergeExpand, &MergeTri, &MergeQuad, &Merge, &Expand, &Split];

impl Run<'_> {
    /// Refine hull `first` and every hull split off from it.
    pub(crate) fn refine(&mut self, first: usize) {
        let ops: Vec<&dyn Rewrite> = OPERATORS
            .iter()
            .copied()
            .filter(|op| op.enabled(&self.cfg))
            .collect();
        let mut work = vec![first];
        while let Some(h) = work.pop() {
            let mut passes = 0usize;
            'pass: loop {
                let n = self.hulls[h].len();
                if n < 3 {
                    warn!(hull = h, len = n, "hull degenerated; refinement aborted");
                    break;
                }
                passes += 1;
                if passes > self.cfg.max_refine_passes {
                    warn!(hull = h, passes, "refinement pass cap reached");
                    break;
                }
                for i in 0..n {
                    for op in &ops {
                        let Some(edit) = op.plan(self, &self.hulls[h], i) else {
                            continue;
                        };
                        trace!(hull = h, at = i, op = op.name(), "rewrite");
                        if let Some(spawned) = self.apply(h, edit) {
                            work.push(spawned);
                        }
                        continue 'pass;
                    }
                }
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests;
