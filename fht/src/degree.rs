//! Scheduling of row updates for nodes split at a power of two.
//!
//! Output slope `t` of a node reads slope `round05(t * (h_T - 1) / (h - 1))` of the top half and
//! slope `round05(t * (h_B - 1) / (h - 1))` of the bottom half. A half-row read by a single
//! remaining output can be overwritten by that output. The scheduler peels such rows off
//! repeatedly, alternating between halves, and pairs whatever is left with two-line butterflies.

use alloc::vec::Vec;

use adrt_util::round05;

/// Maps an output slope of a node onto the slopes of its two halves.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SlopeMapping {
    top_ratio: f64,
    bottom_ratio: f64,
}

impl SlopeMapping {
    #[must_use]
    pub fn new(height: usize, top_height: usize) -> Self {
        debug_assert!(height >= 2);
        debug_assert!(top_height >= 1 && top_height < height);
        let denominator = (height - 1) as f64;
        Self {
            top_ratio: (top_height - 1) as f64 / denominator,
            bottom_ratio: (height - top_height - 1) as f64 / denominator,
        }
    }

    #[inline]
    #[must_use]
    pub fn top(&self, t: usize) -> usize {
        round05(self.top_ratio * t as f64)
    }

    #[inline]
    #[must_use]
    pub fn bottom(&self, t: usize) -> usize {
        round05(self.bottom_ratio * t as f64)
    }
}

/// How many outputs read a half-row, and the smallest and largest of them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OutDegree {
    pub degree: usize,
    pub first: usize,
    pub last: usize,
}

impl OutDegree {
    fn record(&mut self, t: usize) {
        if self.degree == 0 {
            self.first = t;
        }
        self.degree += 1;
        self.last = t;
    }
}

/// One row update. `top` and `bottom` are slopes of the halves, not physical rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// `top += rotate(bottom, t - bottom)`; the top row now holds slope `t`.
    SaveTop { t: usize, top: usize, bottom: usize },
    /// `bottom = top + rotate(bottom, t - bottom)`; the bottom row now holds slope `t`.
    KeepBottom { t: usize, top: usize, bottom: usize },
    /// A butterfly: the top row takes slope `t`, the bottom row slope `t + 1`.
    Pair { t: usize, top: usize, bottom: usize },
}

/// Reusable scratch for [`DegreeScheduler::schedule`].
#[derive(Clone, Debug, Default)]
pub struct DegreeScheduler {
    top_degrees: Vec<OutDegree>,
    bottom_degrees: Vec<OutDegree>,
    top_queue: Vec<usize>,
    bottom_queue: Vec<usize>,
    processed: Vec<bool>,
}

impl DegreeScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn reset(&mut self, height: usize, top_height: usize, mapping: &SlopeMapping) {
        self.top_degrees.clear();
        self.top_degrees.resize(top_height, OutDegree::default());
        self.bottom_degrees.clear();
        self.bottom_degrees
            .resize(height - top_height, OutDegree::default());
        for t in 0..height {
            self.top_degrees[mapping.top(t)].record(t);
            self.bottom_degrees[mapping.bottom(t)].record(t);
        }

        self.processed.clear();
        self.processed.resize(height, false);
        self.top_queue.clear();
        self.top_queue.extend(0..top_height);
        self.bottom_queue.clear();
    }

    /// Emits the updates for a node of `height` rows whose top half has `top_height` rows.
    ///
    /// Every output slope is produced by exactly one step, and no step overwrites a half-row that
    /// a later step still reads.
    pub fn schedule<F>(&mut self, height: usize, top_height: usize, mut emit: F)
    where
        F: FnMut(Step),
    {
        let mapping = SlopeMapping::new(height, top_height);
        self.reset(height, top_height, &mapping);

        loop {
            self.bottom_queue.clear();
            for i in 0..self.top_queue.len() {
                let top = self.top_queue[i];
                let OutDegree {
                    degree,
                    first,
                    last,
                } = self.top_degrees[top];
                if degree != 1 {
                    continue;
                }
                let t = if self.processed[last] { first } else { last };
                let bottom = mapping.bottom(t);
                emit(Step::SaveTop { t, top, bottom });
                self.processed[t] = true;
                if self.bottom_queue.last() != Some(&bottom) {
                    self.bottom_queue.push(bottom);
                }
                self.top_degrees[top].degree -= 1;
                self.bottom_degrees[bottom].degree -= 1;
            }
            if self.bottom_queue.is_empty() {
                break;
            }

            self.top_queue.clear();
            for i in 0..self.bottom_queue.len() {
                let bottom = self.bottom_queue[i];
                let OutDegree {
                    degree,
                    first,
                    last,
                } = self.bottom_degrees[bottom];
                if degree != 1 {
                    continue;
                }
                let t = if self.processed[first] { last } else { first };
                let top = mapping.top(t);
                emit(Step::KeepBottom { t, top, bottom });
                self.processed[t] = true;
                self.top_queue.push(top);
                self.top_degrees[top].degree -= 1;
                self.bottom_degrees[bottom].degree -= 1;
            }
        }

        let mut t = 0;
        while t < height {
            if !self.processed[t] {
                debug_assert!(t + 1 < height && !self.processed[t + 1]);
                emit(Step::Pair {
                    t,
                    top: mapping.top(t),
                    bottom: mapping.bottom(t),
                });
                self.processed[t] = true;
                self.processed[t + 1] = true;
            }
            t += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use adrt_util::div_by_pow2;

    use super::*;

    fn steps(height: usize, top_height: usize) -> Vec<Step> {
        let mut out = Vec::new();
        DegreeScheduler::new().schedule(height, top_height, |step| out.push(step));
        out
    }

    #[test]
    fn mapping_endpoints() {
        let mapping = SlopeMapping::new(13, 8);
        assert_eq!((mapping.top(0), mapping.bottom(0)), (0, 0));
        assert_eq!((mapping.top(12), mapping.bottom(12)), (7, 4));
    }

    #[test]
    fn five_rows() {
        assert_eq!(
            steps(5, 4),
            vec![
                Step::SaveTop { t: 0, top: 0, bottom: 0 },
                Step::SaveTop { t: 1, top: 1, bottom: 0 },
                Step::SaveTop { t: 4, top: 3, bottom: 0 },
                Step::Pair { t: 2, top: 2, bottom: 0 },
            ]
        );
    }

    #[test]
    fn seven_rows_peels_from_both_halves() {
        assert_eq!(
            steps(7, 4),
            vec![
                Step::SaveTop { t: 0, top: 0, bottom: 0 },
                Step::KeepBottom { t: 1, top: 1, bottom: 0 },
                Step::SaveTop { t: 2, top: 1, bottom: 1 },
                Step::Pair { t: 3, top: 2, bottom: 1 },
                Step::Pair { t: 5, top: 3, bottom: 2 },
            ]
        );
    }

    #[test]
    fn every_slope_is_produced_once() {
        let mut scheduler = DegreeScheduler::new();
        for height in 2..600 {
            let top_height = div_by_pow2(height);
            let mut produced = vec![0usize; height];
            let mut top_writes = vec![0usize; top_height];
            let mut bottom_writes = vec![0usize; height - top_height];
            scheduler.schedule(height, top_height, |step| match step {
                Step::SaveTop { t, top, .. } => {
                    produced[t] += 1;
                    top_writes[top] += 1;
                }
                Step::KeepBottom { t, bottom, .. } => {
                    produced[t] += 1;
                    bottom_writes[bottom] += 1;
                }
                Step::Pair { t, top, bottom } => {
                    produced[t] += 1;
                    produced[t + 1] += 1;
                    top_writes[top] += 1;
                    bottom_writes[bottom] += 1;
                }
            });
            assert!(produced.iter().all(|&n| n == 1), "height = {height}");
            assert!(top_writes.iter().all(|&n| n <= 1), "height = {height}");
            assert!(bottom_writes.iter().all(|&n| n <= 1), "height = {height}");
        }
    }
}
