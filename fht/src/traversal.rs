//! Post-order walks over the binary row-partition tree.
//!
//! Every node of the tree is a contiguous row range `[start, stop)` split at `mid` by a
//! [`SplitPolicy`]. Nodes with fewer than two rows are leaves and are never visited. Both walks
//! visit the children of a node before the node itself, top child first, and report the node's
//! depth (the root is at level 0).

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use tracing::debug_span;

use crate::SplitPolicy;

/// Capacity of the explicit stack used by [`for_each_task_iterative`].
///
/// The tree over `h` rows has `ceil(log2(h))` non-leaf levels under either split policy, so this
/// covers every height below `2^32`.
pub const MAX_DEPTH: usize = 32;

/// One node of the partition tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Task {
    pub start: usize,
    pub stop: usize,
    pub mid: usize,
    pub size: usize,
    /// Whether the top child has been fully processed. Always set when the node is handed out.
    pub left_visited: bool,
}

impl Task {
    #[must_use]
    pub fn new(start: usize, stop: usize, split: SplitPolicy) -> Self {
        debug_assert!(start <= stop);
        let size = stop - start;
        let mid = if size < 2 {
            start
        } else {
            start + split.top_height(size)
        };
        Self {
            start,
            stop,
            mid,
            size,
            left_visited: false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn top_height(&self) -> usize {
        self.mid - self.start
    }

    #[inline]
    #[must_use]
    pub const fn bottom_height(&self) -> usize {
        self.stop - self.mid
    }

    #[must_use]
    pub fn left(&self, split: SplitPolicy) -> Self {
        Self::new(self.start, self.mid, split)
    }

    #[must_use]
    pub fn right(&self, split: SplitPolicy) -> Self {
        Self::new(self.mid, self.stop, split)
    }
}

/// A fixed-capacity stack of pending tasks.
#[derive(Debug)]
struct TaskStack {
    tasks: [Task; MAX_DEPTH],
    len: usize,
}

impl TaskStack {
    fn new() -> Self {
        Self {
            tasks: [Task::default(); MAX_DEPTH],
            len: 0,
        }
    }

    #[inline]
    fn push(&mut self, task: Task) {
        debug_assert!(self.len < MAX_DEPTH, "partition tree deeper than {MAX_DEPTH}");
        self.tasks[self.len] = task;
        self.len += 1;
    }

    #[inline]
    fn pop(&mut self) -> Option<Task> {
        self.len = self.len.checked_sub(1)?;
        Some(self.tasks[self.len])
    }

    #[inline]
    fn last_mut(&mut self) -> Option<&mut Task> {
        self.len.checked_sub(1).map(|i| &mut self.tasks[i])
    }
}

/// Calls `f(task, level)` for every non-leaf node, in post-order, using a call stack.
pub fn for_each_task_recursive<F>(height: usize, split: SplitPolicy, mut f: F)
where
    F: FnMut(&Task, usize),
{
    fn visit<F: FnMut(&Task, usize)>(task: Task, level: usize, split: SplitPolicy, f: &mut F) {
        if task.size < 2 {
            return;
        }
        visit(task.left(split), level + 1, split, f);
        visit(task.right(split), level + 1, split, f);
        let task = Task {
            left_visited: true,
            ..task
        };
        f(&task, level);
    }

    visit(Task::new(0, height, split), 0, split, &mut f);
}

/// Calls `f(task, level)` for every non-leaf node, in the same order as
/// [`for_each_task_recursive`], using a stack of at most [`MAX_DEPTH`] entries.
pub fn for_each_task_iterative<F>(height: usize, split: SplitPolicy, mut f: F)
where
    F: FnMut(&Task, usize),
{
    let root = Task::new(0, height, split);
    if root.size < 2 {
        return;
    }
    let mut stack = TaskStack::new();
    stack.push(root);

    loop {
        // Descend until the node on top has only leaf children left to handle.
        while let Some(task) = stack.last_mut() {
            let left = task.left(split);
            if !task.left_visited && left.size > 1 {
                stack.push(left);
                continue;
            }
            task.left_visited = true;
            let right = task.right(split);
            if right.size > 1 {
                stack.push(right);
            } else {
                break;
            }
        }

        // Ascend while the finished node was a bottom child.
        loop {
            let level = stack.len - 1;
            let Some(task) = stack.pop() else {
                return;
            };
            f(&task, level);

            let Some(parent) = stack.last_mut() else {
                return;
            };
            if !parent.left_visited {
                parent.left_visited = true;
                let right = parent.right(split);
                if right.size > 1 {
                    stack.push(right);
                    break;
                }
            }
        }
    }
}

/// Strategy for walking the partition tree.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Traversal {
    Recursive,
    /// Uses an explicit stack. Engines cache the resulting order as a [`TaskPlan`].
    #[default]
    Iterative,
}

impl Traversal {
    pub fn for_each_task<F>(self, height: usize, split: SplitPolicy, f: F)
    where
        F: FnMut(&Task, usize),
    {
        match self {
            Self::Recursive => for_each_task_recursive(height, split, f),
            Self::Iterative => for_each_task_iterative(height, split, f),
        }
    }
}

/// The recorded post-order of all non-leaf nodes for one height and split policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskPlan {
    height: usize,
    split: SplitPolicy,
    tasks: Vec<(Task, usize)>,
}

impl TaskPlan {
    #[must_use]
    pub fn new(height: usize, split: SplitPolicy) -> Self {
        let _span = debug_span!("build task plan", height, ?split).entered();
        let mut tasks = Vec::with_capacity(height.saturating_sub(1));
        for_each_task_iterative(height, split, |task, level| tasks.push((*task, level)));
        Self {
            height,
            split,
            tasks,
        }
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn split(&self) -> SplitPolicy {
        self.split
    }

    /// Number of non-leaf nodes, which is `height - 1` for any non-empty tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Calls `f(task, level)` for every recorded node, in order.
    pub fn replay<F>(&self, mut f: F)
    where
        F: FnMut(&Task, usize),
    {
        for (task, level) in &self.tasks {
            f(task, *level);
        }
    }
}

/// A bounded set of task plans, most recently used first.
///
/// Once full, building a plan for a new `(height, split)` drops the least recently used one.
#[derive(Clone, Debug)]
pub struct PlanCache {
    plans: VecDeque<TaskPlan>,
    capacity: usize,
}

impl PlanCache {
    pub const DEFAULT_CAPACITY: usize = 8;

    /// A cache holding at most `capacity` plans. A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            plans: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// The plan for `height` and `split`, built on a miss.
    pub fn get_or_build(&mut self, height: usize, split: SplitPolicy) -> &TaskPlan {
        let hit = self
            .plans
            .iter()
            .position(|plan| plan.height == height && plan.split == split);
        let plan = match hit.and_then(|i| self.plans.remove(i)) {
            Some(plan) => plan,
            None => {
                self.plans.truncate(self.capacity - 1);
                TaskPlan::new(height, split)
            }
        };
        self.plans.push_front(plan);
        &self.plans[0]
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

impl Default for PlanCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use adrt_util::log2_ceil_usize;

    use super::*;

    const SPLITS: [SplitPolicy; 2] = [SplitPolicy::Balanced, SplitPolicy::PowerOfTwo];

    fn collect(traversal: Traversal, height: usize, split: SplitPolicy) -> Vec<(Task, usize)> {
        let mut out = Vec::new();
        traversal.for_each_task(height, split, |task, level| out.push((*task, level)));
        out
    }

    #[test]
    fn trivial_heights_visit_nothing() {
        for split in SPLITS {
            assert!(collect(Traversal::Recursive, 0, split).is_empty());
            assert!(collect(Traversal::Iterative, 1, split).is_empty());
            assert!(TaskPlan::new(1, split).is_empty());
        }
    }

    #[test]
    fn balanced_five_rows() {
        let order: Vec<(usize, usize, usize)> =
            collect(Traversal::Iterative, 5, SplitPolicy::Balanced)
                .into_iter()
                .map(|(task, level)| (task.start, task.stop, level))
                .collect();
        assert_eq!(order, vec![(0, 2, 1), (3, 5, 2), (2, 5, 1), (0, 5, 0)]);
    }

    #[test]
    fn power_of_two_five_rows() {
        let order: Vec<(usize, usize, usize)> =
            collect(Traversal::Iterative, 5, SplitPolicy::PowerOfTwo)
                .into_iter()
                .map(|(task, level)| (task.start, task.stop, level))
                .collect();
        assert_eq!(order, vec![(0, 2, 2), (2, 4, 2), (0, 4, 1), (0, 5, 0)]);
    }

    #[test]
    fn iterative_matches_recursive() {
        for split in SPLITS {
            for height in 0..300 {
                let recursive = collect(Traversal::Recursive, height, split);
                let iterative = collect(Traversal::Iterative, height, split);
                assert_eq!(recursive, iterative, "{split:?} height = {height}");

                let mut replayed = Vec::new();
                TaskPlan::new(height, split).replay(|task, level| replayed.push((*task, level)));
                assert_eq!(replayed, iterative, "{split:?} height = {height}");
            }
        }
    }

    #[test]
    fn children_precede_parents_and_cover_the_rows() {
        for split in SPLITS {
            for height in 2..200 {
                let order = collect(Traversal::Iterative, height, split);
                assert_eq!(order.len(), height - 1);
                for (i, (task, _)) in order.iter().enumerate() {
                    assert!(task.left_visited);
                    assert!(task.top_height() >= 1 && task.bottom_height() >= 1);
                    for child in [task.left(split), task.right(split)] {
                        if child.size > 1 {
                            let pos = order
                                .iter()
                                .position(|(t, _)| t.start == child.start && t.stop == child.stop);
                            assert!(pos.is_some_and(|p| p < i), "{split:?} height = {height}");
                        }
                    }
                }
                let (root, level) = order[order.len() - 1];
                assert_eq!((root.start, root.stop, level), (0, height, 0));
            }
        }
    }

    #[test]
    fn depth_is_logarithmic() {
        for split in SPLITS {
            for height in [2, 3, 5, 17, 100, 1000, 4097, 65_537] {
                let max_level = collect(Traversal::Iterative, height, split)
                    .into_iter()
                    .map(|(_, level)| level)
                    .max()
                    .unwrap();
                assert_eq!(max_level + 1, log2_ceil_usize(height), "{split:?} height = {height}");
            }
        }
    }

    #[test]
    fn plan_cache_evicts_least_recently_used() {
        let mut cache = PlanCache::new(2);
        assert_eq!(cache.get_or_build(5, SplitPolicy::Balanced).len(), 4);
        cache.get_or_build(6, SplitPolicy::Balanced);
        cache.get_or_build(5, SplitPolicy::Balanced);
        assert_eq!(cache.len(), 2);

        // 6 rows is now the stalest entry
        let plan = cache.get_or_build(7, SplitPolicy::PowerOfTwo);
        assert_eq!((plan.height(), plan.split()), (7, SplitPolicy::PowerOfTwo));
        assert_eq!(cache.len(), 2);
        let heights: Vec<usize> = cache.plans.iter().map(TaskPlan::height).collect();
        assert_eq!(heights, vec![7, 5]);
    }

    #[test]
    fn plan_cache_never_grows_past_capacity() {
        let mut cache = PlanCache::default();
        for height in 1..100 {
            for split in SPLITS {
                let plan = cache.get_or_build(height, split);
                assert_eq!(plan, &TaskPlan::new(height, split));
            }
        }
        assert_eq!(cache.len(), PlanCache::DEFAULT_CAPACITY);
        assert_eq!(PlanCache::new(0).capacity(), 1);
    }
}
