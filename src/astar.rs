/// This module implements a variant of
/// [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
/// in which every discovered node lives in an insertion-ordered arena. Frontier entries refer to
/// nodes by arena index, which gives reproducible tie-breaking and lets the path be rebuilt by
/// following predecessor indices.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use log::warn;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use std::hash::Hash;

/// Predecessor index of the start node.
const NO_PARENT: usize = usize::MAX;

/// Bookkeeping for a discovered node: steps from the start, heuristic estimate to the goal and
/// the arena index of its predecessor.
#[derive(Clone, Copy, Debug)]
struct NodeRecord<C> {
    parent: usize,
    cost: C,
    heuristic: C,
}

impl<C: Zero + Copy> NodeRecord<C> {
    fn estimated_cost(&self) -> C {
        self.cost + self.heuristic
    }
}

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost)
            && self.cost.eq(&other.cost)
            && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then favours the node furthest from the start,
        // then the node discovered first.
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => match self.cost.cmp(&other.cost) {
                Ordering::Equal => other.index.cmp(&self.index),
                s => s,
            },
            s => s,
        }
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path: Vec<N> = itertools::unfold(start, |i| {
        parents.get_index(*i).map(|(node, value)| {
            *i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Searches from `start` until `success` holds, expanding the node with the lowest
/// cost-plus-heuristic first. Returns the path including both ends and its cost, or [None] if
/// the reachable space is exhausted.
pub fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut to_see = BinaryHeap::new();
    let start_record = NodeRecord {
        parent: NO_PARENT,
        cost: Zero::zero(),
        heuristic: heuristic(start),
    };
    to_see.push(SmallestCostHolder {
        estimated_cost: start_record.estimated_cost(),
        cost: Zero::zero(),
        index: 0,
    });
    let mut parents: FxIndexMap<N, NodeRecord<C>> = FxIndexMap::default();
    parents.insert(start.clone(), start_record);
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let Some((node, record)) = parents.get_index(index) else {
                continue;
            };
            if success(node) {
                let path = reverse_path(&parents, |r| r.parent, index);
                return Some((path, cost));
            }
            // We may have inserted a node several time into the binary heap if we found
            // a better way to access it. Ensure that we are currently dealing with the
            // best path and discard the others.
            if cost > record.cost {
                continue;
            }
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let record; // updated bookkeeping for the successor
            let n; // index for successor
            match parents.entry(successor) {
                Vacant(e) => {
                    record = NodeRecord {
                        parent: index,
                        cost: new_cost,
                        heuristic: heuristic(e.key()),
                    };
                    n = e.index();
                    e.insert(record);
                }
                Occupied(mut e) => {
                    if e.get().cost > new_cost {
                        record = NodeRecord {
                            parent: index,
                            cost: new_cost,
                            heuristic: e.get().heuristic,
                        };
                        n = e.index();
                        e.insert(record);
                    } else {
                        continue;
                    }
                }
            }

            to_see.push(SmallestCostHolder {
                estimated_cost: record.estimated_cost(),
                cost: new_cost,
                index: n,
            });
        }
    }
    warn!("Search space exhausted without reaching the goal");
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Line graph 0 - 1 - 2 - ... - 9 with unit edges.
    fn line_successors(n: &i32) -> Vec<(i32, i32)> {
        [n - 1, n + 1]
            .into_iter()
            .filter(|m| (0..10).contains(m))
            .map(|m| (m, 1))
            .collect()
    }

    #[test]
    fn finds_path_on_line() {
        let (path, cost) =
            astar(&2, line_successors, |n: &i32| (7 - n).abs(), |n: &i32| *n == 7).unwrap();
        assert_eq!(path, vec![2, 3, 4, 5, 6, 7]);
        assert_eq!(cost, 5);
    }

    #[test]
    fn start_is_goal() {
        let (path, cost) = astar(&4, line_successors, |_: &i32| 0, |n: &i32| *n == 4).unwrap();
        assert_eq!(path, vec![4]);
        assert_eq!(cost, 0);
    }

    #[test]
    fn exhausted_search_returns_none() {
        assert!(astar(&0, line_successors, |_: &i32| 0, |n: &i32| *n == 42).is_none());
    }

    #[test]
    fn equal_estimates_prefer_first_discovered() {
        let a = SmallestCostHolder {
            estimated_cost: 5,
            cost: 2,
            index: 1,
        };
        let b = SmallestCostHolder {
            estimated_cost: 5,
            cost: 2,
            index: 3,
        };
        let mut heap = BinaryHeap::new();
        heap.push(b);
        heap.push(a);
        assert_eq!(heap.pop().unwrap().index, 1);
    }

    #[test]
    fn equal_estimates_prefer_larger_cost() {
        let mut heap = BinaryHeap::new();
        heap.push(SmallestCostHolder {
            estimated_cost: 4,
            cost: 1,
            index: 0,
        });
        heap.push(SmallestCostHolder {
            estimated_cost: 4,
            cost: 3,
            index: 5,
        });
        heap.push(SmallestCostHolder {
            estimated_cost: 3,
            cost: 0,
            index: 9,
        });
        assert_eq!(heap.pop().unwrap().index, 9);
        assert_eq!(heap.pop().unwrap().index, 5);
    }
}
