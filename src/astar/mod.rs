//! Best-first shortest-path search over a 3D-embedded graph.
//!
//! The [`Astar`] engine finds the minimum-cost path between two nodes,
//! where an edge's cost is its weight times its Euclidean length. A
//! *balance* in `[0, 1]` interpolates the frontier ordering between pure
//! greedy best-first (0, heuristic only), classical A* (0.5) and pure
//! Dijkstra (1, cost only); the heuristic itself is pluggable through
//! [`Heuristic`].
//!
//! A search either runs in one shot with [`Astar::search_path`] or is
//! driven one expansion at a time with [`Astar::initialize`] and
//! [`Astar::next_step`], inspecting the frontier between steps.
//!
//! # Examples
//!
//! ```
//! use waygraph::astar::Astar;
//! use waygraph::graph::{Graph, Node};
//! use waygraph::point::Point3;
//!
//! let a = Node::new(Point3::new(0.0, 0.0, 0.0), ());
//! let b = Node::new(Point3::new(1.0, 0.0, 0.0), ());
//! let c = Node::new(Point3::new(2.0, 0.0, 0.0), ());
//!
//! let mut g = Graph::new();
//! for node in [&a, &b, &c] {
//!     g.add_node(node);
//! }
//! g.connect(&a, &b, 1.0).unwrap();
//! g.connect(&b, &c, 1.0).unwrap();
//!
//! let mut search = Astar::new();
//!
//! assert!(search.search_path(&a, &c));
//!
//! let (hops, cost) = search.path_info().unwrap().unwrap();
//!
//! assert_eq!(hops, 2);
//! assert_eq!(cost, 2.0);
//! ```

mod track;

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
    rc::Rc,
};

use ahash::AHashMap;
use ordered_float::OrderedFloat;

use crate::error::Error;
use crate::graph::{Edge, Node};
use crate::point::Point3;

use track::Track;

//==== Heuristic ==============================================================

/// A boxed estimate of the remaining cost from a node to the target.
pub type HeuristicFn<S> = Box<dyn Fn(&Node<S>, &Node<S>) -> f64>;

/// The estimate that orders the frontier together with the accumulated
/// cost. Estimates must be non-negative; for the search to be exact at a
/// given balance, the scaled estimate must never overshoot the true
/// remaining cost along any path (with balance 1 the estimate is ignored
/// and the search is plain Dijkstra).
pub enum Heuristic<S = ()> {
    /// Straight-line distance. The default.
    Euclidean,
    /// Sum of per-axis coordinate deltas.
    Manhattan,
    /// Largest per-axis coordinate delta.
    Chebyshev,
    /// A user-supplied estimate.
    Custom(HeuristicFn<S>),
}

impl<S> Heuristic<S> {
    pub fn estimate(&self, node: &Node<S>, target: &Node<S>) -> f64 {
        match self {
            Heuristic::Euclidean => Node::euclidean_distance(node, target),
            Heuristic::Manhattan => Node::manhattan_distance(node, target),
            Heuristic::Chebyshev => Node::chebyshev_distance(node, target),
            Heuristic::Custom(estimate) => estimate(node, target),
        }
    }
}

impl<S> Default for Heuristic<S> {
    fn default() -> Self {
        Heuristic::Euclidean
    }
}

//==== Open set entry =========================================================

// Heap entries are ordered by evaluation, then by insertion sequence so
// that ties pop in insertion order. Entries are never updated in place:
// when a better track to the same node is queued, the map of live tracks
// moves on and the superseded entry is skipped when it surfaces.
struct OpenEntry<S> {
    eval: OrderedFloat<f64>,
    seq: u64,
    track: Rc<Track<S>>,
}

impl<S> PartialEq for OpenEntry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.eval == other.eval && self.seq == other.seq
    }
}

impl<S> Eq for OpenEntry<S> {}

impl<S> PartialOrd for OpenEntry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S> Ord for OpenEntry<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.eval.cmp(&other.eval).then(self.seq.cmp(&other.seq))
    }
}

//==== Astar ==================================================================

/// The search engine.
///
/// An engine is configured once (heuristic and balance) and reused across
/// any number of searches; [`Astar::initialize`] resets all per-search
/// state. The engine operates on node handles directly; callers must not
/// mutate the surrounding graph while a search is in progress.
///
/// The frontier ("open set") is a binary heap keyed by evaluation with
/// lazy invalidation, paired with identity-keyed maps of the best known
/// track per node for the open and closed sets, so one expansion is
/// logarithmic in the frontier size.
pub struct Astar<S = ()> {
    heuristic: Heuristic<S>,
    balance: f64,
    target: Option<Node<S>>,
    open: BinaryHeap<Reverse<OpenEntry<S>>>,
    open_best: AHashMap<usize, Rc<Track<S>>>,
    closed: AHashMap<usize, Rc<Track<S>>>,
    leaf: Option<Rc<Track<S>>>,
    steps: Option<usize>,
    seq: u64,
}

impl<S> Astar<S> {
    /// A new engine with the Euclidean heuristic and balance 0.5.
    pub fn new() -> Self {
        Astar {
            heuristic: Heuristic::Euclidean,
            balance: 0.5,
            target: None,
            open: BinaryHeap::new(),
            open_best: AHashMap::new(),
            closed: AHashMap::new(),
            leaf: None,
            steps: None,
            seq: 0,
        }
    }

    pub fn heuristic(&self) -> &Heuristic<S> {
        &self.heuristic
    }

    pub fn set_heuristic(&mut self, heuristic: Heuristic<S>) {
        self.heuristic = heuristic;
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Set the Dijkstra/heuristic balance: 0 orders the frontier by the
    /// heuristic alone, 1 by accumulated cost alone, 0.5 is classical A*.
    ///
    /// # Examples
    ///
    /// ```
    /// use waygraph::astar::Astar;
    ///
    /// let mut search = Astar::<()>::new();
    ///
    /// assert!(search.set_balance(1.0).is_ok());
    /// assert!(search.set_balance(1.5).is_err());
    /// ```
    pub fn set_balance(&mut self, balance: f64) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&balance) {
            return Err(Error::BalanceOutOfRange(balance));
        }
        self.balance = balance;
        Ok(())
    }

    //==== Search =============================================================

    /// Run a whole search from `start` to `end` and report whether a path
    /// was found. Equivalent to [`Astar::initialize`] followed by
    /// [`Astar::next_step`] until exhaustion.
    pub fn search_path(&mut self, start: &Node<S>, end: &Node<S>) -> bool {
        self.initialize(start, end);
        while let Ok(true) = self.next_step() {}
        self.path_found()
    }

    /// Reset all per-search state and seed the frontier with the zero-cost
    /// track at `start`, targeting `end`.
    pub fn initialize(&mut self, start: &Node<S>, end: &Node<S>) {
        self.open.clear();
        self.open_best.clear();
        self.closed.clear();
        self.leaf = None;
        self.seq = 0;
        self.steps = Some(0);
        self.target = Some(end.clone());
        let track = Rc::new(Track::start(start));
        let eval = self.evaluation(&track, end);
        self.push_open(eval, track);
    }

    /// Advance the search by one expansion.
    ///
    /// Pops the frontier track with the lowest evaluation. If it ends at
    /// the target the search is over and the winning track is retained;
    /// otherwise each passable outgoing edge to a passable node yields a
    /// successor track, kept only when neither the open nor the closed set
    /// already reaches the same node at most as expensively (a superseded
    /// entry is evicted, reopening the node if it was closed).
    ///
    /// Returns false when the frontier is exhausted: immediately after the
    /// winning expansion, or when no path exists. Fails with
    /// [`Error::NotInitialized`] before [`Astar::initialize`].
    pub fn next_step(&mut self) -> Result<bool, Error> {
        let steps = self.steps.ok_or(Error::NotInitialized)?;
        let target = match &self.target {
            Some(target) => target.clone(),
            None => return Err(Error::NotInitialized),
        };

        let current = loop {
            let entry = match self.open.pop() {
                Some(Reverse(entry)) => entry,
                None => return Ok(false),
            };
            let id = entry.track.end().id();
            let live = matches!(
                self.open_best.get(&id),
                Some(best) if Rc::ptr_eq(best, &entry.track)
            );
            if live {
                self.open_best.remove(&id);
                break entry.track;
            }
        };

        self.steps = Some(steps + 1);

        if Node::same_identity(current.end(), &target) {
            self.leaf = Some(current);
            self.open.clear();
            self.open_best.clear();
            return Ok(true);
        }

        for edge in current.end().iter_out() {
            if !edge.passable() || !edge.target().passable() {
                continue;
            }
            let successor = Rc::new(Track::extend(&current, &edge));
            let id = successor.end().id();
            if let Some(expanded) = self.closed.get(&id) {
                if expanded.cost() <= successor.cost() {
                    continue;
                }
            }
            if let Some(queued) = self.open_best.get(&id) {
                if queued.cost() <= successor.cost() {
                    continue;
                }
            }
            self.closed.remove(&id);
            let eval = self.evaluation(&successor, &target);
            self.push_open(eval, successor);
        }

        self.closed.insert(current.end().id(), current);
        Ok(!self.open_best.is_empty())
    }

    //==== State ==============================================================

    pub fn initialized(&self) -> bool {
        self.steps.is_some()
    }

    /// True once at least one expansion has run.
    pub fn search_started(&self) -> bool {
        self.steps.map_or(false, |steps| steps > 0)
    }

    /// True when a started search has exhausted its frontier, successfully
    /// or not.
    pub fn search_ended(&self) -> bool {
        self.search_started() && self.open_best.is_empty()
    }

    pub fn path_found(&self) -> bool {
        self.leaf.is_some()
    }

    /// Expansions run so far; `None` before [`Astar::initialize`].
    pub fn step_count(&self) -> Option<usize> {
        self.steps
    }

    pub fn open_len(&self) -> usize {
        self.open_best.len()
    }

    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    //==== Results ============================================================

    /// The found path as a node sequence from start to target. `None` when
    /// the search ended without a path; fails while the search has not
    /// ended.
    pub fn path_nodes(&self) -> Result<Option<Vec<Node<S>>>, Error> {
        self.require_ended()?;
        Ok(self.leaf.as_ref().map(|leaf| leaf.nodes()))
    }

    /// The found path as an edge sequence.
    pub fn path_edges(&self) -> Result<Option<Vec<Edge<S>>>, Error> {
        self.require_ended()?;
        Ok(self.leaf.as_ref().map(|leaf| leaf.edges()))
    }

    /// The found path as a coordinate sequence.
    pub fn path_points(&self) -> Result<Option<Vec<Point3>>, Error> {
        self.require_ended()?;
        Ok(self.leaf.as_ref().map(|leaf| leaf.points()))
    }

    /// Edge count and total cost of the found path.
    pub fn path_info(&self) -> Result<Option<(usize, f64)>, Error> {
        self.require_ended()?;
        Ok(self
            .leaf
            .as_ref()
            .map(|leaf| (leaf.edges_from_start(), leaf.cost())))
    }

    //==== Inspection =========================================================

    /// The live frontier as node chains, ordered by evaluation then
    /// insertion. Intended for debugging and stepwise visualization.
    pub fn open_tracks(&self) -> Vec<Vec<Node<S>>> {
        let mut entries: Vec<&OpenEntry<S>> = self
            .open
            .iter()
            .map(|Reverse(entry)| entry)
            .filter(|entry| {
                matches!(
                    self.open_best.get(&entry.track.end().id()),
                    Some(best) if Rc::ptr_eq(best, &entry.track)
                )
            })
            .collect();
        entries.sort_by(|a, b| a.eval.cmp(&b.eval).then(a.seq.cmp(&b.seq)));
        entries.iter().map(|entry| entry.track.nodes()).collect()
    }

    /// The expanded tracks as node chains, ordered by cost, then chain
    /// length, then end position.
    pub fn closed_tracks(&self) -> Vec<Vec<Node<S>>> {
        let mut tracks: Vec<&Rc<Track<S>>> = self.closed.values().collect();
        tracks.sort_by_key(|track| {
            let p = track.end().position();
            (
                OrderedFloat(track.cost()),
                track.edges_from_start(),
                OrderedFloat(p.x),
                OrderedFloat(p.y),
                OrderedFloat(p.z),
            )
        });
        tracks.iter().map(|track| track.nodes()).collect()
    }

    //==== Private Methods ====================================================

    fn evaluation(&self, track: &Track<S>, target: &Node<S>) -> f64 {
        self.balance * track.cost()
            + (1.0 - self.balance) * self.heuristic.estimate(track.end(), target)
    }

    fn push_open(&mut self, eval: f64, track: Rc<Track<S>>) {
        self.open_best.insert(track.end().id(), Rc::clone(&track));
        self.open.push(Reverse(OpenEntry {
            eval: OrderedFloat(eval),
            seq: self.seq,
            track,
        }));
        self.seq += 1;
    }

    fn require_ended(&self) -> Result<(), Error> {
        if !self.initialized() {
            return Err(Error::NotInitialized);
        }
        if !self.search_ended() {
            return Err(Error::SearchNotEnded);
        }
        Ok(())
    }
}

impl<S> Default for Astar<S> {
    fn default() -> Self {
        Astar::new()
    }
}
