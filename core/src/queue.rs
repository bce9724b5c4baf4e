//! Addressable min-priority queues.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::mem;

/// A min-priority queue in which every element is present at most once
/// and can be re-prioritised through [`offer`](MinPriorityQueue::offer).
pub trait MinPriorityQueue<T, P> {
    /// Offer an element with a priority.
    ///
    /// An absent element is inserted. A present element has its priority
    /// lowered if the given priority is strictly smaller than its current
    /// one, and is left untouched otherwise. Returns whether the queue
    /// changed, i.e. `false` only if the element was present with a
    /// priority at least as small.
    fn offer(&mut self, elem: T, priority: P) -> bool;

    /// Remove and return an element of minimal priority.
    fn poll(&mut self) -> Option<T>;

    fn is_empty(&self) -> bool;
}

/// A node of the heap arena.
struct Node<T, P> {
    elem: T,
    priority: P,
    child: Option<usize>,
    sibling: Option<usize>,
    /// The parent of a first child, otherwise the previous sibling.
    prev: Option<usize>,
}

/// A pairing heap with an index from elements to heap nodes, supporting
/// `offer` (and thus decrease-key) in constant time and `poll` in
/// amortised logarithmic time.
///
/// Priorities are ordered by a comparator, [`Ord::cmp`] unless another
/// is given via [`with_comparator`](PairingHeap::with_comparator).
/// Among elements of equal priority, the order of removal depends only
/// on the sequence of operations performed on the heap.
pub struct PairingHeap<T, P, F = fn(&P, &P) -> Ordering> {
    nodes: Vec<Option<Node<T, P>>>,
    free: Vec<usize>,
    index: HashMap<T, usize>,
    root: Option<usize>,
    cmp: F,
    // Reused between polls for the pairing passes.
    scratch: Vec<usize>,
}

impl<T, P> PairingHeap<T, P>
where
    T: Eq + Hash + Clone,
    P: Ord,
{
    pub fn new() -> PairingHeap<T, P> {
        let cmp: fn(&P, &P) -> Ordering = Ord::cmp;
        PairingHeap::with_comparator(cmp)
    }
}

impl<T, P> Default for PairingHeap<T, P>
where
    T: Eq + Hash + Clone,
    P: Ord,
{
    fn default() -> PairingHeap<T, P> {
        PairingHeap::new()
    }
}

impl<T, P, F> PairingHeap<T, P, F>
where
    T: Eq + Hash + Clone,
    F: Fn(&P, &P) -> Ordering,
{
    pub fn with_comparator(cmp: F) -> PairingHeap<T, P, F> {
        PairingHeap {
            nodes: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
            root: None,
            cmp,
            scratch: Vec::new(),
        }
    }

    /// The number of elements in the heap.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn contains(&self, elem: &T) -> bool {
        self.index.contains_key(elem)
    }

    /// The current priority of an element, if present.
    pub fn priority(&self, elem: &T) -> Option<&P> {
        self.index.get(elem).map(|&i| &self.node(i).priority)
    }

    /// The element of minimal priority, without removing it.
    pub fn peek(&self) -> Option<(&T, &P)> {
        self.root.map(|r| {
            let n = self.node(r);
            (&n.elem, &n.priority)
        })
    }

    /// See [`MinPriorityQueue::offer`].
    pub fn offer(&mut self, elem: T, priority: P) -> bool {
        if let Some(&i) = self.index.get(&elem) {
            if (self.cmp)(&priority, &self.node(i).priority) != Ordering::Less {
                return false
            }
            self.node_mut(i).priority = priority;
            if self.root != Some(i) {
                self.cut(i);
                self.push_root(i);
            }
            return true
        }
        let i = self.alloc(Node {
            elem: elem.clone(),
            priority,
            child: None,
            sibling: None,
            prev: None,
        });
        self.index.insert(elem, i);
        self.push_root(i);
        true
    }

    /// Remove an element of minimal priority, together with its priority.
    pub fn poll_entry(&mut self) -> Option<(T, P)> {
        let r = self.root?;
        let node = match self.nodes[r].take() {
            Some(n) => n,
            None => unreachable!("heap root {} is vacant", r),
        };
        self.free.push(r);
        self.index.remove(&node.elem);
        self.root = self.combine(node.child);
        Some((node.elem, node.priority))
    }

    /// Remove an element of minimal priority.
    pub fn poll(&mut self) -> Option<T> {
        self.poll_entry().map(|(elem, _)| elem)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.index.clear();
        self.root = None;
    }

    fn node(&self, i: usize) -> &Node<T, P> {
        match &self.nodes[i] {
            Some(n) => n,
            None => unreachable!("heap slot {} is vacant", i),
        }
    }

    fn node_mut(&mut self, i: usize) -> &mut Node<T, P> {
        match &mut self.nodes[i] {
            Some(n) => n,
            None => unreachable!("heap slot {} is vacant", i),
        }
    }

    fn alloc(&mut self, node: Node<T, P>) -> usize {
        match self.free.pop() {
            Some(i) => {
                self.nodes[i] = Some(node);
                i
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    /// Meld a detached tree with the root tree.
    fn push_root(&mut self, i: usize) {
        let root = match self.root {
            Some(r) => self.meld(r, i),
            None => i,
        };
        self.root = Some(root);
    }

    /// Link two detached trees, returning the new root. On equal
    /// priorities, `a` stays on top.
    fn meld(&mut self, a: usize, b: usize) -> usize {
        let (parent, child) =
            if (self.cmp)(&self.node(b).priority, &self.node(a).priority) == Ordering::Less {
                (b, a)
            } else {
                (a, b)
            };
        let first = self.node(parent).child;
        {
            let c = self.node_mut(child);
            c.sibling = first;
            c.prev = Some(parent);
        }
        if let Some(f) = first {
            self.node_mut(f).prev = Some(child);
        }
        self.node_mut(parent).child = Some(child);
        parent
    }

    /// Detach the tree rooted at `i` from its parent and siblings.
    fn cut(&mut self, i: usize) {
        let (prev, sibling) = {
            let n = self.node_mut(i);
            (n.prev.take(), n.sibling.take())
        };
        if let Some(s) = sibling {
            self.node_mut(s).prev = prev;
        }
        if let Some(p) = prev {
            let pn = self.node_mut(p);
            if pn.child == Some(i) {
                pn.child = sibling;
            } else {
                pn.sibling = sibling;
            }
        }
    }

    /// Two-pass pairing of a list of siblings into a single tree.
    fn combine(&mut self, first: Option<usize>) -> Option<usize> {
        let mut trees = mem::take(&mut self.scratch);
        trees.clear();
        let mut next = first;
        while let Some(i) = next {
            let n = self.node_mut(i);
            next = n.sibling.take();
            n.prev = None;
            trees.push(i);
        }
        // Left to right, in pairs.
        let mut k = 0;
        let mut i = 0;
        while i < trees.len() {
            trees[k] = if i + 1 < trees.len() {
                self.meld(trees[i], trees[i + 1])
            } else {
                trees[i]
            };
            k += 1;
            i += 2;
        }
        trees.truncate(k);
        // Right to left, accumulating.
        let mut root = None;
        while let Some(t) = trees.pop() {
            root = Some(match root {
                Some(r) => self.meld(t, r),
                None => t,
            });
        }
        self.scratch = trees;
        root
    }
}

impl<T, P, F> MinPriorityQueue<T, P> for PairingHeap<T, P, F>
where
    T: Eq + Hash + Clone,
    F: Fn(&P, &P) -> Ordering,
{
    fn offer(&mut self, elem: T, priority: P) -> bool {
        PairingHeap::offer(self, elem, priority)
    }

    fn poll(&mut self) -> Option<T> {
        PairingHeap::poll(self)
    }

    fn is_empty(&self) -> bool {
        PairingHeap::is_empty(self)
    }
}

impl<T, P, F> fmt::Debug for PairingHeap<T, P, F>
where
    T: fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.nodes.iter().flatten().map(|n| (&n.elem, &n.priority)))
            .finish()
    }
}
