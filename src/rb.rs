use std::{
    cmp::Ordering,
    mem,
    ops::{Bound, RangeBounds},
};

use compare::{natural, Compare, Natural};
use rand::Rng;

use crate::depth::Depth;
use crate::error::RbtError;

// Arena offset for an absent child/parent position.
const NIL: usize = usize::MAX;

/// Rbt manage a single instance of in-memory index using a
/// [red-black][rbt] tree.
///
/// Nodes live in a dense arena, child and parent links are arena
/// offsets. The entry count is therefore always the arena length,
/// never recomputed by walking the tree.
///
/// [rbt]: https://en.wikipedia.org/wiki/Red-black_tree
#[derive(Clone)]
pub struct Rbt<K, V, C = Natural<K>>
where
    C: Compare<K>,
{
    name: String,
    nodes: Vec<Node<K, V>>,
    root: usize,
    cmp: C,
}

/// Different ways to construct a new Rbt instance.
impl<K, V> Rbt<K, V>
where
    K: Ord,
{
    /// Create an empty instance of Rbt, identified by `name`, ordered
    /// by the natural order of its keys. Applications can choose
    /// unique names.
    pub fn new<S>(name: S) -> Rbt<K, V>
    where
        S: AsRef<str>,
    {
        Rbt::with_cmp(name, natural())
    }

    /// Create a new instance of Rbt tree and load it with entries
    /// from `iter`. Note that iterator should return (key, value)
    /// tuples, where key must be ``unique``.
    pub fn load_from<S, I>(name: S, iter: I) -> Result<Rbt<K, V>, RbtError<K>>
    where
        S: AsRef<str>,
        I: Iterator<Item = (K, V)>,
    {
        let mut index = Rbt::new(name);
        for (key, value) in iter {
            if let Some((key, _value)) = index.create(key, value) {
                return Err(RbtError::DuplicateKey(key));
            }
        }
        Ok(index)
    }
}

impl<K, V, C> Rbt<K, V, C>
where
    C: Compare<K>,
{
    /// Create an empty instance of Rbt ordered by `cmp`. The
    /// comparator supplies the total order over keys, refer to the
    /// [compare] crate for ready made comparators and combinators.
    ///
    /// [compare]: https://docs.rs/compare
    pub fn with_cmp<S>(name: S, cmp: C) -> Rbt<K, V, C>
    where
        S: AsRef<str>,
    {
        Rbt {
            name: name.as_ref().to_string(),
            nodes: Vec::new(),
            root: NIL,
            cmp,
        }
    }
}

/// Maintenance API.
impl<K, V, C> Rbt<K, V, C>
where
    C: Compare<K>,
{
    /// Identify this instance. Applications can choose unique names
    /// while creating Rbt instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Return a reference to the comparator ordering this instance.
    #[inline]
    pub fn cmp(&self) -> &C {
        &self.cmp
    }

    /// Return quickly with basic statisics, only entries() method is
    /// valid with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.len(), mem::size_of::<Node<K, V>>())
    }
}

enum Attach<K, V> {
    Fresh,
    Occupied { node: usize, key: K, value: V },
}

/// Write operations on Rbt instance.
impl<K, V, C> Rbt<K, V, C>
where
    C: Compare<K>,
{
    /// Create a new {key, value} entry in the index. If key is already
    /// present the index is left untouched and the rejected pair is
    /// handed back to the caller, who remains its owner.
    pub fn create(&mut self, key: K, value: V) -> Option<(K, V)> {
        match self.attach(key, value) {
            Attach::Fresh => None,
            Attach::Occupied { key, value, .. } => Some((key, value)),
        }
    }

    /// Set value for key. If there is an existing entry for key,
    /// overwrite the old value with new value and return the old
    /// value. The key stored by the first insert is retained.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.attach(key, value) {
            Attach::Fresh => None,
            Attach::Occupied { node, value, .. } => {
                Some(mem::replace(&mut self.nodes[node].value, value))
            }
        }
    }

    /// Delete key from this instance and return its value. If key is
    /// not present, then delete is effectively a no-op.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        C: Compare<Q, K>,
        Q: ?Sized,
    {
        let node = self.search_node(key)?;
        let Node { value, .. } = self.remove_node(node);
        Some(value)
    }

    /// Remove every entry from this instance, dropping all keys and
    /// values.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NIL;
    }

    /// Validate tree with the following rules:
    ///
    /// * Root node, when present, is black.
    /// * From root to any leaf, no consecutive reds in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Parent links agree with the child links of the actual parent.
    /// * Make sure keys are in comparator order.
    ///
    /// Additionally return full statistics on the tree. Refer to
    /// [`Stats`] for more information.
    pub fn validate(&self) -> Result<Stats, RbtError<K>>
    where
        K: Clone,
    {
        if self.is_red(self.root) {
            return Err(RbtError::RedRoot);
        }
        let mut stats = Stats::new(self.len(), mem::size_of::<Node<K, V>>());
        stats.set_depths(Depth::new());
        let blacks = self.validate_tree(self.root, false, 0, 0, &mut stats)?;
        stats.set_blacks(blacks);
        Ok(stats)
    }
}

/// Read operations on Rbt instance.
impl<K, V, C> Rbt<K, V, C>
where
    C: Compare<K>,
{
    /// Get a reference to the value for key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        C: Compare<Q, K>,
        Q: ?Sized,
    {
        let node = self.search_node(key)?;
        Some(&self.nodes[node].value)
    }

    /// Check whether key is present in the index.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        C: Compare<Q, K>,
        Q: ?Sized,
    {
        self.search_node(key).is_some()
    }

    /// Return the entry with the least key, or None when the index is
    /// empty.
    pub fn min(&self) -> Option<(&K, &V)> {
        if self.root == NIL {
            return None;
        }
        let node = &self.nodes[min_in(&self.nodes, self.root)];
        Some((&node.key, &node.value))
    }

    /// Return the entry with the greatest key, or None when the index
    /// is empty.
    pub fn max(&self) -> Option<(&K, &V)> {
        if self.root == NIL {
            return None;
        }
        let node = &self.nodes[max_in(&self.nodes, self.root)];
        Some((&node.key, &node.value))
    }

    /// Return a random entry from this index. Entries are picked with
    /// uniform probability, since the arena is dense.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<(&K, &V)> {
        if self.nodes.is_empty() {
            return None;
        }
        let node = &self.nodes[rng.gen_range(0..self.nodes.len())];
        Some((&node.key, &node.value))
    }

    /// Return an iterator over all entries in this instance, in
    /// comparator order.
    pub fn iter(&self) -> Iter<K, V> {
        let next = if self.root == NIL {
            NIL
        } else {
            min_in(&self.nodes, self.root)
        };
        Iter {
            nodes: &self.nodes,
            next,
        }
    }

    /// Range over all entries from low to high, in comparator order.
    pub fn range<R>(&self, range: R) -> Range<K, V, C, R>
    where
        R: RangeBounds<K>,
    {
        let next = lower_bound_in(&self.nodes, &self.cmp, self.root, range.start_bound());
        Range {
            nodes: &self.nodes,
            cmp: &self.cmp,
            root: self.root,
            next,
            range,
        }
    }

    /// Visit every entry in `order`, applying `visit` on (key, value).
    /// [`Traversal::InOrder`] visits entries in comparator order.
    pub fn traverse<F>(&self, order: Traversal, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        self.walk(self.root, order, &mut visit)
    }

    fn walk<F>(&self, node: usize, order: Traversal, visit: &mut F)
    where
        F: FnMut(&K, &V),
    {
        if node == NIL {
            return;
        }
        let n = &self.nodes[node];
        match order {
            Traversal::PreOrder => {
                visit(&n.key, &n.value);
                self.walk(n.left, order, visit);
                self.walk(n.right, order, visit);
            }
            Traversal::InOrder => {
                self.walk(n.left, order, visit);
                visit(&n.key, &n.value);
                self.walk(n.right, order, visit);
            }
            Traversal::PostOrder => {
                self.walk(n.left, order, visit);
                self.walk(n.right, order, visit);
                visit(&n.key, &n.value);
            }
        }
    }
}

impl<K, V, C> Rbt<K, V, C>
where
    C: Compare<K>,
{
    fn search_node<Q>(&self, key: &Q) -> Option<usize>
    where
        C: Compare<Q, K>,
        Q: ?Sized,
    {
        let mut node = self.root;
        while node != NIL {
            node = match self.cmp.compare(key, &self.nodes[node].key) {
                Ordering::Less => self.nodes[node].left,
                Ordering::Greater => self.nodes[node].right,
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    // Descend from root and attach a fresh red leaf, unless an equal
    // key is found, in which case the (key, value) pair is handed back
    // untouched along with the occupied offset.
    fn attach(&mut self, key: K, value: V) -> Attach<K, V> {
        let (mut node, mut parent) = (self.root, NIL);
        let mut went_left = false;
        while node != NIL {
            parent = node;
            match self.cmp.compare(&key, &self.nodes[node].key) {
                Ordering::Less => {
                    went_left = true;
                    node = self.nodes[node].left;
                }
                Ordering::Greater => {
                    went_left = false;
                    node = self.nodes[node].right;
                }
                Ordering::Equal => return Attach::Occupied { node, key, value },
            }
        }

        let node = self.nodes.len();
        self.nodes.push(Node {
            key,
            value,
            black: false,
            left: NIL,
            right: NIL,
            parent,
        });
        if parent == NIL {
            self.root = node;
        } else if went_left {
            self.nodes[parent].left = node;
        } else {
            self.nodes[parent].right = node;
        }
        self.insert_fixup(node);
        Attach::Fresh
    }

    // Walk upward from a freshly attached red leaf restoring the
    // red-black shape. Terminates when the parent is black or node is
    // root; root is forced black on the way out.
    fn insert_fixup(&mut self, mut node: usize) {
        while self.is_red(self.nodes[node].parent) {
            let parent = self.nodes[node].parent;
            // a red parent is never the root, so grand is a valid offset.
            let grand = self.nodes[parent].parent;
            if parent == self.nodes[grand].left {
                let uncle = self.nodes[grand].right;
                if self.is_red(uncle) {
                    self.nodes[parent].black = true;
                    self.nodes[uncle].black = true;
                    self.nodes[grand].black = false;
                    node = grand;
                } else {
                    if node == self.nodes[parent].right {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.nodes[node].parent;
                    let grand = self.nodes[parent].parent;
                    self.nodes[parent].black = true;
                    self.nodes[grand].black = false;
                    self.rotate_right(grand);
                }
            } else {
                let uncle = self.nodes[grand].left;
                if self.is_red(uncle) {
                    self.nodes[parent].black = true;
                    self.nodes[uncle].black = true;
                    self.nodes[grand].black = false;
                    node = grand;
                } else {
                    if node == self.nodes[parent].left {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.nodes[node].parent;
                    let grand = self.nodes[parent].parent;
                    self.nodes[parent].black = true;
                    self.nodes[grand].black = false;
                    self.rotate_left(grand);
                }
            }
        }
        let root = self.root;
        self.nodes[root].black = true;
    }

    // Unlink `node` from the tree and release its arena slot. For the
    // two-children case the in-order successor node itself is spliced
    // into node's position, keys and values are never copied around.
    fn remove_node(&mut self, node: usize) -> Node<K, V> {
        let (x, x_parent, spliced_black);
        if self.nodes[node].left == NIL {
            x = self.nodes[node].right;
            x_parent = self.nodes[node].parent;
            spliced_black = self.nodes[node].black;
            self.transplant(node, x);
        } else if self.nodes[node].right == NIL {
            x = self.nodes[node].left;
            x_parent = self.nodes[node].parent;
            spliced_black = self.nodes[node].black;
            self.transplant(node, x);
        } else {
            let succ = min_in(&self.nodes, self.nodes[node].right);
            spliced_black = self.nodes[succ].black;
            x = self.nodes[succ].right;
            if self.nodes[succ].parent == node {
                x_parent = succ;
            } else {
                x_parent = self.nodes[succ].parent;
                self.transplant(succ, x);
                let right = self.nodes[node].right;
                self.nodes[succ].right = right;
                self.nodes[right].parent = succ;
            }
            self.transplant(node, succ);
            let left = self.nodes[node].left;
            self.nodes[succ].left = left;
            self.nodes[left].parent = succ;
            self.nodes[succ].black = self.nodes[node].black;
        }
        if spliced_black {
            self.delete_fixup(x, x_parent);
        }
        self.detach(node)
    }

    // Walk upward from the replacement position, which may be an
    // absent-but-black position (NIL, with its parent supplied
    // separately), restoring equal black counts.
    fn delete_fixup(&mut self, mut x: usize, mut parent: usize) {
        while x != self.root && self.is_black(x) {
            if x == self.nodes[parent].left {
                // x is doubly black, so its sibling subtree is non-empty.
                let mut sib = self.nodes[parent].right;
                if self.is_red(sib) {
                    self.nodes[sib].black = true;
                    self.nodes[parent].black = false;
                    self.rotate_left(parent);
                    sib = self.nodes[parent].right;
                }
                if self.is_black(self.nodes[sib].left) && self.is_black(self.nodes[sib].right) {
                    self.nodes[sib].black = false;
                    x = parent;
                    parent = self.nodes[x].parent;
                } else {
                    if self.is_black(self.nodes[sib].right) {
                        let near = self.nodes[sib].left;
                        self.nodes[near].black = true;
                        self.nodes[sib].black = false;
                        self.rotate_right(sib);
                        sib = self.nodes[parent].right;
                    }
                    self.nodes[sib].black = self.nodes[parent].black;
                    self.nodes[parent].black = true;
                    let far = self.nodes[sib].right;
                    self.nodes[far].black = true;
                    self.rotate_left(parent);
                    x = self.root;
                    parent = NIL;
                }
            } else {
                let mut sib = self.nodes[parent].left;
                if self.is_red(sib) {
                    self.nodes[sib].black = true;
                    self.nodes[parent].black = false;
                    self.rotate_right(parent);
                    sib = self.nodes[parent].left;
                }
                if self.is_black(self.nodes[sib].left) && self.is_black(self.nodes[sib].right) {
                    self.nodes[sib].black = false;
                    x = parent;
                    parent = self.nodes[x].parent;
                } else {
                    if self.is_black(self.nodes[sib].left) {
                        let near = self.nodes[sib].right;
                        self.nodes[near].black = true;
                        self.nodes[sib].black = false;
                        self.rotate_left(sib);
                        sib = self.nodes[parent].left;
                    }
                    self.nodes[sib].black = self.nodes[parent].black;
                    self.nodes[parent].black = true;
                    let far = self.nodes[sib].left;
                    self.nodes[far].black = true;
                    self.rotate_right(parent);
                    x = self.root;
                    parent = NIL;
                }
            }
        }
        if x != NIL {
            self.nodes[x].black = true;
        }
    }

    // Replace the subtree hanging at `node` with the subtree hanging
    // at `with`, rewriting the parent linkage on both sides. `with`
    // may be NIL.
    fn transplant(&mut self, node: usize, with: usize) {
        let parent = self.nodes[node].parent;
        if parent == NIL {
            self.root = with;
        } else if self.nodes[parent].left == node {
            self.nodes[parent].left = with;
        } else {
            self.nodes[parent].right = with;
        }
        if with != NIL {
            self.nodes[with].parent = parent;
        }
    }

    // Release the arena slot of an already unlinked node. swap_remove
    // moves the last slot into `node`'s offset, so every link referring
    // to the moved slot is rewritten.
    fn detach(&mut self, node: usize) -> Node<K, V> {
        let detached = self.nodes.swap_remove(node);
        let moved = self.nodes.len();
        if node < moved {
            let (parent, left, right) = {
                let n = &self.nodes[node];
                (n.parent, n.left, n.right)
            };
            if parent == NIL {
                self.root = node;
            } else if self.nodes[parent].left == moved {
                self.nodes[parent].left = node;
            } else {
                self.nodes[parent].right = node;
            }
            if left != NIL {
                self.nodes[left].parent = node;
            }
            if right != NIL {
                self.nodes[right].parent = node;
            }
        }
        detached
    }

    //              node                 x
    //              /  \                / \
    //           left   x     =>    node   xr
    //                 / \          /  \
    //               xl   xr     left   xl
    //
    fn rotate_left(&mut self, node: usize) {
        let x = self.nodes[node].right;
        if x == NIL {
            panic!("rotate_left(): rotating with absent child? call the programmer");
        }
        let xl = self.nodes[x].left;
        self.nodes[node].right = xl;
        if xl != NIL {
            self.nodes[xl].parent = node;
        }
        let parent = self.nodes[node].parent;
        self.nodes[x].parent = parent;
        if parent == NIL {
            self.root = x;
        } else if self.nodes[parent].left == node {
            self.nodes[parent].left = x;
        } else {
            self.nodes[parent].right = x;
        }
        self.nodes[x].left = node;
        self.nodes[node].parent = x;
    }

    //              node                 x
    //              /  \                / \
    //             x   right    =>    xl   node
    //            / \                      /  \
    //          xl   xr                  xr    right
    //
    fn rotate_right(&mut self, node: usize) {
        let x = self.nodes[node].left;
        if x == NIL {
            panic!("rotate_right(): rotating with absent child? call the programmer");
        }
        let xr = self.nodes[x].right;
        self.nodes[node].left = xr;
        if xr != NIL {
            self.nodes[xr].parent = node;
        }
        let parent = self.nodes[node].parent;
        self.nodes[x].parent = parent;
        if parent == NIL {
            self.root = x;
        } else if self.nodes[parent].left == node {
            self.nodes[parent].left = x;
        } else {
            self.nodes[parent].right = x;
        }
        self.nodes[x].right = node;
        self.nodes[node].parent = x;
    }

    #[inline]
    fn is_red(&self, node: usize) -> bool {
        node != NIL && !self.nodes[node].black
    }

    #[inline]
    fn is_black(&self, node: usize) -> bool {
        !self.is_red(node)
    }

    fn validate_tree(
        &self,
        node: usize,
        fromred: bool,
        mut nb: usize,
        depth: usize,
        stats: &mut Stats,
    ) -> Result<usize, RbtError<K>>
    where
        K: Clone,
    {
        if node == NIL {
            stats.depths.as_mut().unwrap().sample(depth);
            return Ok(nb);
        }

        let red = self.is_red(node);
        if fromred && red {
            return Err(RbtError::ConsecutiveReds);
        }
        if !red {
            nb += 1;
        }
        let n = &self.nodes[node];
        for child in [n.left, n.right].iter().cloned() {
            if child != NIL && self.nodes[child].parent != node {
                let msg = format!("node: {} child: {}", node, child);
                return Err(RbtError::ParentMismatch(msg));
            }
        }
        let lblacks = self.validate_tree(n.left, red, nb, depth + 1, stats)?;
        let rblacks = self.validate_tree(n.right, red, nb, depth + 1, stats)?;
        if lblacks != rblacks {
            let err = format!("left: {} right: {}", lblacks, rblacks);
            return Err(RbtError::UnbalancedBlacks(err));
        }
        if n.left != NIL {
            let left = &self.nodes[n.left];
            if self.cmp.compare(&left.key, &n.key) != Ordering::Less {
                return Err(RbtError::SortError(left.key.clone(), n.key.clone()));
            }
        }
        if n.right != NIL {
            let right = &self.nodes[n.right];
            if self.cmp.compare(&right.key, &n.key) != Ordering::Greater {
                return Err(RbtError::SortError(right.key.clone(), n.key.clone()));
            }
        }
        Ok(lblacks)
    }
}

fn min_in<K, V>(nodes: &[Node<K, V>], mut node: usize) -> usize {
    while nodes[node].left != NIL {
        node = nodes[node].left;
    }
    node
}

fn max_in<K, V>(nodes: &[Node<K, V>], mut node: usize) -> usize {
    while nodes[node].right != NIL {
        node = nodes[node].right;
    }
    node
}

// Next node in comparator order, walking the parent links.
fn successor_in<K, V>(nodes: &[Node<K, V>], node: usize) -> usize {
    if nodes[node].right != NIL {
        return min_in(nodes, nodes[node].right);
    }
    let (mut node, mut parent) = (node, nodes[node].parent);
    while parent != NIL && nodes[parent].right == node {
        node = parent;
        parent = nodes[parent].parent;
    }
    parent
}

// Previous node in comparator order, walking the parent links.
fn predecessor_in<K, V>(nodes: &[Node<K, V>], node: usize) -> usize {
    if nodes[node].left != NIL {
        return max_in(nodes, nodes[node].left);
    }
    let (mut node, mut parent) = (node, nodes[node].parent);
    while parent != NIL && nodes[parent].left == node {
        node = parent;
        parent = nodes[parent].parent;
    }
    parent
}

// Least node admitted by the lower bound, NIL when no node qualifies.
fn lower_bound_in<K, V, C>(
    nodes: &[Node<K, V>],
    cmp: &C,
    root: usize,
    bound: Bound<&K>,
) -> usize
where
    C: Compare<K>,
{
    let (key, inclusive) = match bound {
        Bound::Unbounded if root == NIL => return NIL,
        Bound::Unbounded => return min_in(nodes, root),
        Bound::Included(key) => (key, true),
        Bound::Excluded(key) => (key, false),
    };
    let (mut node, mut low) = (root, NIL);
    while node != NIL {
        node = match cmp.compare(&nodes[node].key, key) {
            Ordering::Greater => {
                low = node;
                nodes[node].left
            }
            Ordering::Less => nodes[node].right,
            Ordering::Equal if inclusive => return node,
            Ordering::Equal => nodes[node].right,
        };
    }
    low
}

// Greatest node admitted by the upper bound, NIL when no node qualifies.
fn upper_bound_in<K, V, C>(
    nodes: &[Node<K, V>],
    cmp: &C,
    root: usize,
    bound: Bound<&K>,
) -> usize
where
    C: Compare<K>,
{
    let (key, inclusive) = match bound {
        Bound::Unbounded if root == NIL => return NIL,
        Bound::Unbounded => return max_in(nodes, root),
        Bound::Included(key) => (key, true),
        Bound::Excluded(key) => (key, false),
    };
    let (mut node, mut high) = (root, NIL);
    while node != NIL {
        node = match cmp.compare(&nodes[node].key, key) {
            Ordering::Less => {
                high = node;
                nodes[node].right
            }
            Ordering::Greater => nodes[node].left,
            Ordering::Equal if inclusive => return node,
            Ordering::Equal => nodes[node].left,
        };
    }
    high
}

/// Order of node visits in [`Rbt::traverse`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Traversal {
    /// Visit a node before either of its subtrees.
    PreOrder,
    /// Visit a node between its subtrees, yielding comparator order.
    InOrder,
    /// Visit a node after both of its subtrees.
    PostOrder,
}

/// Lazy iterator over every entry in an [`Rbt`] instance, in
/// comparator order.
pub struct Iter<'a, K, V> {
    nodes: &'a [Node<K, V>],
    next: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == NIL {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.next];
        self.next = successor_in(nodes, self.next);
        Some((&node.key, &node.value))
    }
}

/// Lazy iterator over the entries of an [`Rbt`] instance that fall
/// within a range, from low to high.
pub struct Range<'a, K, V, C, R>
where
    C: Compare<K>,
    R: RangeBounds<K>,
{
    nodes: &'a [Node<K, V>],
    cmp: &'a C,
    root: usize,
    next: usize,
    range: R,
}

impl<'a, K, V, C, R> Range<'a, K, V, C, R>
where
    C: Compare<K>,
    R: RangeBounds<K>,
{
    /// Flip this range to iterate from high to low.
    pub fn rev(self) -> Reverse<'a, K, V, C, R> {
        let next = upper_bound_in(self.nodes, self.cmp, self.root, self.range.end_bound());
        Reverse {
            nodes: self.nodes,
            cmp: self.cmp,
            next,
            range: self.range,
        }
    }
}

impl<'a, K, V, C, R> Iterator for Range<'a, K, V, C, R>
where
    C: Compare<K>,
    R: RangeBounds<K>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == NIL {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.next];
        let inside = match self.range.end_bound() {
            Bound::Unbounded => true,
            Bound::Included(high) => self.cmp.compare(&node.key, high) != Ordering::Greater,
            Bound::Excluded(high) => self.cmp.compare(&node.key, high) == Ordering::Less,
        };
        if !inside {
            self.next = NIL;
            return None;
        }
        self.next = successor_in(nodes, self.next);
        Some((&node.key, &node.value))
    }
}

/// Lazy iterator over the entries of an [`Rbt`] instance that fall
/// within a range, from high to low.
pub struct Reverse<'a, K, V, C, R>
where
    C: Compare<K>,
    R: RangeBounds<K>,
{
    nodes: &'a [Node<K, V>],
    cmp: &'a C,
    next: usize,
    range: R,
}

impl<'a, K, V, C, R> Iterator for Reverse<'a, K, V, C, R>
where
    C: Compare<K>,
    R: RangeBounds<K>,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == NIL {
            return None;
        }
        let nodes = self.nodes;
        let node = &nodes[self.next];
        let inside = match self.range.start_bound() {
            Bound::Unbounded => true,
            Bound::Included(low) => self.cmp.compare(&node.key, low) != Ordering::Less,
            Bound::Excluded(low) => self.cmp.compare(&node.key, low) == Ordering::Greater,
        };
        if !inside {
            self.next = NIL;
            return None;
        }
        self.next = predecessor_in(nodes, self.next);
        Some((&node.key, &node.value))
    }
}

/// Node corresponds to a single entry in Rbt instance.
#[derive(Clone)]
pub struct Node<K, V> {
    key: K,
    value: V,
    black: bool,   // store: black or red
    left: usize,   // arena offset of left child, NIL when absent
    right: usize,  // arena offset of right child, NIL when absent
    parent: usize, // arena offset of parent, NIL for the root
}

impl<K, V> Node<K, V> {
    /// Return a reference to this node's key.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Return a reference to this node's value.
    #[inline]
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Return whether this node is colored black.
    #[inline]
    pub fn is_black(&self) -> bool {
        self.black
    }
}

/// Statistics on [`Rbt`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`Rbt::stats`] method.
/// * To get full statisics via [`Rbt::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    pub(crate) depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    /// Return number entries in [`Rbt`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for `Rbt<K,V>`. Although
    /// the node overhead is constant, the node size varies based on
    /// key and value types.
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black nodes from root to leaf, on both left
    /// and right child.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics.
    pub fn depths(&self) -> Option<Depth> {
        if self.depths.as_ref().unwrap().samples() == 0 {
            None
        } else {
            self.depths.clone()
        }
    }
}
