/// RbtError enumerates over all possible errors that this package
/// shall return.
#[derive(Debug, PartialEq)]
pub enum RbtError<K> {
    /// Fatal case, breaking one of the red-black rules, a red node
    /// has a red child.
    ConsecutiveReds,
    /// Fatal case, breaking one of the red-black rules, two paths
    /// carry different number of black nodes. The String component
    /// of this variant can be used for debugging.
    UnbalancedBlacks(String),
    /// Fatal case, the root node is colored red.
    RedRoot,
    /// Fatal case, a child's parent link does not point back at its
    /// actual parent. The String component of this variant can be
    /// used for debugging.
    ParentMismatch(String),
    /// Fatal case, index entries are not in comparator order.
    SortError(K, K),
    /// Returned by load_from() API when the iterator repeats a key.
    DuplicateKey(K),
}
