/// Can be used while indexing keys without values, like ``Rbt<K, Empty>``.
/// [`Set`](crate::Set) stores its keys this way.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct Empty {}
