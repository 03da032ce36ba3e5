#[macro_use]
extern crate quickcheck_macros;

mod rbtree;

use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// a red-black tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<K> {
    /// Insert the K into the tree
    Insert(K),
    /// Delete one K from the tree
    Delete(K),
    /// Look the K up
    Search(K),
    /// Compare in-order walks
    Inorder,
}

impl<K> Arbitrary for Op<K>
where
    K: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Inserts are
    /// weighted up so the trees grow past a handful of nodes.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2, 3]).unwrap() {
            0 => Op::Insert(K::arbitrary(g)),
            1 => Op::Delete(K::arbitrary(g)),
            2 => Op::Search(K::arbitrary(g)),
            3 => Op::Inorder,
            _ => unreachable!(),
        }
    }
}

/// Routes the library's `log` output through `RUST_LOG` while testing.
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
