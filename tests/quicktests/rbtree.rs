use redblack::Tree;

use std::collections::{BTreeMap, HashSet};

use crate::{init_logger, Op};

/// The keys a multiset model holds, in sorted order with repeats.
fn expand(model: &BTreeMap<i8, usize>) -> Vec<i8> {
    model
        .iter()
        .flat_map(|(k, count)| std::iter::repeat(*k).take(*count))
        .collect()
}

fn keys(tree: &Tree<i8>) -> Vec<i8> {
    tree.iter().map(|(k, _)| *k).collect()
}

/// Applies a set of operations to a tree and a counting map.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same multiset of keys in both, and that the
/// tree was a valid red-black tree after every single step.
fn do_ops(ops: &[Op<i8>], tree: &mut Tree<i8>, model: &mut BTreeMap<i8, usize>) -> bool {
    for op in ops {
        let agrees = match op {
            Op::Insert(k) => {
                tree.insert(*k);
                *model.entry(*k).or_insert(0) += 1;
                true
            }
            Op::Delete(k) => {
                let expected = match model.get_mut(k) {
                    Some(count) if *count > 1 => {
                        *count -= 1;
                        true
                    }
                    Some(_) => {
                        model.remove(k);
                        true
                    }
                    None => false,
                };
                tree.delete(k) == expected
            }
            Op::Search(k) => {
                tree.search(k).map(|n| *n.key()) == model.get(k).map(|_| *k)
            }
            Op::Inorder => keys(tree) == expand(model),
        };

        if !agrees {
            log::info!("tree disagreed with model at {:?}: {:?}", op, tree);
            return false;
        }
        if let Err(violation) = tree.validate() {
            log::info!("{} after {:?}: {:?}", violation, op, tree);
            return false;
        }
    }

    true
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    init_logger();
    log::debug!("ops: {:?}", ops);

    let mut tree = Tree::new();
    let mut model = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut model)
        && keys(&tree) == expand(&model)
        && tree.len() == model.values().sum::<usize>()
}

#[quickcheck]
fn inorder_is_sorted(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let walked = keys(&tree);

    let mut sorted = xs;
    sorted.sort_unstable();
    walked.windows(2).all(|pair| pair[0] <= pair[1]) && walked == sorted
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();

    xs.iter()
        .all(|x| tree.search(x).map(|n| *n.key()) == Some(*x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let before = tree.inorder();

    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.search(x).is_none()) && tree.inorder() == before
}

#[quickcheck]
fn insert_then_delete_round_trip(xs: Vec<i8>, k: i8) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().filter(|x| *x != k).collect();

    tree.insert(k);
    let found = tree.search(&k).map(|n| *n.key()) == Some(k);
    let deleted = tree.delete(&k);

    found && deleted && tree.search(&k).is_none() && tree.validate().is_ok()
}

#[quickcheck]
fn deleting_absent_key_changes_nothing(xs: Vec<i8>, k: i8) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().filter(|x| *x != k).collect();
    let before = tree.inorder();

    !tree.delete(&k) && tree.inorder() == before && tree.len() == before.len()
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while tree.delete(delete) {}
        if tree.validate().is_err() {
            return false;
        }
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    deletes.iter().all(|x| tree.search(x).is_none())
        && still_present.iter().all(|x| tree.search(x).is_some())
        && tree.len() == still_present.len()
}

#[quickcheck]
fn height_is_logarithmic(xs: Vec<u16>) -> bool {
    fn height(node: Option<redblack::NodeRef<'_, u16>>) -> usize {
        node.map_or(0, |n| 1 + height(n.left()).max(height(n.right())))
    }

    let tree: Tree<u16> = xs.iter().copied().collect();
    let n = tree.len() as f64;

    (height(tree.root()) as f64) <= 2.0 * (n + 1.0).log2() + f64::EPSILON
}
