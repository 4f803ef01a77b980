use linked_bst::{Error, NodeId, NodeRef, Side, Tree};
use quickcheck_macros::quickcheck;

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops<K>(ops: &[Op<K>], tree: &mut Tree<K>, set: &mut BTreeSet<K>)
where
    K: Ord + Clone + std::fmt::Debug,
{
    let mut handles: Vec<NodeId> = Vec::new();
    for op in ops {
        match op {
            Op::Insert(k) => {
                handles.push(tree.insert(k.clone()));
                set.insert(k.clone());
            }
            Op::Remove(k) => {
                assert_eq!(tree.remove(k), set.take(k));
            }
            Op::RemoveNode(i) if !handles.is_empty() => {
                let id = handles[i % handles.len()];
                let key = tree.get(id).map(|node| node.key().clone());
                let removed = tree.remove_node(id);
                assert_eq!(removed, key);
                if let Some(key) = removed {
                    set.remove(&key);
                }
            }
            Op::RemoveNode(_) => {}
            Op::Dump => assert_eq!(tree.dump().count(), set.len()),
        }
        assert_links(tree);
    }
}

fn in_order<K: Clone>(tree: &Tree<K>) -> Vec<K> {
    fn visit<K: Clone>(node: Option<NodeRef<'_, K>>, out: &mut Vec<K>) {
        if let Some(node) = node {
            visit(node.left(), out);
            out.push(node.key().clone());
            visit(node.right(), out);
        }
    }

    let mut out = Vec::new();
    visit(tree.root().and_then(|root| tree.get(root)), &mut out);
    out
}

/// Every child points back at its parent and reports the right side.
fn assert_links<K>(tree: &Tree<K>) {
    let mut stack: Vec<_> = tree.root().and_then(|root| tree.get(root)).into_iter().collect();
    if let Some(root) = stack.first() {
        assert!(root.parent().is_none());
        assert_eq!(root.side(), None);
    }
    while let Some(node) = stack.pop() {
        for (child, side) in [(node.left(), Side::Left), (node.right(), Side::Right)] {
            if let Some(child) = child {
                assert_eq!(child.parent().map(|p| p.id()), Some(node.id()));
                assert_eq!(child.side(), Some(side));
                stack.push(child);
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.len() == set.len()
        && in_order(&tree) == set.iter().copied().collect::<Vec<_>>()
        && set.iter().all(|key| tree.contains(key))
}

#[quickcheck]
fn in_order_is_sorted(xs: Vec<i16>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    let keys = in_order(&tree);
    keys.windows(2).all(|pair| pair[0] < pair[1])
}

#[quickcheck]
fn insert_then_find(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    xs.iter().all(|x| {
        let id = tree.insert(*x);
        tree.find(x) == Ok(Some(id))
    })
}

#[quickcheck]
fn duplicate_insert_returns_original(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    let first: Vec<_> = xs.iter().map(|x| tree.insert(*x)).collect();
    let len = tree.len();
    let second: Vec<_> = xs.iter().map(|x| tree.insert(*x)).collect();

    first == second && tree.len() == len && len == xs.iter().collect::<HashSet<_>>().len()
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }
    for delete in &deletes {
        tree.remove(delete);
        assert_links(&tree);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    let gone = |x: &i8| matches!(tree.find(x), Ok(None) | Err(Error::EmptyTree));
    deletes.iter().all(gone) && still_present.iter().all(|x| tree.contains(x))
}

#[quickcheck]
fn dump_visits_every_node(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x);
    }

    let mut dumped: Vec<_> = tree.dump().map(|line| *line.key()).collect();
    dumped.sort_unstable();
    dumped == in_order(&tree)
}

#[test]
fn test_scenario_remove_right_child_with_two_children() {
    let mut tree = Tree::new();
    for key in [5, 3, 8, 1, 4, 7, 9] {
        tree.insert(key);
    }

    let root = tree.get(tree.root().unwrap()).unwrap();
    assert_eq!(root.key(), &5);
    let seven = tree.get(tree.find(&7).unwrap().unwrap()).unwrap();
    assert_eq!(seven.parent().map(|p| *p.key()), Some(8));

    tree.remove(&8);
    let seven = tree.get(tree.find(&7).unwrap().unwrap()).unwrap();
    assert_eq!(seven.parent().map(|p| *p.key()), Some(9));
    let nine = seven.parent().unwrap();
    assert_eq!(nine.parent().map(|p| *p.key()), Some(5));
    assert_eq!(nine.side(), Some(Side::Right));
    assert!(tree.find(&9).unwrap().is_some());
    assert_links(&tree);
}

#[test]
fn test_scenario_remove_single_root() {
    let mut tree = Tree::new();
    tree.insert(5);
    tree.remove(&5);

    assert!(tree.is_empty());
    assert_eq!(tree.find(&5), Err(Error::EmptyTree));
}

#[test]
fn test_scenario_remove_root_with_two_children() {
    let mut tree = Tree::new();
    for key in [5, 3, 8] {
        tree.insert(key);
    }
    let root = tree.root();
    tree.remove(&5);

    assert_eq!(tree.root(), root);
    let root = tree.get(tree.root().unwrap()).unwrap();
    assert_eq!(root.key(), &8);
    assert_eq!(root.left().map(|n| *n.key()), Some(3));
    assert!(root.right().is_none());
    assert_links(&tree);
}
