//! Structural properties of generated search trees

use rand::{SeedableRng, rngs::StdRng};
use treeseek::{SearchTree, types::constants};

#[test]
fn test_every_depth_yields_a_perfect_tree() {
    for depth in 0..=6 {
        let mut rng = StdRng::seed_from_u64(depth as u64);
        let tree = SearchTree::generate(depth, constants::ROOT_VALUE, &mut rng);

        assert_eq!(tree.len(), (1 << (depth + 1)) - 1);

        for id in tree.node_ids() {
            let node = tree.node(id);
            let node_depth = tree.node_depth(id);
            assert!(node_depth <= depth);

            if node_depth < depth {
                // Interior: exactly two children, both pointing back.
                let left = node.left().expect("interior node missing left child");
                let right = node.right().expect("interior node missing right child");
                assert_eq!(tree.node(left).parent(), Some(id));
                assert_eq!(tree.node(right).parent(), Some(id));
            } else {
                assert!(node.is_leaf());
            }
        }
    }
}

#[test]
fn test_leaf_count_matches_depth() {
    let mut rng = StdRng::seed_from_u64(5);
    let tree = SearchTree::generate(5, constants::ROOT_VALUE, &mut rng);
    let leaves = tree
        .node_ids()
        .filter(|&id| tree.node(id).is_leaf())
        .count();
    assert_eq!(leaves, 1 << 5);
}

#[test]
fn test_root_has_no_parent_and_fixed_value() {
    let mut rng = StdRng::seed_from_u64(8);
    let tree = SearchTree::generate(3, constants::ROOT_VALUE, &mut rng);
    let root = tree.node(tree.root());
    assert_eq!(root.parent(), None);
    assert_eq!(root.value(), constants::ROOT_VALUE);
}

#[test]
fn test_same_seed_same_tree() {
    let mut rng_a = StdRng::seed_from_u64(123);
    let mut rng_b = StdRng::seed_from_u64(123);
    let a = SearchTree::generate(4, constants::ROOT_VALUE, &mut rng_a);
    let b = SearchTree::generate(4, constants::ROOT_VALUE, &mut rng_b);
    assert_eq!(a, b);
}

#[test]
fn test_best_node_is_global_maximum() {
    let mut rng = StdRng::seed_from_u64(77);
    let tree = SearchTree::generate(5, constants::ROOT_VALUE, &mut rng);
    let best = tree.node(tree.best_node()).value();
    for id in tree.node_ids() {
        assert!(tree.node(id).value() <= best);
    }
}
