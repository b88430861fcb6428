use super::{ScopeTree, ThrownFault};

fn names(tree: &ScopeTree, id: usize) -> Vec<&str> {
    tree.thrown(id).keys().map(String::as_str).collect()
}

#[test]
fn parent_links() {
    let mut tree = ScopeTree::new();
    let root = tree.add_root();
    let child = tree.add_child(root);

    assert_eq!(tree.parent(root), None);
    assert_eq!(tree.parent(child), Some(root));
}

#[test]
fn first_throw_wins() {
    let mut tree = ScopeTree::new();
    let root = tree.add_root();
    tree.throw(root, ThrownFault::new("Bad", Some("a@P".into())));
    tree.throw(root, ThrownFault::new("Bad", None));

    assert_eq!(tree.thrown(root)["Bad"].origin.as_deref(), Some("a@P"));
}

#[test]
fn uncaught_faults_reach_root() {
    let mut tree = ScopeTree::new();
    let root = tree.add_root();
    let middle = tree.add_child(root);
    let leaf = tree.add_child(middle);
    tree.throw(leaf, ThrownFault::new("Deep", None));
    tree.throw(middle, ThrownFault::new("Shallow", None));

    tree.resolve(root);
    assert_eq!(names(&tree, root), ["Shallow", "Deep"]);
}

#[test]
fn named_catch_filters() {
    let mut tree = ScopeTree::new();
    let root = tree.add_root();
    let child = tree.add_child(root);
    tree.throw(child, ThrownFault::new("A", None));
    tree.throw(child, ThrownFault::new("B", None));
    tree.catch(child, "A");

    tree.resolve(root);
    assert_eq!(names(&tree, root), ["B"]);
}

#[test]
fn default_catches_everything() {
    let mut tree = ScopeTree::new();
    let root = tree.add_root();
    let child = tree.add_child(root);
    tree.throw(child, ThrownFault::new("A", None));
    tree.throw(child, ThrownFault::new("B", None));
    tree.catch(child, "default");

    tree.resolve(root);
    assert!(tree.thrown(root).is_empty());
}

#[test]
fn root_catches_its_own_faults() {
    let mut tree = ScopeTree::new();
    let root = tree.add_root();
    tree.throw(root, ThrownFault::new("A", None));
    tree.catch(root, "A");

    tree.resolve(root);
    assert!(tree.thrown(root).is_empty());
}

#[test]
fn parent_entry_kept_on_merge() {
    let mut tree = ScopeTree::new();
    let root = tree.add_root();
    let child = tree.add_child(root);
    tree.throw(root, ThrownFault::new("A", None));
    tree.throw(child, ThrownFault::new("A", Some("op@P".into())));

    tree.resolve(root);
    assert_eq!(tree.thrown(root)["A"].origin, None);
}

#[test]
fn separate_roots_stay_apart() {
    let mut tree = ScopeTree::new();
    let first = tree.add_root();
    let second = tree.add_root();
    let child = tree.add_child(second);
    tree.throw(child, ThrownFault::new("A", None));

    tree.resolve(first);
    tree.resolve(second);
    assert!(tree.thrown(first).is_empty());
    assert_eq!(names(&tree, second), ["A"]);
}
