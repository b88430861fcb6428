//! Structural queries over type definitions.
//!
//! Links are followed through the type map, so both queries only give
//! meaningful answers once every declaration has been registered.

use std::collections::HashSet;

use jolie_core::{NativeType, TypeDefinition, TypeInlineDefinition, TypeMap};

/// Two definitions describe the same values: same native type, same
/// cardinality, same sub-tree keys with equivalent definitions.
///
/// Recursive types are compared coinductively: a pair of link targets
/// already under comparison is assumed equivalent.
pub fn is_equivalent<'t>(
    types: &'t TypeMap,
    a: &'t TypeDefinition,
    b: &'t TypeDefinition,
) -> bool {
    Equivalence {
        types,
        assumed: HashSet::new(),
    }
    .check(a, b)
}

struct Equivalence<'t> {
    types: &'t TypeMap,
    assumed: HashSet<(&'t str, &'t str)>,
}

impl<'t> Equivalence<'t> {
    fn check(&mut self, a: &'t TypeDefinition, b: &'t TypeDefinition) -> bool {
        a.cardinality() == b.cardinality() && self.check_body(a, b)
    }

    /// Compare ignoring the cardinality of `a` and `b` themselves.
    fn check_body(&mut self, a: &'t TypeDefinition, b: &'t TypeDefinition) -> bool {
        match (a, b) {
            (TypeDefinition::Link(la), TypeDefinition::Link(lb)) => {
                let key = (la.linked_type_name.as_str(), lb.linked_type_name.as_str());
                if key.0 == key.1 || !self.assumed.insert(key) {
                    return true;
                }
                match (self.resolve(key.0), self.resolve(key.1)) {
                    (Some(ta), Some(tb)) => self.check_body(ta, tb),
                    _ => false,
                }
            }
            (TypeDefinition::Link(_), other) => self
                .deref(a)
                .is_some_and(|target| self.check_body(target, other)),
            (other, TypeDefinition::Link(_)) => self
                .deref(b)
                .is_some_and(|target| self.check_body(other, target)),
            (TypeDefinition::Inline(ia), TypeDefinition::Inline(ib)) => self.check_inline(ia, ib),
            (TypeDefinition::Choice(ca), TypeDefinition::Choice(cb)) => {
                self.check(&ca.left, &cb.left) && self.check(&ca.right, &cb.right)
            }
            _ => false,
        }
    }

    fn check_inline(&mut self, a: &'t TypeInlineDefinition, b: &'t TypeInlineDefinition) -> bool {
        if a.native_type != b.native_type || a.untyped_sub_types != b.untyped_sub_types {
            return false;
        }
        if a.sub_types().count() != b.sub_types().count() {
            return false;
        }
        a.sub_types()
            .all(|(name, sa)| b.get_sub_type(name).is_some_and(|sb| self.check(sa, sb)))
    }

    fn resolve(&self, name: &str) -> Option<&'t TypeDefinition> {
        self.types.get(name)
    }

    /// Follow a chain of links to the first non-link definition.
    fn deref(&self, mut def: &'t TypeDefinition) -> Option<&'t TypeDefinition> {
        let mut seen = HashSet::new();
        while let TypeDefinition::Link(link) = def {
            if !seen.insert(link.linked_type_name.as_str()) {
                return None;
            }
            def = self.resolve(&link.linked_type_name)?;
        }
        Some(def)
    }
}

/// The definition describes a node at `keys` (relative to its root) that can
/// carry a value: every key is a declared sub-type (or the sub-tree is
/// untyped) and the last node is not `void`.
pub fn contains_path<'t>(types: &'t TypeMap, def: &'t TypeDefinition, keys: &[&str]) -> bool {
    contains_path_inner(types, def, keys, &mut HashSet::new())
}

fn contains_path_inner<'t>(
    types: &'t TypeMap,
    def: &'t TypeDefinition,
    keys: &[&str],
    followed: &mut HashSet<&'t str>,
) -> bool {
    match def {
        TypeDefinition::Link(link) => {
            // A cycle of links that consumes no key never reaches a node
            if !followed.insert(link.linked_type_name.as_str()) {
                return false;
            }
            types
                .get(&link.linked_type_name)
                .is_some_and(|target| contains_path_inner(types, target, keys, followed))
        }
        TypeDefinition::Choice(choice) => {
            let mut left_followed = followed.clone();
            contains_path_inner(types, &choice.left, keys, &mut left_followed)
                || contains_path_inner(types, &choice.right, keys, followed)
        }
        TypeDefinition::Inline(inline) => match keys.split_first() {
            None => inline.native_type != NativeType::Void,
            Some(_) if inline.untyped_sub_types => true,
            Some((first, rest)) => inline.get_sub_type(first).is_some_and(|sub| {
                contains_path_inner(types, sub, rest, &mut HashSet::new())
            }),
        },
    }
}
