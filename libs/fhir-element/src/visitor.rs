//! Generic tree traversal
//!
//! One traversal mechanism serves every downstream concern (equality,
//! hashing, encoders), so adding a field to a type means updating its
//! `fields()` enumeration and nothing else.
//!
//! Traversal order is deterministic: extensions first, then declared
//! fields in declaration order, list children in list order with 0-based
//! positions. Hashing and equality are only well-defined because of this.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::element::{Element, FieldValue, ScalarView};

/// Callbacks fired while walking a tree. All have no-op defaults; a
/// visitor implements only what it needs.
pub trait Visitor {
    /// Gate ahead of a node; returning false skips the node, its
    /// notifications and its whole subtree. Useful for visited-set
    /// guards even though the model itself is acyclic.
    fn pre_visit(&mut self, _node: &dyn Element) -> bool {
        true
    }

    /// Node entered, with its field name and list position if inside a
    /// list field.
    fn start(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Element) {}

    /// Gate over a node's children only; start/end still fire for the
    /// node itself.
    fn descend(&mut self, _name: &str, _node: &dyn Element) -> bool {
        true
    }

    /// Node left.
    fn end(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Element) {}

    /// Fired after `end`, once the subtree is fully processed.
    fn post_visit(&mut self, _node: &dyn Element) {}
}

/// Walk `node` and its subtree in declared field order. `name` is the
/// field name the root is reached under; for a tree root the type name
/// is the conventional choice.
pub fn walk(name: &str, node: &dyn Element, visitor: &mut dyn Visitor) {
    tracing::trace!(root = name, ty = node.type_name(), "walking element tree");
    walk_at(name, None, node, visitor);
}

fn walk_at(name: &str, index: Option<usize>, node: &dyn Element, visitor: &mut dyn Visitor) {
    if !visitor.pre_visit(node) {
        return;
    }
    visitor.start(name, index, node);
    if visitor.descend(name, node) {
        for (i, ext) in node.extensions().iter().enumerate() {
            walk_at("extension", Some(i), ext, visitor);
        }
        for field in node.fields() {
            match field.value {
                FieldValue::Absent => {}
                FieldValue::Element(child) => walk_at(field.name, None, child, visitor),
                FieldValue::Choice(choice) => {
                    walk_at(field.name, None, choice.as_element(), visitor)
                }
                FieldValue::List(items) => {
                    for (i, child) in items.into_iter().enumerate() {
                        walk_at(field.name, Some(i), child, visitor);
                    }
                }
            }
        }
    }
    visitor.end(name, index, node);
    visitor.post_visit(node);
}

/// Structural hash of a node, memoized in its hash cell.
///
/// Stable across calls and process runs: the hasher uses fixed keys and
/// traversal order is the declared field order. The memoization is a
/// lock-free compute-once slot; two readers racing both compute the same
/// value, so the duplicate write is benign.
pub fn tree_hash(node: &dyn Element) -> u64 {
    *node.core().hash_cell().get_or_init(|| {
        let mut hasher = TreeHasher::default();
        walk_at(node.type_name(), None, node, &mut hasher);
        hasher.state.finish()
    })
}

#[derive(Default)]
struct TreeHasher {
    state: DefaultHasher,
}

impl Visitor for TreeHasher {
    fn start(&mut self, name: &str, index: Option<usize>, node: &dyn Element) {
        name.hash(&mut self.state);
        index.hash(&mut self.state);
        node.type_name().hash(&mut self.state);
        node.element_id().hash(&mut self.state);
        match node.scalar() {
            Some(scalar) => {
                1u8.hash(&mut self.state);
                hash_scalar(&scalar, &mut self.state);
            }
            None => 0u8.hash(&mut self.state),
        }
    }

    fn end(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Element) {
        // Subtree delimiter, so sibling and child sequences cannot collide.
        0x1fu8.hash(&mut self.state);
    }
}

fn hash_scalar<H: Hasher>(scalar: &ScalarView<'_>, state: &mut H) {
    match scalar {
        ScalarView::Bool(v) => {
            0u8.hash(state);
            v.hash(state);
        }
        ScalarView::Int(v) => {
            1u8.hash(state);
            v.hash(state);
        }
        ScalarView::Str(v) => {
            2u8.hash(state);
            v.hash(state);
        }
        ScalarView::Decimal(v) => {
            // Normalized so 1.0 and 1.00 hash alike, matching equality.
            let n = v.normalize();
            3u8.hash(state);
            state.write_i128(n.mantissa());
            state.write_u32(n.scale());
        }
        ScalarView::Date(v) => {
            4u8.hash(state);
            v.hash(state);
        }
        ScalarView::DateTime(v) => {
            // The instant, matching chrono's instant-based equality.
            5u8.hash(state);
            state.write_i64(v.timestamp());
            state.write_u32(v.timestamp_subsec_nanos());
        }
        ScalarView::Time(v) => {
            6u8.hash(state);
            v.hash(state);
        }
    }
}

/// Structural equality over the same child enumeration [`walk`] uses:
/// type tag, element id, primitive payload, extensions and every declared
/// field in order, list lengths and positions included.
pub fn elements_equal(a: &dyn Element, b: &dyn Element) -> bool {
    if a.type_name() != b.type_name() || a.element_id() != b.element_id() {
        return false;
    }
    if a.scalar() != b.scalar() {
        return false;
    }
    let (a_ext, b_ext) = (a.extensions(), b.extensions());
    if a_ext.len() != b_ext.len() {
        return false;
    }
    if !a_ext
        .iter()
        .zip(b_ext)
        .all(|(x, y)| elements_equal(x, y))
    {
        return false;
    }
    let a_fields = a.fields();
    let b_fields = b.fields();
    if a_fields.len() != b_fields.len() {
        return false;
    }
    a_fields
        .iter()
        .zip(&b_fields)
        .all(|(x, y)| x.name == y.name && field_values_equal(&x.value, &y.value))
}

fn field_values_equal(a: &FieldValue<'_>, b: &FieldValue<'_>) -> bool {
    match (a, b) {
        (FieldValue::Absent, FieldValue::Absent) => true,
        (FieldValue::Element(x), FieldValue::Element(y)) => elements_equal(*x, *y),
        (FieldValue::Choice(x), FieldValue::Choice(y)) => {
            elements_equal(x.as_element(), y.as_element())
        }
        (FieldValue::List(x), FieldValue::List(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(p, q)| elements_equal(*p, *q))
        }
        _ => false,
    }
}

/// Implements `PartialEq`/`Eq` for model types by delegating to
/// [`elements_equal`].
#[macro_export]
macro_rules! element_eq {
    ($($t:ty),+ $(,)?) => {
        $(
            impl PartialEq for $t {
                fn eq(&self, other: &Self) -> bool {
                    $crate::visitor::elements_equal(self, other)
                }
            }

            impl Eq for $t {}
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{FhirBoolean, FhirString};

    #[test]
    fn hash_is_stable_across_calls() {
        let s = FhirString::new("stable");
        let first = tree_hash(&s);
        assert_eq!(first, tree_hash(&s));
        // A structurally identical but separately built tree agrees too.
        assert_eq!(first, tree_hash(&FhirString::new("stable")));
    }

    #[test]
    fn hash_differs_for_different_values() {
        assert_ne!(
            tree_hash(&FhirString::new("a")),
            tree_hash(&FhirString::new("b"))
        );
        assert_ne!(
            tree_hash(&FhirBoolean::new(true)),
            tree_hash(&FhirBoolean::new(false))
        );
    }

    #[test]
    fn pre_visit_gate_skips_subtree() {
        struct SkipAll {
            started: usize,
        }
        impl Visitor for SkipAll {
            fn pre_visit(&mut self, _node: &dyn Element) -> bool {
                false
            }
            fn start(&mut self, _name: &str, _index: Option<usize>, _node: &dyn Element) {
                self.started += 1;
            }
        }
        let mut v = SkipAll { started: 0 };
        walk("string", &FhirString::new("x"), &mut v);
        assert_eq!(v.started, 0);
    }
}
