//! The normalization engine
//!
//! A single post-order pass over the tree. Children are normalized before
//! their parent's rules run, so structural simplifications compose: a child
//! that collapses to a single grandchild is already collapsed by the time
//! the parent counts its children.
//!
//! Each node normalizes to zero, one, or several replacement nodes, which
//! the parent splices into its child sequence. Rules per element, in order:
//!
//! 1. `annotation` is detached entirely (no descent into it)
//! 2. children are normalized recursively
//! 3. adjacent `mi` children are merged (non-positional parents only)
//! 4. a single-child `mrow` or `semantics` is replaced by its child
//! 5. an empty element outside the always-empty set is detached, unless
//!    its parent is positional
//! 6. an `mtr` of empty cells is detached
//! 7. an `mtable`'s fully-empty columns are pruned
//! 8. a 1x1 `mtable` is replaced by its cell's contents
//! 9. positional arity is validated
//!
//! The pass is idempotent: normalizing already-normalized output is a
//! no-op.

use crate::mathml::ast::{Element, Node, Tag};
use crate::mathml::chars::normalize_characters;
use crate::mathml::error::NormalizeError;

/// Normalize a tree, returning the node that occupies the root position.
///
/// The root itself may be unwrapped (a 1x1 table at the root splices its
/// cell contents up); when that leaves several nodes they are grouped in an
/// `mrow` so the single-root contract holds. A tree that normalizes to
/// nothing at all is an error.
pub fn normalize(root: Node) -> Result<Node, NormalizeError> {
    let mut out = Vec::new();
    normalize_into(root, None, &mut out)?;
    if out.is_empty() {
        return Err(NormalizeError::EmptyDocument);
    }
    if out.len() == 1 {
        return Ok(out.remove(0));
    }
    // A root-level splice produced siblings with no parent to receive
    // them; group them and normalize the group so the wrapper obeys the
    // same rules (it may itself merge and collapse).
    normalize(Node::Element(Element::with_children(Tag::Mrow, out)))
}

/// Normalize one node, pushing its replacement nodes onto `out`.
fn normalize_into(
    node: Node,
    parent: Option<&Tag>,
    out: &mut Vec<Node>,
) -> Result<(), NormalizeError> {
    match node {
        Node::Text(content) => {
            let content = normalize_characters(&content);
            // The leaf persists even when emptied; an empty leaf still
            // counts as a child for child-count-sensitive rules.
            out.push(Node::Text(content.trim().to_string()));
            Ok(())
        }
        Node::Element(el) => normalize_element(el, parent, out),
    }
}

fn normalize_element(
    mut el: Element,
    parent: Option<&Tag>,
    out: &mut Vec<Node>,
) -> Result<(), NormalizeError> {
    // Annotations are metadata, never rendered content.
    if el.tag == Tag::Annotation {
        return Ok(());
    }

    // Post-order: children first, spliced as they normalize.
    let children = std::mem::take(&mut el.children);
    let mut normalized = Vec::with_capacity(children.len());
    for child in children {
        normalize_into(child, Some(&el.tag), &mut normalized)?;
    }
    el.children = normalized;

    merge_adjacent_identifiers(&mut el);

    // A grouping node wrapping exactly one thing is redundant. The same
    // holds for a semantics wrapper once its annotations are gone. This
    // check runs after the merge so that a wrapper whose children merged
    // into one is unwrapped in the same pass.
    if matches!(el.tag, Tag::Mrow | Tag::Semantics) && el.children.len() == 1 {
        out.push(el.children.remove(0));
        return Ok(());
    }

    // Empty non-meaningful nodes add no information, except under a
    // positional parent where emptiness marks a position.
    if el.children.is_empty()
        && !el.tag.may_be_empty()
        && !parent.is_some_and(Tag::is_positional)
    {
        return Ok(());
    }

    if el.tag == Tag::Mtr {
        validate_children(&el, Tag::Mtd)?;
        if el.children.iter().all(is_empty_cell) {
            return Ok(());
        }
    }

    if el.tag == Tag::Mtable {
        validate_children(&el, Tag::Mtr)?;
        prune_empty_columns(&mut el);
        if let Some(contents) = unwrap_single_cell(&mut el) {
            out.extend(contents);
            return Ok(());
        }
    }

    if let Some(expected) = el.tag.required_arity() {
        if el.children.len() != expected {
            return Err(NormalizeError::ArityViolation {
                tag: el.tag,
                expected,
                actual: el.children.len(),
            });
        }
    }

    out.push(Node::Element(el));
    Ok(())
}

/// Merge runs of adjacent single-text `mi` children into one identifier.
///
/// Upstream tokenization splits multi-character identifiers into adjacent
/// single-character `mi` nodes; rejoining them is only safe where child
/// position carries no meaning, so positional parents are skipped. The
/// first node of a run (and its attributes) survives; the rest are
/// detached after their text is appended.
fn merge_adjacent_identifiers(el: &mut Element) {
    if el.tag.is_positional() {
        return;
    }
    let mut merged: Vec<Node> = Vec::with_capacity(el.children.len());
    for child in std::mem::take(&mut el.children) {
        if let Some(text) = mergeable_identifier_text(merged.last(), &child) {
            if let Some(Node::Element(prev)) = merged.last_mut() {
                if let Some(dst) = single_text_mut(prev) {
                    dst.push_str(&text);
                    continue;
                }
            }
        }
        merged.push(child);
    }
    el.children = merged;
}

/// If `last` and `child` are both `mi` elements holding a single text
/// leaf each, return the text to append to `last`.
fn mergeable_identifier_text(last: Option<&Node>, child: &Node) -> Option<String> {
    let prev = match last {
        Some(Node::Element(el)) if el.tag == Tag::Mi => el,
        _ => return None,
    };
    let cur = match child {
        Node::Element(el) if el.tag == Tag::Mi => el,
        _ => return None,
    };
    single_text(prev)?;
    single_text(cur).map(str::to_string)
}

fn single_text(el: &Element) -> Option<&str> {
    match el.children.as_slice() {
        [Node::Text(s)] => Some(s),
        _ => None,
    }
}

fn single_text_mut(el: &mut Element) -> Option<&mut String> {
    match el.children.as_mut_slice() {
        [Node::Text(s)] => Some(s),
        _ => None,
    }
}

fn is_empty_cell(node: &Node) -> bool {
    matches!(node, Node::Element(cell) if cell.tag == Tag::Mtd && cell.children.is_empty())
}

/// Require every child of a table-structure element to be an element of
/// the given tag. Anything else is upstream breakage we refuse to
/// normalize around.
fn validate_children(el: &Element, expected: Tag) -> Result<(), NormalizeError> {
    for child in &el.children {
        match child {
            Node::Element(inner) if inner.tag == expected => {}
            other => {
                return Err(NormalizeError::Malformed {
                    parent: el.tag.clone(),
                    expected,
                    found: other.label(),
                })
            }
        }
    }
    Ok(())
}

/// Detach every cell that sits in a fully-empty column of `table`.
///
/// The column count is the maximum row width; rows need not be uniform.
/// A row shorter than the maximum counts as empty at its missing trailing
/// positions for the emptiness test only; no placeholder cells are ever
/// created. Callers have already validated that rows are `mtr` holding
/// only `mtd`.
fn prune_empty_columns(table: &mut Element) {
    let n_columns = table
        .children
        .iter()
        .filter_map(Node::as_element)
        .map(|row| row.children.len())
        .max()
        .unwrap_or(0);
    if n_columns == 0 {
        return;
    }

    let mut is_empty = vec![true; n_columns];
    for row in table.children.iter().filter_map(Node::as_element) {
        for (j, cell) in row.children.iter().enumerate() {
            is_empty[j] = is_empty[j] && is_empty_cell(cell);
        }
    }

    for row in &mut table.children {
        if let Node::Element(row) = row {
            let mut j = 0;
            row.children.retain(|_| {
                let keep = !is_empty[j];
                j += 1;
                keep
            });
        }
    }
}

/// If `table` is a 1x1 `mtable`, take the single cell's contents.
fn unwrap_single_cell(table: &mut Element) -> Option<Vec<Node>> {
    let fits = match table.children.as_slice() {
        [Node::Element(row)] if row.tag == Tag::Mtr => match row.children.as_slice() {
            [Node::Element(cell)] => cell.tag == Tag::Mtd,
            _ => false,
        },
        _ => false,
    };
    if !fits {
        return None;
    }
    match table.children.pop() {
        Some(Node::Element(mut row)) => match row.children.pop() {
            Some(Node::Element(cell)) => Some(cell.children),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mi(text: &str) -> Node {
        Node::element(Tag::Mi, vec![Node::text(text)])
    }

    #[test]
    fn text_leaf_is_trimmed_and_substituted() {
        let result = normalize(Node::text("  \u{2212}3 ")).unwrap();
        assert_eq!(result, Node::text("-3"));
    }

    #[test]
    fn function_application_leaf_is_emptied_not_removed() {
        let tree = Node::element(
            Tag::Mrow,
            vec![mi("f"), Node::element(Tag::Mo, vec![Node::text("\u{2061}")]), mi("x")],
        );
        let result = normalize(tree).unwrap();
        let el = result.as_element().unwrap();
        assert_eq!(el.tag, Tag::Mrow);
        assert_eq!(el.children.len(), 3);
        assert_eq!(
            el.children[1],
            Node::element(Tag::Mo, vec![Node::text("")])
        );
    }

    #[test]
    fn merge_keeps_first_identifier_attributes() {
        let mut first = Element::with_children(Tag::Mi, vec![Node::text("x")]);
        first.attrs.push(("mathvariant".into(), "bold".into()));
        let tree = Node::element(Tag::Mrow, vec![Node::Element(first), mi("y")]);
        let result = normalize(tree).unwrap();
        let el = result.as_element().unwrap();
        assert_eq!(el.tag, Tag::Mi);
        assert_eq!(el.attrs, vec![("mathvariant".to_string(), "bold".to_string())]);
        assert_eq!(el.children, vec![Node::text("xy")]);
    }

    #[test]
    fn root_level_splice_is_grouped_in_an_mrow() {
        // a 1x1 table at the root with two nodes in its cell
        let tree = Node::element(
            Tag::Mtable,
            vec![Node::element(
                Tag::Mtr,
                vec![Node::element(
                    Tag::Mtd,
                    vec![Node::element(Tag::Mo, vec![Node::text("-")]), mi("a")],
                )],
            )],
        );
        let result = normalize(tree).unwrap();
        let el = result.as_element().unwrap();
        assert_eq!(el.tag, Tag::Mrow);
        assert_eq!(el.children.len(), 2);
    }

    #[test]
    fn empty_root_is_an_error() {
        let tree = Node::element(Tag::Math, vec![]);
        assert_eq!(normalize(tree), Err(NormalizeError::EmptyDocument));
    }

    #[test]
    fn malformed_table_child_is_fatal() {
        let tree = Node::element(Tag::Mtable, vec![mi("x")]);
        assert_eq!(
            normalize(tree),
            Err(NormalizeError::Malformed {
                parent: Tag::Mtable,
                expected: Tag::Mtr,
                found: "<mi>".to_string(),
            })
        );
    }

    #[test]
    fn malformed_row_child_is_fatal() {
        let tree = Node::element(
            Tag::Mtable,
            vec![Node::element(Tag::Mtr, vec![mi("x")])],
        );
        assert_eq!(
            normalize(tree),
            Err(NormalizeError::Malformed {
                parent: Tag::Mtr,
                expected: Tag::Mtd,
                found: "<mi>".to_string(),
            })
        );
    }
}
