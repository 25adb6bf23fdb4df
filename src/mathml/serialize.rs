//! Tree to XML conversion
//!
//! Compact and pretty writers over the tree model. Whether output is
//! compact or indented is purely a presentation choice; both forms carry
//! the same structure.

use crate::mathml::ast::{Element, Node};

/// Serialize a tree as compact XML.
pub fn to_xml(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Serialize a tree as indented XML, two spaces per level.
pub fn to_xml_pretty(node: &Node) -> String {
    let mut out = String::new();
    write_node_pretty(node, &mut out, 0);
    while out.ends_with('\n') {
        out.pop();
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => push_escaped_text(text, out),
        Node::Element(el) => {
            write_open_tag(el, out);
            if el.children.is_empty() {
                out.push_str("/>");
            } else {
                out.push('>');
                for child in &el.children {
                    write_node(child, out);
                }
                write_close_tag(el, out);
            }
        }
    }
}

fn write_node_pretty(node: &Node, out: &mut String, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Text(text) => {
            if !text.is_empty() {
                out.push_str(&indent);
                push_escaped_text(text, out);
                out.push('\n');
            }
        }
        Node::Element(el) => {
            out.push_str(&indent);
            write_open_tag(el, out);
            if el.children.is_empty() {
                out.push_str("/>\n");
            } else if el.children.iter().all(|c| matches!(c, Node::Text(_))) {
                // token elements keep their text inline
                out.push('>');
                for child in &el.children {
                    if let Node::Text(text) = child {
                        push_escaped_text(text, out);
                    }
                }
                write_close_tag(el, out);
                out.push('\n');
            } else {
                out.push_str(">\n");
                for child in &el.children {
                    write_node_pretty(child, out, depth + 1);
                }
                out.push_str(&indent);
                write_close_tag(el, out);
                out.push('\n');
            }
        }
    }
}

fn write_open_tag(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.tag.name());
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        push_escaped_attr(value, out);
        out.push('"');
    }
}

fn write_close_tag(el: &Element, out: &mut String) {
    out.push_str("</");
    out.push_str(el.tag.name());
    out.push('>');
}

fn push_escaped_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
}

fn push_escaped_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mathml::ast::Tag;

    fn sample() -> Node {
        Node::element(
            Tag::Math,
            vec![Node::element(
                Tag::Mfrac,
                vec![
                    Node::element(Tag::Mi, vec![Node::text("x")]),
                    Node::element(Tag::Mn, vec![Node::text("2")]),
                ],
            )],
        )
    }

    #[test]
    fn compact_output() {
        assert_eq!(
            to_xml(&sample()),
            "<math><mfrac><mi>x</mi><mn>2</mn></mfrac></math>"
        );
    }

    #[test]
    fn pretty_output_indents_structure_and_inlines_text() {
        assert_eq!(
            to_xml_pretty(&sample()),
            "<math>\n  <mfrac>\n    <mi>x</mi>\n    <mn>2</mn>\n  </mfrac>\n</math>"
        );
    }

    #[test]
    fn empty_elements_self_close() {
        let tree = Node::element(
            Tag::Msub,
            vec![
                Node::element(Tag::Mi, vec![Node::text("x")]),
                Node::element(Tag::Mrow, vec![]),
            ],
        );
        assert_eq!(to_xml(&tree), "<msub><mi>x</mi><mrow/></msub>");
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let mut el = Element::with_children(Tag::Mo, vec![Node::text("<&>")]);
        el.attrs.push(("form".into(), "a\"b".into()));
        assert_eq!(
            to_xml(&Node::Element(el)),
            "<mo form=\"a&quot;b\">&lt;&amp;&gt;</mo>"
        );
    }

    #[test]
    fn round_trips_through_the_parser() {
        let tree = sample();
        let reparsed = crate::mathml::parse::parse_mathml(&to_xml(&tree)).unwrap();
        assert_eq!(reparsed, tree);
    }
}
