use super::node::CommandNode;
use std::fmt::Write as _;

/// Render the usage tree of `node`.
///
/// The first line is the node's full path; a leaf appends its options as
/// `name:TYPE`, a branch lists each sub-command on its own line, indented two
/// spaces per level.
///
/// ```text
/// mod
///   ban user:USER reason:STRING
///   warn user:USER
/// ```
pub fn usage(node: &CommandNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node, &node.qualified_name(), 0);
    out
}

fn write_node(out: &mut String, node: &CommandNode, label: &str, indent: usize) {
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&"  ".repeat(indent));
    out.push_str(label);
    for option in node.options() {
        let _ = write!(out, " {}:{}", option.name(), option.option_type());
    }
    for child in node.children() {
        write_node(out, child, child.name(), indent + 1);
    }
}
