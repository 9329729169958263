use super::node::CommandNode;

/// Why resolution stopped where it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// Reached a node without children.
    Leaf,
    /// The next token named no child of a branch. The token is left in
    /// `remaining`.
    Unmatched,
    /// Tokens ran out on a branch.
    Exhausted,
}

/// Outcome of walking a command tree.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'n, 't, T> {
    /// Deepest node reached.
    pub node: &'n CommandNode,
    /// Tokens not consumed as sub-command names.
    pub remaining: &'t [T],
    /// Why the walk stopped.
    pub halt: Halt,
}

impl<T> Resolution<'_, '_, T> {
    /// Whether the node reached can run.
    pub fn is_executable(&self) -> bool {
        self.node.executor().is_some()
    }
}

/// Walk from `root` through child names taken from the front of `tokens`.
///
/// The root's own name is not part of `tokens`. A branch that runs out of
/// tokens or meets an unknown name is a partial match; the caller decides
/// whether that is a usage error.
pub fn resolve<'n, 't, T: AsRef<str>>(
    root: &'n CommandNode,
    tokens: &'t [T],
) -> Resolution<'n, 't, T> {
    let mut node = root;
    let mut remaining = tokens;
    loop {
        if node.is_leaf() {
            return Resolution {
                node,
                remaining,
                halt: Halt::Leaf,
            };
        }
        let Some((next, rest)) = remaining.split_first() else {
            return Resolution {
                node,
                remaining,
                halt: Halt::Exhausted,
            };
        };
        match node.child(next.as_ref()) {
            Some(child) => {
                node = child;
                remaining = rest;
            }
            None => {
                return Resolution {
                    node,
                    remaining,
                    halt: Halt::Unmatched,
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandBuilder;
    use crate::router::Response;

    fn tree() -> CommandNode {
        CommandBuilder::message("root", "")
            .subcommand(
                CommandBuilder::new("a", "")
                    .subcommand(CommandBuilder::new("b", "").execute(|_| Response::text("b"))),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn halts_at_leaf_with_leftovers() {
        let root = tree();
        let r = resolve(&root, &["a", "b", "x"]);
        assert_eq!(r.node.name(), "b");
        assert_eq!(r.remaining, ["x"]);
        assert_eq!(r.halt, Halt::Leaf);
        assert!(r.is_executable());
    }

    #[test]
    fn unmatched_token_stops_on_branch() {
        let root = tree();
        let r = resolve(&root, &["a", "z"]);
        assert_eq!(r.node.name(), "a");
        assert_eq!(r.remaining, ["z"]);
        assert_eq!(r.halt, Halt::Unmatched);
        assert!(!r.is_executable());
    }

    #[test]
    fn exhausted_on_branch() {
        let root = tree();
        let r = resolve::<&str>(&root, &[]);
        assert_eq!(r.node.name(), "root");
        assert_eq!(r.halt, Halt::Exhausted);
    }
}
