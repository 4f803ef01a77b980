//! A diagnostic, pre-order rendering of a [`Tree`]'s shape.
//!
//! Every node becomes one line of the form `<indent> [<side>]- <key>` where `<side>` is `+` for
//! the node the dump started at, `L` for a left child and `R` for a right child. Each level down
//! adds [`INDENT_WIDTH`] spaces of indentation.
//!
//! # Examples
//!
//! ```
//! use linked_bst::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [5, 3, 8, 4] {
//!     tree.insert(key);
//! }
//!
//! let lines: Vec<_> = tree.dump().map(|line| line.to_string()).collect();
//! assert_eq!(lines, [" [+]- 5", "    [L]- 3", "       [R]- 4", "    [R]- 8"]);
//! ```

use std::fmt;
use std::iter::FusedIterator;

use crate::error::Error;
use crate::tree::{NodeId, NodeRef, Side, Tree};

/// How many spaces each level of depth adds to a dumped line.
pub const INDENT_WIDTH: usize = 3;

impl<T> Tree<T> {
    /// Dumps the whole tree, starting at the root.
    pub fn dump(&self) -> Dump<'_, T> {
        Dump::new(self.root().and_then(|root| self.get(root)), "", None)
    }

    /// Dumps the subtree rooted at `start`. Every line is prefixed with `indent` and the first
    /// line is marked with `side`.
    pub fn dump_from(
        &self,
        start: NodeId,
        indent: &str,
        side: Option<Side>,
    ) -> Result<Dump<'_, T>, Error> {
        let start = self.get(start).ok_or(Error::UnknownNode(start))?;
        Ok(Dump::new(Some(start), indent, side))
    }
}

/// Writes one dump line per node, separated by newlines.
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.dump().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

struct Frame<'a, T> {
    node: NodeRef<'a, T>,
    depth: usize,
    side: Option<Side>,
}

/// Lazy pre-order walk over a tree: a node, then its left subtree, then its right subtree.
///
/// Created by [`Tree::dump`] and [`Tree::dump_from`].
pub struct Dump<'a, T> {
    indent: String,
    stack: Vec<Frame<'a, T>>,
}

impl<'a, T> Dump<'a, T> {
    fn new(start: Option<NodeRef<'a, T>>, indent: &str, side: Option<Side>) -> Self {
        let stack = start
            .map(|node| Frame {
                node,
                depth: 0,
                side,
            })
            .into_iter()
            .collect();

        Self {
            indent: indent.to_owned(),
            stack,
        }
    }
}

impl<'a, T> Iterator for Dump<'a, T> {
    type Item = DumpLine<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let Frame { node, depth, side } = self.stack.pop()?;

        // Right goes on the stack first so the whole left subtree comes out before it.
        let children = [(node.right(), Side::Right), (node.left(), Side::Left)];
        for (child, child_side) in children.iter().copied() {
            if let Some(child) = child {
                self.stack.push(Frame {
                    node: child,
                    depth: depth + 1,
                    side: Some(child_side),
                });
            }
        }

        Some(DumpLine {
            indent: format!("{}{}", self.indent, " ".repeat(depth * INDENT_WIDTH)),
            depth,
            side,
            key: node.key(),
        })
    }
}

impl<'a, T> FusedIterator for Dump<'a, T> {}

/// One node of a [`Dump`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpLine<'a, T> {
    indent: String,
    depth: usize,
    side: Option<Side>,
    key: &'a T,
}

impl<'a, T> DumpLine<'a, T> {
    /// The dumped node's key.
    pub fn key(&self) -> &'a T {
        self.key
    }

    /// How many levels below the start of the dump the node is.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The side the node was dumped as. `None` for the first line.
    pub fn side(&self) -> Option<Side> {
        self.side
    }
}

impl<'a, T> fmt::Display for DumpLine<'a, T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.side {
            None => '+',
            Some(Side::Left) => 'L',
            Some(Side::Right) => 'R',
        };
        write!(f, "{} [{}]- {}", self.indent, marker, self.key)
    }
}
