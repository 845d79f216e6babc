//! In-order traversal of an expression tree: left subtree, then the node, then the right subtree.
//!
//! The walk keeps its own stack instead of recursing, so very deep trees (long chains of
//! right-grouped operators) don't exhaust the call stack.
use crate::node::Node;
use std::io;
use std::iter::FusedIterator;

/// Iterator over the characters of a tree, in order.
#[derive(Debug, Clone)]
pub struct InOrder<'t> {
    stack: Vec<Step<'t>>,
}

#[derive(Debug, Clone, Copy)]
enum Step<'t> {
    Visit(&'t Node),
    Emit(char),
}

impl<'t> InOrder<'t> {
    pub fn new(root: &'t Node) -> InOrder<'t> {
        InOrder {
            stack: vec![Step::Visit(root)],
        }
    }
}

impl<'t> Iterator for InOrder<'t> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            match self.stack.pop()? {
                Step::Emit(ch) => return Some(ch),
                Step::Visit(Node::Leaf(digit)) => return Some(*digit),
                Step::Visit(Node::Binary { op, left, right }) => {
                    self.stack.push(Step::Visit(right));
                    self.stack.push(Step::Emit(op.as_char()));
                    self.stack.push(Step::Visit(left));
                }
            }
        }
    }
}

impl<'t> FusedIterator for InOrder<'t> {}

/// The in-order character sequence of the tree, as a string.
pub fn render(root: &Node) -> String {
    InOrder::new(root).collect()
}

/// Write the in-order character sequence of the tree, followed by a newline.
pub fn print_in_order<W: io::Write>(root: &Node, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", render(root))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::Operator::*;

    fn render_recursive(node: &Node, out: &mut String) {
        if let Some(left) = node.left() {
            render_recursive(left, out);
        }
        out.push(node.symbol());
        if let Some(right) = node.right() {
            render_recursive(right, out);
        }
    }

    fn sample_trees() -> Vec<Node> {
        let leaf = Node::leaf;
        vec![
            leaf('5'),
            Node::binary(Plus, leaf('1'), leaf('2')),
            Node::binary(Plus, leaf('1'), Node::binary(Plus, leaf('2'), leaf('3'))),
            Node::binary(
                Minus,
                Node::binary(Times, leaf('1'), leaf('2')),
                Node::binary(Divide, leaf('3'), Node::binary(Times, leaf('4'), leaf('5'))),
            ),
        ]
    }

    #[test]
    fn test_render() {
        let rendered = sample_trees().iter().map(render).collect::<Vec<_>>();
        assert_eq!(rendered, ["5", "1+2", "1+2+3", "1*2-3/4*5"]);
    }

    #[test]
    fn test_iterative_matches_recursive() {
        for tree in sample_trees() {
            let mut expected = String::new();
            render_recursive(&tree, &mut expected);
            assert_eq!(render(&tree), expected);
        }
    }

    #[test]
    fn test_print_in_order() {
        let tree = Node::binary(Divide, Node::leaf('8'), Node::leaf('4'));
        let mut out = Vec::new();
        print_in_order(&tree, &mut out).unwrap();
        assert_eq!(out, b"8/4\n");
    }

    #[test]
    fn test_deep_tree() {
        let mut tree = Node::leaf('0');
        for _ in 0..1_000 {
            tree = Node::binary(Plus, Node::leaf('1'), tree);
        }
        let rendered = render(&tree);
        assert_eq!(rendered.len(), 2_001);
        assert!(rendered.starts_with("1+1+"));
        assert!(rendered.ends_with("+0"));
    }
}
