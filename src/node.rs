use crate::op::Operator;
use std::fmt;
use std::mem;

/// One node of an expression tree. A node exclusively owns its children, and is never modified
/// after it is built.
///
/// Chains of equal-precedence operators nest one level per operator, so trees can be as deep as
/// the input is long. Cloning, comparing, displaying and dropping all walk the tree with an
/// explicit stack rather than recursing. (`Debug` is derived, and does recurse.)
#[derive(Debug)]
pub enum Node {
    /// A single-digit operand.
    Leaf(char),
    Binary {
        op: Operator,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn leaf(digit: char) -> Node {
        Node::Leaf(digit)
    }

    pub fn binary(op: Operator, left: Node, right: Node) -> Node {
        Node::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// The character at this node: the digit of a leaf, or the operator of a binary node.
    pub fn symbol(&self) -> char {
        match self {
            Node::Leaf(digit) => *digit,
            Node::Binary { op, .. } => op.as_char(),
        }
    }

    /// The operator at this node, if it isn't a leaf.
    pub fn op(&self) -> Option<Operator> {
        match self {
            Node::Leaf(_) => None,
            Node::Binary { op, .. } => Some(*op),
        }
    }

    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Leaf(_) => None,
            Node::Binary { left, .. } => Some(left),
        }
    }

    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Leaf(_) => None,
            Node::Binary { right, .. } => Some(right),
        }
    }

    /// The total number of nodes in this tree.
    pub fn len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            if let Node::Binary { left, right, .. } = node {
                stack.push(left);
                stack.push(right);
            }
        }
        count
    }

    /// The number of nodes on the longest path from this node down to a leaf. A leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Node::Binary { left, right, .. } = node {
                stack.push((left, depth + 1));
                stack.push((right, depth + 1));
            }
        }
        max_depth
    }
}

impl fmt::Display for Node {
    /// Display this tree as an s-expression, like `(+ 1 (* 2 3))`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        enum Piece<'n> {
            Tree(&'n Node),
            Text(&'static str),
        }

        let mut stack = vec![Piece::Tree(self)];
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Tree(Node::Leaf(digit)) => write!(f, "{}", digit)?,
                Piece::Tree(Node::Binary { op, left, right }) => {
                    write!(f, "({} ", op)?;
                    stack.push(Piece::Text(")"));
                    stack.push(Piece::Tree(right));
                    stack.push(Piece::Text(" "));
                    stack.push(Piece::Tree(left));
                }
            }
        }
        Ok(())
    }
}

impl Clone for Node {
    fn clone(&self) -> Node {
        enum Step<'n> {
            Visit(&'n Node),
            Build(Operator),
        }

        let mut stack = vec![Step::Visit(self)];
        let mut built = Vec::<Node>::new();
        while let Some(step) = stack.pop() {
            match step {
                Step::Visit(Node::Leaf(digit)) => built.push(Node::Leaf(*digit)),
                Step::Visit(Node::Binary { op, left, right }) => {
                    stack.push(Step::Build(*op));
                    stack.push(Step::Visit(right));
                    stack.push(Step::Visit(left));
                }
                Step::Build(op) => {
                    // Both children were built just before this step.
                    if let (Some(right), Some(left)) = (built.pop(), built.pop()) {
                        built.push(Node::binary(op, left, right));
                    }
                }
            }
        }
        // `built` ends with exactly the clone of `self`.
        built.pop().unwrap_or(Node::Leaf('0'))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        let mut stack = vec![(self, other)];
        while let Some(pair) = stack.pop() {
            match pair {
                (Node::Leaf(a), Node::Leaf(b)) if a == b => (),
                (
                    Node::Binary {
                        op: op_a,
                        left: left_a,
                        right: right_a,
                    },
                    Node::Binary {
                        op: op_b,
                        left: left_b,
                        right: right_b,
                    },
                ) if op_a == op_b => {
                    stack.push((&**right_a, &**right_b));
                    stack.push((&**left_a, &**left_b));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Node {}

impl Drop for Node {
    fn drop(&mut self) {
        // Detach binary children before they're freed, so that freeing never nests.
        fn detach(node: &mut Node, stack: &mut Vec<Node>) {
            if let Node::Binary { left, right, .. } = node {
                for child in [left, right] {
                    if !child.is_leaf() {
                        stack.push(mem::replace(&mut **child, Node::Leaf('0')));
                    }
                }
            }
        }

        let mut stack = Vec::new();
        detach(self, &mut stack);
        while let Some(mut node) = stack.pop() {
            detach(&mut node, &mut stack);
        }
    }
}

#[test]
fn test_node_shape() {
    let tree = Node::binary(
        Operator::Plus,
        Node::leaf('1'),
        Node::binary(Operator::Times, Node::leaf('2'), Node::leaf('3')),
    );
    assert_eq!(format!("{}", tree), "(+ 1 (* 2 3))");
    assert_eq!(tree.symbol(), '+');
    assert_eq!(tree.op(), Some(Operator::Plus));
    assert_eq!(tree.len(), 5);
    assert_eq!(tree.depth(), 3);
    assert!(!tree.is_leaf());
    assert_eq!(tree.left(), Some(&Node::leaf('1')));
    assert_eq!(tree.right().and_then(Node::right), Some(&Node::leaf('3')));

    let leaf = Node::leaf('7');
    assert!(leaf.is_leaf());
    assert_eq!(leaf.op(), None);
    assert_eq!(leaf.left(), None);
    assert_eq!((leaf.len(), leaf.depth()), (1, 1));
}

#[test]
fn test_deep_tree_clone_eq_display_drop() {
    let mut tree = Node::leaf('0');
    for _ in 0..200_000 {
        tree = Node::binary(Operator::Minus, Node::leaf('1'), tree);
    }
    let copy = tree.clone();
    assert!(copy == tree);
    assert_eq!(copy.depth(), 200_001);
    let shown = tree.to_string();
    assert!(shown.starts_with("(- 1 (- 1 "));
    assert!(shown.ends_with(" 0))"));
    drop(copy);
    drop(tree);
}

#[test]
fn test_unequal_trees() {
    let a = Node::binary(Operator::Plus, Node::leaf('1'), Node::leaf('2'));
    let b = Node::binary(Operator::Plus, Node::leaf('1'), Node::leaf('3'));
    let c = Node::binary(Operator::Minus, Node::leaf('1'), Node::leaf('2'));
    assert!(a != b);
    assert!(a != c);
    assert!(a != Node::leaf('1'));
    assert_eq!(a.clone(), a);
}
