use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable index of a node inside its [`Ast`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

/// Node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Root of a parsed program; children are the statements in source order
    Program,
    /// `int name (= expr)?;` - text is the variable name
    IntDeclaration,
    /// `name = expr;` - text is the variable name
    AssignmentStatement,
    /// `+` or `-` over two operands - text is the operator
    Additive,
    /// `*` or `/` over two operands - text is the operator
    Multiplicative,
    /// Base-10 integer literal - text is the digits
    IntLiteral,
    /// Variable reference - text is the name
    Identifier,
}

impl NodeKind {
    /// Whether a node of this kind may have `count` children
    pub fn accepts_child_count(&self, count: usize) -> bool {
        match self {
            NodeKind::Program => true,
            NodeKind::IntDeclaration => count <= 1,
            NodeKind::AssignmentStatement => count == 1,
            NodeKind::Additive | NodeKind::Multiplicative => count == 2,
            NodeKind::IntLiteral | NodeKind::Identifier => count == 0,
        }
    }

    /// Declarations and assignments
    pub fn is_statement(&self) -> bool {
        matches!(self, NodeKind::IntDeclaration | NodeKind::AssignmentStatement)
    }

    /// Anything that can appear as an operand or an expression statement
    pub fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeKind::Additive
                | NodeKind::Multiplicative
                | NodeKind::IntLiteral
                | NodeKind::Identifier
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NodeKind::Program => write!(f, "Program"),
            NodeKind::IntDeclaration => write!(f, "IntDeclaration"),
            NodeKind::AssignmentStatement => write!(f, "AssignmentStatement"),
            NodeKind::Additive => write!(f, "Additive"),
            NodeKind::Multiplicative => write!(f, "Multiplicative"),
            NodeKind::IntLiteral => write!(f, "IntLiteral"),
            NodeKind::Identifier => write!(f, "Identifier"),
        }
    }
}

/// A single tree node as stored in the arena
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    kind: NodeKind,
    text: String,
    /// Set once, when the node is attached
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena used while a tree is being built
///
/// Nodes are pushed bottom-up and linked with [`attach`](Self::attach).
/// [`truncate`](Self::truncate) drops everything pushed after a checkpoint,
/// so a rejected speculative parse leaves no trace.
#[derive(Debug, Clone, Default)]
pub struct AstBuilder {
    nodes: Vec<Node>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a detached node with no children
    pub fn push(&mut self, kind: NodeKind, text: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            text: text.into(),
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` to `parent`'s children and sets the back-reference
    ///
    /// `child` must have been pushed before `parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(child < parent, "child must be pushed before its parent");
        debug_assert!(
            self.nodes[child.0].parent.is_none(),
            "node {:?} attached twice",
            child
        );
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Builds a binary operator node over two existing operands
    pub fn binary(
        &mut self,
        kind: NodeKind,
        op: impl Into<String>,
        left: NodeId,
        right: NodeId,
    ) -> NodeId {
        let node = self.push(kind, op);
        self.attach(node, left);
        self.attach(node, right);
        node
    }

    /// Number of nodes pushed so far
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node pushed after the arena had `len` nodes
    ///
    /// Parents are always pushed after their children, so only the discarded
    /// tail can hold links into the kept nodes. Cost is linear in the number
    /// of discarded nodes.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.nodes.len() {
            return;
        }
        for node in self.nodes.split_off(len) {
            for child in node.children {
                if child.0 < len {
                    self.nodes[child.0].parent = None;
                }
            }
        }
    }

    /// Freezes the arena into a tree rooted at `root`
    pub fn finish(self, root: NodeId) -> Ast {
        debug_assert!(root.0 < self.nodes.len(), "root outside arena");
        debug_assert!(self.nodes[root.0].parent.is_none(), "root has a parent");
        debug_assert!(
            self.nodes
                .iter()
                .all(|node| node.kind.accepts_child_count(node.children.len())),
            "node with wrong number of children"
        );
        Ast {
            nodes: self.nodes,
            root,
        }
    }
}

/// A parsed tree
///
/// Owns every node; [`NodeRef`] views borrow it for traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ast {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Ast {
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            ast: self,
            id: self.root,
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// Looks up a node by id
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.0 < self.nodes.len()).then_some(NodeRef { ast: self, id })
    }

    /// Raw node storage, in creation order
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first, parent-before-children walk from the root
    pub fn preorder(&self) -> Vec<NodeRef<'_>> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            order.push(NodeRef { ast: self, id });
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        order
    }
}

/// Borrowed view of one node inside an [`Ast`]
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    ast: &'a Ast,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn node(&self) -> &'a Node {
        &self.ast.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.node().kind
    }

    /// Operator symbol, variable name or literal digits, depending on the kind
    pub fn text(&self) -> &'a str {
        &self.node().text
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        let ast = self.ast;
        self.node().parent.map(|id| NodeRef { ast, id })
    }

    /// Children in left-to-right grammar order
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let ast = self.ast;
        self.node()
            .children
            .iter()
            .map(move |&id| NodeRef { ast, id })
    }

    pub fn child(&self, index: usize) -> Option<NodeRef<'a>> {
        let ast = self.ast;
        self.node()
            .children
            .get(index)
            .map(|&id| NodeRef { ast, id })
    }

    pub fn child_count(&self) -> usize {
        self.node().children.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.node().children.is_empty()
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("text", &self.text())
            .field("children", &self.child_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_rules() {
        assert!(NodeKind::Program.accepts_child_count(0));
        assert!(NodeKind::Program.accepts_child_count(7));
        assert!(NodeKind::IntDeclaration.accepts_child_count(0));
        assert!(NodeKind::IntDeclaration.accepts_child_count(1));
        assert!(!NodeKind::IntDeclaration.accepts_child_count(2));
        assert!(!NodeKind::AssignmentStatement.accepts_child_count(0));
        assert!(NodeKind::Additive.accepts_child_count(2));
        assert!(!NodeKind::Multiplicative.accepts_child_count(1));
        assert!(!NodeKind::IntLiteral.accepts_child_count(1));
    }

    #[test]
    fn test_attach_sets_parent() {
        let mut builder = AstBuilder::new();
        let left = builder.push(NodeKind::IntLiteral, "2");
        let right = builder.push(NodeKind::Identifier, "x");
        let sum = builder.binary(NodeKind::Additive, "+", left, right);
        let ast = builder.finish(sum);

        let root = ast.root();
        assert_eq!(root.kind(), NodeKind::Additive);
        assert_eq!(root.text(), "+");
        assert!(root.parent().is_none());

        let children: Vec<_> = root.children().collect();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].text(), "2");
        assert_eq!(children[1].text(), "x");
        assert_eq!(children[0].parent().map(|p| p.id()), Some(sum));
    }

    #[test]
    fn test_truncate_discards_later_nodes() {
        let mut builder = AstBuilder::new();
        let keep = builder.push(NodeKind::Identifier, "a");
        let checkpoint = builder.len();
        let lit = builder.push(NodeKind::IntLiteral, "1");
        builder.binary(NodeKind::Additive, "+", keep, lit);

        builder.truncate(checkpoint);
        assert_eq!(builder.len(), 1);

        let ast = builder.finish(keep);
        assert!(ast.root().is_leaf());
        assert!(ast.root().parent().is_none());
        assert_eq!(ast.len(), 1);
    }

    #[test]
    fn test_truncate_leaves_kept_nodes_alone() {
        let mut builder = AstBuilder::new();
        let a = builder.push(NodeKind::IntLiteral, "1");
        let b = builder.push(NodeKind::IntLiteral, "2");
        let sum = builder.binary(NodeKind::Additive, "+", a, b);
        let checkpoint = builder.len();
        builder.push(NodeKind::Identifier, "x");

        builder.truncate(checkpoint);
        builder.truncate(checkpoint + 5);
        let ast = builder.finish(sum);
        assert_eq!(ast.len(), 3);
        let right = ast.root().child(1).unwrap();
        assert_eq!(right.parent().map(|p| p.id()), Some(sum));
    }

    #[test]
    fn test_preorder_visits_parents_first() {
        let mut builder = AstBuilder::new();
        let a = builder.push(NodeKind::IntLiteral, "1");
        let b = builder.push(NodeKind::IntLiteral, "2");
        let mul = builder.binary(NodeKind::Multiplicative, "*", a, b);
        let c = builder.push(NodeKind::IntLiteral, "3");
        let add = builder.binary(NodeKind::Additive, "-", mul, c);
        let ast = builder.finish(add);

        let texts: Vec<&str> = ast.preorder().iter().map(|n| n.text()).collect();
        assert_eq!(texts, vec!["-", "*", "1", "2", "3"]);
    }
}
