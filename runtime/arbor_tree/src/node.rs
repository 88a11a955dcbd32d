//! Syntax tree nodes.

use std::fmt;
use std::mem;
use std::sync::Arc;

use arbor_text::Length;

use crate::Symbol;

/// A shared handle to an immutable syntax node.
///
/// Cloning a `Tree` bumps a refcount; the node itself is never modified
/// once built. The driver's "mutations" (resizing an error token,
/// zeroing a lookahead's padding, marking a token extra) produce fresh
/// nodes instead, so subtrees shared with a caller's previous parse stay
/// untouched.
///
/// Nodes carry no text. A leaf records the extent of the ignored text
/// preceding it (`padding`) and of its own text (`size`); an interior
/// node's extent is the sum of its children's. The cached
/// [`total_size`](Tree::total_size) of a node is therefore
/// `padding + size + Σ total_size(child)`.
#[derive(Clone)]
pub struct Tree(Arc<NodeData>);

struct NodeData {
    symbol: Symbol,
    children: Vec<Tree>,
    padding: Length,
    size: Length,
    total_size: Length,
    is_extra: bool,
    is_hidden: bool,
    has_error: bool,
}

impl Tree {
    /// Build a leaf token.
    pub fn leaf(symbol: Symbol, padding: Length, size: Length, is_hidden: bool) -> Tree {
        Tree(Arc::new(NodeData {
            symbol,
            children: Vec::new(),
            padding,
            size,
            total_size: padding + size,
            is_extra: false,
            is_hidden,
            has_error: symbol == Symbol::ERROR,
        }))
    }

    /// Build an interior node from its children, in order.
    ///
    /// The node's own padding and size are zero; its extent is the sum of
    /// its children's.
    pub fn interior(symbol: Symbol, children: Vec<Tree>, is_hidden: bool) -> Tree {
        let mut total_size = Length::ZERO;
        let mut has_error = symbol == Symbol::ERROR;
        for child in &children {
            total_size += child.total_size();
            has_error |= child.has_error();
        }
        Tree(Arc::new(NodeData {
            symbol,
            children,
            padding: Length::ZERO,
            size: Length::ZERO,
            total_size,
            is_extra: false,
            is_hidden,
            has_error,
        }))
    }

    // --- Accessors ---

    #[inline]
    pub fn symbol(&self) -> Symbol {
        self.0.symbol
    }

    #[inline]
    pub fn children(&self) -> &[Tree] {
        &self.0.children
    }

    #[inline]
    pub fn child_count(&self) -> usize {
        self.0.children.len()
    }

    /// Extent of the ignored text preceding this node's first character.
    #[inline]
    pub fn padding(&self) -> Length {
        self.0.padding
    }

    /// Extent of this node's own text, excluding padding and children.
    #[inline]
    pub fn size(&self) -> Length {
        self.0.size
    }

    /// Full text extent covered by this node and its children.
    #[inline]
    pub fn total_size(&self) -> Length {
        self.0.total_size
    }

    /// Whether this node floats outside the normal derivation
    /// (whitespace, comments).
    #[inline]
    pub fn is_extra(&self) -> bool {
        self.0.is_extra
    }

    /// Whether this node's symbol is spliced away when its parent's
    /// children are exposed.
    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.0.is_hidden
    }

    /// Whether this node or any descendant is an error token.
    #[inline]
    pub fn has_error(&self) -> bool {
        self.0.has_error
    }

    /// Whether two handles point at the very same node.
    #[inline]
    pub fn same_node(&self, other: &Tree) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    // --- Copy-on-write helpers ---

    /// A copy of this node marked extra.
    #[must_use]
    pub fn into_extra(self) -> Tree {
        if self.0.is_extra {
            return self;
        }
        let mut data = self.0.copy_fields();
        data.is_extra = true;
        Tree(Arc::new(data))
    }

    /// A copy of this node with different padding.
    #[must_use]
    pub fn with_padding(&self, padding: Length) -> Tree {
        let mut data = self.0.copy_fields();
        data.total_size = data.total_size - data.padding + padding;
        data.padding = padding;
        Tree(Arc::new(data))
    }

    // --- Rendering ---

    /// Render this subtree as an S-expression, naming symbols through
    /// `name_of`. Hidden children are spliced out: their children appear
    /// in their place.
    pub fn to_sexp(&self, name_of: &impl Fn(Symbol) -> String) -> String {
        let mut out = String::new();
        self.write_sexp(&mut out, name_of);
        out
    }

    fn write_sexp(&self, out: &mut String, name_of: &impl Fn(Symbol) -> String) {
        if self.child_count() == 0 {
            out.push_str(&name_of(self.symbol()));
        } else {
            out.push('(');
            out.push_str(&name_of(self.symbol()));
            self.write_child_sexps(out, name_of);
            out.push(')');
        }
    }

    fn write_child_sexps(&self, out: &mut String, name_of: &impl Fn(Symbol) -> String) {
        for child in self.children() {
            if child.is_hidden() {
                child.write_child_sexps(out, name_of);
            } else {
                out.push(' ');
                child.write_sexp(out, name_of);
            }
        }
    }
}

impl fmt::Debug for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("symbol", &self.symbol())
            .field("padding", &self.padding())
            .field("size", &self.size())
            .field("children", &self.children())
            .finish()
    }
}

impl NodeData {
    /// Field-by-field copy for the copy-on-write helpers. Child handles
    /// are cloned (refcount bumps), not the subtrees themselves.
    fn copy_fields(&self) -> NodeData {
        NodeData {
            symbol: self.symbol,
            children: self.children.clone(),
            padding: self.padding,
            size: self.size,
            total_size: self.total_size,
            is_extra: self.is_extra,
            is_hidden: self.is_hidden,
            has_error: self.has_error,
        }
    }
}

impl Drop for NodeData {
    fn drop(&mut self) {
        // Unlink children iteratively so dropping a deep tree cannot
        // overflow the call stack.
        let mut pending = mem::take(&mut self.children);
        while let Some(Tree(mut node)) = pending.pop() {
            if let Some(data) = Arc::get_mut(&mut node) {
                pending.append(&mut mem::take(&mut data.children));
            }
        }
    }
}
