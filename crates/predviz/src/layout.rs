//! Tree layout for annotated formulas.
//!
//! This module turns an [`AnnotatedFormula`] into a [`LayoutTree`]: one
//! positioned [`LayoutNode`] per formula node, stored in a flat arena in
//! pre-order. Parents and children refer to each other by index only.
//!
//! # Pipeline Position
//!
//! ```text
//! Formula text
//!     ↓ parse + validate
//! AnnotatedFormula
//!     ↓ layout (this module)
//! LayoutTree
//!     ↓ export
//! SVG
//! ```
//!
//! # Algorithm
//!
//! Every atom gets one horizontal *unit*; an inner node spans the units of
//! its leaves, so sibling subtrees never overlap. The unit is the configured
//! minimum or the widest node plus the sibling gap, whichever is larger.
//! Each node is centred over its span and sits on the row of its depth.
//!
//! Rows are `row_height` apart with node centres `node_height / 2` below the
//! top of their row. When large text makes a node taller than that, the
//! tallest node sets both instead, keeping at least `sibling_gap` between
//! rows so connectors always run downwards.

mod text;

use log::{debug, trace};

use predviz_core::geometry::{Bounds, Point, Size};
use predviz_parser::{
    AnnotatedFormula, Formula,
    ast::{Connective, FormulaKind, Quantifier},
};

use crate::config::LayoutConfig;

/// What a layout node stands for, which decides how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Atom,
    Negation,
    Connective(Connective),
    Quantifier {
        quantifier: Quantifier,
        /// The bound variable does not occur in the body.
        vacuous: bool,
    },
}

impl NodeKind {
    fn of(formula: &Formula) -> Self {
        match formula.kind() {
            FormulaKind::Atom(_) => NodeKind::Atom,
            FormulaKind::Negation(_) => NodeKind::Negation,
            FormulaKind::Binary { connective, .. } => NodeKind::Connective(*connective),
            FormulaKind::Quantified { quantifier, .. } => NodeKind::Quantifier {
                quantifier: *quantifier,
                vacuous: formula.annotation().vacuous,
            },
        }
    }

    /// Number of children this kind of node has.
    pub fn arity(&self) -> usize {
        match self {
            NodeKind::Atom => 0,
            NodeKind::Negation | NodeKind::Quantifier { .. } => 1,
            NodeKind::Connective(_) => 2,
        }
    }

    /// Operators are drawn as circles.
    pub fn is_round(&self) -> bool {
        matches!(self, NodeKind::Negation | NodeKind::Connective(_))
    }
}

/// A positioned node of the layout tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    label: String,
    kind: NodeKind,
    center: Point,
    size: Size,
    left: f32,
    extent: f32,
    leaf_count: usize,
    depth: usize,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl LayoutNode {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Area covered by the node's shape.
    pub fn bounds(&self) -> Bounds {
        self.center.to_bounds(self.size)
    }

    /// Left edge of the horizontal span reserved for this subtree.
    pub fn left(&self) -> f32 {
        self.left
    }

    /// Width of the horizontal span reserved for this subtree.
    pub fn extent(&self) -> f32 {
        self.extent
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Index of the parent node, `None` for the root.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Indices of the children, left to right.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Where the connector from the parent ends.
    pub fn top_anchor(&self) -> Point {
        self.bounds().top_center()
    }

    /// Where connectors to the children start.
    pub fn bottom_anchor(&self) -> Point {
        self.bounds().bottom_center()
    }
}

/// A parent to child connection, by node index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub parent: usize,
    pub child: usize,
}

/// Positioned nodes of one formula, root first, in pre-order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutTree {
    nodes: Vec<LayoutNode>,
    unit: f32,
}

impl LayoutTree {
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&LayoutNode> {
        self.nodes.get(index)
    }

    pub fn root(&self) -> Option<&LayoutNode> {
        self.nodes.first()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Horizontal space given to one atom.
    pub fn unit(&self) -> f32 {
        self.unit
    }

    /// All parent to child edges, ordered by child index.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(child, node)| node.parent.map(|parent| Edge { parent, child }))
    }

    /// Start and end point of the connector drawn for `edge`.
    pub fn connector(&self, edge: Edge) -> Option<(Point, Point)> {
        let parent = self.nodes.get(edge.parent)?;
        let child = self.nodes.get(edge.child)?;
        Some((parent.bottom_anchor(), child.top_anchor()))
    }

    /// Union of all node shapes.
    pub fn bounds(&self) -> Bounds {
        self.nodes
            .iter()
            .map(LayoutNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default()
    }
}

/// Computes [`LayoutTree`]s with a fixed [`LayoutConfig`].
#[derive(Debug, Clone)]
pub struct Engine<'a> {
    config: &'a LayoutConfig,
}

impl<'a> Engine<'a> {
    pub fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Lays out `annotated`.
    ///
    /// Uses the leaf counts and depths the validator stored on each node.
    pub fn calculate(&self, annotated: &AnnotatedFormula) -> LayoutTree {
        let formula = annotated.formula();
        let mut nodes = Vec::with_capacity(formula.node_count());
        self.collect(formula, &mut nodes);

        let widest = nodes
            .iter()
            .map(|node| node.size.width())
            .fold(0.0_f32, f32::max);
        let unit = self
            .config
            .unit_width()
            .max(widest + self.config.sibling_gap());

        self.place(&mut nodes, unit);
        debug!(nodes = nodes.len(), unit = unit; "Layout calculated");

        LayoutTree { nodes, unit }
    }

    /// Pushes `root` and its subtree in pre-order.
    fn collect(&self, root: &Formula, nodes: &mut Vec<LayoutNode>) {
        let mut pending = vec![(root, None)];

        while let Some((formula, parent)) = pending.pop() {
            let index = nodes.len();
            let kind = NodeKind::of(formula);
            let label = formula.label();
            let annotation = formula.annotation();

            nodes.push(LayoutNode {
                size: self.node_size(&label, kind),
                label,
                kind,
                center: Point::default(),
                left: 0.0,
                extent: 0.0,
                leaf_count: annotation.leaf_count.max(1),
                depth: annotation.depth,
                parent,
                children: Vec::with_capacity(kind.arity()),
            });
            if let Some(parent) = parent {
                nodes[parent].children.push(index);
            }

            // Reversed so the leftmost child is visited first
            for child in formula.children().into_iter().rev() {
                pending.push((child, Some(index)));
            }
        }
    }

    fn node_size(&self, label: &str, kind: NodeKind) -> Size {
        let text = text::measure(label, self.config.font_size());
        let height = self.config.node_height().max(text.height());
        let padding = self.config.node_padding();

        if kind.is_round() {
            let diameter = height.max(text.width() + padding);
            Size::new(diameter, diameter)
        } else {
            Size::new(height.max(text.width() + 2.0 * padding), height)
        }
    }

    /// Assigns spans and centres top-down.
    ///
    /// In pre-order a parent precedes its children, so its `left` is final by
    /// the time the children are handed their share of its span.
    fn place(&self, nodes: &mut [LayoutNode], unit: f32) {
        let tallest = nodes
            .iter()
            .map(|node| node.size.height())
            .fold(self.config.node_height(), f32::max);
        let row_height = self
            .config
            .row_height()
            .max(tallest + self.config.sibling_gap());
        let half_height = tallest / 2.0;

        for index in 0..nodes.len() {
            let node = &mut nodes[index];
            node.extent = node.leaf_count as f32 * unit;
            node.center = Point::new(
                node.left + node.extent / 2.0,
                node.depth as f32 * row_height + half_height,
            );
            trace!(
                index = index,
                label = node.label.as_str(),
                x = node.center.x(),
                y = node.center.y();
                "Placed node"
            );

            let mut cursor = node.left;
            for slot in 0..nodes[index].children.len() {
                let child = nodes[index].children[slot];
                nodes[child].left = cursor;
                cursor += nodes[child].leaf_count as f32 * unit;
            }
        }
    }
}

/// Lays out `annotated` with `config`.
pub fn layout(annotated: &AnnotatedFormula, config: &LayoutConfig) -> LayoutTree {
    Engine::new(config).calculate(annotated)
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn layout_of(source: &str) -> LayoutTree {
        let annotated = predviz_parser::parse(source).expect("formula should parse");
        layout(&annotated, &LayoutConfig::default())
    }

    fn labels(tree: &LayoutTree) -> Vec<&str> {
        tree.nodes().iter().map(LayoutNode::label).collect()
    }

    #[test]
    fn test_single_atom() {
        let tree = layout_of("p");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.edges().count(), 0);

        let root = tree.root().unwrap();
        assert_eq!(root.kind(), NodeKind::Atom);
        assert_eq!(root.parent(), None);
        assert_approx_eq!(f32, root.center().x(), tree.unit() / 2.0);
        assert_approx_eq!(f32, root.center().y(), 16.0);
    }

    #[test]
    fn test_conjunction_positions() {
        let tree = layout_of("p ∧ q");
        assert_eq!(labels(&tree), vec!["∧", "p", "q"]);

        // widest node is an atom: 0.6 * 16 + 2 * 12 = 33.6, plus 16 gap
        assert_approx_eq!(f32, tree.unit(), 49.6, epsilon = 1e-4);

        let nodes = tree.nodes();
        assert_eq!(nodes[0].children(), &[1, 2]);
        assert_approx_eq!(f32, nodes[0].center().x(), 49.6, epsilon = 1e-4);
        assert_approx_eq!(f32, nodes[1].center().x(), 24.8, epsilon = 1e-4);
        assert_approx_eq!(f32, nodes[2].center().x(), 74.4, epsilon = 1e-4);
        assert_approx_eq!(f32, nodes[0].center().y(), 16.0);
        assert_approx_eq!(f32, nodes[1].center().y(), 88.0);
        assert_approx_eq!(f32, nodes[2].center().y(), 88.0);
    }

    #[test]
    fn test_long_chain() {
        let tree = layout_of(&vec!["p"; 1000].join(" ∧ "));
        assert_eq!(tree.len(), 1999);
        assert_eq!(tree.edges().count(), 1998);
        assert_eq!(tree.root().unwrap().leaf_count(), 1000);
        assert_eq!(tree.nodes().last().unwrap().depth(), 1);
    }

    #[test]
    fn test_single_child_is_centred() {
        let tree = layout_of("¬(p ∨ q)");
        let nodes = tree.nodes();
        assert_eq!(nodes[0].kind(), NodeKind::Negation);
        assert_approx_eq!(f32, nodes[0].center().x(), nodes[1].center().x());
    }

    #[test]
    fn test_extent_is_sum_of_children() {
        let tree = layout_of("(p ∧ q) → ∀x.r(x)");
        for node in tree.nodes() {
            if node.children().is_empty() {
                assert_approx_eq!(f32, node.extent(), tree.unit());
                continue;
            }
            let sum: f32 = node
                .children()
                .iter()
                .map(|&child| tree.node(child).unwrap().extent())
                .sum();
            assert_approx_eq!(f32, node.extent(), sum, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_depth_rows() {
        let tree = layout_of("¬¬p");
        let ys: Vec<f32> = tree.nodes().iter().map(|n| n.center().y()).collect();
        assert_eq!(ys, vec![16.0, 88.0, 160.0]);
    }

    #[test]
    fn test_tall_text_keeps_rows_apart() {
        let annotated = predviz_parser::parse("¬p").unwrap();
        let config = LayoutConfig::default().with_font_size(80.0);
        let tree = layout(&annotated, &config);

        // 1.2 * 80 = 96 tall nodes, rows 96 + 16 apart
        let nodes = tree.nodes();
        assert_approx_eq!(f32, nodes[0].bounds().min_y(), 0.0, epsilon = 1e-4);
        assert_approx_eq!(f32, nodes[1].center().y(), 160.0, epsilon = 1e-4);
        for edge in tree.edges() {
            let (start, end) = tree.connector(edge).unwrap();
            assert!(start.y() < end.y(), "connector {start:?} -> {end:?} runs upwards");
        }
    }

    #[test]
    fn test_connectors_join_bottom_to_top() {
        let tree = layout_of("p ∨ q");
        let edges: Vec<Edge> = tree.edges().collect();
        assert_eq!(
            edges,
            vec![
                Edge {
                    parent: 0,
                    child: 1
                },
                Edge {
                    parent: 0,
                    child: 2
                }
            ]
        );

        let (start, end) = tree.connector(edges[0]).unwrap();
        let root = tree.root().unwrap();
        assert_approx_eq!(f32, start.y(), root.bounds().max_y());
        assert_approx_eq!(f32, end.y(), tree.nodes()[1].bounds().min_y());
    }

    #[test]
    fn test_operator_nodes_are_circles() {
        let tree = layout_of("p → q");
        let root = tree.root().unwrap();
        assert_eq!(root.kind(), NodeKind::Connective(Connective::Implies));
        assert_approx_eq!(f32, root.size().width(), root.size().height());
    }

    #[test]
    fn test_vacuous_quantifier_kind() {
        let tree = layout_of("∃y.p(x)");
        assert_eq!(
            tree.root().unwrap().kind(),
            NodeKind::Quantifier {
                quantifier: Quantifier::Exists,
                vacuous: true
            }
        );
        assert_eq!(tree.root().unwrap().label(), "∃y");
    }

    #[test]
    fn test_long_label_widens_unit() {
        let tree = layout_of("is_prime(successor(x)) ∧ q");
        let widest = tree
            .nodes()
            .iter()
            .map(|n| n.size().width())
            .fold(0.0_f32, f32::max);
        assert_approx_eq!(f32, tree.unit(), widest + 16.0, epsilon = 1e-4);

        let nodes = tree.nodes();
        assert!(nodes[1].bounds().max_x() <= nodes[2].bounds().min_x());
    }

    #[test]
    fn test_layout_is_deterministic() {
        let source = "∀x.(p(x) → ∃y.(q(x, y) ∧ ¬r(y)))";
        assert_eq!(layout_of(source), layout_of(source));
    }
}
