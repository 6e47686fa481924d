//! Layout inspection for rendered object trees.
//!
//! The inspector only reads the tree. Everything is built on [`traverse`], a
//! pre-order walk that hands each node its depth and its index among its
//! siblings:
//! - [`describe`] formats one node and its bounding box in a unit system
//! - [`write_report`] / [`print_report`] emit one indented line per node
//! - [`overlay_debug_boxes`] adds a dashed rectangle per node to a canvas

pub mod overlay;
pub mod tree;

use std::fmt::Write as _;
use std::io;

use crate::errors::InspectError;
use crate::types::{Bounds, FigureMetrics, Units, format_general};

pub use overlay::{BoxStyle, Canvas, DebugRect, LineStyle, overlay_debug_boxes};
pub use tree::{Element, Figure};

/// A realized rendering pass.
///
/// Device-pixel geometry only exists relative to one; it fixes the
/// resolution and the canvas size.
pub trait Renderer {
    fn metrics(&self) -> FigureMetrics;
}

impl Renderer for FigureMetrics {
    fn metrics(&self) -> FigureMetrics {
        *self
    }
}

/// A drawable node owned by the host plotting library.
///
/// The tree reachable through [`VisualNode::children`] must be acyclic; no
/// cycle detection is done here.
pub trait VisualNode {
    /// Type name shown in reports, e.g. `Axes` or `Text`
    fn kind(&self) -> &str;

    /// Literal text content for text-bearing nodes
    fn text(&self) -> Option<&str> {
        None
    }

    /// Direct children in drawing order
    fn children(&self) -> Vec<&dyn VisualNode>;

    /// Bounding box in device pixels for the given rendering pass
    fn window_extent(&self, renderer: &dyn Renderer) -> Bounds;
}

/// Describe a node: its type, its text if any, and its bounds in `units`.
///
/// Pixels and points are rounded to integers (ties to even); physical and
/// fraction units keep three significant digits.
pub fn describe(node: &dyn VisualNode, renderer: &dyn Renderer, units: Units) -> String {
    let px = node.window_extent(renderer);
    let bounds = renderer.metrics().convert(px, units);

    let mut out = String::from(node.kind());
    if let Some(text) = node.text() {
        let _ = write!(out, ":'{text}'");
    }
    let _ = write!(
        out,
        "(xy = ({}, {}), width = {}, height = {})",
        format_component(bounds.x0, units),
        format_component(bounds.y0, units),
        format_component(bounds.width, units),
        format_component(bounds.height, units),
    );
    out
}

/// [`describe`] with the unit system given by name.
pub fn describe_with(
    node: &dyn VisualNode,
    renderer: &dyn Renderer,
    units: &str,
) -> Result<String, InspectError> {
    let units: Units = units.parse()?;
    Ok(describe(node, renderer, units))
}

fn format_component(value: f64, units: Units) -> String {
    if units.is_integral() {
        format!("{}", value.round_ties_even() as i64)
    } else {
        format_general(value, 3)
    }
}

/// Pre-order depth-first walk from `node` at depth 0, index 0.
///
/// `visit(node, depth, index)` runs on a node before any of its children;
/// children are visited in order and indexed from 0 within their group.
pub fn traverse<F>(node: &dyn VisualNode, mut visit: F)
where
    F: FnMut(&dyn VisualNode, usize, usize),
{
    traverse_from(node, 0, 0, &mut visit);
}

/// [`traverse`] starting at an explicit depth and sibling index.
pub fn traverse_from<F>(node: &dyn VisualNode, depth: usize, index: usize, visit: &mut F)
where
    F: FnMut(&dyn VisualNode, usize, usize),
{
    visit(node, depth, index);
    for (index, child) in node.children().into_iter().enumerate() {
        traverse_from(child, depth + 1, index, visit);
    }
}

/// One report line: `| ` per depth level, 1-based index, description.
fn report_line(
    node: &dyn VisualNode,
    renderer: &dyn Renderer,
    units: Units,
    depth: usize,
    index: usize,
) -> String {
    format!(
        "{}{}. {}",
        "| ".repeat(depth),
        index + 1,
        describe(node, renderer, units)
    )
}

/// Build the layout report for `root` as a string, one line per node.
pub fn report(root: &dyn VisualNode, renderer: &dyn Renderer, units: Units) -> String {
    let mut out = String::new();
    traverse(root, |node, depth, index| {
        out.push_str(&report_line(node, renderer, units, depth, index));
        out.push('\n');
    });
    out
}

/// Write the layout report for `root` to `out`.
pub fn write_report<W: io::Write>(
    out: &mut W,
    root: &dyn VisualNode,
    renderer: &dyn Renderer,
    units: Units,
) -> io::Result<()> {
    let mut result = Ok(());
    traverse(root, |node, depth, index| {
        if result.is_ok() {
            result = writeln!(out, "{}", report_line(node, renderer, units, depth, index));
        }
    });
    result
}

/// Print the layout report for `root` to stdout.
pub fn print_report(
    root: &dyn VisualNode,
    renderer: &dyn Renderer,
    units: Units,
) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_report(&mut lock, root, renderer, units)
}
