//! Visual layout debugging: outline every node of a tree on its canvas.

use svgtypes::Color;

use super::{Renderer, VisualNode, traverse};
use crate::types::Bounds;

/// Stroke pattern of a debug rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    Solid,
    #[default]
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// Dash pattern scaled by the line width, `None` for solid lines.
    pub fn dash_pattern(self, line_width: f64) -> Option<Vec<f64>> {
        let base: &[f64] = match self {
            LineStyle::Solid => return None,
            LineStyle::Dashed => &[3.7, 1.6],
            LineStyle::Dotted => &[1.0, 1.65],
            LineStyle::DashDot => &[6.4, 1.6, 1.0, 1.6],
        };
        let scale = line_width.max(1.0);
        Some(base.iter().map(|v| v * scale).collect())
    }
}

/// Appearance of a debug rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStyle {
    pub edge_color: Color,
    pub line_style: LineStyle,
    pub line_width: f64,
    /// `None` leaves the rectangle unfilled
    pub face_color: Option<Color>,
}

impl Default for BoxStyle {
    /// Half-transparent black dashed outline, no fill. Alpha 128 is the
    /// closest 8-bit value to 0.5 and is written out as opacity 0.5.
    fn default() -> Self {
        BoxStyle {
            edge_color: Color::new_rgba(0, 0, 0, 128),
            line_style: LineStyle::Dashed,
            line_width: 1.0,
            face_color: None,
        }
    }
}

impl BoxStyle {
    pub fn with_edge_color(mut self, color: Color) -> Self {
        self.edge_color = color;
        self
    }

    pub fn with_line_style(mut self, line_style: LineStyle) -> Self {
        self.line_style = line_style;
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_face_color(mut self, color: Color) -> Self {
        self.face_color = Some(color);
        self
    }
}

/// A rectangle annotation in device pixels
#[derive(Debug, Clone, PartialEq)]
pub struct DebugRect {
    pub bounds: Bounds,
    pub style: BoxStyle,
    /// Kind of the node the rectangle outlines
    pub source: String,
}

/// Something annotations can be added to.
pub trait Canvas {
    fn add_rectangle(&mut self, rect: DebugRect);
}

impl Canvas for Vec<DebugRect> {
    fn add_rectangle(&mut self, rect: DebugRect) {
        self.push(rect);
    }
}

/// Add one rectangle per node of `root` to `canvas`, outlining its window
/// extent under `renderer`.
///
/// `style_for` may return `None` to fall back to [`BoxStyle::default`]. Existing
/// nodes are left untouched. Returns the number of rectangles added.
pub fn overlay_debug_boxes<C, F>(
    root: &dyn VisualNode,
    renderer: &dyn Renderer,
    canvas: &mut C,
    mut style_for: F,
) -> usize
where
    C: Canvas + ?Sized,
    F: FnMut(&dyn VisualNode) -> Option<BoxStyle>,
{
    let mut added = 0;
    traverse(root, |node, _, _| {
        let bounds = node.window_extent(renderer);
        let style = style_for(node).unwrap_or_default();
        crate::log::debug!(kind = node.kind(), ?bounds, "adding debug box");
        canvas.add_rectangle(DebugRect {
            bounds,
            style,
            source: node.kind().to_string(),
        });
        added += 1;
    });
    added
}
