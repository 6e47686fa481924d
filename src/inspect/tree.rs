//! In-memory object tree and canvas.
//!
//! `Element` lays out in inches so the same tree realizes to different
//! device-pixel geometry under different renderers. `Figure` collects debug
//! rectangles and can dump them as SVG.

use svg::node::Text as TextNode;
use svg::node::element::{Element as SvgElement, Rectangle};
use svg::{Document, Node as _};
use svgtypes::Color;

use super::overlay::{Canvas, DebugRect};
use super::{Renderer, VisualNode};
use crate::types::{Bounds, FigureMetrics, format_decimal, format_general};

/// A drawable node with a layout box in inches
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub kind: String,
    pub text: Option<String>,
    /// Layout in inches from the canvas's bottom-left corner
    pub layout: Bounds,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(kind: impl Into<String>, layout: Bounds) -> Self {
        Element {
            kind: kind.into(),
            text: None,
            layout,
            children: Vec::new(),
        }
    }

    /// Root node covering the whole canvas described by `metrics`.
    pub fn figure(metrics: &FigureMetrics) -> Self {
        Element::new("Figure", Bounds::new(0.0, 0.0, metrics.width_in, metrics.height_in))
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Element::node_count).sum::<usize>()
    }
}

impl VisualNode for Element {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    fn children(&self) -> Vec<&dyn VisualNode> {
        self.children.iter().map(|c| c as &dyn VisualNode).collect()
    }

    fn window_extent(&self, renderer: &dyn Renderer) -> Bounds {
        renderer.metrics().realize(self.layout)
    }
}

/// A canvas that accumulates debug rectangles
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Figure {
    pub metrics: FigureMetrics,
    pub annotations: Vec<DebugRect>,
}

impl Figure {
    pub fn new(metrics: FigureMetrics) -> Self {
        Figure {
            metrics,
            annotations: Vec::new(),
        }
    }

    /// Render the annotations as a standalone SVG document.
    ///
    /// Rectangles are stored with a bottom-left origin and flipped into
    /// SVG's top-left origin here. Each one carries the kind of its node as
    /// a `<title>`.
    pub fn to_svg(&self) -> String {
        let w = format_decimal(self.metrics.width_px(), 3);
        let h = format_decimal(self.metrics.height_px(), 3);

        let mut document = Document::new()
            .set("width", w.as_str())
            .set("height", h.as_str())
            .set("viewBox", format!("0 0 {w} {h}"));
        for rect in &self.annotations {
            document = document.add(rectangle(rect, self.metrics.height_px()));
        }
        document.to_string()
    }
}

impl Canvas for Figure {
    fn add_rectangle(&mut self, rect: DebugRect) {
        self.annotations.push(rect);
    }
}

fn rectangle(rect: &DebugRect, canvas_height: f64) -> Rectangle {
    let b = rect.bounds;
    let style = &rect.style;

    let mut node = Rectangle::new()
        .set("x", format_decimal(b.x0, 3))
        .set("y", format_decimal(canvas_height - b.y1(), 3))
        .set("width", format_decimal(b.width, 3))
        .set("height", format_decimal(b.height, 3));

    node = match style.face_color {
        Some(fill) if fill.alpha != 255 => node
            .set("fill", rgb(fill))
            .set("fill-opacity", opacity(fill)),
        Some(fill) => node.set("fill", rgb(fill)),
        None => node.set("fill", "none"),
    };

    node = node
        .set("stroke", rgb(style.edge_color))
        .set("stroke-width", format_decimal(style.line_width, 3));
    if style.edge_color.alpha != 255 {
        node = node.set("stroke-opacity", opacity(style.edge_color));
    }
    if let Some(dashes) = style.line_style.dash_pattern(style.line_width) {
        let dashes: Vec<_> = dashes.iter().map(|d| format_decimal(*d, 3)).collect();
        node = node.set("stroke-dasharray", dashes.join(","));
    }

    let mut title = SvgElement::new("title");
    title.append(TextNode::new(rect.source.as_str()));
    node.add(title)
}

fn rgb(c: Color) -> String {
    format!("rgb({},{},{})", c.red, c.green, c.blue)
}

/// Alpha as an opacity with two significant digits, so 128 reads as 0.5.
fn opacity(c: Color) -> String {
    format_general(f64::from(c.alpha) / 255.0, 2)
}
