//! Debugging utilities for plot layouts and SVG artwork.
//!
//! Two independent halves:
//!
//! - [`inspect`]: walk a rendered object tree and report or outline the
//!   on-screen bounds of every node, in pixels, inches, points or figure
//!   fractions.
//! - [`import`]: load an SVG document and convert its paths into flat
//!   vertex/code paths, flipped to a bottom-left origin and optionally
//!   rescaled.
//!
//! ```
//! use plotlens::inspect::{Element, report};
//! use plotlens::types::{Bounds, FigureMetrics, Units};
//!
//! let metrics = FigureMetrics::try_new(4.0, 3.0, 100.0).unwrap();
//! let tree = Element::figure(&metrics)
//!     .with_child(Element::new("Axes", Bounds::new(0.5, 0.5, 3.0, 2.0)));
//!
//! assert_eq!(
//!     report(&tree, &metrics, Units::Pixels),
//!     "1. Figure(xy = (0, 0), width = 400, height = 300)\n\
//!      | 1. Axes(xy = (50, 50), width = 300, height = 200)\n"
//! );
//! ```

pub mod errors;
pub mod import;
pub mod inspect;
mod log;
pub mod types;

pub use errors::{ImportError, InspectError};
pub use import::{
    ImportOptions, ImportWarning, ImportedSvg, Importer, Path, PathCode, PathSet, SvgAttributes,
    parse_document, read_document,
};
pub use inspect::{
    BoxStyle, Canvas, LineStyle, Renderer, VisualNode, describe, overlay_debug_boxes, print_report,
    traverse,
};
pub use types::{Bounds, FigureMetrics, Units};
