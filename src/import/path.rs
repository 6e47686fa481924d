//! Flat vertex/code path representation.
//!
//! One code per vertex: a cubic segment contributes three `Curve4` codes
//! (two control points and the end point), a quadratic two `Curve3` codes.

use std::fmt::Write as _;

use glam::{DVec2, dvec2};

use crate::types::{Bounds, format_decimal};

/// Per-vertex path command tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathCode {
    MoveTo,
    LineTo,
    /// Quadratic Bézier vertex (control point or end point)
    Curve3,
    /// Cubic Bézier vertex (control point or end point)
    Curve4,
}

impl PathCode {
    /// Numeric code used by plotting path primitives
    pub fn as_u8(self) -> u8 {
        match self {
            PathCode::MoveTo => 1,
            PathCode::LineTo => 2,
            PathCode::Curve3 => 3,
            PathCode::Curve4 => 4,
        }
    }

    /// Vertices per segment for this code
    fn arity(self) -> usize {
        match self {
            PathCode::MoveTo | PathCode::LineTo => 1,
            PathCode::Curve3 => 2,
            PathCode::Curve4 => 3,
        }
    }

    fn letter(self) -> char {
        match self {
            PathCode::MoveTo => 'M',
            PathCode::LineTo => 'L',
            PathCode::Curve3 => 'Q',
            PathCode::Curve4 => 'C',
        }
    }
}

/// An ordered list of vertices, each tagged with a [`PathCode`].
///
/// Transforms return new paths; a path is never modified once built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    vertices: Vec<DVec2>,
    codes: Vec<PathCode>,
}

impl Path {
    /// Build from parallel vertex and code lists; `None` if their lengths differ.
    pub fn from_parts(vertices: Vec<DVec2>, codes: Vec<PathCode>) -> Option<Self> {
        (vertices.len() == codes.len()).then_some(Path { vertices, codes })
    }

    pub(crate) fn push(&mut self, code: PathCode, vertex: DVec2) {
        self.vertices.push(vertex);
        self.codes.push(code);
    }

    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    pub fn codes(&self) -> &[PathCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// `(code, vertex)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (PathCode, DVec2)> + '_ {
        self.codes.iter().copied().zip(self.vertices.iter().copied())
    }

    /// Apply `f` to every vertex, keeping the codes.
    pub fn transform(&self, f: impl Fn(DVec2) -> DVec2) -> Path {
        Path {
            vertices: self.vertices.iter().map(|v| f(*v)).collect(),
            codes: self.codes.clone(),
        }
    }

    /// Mirror vertically inside a box of the given height: `(x, y) -> (x, height - y)`.
    pub fn flip_y(&self, height: f64) -> Path {
        self.transform(|v| dvec2(v.x, height - v.y))
    }

    /// Uniformly scale about the origin.
    pub fn scale(&self, factor: f64) -> Path {
        self.transform(|v| v * factor)
    }

    /// Axis-aligned bounds of all vertices (control points included).
    pub fn bounds(&self) -> Option<Bounds> {
        let first = *self.vertices.first()?;
        let (min, max) = self
            .vertices
            .iter()
            .fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)));
        Some(Bounds::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    /// Serialize as SVG path data with absolute commands.
    ///
    /// Runs of curve vertices are regrouped into segments; a trailing group
    /// too short for its curve degrades to line segments.
    pub fn to_svg_data(&self) -> String {
        let mut out = String::new();
        let mut i = 0;
        while i < self.codes.len() {
            let code = self.codes[i];
            let run = self.codes[i..].iter().take_while(|c| **c == code).count();
            let arity = code.arity();
            let whole = run - run % arity;

            for segment in self.vertices[i..i + whole].chunks(arity) {
                push_segment(&mut out, code.letter(), segment);
            }
            for vertex in &self.vertices[i + whole..i + run] {
                push_segment(&mut out, 'L', std::slice::from_ref(vertex));
            }
            i += run;
        }
        out
    }
}

fn push_segment(out: &mut String, letter: char, vertices: &[DVec2]) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push(letter);
    for v in vertices {
        let _ = write!(out, " {} {}", format_decimal(v.x, 3), format_decimal(v.y, 3));
    }
}
