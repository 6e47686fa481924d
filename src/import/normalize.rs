//! Reduction of raw SVG geometry to the canonical command stream.
//!
//! Path grammar handling (relative coordinates, shorthand curves, arcs) is
//! delegated to `svgtypes`; this module only re-encodes its simplified
//! segments as `M`/`L`/`C`/`Q` text and turns basic shapes into path data.

use std::fmt::Write as _;
use std::str::FromStr;

use roxmltree::Node;
use svgtypes::{PointsParser, SimplePathSegment, SimplifyingPathParser};

use crate::errors::ImportError;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Turns raw SVG path data into an absolute command stream that only uses
/// `M`, `L`, `C` and `Q`, with `x,y` coordinate pairs.
pub trait PathNormalizer {
    fn normalize(&self, data: &str) -> Result<String, ImportError>;
}

/// [`PathNormalizer`] backed by `svgtypes::SimplifyingPathParser`.
///
/// Close-path becomes a line back to the sub-path start unless the pen is
/// already there.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgTypesNormalizer;

impl PathNormalizer for SvgTypesNormalizer {
    fn normalize(&self, data: &str) -> Result<String, ImportError> {
        let mut out = String::new();
        let mut start = None;
        let mut pen = None;

        for segment in SimplifyingPathParser::from(data) {
            match segment? {
                SimplePathSegment::MoveTo { x, y } => {
                    emit(&mut out, 'M', &[(x, y)]);
                    start = Some((x, y));
                    pen = start;
                }
                SimplePathSegment::LineTo { x, y } => {
                    emit(&mut out, 'L', &[(x, y)]);
                    pen = Some((x, y));
                }
                SimplePathSegment::CurveTo { x1, y1, x2, y2, x, y } => {
                    emit(&mut out, 'C', &[(x1, y1), (x2, y2), (x, y)]);
                    pen = Some((x, y));
                }
                SimplePathSegment::Quadratic { x1, y1, x, y } => {
                    emit(&mut out, 'Q', &[(x1, y1), (x, y)]);
                    pen = Some((x, y));
                }
                SimplePathSegment::ClosePath => {
                    if let Some(start) = start {
                        if pen != Some(start) {
                            emit(&mut out, 'L', &[start]);
                            pen = Some(start);
                        }
                    }
                }
            }
        }
        Ok(out)
    }
}

fn emit(out: &mut String, operator: char, points: &[(f64, f64)]) {
    if !out.is_empty() {
        out.push(' ');
    }
    out.push(operator);
    for (x, y) in points {
        let _ = write!(out, " {x},{y}");
    }
}

/// Raw path data for a drawable element, `None` for anything else.
///
/// Handles `path` plus the basic shapes `line`, `polyline`, `polygon`,
/// `rect`, `circle` and `ellipse`, either in the SVG namespace or in none.
/// Shapes with a non-positive size draw nothing and are skipped.
pub fn element_path_data(node: Node<'_, '_>) -> Result<Option<String>, ImportError> {
    if !node.is_element() || !matches!(node.tag_name().namespace(), None | Some(SVG_NAMESPACE)) {
        return Ok(None);
    }
    let num = |name: &str| -> Result<f64, ImportError> {
        match node.attribute(name) {
            Some(value) => Ok(svgtypes::Length::from_str(value)?.number),
            None => Ok(0.0),
        }
    };

    let data = match node.tag_name().name() {
        "path" => node.attribute("d").map(str::to_string),
        "line" => Some(format!(
            "M {} {} L {} {}",
            num("x1")?,
            num("y1")?,
            num("x2")?,
            num("y2")?
        )),
        tag @ ("polyline" | "polygon") => {
            let points: Vec<_> =
                PointsParser::from(node.attribute("points").unwrap_or("")).collect();
            points_data(&points, tag == "polygon")
        }
        "rect" => {
            let (x, y, w, h) = (num("x")?, num("y")?, num("width")?, num("height")?);
            (w > 0.0 && h > 0.0).then(|| {
                format!(
                    "M {x} {y} L {} {y} L {} {} L {x} {} Z",
                    x + w,
                    x + w,
                    y + h,
                    y + h
                )
            })
        }
        "circle" => {
            let r = num("r")?;
            ellipse_data(num("cx")?, num("cy")?, r, r)
        }
        "ellipse" => ellipse_data(num("cx")?, num("cy")?, num("rx")?, num("ry")?),
        _ => None,
    };

    if data.is_none() {
        crate::log::debug!(tag = node.tag_name().name(), "element contributes no path");
    }
    Ok(data)
}

fn points_data(points: &[(f64, f64)], closed: bool) -> Option<String> {
    let ((x0, y0), rest) = points.split_first()?;
    let mut data = format!("M {x0} {y0}");
    for (x, y) in rest {
        let _ = write!(data, " L {x} {y}");
    }
    if closed {
        data.push_str(" Z");
    }
    Some(data)
}

/// Two half-ellipse arcs from the leftmost point round and back.
fn ellipse_data(cx: f64, cy: f64, rx: f64, ry: f64) -> Option<String> {
    (rx > 0.0 && ry > 0.0).then(|| {
        format!(
            "M {} {cy} A {rx} {ry} 0 1 0 {} {cy} A {rx} {ry} 0 1 0 {} {cy}",
            cx - rx,
            cx + rx,
            cx - rx
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(data: &str) -> String {
        SvgTypesNormalizer.normalize(data).unwrap()
    }

    #[test]
    fn absolute_commands_pass_through() {
        assert_eq!(normalize("M 1 2 L 3 4"), "M 1,2 L 3,4");
        assert_eq!(normalize("M0 0C1 1 2 2 3 3Q4 4 5 5"), "M 0,0 C 1,1 2,2 3,3 Q 4,4 5,5");
    }

    #[test]
    fn relative_and_shorthand_become_absolute() {
        assert_eq!(normalize("m 1 1 l 2 0 h 3 v 4"), "M 1,1 L 3,1 L 6,1 L 6,5");
    }

    #[test]
    fn close_path_returns_to_start() {
        assert_eq!(normalize("M 0 0 L 4 0 L 4 4 Z"), "M 0,0 L 4,0 L 4,4 L 0,0");
        // already at the start: nothing to add
        assert_eq!(normalize("M 0 0 L 4 0 L 0 0 Z"), "M 0,0 L 4,0 L 0,0");
    }

    #[test]
    fn arcs_become_cubics() {
        let out = normalize("M 0 5 A 5 5 0 0 1 10 5");
        assert!(out.starts_with("M 0,5 C "), "{out}");
        assert!(!out.contains('A'));
    }

    #[test]
    fn invalid_path_data_errors() {
        assert!(matches!(
            SvgTypesNormalizer.normalize("M 0 0 L x"),
            Err(ImportError::PathData(_))
        ));
    }

    fn first_element_data(svg: &str) -> Option<String> {
        let doc = roxmltree::Document::parse(svg).unwrap();
        let node = doc.root_element().first_element_child().unwrap();
        element_path_data(node).unwrap()
    }

    #[test]
    fn shapes_to_path_data() {
        let ns = r#"xmlns="http://www.w3.org/2000/svg""#;
        assert_eq!(
            first_element_data(&format!(r#"<svg {ns}><line x1="1" y1="2" x2="3" y2="4"/></svg>"#)),
            Some("M 1 2 L 3 4".to_string())
        );
        assert_eq!(
            first_element_data(&format!(r#"<svg {ns}><polygon points="0,0 4,0 4,3"/></svg>"#)),
            Some("M 0 0 L 4 0 L 4 3 Z".to_string())
        );
        assert_eq!(
            first_element_data(&format!(r#"<svg {ns}><polyline points="0,0 4,0"/></svg>"#)),
            Some("M 0 0 L 4 0".to_string())
        );
        assert_eq!(
            first_element_data(&format!(
                r#"<svg {ns}><rect x="1" y="2" width="3" height="4"/></svg>"#
            )),
            Some("M 1 2 L 4 2 L 4 6 L 1 6 Z".to_string())
        );
        assert_eq!(
            first_element_data(&format!(r#"<svg {ns}><circle cx="5" cy="5" r="2"/></svg>"#)),
            Some("M 3 5 A 2 2 0 1 0 7 5 A 2 2 0 1 0 3 5".to_string())
        );
    }

    #[test]
    fn degenerate_and_unknown_elements_are_skipped() {
        let ns = r#"xmlns="http://www.w3.org/2000/svg""#;
        assert_eq!(first_element_data(&format!(r#"<svg {ns}><circle r="0"/></svg>"#)), None);
        assert_eq!(first_element_data(&format!(r#"<svg {ns}><rect width="3"/></svg>"#)), None);
        assert_eq!(first_element_data(&format!(r#"<svg {ns}><g/></svg>"#)), None);
        assert_eq!(first_element_data(&format!(r#"<svg {ns}><polygon points=""/></svg>"#)), None);
    }

    #[test]
    fn shapes_from_foreign_namespaces_are_skipped() {
        let foreign = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:x="urn:x">
            <x:path d="M 0 0 L 1 1"/>
        </svg>"#;
        assert_eq!(first_element_data(foreign), None);

        let bare = r#"<svg><path d="M 0 0 L 1 1"/></svg>"#;
        assert_eq!(first_element_data(bare), Some("M 0 0 L 1 1".to_string()));
    }
}
