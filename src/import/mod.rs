//! SVG import into flat [`Path`]s.
//!
//! Pipeline per document:
//! 1. Parse the XML with `roxmltree`, collect the root attributes and the
//!    path data of every drawable element in document order
//! 2. Normalize each path through a [`PathNormalizer`] and convert the
//!    resulting command stream ([`parse_commands`])
//! 3. Flip every vertex to a bottom-left origin (`invert_y`), then rescale to
//!    `target_height` if one is given
//!
//! The flip always happens before the scale.

pub mod command;
pub mod normalize;
pub mod path;

use std::fmt;

use indexmap::IndexMap;

pub use command::{parse_commands, path_code};
pub use normalize::{PathNormalizer, SvgTypesNormalizer, element_path_data};
pub use path::{Path, PathCode};

use crate::errors::ImportError;
use crate::types::{Size, ViewBox, positive};

/// How an SVG document is mapped into output coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportOptions {
    /// Flip from top-left origin (SVG) to bottom-left origin (plots)
    pub invert_y: bool,
    /// Scale uniformly so the view-box height maps to this height
    pub target_height: Option<f64>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        ImportOptions {
            invert_y: true,
            target_height: None,
        }
    }
}

impl ImportOptions {
    pub fn invert_y(mut self, invert_y: bool) -> Self {
        self.invert_y = invert_y;
        self
    }

    pub fn target_height(mut self, height: f64) -> Self {
        self.target_height = Some(height);
        self
    }
}

/// One path, or the list of all paths when a document has several
#[derive(Debug, Clone, PartialEq)]
pub enum PathSet {
    Single(Path),
    Multiple(Vec<Path>),
}

impl PathSet {
    fn from_paths(mut paths: Vec<Path>) -> Self {
        if paths.len() == 1 {
            PathSet::Single(paths.remove(0))
        } else {
            PathSet::Multiple(paths)
        }
    }

    /// All paths, in document order
    pub fn as_slice(&self) -> &[Path] {
        match self {
            PathSet::Single(path) => std::slice::from_ref(path),
            PathSet::Multiple(paths) => paths,
        }
    }

    pub fn single(&self) -> Option<&Path> {
        match self {
            PathSet::Single(path) => Some(path),
            PathSet::Multiple(_) => None,
        }
    }

    pub fn into_vec(self) -> Vec<Path> {
        match self {
            PathSet::Single(path) => vec![path],
            PathSet::Multiple(paths) => paths,
        }
    }
}

/// Conditions worth reporting that do not fail the import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportWarning {
    /// More than one path; this case has not been validated
    MultiplePaths(usize),
    /// No drawable element at all
    NoPaths,
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportWarning::MultiplePaths(n) => write!(
                f,
                "this svg contains {n} paths; multi-path import has not been tested"
            ),
            ImportWarning::NoPaths => write!(f, "this svg contains no paths"),
        }
    }
}

/// Root attributes of an imported document
#[derive(Debug, Clone, PartialEq)]
pub struct SvgAttributes {
    /// Every root attribute except `viewBox`, in document order
    pub raw: IndexMap<String, String>,
    pub view_box: ViewBox,
    /// Output width and height after scaling
    pub size: Size,
}

/// Result of importing one SVG document
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSvg {
    pub paths: PathSet,
    pub attributes: SvgAttributes,
    pub warnings: Vec<ImportWarning>,
}

/// SVG importer with a pluggable path normalizer.
#[derive(Debug, Clone, Default)]
pub struct Importer<N = SvgTypesNormalizer> {
    normalizer: N,
    options: ImportOptions,
}

impl Importer<SvgTypesNormalizer> {
    pub fn new(options: ImportOptions) -> Self {
        Importer {
            normalizer: SvgTypesNormalizer,
            options,
        }
    }
}

impl<N: PathNormalizer> Importer<N> {
    pub fn with_normalizer(normalizer: N, options: ImportOptions) -> Self {
        Importer { normalizer, options }
    }

    pub fn options(&self) -> &ImportOptions {
        &self.options
    }

    /// Convert raw path data for a single path, without any coordinate
    /// transform.
    pub fn convert(&self, data: &str) -> Result<Path, ImportError> {
        let commands = self.normalizer.normalize(data)?;
        parse_commands(&commands)
    }

    /// Read and import the SVG file at `file`.
    pub fn read(&self, file: impl AsRef<std::path::Path>) -> Result<ImportedSvg, ImportError> {
        let file = file.as_ref();
        let text = std::fs::read_to_string(file).map_err(|source| ImportError::Io {
            path: file.display().to_string(),
            source,
        })?;
        self.parse(&text)
    }

    /// Import an SVG document held in memory.
    pub fn parse(&self, text: &str) -> Result<ImportedSvg, ImportError> {
        let doc = roxmltree::Document::parse(text)?;
        let root = doc.root_element();

        let mut paths = Vec::new();
        for node in root.descendants().filter(|n| n.is_element()) {
            if let Some(data) = element_path_data(node)? {
                let path = self.convert(&data)?;
                crate::log::debug!(
                    tag = node.tag_name().name(),
                    vertices = path.len(),
                    "converted sub-path"
                );
                paths.push(path);
            }
        }

        let mut raw: IndexMap<String, String> = root
            .attributes()
            .map(|a| (a.name().to_string(), a.value().to_string()))
            .collect();
        let view_box: ViewBox = raw
            .shift_remove("viewBox")
            .ok_or(ImportError::MissingViewBox)?
            .parse()?;

        let mut width = view_box.native_width();
        let native_height = view_box.native_height();

        if self.options.invert_y {
            paths = paths.iter().map(|p| p.flip_y(native_height)).collect();
        }

        let height = match self.options.target_height {
            Some(target) => {
                let target = positive(target).map_err(ImportError::InvalidTargetHeight)?;
                if native_height == 0.0 {
                    return Err(ImportError::DegenerateViewBox {
                        target_height: target,
                    });
                }
                let scale = target / native_height;
                paths = paths.iter().map(|p| p.scale(scale)).collect();
                width *= scale;
                target
            }
            None => native_height,
        };

        let mut warnings = Vec::new();
        match paths.len() {
            0 => warnings.push(ImportWarning::NoPaths),
            1 => {}
            n => warnings.push(ImportWarning::MultiplePaths(n)),
        }
        for warning in &warnings {
            crate::log::warn!("{warning}");
        }

        Ok(ImportedSvg {
            paths: PathSet::from_paths(paths),
            attributes: SvgAttributes {
                raw,
                view_box,
                size: Size { width, height },
            },
            warnings,
        })
    }
}

/// Import the SVG file at `file` with the default normalizer.
pub fn read_document(
    file: impl AsRef<std::path::Path>,
    options: ImportOptions,
) -> Result<ImportedSvg, ImportError> {
    Importer::new(options).read(file)
}

/// Import an in-memory SVG document with the default normalizer.
pub fn parse_document(text: &str, options: ImportOptions) -> Result<ImportedSvg, ImportError> {
    Importer::new(options).parse(text)
}

/// Convert raw SVG path data to a [`Path`] with the default normalizer.
pub fn convert_path_data(data: &str) -> Result<Path, ImportError> {
    Importer::new(ImportOptions::default()).convert(data)
}
