//! Error types with rich diagnostics using miette
//!
//! Command stream errors carry source spans so a bad operator is labelled
//! in place.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

/// Name given to normalized command streams in diagnostics
const COMMAND_STREAM: &str = "<path commands>";

/// Wrap a normalized command stream for miette
pub(crate) fn command_source(commands: &str) -> NamedSource<String> {
    NamedSource::new(COMMAND_STREAM, commands.to_string())
}

// ============================================================================
// Inspection Errors
// ============================================================================

/// Errors raised by the layout inspector
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum InspectError {
    #[error("unknown unit system: {units}")]
    #[diagnostic(
        code(plotlens::inspect::invalid_units),
        help("units must be one of: pixels | physical | points | fraction")
    )]
    InvalidUnits { units: String },

    #[error("invalid figure metrics: {0}")]
    #[diagnostic(code(plotlens::inspect::invalid_metrics))]
    InvalidMetrics(#[from] NumericError),
}

// ============================================================================
// Import Errors
// ============================================================================

/// Errors raised while importing an SVG document
#[derive(Error, Diagnostic, Debug)]
pub enum ImportError {
    #[error("unrecognized path command: {command}")]
    #[diagnostic(
        code(plotlens::import::unrecognized_command),
        help("only M, L, C and Q survive normalization")
    )]
    UnrecognizedCommand {
        command: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("unsupported operator")]
        span: SourceSpan,
    },

    #[error("malformed path command stream")]
    #[diagnostic(code(plotlens::import::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
    },

    #[error("invalid coordinate: {value}")]
    #[diagnostic(code(plotlens::import::invalid_number))]
    InvalidNumber {
        value: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("not a finite number")]
        span: SourceSpan,
    },

    #[error("invalid path data: {0}")]
    #[diagnostic(code(plotlens::import::path_data))]
    PathData(#[from] svgtypes::Error),

    #[error("failed to read {path}")]
    #[diagnostic(code(plotlens::import::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed SVG document: {0}")]
    #[diagnostic(code(plotlens::import::xml))]
    Xml(#[from] roxmltree::Error),

    #[error("document has no viewBox attribute")]
    #[diagnostic(
        code(plotlens::import::missing_view_box),
        help("the root <svg> element must declare viewBox=\"minX minY width height\"")
    )]
    MissingViewBox,

    #[error("invalid viewBox: {value:?}")]
    #[diagnostic(
        code(plotlens::import::invalid_view_box),
        help("expected four space-separated integers")
    )]
    InvalidViewBox { value: String },

    #[error("viewBox has zero height, cannot scale to {target_height}")]
    #[diagnostic(code(plotlens::import::degenerate_view_box))]
    DegenerateViewBox { target_height: f64 },

    #[error("invalid target height: {0}")]
    #[diagnostic(code(plotlens::import::invalid_target_height))]
    InvalidTargetHeight(NumericError),
}

impl ImportError {
    /// Syntax error at a byte offset of a command stream
    pub(crate) fn syntax(commands: &str, offset: usize, message: impl Into<String>) -> Self {
        ImportError::Syntax {
            message: message.into(),
            src: command_source(commands),
            span: (offset.min(commands.len()), 0).into(),
        }
    }
}
