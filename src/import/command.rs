//! Conversion of a canonical command stream into a [`Path`].
//!
//! Each operator is paired with the coordinate pairs that follow it, and
//! every pair becomes one vertex tagged with the operator's code, so
//! `C a b c` yields three `Curve4` vertices.

use glam::dvec2;
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

use super::path::{Path, PathCode};
use crate::errors::{ImportError, command_source};

#[derive(Parser)]
#[grammar = "import/command.pest"]
struct CommandParser;

/// Map a canonical operator letter to its path code.
pub fn path_code(operator: &str) -> Option<PathCode> {
    match operator {
        "M" => Some(PathCode::MoveTo),
        "L" => Some(PathCode::LineTo),
        "C" => Some(PathCode::Curve4),
        "Q" => Some(PathCode::Curve3),
        _ => None,
    }
}

/// Parse a command stream limited to `M`, `L`, `C` and `Q`.
///
/// Any other operator is an [`ImportError::UnrecognizedCommand`].
pub fn parse_commands(commands: &str) -> Result<Path, ImportError> {
    let parsed = CommandParser::parse(Rule::commands, commands).map_err(|e| {
        let offset = match e.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };
        ImportError::syntax(commands, offset, e.variant.message())
    })?;

    let mut path = Path::default();
    for command in parsed.flatten().filter(|p| p.as_rule() == Rule::command) {
        let mut inner = command.into_inner();
        let Some(operator) = inner.next() else {
            continue;
        };
        let code = path_code(operator.as_str()).ok_or_else(|| {
            let span = operator.as_span();
            ImportError::UnrecognizedCommand {
                command: operator.as_str().to_string(),
                src: command_source(commands),
                span: (span.start(), span.end() - span.start()).into(),
            }
        })?;

        for pair in inner {
            let mut coords = pair.into_inner();
            let (Some(x), Some(y)) = (coords.next(), coords.next()) else {
                continue;
            };
            path.push(code, dvec2(coordinate(commands, x)?, coordinate(commands, y)?));
        }
    }
    Ok(path)
}

fn coordinate(commands: &str, number: Pair<'_, Rule>) -> Result<f64, ImportError> {
    let span = number.as_span();
    match number.as_str().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ImportError::InvalidNumber {
            value: number.as_str().to_string(),
            src: command_source(commands),
            span: (span.start(), span.end() - span.start()).into(),
        }),
    }
}
