use std::path::PathBuf;

use glam::dvec2;
use plotlens::import::{PathNormalizer, convert_path_data};
use plotlens::types::Size;
use plotlens::{
    ImportError, ImportOptions, ImportWarning, Importer, PathCode, PathSet, read_document,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Set RUST_LOG=plotlens=debug to see per-element conversion logs.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn triangle_is_flipped_to_bottom_left_origin() {
    let svg = read_document(fixture("triangle.svg"), ImportOptions::default()).unwrap();
    let path = svg.paths.single().unwrap();
    assert_eq!(
        path.vertices(),
        [dvec2(5.0, 8.0), dvec2(8.0, 2.0), dvec2(2.0, 2.0), dvec2(5.0, 8.0)]
    );
    assert_eq!(
        path.codes(),
        [PathCode::MoveTo, PathCode::LineTo, PathCode::LineTo, PathCode::LineTo]
    );
    assert!(svg.warnings.is_empty());
}

#[test]
fn untransformed_import_matches_direct_conversion() {
    let options = ImportOptions::default().invert_y(false);
    let svg = read_document(fixture("wave.svg"), options).unwrap();
    let direct =
        convert_path_data("M 0 10 C 5 0 15 0 20 10 S 35 20 40 10 Q 30 15 20 15 T 0 10").unwrap();
    assert_eq!(svg.paths, PathSet::Single(direct));
    assert_eq!(svg.attributes.size, Size { width: 40.0, height: 20.0 });
}

#[test]
fn target_height_scales_paths_and_size() {
    let options = ImportOptions::default().target_height(20.0);
    let svg = read_document(fixture("triangle.svg"), options).unwrap();
    let path = svg.paths.single().unwrap();
    assert_eq!(path.vertices()[0], dvec2(10.0, 16.0));
    assert_eq!(path.vertices()[1], dvec2(16.0, 4.0));
    assert_eq!(svg.attributes.size, Size { width: 20.0, height: 20.0 });

    let keys: Vec<_> = svg.attributes.raw.keys().map(String::as_str).collect();
    assert_eq!(keys, ["width", "height"]);
}

#[test]
fn several_shapes_yield_a_list_and_a_warning() {
    init_tracing();
    let svg = read_document(fixture("badge.svg"), ImportOptions::default()).unwrap();
    let PathSet::Multiple(paths) = &svg.paths else {
        panic!("expected several paths, got {:?}", svg.paths);
    };
    assert_eq!(paths.len(), 3);
    assert_eq!(svg.warnings, [ImportWarning::MultiplePaths(3)]);

    // rect first, in document order
    assert_eq!(paths[0].vertices()[0], dvec2(1.0, 15.0));
    // circle arcs come back as cubic segments
    assert!(paths[1].codes()[1..].iter().all(|c| *c == PathCode::Curve4));
    // relative commands resolved against the pen
    assert_eq!(paths[2].vertices()[2], dvec2(26.0, 4.0));
}

#[test]
fn polygon_is_closed() {
    let options = ImportOptions::default().invert_y(false);
    let svg = read_document(fixture("arrow.svg"), options).unwrap();
    let path = svg.paths.single().unwrap();
    assert_eq!(path.len(), 8);
    assert_eq!(path.vertices().first(), path.vertices().last());
}

/// Leaves every command as written
struct PassThrough;

impl PathNormalizer for PassThrough {
    fn normalize(&self, data: &str) -> Result<String, ImportError> {
        Ok(data.to_string())
    }
}

#[test]
fn unnormalized_arc_is_rejected() {
    let importer = Importer::with_normalizer(PassThrough, ImportOptions::default());
    let err = importer.convert("M 0,0 A 1,1").unwrap_err();
    assert!(
        matches!(&err, ImportError::UnrecognizedCommand { command, .. } if command == "A"),
        "{err:?}"
    );
    assert_eq!(err.to_string(), "unrecognized path command: A");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = read_document(fixture("missing.svg"), ImportOptions::default()).unwrap_err();
    assert!(matches!(err, ImportError::Io { .. }), "{err:?}");
}

#[test]
fn malformed_xml_is_reported() {
    let importer = Importer::new(ImportOptions::default());
    assert!(matches!(
        importer.parse("<svg viewBox=\"0 0 1 1\"><path d=\"M 0 0\"></svg>"),
        Err(ImportError::Xml(_))
    ));
}
