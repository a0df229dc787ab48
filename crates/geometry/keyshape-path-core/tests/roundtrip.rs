use keyshape_path_core::{Path, PathCommand, Point};
use keyshape_test_fixtures::paths;

#[test]
fn fixture_paths_round_trip_through_text() {
    for set in ["basic", "arcs"] {
        for (name, text) in paths::load(set).expect("path fixtures") {
            let parsed = Path::parse(&text).unwrap_or_else(|e| panic!("{set}/{name}: {e}"));
            let reparsed = Path::parse(&parsed.to_string()).expect("serialized path reparses");
            assert!(
                parsed.geometry_eq(&reparsed, 1e-12),
                "{set}/{name} did not round trip: {parsed} vs {reparsed}"
            );
            assert_eq!(parsed, reparsed, "{set}/{name} changed command structure");
        }
    }
}

#[test]
fn serialized_form_is_normalized() {
    let p = Path::parse("M10,10l5,0 h-5Z").unwrap();
    assert_eq!(p.to_string(), "M 10,10 l 5,0 h -5 Z");
}

#[test]
fn round_trip_preserves_exotic_floats() {
    let cmds = vec![
        PathCommand::move_to(0.1 + 0.2, -1e-7),
        PathCommand::cubic_to(
            Point::new(1.0 / 3.0, 2.0 / 3.0),
            Point::new(123456.789, -0.000001),
            Point::new(1e21, 5.0),
        ),
        PathCommand::ClosePath,
    ];
    let path = Path::new(cmds);
    let back = Path::parse(&path.to_string()).unwrap();
    assert_eq!(path, back);
}

#[test]
fn cubic_normalization_keeps_end_points() {
    for (name, text) in paths::load("basic").unwrap() {
        let path = Path::parse(&text).unwrap();
        let cubic = path.to_cubic();
        assert!(
            cubic
                .commands()
                .iter()
                .all(|c| matches!(c, PathCommand::MoveTo { .. } | PathCommand::CubicBezier { .. } | PathCommand::ClosePath)),
            "{name} kept non-cubic commands"
        );
        let a = path.subpaths();
        let b = cubic.subpaths();
        assert_eq!(a.len(), b.len(), "{name}");
        for (sa, sb) in a.iter().zip(&b) {
            assert_eq!(sa.start, sb.start, "{name}");
            assert_eq!(sa.end(), sb.end(), "{name}");
        }
    }
}

#[test]
fn multi_subpath_relative_coordinates() {
    let text = paths::get("basic", "two-subpaths").unwrap();
    let abs = Path::parse(&text).unwrap().to_absolute();
    assert_eq!(
        abs.to_string(),
        "M 0,0 L 10,0 L 10,10 Z M 20,20 L 25,20 L 25,25 Z"
    );
}
