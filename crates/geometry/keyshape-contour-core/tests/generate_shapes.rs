use approx::assert_abs_diff_eq;
use keyshape_contour_core::{generate, ContourError, Shape, ShapeParams};
use keyshape_path_core::Point;

fn all_shapes() -> Vec<Shape> {
    vec![
        Shape::Circle {
            radius: 40.0,
            start_angle: 15.0,
        },
        Shape::Ellipse { rx: 60.0, ry: 20.0 },
        Shape::RegularPolygon {
            size: 30.0,
            sides: 6,
            rotation: 10.0,
        },
        Shape::Star {
            outer_radius: 50.0,
            inner_radius: 20.0,
            points: 5,
        },
        Shape::Flower {
            size: 40.0,
            petals: 4,
        },
        Shape::Ring {
            inner_radius: 30.0,
            outer_radius: 50.0,
        },
        Shape::PolyRing {
            inner_size: 20.0,
            outer_size: 40.0,
            edges: 5,
            inner_rotation: 36.0,
        },
    ]
}

#[test]
fn ring_with_density_eight() {
    let params = ShapeParams::new(Shape::Ring {
        inner_radius: 30.0,
        outer_radius: 50.0,
    })
    .with_num_vertices(8);
    let set = generate(&params).unwrap();
    assert_eq!(set.outer().len(), 8);
    assert!(set.outer().closed());
    assert_eq!(set.num_holes(), 1);
    assert!(set.holes()[0].closed());
}

#[test]
fn outer_count_matches_density_for_every_shape() {
    for shape in all_shapes() {
        for density in [shape.min_vertices(), 16, 129] {
            let set = generate(&ShapeParams::new(shape).with_num_vertices(density)).unwrap();
            assert_eq!(set.outer().len(), density, "{}", shape.name());
            assert!(set.all_contours().all(|c| c.closed()), "{}", shape.name());
            assert_eq!(set.num_holes(), usize::from(shape.is_perforated()), "{}", shape.name());
            let v = set.outer().vertices();
            assert_eq!(v.first(), v.last(), "{} loop is not closed", shape.name());
        }
    }
}

#[test]
fn holes_wind_against_outer() {
    for shape in all_shapes().into_iter().filter(Shape::is_perforated) {
        let set = generate(&ShapeParams::new(shape).with_num_vertices(64)).unwrap();
        let outer = set.outer().area();
        let hole = set.holes()[0].area();
        assert!(outer > 0.0, "{}", shape.name());
        assert!(hole < 0.0, "{}", shape.name());
        assert!(hole.abs() < outer, "{}", shape.name());
    }
}

#[test]
fn center_offsets_every_contour() {
    let shape = Shape::Ring {
        inner_radius: 10.0,
        outer_radius: 20.0,
    };
    let at_origin = generate(&ShapeParams::new(shape).with_num_vertices(12)).unwrap();
    let moved = generate(
        &ShapeParams::new(shape)
            .with_num_vertices(12)
            .with_center(Point::new(100.0, -50.0)),
    )
    .unwrap();
    let expected = at_origin.translate(100.0, -50.0);
    for (a, b) in moved.all_contours().zip(expected.all_contours()) {
        for (p, q) in a.vertices().iter().zip(b.vertices()) {
            assert_abs_diff_eq!(p.x, q.x, epsilon = 1e-9);
            assert_abs_diff_eq!(p.y, q.y, epsilon = 1e-9);
        }
    }
    let c = moved.centroid();
    assert_abs_diff_eq!(c.x, 100.0, epsilon = 1e-6);
    assert_abs_diff_eq!(c.y, -50.0, epsilon = 1e-6);
}

#[test]
fn invalid_parameters_name_the_shape() {
    let cases = [
        ShapeParams::new(Shape::Star {
            outer_radius: 1.0,
            inner_radius: 0.5,
            points: 2,
        }),
        ShapeParams::new(Shape::Flower { size: 1.0, petals: 0 }),
        ShapeParams::new(Shape::Circle {
            radius: 1.0,
            start_angle: 0.0,
        })
        .with_num_vertices(0),
    ];
    for params in cases {
        match generate(&params) {
            Err(ContourError::InvalidParameter { shape, reason }) => {
                assert_eq!(shape, params.shape.name());
                assert!(!reason.is_empty());
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }
}

#[test]
fn contour_set_path_round_trips() {
    let set = generate(
        &ShapeParams::new(Shape::PolyRing {
            inner_size: 10.0,
            outer_size: 20.0,
            edges: 4,
            inner_rotation: 45.0,
        })
        .with_num_vertices(9),
    )
    .unwrap();
    let path = set.to_path();
    let reparsed = keyshape_path_core::Path::parse(&path.to_string()).unwrap();
    assert!(path.geometry_eq(&reparsed, 0.0));
    assert!(path.is_closed(0.01));
}
