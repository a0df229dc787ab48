use keyshape_animation_core::{
    AnimationConfig, AnimationError, Appearance, BlendOptions, CircleState, Color, ColorSpace, Easing, EasingMap,
    Field, Gradient, GradientStop, PathState, Point, RectangleState, Shape, ShapeParams, ShapeState, State,
    TextState,
};

fn linear_everywhere() -> EasingMap {
    Field::ALL
        .iter()
        .fold(EasingMap::new(), |map, field| map.with(*field, Easing::Linear))
}

fn circle(radius: f64, x: f64, y: f64) -> State {
    CircleState::new(radius)
        .with_appearance(Appearance::new().with_position(x, y))
        .into()
}

#[test]
fn identity_circle_blend() {
    let a = circle(50.0, 0.0, 0.0);
    let b = circle(50.0, 0.0, 0.0);
    assert_eq!(a.blend(&b, 0.5).unwrap(), a);
}

#[test]
fn endpoint_identity_across_kinds() {
    let pairs: Vec<(State, State)> = vec![
        (circle(1.0, 0.25, -4.0), circle(9.5, 0.7, 13.1)),
        (
            RectangleState::new(10.0, 20.0).with_corner_radius(2.0).into(),
            RectangleState::new(33.3, 0.1).with_corner_radius(7.7).into(),
        ),
        (
            TextState::new("a").with_font_size(11.0).into(),
            TextState::new("b").with_font_size(29.3).with_font_family("Mono").into(),
        ),
        (
            PathState::parse("M0 0 L10 0 L10 10 Z").unwrap().into(),
            PathState::parse("M0 0 C 5 5 10 5 20 0").unwrap().into(),
        ),
    ];
    for (a, b) in pairs {
        assert_eq!(a.blend(&b, 0.0).unwrap(), a);
        assert_eq!(a.blend(&b, 1.0).unwrap(), b);
    }
}

#[test]
fn numeric_fields_are_linear_under_linear_easing() {
    let config = AnimationConfig::default();
    let linear = linear_everywhere();
    let options = BlendOptions::new(&config).with_property_easing(&linear);
    let a = RectangleState::new(10.0, -20.0).with_corner_radius(0.5);
    let b = RectangleState::new(-30.0, 80.0).with_corner_radius(4.5);
    for p in [0.0, 0.1, 0.37, 0.5, 0.9, 1.0] {
        let State::Rectangle(r) = State::from(a.clone())
            .blend_with(&b.clone().into(), p, &options)
            .unwrap()
        else {
            panic!("kind changed");
        };
        assert!((r.width() - (10.0 + (-40.0) * p)).abs() < 1e-12);
        assert!((r.height() - (-20.0 + 100.0 * p)).abs() < 1e-12);
        assert!((r.corner_radius() - (0.5 + 4.0 * p)).abs() < 1e-12);
    }
}

#[test]
fn color_midpoint_has_no_green() {
    let red = CircleState::new(5.0).with_appearance(Appearance::new().with_fill_color(Color::rgb(255, 0, 0)));
    let blue = CircleState::new(5.0).with_appearance(Appearance::new().with_fill_color(Color::rgb(0, 0, 255)));
    let mid = State::from(red).blend(&blue.into(), 0.5).unwrap();
    let (r, g, b) = mid.appearance().fill_color().to_tuple().unwrap();
    assert!(r > 0);
    assert!(b > 0);
    assert_eq!(g, 0);
}

#[test]
fn hsv_color_space_is_configurable() {
    let config = AnimationConfig::default().with_color_space(ColorSpace::Hsv);
    let options = BlendOptions::new(&config);
    let red = CircleState::new(5.0).with_appearance(Appearance::new().with_fill_color(Color::rgb(255, 0, 0)));
    let blue = CircleState::new(5.0).with_appearance(Appearance::new().with_fill_color(Color::rgb(0, 0, 255)));
    let mid = State::from(red).blend_with(&blue.into(), 0.5, &options).unwrap();
    assert_eq!(mid.appearance().fill_color(), Color::rgb(255, 0, 255));
}

fn stops() -> Vec<GradientStop> {
    vec![
        GradientStop::new(0.0, Color::rgb(0, 0, 0)),
        GradientStop::new(1.0, Color::rgb(255, 255, 255)),
    ]
}

#[test]
fn mismatched_gradients_step_at_half() {
    let linear = Gradient::linear(Point::ORIGIN, Point::new(10.0, 0.0), stops()).unwrap();
    let radial = Gradient::radial(Point::ORIGIN, 5.0, stops()).unwrap();
    let a: State = CircleState::new(1.0)
        .with_appearance(Appearance::new().with_fill_gradient(Some(linear.clone())))
        .into();
    let b: State = CircleState::new(1.0)
        .with_appearance(Appearance::new().with_fill_gradient(Some(radial.clone())))
        .into();

    let early = a.blend(&b, 0.49).unwrap();
    let late = a.blend(&b, 0.51).unwrap();
    assert_eq!(early.appearance().fill_gradient(), Some(&linear));
    assert_eq!(late.appearance().fill_gradient(), Some(&radial));
}

#[test]
fn one_sided_gradient_steps() {
    let g = Gradient::radial(Point::ORIGIN, 5.0, stops()).unwrap();
    let a: State = CircleState::new(1.0)
        .with_appearance(Appearance::new().with_fill_gradient(Some(g.clone())))
        .into();
    let b: State = CircleState::new(1.0).into();
    assert_eq!(a.blend(&b, 0.49).unwrap().appearance().fill_gradient(), Some(&g));
    assert_eq!(b.blend(&a, 0.49).unwrap().appearance().fill_gradient(), None);
}

#[test]
fn categorical_fields_step() {
    let a: State = TextState::new("first").into();
    let b: State = TextState::new("second").into();
    let State::Text(early) = a.blend(&b, 0.49).unwrap() else { panic!() };
    let State::Text(late) = a.blend(&b, 0.51).unwrap() else { panic!() };
    assert_eq!(early.text(), "first");
    assert_eq!(late.text(), "second");
}

#[test]
fn overshoot_easing_is_not_clamped() {
    let config = AnimationConfig::default();
    let easing = EasingMap::new().with(Field::Opacity, Easing::OutBack);
    let options = BlendOptions::new(&config).with_property_easing(&easing);
    let a: State = CircleState::new(1.0).with_appearance(Appearance::new().with_opacity(0.0)).into();
    let b: State = CircleState::new(1.0).with_appearance(Appearance::new().with_opacity(1.0)).into();
    let mid = a.blend_with(&b, 0.6, &options).unwrap();
    assert!(mid.appearance().opacity() > 1.0);
}

#[test]
fn mismatched_kinds_report_both() {
    let err = circle(1.0, 0.0, 0.0)
        .blend(&TextState::new("x").into(), 0.3)
        .unwrap_err();
    assert_eq!(err.category(), "interpolation");
    assert!(!err.is_recoverable());
    match err {
        AnimationError::IncompatibleStateKind { expected, found } => {
            assert_eq!(expected, "circle");
            assert_eq!(found, "text");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn path_fields_morph_between_endpoints() {
    let a: State = PathState::parse("M0 0 L10 0 L10 10 L0 10 Z").unwrap().into();
    let b: State = PathState::parse("M0 0 L20 0 L20 20 L0 20 Z").unwrap().into();
    let State::Path(mid) = a.blend(&b, 0.5).unwrap() else { panic!() };
    // Same structure, closed: the shape strategy resamples to sample_count points.
    let subs = mid.data().subpaths();
    assert_eq!(subs.len(), 1);
    assert!(subs[0].closed);
    let xs: Vec<f64> = subs[0].flatten(1).iter().map(|p| p.x).collect();
    let max_x = xs.iter().cloned().fold(f64::MIN, f64::max);
    assert!((max_x - 15.0).abs() < 1e-6, "max_x = {max_x}");
}

fn star_shape(num_vertices: usize) -> ShapeState {
    ShapeState::new(
        ShapeParams::new(Shape::Star {
            outer_radius: 50.0,
            inner_radius: 20.0,
            points: 8,
        })
        .with_num_vertices(num_vertices),
    )
}

fn circle_shape(num_vertices: usize) -> ShapeState {
    ShapeState::new(
        ShapeParams::new(Shape::Circle {
            radius: 30.0,
            start_angle: 0.0,
        })
        .with_num_vertices(num_vertices),
    )
}

fn radius(p: &Point) -> f64 {
    (p.x * p.x + p.y * p.y).sqrt()
}

#[test]
fn star_morphs_into_circle_vertex_by_vertex() {
    let a: State = star_shape(64).into();
    let b: State = circle_shape(64).into();
    let mid = match a.blend(&b, 0.3).unwrap() {
        State::Shape(shape) => shape,
        other => panic!("expected a shape, got {other:?}"),
    };
    let outline = mid.outline().expect("cross-kind blend carries an outline");
    assert_eq!(mid.contours().unwrap(), *outline);

    let outer = outline.outer();
    assert_eq!(outer.len(), 64);
    assert!(outer.closed());
    assert_eq!(outer.vertices()[0], outer.vertices()[63]);

    let radii: Vec<f64> = outer.vertices().iter().map(radius).collect();
    for r in &radii {
        assert!(*r > 20.0 && *r < 50.0, "vertex radius {r} outside the star's range");
    }
    let max = radii.iter().cloned().fold(f64::MIN, f64::max);
    let min = radii.iter().cloned().fold(f64::MAX, f64::min);
    // Tips pulled in from the star, valleys pushed out, neither at the circle yet.
    assert!(max > 30.0 && max < 50.0, "max radius {max}");
    assert!(min < 30.0 && min > 20.0, "min radius {min}");

    let star = star_shape(64).contours().unwrap();
    let circle = circle_shape(64).contours().unwrap();
    assert_ne!(*outline, star);
    assert_ne!(*outline, circle);
}

#[test]
fn cross_kind_shape_endpoints_are_exact() {
    let a: State = star_shape(64).into();
    let b: State = circle_shape(64).into();
    assert_eq!(a.blend(&b, 0.0).unwrap(), a);
    assert_eq!(a.blend(&b, 1.0).unwrap(), b);
}

#[test]
fn cross_kind_shapes_with_different_counts_step() {
    let a: State = star_shape(64).into();
    let b: State = circle_shape(48).into();
    match a.blend(&b, 0.3).unwrap() {
        State::Shape(shape) => {
            assert!(shape.outline().is_none());
            assert_eq!(shape.shape().shape.name(), "star");
        }
        other => panic!("expected a shape, got {other:?}"),
    }
}

#[test]
fn ring_holes_morph_with_matching_counts() {
    let ring: State = ShapeState::new(
        ShapeParams::new(Shape::Ring {
            inner_radius: 10.0,
            outer_radius: 40.0,
        })
        .with_num_vertices(32),
    )
    .into();
    let poly: State = ShapeState::new(
        ShapeParams::new(Shape::PolyRing {
            inner_size: 15.0,
            outer_size: 40.0,
            edges: 6,
            inner_rotation: 0.0,
        })
        .with_num_vertices(32),
    )
    .into();
    let State::Shape(mid) = ring.blend(&poly, 0.5).unwrap() else {
        panic!("expected a shape");
    };
    let outline = mid.outline().expect("outline");
    assert_eq!(outline.num_holes(), 1);
    let hole = &outline.holes()[0];
    assert!(hole.closed());
    assert_eq!(hole.vertices().first(), hole.vertices().last());
}
