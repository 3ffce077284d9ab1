use digit_engine::{
    ConfidenceSynthesizer, DigitEngine, Point, RngSource, ShapeClassifier, ShapeLabel,
};
use proptest::prelude::*;

fn arb_points() -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((0.0f64..150.0, 0.0f64..150.0, any::<bool>()), 1..160).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (x, y, dragging))| Point {
                x,
                y,
                dragging: i > 0 && dragging,
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn confidences_form_a_distribution(points in arb_points(), seed in any::<u64>()) {
        let mut engine = DigitEngine::with_source(
            ShapeClassifier::default(),
            ConfidenceSynthesizer::default(),
            RngSource::seeded(seed),
        );
        let res = engine.predict(&points);
        prop_assert!((res.confidences.sum() - 1.0).abs() < 1e-9);
        prop_assert!(res.confidences.iter().all(|c| (0.0..=1.0).contains(c)));
    }

    #[test]
    fn predicted_class_is_first_argmax(points in arb_points(), seed in any::<u64>()) {
        let mut engine = DigitEngine::with_source(
            ShapeClassifier::default(),
            ConfidenceSynthesizer::default(),
            RngSource::seeded(seed),
        );
        let res = engine.predict(&points);
        let best = res.confidences.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let first = res.confidences.iter().position(|c| *c == best).unwrap();
        prop_assert_eq!(res.predicted_class, first);
    }

    #[test]
    fn classify_is_deterministic(points in arb_points()) {
        let classifier = ShapeClassifier::default();
        let label = classifier.classify(&points);
        prop_assert_eq!(label, classifier.classify(&points));
        prop_assert_ne!(label, ShapeLabel::None);
    }

    #[test]
    fn single_short_strokes_are_dots(
        start in (10.0f64..100.0, 10.0f64..100.0),
        offsets in prop::collection::vec((0.0f64..20.0, 0.0f64..20.0), 1..30)
    ) {
        // Keep the box inside 20x20 and never flat, so neither line rule fires.
        let mut points = vec![Point::start(start.0, start.1)];
        points.push(Point::drag(start.0 + 10.0, start.1 + 10.0));
        for (dx, dy) in offsets {
            points.push(Point::drag(start.0 + dx, start.1 + dy));
        }
        prop_assert_eq!(ShapeClassifier::default().classify(&points), ShapeLabel::Dot);
    }
}
