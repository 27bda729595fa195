//! Regression coverage for parcel geometry and validation.

use chrono::{TimeZone, Utc};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::UserId;

#[fixture]
fn square() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(41.0, 29.0),
        GeoPoint::new(41.0, 29.1),
        GeoPoint::new(41.1, 29.1),
        GeoPoint::new(41.1, 29.0),
    ]
}

#[rstest]
fn closing_appends_first_position_in_storage_order(square: Vec<GeoPoint>) {
    let ring = to_closed_ring(&square);

    assert_eq!(ring.len(), 5);
    assert_eq!(ring[0], Position::new(29.0, 41.0));
    assert_eq!(ring[4], Position::new(29.0, 41.0));
    assert!(is_closed(&ring));
}

#[rstest]
fn closing_leaves_already_closed_input_alone(square: Vec<GeoPoint>) {
    let mut closed = square.clone();
    closed.push(square[0]);

    let ring = to_closed_ring(&closed);

    assert_eq!(ring.len(), 5);
    assert!(is_closed(&ring));
}

#[rstest]
fn closing_does_not_touch_the_input(square: Vec<GeoPoint>) {
    let before = square.clone();
    let _ = to_closed_ring(&square);
    assert_eq!(square, before);
}

#[rstest]
#[case(4)]
#[case(5)]
#[case(12)]
fn open_points_round_trip(#[case] count: usize) {
    let points: Vec<GeoPoint> = (0..count)
        .map(|i| {
            let angle = i as f64 / count as f64 * std::f64::consts::TAU;
            GeoPoint::new(39.0 + angle.sin() * 0.01, 32.0 + angle.cos() * 0.01)
        })
        .collect();

    assert_eq!(to_open_points(&to_closed_ring(&points)), points);
}

#[rstest]
fn arbitrary_points_round_trip_bit_for_bit() {
    let mut rng = SmallRng::seed_from_u64(41);
    for _ in 0..512 {
        let count = rng.gen_range(4..32);
        let points: Vec<GeoPoint> = (0..count)
            .map(|_| GeoPoint::new(rng.gen_range(-90.0..=90.0), rng.gen_range(-180.0..=180.0)))
            .collect();

        let ring = to_closed_ring(&points);
        let restored = to_open_points(&ring);

        assert!(is_closed(&ring));
        assert_eq!(ring.len(), count + 1);
        let bits = |points: &[GeoPoint]| -> Vec<(u64, u64)> {
            points.iter().map(|p| (p.lat.to_bits(), p.lon.to_bits())).collect()
        };
        assert_eq!(bits(&restored), bits(&points));
    }
}

#[rstest]
fn legacy_unclosed_ring_is_returned_in_full() {
    let stored = vec![
        Position::new(29.0, 41.0),
        Position::new(29.1, 41.0),
        Position::new(29.1, 41.1),
        Position::new(29.0, 41.1),
    ];

    let points = to_open_points(&stored);

    assert_eq!(points.len(), 4);
    assert_eq!(points[3], GeoPoint::new(41.1, 29.0));
}

#[rstest]
#[case(Vec::new(), false)]
#[case(vec![Position::new(1.0, 2.0)], false)]
#[case(vec![Position::new(1.0, 2.0), Position::new(1.0, 2.0)], true)]
#[case(vec![Position::new(1.0, 2.0), Position::new(1.0, 2.000_000_1)], false)]
fn closure_uses_exact_equality(#[case] ring: Vec<Position>, #[case] expected: bool) {
    assert_eq!(is_closed(&ring), expected);
}

#[rstest]
#[case(0)]
#[case(3)]
fn validation_rejects_fewer_than_four_points(square: Vec<GeoPoint>, #[case] count: usize) {
    let points = &square[..count];
    assert_eq!(
        validate_points(points),
        Err(ParcelValidationError::TooFewPoints {
            min: MIN_VERTICES,
            actual: count,
        })
    );
}

#[rstest]
fn validation_counts_trailing_duplicate_as_closure(square: Vec<GeoPoint>) {
    let closed_triangle = vec![square[0], square[1], square[2], square[0]];
    assert_eq!(
        validate_points(&closed_triangle),
        Err(ParcelValidationError::TooFewPoints { min: 4, actual: 3 })
    );
}

#[rstest]
#[case::stutter_at_start(vec![0, 0, 1, 2])]
#[case::stutter_in_middle(vec![0, 1, 1, 2])]
#[case::revisited_vertex(vec![0, 1, 0, 2])]
#[case::closed_with_repeat(vec![0, 1, 1, 2, 0])]
fn validation_rejects_repeated_vertices(square: Vec<GeoPoint>, #[case] picks: Vec<usize>) {
    let points: Vec<GeoPoint> = picks.iter().map(|&index| square[index]).collect();

    assert_eq!(
        validate_points(&points),
        Err(ParcelValidationError::TooFewPoints { min: MIN_VERTICES, actual: 3 })
    );
    assert!(PolygonRing::from_points(&points).is_err());
}

#[rstest]
fn validation_accepts_four_distinct_vertices_plus_closure(square: Vec<GeoPoint>) {
    let mut closed = square.clone();
    closed.push(square[0]);
    assert_eq!(validate_points(&closed), Ok(()));
}

#[rstest]
#[case(GeoPoint::new(f64::NAN, 29.0), ParcelValidationError::NonFiniteCoordinate { index: 2 })]
#[case(GeoPoint::new(41.0, f64::INFINITY), ParcelValidationError::NonFiniteCoordinate { index: 2 })]
#[case(GeoPoint::new(90.5, 29.0), ParcelValidationError::LatitudeOutOfRange { index: 2, value: 90.5 })]
#[case(GeoPoint::new(41.0, -180.5), ParcelValidationError::LongitudeOutOfRange { index: 2, value: -180.5 })]
fn validation_rejects_bad_coordinates(
    mut square: Vec<GeoPoint>,
    #[case] bad: GeoPoint,
    #[case] expected: ParcelValidationError,
) {
    square[2] = bad;
    assert_eq!(validate_points(&square), Err(expected));
}

#[rstest]
fn validation_accepts_boundary_values() {
    let points = vec![
        GeoPoint::new(-90.0, -180.0),
        GeoPoint::new(-90.0, 180.0),
        GeoPoint::new(90.0, 180.0),
        GeoPoint::new(90.0, -180.0),
    ];
    assert_eq!(validate_points(&points), Ok(()));
}

#[rstest]
#[case("", ParcelValidationError::EmptyName)]
#[case("   ", ParcelValidationError::EmptyName)]
fn content_rejects_blank_names(
    square: Vec<GeoPoint>,
    #[case] name: &str,
    #[case] expected: ParcelValidationError,
) {
    assert_eq!(ParcelContent::new(name, None, &square), Err(expected));
}

#[rstest]
fn content_rejects_overlong_names(square: Vec<GeoPoint>) {
    let name = "x".repeat(NAME_MAX + 1);
    assert_eq!(
        ParcelContent::new(&name, None, &square),
        Err(ParcelValidationError::NameTooLong { max: NAME_MAX })
    );
}

#[rstest]
fn content_closes_ring_and_normalises_text(square: Vec<GeoPoint>) {
    let content = ParcelContent::new("  North field ", Some(" wheat "), &square)
        .expect("valid content");

    assert_eq!(content.name(), "North field");
    assert_eq!(content.description(), Some("wheat"));
    assert!(content.ring().is_closed());
    assert_eq!(content.ring().open_points(), square);
}

#[rstest]
fn parcel_exposes_open_points_from_stored_ring(square: Vec<GeoPoint>) {
    let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).single().expect("timestamp");
    let parcel = Parcel::from(ParcelDraft {
        id: ParcelId::new(7),
        owner: UserId::random(),
        name: "Orchard".to_owned(),
        description: None,
        ring: PolygonRing::from_stored(to_closed_ring(&square)),
        created_at: at,
        updated_at: at,
    });

    assert_eq!(parcel.id().value(), 7);
    assert_eq!(parcel.ring().positions().len(), 5);
    assert_eq!(parcel.open_points(), square);
    assert_eq!(parcel.created_at(), parcel.updated_at());
}
