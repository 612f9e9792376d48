use std::sync::Arc;

use pic_bc::{BcError, BoundaryCondition, BoundaryFactory};
use pic_core::{Axis, BoundaryKind, Geometry, Side, Slot};
use pic_fields::{EmFields, GridLayout};
use proptest::prelude::*;

fn layout(geometry: Geometry) -> Arc<GridLayout> {
    let n = geometry.n_dim_field();
    Arc::new(GridLayout::new(geometry, &vec![8; n], &vec![0.2; n], 0.1, 2).unwrap())
}

#[test]
fn periodic_1d_leaves_both_slots_empty() {
    let layout = layout(Geometry::Cartesian1D);
    let set = BoundaryFactory::create(Geometry::Cartesian1D, &[["periodic", "periodic"]], &layout)
        .unwrap();
    assert_eq!(set.len(), 2);
    assert!(set.get(Slot::from_index(0)).is_none());
    assert!(set.get(Slot::from_index(1)).is_none());
    assert_eq!(set.kinds(), vec![BoundaryKind::Periodic; 2]);
    // only the caller's handle remains
    assert_eq!(Arc::strong_count(&layout), 1);
}

#[test]
fn silver_muller_then_reflective_in_1d() {
    let layout = layout(Geometry::Cartesian1D);
    let set = BoundaryFactory::create(
        Geometry::Cartesian1D,
        &[["silver-muller", "reflective"]],
        &layout,
    )
    .unwrap();
    assert!(matches!(
        set.get(Slot::from_index(0)),
        Some(BoundaryCondition::SilverMuller(_))
    ));
    assert!(matches!(
        set.get(Slot::from_index(1)),
        Some(BoundaryCondition::Reflective(_))
    ));
    assert_eq!(set.get(Slot::from_index(1)).unwrap().slot().side(), Side::Max);
}

#[test]
fn axes_are_independent_in_2d() {
    let layout = layout(Geometry::Cartesian2D);
    let set = BoundaryFactory::create(
        Geometry::Cartesian2D,
        &[["periodic", "periodic"], ["reflective", "silver-muller"]],
        &layout,
    )
    .unwrap();
    assert_eq!(
        set.kinds(),
        vec![
            BoundaryKind::Periodic,
            BoundaryKind::Periodic,
            BoundaryKind::Reflective,
            BoundaryKind::SilverMuller,
        ]
    );
}

#[test]
fn reflective_is_rejected_in_3d() {
    let layout = layout(Geometry::Cartesian3D);
    for axis in 0..3 {
        for side in Side::BOTH {
            let mut tokens = [["silver-muller", "silver-muller"]; 3];
            tokens[axis][side.index()] = "reflective";
            let err = BoundaryFactory::create(Geometry::Cartesian3D, &tokens, &layout).unwrap_err();
            assert_eq!(
                err,
                BcError::IllegalBoundary {
                    geometry: Geometry::Cartesian3D,
                    axis: Axis::new(axis),
                    side,
                    token: "reflective".into(),
                }
            );
            assert_eq!(Arc::strong_count(&layout), 1);
        }
    }
}

#[test]
fn cylindrical_inner_radial_slot_is_always_axis_symmetry() {
    let layout = layout(Geometry::Cylindrical);
    for inner in ["periodic", "reflective", "silver-muller", "anything at all"] {
        let set = BoundaryFactory::create(
            Geometry::Cylindrical,
            &[["silver-muller", "periodic"], [inner, "Buneman"]],
            &layout,
        )
        .unwrap();
        assert_eq!(
            set.kinds(),
            vec![
                BoundaryKind::SilverMuller,
                BoundaryKind::Periodic,
                BoundaryKind::AxisSymmetry,
                BoundaryKind::Buneman,
            ]
        );
        assert_eq!(
            set.get(Slot::new(Axis::R, Side::Min)).unwrap().kind(),
            BoundaryKind::AxisSymmetry
        );
    }
}

#[test]
fn cylindrical_outer_radial_slot_only_accepts_buneman() {
    let layout = layout(Geometry::Cylindrical);
    for outer in ["periodic", "reflective", "silver-muller", "buneman"] {
        let err = BoundaryFactory::create(
            Geometry::Cylindrical,
            &[["silver-muller", "silver-muller"], ["axis", outer]],
            &layout,
        )
        .unwrap_err();
        assert_eq!(
            err,
            BcError::IllegalBoundary {
                geometry: Geometry::Cylindrical,
                axis: Axis::R,
                side: Side::Max,
                token: outer.into(),
            }
        );
        // slots 0..=2 were built before the outer token was read
        assert_eq!(Arc::strong_count(&layout), 1);
    }
}

#[test]
fn cylindrical_longitudinal_axis_rejects_reflective() {
    let layout = layout(Geometry::Cylindrical);
    let err = BoundaryFactory::create(
        Geometry::Cylindrical,
        &[["reflective", "silver-muller"], ["axis", "Buneman"]],
        &layout,
    )
    .unwrap_err();
    assert!(matches!(err, BcError::IllegalBoundary { axis, .. } if axis == Axis::L));
}

#[test]
fn unknown_geometry_builds_nothing() {
    let layout = layout(Geometry::Cartesian2D);
    let err = BoundaryFactory::create_from_token(
        "2drz",
        &[["silver-muller", "silver-muller"]; 2],
        &layout,
    )
    .unwrap_err();
    assert_eq!(
        err,
        BcError::UnknownGeometry {
            token: "2drz".into()
        }
    );
    assert_eq!(Arc::strong_count(&layout), 1);
}

#[test]
fn successful_set_shares_the_layout() {
    let layout = layout(Geometry::Cartesian2D);
    let set = BoundaryFactory::create(
        Geometry::Cartesian2D,
        &[["silver-muller", "silver-muller"], ["reflective", "periodic"]],
        &layout,
    )
    .unwrap();
    assert_eq!(Arc::strong_count(&layout), 4);
    drop(set);
    assert_eq!(Arc::strong_count(&layout), 1);
}

#[test]
fn set_applies_only_to_matching_fields() {
    let layout = layout(Geometry::Cartesian1D);
    let set = BoundaryFactory::create(
        Geometry::Cartesian1D,
        &[["silver-muller", "silver-muller"]],
        &layout,
    )
    .unwrap();
    let mut fields = EmFields::new(&layout).unwrap();
    set.apply_all(&mut fields).unwrap();
    set.apply(&mut fields, Slot::from_index(1)).unwrap();

    let other = GridLayout::new(Geometry::Cartesian1D, &[12], &[0.2], 0.1, 2).unwrap();
    let mut wrong = EmFields::new(&other).unwrap();
    assert!(matches!(
        set.apply_all(&mut wrong),
        Err(BcError::FieldMismatch { .. })
    ));
}

fn token() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "periodic",
        "silver-muller",
        "reflective",
        "Buneman",
        "axis",
        "",
    ])
}

proptest! {
    #[test]
    fn failed_create_never_leaks(tokens in prop::collection::vec((token(), token()), 3)) {
        for geometry in Geometry::ALL {
            let layout = layout(geometry);
            let pairs: Vec<[&str; 2]> = tokens.iter().map(|(a, b)| [*a, *b]).collect();
            let result = BoundaryFactory::create(geometry, &pairs, &layout);
            match result {
                Ok(set) => {
                    prop_assert_eq!(set.len(), geometry.slot_count());
                    prop_assert_eq!(Arc::strong_count(&layout), 1 + set.iter().count());
                }
                Err(err) => {
                    prop_assert!(matches!(err, BcError::IllegalBoundary { .. }), "expected IllegalBoundary, got {:?}", err);
                    prop_assert_eq!(Arc::strong_count(&layout), 1);
                }
            }
        }
    }
}
