use fv_field::{Field, FieldSample, FieldSet, GridField, NO_FIELD_NAME};
use fv_math::{dvec3, Point3, Vector3};

fn constant(name: &str, min: Point3, max: Point3, value: Vector3) -> GridField {
    GridField::from_fn(name, min, max, [3, 3, 3], |_| value).unwrap()
}

fn nested() -> FieldSet {
    [
        constant("coarse", Point3::ZERO, Point3::splat(10.0), Vector3::X),
        constant("fine", Point3::splat(4.0), Point3::splat(6.0), Vector3::Y),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_last_added_grid_wins_inside_its_bounds() {
    let set = nested();
    let inner = dvec3(5.0, 5.0, 5.0);
    assert_eq!(set.field_name_at(inner), "fine");
    assert!((set.field_at(inner) - Vector3::Y).length() < 1e-12);

    let outer = dvec3(1.0, 1.0, 1.0);
    assert_eq!(set.field_name_at(outer), "coarse");
    assert!((set.field_at(outer) - Vector3::X).length() < 1e-12);

    let names: Vec<&str> = set.grids().map(|g| g.name()).collect();
    assert_eq!(names, ["coarse", "fine"]);
}

#[test]
fn test_outside_every_grid() {
    let set = nested();
    let p = dvec3(20.0, 0.0, 0.0);
    assert_eq!(set.field_name_at(p), NO_FIELD_NAME);
    assert!(!set.field_at(p).is_defined());
}

#[test]
fn test_bounds_cover_all_grids() {
    let mut set = nested();
    set.add(constant("far", dvec3(20.0, 20.0, 20.0), dvec3(30.0, 30.0, 30.0), Vector3::Z));
    assert_eq!(set.len(), 3);
    assert_eq!(set.bounds().min(), Point3::ZERO);
    assert_eq!(set.bounds().max(), Point3::splat(30.0));
}

#[test]
fn test_empty_set() {
    let set = FieldSet::new();
    assert!(set.is_empty());
    assert!(set.bounds().is_empty());
    assert_eq!(set.field_name_at(Point3::ZERO), NO_FIELD_NAME);
}
