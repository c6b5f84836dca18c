//! String-level address algebra through `CoordSystem`.

use hexframe::{Coord, CoordSystem, Direction};

use crate::helpers::coord;

#[test]
fn test_create_and_parse_ids() {
    for id in ["1,0", "1,0:1", "1,0:1,-1", "1,0:-3", "42,7:0,6,-6,2"] {
        let parsed = CoordSystem::parse_id(id).expect("Failed to parse id");
        assert_eq!(CoordSystem::create_id(&parsed), id);
    }
}

#[test]
fn test_malformed_ids_are_rejected() {
    for id in ["", "1", ",0", "1,x", "1,0:a", "1,0:1,,2", "1,0:1;2"] {
        let err = CoordSystem::parse_id(id).expect_err(id);
        assert!(err.is_malformed_address(), "{id}: {err}");
        assert_eq!(err.id(), id);
    }
}

#[test]
fn test_depth_from_id() {
    assert_eq!(CoordSystem::get_depth_from_id("1,0").unwrap(), 0);
    assert_eq!(CoordSystem::get_depth_from_id("1,0:3,-2,0").unwrap(), 3);
    assert!(CoordSystem::get_depth_from_id("oops").is_err());
}

#[test]
fn test_parent_child_inverse_across_families() {
    let parent = coord("5,2:4,-1");
    for child in CoordSystem::get_child_coords(&parent, true)
        .into_iter()
        .chain(CoordSystem::get_composed_child_coords(&parent))
    {
        assert_eq!(CoordSystem::get_parent_coord(&child), Some(parent.clone()));
        assert!(CoordSystem::is_descendant(&child.to_string(), &parent.to_string()).unwrap());
        assert!(CoordSystem::is_ancestor(&parent.to_string(), &child.to_string()).unwrap());
    }
}

#[test]
fn test_child_listings() {
    let root = Coord::root("1", 0);

    let structural = CoordSystem::get_child_coords(&root, false);
    assert_eq!(structural.len(), 6);
    assert_eq!(structural[0], coord("1,0:1"));
    assert_eq!(structural[5], coord("1,0:6"));

    let with_center = CoordSystem::get_child_coords(&root, true);
    assert_eq!(with_center.len(), 7);
    assert_eq!(with_center[0], coord("1,0:0"));

    let composed = CoordSystem::get_composed_child_coords_from_id("1,0:2").unwrap();
    let ids: Vec<String> = composed.iter().map(Coord::to_string).collect();
    assert_eq!(
        ids,
        vec!["1,0:2,-1", "1,0:2,-2", "1,0:2,-3", "1,0:2,-4", "1,0:2,-5", "1,0:2,-6"]
    );

    assert_eq!(
        CoordSystem::get_composition_coord_from_id("1,0:2").unwrap(),
        coord("1,0:2,0")
    );
}

#[test]
fn test_descendant_is_prefix_based() {
    assert!(CoordSystem::is_descendant("1,0:1,2,3", "1,0:1").unwrap());
    assert!(CoordSystem::is_descendant("1,0:1,-2", "1,0").unwrap());
    assert!(!CoordSystem::is_descendant("1,0:1", "1,0:1").unwrap());
    assert!(!CoordSystem::is_descendant("1,0:12", "1,0:1").unwrap());
    assert!(!CoordSystem::is_descendant("2,0:1,2", "1,0:1").unwrap());
    assert!(!CoordSystem::is_descendant("1,1:1,2", "1,0:1").unwrap());
}

#[test]
fn test_siblings_stay_in_their_family() {
    let structural = CoordSystem::get_siblings_from_id("1,0:3,2").unwrap();
    assert_eq!(structural.len(), 5);
    assert!(!structural.contains(&"1,0:3,2".to_string()));
    assert!(structural.iter().all(|id| !id.contains('-')));

    let composed = CoordSystem::get_siblings_from_id("1,0:3,-2").unwrap();
    assert_eq!(composed.len(), 5);
    assert!(composed.contains(&"1,0:3,-6".to_string()));
    assert!(!composed.contains(&"1,0:3,4".to_string()));

    assert!(CoordSystem::get_siblings_from_id("1,0").unwrap().is_empty());
}

#[test]
fn test_composed_child_detection() {
    assert!(CoordSystem::is_composed_child_id("1,0:-1").unwrap());
    assert!(CoordSystem::is_composed_child_id("1,0:2,-1,4").unwrap());
    assert!(!CoordSystem::is_composed_child_id("1,0:2,0,4").unwrap());
    assert!(!CoordSystem::is_composed_child(&Coord::root("1", 0)));
}

#[test]
fn test_direction_of_root_is_center() {
    assert_eq!(
        CoordSystem::get_direction(&Coord::root("9", 9)),
        Direction::CENTER
    );
    assert_eq!(
        CoordSystem::get_direction(&coord("9,9:4,-5")),
        Direction::COMPOSED_SOUTH_WEST
    );
}

#[test]
fn test_descendant_prefix_matches_descendants() {
    let prefix = CoordSystem::descendant_prefix(&coord("1,0:3"));
    assert_eq!(prefix, "1,0:3,");
    assert!("1,0:3,-1".starts_with(&prefix));
    assert!(!"1,0:31".starts_with(&prefix));

    assert_eq!(CoordSystem::descendant_prefix(&Coord::root("1", 0)), "1,0:");
}
