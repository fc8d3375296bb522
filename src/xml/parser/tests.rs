use super::markers::{parse_marker_ranges, parse_point};
use super::*;
use glam::IVec2;

#[test]
fn test_parse_point_accepts_both_separators() {
    assert_eq!(parse_point("12,-4").unwrap(), IVec2::new(12, -4));
    assert_eq!(parse_point("12, -4").unwrap(), IVec2::new(12, -4));
    assert!(parse_point("12").is_err());
    assert!(parse_point("1,2,3").is_err());
    assert!(parse_point("a,b").is_err());
}

#[test]
fn test_marker_ranges_sorted_by_index_not_text() {
    let attrs: HashMap<String, String> = (0..12)
        .map(|i| (format!("marker_{}", i), format!("{}, {}", i, i * 10)))
        .collect();

    let ranges = parse_marker_ranges(&attrs).unwrap();
    assert_eq!(ranges.len(), 12);
    assert_eq!(ranges[2], IVec2::new(2, 20));
    assert_eq!(ranges[10], IVec2::new(10, 100));
}

#[test]
fn test_marker_ranges_reject_gaps() {
    let attrs: HashMap<String, String> = [
        ("marker_0".to_string(), "1, 1".to_string()),
        ("marker_2".to_string(), "2, 2".to_string()),
    ]
    .into_iter()
    .collect();

    let err = parse_marker_ranges(&attrs).expect_err("Luecke muss abgelehnt werden");
    assert!(format!("{err:#}").contains("Marker-Index 1 fehlt"));
}

#[test]
fn test_parse_handwritten_calibration() {
    let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
    <ballisticData>
      <ussr_t_34_1941 fovOut="40.0" fovIn="12.5">
        <ammo>
          <br_350a zoomedIn="false" imageName="shot_a" markerCenter="800,450">
            <markerRanges marker_0="800, 430" marker_1="800, 410"/>
          </br_350a>
          <of_350m zoomedIn="true" imageName="shot_b" markerCenter="801,451">
            <markerRanges/>
          </of_350m>
        </ammo>
        <images/>
      </ussr_t_34_1941>
    </ballisticData>
    "#;

    let model = parse_calibration_xml(xml).expect("Parsing fehlgeschlagen");
    assert_eq!(model.vehicle.name, "ussr_t_34_1941");
    assert_eq!(model.vehicle.fov_out, 40.0);
    assert_eq!(model.vehicle.fov_in, 12.5);

    let names: Vec<&str> = model.ammo.iter().map(|a| a.ammo_name.as_str()).collect();
    assert_eq!(names, vec!["br_350a", "of_350m"]);
    assert!(!model.ammo[0].zoomed_in);
    assert_eq!(
        model.ammo[0].marker_ranges,
        vec![IVec2::new(800, 430), IVec2::new(800, 410)]
    );
    assert!(model.ammo[1].zoomed_in);
    assert!(model.ammo[1].marker_ranges.is_empty());
    assert!(model.images.is_empty());
}

#[test]
fn test_parse_fails_for_wrong_root() {
    let err = parse_calibration_xml("<sightData><x fovOut=\"1\" fovIn=\"1\"/></sightData>")
        .expect_err("Parser sollte fehlschlagen");
    assert!(format!("{err:#}").contains("Unerwartetes Wurzelelement"));
}

#[test]
fn test_parse_fails_for_bad_zoom_flag() {
    let xml = r#"
    <ballisticData>
      <tank fovOut="40" fovIn="10">
        <ammo>
          <shell zoomedIn="vielleicht" imageName="i" markerCenter="1,1"/>
        </ammo>
      </tank>
    </ballisticData>
    "#;
    let err = parse_calibration_xml(xml).expect_err("Parser sollte fehlschlagen");
    assert!(format!("{err:#}").contains("kein Wahrheitswert"));
}

#[test]
fn test_parse_fails_without_vehicle() {
    let err = parse_calibration_xml("<ballisticData/>").expect_err("Parser sollte fehlschlagen");
    assert!(format!("{err:#}").contains("Kein Fahrzeug-Element"));
}
