use wt_sight_editor::{
    load_calibration_file, BuildInfo, CalibrationModel, CalibrationXmlEncoder, EncodeError,
    EncoderOptions, GeneralSettings, SightModel, SightTextEncoder, Vehicle,
};

fn calibration() -> CalibrationModel {
    CalibrationModel::new(Vehicle::new("ussr_t_34_1941", 35.0, 9.0))
}

#[test]
fn test_calibration_encoder_rejects_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xml");
    let encoder = CalibrationXmlEncoder::default();

    let err = encoder.encode(None, Some(&path)).unwrap_err();
    assert!(matches!(err, EncodeError::InvalidInput));
    assert!(!path.exists());

    let model = calibration();
    let err = encoder.encode(Some(&model), None).unwrap_err();
    assert!(matches!(err, EncodeError::InvalidDestination));
}

#[test]
fn test_sight_encoder_rejects_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sight.blk");
    let encoder = SightTextEncoder::default();
    let sight = SightModel::with_defaults(GeneralSettings::default());

    let err = encoder.encode(None, None, Some(&path)).unwrap_err();
    assert!(matches!(err, EncodeError::InvalidInput));
    let err = encoder.encode(Some(&sight), None, None).unwrap_err();
    assert!(matches!(err, EncodeError::InvalidDestination));
    assert!(!path.exists());
}

#[test]
fn test_unwritable_destination_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fehlt").join("out.xml");
    let model = calibration();

    let err = CalibrationXmlEncoder::default()
        .encode(Some(&model), Some(&path))
        .unwrap_err();
    match err {
        EncodeError::Io { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("Io-Fehler erwartet, erhalten: {:?}", other),
    }
}

#[test]
fn test_sight_encoder_unwritable_destination_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fehlt").join("sight.blk");
    let sight = SightModel::with_defaults(GeneralSettings::default());

    let err = SightTextEncoder::default()
        .encode(Some(&sight), None, Some(&path))
        .unwrap_err();
    match err {
        EncodeError::Io { path: failed, .. } => assert_eq!(failed, path),
        other => panic!("Io-Fehler erwartet, erhalten: {:?}", other),
    }
    assert!(!path.exists());
}

#[test]
fn test_sight_encoder_overwrites_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sight.blk");
    std::fs::write(&path, "alter Inhalt\n").unwrap();

    let sight = SightModel::with_defaults(GeneralSettings::default());
    let calibration = calibration();
    SightTextEncoder::new(BuildInfo::new("WTSightEdit", "1.0"))
        .encode(Some(&sight), Some(&calibration), Some(&path))
        .expect("Export fehlgeschlagen");

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("// created with WTSightEdit 1.0\n// vehicle = ussr_t_34_1941\n"));
    assert!(!text.contains("alter Inhalt"));
}

#[test]
fn test_calibration_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calibration.xml");
    let mut model = calibration();
    model
        .images
        .insert("ref".into(), image::DynamicImage::new_rgb8(8, 8));

    CalibrationXmlEncoder::new(EncoderOptions::default())
        .encode(Some(&model), Some(&path))
        .expect("Export fehlgeschlagen");
    let loaded = load_calibration_file(&path).expect("Laden fehlgeschlagen");

    assert_eq!(loaded.vehicle, model.vehicle);
    assert_eq!(loaded.images.len(), 1);
}
