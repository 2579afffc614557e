use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn empty_environment_yields_defaults() {
    let cfg = StreamConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, StreamConfig::default());
    assert_eq!(cfg.port, 8000);
    assert_eq!(cfg.jpeg_quality, 80);
    assert_eq!(cfg.scene.width, 1280);
    assert_eq!(cfg.scene.height, 720);
}

#[test]
fn overrides_are_parsed() {
    let cfg = StreamConfig::from_lookup(lookup_from(&[
        ("PORT", "9100"),
        ("JWT_SECRET", "s3cret"),
        ("JWT_EXPIRE_MINUTES", "5"),
        ("STREAM_FPS", "30"),
        ("JPEG_QUALITY", "55"),
        ("FRAME_WIDTH", "320"),
        ("FRAME_HEIGHT", "240"),
        ("SYNTHETIC_SHAPES_COUNT", "3"),
        ("SITE_DIR", "/srv/site"),
    ]))
    .unwrap();

    assert_eq!(cfg.port, 9100);
    assert_eq!(cfg.jwt_secret, "s3cret");
    assert_eq!(cfg.jwt_expire_minutes, 5);
    assert!((cfg.fps - 30.0).abs() < f64::EPSILON);
    assert_eq!(cfg.jpeg_quality, 55);
    assert_eq!((cfg.scene.width, cfg.scene.height), (320, 240));
    assert_eq!(cfg.scene.shapes, 3);
    assert_eq!(cfg.site_dir, PathBuf::from("/srv/site"));
}

#[test]
fn reversed_ranges_are_swapped() {
    let cfg = StreamConfig::from_lookup(lookup_from(&[
        ("SHAPE_MIN_SIZE", "90"),
        ("SHAPE_MAX_SIZE", "10"),
        ("SHAPE_MIN_SPEED", "9.5"),
        ("SHAPE_MAX_SPEED", "1.5"),
    ]))
    .unwrap();

    assert_eq!((cfg.scene.min_size, cfg.scene.max_size), (10, 90));
    assert!((cfg.scene.min_speed - 1.5).abs() < f64::EPSILON);
    assert!((cfg.scene.max_speed - 9.5).abs() < f64::EPSILON);
}

#[test]
fn shape_count_and_fps_have_floors() {
    let cfg = StreamConfig::from_lookup(lookup_from(&[("SYNTHETIC_SHAPES_COUNT", "0"), ("STREAM_FPS", "0.2")])).unwrap();
    assert_eq!(cfg.scene.shapes, 1);
    assert!((cfg.fps - 1.0).abs() < f64::EPSILON);
    assert_eq!(cfg.frame_interval(), Duration::from_secs(1));
}

#[test]
fn jpeg_quality_is_clamped() {
    let high = StreamConfig::from_lookup(lookup_from(&[("JPEG_QUALITY", "250")])).unwrap();
    assert_eq!(high.jpeg_quality, 100);
    let low = StreamConfig::from_lookup(lookup_from(&[("JPEG_QUALITY", "-4")])).unwrap();
    assert_eq!(low.jpeg_quality, 1);
}

#[test]
fn unparseable_value_is_an_error() {
    let err = StreamConfig::from_lookup(lookup_from(&[("STREAM_FPS", "fast")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "STREAM_FPS", value: "fast".into() });
}

#[test]
fn zero_frame_dimension_is_an_error() {
    let err = StreamConfig::from_lookup(lookup_from(&[("FRAME_HEIGHT", "0")])).unwrap_err();
    assert_eq!(err, ConfigError::Zero { var: "FRAME_HEIGHT" });
}

#[test]
fn frame_interval_follows_fps() {
    let cfg = StreamConfig { fps: 4.0, ..StreamConfig::default() };
    assert_eq!(cfg.frame_interval(), Duration::from_millis(250));
}
