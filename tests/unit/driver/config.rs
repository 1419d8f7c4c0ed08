use super::*;

#[test]
fn defaults_are_a_64x32_panel_at_30_fps() {
    let cfg = LoopConfig::default();
    assert_eq!((cfg.width, cfg.height, cfg.fps), (64, 32, 30));
    assert!(!cfg.debug_focus);
    assert_eq!(cfg.pacing, Pacing::Realtime);
    assert!(cfg.validate().is_ok());
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let cfg = LoopConfig::from_json_str(r#"{"fps": 60, "pacing": "fixed_step"}"#).unwrap();
    assert_eq!(cfg.fps, 60);
    assert_eq!(cfg.width, 64);
    assert_eq!(cfg.pacing, Pacing::FixedStep);
    assert_eq!(cfg.sink_config().fps, 60);
}

#[test]
fn invalid_configs_are_rejected_on_load() {
    let err = LoopConfig::from_json_str(r#"{"fps": 0}"#).unwrap_err();
    assert!(err.to_string().contains("fps"));
    assert!(LoopConfig::from_json_str(r#"{"width": 0}"#).is_err());
    assert!(LoopConfig::from_json_str(r#"{"colour": "red"}"#).is_err());
    assert!(LoopConfig::from_json_str("not json").is_err());
}

#[test]
fn frame_duration_follows_fps() {
    let cfg = LoopConfig {
        fps: 50,
        ..LoopConfig::default()
    };
    assert_eq!(cfg.frame_duration(), Duration::from_millis(20));
}

#[test]
fn from_json_file_reports_the_path() {
    let err = LoopConfig::from_json_file("/definitely/not/here.json").unwrap_err();
    assert!(format!("{err:#}").contains("/definitely/not/here.json"));
}
