use std::fs;

use space_invaders::canvas::Rgb;
use space_invaders::config::*;

#[test]
fn defaults() {
    let config = GameConfig::default();
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.window.height, 720);
    assert_eq!(config.window.background_color, Rgb(30, 30, 30));
    assert_eq!(config.timing.fps, 60);
    assert_eq!(config.seed, None);
}

#[test]
fn partial_file_keeps_other_defaults() {
    let config = GameConfig::from_toml(
        r#"
seed = 5

[window]
width = 900
title = "Space Invaders"
background_color = [0, 0, 16]

[timing]
fps = 30
"#,
    )
    .unwrap();
    assert_eq!(config.seed, Some(5));
    assert_eq!(config.window.width, 900);
    assert_eq!(config.window.height, 720);
    assert_eq!(config.window.title, "Space Invaders");
    assert_eq!(config.window.background_color, Rgb(0, 0, 16));
    assert_eq!(config.timing.fps, 30);
}

#[test]
fn empty_file_is_all_defaults() {
    assert_eq!(GameConfig::from_toml("").unwrap(), GameConfig::default());
}

#[test]
fn written_config_reads_back() {
    let mut config = GameConfig::default();
    config.window.title = "Sandbox Demo".to_string();
    config.seed = Some(99);
    let text = config.to_toml().unwrap();
    assert_eq!(GameConfig::from_toml(&text).unwrap(), config);
}

#[test]
fn load_from_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.toml");
    fs::write(&path, "[timing]\nfps = 144\n").unwrap();
    let config = GameConfig::load_from_file(&path).unwrap();
    assert_eq!(config.timing.fps, 144);
}

#[test]
fn wrong_type_is_a_parse_error() {
    let err = GameConfig::from_toml("[window]\nwidth = \"wide\"\n").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn other_extensions_are_rejected() {
    let err = GameConfig::load_from_file("game.json").unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = GameConfig::load_from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
