use std::fs;
use std::rc::Rc;

use image::RgbaImage;

use space_invaders::assets::*;

fn asset_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    RgbaImage::new(2, 3).save(dir.path().join("ship.png")).unwrap();
    fs::create_dir(dir.path().join("fonts")).unwrap();
    let mut font = vec![0x00, 0x01, 0x00, 0x00];
    font.extend_from_slice(&[0u8; 60]);
    fs::write(dir.path().join("fonts/mono.ttf"), font).unwrap();
    dir
}

// ── Images ────────────────────────────────────────────────────────────────────

#[test]
fn image_loads_and_decodes() {
    let dir = asset_dir();
    let mut assets = AssetLoader::new(dir.path());
    let ship = assets.image("ship.png").unwrap();
    assert_eq!(ship.dimensions(), (2, 3));
}

#[test]
fn image_is_cached_by_resolved_path() {
    let dir = asset_dir();
    let mut assets = AssetLoader::new(dir.path());
    let first = assets.image("ship.png").unwrap();
    let second = assets.image("./fonts/../ship.png").unwrap();
    assert!(Rc::ptr_eq(&first, &second));
}

#[test]
fn missing_image_is_an_io_error() {
    let dir = asset_dir();
    let mut assets = AssetLoader::new(dir.path());
    let err = assets.image("nope.png").unwrap_err();
    assert!(matches!(err, AssetError::Io { .. }));

    // failures are not cached
    RgbaImage::new(1, 1).save(dir.path().join("nope.png")).unwrap();
    assert_eq!(assets.image("nope.png").unwrap().dimensions(), (1, 1));
}

#[test]
fn corrupt_image_is_a_decode_error() {
    let dir = asset_dir();
    fs::write(dir.path().join("bad.png"), b"not a png").unwrap();
    let mut assets = AssetLoader::new(dir.path());
    let err = assets.image("bad.png").unwrap_err();
    assert!(matches!(err, AssetError::Image { .. }));
}

// ── Fonts ─────────────────────────────────────────────────────────────────────

#[test]
fn font_is_cached_per_size() {
    let dir = asset_dir();
    let mut assets = AssetLoader::new(dir.path());
    let small = assets.font("fonts/mono.ttf", 18).unwrap();
    let again = assets.font("fonts/mono.ttf", 18).unwrap();
    let large = assets.font("fonts/mono.ttf", 24).unwrap();
    assert!(Rc::ptr_eq(&small, &again));
    assert!(!Rc::ptr_eq(&small, &large));
    assert_eq!(large.size, 24);
}

#[test]
fn non_font_file_is_rejected() {
    let dir = asset_dir();
    let mut assets = AssetLoader::new(dir.path());
    let err = assets.font("ship.png", 18).unwrap_err();
    assert!(matches!(err, AssetError::UnsupportedFont(_)));
}

#[test]
fn resolve_stays_under_root() {
    let dir = asset_dir();
    let assets = AssetLoader::new(dir.path());
    let resolved = assets.resolve("ship.png");
    assert!(resolved.ends_with("ship.png"));
    assert!(resolved.is_absolute());
}
