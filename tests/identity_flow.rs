//! End-to-end train/compare with the thumbnail reference extractor.

#![cfg(feature = "thumbnail")]

use facemate::{
    BackendConfig, FaceStore, IdentityService, MatchConfig, ServiceError, ThumbnailExtractor,
};
use std::io::Cursor;
use std::sync::Arc;

fn png(img: image::GrayImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn horizontal_gradient() -> Vec<u8> {
    png(image::GrayImage::from_fn(64, 32, |x, _| {
        image::Luma([(x * 4) as u8])
    }))
}

fn vertical_gradient() -> Vec<u8> {
    png(image::GrayImage::from_fn(64, 32, |_, y| {
        image::Luma([(y * 8) as u8])
    }))
}

fn flat() -> Vec<u8> {
    png(image::GrayImage::from_pixel(64, 32, image::Luma([128])))
}

fn service(backend: &BackendConfig) -> IdentityService {
    let store = Arc::new(FaceStore::open(backend).unwrap());
    IdentityService::new(
        Arc::new(ThumbnailExtractor::default()),
        store,
        MatchConfig::default(),
    )
    .unwrap()
}

#[test]
fn trained_image_is_recognized() {
    let svc = service(&BackendConfig::in_memory());
    let receipt = svc.train(&horizontal_gradient(), "horizontal").unwrap();
    assert_eq!(receipt.dimensions, 128);
    svc.train(&vertical_gradient(), "vertical").unwrap();

    let hit = svc.compare(&horizontal_gradient()).unwrap();
    assert_eq!(hit.person_id, "horizontal");
    assert!(hit.distance < 1e-6);

    let hit = svc.compare(&vertical_gradient()).unwrap();
    assert_eq!(hit.person_id, "vertical");
}

#[test]
fn featureless_image_has_no_face() {
    let svc = service(&BackendConfig::in_memory());
    assert!(matches!(
        svc.train(&flat(), "nobody"),
        Err(ServiceError::NoFaceDetected)
    ));
    assert!(matches!(
        svc.compare(&flat()),
        Err(ServiceError::NoFaceDetected)
    ));
}

#[test]
fn garbage_bytes_are_invalid_images() {
    let svc = service(&BackendConfig::in_memory());
    let err = svc.train(b"definitely not an image", "x").unwrap_err();
    assert_eq!(err.code(), "INVALID_IMAGE");
}

#[test]
fn recognition_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let backend = BackendConfig::json_file(dir.path().join("faces.json"));

    service(&backend)
        .train(&horizontal_gradient(), "horizontal")
        .unwrap();

    let hit = service(&backend).compare(&horizontal_gradient()).unwrap();
    assert_eq!(hit.person_id, "horizontal");
}
