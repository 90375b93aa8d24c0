use super::*;
use crate::backend::headless::HeadlessBackend;

#[test]
fn register_is_exclusive_per_kind() {
    let mut registry = BackendRegistry::new();
    registry.register(Box::new(HeadlessBackend::new())).unwrap();
    assert!(registry.contains(BackendKind::HEADLESS));
    let err = registry
        .register(Box::new(HeadlessBackend::new()))
        .unwrap_err();
    assert!(matches!(err, VistraError::Validation(_)));
    assert_eq!(registry.kinds().count(), 1);
}

#[test]
fn get_mut_reports_unknown_kinds() {
    let mut registry = BackendRegistry::new();
    let err = registry.get_mut(BackendKind("wgpu")).unwrap_err();
    assert!(matches!(err, VistraError::UnsupportedBackend(_)));
    assert!(err.to_string().contains("wgpu"));
}

#[test]
fn headless_is_always_available() {
    let backend = create_backend(BackendKind::HEADLESS).unwrap();
    assert_eq!(backend.kind(), BackendKind::HEADLESS);
    assert!(!backend.interactive());
}

#[test]
fn unknown_builtin_kinds_are_unsupported() {
    let err = create_backend(BackendKind("metal")).unwrap_err();
    assert!(matches!(err, VistraError::UnsupportedBackend(_)));
}

#[test]
fn kind_displays_its_name() {
    assert_eq!(BackendKind::HEADLESS.to_string(), "headless");
    assert_eq!(BackendKind("wgpu").to_string(), "wgpu");
}
