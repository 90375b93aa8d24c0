use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VistraError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(VistraError::cycle("x").to_string().contains("cycle error:"));
    assert!(VistraError::not_found("x").to_string().contains("not found:"));
    assert!(
        VistraError::unsupported_backend("x")
            .to_string()
            .contains("unsupported backend:")
    );
    assert!(
        VistraError::missing_adaptor("x")
            .to_string()
            .contains("missing adaptor capability:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VistraError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
