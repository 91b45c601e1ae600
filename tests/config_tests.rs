//! Configuration builder validation.

use std::path::Path;

use warraq::{PipelineConfig, PipelineError};

#[test]
fn builder_fills_in_defaults() {
    let config = PipelineConfig::builder().api_key("k").build().unwrap();

    assert_eq!(config.generation_model, "gemini-1.5-flash");
    assert_eq!(config.embedding_model, "embedding-001");
    assert_eq!(config.index_path, Path::new("persistent_db.json"));
}

#[test]
fn builder_honors_overrides() {
    let config = PipelineConfig::builder()
        .api_key("k")
        .index_path("/var/lib/warraq/index.json")
        .generation_model("gemini-1.5-pro")
        .embedding_model("text-embedding-004")
        .build()
        .unwrap();

    assert_eq!(config.generation_model, "gemini-1.5-pro");
    assert_eq!(config.embedding_model, "text-embedding-004");
    assert_eq!(config.index_path, Path::new("/var/lib/warraq/index.json"));
}

#[test]
fn missing_api_key_is_a_config_error() {
    let err = PipelineConfig::builder().build().unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}

#[test]
fn empty_api_key_is_a_config_error() {
    let err = PipelineConfig::builder().api_key("").build().unwrap_err();
    assert!(matches!(err, PipelineError::Config(_)));
}
