use climacheck_core::config::*;

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = ClimacheckConfig::from_toml("").unwrap();

    // Retrieval defaults
    assert!(config.retrieval.passages_path.is_none());
    assert!(config.retrieval.concept_index_path.is_none());
    assert_eq!(config.retrieval.hybrid_retrieval_top_k, 5);
    assert_eq!(config.retrieval.semantic_search_top_k, 5);

    // Embedding defaults
    assert_eq!(config.embedding.provider, EmbeddingProviderKind::Http);
    assert_eq!(config.embedding.dimensions, 1536);
    assert_eq!(config.embedding.api_key_env, "AZURE_OPENAI_API_KEY");

    // Entailment defaults
    assert_eq!(config.entailment.endpoint_env, "AZURE_INFERENCE_ENDPOINT");

    // Remote defaults
    assert_eq!(config.remote.max_concurrency, 10);
    assert_eq!(config.remote.request_timeout_secs, 30);

    // Observability defaults
    assert_eq!(config.observability.log_level, "info");
    assert!(!config.observability.json_logs);
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[retrieval]
passages_path = "data/passages.jsonl"
semantic_search_top_k = 8

[embedding]
provider = "hashed"
dimensions = 64

[remote]
max_concurrency = 4
"#;
    let config = ClimacheckConfig::from_toml(toml).unwrap();
    assert_eq!(
        config.retrieval.passages_path.as_deref(),
        Some(std::path::Path::new("data/passages.jsonl"))
    );
    assert_eq!(config.retrieval.semantic_search_top_k, 8);
    // Non-overridden fields keep defaults
    assert_eq!(config.retrieval.hybrid_retrieval_top_k, 5);
    assert_eq!(config.embedding.provider, EmbeddingProviderKind::Hashed);
    assert_eq!(config.embedding.dimensions, 64);
    assert_eq!(config.remote.max_concurrency, 4);
    assert_eq!(config.remote.request_timeout_secs, 30);
}

#[test]
fn config_roundtrips_through_toml() {
    let mut config = ClimacheckConfig::default();
    config.retrieval.concept_index_path = Some("idx.json".into());
    config.observability.json_logs = true;
    let text = config.to_toml().unwrap();
    let back = ClimacheckConfig::from_toml(&text).unwrap();
    assert_eq!(back.retrieval.concept_index_path, config.retrieval.concept_index_path);
    assert!(back.observability.json_logs);
}

#[test]
fn malformed_toml_is_config_error() {
    let err = ClimacheckConfig::from_toml("[retrieval\nfoo = ").unwrap_err();
    assert!(matches!(err, climacheck_core::ClimacheckError::ConfigError(_)));
}

#[test]
fn resolve_requires_both_paths() {
    let config = ClimacheckConfig::from_toml(
        r#"
[retrieval]
passages_path = "p.jsonl"
"#,
    )
    .unwrap();
    assert!(config.retrieval.resolve().is_err());
}
