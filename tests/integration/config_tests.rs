//! Configuration loading from files and the environment

#[cfg(test)]
mod tests {
    use outpaint_rs::config::{API_KEY_ENV_VARS, Config};
    use outpaint_rs::core::providers::Provider;
    use std::io::Write;
    use std::path::PathBuf;

    const EXAMPLE: &str = include_str!("../../config/outpaint.yaml.example");

    #[test]
    fn test_example_config_parses() {
        let config = Config::from_yaml_str(EXAMPLE).unwrap();
        assert_eq!(config.provider.api_version, "v1beta");
        assert_eq!(config.storage.history_key, "outpaint_history");
        assert_eq!(config.api_key(), None);
        assert!(Provider::from_settings(&config.provider).is_ok());
    }

    #[tokio::test]
    async fn test_file_then_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"provider:\n  api_key: from-file\n  timeout_secs: 90\nstorage:\n  data_dir: /from/file\n",
        )
        .unwrap();

        let mut config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.api_key(), Some("from-file"));

        config
            .apply_env_with(|name| match name {
                "GEMINI_API_KEY" => Some("from-env".to_string()),
                "OUTPAINT_DATA_DIR" => Some("/from/env".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.api_key(), Some("from-env"));
        assert_eq!(config.data_dir(), PathBuf::from("/from/env"));
        assert_eq!(config.provider.timeout_secs, 90);
    }

    #[test]
    fn test_env_cannot_produce_invalid_config() {
        let mut config = Config::default();
        let result = config.apply_env_with(|name| match name {
            "OUTPAINT_BASE_URL" => Some("file:///etc/passwd".to_string()),
            _ => None,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_api_key_variables() {
        assert_eq!(API_KEY_ENV_VARS, ["GEMINI_API_KEY", "GOOGLE_API_KEY"]);
    }

    #[test]
    fn test_unknown_provider_type_rejected() {
        assert!(Config::from_yaml_str("provider:\n  type: dalle\n").is_err());
    }
}
