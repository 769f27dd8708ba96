use super::*;
use std::fs;
use tempfile::TempDir;

fn env(pairs: &[(&str, &str)]) -> EnvSnapshot {
    EnvSnapshot::from_pairs(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())))
}

#[test]
fn test_defaults_point_at_repository_root() {
    let repo = TempDir::new().unwrap();
    let config = HookConfig::load(repo.path(), None, &env(&[])).unwrap();

    assert!(!config.skip_hooks);
    assert!(!config.fail_on_error);
    assert_eq!(config.converter, DEFAULT_CONVERTER);
    assert_eq!(config.output_dir, repo.path());
}

#[test]
fn test_any_non_empty_skip_value_skips() {
    let repo = TempDir::new().unwrap();

    for value in ["1", "true", "false", "no"] {
        let config = HookConfig::load(repo.path(), None, &env(&[("SKIP_HOOKS", value)])).unwrap();
        assert!(config.skip_hooks, "SKIP_HOOKS={value} should skip");
    }

    let config = HookConfig::load(
        repo.path(),
        None,
        &env(&[("SWAGGER_TO_HTTP_SKIP_HOOKS", "yes")]),
    )
    .unwrap();
    assert!(config.skip_hooks);
}

#[test]
fn test_empty_skip_value_does_not_skip() {
    let repo = TempDir::new().unwrap();
    let config = HookConfig::load(repo.path(), None, &env(&[("SKIP_HOOKS", "")])).unwrap();
    assert!(!config.skip_hooks);
}

#[test]
fn test_prefixed_output_dir_wins() {
    let repo = TempDir::new().unwrap();
    let config = HookConfig::load(
        repo.path(),
        None,
        &env(&[
            ("OUTPUT_DIR", "plain"),
            ("SWAGGER_TO_HTTP_OUTPUT_DIR", "./prefixed"),
        ]),
    )
    .unwrap();

    assert_eq!(config.output_dir, repo.path().join("prefixed"));
}

#[test]
fn test_absolute_output_dir_is_kept() {
    let repo = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    let dir = elsewhere.path().to_string_lossy().to_string();

    let config = HookConfig::load(repo.path(), None, &env(&[("OUTPUT_DIR", dir.as_str())])).unwrap();
    assert_eq!(config.output_dir, elsewhere.path());
}

#[test]
fn test_repository_file_is_merged() {
    let repo = TempDir::new().unwrap();
    fs::write(
        repo.path().join(".swagger-to-http.toml"),
        "output_dir = \"http\"\nconverter = \"my-converter\"\nfail_on_error = true\n",
    )
    .unwrap();

    let config = HookConfig::load(repo.path(), None, &env(&[])).unwrap();
    assert_eq!(config.output_dir, repo.path().join("http"));
    assert_eq!(config.converter, "my-converter");
    assert!(config.fail_on_error);
}

#[test]
fn test_environment_overrides_file() {
    let repo = TempDir::new().unwrap();
    fs::write(
        repo.path().join(".swagger-to-http.yaml"),
        "output_dir: from-file\nfail_on_error: true\n",
    )
    .unwrap();

    let config = HookConfig::load(
        repo.path(),
        None,
        &env(&[
            ("OUTPUT_DIR", "from-env"),
            ("SWAGGER_TO_HTTP_FAIL_ON_ERROR", "0"),
            ("SWAGGER_TO_HTTP_CONVERTER", "/opt/bin/convert"),
        ]),
    )
    .unwrap();

    assert_eq!(config.output_dir, repo.path().join("from-env"));
    assert!(!config.fail_on_error);
    assert_eq!(config.converter, "/opt/bin/convert");
}

#[test]
fn test_explicit_config_file_must_exist() {
    let repo = TempDir::new().unwrap();
    let result = HookConfig::load(repo.path(), Some(Path::new("missing.toml")), &env(&[]));

    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("missing.toml"));
}

#[test]
fn test_explicit_config_file_rejects_unknown_format() {
    let repo = TempDir::new().unwrap();
    fs::write(repo.path().join("hooks.ini"), "skip_hooks = true").unwrap();

    let result = HookConfig::load(repo.path(), Some(Path::new("hooks.ini")), &env(&[]));
    assert!(result.is_err());
}

#[test]
fn test_parse_flag() {
    assert!(parse_flag("1"));
    assert!(parse_flag("TRUE"));
    assert!(parse_flag(" on "));
    assert!(!parse_flag("0"));
    assert!(!parse_flag("off"));
}
