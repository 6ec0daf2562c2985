use super::*;

// =============================================================
// Config validation
// =============================================================

#[test]
fn valid_parts_accepted() {
    let config = Config::from_parts(Some("https://id.example.test"), Some("public-key"))
        .expect("valid config");
    assert_eq!(config.service_url, "https://id.example.test");
    assert_eq!(config.anon_key, "public-key");
}

#[test]
fn trailing_slash_trimmed_from_url() {
    let config = Config::from_parts(Some("https://id.example.test/"), Some("k")).expect("valid");
    assert_eq!(config.service_url, "https://id.example.test");
}

#[test]
fn missing_url_fails_fast() {
    let err = Config::from_parts(None, Some("k")).expect_err("must fail");
    assert_eq!(err, ConfigError::Missing(IDENTITY_URL_VAR));
}

#[test]
fn missing_key_fails_fast() {
    let err = Config::from_parts(Some("https://id.example.test"), None).expect_err("must fail");
    assert_eq!(err, ConfigError::Missing(IDENTITY_KEY_VAR));
}

#[test]
fn blank_values_rejected() {
    let err = Config::from_parts(Some("   "), Some("k")).expect_err("must fail");
    assert_eq!(err, ConfigError::Missing(IDENTITY_URL_VAR));

    let err = Config::from_parts(Some("https://id.example.test"), Some("")).expect_err("must fail");
    assert_eq!(err, ConfigError::Missing(IDENTITY_KEY_VAR));
}

#[test]
fn missing_value_error_names_the_variable() {
    let err = Config::from_parts(None, None).expect_err("must fail");
    assert!(err.to_string().contains(IDENTITY_URL_VAR));
}
