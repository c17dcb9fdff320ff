use bmgen_engine::{
    ByteLength, Driver, Error, GeneratorConfig, OperatorWeight, PrefixRule, Profile, RngKind,
};
use std::io::Write;
use tracing::info;

#[test]
fn test_default_config() {
    bmgen_common::logging::ensure_test_logging(None);
    info!("Running test");
    let config = GeneratorConfig::default();

    assert_eq!(config.byte_length, ByteLength::Skewed { scale: 1000 });
    assert_eq!(config.terminate_threshold, 0.4);
    assert!(config.bound_chains);
    assert!(config.prefix_at_depth_cap);
}

#[test]
fn test_config_with_custom_values() {
    bmgen_common::logging::ensure_test_logging(None);
    info!("Running test");
    let config = GeneratorConfig::default()
        .with_decimal_threshold(0.7)
        .with_paren_threshold(0.8)
        .with_max_depth(2)
        .with_operators(vec![OperatorWeight::new(">>", 1.0), OperatorWeight::new("<<", 1.0)])
        .with_prefixes(vec![PrefixRule::new(0.9, "~")]);

    assert_eq!(config.decimal_threshold, 0.7);
    assert_eq!(config.paren_threshold, 0.8);
    assert_eq!(config.max_depth, 2);

    let driver = Driver::new(Profile { rng: RngKind::Mt19937, generator: config }).unwrap();
    for expr in driver.expressions(0, 200) {
        assert!(!expr.contains('-') && !expr.contains('+'), "{expr}");
        assert!(!expr.contains('^') && !expr.contains('&') && !expr.contains('|'), "{expr}");
    }
}

#[test]
fn test_profile_file_round_trip() {
    bmgen_common::logging::ensure_test_logging(None);
    info!("Running test");
    let profile = Profile {
        rng: RngKind::Std,
        generator: GeneratorConfig::default().with_terminate_threshold(0.6),
    };

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(toml::to_string_pretty(&profile).unwrap().as_bytes()).unwrap();
    drop(file);

    let loaded = Profile::load(path.to_str().unwrap()).unwrap();
    assert_eq!(loaded, profile);
}

#[test]
fn test_invalid_profile_file_is_rejected_by_driver() {
    bmgen_common::logging::ensure_test_logging(None);
    info!("Running test");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[generator]\nmin_bytes = 0\n").unwrap();

    let profile = Profile::load(path.to_str().unwrap()).unwrap();
    let err = Driver::new(profile).unwrap_err();
    assert!(matches!(err, Error::InvalidByteRange { min: 0, .. }));
}

#[test]
fn test_non_terminating_profiles_are_rejected() {
    bmgen_common::logging::ensure_test_logging(None);
    info!("Running test");
    let endless_toml = "[generator]\nbound_chains = false\nterminate_threshold = 1.0\n";
    let endless = Profile::from_toml("endless", endless_toml).unwrap();
    let err = Driver::new(endless).unwrap_err();
    assert!(matches!(err, Error::UnboundedChains { .. }));

    let deep =
        Profile::from_toml("deep", "[generator]\nmax_depth = 4294967295\nparen_threshold = 0.0\n")
            .unwrap();
    let err = Driver::new(deep).unwrap_err();
    assert!(matches!(err, Error::DepthTooLarge { max_depth: u32::MAX, .. }));
}
