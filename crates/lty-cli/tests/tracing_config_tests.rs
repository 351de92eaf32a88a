use super::*;

#[test]
fn test_no_request_means_no_subscriber() {
    assert_eq!(filter_directives(None, 0), None);
    assert_eq!(filter_directives(Some("  "), 0), None);
}

#[test]
fn test_verbosity_is_scoped_to_lty_crates() {
    assert_eq!(
        filter_directives(None, 1).as_deref(),
        Some("lty_solver=debug,lty_cli=debug")
    );
    assert_eq!(
        filter_directives(None, 2).as_deref(),
        Some("lty_solver=trace,lty_cli=trace")
    );
    assert_eq!(filter_directives(None, 5), filter_directives(None, 2));
}

#[test]
fn test_lty_log_level_is_scoped_and_wins_over_verbosity() {
    assert_eq!(
        filter_directives(Some("warn"), 2).as_deref(),
        Some("lty_solver=warn,lty_cli=warn")
    );
}

#[test]
fn test_lty_log_directives_pass_through() {
    assert_eq!(
        filter_directives(Some("lty_solver::subtype=trace"), 0).as_deref(),
        Some("lty_solver::subtype=trace")
    );
}

#[test]
fn test_log_format_names() {
    assert_eq!(LogFormat::from_str("tree", true), Ok(LogFormat::Tree));
    assert_eq!(LogFormat::from_str("JSON", true), Ok(LogFormat::Json));
    assert!(LogFormat::from_str("xml", true).is_err());
    assert_eq!(LogFormat::default(), LogFormat::Text);
}
