use anyhow::Context;

use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        PibError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        PibError::invalid_argument("x")
            .to_string()
            .contains("invalid argument:")
    );
    assert!(PibError::decode("x").to_string().contains("decode error:"));
    assert!(
        PibError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn http_error_names_status_and_url() {
    let err = PibError::Http {
        status: 404,
        url: "https://example.invalid/a.png".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "HTTP Error code 404 for url: https://example.invalid/a.png"
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = PibError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn report_walks_context_chain() {
    let res: Result<(), std::io::Error> = Err(std::io::Error::other("disk on fire"));
    let err = PibError::from(res.context("read asset 'assets/bg.png'").unwrap_err());
    let report = err.report();
    assert!(report.starts_with("read asset 'assets/bg.png'"));
    assert!(report.contains("caused by: disk on fire"));
}

#[test]
fn serde_json_errors_convert() {
    let err: PibError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
    assert!(matches!(err, PibError::Serde(_)));
}
