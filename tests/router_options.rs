use rose_router::router::DEFAULT_MAX_DEPTH;
use rose_router::{MemoryHistory, Router, RouterError, RouterOptions, RouterOptionsError};
use std::sync::Arc;

#[test]
fn router_options_when_default_constructed_then_uses_expected_values() {
    let options = RouterOptions::default();

    assert!(!options.case_sensitive);
    assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    assert!(options.validate().is_ok());
}

#[test]
fn router_options_when_all_fields_customized_then_values_are_assigned() {
    let options = RouterOptions::builder()
        .case_sensitive(true)
        .max_depth(8)
        .build()
        .expect("options should build");

    assert!(options.case_sensitive);
    assert_eq!(options.max_depth, 8);
}

#[test]
fn router_options_when_max_depth_zero_then_build_fails() {
    let err = RouterOptions::builder()
        .max_depth(0)
        .build()
        .expect_err("zero depth should be rejected");

    assert_eq!(err, RouterOptionsError::MaxDepthInvalid { provided: 0 });
}

#[test]
fn router_when_options_invalid_then_new_returns_error() {
    let options = RouterOptions {
        max_depth: 0,
        ..RouterOptions::default()
    };

    let err = Router::new(Arc::new(MemoryHistory::default()), Some(options))
        .expect_err("invalid options should be rejected");

    match err {
        RouterError::Options(RouterOptionsError::MaxDepthInvalid { provided }) => {
            assert_eq!(provided, 0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn router_when_options_given_then_they_are_kept() {
    let options = RouterOptions::builder()
        .case_sensitive(true)
        .build()
        .expect("options should build");

    let router = Router::new(Arc::new(MemoryHistory::default()), Some(options.clone()))
        .expect("router should build");

    assert_eq!(router.options(), &options);
    assert!(!router.is_running());
}
