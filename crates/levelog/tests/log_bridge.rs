//! Routing `log` crate macros through an installed levelog logger.
//!
//! `log` accepts one global logger per process, so this binary has a single
//! test.

use levelog::testing::CaptureBuffer;
use levelog::{FileStyle, Flags, Level, Logger, Threshold};

#[test]
fn test_log_macros_route_through_wrappers() {
    let out = CaptureBuffer::new();
    let err = CaptureBuffer::new();
    let threshold = Threshold::new(Level::Info);

    let logger = Logger::builder()
        .stdout(out.clone())
        .stderr(err.clone())
        .threshold(threshold.clone())
        .flags(Flags::empty().with_file(FileStyle::Short))
        .init()
        .expect("no other logger installed");

    log::debug!("not shown");
    let line = line!() + 1;
    log::warn!("disk at {}%", 91);
    log::error!("write failed");

    assert_eq!(
        out.contents(),
        format!("WARNING: log_bridge.rs:{line} disk at 91%\n")
    );
    assert!(err.contents().starts_with("ERROR: log_bridge.rs:"));
    assert!(err.contents().ends_with(" write failed\n"));

    threshold.set(Level::Debug);
    out.take();
    log::trace!("now shown");
    assert!(out.contents().starts_with("DEBUG: "));

    // The leaked reference keeps the level fields usable.
    out.take();
    logger.info.print("direct");
    assert!(out.contents().ends_with(" direct\n"));

    // A second install is refused.
    assert!(Logger::builder().threshold(Threshold::new(Level::Info)).init().is_err());
}
