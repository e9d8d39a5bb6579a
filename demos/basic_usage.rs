//! Basic logger usage example
//!
//! Reads LOG_LEVEL, SERVICE and VERSION from the environment, then logs at
//! every severity below CRITICAL.
//!
//! Run with: SERVICE=demo VERSION=1.0 LOG_LEVEL=debug cargo run --example basic_usage

use stackdriver_logger::prelude::*;
use stackdriver_logger::{info, warn};

fn handle_request(logger: &Logger, request_id: &str) {
    let logger = logger.with_fields([("request_id", request_id)]);

    logger.debug("parsing request");
    info!(logger, "request {} accepted", request_id);
    warn!(logger, "slow upstream: {}ms", 870);
    logger
        .with_field("upstream", "billing")
        .error("upstream returned 503");
}

fn main() {
    stackdriver_logger::core::config::init_from_env();
    let logger = Logger::new();

    logger.info("service starting");
    for id in ["req-1", "req-2"] {
        handle_request(&logger, id);
    }
    logger.metric("requests_handled=2");

    // Errors bypass the threshold even when the level is raised
    let quiet = logger.with_level(Severity::Error);
    quiet.info("not written");
    quiet.error("always written");
}
