//! Basic usage outside an editor host: everything goes to the console.

use host_logger::prelude::*;
use host_logger::{debug, info, warn};
use serde_json::json;

fn main() {
    let factory = LoggerFactory::headless();
    let logger = factory.create_with_level("Demo", "debug");

    info!(logger, "Extension activated");
    debug!(logger, "Indexed {} files", 128);
    warn!(logger, "Slow request"; json!({"method": "textDocument/hover", "ms": 1200}));

    logger.set_level_from_text("warning");
    logger.info("not shown");
    logger.error("shown");

    println!("valid levels: {}", host_logger::core::severity::valid_tokens().join(", "));

    let contents = tokio_test::block_on(logger.get_log_contents());
    println!("log contents available: {} ({:?})", contents.success, contents.error);

    logger.dispose();
}
