//! Shared test setup and test vectors for the Juno Cash crates.
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// Each lazy_static variable uses additional recursion
#![recursion_limit = "256"]

use std::{collections::HashSet, sync::Once};

use color_eyre::{config::Frame, section::PanicMessage};
use owo_colors::OwoColorize;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub mod prelude;
pub mod vectors;

static INIT: Once = Once::new();

/// The log filter used when `RUST_LOG` is unset.
///
/// The genesis checks log an error for every mismatch, and the negative tests
/// trigger those on purpose.
const DEFAULT_FILTER: &str = "warn,juno_chain::parameters::genesis=off";

/// Frames from the test harness and panic machinery, hidden from reports.
const HIDDEN_FRAME_PREFIXES: &[&str] = &[
    "std::panic",
    "std::thread::local",
    "core::ops::function::FnOnce::call_once",
    "core::result::Result",
    "<alloc::boxed::Box",
    "<std::panic::AssertUnwindSafe",
    "test::run_test_in_process",
    "test::assert_test_result",
    "proptest::",
];

/// Returned by [`init`], and bound to `_init_guard` in each test.
#[must_use]
pub struct InitGuard(());

/// Installs the tracing subscriber and the error report hooks, once per
/// process.
pub fn init() -> InitGuard {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_test_writer())
            .with(ErrorLayer::default())
            .init();

        color_eyre::config::HookBuilder::default()
            .add_frame_filter(Box::new(filter_frames))
            .panic_message(TestPanicMessage)
            .install()
            .expect("the report hooks are only installed once");
    });

    InitGuard(())
}

/// Drops repeated frames, and frames from the harness.
fn filter_frames(frames: &mut Vec<&Frame>) {
    let mut seen = HashSet::new();

    frames.retain(|frame| {
        if !seen.insert((frame.lineno, &frame.filename)) {
            return false;
        }

        match frame.name.as_deref() {
            Some(name) => !HIDDEN_FRAME_PREFIXES
                .iter()
                .any(|prefix| name.starts_with(prefix)),
            None => true,
        }
    });
}

/// Shortens the panic report for tests that returned an `Err`, because the
/// harness has already printed the error.
struct TestPanicMessage;

impl PanicMessage for TestPanicMessage {
    fn display(
        &self,
        info: &std::panic::PanicInfo<'_>,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let payload = info
            .payload()
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| info.payload().downcast_ref::<&str>().copied())
            .unwrap_or("<non string panic payload>");

        if payload.contains("the test returned a termination value with a non-zero status code") {
            return write!(f, "---- end of test output ----");
        }

        writeln!(f, "{}", "\nThe test panicked.".red())?;
        writeln!(f, "Message:  {}", payload.cyan())?;

        match info.location() {
            Some(location) => write!(
                f,
                "Location: {}:{}",
                location.file().purple(),
                location.line().purple()
            ),
            None => write!(f, "Location: <unknown>"),
        }
    }
}
