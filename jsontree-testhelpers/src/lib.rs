#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

use std::sync::LazyLock;
use std::time::Instant;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding a target filter such as `jsontree=debug`.
pub const LOG_ENV: &str = "JSONTREE_LOG";

static START_TIME: LazyLock<Instant> = LazyLock::new(Instant::now);

struct Uptime;

impl FormatTime for Uptime {
    fn format_time(&self, w: &mut Writer<'_>) -> core::fmt::Result {
        let elapsed = START_TIME.elapsed();
        write!(w, "{:4}.{:03}s", elapsed.as_secs(), elapsed.subsec_millis())
    }
}

/// Lazy initialization of the global tracing subscriber.
///
/// The filter comes from [`LOG_ENV`] when it parses as a target list, so
/// `JSONTREE_LOG=jsontree::builder=debug` silences the converter's traces.
static SUBSCRIBER_INIT: LazyLock<()> = LazyLock::new(|| {
    // Start the uptime clock before the first event is formatted
    let _ = *START_TIME;

    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|s| s.parse::<Targets>().ok())
        .unwrap_or_else(|| Targets::new().with_default(tracing::Level::TRACE));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_test_writer()
                .with_timer(Uptime)
                .with_target(false)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .ok();
});

/// Set up a tracing subscriber for tests.
///
/// Safe to call from every test: the subscriber is installed once per process,
/// and later calls do nothing. Output goes through the test harness capture,
/// so it only shows for failing tests (or with `--nocapture`).
///
/// Under plain `cargo test` all tests share one process, so a test's events
/// can interleave with its neighbours'. `cargo nextest run` runs each test in
/// its own process and keeps the output apart; a one-time hint says so.
pub fn setup() {
    let is_nextest = std::env::var("NEXTEST").as_deref() == Ok("1");
    if !is_nextest {
        static NEXTEST_HINT: LazyLock<()> = LazyLock::new(|| {
            eprintln!("hint: `cargo nextest run` keeps per-test tracing output separate");
        });
        #[allow(clippy::let_unit_value)]
        let _ = *NEXTEST_HINT;
    }

    #[allow(clippy::let_unit_value)]
    let _ = *SUBSCRIBER_INIT;
}
