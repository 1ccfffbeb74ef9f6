//! Console tracing setup for binaries and tests that use the opt crates.

use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Environment variable holding the console filter directives, used when no filter is set on the builder.
pub const CONSOLE_LOG_ENV: &str = "CONSOLE_LOG";

#[derive(Default)]
pub struct AppTracingBuilder {
  console_filter: Option<EnvFilter>,
  with_ansi: Option<bool>,
  test_writer: bool,
}
impl AppTracingBuilder {
  pub fn with_console_filter(mut self, console_filter: EnvFilter) -> Self {
    self.console_filter = Some(console_filter);
    self
  }

  pub fn with_ansi(mut self, with_ansi: bool) -> Self {
    self.with_ansi = Some(with_ansi);
    self
  }

  /// Writes through the test harness' captured output instead of stderr.
  pub fn with_test_writer(mut self) -> Self {
    self.test_writer = true;
    self
  }

  /// Installs the global subscriber.
  ///
  /// # Panics
  ///
  /// Panics if a global subscriber was already installed; use [try_build](Self::try_build) where that may happen.
  pub fn build(self) -> AppTracing {
    match self.try_build() {
      Ok(app_tracing) => app_tracing,
      Err(e) => panic!("failed to install global tracing subscriber: {}", e),
    }
  }

  /// Installs the global subscriber, failing if one was already installed.
  pub fn try_build(self) -> Result<AppTracing, TryInitError> {
    let console_filter = self.console_filter
      .unwrap_or_else(|| EnvFilter::try_from_env(CONSOLE_LOG_ENV).unwrap_or_default());
    let with_ansi = self.with_ansi.unwrap_or(!self.test_writer);

    let layered = tracing_subscriber::registry();
    if self.test_writer {
      layered.with(
        tracing_subscriber::fmt::layer()
          .with_test_writer()
          .with_ansi(with_ansi)
          .with_filter(console_filter)
      ).try_init()?;
    } else {
      layered.with(
        tracing_subscriber::fmt::layer()
          .with_writer(std::io::stderr)
          .with_ansi(with_ansi)
          .with_filter(console_filter)
      ).try_init()?;
    }
    tracing::debug!(env = CONSOLE_LOG_ENV, "installed console tracing");

    Ok(AppTracing { _private: () })
  }
}

/// Handle proving that tracing was installed.
pub struct AppTracing {
  _private: (),
}
