//! Log subscriber setup.
//!
//! The dispatcher logs through `tracing`: resolution steps at `debug`,
//! individual tokens and bindings at `trace`, ignored global options at
//! `warn`. A subscriber installed from here writes to stderr so command
//! output on stdout is never interleaved with log lines.
//!
//! Without the `tracing` feature only a no-op [`init_subscriber`] exists.

#[cfg(feature = "tracing")]
pub use enabled::{init_subscriber, init_subscriber_with_config, TracingConfig, TracingFormat};

#[cfg(not(feature = "tracing"))]
pub fn init_subscriber() {}

#[cfg(feature = "tracing")]
mod enabled {
    use tracing::Level;
    use tracing_subscriber::{
        fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
    };

    /// Directive used when neither `RUST_LOG` nor an explicit level is set.
    const FALLBACK_DIRECTIVE: &str = "warn";

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub enum TracingFormat {
        /// Multi-line, for reading by hand
        Pretty,
        #[default]
        Compact,
        /// Newline-delimited JSON
        Json,
    }

    /// Subscriber settings.
    #[derive(Debug, Clone)]
    pub struct TracingConfig {
        /// Fixed level; `None` defers to `RUST_LOG`, then `warn`
        pub level: Option<Level>,
        pub format: TracingFormat,
        pub show_time: bool,
        /// Print the emitting module, e.g. `sprig::dispatcher`
        pub show_target: bool,
    }

    impl Default for TracingConfig {
        fn default() -> Self {
            Self {
                level: None,
                format: TracingFormat::default(),
                show_time: false,
                show_target: true,
            }
        }
    }

    impl TracingConfig {
        pub fn level(mut self, level: Level) -> Self {
            self.level = Some(level);
            self
        }

        pub fn format(mut self, format: TracingFormat) -> Self {
            self.format = format;
            self
        }

        pub fn show_time(mut self, show: bool) -> Self {
            self.show_time = show;
            self
        }

        fn env_filter(&self) -> EnvFilter {
            match self.level {
                Some(level) => EnvFilter::new(level.as_str()),
                None => EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE)),
            }
        }

        fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
            let layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(self.show_target);

            match (self.format, self.show_time) {
                (TracingFormat::Pretty, true) => layer.pretty().boxed(),
                (TracingFormat::Pretty, false) => layer.pretty().without_time().boxed(),
                (TracingFormat::Compact, true) => layer.compact().boxed(),
                (TracingFormat::Compact, false) => layer.compact().without_time().boxed(),
                (TracingFormat::Json, true) => layer.json().boxed(),
                (TracingFormat::Json, false) => layer.json().without_time().boxed(),
            }
        }
    }

    /// Install the default subscriber.
    ///
    /// `RUST_LOG=sprig=debug` follows command resolution,
    /// `RUST_LOG=sprig=trace` shows every token being bound. A subscriber
    /// that is already installed is left in place.
    pub fn init_subscriber() {
        init_subscriber_with_config(TracingConfig::default());
    }

    /// Install a subscriber built from `config`.
    ///
    /// ```ignore
    /// use sprig::{init_subscriber_with_config, TracingConfig, TracingFormat};
    ///
    /// init_subscriber_with_config(TracingConfig::default().format(TracingFormat::Json));
    /// ```
    pub fn init_subscriber_with_config(config: TracingConfig) {
        let layer = config.fmt_layer().with_filter(config.env_filter());
        // Err only means another subscriber won the race
        let _ = tracing_subscriber::registry().with(layer).try_init();
    }

}
