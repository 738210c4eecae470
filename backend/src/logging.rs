use std::fmt::Write as _;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{layer::Context, EnvFilter, Layer, Registry};

pub const DEFAULT_FILTER: &str = "warn,slots_wallet=info,tower_http=warn";

type Sink = Box<dyn Fn(Level, String) + Send + Sync>;

/// Splits an event into its message and trailing `key=value` fields.
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: String,
}

impl LineVisitor {
    fn field(&mut self, field: &Field, value: impl std::fmt::Display) {
        let _ = write!(self.fields, " {}={}", field.name(), value);
    }
}

impl Visit for LineVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            self.field(field, format_args!("{:?}", value));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.field(field, value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.field(field, value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.field(field, value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.field(field, value);
    }
}

/// Writes one timestamped line per wallet event.
struct WalletLayer {
    sink: Sink,
}

impl WalletLayer {
    fn stdio() -> Self {
        Self {
            sink: Box::new(|level, line| {
                if level <= Level::WARN {
                    eprintln!("{}", line);
                } else {
                    println!("{}", line);
                }
            }),
        }
    }
}

fn format_line(timestamp: &str, level: Level, target: &str, message: &str, fields: &str) -> String {
    format!("{} {:<5} {}: {}{}", timestamp, level, target, message, fields)
}

impl<S: Subscriber> Layer<S> for WalletLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        if visitor.message.is_empty() && visitor.fields.is_empty() {
            return;
        }

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
        let line = format_line(
            &timestamp,
            *metadata.level(),
            metadata.target(),
            &visitor.message,
            &visitor.fields,
        );
        (self.sink)(*metadata.level(), line);
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
pub fn setup() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let subscriber = Registry::default().with(env_filter).with(WalletLayer::stdio());

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("A global tracing subscriber was already installed");
    }
}
