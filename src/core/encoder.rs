//! Record encoders
//!
//! Both encodings emit the same keys in the same order:
//! `timestamp`, `level`, `logger`, `caller`, `msg`, any structured fields,
//! and `stacktrace` for error and fatal records only.
//!
//! - Text: one human-readable `key=value` line per record
//! - Json: one flat JSON object per line

use super::log_context::LogContext;
use super::log_entry::LogEntry;
use super::timestamp::TimestampFormat;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const TIMESTAMP_KEY: &str = "timestamp";
pub const LEVEL_KEY: &str = "level";
pub const LOGGER_KEY: &str = "logger";
pub const CALLER_KEY: &str = "caller";
pub const MESSAGE_KEY: &str = "msg";
pub const STACKTRACE_KEY: &str = "stacktrace";

/// Keys owned by the encoder; structured fields may not shadow them
pub const RESERVED_KEYS: [&str; 6] = [
    TIMESTAMP_KEY,
    LEVEL_KEY,
    LOGGER_KEY,
    CALLER_KEY,
    MESSAGE_KEY,
    STACKTRACE_KEY,
];

/// Prefix given to a structured field whose key collides with a reserved key
pub const SHADOWED_FIELD_PREFIX: &str = "field_";

/// Serialization shape of a record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Human-readable text format (default)
    ///
    /// Example: `timestamp=2025-01-08T10:30:45.123Z level=info logger=root caller=src/main.rs:9 msg="Request processed"`
    #[default]
    Text,

    /// JSON format for machine processing
    ///
    /// Example: `{"timestamp":"2025-01-08T10:30:45.123Z","level":"info","logger":"root","caller":"src/main.rs:9","msg":"Request processed"}`
    Json,
}

impl Encoding {
    /// `"json"` selects [`Encoding::Json`]; anything else, including typos, is text
    pub fn from_config_str(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("json") {
            Encoding::Json
        } else {
            Encoding::Text
        }
    }
}

/// Formats a [`LogEntry`] into a single output line (without the trailing newline)
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    encoding: Encoding,
    timestamp_format: TimestampFormat,
    use_colors: bool,
}

impl Encoder {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    pub fn text() -> Self {
        Self::new(Encoding::Text)
    }

    pub fn json() -> Self {
        Self::new(Encoding::Json)
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Colour the level value; only honoured by the text encoding
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn encode(&self, entry: &LogEntry) -> String {
        match self.encoding {
            Encoding::Text => self.encode_text(entry),
            Encoding::Json => self.encode_json(entry),
        }
    }

    fn caller(entry: &LogEntry) -> String {
        entry
            .caller
            .map(|c| c.short())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Output key for every field, in order
    ///
    /// Reserved keys and keys already taken by an earlier field get
    /// [`SHADOWED_FIELD_PREFIX`] until they are unique, so no value is dropped.
    fn field_keys(context: &LogContext, text: bool) -> Vec<String> {
        let mut taken: HashSet<String> = RESERVED_KEYS.iter().map(|k| k.to_string()).collect();
        context
            .fields()
            .iter()
            .map(|field| {
                let mut key = if text {
                    escape_key(&field.key)
                } else {
                    field.key.clone()
                };
                while taken.contains(&key) {
                    key = format!("{}{}", SHADOWED_FIELD_PREFIX, key);
                }
                taken.insert(key.clone());
                key
            })
            .collect()
    }

    fn encode_text(&self, entry: &LogEntry) -> String {
        let level = if self.use_colors {
            entry
                .level
                .to_str()
                .color(entry.level.color_code())
                .to_string()
        } else {
            entry.level.to_str().to_string()
        };

        let mut parts = vec![
            format!(
                "{}={}",
                TIMESTAMP_KEY,
                self.timestamp_format.format(&entry.timestamp)
            ),
            format!("{}={}", LEVEL_KEY, level),
            format!("{}={}", LOGGER_KEY, escape_value(&entry.logger)),
            format!("{}={}", CALLER_KEY, escape_value(&Self::caller(entry))),
            // Message is always quoted
            format!("{}={}", MESSAGE_KEY, quote_value(&entry.message)),
        ];

        if let Some(ref context) = entry.context {
            let keys = Self::field_keys(context, true);
            for (key, field) in keys.iter().zip(context.fields()) {
                let value = match &field.value {
                    super::log_context::FieldValue::String(s) => quote_value(s),
                    other => other.to_string(),
                };
                parts.push(format!("{}={}", key, value));
            }
        }

        if let Some(ref stacktrace) = entry.stacktrace {
            parts.push(format!("{}={}", STACKTRACE_KEY, quote_value(stacktrace)));
        }

        parts.join(" ")
    }

    fn encode_json(&self, entry: &LogEntry) -> String {
        use serde_json::Value;

        let mut json_obj = serde_json::Map::new();
        json_obj.insert(
            TIMESTAMP_KEY.to_string(),
            Value::String(self.timestamp_format.format(&entry.timestamp)),
        );
        json_obj.insert(
            LEVEL_KEY.to_string(),
            Value::String(entry.level.to_str().to_string()),
        );
        json_obj.insert(LOGGER_KEY.to_string(), Value::String(entry.logger.clone()));
        json_obj.insert(CALLER_KEY.to_string(), Value::String(Self::caller(entry)));
        json_obj.insert(MESSAGE_KEY.to_string(), Value::String(entry.message.clone()));

        if let Some(ref context) = entry.context {
            let keys = Self::field_keys(context, false);
            for (key, field) in keys.into_iter().zip(context.fields()) {
                json_obj.insert(key, field.value.to_json_value());
            }
        }

        if let Some(ref stacktrace) = entry.stacktrace {
            json_obj.insert(STACKTRACE_KEY.to_string(), Value::String(stacktrace.clone()));
        }

        serde_json::to_string(&Value::Object(json_obj)).unwrap_or_default()
    }
}

/// Strip characters that would break `key=value` parsing
///
/// A key with nothing left becomes `_`.
fn escape_key(key: &str) -> String {
    let escaped: String = key
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || *c == '.')
        .collect();
    if escaped.is_empty() {
        "_".to_string()
    } else {
        escaped
    }
}

/// Quote a value only when it contains spaces, quotes, `=` or control characters
fn escape_value(value: &str) -> String {
    if value.is_empty()
        || value
            .chars()
            .any(|c| c == ' ' || c == '"' || c == '=' || c.is_control())
    {
        quote_value(value)
    } else {
        value.to_string()
    }
}

fn quote_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
