//! Newline-delimited JSON: one self-contained object per record so `jq` and
//! log collectors can consume the file line by line.

use super::{Encoder, Format, Record};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Fixed keys come first in a stable order; fields follow in call order.
/// A field named like a fixed key is written as `fields.<key>` so it cannot
/// shadow the record's own level or message.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

const FIXED_KEYS: [&str; 6] = ["level", "time", "logger", "file", "msg", "stacktrace"];

/// Serializes a borrowed record without building an intermediate `serde_json::Value`.
struct JsonLine<'a, 'r>(&'a Record<'r>);

impl Serialize for JsonLine<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let record = self.0;
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("level", record.level.as_capital_str())?;
        map.serialize_entry("time", &record.timestamp())?;
        if !record.logger_name.is_empty() {
            map.serialize_entry("logger", record.logger_name)?;
        }
        if let Some(caller) = &record.caller {
            map.serialize_entry("file", &caller.to_string())?;
        }
        map.serialize_entry("msg", record.message)?;
        if let Some(trace) = record.stacktrace_for_level() {
            map.serialize_entry("stacktrace", trace)?;
        }
        for field in record.all_fields() {
            if FIXED_KEYS.contains(&field.key.as_str()) {
                map.serialize_entry(&format!("fields.{}", field.key), &field.value)?;
            } else {
                map.serialize_entry(&field.key, &field.value)?;
            }
        }
        map.end()
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) -> Result<(), crate::Error> {
        serde_json::to_writer(&mut *buf, &JsonLine(record))?;
        buf.push(b'\n');
        Ok(())
    }

    fn format(&self) -> Format {
        Format::Json
    }
}
