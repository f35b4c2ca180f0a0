//! Human-readable lines for operators tailing stdout or the log file.

use super::{Encoder, Format, Record};
use std::fmt::Write as _;

/// `TIME LEVEL [name] [caller] message key=value ...`, single-space separated.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainEncoder;

impl Encoder for PlainEncoder {
    fn encode(&self, record: &Record<'_>, buf: &mut Vec<u8>) -> Result<(), crate::Error> {
        let mut line = String::with_capacity(96 + record.message.len());
        line.push_str(&record.timestamp());
        line.push(' ');
        line.push_str(record.level.as_capital_str());

        if !record.logger_name.is_empty() {
            line.push(' ');
            line.push_str(record.logger_name);
        }
        if let Some(caller) = &record.caller {
            line.push(' ');
            line.push_str(&caller.to_string());
        }

        line.push(' ');
        // A raw newline would split one record across lines
        if record.message.chars().any(char::is_control) {
            let _ = write!(line, "{:?}", record.message);
        } else {
            line.push_str(record.message);
        }

        for field in record.all_fields() {
            line.push(' ');
            line.push_str(&field.key);
            line.push('=');
            field.value.write_plain(&mut line);
        }

        // Stacktrace continues on its own lines, like a console panic report
        if let Some(trace) = record.stacktrace_for_level() {
            line.push('\n');
            line.push_str(trace.trim_end());
        }

        line.push('\n');
        buf.extend_from_slice(line.as_bytes());
        Ok(())
    }

    fn format(&self) -> Format {
        Format::Plain
    }
}
