use chrono::{FixedOffset, TimeZone};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use usermgmt_log::{Caller, Encoder, Field, JsonEncoder, Level, PlainEncoder, Record};

fn fields() -> Vec<Field> {
    vec![
        Field::new("method", "POST"),
        Field::new("path", "/users"),
        Field::new("status", 201),
        Field::new("latency", Duration::from_micros(1830)),
        Field::new("user_agent", "curl/8.5.0 (x86_64)"),
    ]
}

fn record<'a>(fields: &'a [Field], context: &'a [Field]) -> Record<'a> {
    Record {
        time: FixedOffset::east_opt(0)
            .and_then(|tz| tz.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).single())
            .expect("valid timestamp"),
        level: Level::Info,
        logger_name: "http",
        caller: Some(Caller {
            file: "src/handlers/users.rs",
            line: 88,
        }),
        message: "request served",
        context,
        fields,
        stacktrace: None,
    }
}

fn bench_encoders(c: &mut Criterion) {
    let fields = fields();
    let context = [Field::new("request_id", "01J9Z3K4")];
    let rec = record(&fields, &context);
    let mut group = c.benchmark_group("Encoder::encode");

    group.bench_function("json", |b| {
        let mut buf = Vec::with_capacity(256);
        b.iter(|| {
            buf.clear();
            JsonEncoder.encode(black_box(&rec), &mut buf)
        });
    });

    group.bench_function("plain", |b| {
        let mut buf = Vec::with_capacity(256);
        b.iter(|| {
            buf.clear();
            PlainEncoder.encode(black_box(&rec), &mut buf)
        });
    });

    group.finish();
}

fn bench_plain_quoting(c: &mut Criterion) {
    let fields = [
        Field::new("name", "Ada Lovelace"),
        Field::new("note", "key=value \"quoted\""),
    ];
    let rec = record(&fields, &[]);

    c.bench_function("PlainEncoder::encode quoted", |b| {
        let mut buf = Vec::with_capacity(256);
        b.iter(|| {
            buf.clear();
            PlainEncoder.encode(black_box(&rec), &mut buf)
        });
    });
}

criterion_group!(benches, bench_encoders, bench_plain_quoting);
criterion_main!(benches);
