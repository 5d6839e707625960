//! Ingestion benchmarking tool.
//!
//! Measures the stages of the profiling pipeline on a real event dump, such as
//! an hour of GH Archive data.
//!
//! ## What It Benchmarks
//!
//! 1. **Decode**: decompressing and decoding every JSON line
//! 2. **Analyze**: normalizing, tokenizing and generating trigrams for every
//!    commit message (messages are decoded once up front)
//! 3. **Profile**: counting per author and ranking the top five
//!
//! ## Usage
//!
//! ```bash
//! ./target/release/ingest_bench /path/to/10K.github.jsonl.bz2
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Analyze ===
//! --------------------------------
//! Mode        : Analyze
//! Elapsed     : 0.031 s
//! Throughput  : 68.12 MiB/s
//! Trigrams    : 412_930
//! Trigrams/sec: 13_320_322
//! --------------------------------
//! ```
//!
//! Run with `--release`; debug builds are an order of magnitude slower.

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use commitgram_core::analyzer::trigram::extract_trigrams;
use commitgram_core::analyzer::{MessageNormalizer, Tokenizer};
use commitgram_core::ingest::{self, Compression, EventReader, MalformedPolicy};
use commitgram_core::types::{Event, IngestError, LocatedEvent, PushEvent};

const WARMUP_RUNS: usize = 1;
const MEASURE_RUNS: usize = 5;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: ingest_bench <events.jsonl[.bz2|.gz]>");
        return ExitCode::FAILURE;
    }

    let path = Path::new(&args[1]);

    println!("Decoding {}...", path.display());
    let pushes = match load_pushes(path) {
        Ok(pushes) => pushes,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let message_bytes: usize = pushes
        .iter()
        .flat_map(PushEvent::messages)
        .map(str::len)
        .sum();

    println!("Push events : {}", fmt_count(pushes.len() as u64));
    println!("Messages    : {}\n", fmt_bytes(message_bytes as u64));

    bench_decode(path);
    bench_analyze(&pushes, message_bytes);
    bench_profile(&pushes, message_bytes);

    ExitCode::SUCCESS
}

fn load_pushes(path: &Path) -> Result<Vec<PushEvent>, IngestError> {
    let mut pushes = Vec::new();
    for item in EventReader::open(path, Compression::Auto)? {
        if let Event::Push(push) = item?.event {
            pushes.push(push);
        }
    }
    Ok(pushes)
}

fn bench_decode(path: &Path) {
    println!("=== Decode ===");

    let mut records = 0u64;
    let run = |records: &mut u64| {
        if let Ok(reader) = EventReader::open(path, Compression::Auto) {
            *records = reader.filter(Result::is_ok).count() as u64;
        }
    };

    warmup(|| run(&mut records));
    let elapsed = measure(|| run(&mut records));

    let bytes = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    print_perf("Decode", bytes as usize, elapsed, "Records", records);
}

fn bench_analyze(pushes: &[PushEvent], message_bytes: usize) {
    let normalizer = MessageNormalizer::new();
    let tokenizer = Tokenizer::new();
    let mut norm_buf = String::with_capacity(1024);

    println!("=== Analyze ===");

    let mut grams = 0u64;
    let mut run = || {
        let mut local = 0u64;
        for message in pushes.iter().flat_map(PushEvent::messages) {
            normalizer.normalize_into(message, &mut norm_buf);
            let mut tokens = Vec::new();
            tokenizer.tokenize(&norm_buf, |t, _| tokens.push(t));
            extract_trigrams(tokens.as_slice(), |g| {
                std::hint::black_box(g);
                local += 1;
            });
        }
        grams = local;
    };

    warmup(&mut run);
    let elapsed = measure(&mut run);

    print_perf("Analyze", message_bytes, elapsed, "Trigrams", grams);
}

fn bench_profile(pushes: &[PushEvent], message_bytes: usize) {
    println!("=== Profile ===");

    let events = || {
        pushes.iter().enumerate().map(|(i, push)| {
            Ok::<_, IngestError>(LocatedEvent {
                line: i as u64 + 1,
                event: Event::Push(push.clone()),
            })
        })
    };

    let mut authors = 0u64;
    let mut run = || {
        if let Ok((table, _)) = ingest::run(events(), MalformedPolicy::Strict) {
            authors = table.len() as u64;
        }
        std::hint::black_box(authors);
    };

    warmup(&mut run);
    let elapsed = measure(&mut run);

    print_perf("Profile", message_bytes, elapsed, "Authors", authors);
}

fn warmup<F: FnMut()>(mut f: F) {
    for _ in 0..WARMUP_RUNS {
        f();
    }
}

fn measure<F: FnMut()>(mut f: F) -> Duration {
    let mut total = Duration::ZERO;

    for _ in 0..MEASURE_RUNS {
        let start = Instant::now();
        f();
        total += start.elapsed();
    }

    total / MEASURE_RUNS as u32
}

fn print_perf(label: &str, input_bytes: usize, elapsed: Duration, unit: &str, items: u64) {
    let secs = elapsed.as_secs_f64();
    let mib = input_bytes as f64 / (1024.0 * 1024.0);

    println!("--------------------------------");
    println!("Mode        : {}", label);
    println!("Elapsed     : {:.3} s", secs);
    println!("Throughput  : {:.2} MiB/s", mib / secs);

    if items > 0 {
        println!("{:<12}: {}", unit, fmt_count(items));
        println!(
            "{:<12}: {}",
            format!("{unit}/sec"),
            fmt_count((items as f64 / secs) as u64)
        );
    }

    println!("--------------------------------\n");
}

fn fmt_bytes(b: u64) -> String {
    if b >= 1024 * 1024 {
        format!("{:.2} MiB", b as f64 / (1024.0 * 1024.0))
    } else if b >= 1024 {
        format!("{:.2} KiB", b as f64 / 1024.0)
    } else {
        format!("{} B", b)
    }
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
