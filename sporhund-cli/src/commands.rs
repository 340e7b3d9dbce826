// sporhund-cli/src/commands.rs

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info, instrument};

use sporhund_config::SporhundConfig;
use sporhund_engine::{SearchEngine, SearchOutcome};
use sporhund_telemetry::logging::EventLogger;
use sporhund_telemetry::metrics::MetricsRecorder;

type CliError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser, Debug)]
#[command(version, about = "Multi-pattern text scanner")]
pub struct Cli {
    /// Pattern file, one pattern per line ('#' starts a comment). Defaults
    /// to the built-in demonstration set.
    #[arg(short, long)]
    pub patterns: Option<PathBuf>,

    /// Run a fixed-workload timing pass and exit.
    #[arg(long)]
    pub benchmark: bool,

    /// Run the canned scenario list and exit.
    #[arg(long)]
    pub test: bool,
}

pub fn run(cli: Cli, metrics: MetricsRecorder) -> Result<(), CliError> {
    if cli.test {
        return run_scenarios();
    }

    let mut config = SporhundConfig::load()?;
    if let Some(path) = cli.patterns {
        config.patterns.file = Some(path);
    }

    let engine = match SearchEngine::from_config(&config) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Engine initialization failed: {e}");
            return Err(Box::new(e));
        }
    };
    EventLogger::log_event("engine_ready", "automaton compiled, cache empty");

    if cli.benchmark {
        run_benchmark(&engine, &metrics)
    } else {
        run_interactive(&engine, &metrics)
    }
}

/// Interactive mode: one query text per stdin line. The reserved words
/// `stats`, `clear`, `help` and `quit`/`exit`/`q` are commands, everything
/// else is scanned.
#[instrument(level = "info", name = "run_interactive", skip(engine, metrics))]
fn run_interactive(engine: &SearchEngine, metrics: &MetricsRecorder) -> Result<(), CliError> {
    let stats = engine.stats();
    println!(
        "sporhund ready: {} patterns, {} states (~{} KiB). Type 'help' for commands.",
        stats.automaton.pattern_count,
        stats.automaton.state_count,
        stats.automaton.heap_bytes / 1024
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();

        match input {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" => print_help(),
            "clear" => {
                engine.clear_cache();
                println!("Cache cleared.");
            }
            "stats" => print_stats(engine),
            text => {
                let outcome = engine.search(text);
                observe(metrics, &outcome);
                print_outcome(text, &outcome);
            }
        }
    }

    info!("Clean shutdown");
    Ok(())
}

fn observe(metrics: &MetricsRecorder, outcome: &SearchOutcome) {
    metrics.inc_searches();
    metrics
        .scan_latency
        .observe(outcome.duration.as_nanos() as f64);
    if outcome.cached {
        metrics.cache_hits.inc();
    }
}

fn print_outcome(text: &str, outcome: &SearchOutcome) {
    let source = if outcome.cached { "cached" } else { "scanned" };
    if outcome.matches.is_empty() {
        println!("No matches in {} bytes ({source}, {:?})", text.len(), outcome.duration);
        return;
    }
    println!(
        "{} match(es) in {} bytes ({source}, {:?}):",
        outcome.matches.len(),
        text.len(),
        outcome.duration
    );
    for m in &outcome.matches {
        println!(
            "  pattern #{} \"{}\" at offset {} (len {}, confidence {}%)",
            m.pattern_id, m.text, m.offset, m.length, m.confidence
        );
    }
}

fn print_stats(engine: &SearchEngine) {
    let stats = engine.stats();
    println!("Automaton:");
    println!("  patterns: {}", stats.automaton.pattern_count);
    println!("  states:   {}", stats.automaton.state_count);
    println!("  heap:     ~{} KiB", stats.automaton.heap_bytes / 1024);
    println!("Cache:");
    println!("  hits:      {}", stats.cache.hits);
    println!("  misses:    {}", stats.cache.misses);
    println!("  evictions: {}", stats.cache.evictions);
    println!("  entries:   {}", stats.cache.total_entries);
    println!("  hit ratio: {:.1}%", engine.hit_ratio() * 100.0);
}

fn print_help() {
    println!("Commands:");
    println!("  stats        show automaton and cache statistics");
    println!("  clear        clear the result cache");
    println!("  help         show this help");
    println!("  quit/exit/q  leave");
    println!("Any other line is scanned against the loaded pattern set.");
}

const BENCH_ROUNDS: usize = 1_000;

const BENCH_CORPUS: &[&str] = &[
    "The parties agree that any breach of contract is subject to the governing law named herein.",
    "Notwithstanding the foregoing, indemnification survives termination.",
    "Delays caused by force majeure shall not constitute a breach.",
    "This sentence mentions none of the loaded phrases at all.",
];

/// Fixed-workload timing pass: one cold scan per corpus text, then repeated
/// cached queries, then the metrics exposition.
#[instrument(level = "info", name = "run_benchmark", skip(engine, metrics))]
fn run_benchmark(engine: &SearchEngine, metrics: &MetricsRecorder) -> Result<(), CliError> {
    println!("Cold pass over {} texts:", BENCH_CORPUS.len());
    for text in BENCH_CORPUS {
        let outcome = engine.search(text);
        observe(metrics, &outcome);
        println!(
            "  {} match(es) in {} bytes, {:?}",
            outcome.matches.len(),
            text.len(),
            outcome.duration
        );
    }

    let started = std::time::Instant::now();
    let mut served = 0usize;
    for _ in 0..BENCH_ROUNDS {
        for text in BENCH_CORPUS {
            let outcome = engine.search(text);
            observe(metrics, &outcome);
            served += usize::from(outcome.cached);
        }
    }
    let elapsed = started.elapsed();
    let queries = BENCH_ROUNDS * BENCH_CORPUS.len();
    println!(
        "Cached pass: {queries} queries in {elapsed:?} ({:.0} queries/s, {served} from cache)",
        queries as f64 / elapsed.as_secs_f64()
    );
    println!("Hit ratio: {:.1}%", engine.hit_ratio() * 100.0);

    println!("{}", metrics.gather_metrics()?);
    Ok(())
}

struct Scenario {
    name: &'static str,
    patterns: &'static [&'static str],
    text: &'static str,
    expected: &'static [(usize, usize, u32)],
}

const SCENARIOS: &[Scenario] = &[
    Scenario {
        name: "embedded suffix occurrence",
        patterns: &["he said", "she said"],
        text: "he said she said",
        expected: &[(0, 7, 0), (9, 7, 0), (8, 8, 1)],
    },
    Scenario {
        name: "overlapping patterns",
        patterns: &["ab", "bc", "abc"],
        text: "xabcx",
        expected: &[(1, 2, 0), (2, 2, 1), (1, 3, 2)],
    },
    Scenario {
        name: "repeated single byte",
        patterns: &["a"],
        text: "aaaa",
        expected: &[(0, 1, 0), (1, 1, 0), (2, 1, 0), (3, 1, 0)],
    },
    Scenario {
        name: "shared end position",
        patterns: &["according to", "to"],
        text: "According To The Jury",
        expected: &[(10, 2, 1), (0, 12, 0)],
    },
];

/// Canned scenario list: the matcher scenarios above plus cache behavior.
/// Exits non-zero if any scenario fails.
#[instrument(level = "info", name = "run_scenarios")]
fn run_scenarios() -> Result<(), CliError> {
    let mut failures = 0usize;

    for scenario in SCENARIOS {
        let patterns: Vec<Vec<u8>> = scenario
            .patterns
            .iter()
            .map(|p| p.as_bytes().to_vec())
            .collect();
        let engine = SearchEngine::new(&patterns, &SporhundConfig::default())?;
        let got: Vec<(usize, usize, u32)> = engine
            .search(scenario.text)
            .matches
            .iter()
            .map(|m| (m.offset, m.length, m.pattern_id))
            .collect();

        if got == scenario.expected {
            println!("PASS {}", scenario.name);
        } else {
            failures += 1;
            println!(
                "FAIL {}: expected {:?}, got {:?}",
                scenario.name, scenario.expected, got
            );
        }
    }

    failures += run_cache_scenarios()?;

    if failures > 0 {
        return Err(Box::new(io::Error::new(
            io::ErrorKind::Other,
            format!("{failures} scenario(s) failed"),
        )));
    }
    println!("All scenarios passed.");
    Ok(())
}

fn run_cache_scenarios() -> Result<usize, CliError> {
    let mut failures = 0usize;

    let engine = SearchEngine::new(&[b"x".to_vec()], &SporhundConfig::default())?;
    engine.search("foo");
    engine.search("bar");
    engine.search("foo");
    let stats = engine.stats().cache;
    if (stats.hits, stats.misses, stats.total_entries) == (1, 2, 2) {
        println!("PASS cache hit accounting");
    } else {
        failures += 1;
        println!(
            "FAIL cache hit accounting: hits={} misses={} entries={}",
            stats.hits, stats.misses, stats.total_entries
        );
    }

    let mut config = SporhundConfig::default();
    config.cache.capacity = 2;
    let engine = SearchEngine::new(&[b"x".to_vec()], &config)?;
    engine.search("A");
    engine.search("B");
    engine.search("C");
    let stats = engine.stats().cache;
    let evicted_oldest = !engine.search("A").cached;
    if evicted_oldest && stats.evictions == 1 && stats.total_entries == 2 {
        println!("PASS cache eviction (oldest insertion)");
    } else {
        failures += 1;
        println!(
            "FAIL cache eviction: evictions={} entries={} oldest_gone={}",
            stats.evictions, stats.total_entries, evicted_oldest
        );
    }

    Ok(failures)
}
