use std::{
    env,
    path::PathBuf,
    sync::Arc,
    thread,
    time::Instant,
};

use anyhow::{bail, Context, Result};
use seedmap_testkit::{
    load_corpus, CaseOutcome, JsonlSink, MetricsSink, MismatchRecord, ParityReportBuilder,
    ParityTally, ReferenceCase, TestExecutionMetrics, TestResult,
};
use seedmap_world::{BiomeId, GeneratorCache, GeneratorOptions, TreeRegistry};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .try_init();
    let config = config_from_args()?;
    let report = run(&config)?;
    if report == TestResult::Fail && config.fail_on_mismatch {
        std::process::exit(1);
    }
    Ok(())
}

#[derive(Debug)]
struct RunConfig {
    corpora: Vec<PathBuf>,
    trees: Option<PathBuf>,
    report: PathBuf,
    mismatches: PathBuf,
    threads: usize,
    cache_capacity: usize,
    skip_unknown: bool,
    fail_on_mismatch: bool,
}

fn config_from_args() -> Result<RunConfig> {
    config_from_iter(env::args().skip(1))
}

fn config_from_iter<I>(mut args: I) -> Result<RunConfig>
where
    I: Iterator<Item = String>,
{
    let mut config = RunConfig {
        corpora: Vec::new(),
        trees: None,
        report: PathBuf::from("target/parity.json"),
        mismatches: PathBuf::from("target/parity_mismatches.jsonl"),
        threads: thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        cache_capacity: 64,
        skip_unknown: true,
        fail_on_mismatch: false,
    };
    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .with_context(|| format!("{name} requires an argument"))
        };
        match arg.as_str() {
            "--corpus" => config.corpora.push(PathBuf::from(value("--corpus")?)),
            "--trees" => config.trees = Some(PathBuf::from(value("--trees")?)),
            "--report" => config.report = PathBuf::from(value("--report")?),
            "--mismatches" => config.mismatches = PathBuf::from(value("--mismatches")?),
            "--threads" => {
                config.threads = value("--threads")?
                    .parse::<usize>()
                    .context("invalid thread count")?
                    .max(1)
            }
            "--cache" => {
                config.cache_capacity = value("--cache")?
                    .parse()
                    .context("invalid cache capacity")?
            }
            "--strict" => config.skip_unknown = false,
            "--fail-on-mismatch" => config.fail_on_mismatch = true,
            other => bail!("unknown option {other:?}"),
        }
    }
    if config.corpora.is_empty() {
        bail!("usage: seedmap-cli --corpus <file> [--corpus <file>...] [--trees <dir|pack>] [--report <json>] [--mismatches <jsonl>] [--threads N] [--cache N] [--strict] [--fail-on-mismatch]");
    }
    Ok(config)
}

/// Outcome of checking one case, with the generated biome or error text.
fn check(cache: &GeneratorCache, case: &ReferenceCase) -> (CaseOutcome, String) {
    let options = GeneratorOptions {
        large_biomes: case.large_biomes,
    };
    let result = cache
        .get(case.version, options, case.seed as u64)
        .and_then(|g| g.biome_at(case.scale, case.x, case.y, case.z));
    match result {
        Ok(id) if id.0 == case.expected => (CaseOutcome::Matched, id.to_string()),
        Ok(id) => (CaseOutcome::Mismatched, id.to_string()),
        Err(err) => (CaseOutcome::Error, err.to_string()),
    }
}

fn run(config: &RunConfig) -> Result<TestResult> {
    let trees = match &config.trees {
        Some(path) => TreeRegistry::load(path)
            .with_context(|| format!("failed to load trees from {}", path.display()))?,
        None => TreeRegistry::empty(),
    };
    let cache = GeneratorCache::new(Arc::new(trees), config.cache_capacity);

    let mut cases = Vec::new();
    for path in &config.corpora {
        let loaded = load_corpus(path, config.skip_unknown)?;
        tracing::info!(path = %path.display(), cases = loaded.len(), "loaded corpus");
        cases.extend(loaded);
    }
    // Grouping by seed keeps each worker on a few cached generators.
    cases.sort_by_key(|c| (c.version, c.large_biomes, c.seed));

    let started = Instant::now();
    let chunk = cases.len().div_ceil(config.threads).max(1);
    let results: Vec<(ParityTally, Vec<(usize, String)>)> = thread::scope(|scope| {
        let workers: Vec<_> = cases
            .chunks(chunk)
            .enumerate()
            .map(|(n, slice)| {
                let cache = &cache;
                scope.spawn(move || {
                    let mut tally = ParityTally::new();
                    let mut misses = Vec::new();
                    for (i, case) in slice.iter().enumerate() {
                        let (outcome, actual) = check(cache, case);
                        tally.record(case.version.as_str(), outcome);
                        if outcome != CaseOutcome::Matched {
                            misses.push((n * chunk + i, actual));
                        }
                    }
                    (tally, misses)
                })
            })
            .collect();
        workers
            .into_iter()
            .map(|w| w.join().unwrap_or_else(|_| (ParityTally::new(), Vec::new())))
            .collect()
    });
    let elapsed = started.elapsed().as_secs_f64();

    let mut tally = ParityTally::new();
    let mut sink = JsonlSink::create(&config.mismatches)?;
    for (part, misses) in results {
        tally.merge(part);
        for (index, actual) in misses {
            let case = &cases[index];
            sink.write(&MismatchRecord {
                version: case.version.as_str(),
                seed: case.seed,
                pos: [case.x, case.y, case.z],
                scale: case.scale,
                expected: BiomeId(case.expected).to_string(),
                actual,
            })?;
        }
    }
    sink.flush()?;

    let metrics = tally.into_metrics();
    for (version, counts) in &metrics.per_version {
        tracing::info!(
            %version,
            total = counts.total,
            matched = counts.matched,
            mismatched = counts.mismatched,
            errors = counts.errors,
            "parity"
        );
    }
    let report = ParityReportBuilder::new("biome_parity")
        .parity(metrics)
        .execution(TestExecutionMetrics {
            duration_seconds: elapsed,
            threads: Some(config.threads),
            cases_per_second: (elapsed > 0.0).then(|| cases.len() as f64 / elapsed),
        })
        .build();
    MetricsSink::create(&config.report)?.write(&report)?;
    tracing::info!(
        path = %config.report.display(),
        result = ?report.result,
        match_rate = report.parity.match_rate,
        "wrote parity report"
    );
    Ok(report.result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedmap_core::McVersion;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn config_requires_a_corpus() {
        assert!(config_from_iter(std::iter::empty()).is_err());
    }

    #[test]
    fn config_defaults_and_overrides() {
        let config = config_from_iter(args(&[
            "--corpus",
            "a.txt",
            "--corpus",
            "b.jsonl",
            "--threads",
            "0",
            "--strict",
        ]))
        .expect("config");
        assert_eq!(config.corpora.len(), 2);
        assert_eq!(config.threads, 1);
        assert!(!config.skip_unknown);
        assert_eq!(config.report, PathBuf::from("target/parity.json"));
    }

    #[test]
    fn config_rejects_unknown_options_and_missing_values() {
        assert!(config_from_iter(args(&["--corpus", "a", "--bogus"])).is_err());
        assert!(config_from_iter(args(&["--corpus"])).is_err());
    }

    #[test]
    fn check_classifies_outcomes() {
        let cache = GeneratorCache::new(Arc::new(TreeRegistry::empty()), 4);
        let mut case = ReferenceCase {
            version: McVersion::V1_12,
            seed: 111,
            x: 0,
            y: 0,
            z: 0,
            scale: 4,
            large_biomes: false,
            expected: 0,
        };
        let actual = cache
            .get(McVersion::V1_12, GeneratorOptions::default(), 111)
            .unwrap()
            .biome_at(4, 0, 0, 0)
            .unwrap();
        case.expected = actual.0;
        assert_eq!(check(&cache, &case).0, CaseOutcome::Matched);
        case.expected = actual.0 + 1;
        assert_eq!(check(&cache, &case).0, CaseOutcome::Mismatched);
        case.version = McVersion::V1_18;
        assert_eq!(check(&cache, &case).0, CaseOutcome::Error);
    }

    #[test]
    fn run_writes_report_and_mismatches() {
        let dir = std::env::temp_dir().join(format!("seedmap-parity-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let corpus = dir.join("truth.txt");
        std::fs::write(&corpus, "15 111 0 0 9999\n22 111 0 0 1\n").unwrap();
        let config = RunConfig {
            corpora: vec![corpus],
            trees: None,
            report: dir.join("parity.json"),
            mismatches: dir.join("mismatches.jsonl"),
            threads: 2,
            cache_capacity: 4,
            skip_unknown: true,
            fail_on_mismatch: false,
        };
        assert_eq!(run(&config).unwrap(), TestResult::Fail);
        let log = std::fs::read_to_string(&config.mismatches).unwrap();
        assert_eq!(log.lines().count(), 2);
        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&config.report).unwrap()).unwrap();
        assert_eq!(report["parity"]["overall"]["total"], 2);
        assert_eq!(report["parity"]["per_version"]["1.18"]["errors"], 1);
    }
}
