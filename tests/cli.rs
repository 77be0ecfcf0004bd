use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};

use seedmap_testkit::sample_points;

static RUNS: AtomicUsize = AtomicUsize::new(0);

fn seedmap(args: &[&str]) -> Output {
    let run = RUNS.fetch_add(1, Ordering::Relaxed);
    let config = std::env::temp_dir().join(format!("seedmap-cli-{}-{run}.toml", std::process::id()));
    std::fs::write(&config, "version = \"1.12\"\n").expect("write config");
    Command::new(env!("CARGO_BIN_EXE_seedmap"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .expect("run seedmap")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "seedmap failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn biome_prints_id_and_name() {
    let out = stdout(&seedmap(&["biome", "--seed", "111", "--x", "0", "--z", "0"]));
    let mut fields = out.split_whitespace();
    let id: i32 = fields.next().unwrap().parse().unwrap();
    assert!(id >= 0);
    assert!(fields.next().is_some());
}

#[test]
fn area_json_agrees_with_biome_queries() {
    let out = stdout(&seedmap(&[
        "area", "--seed", "111", "--x", "-2", "--z", "-2", "--width", "4", "--height", "4",
        "--format", "json",
    ]));
    let report: serde_json::Value = serde_json::from_str(&out).unwrap();
    let biomes = report["biomes"].as_array().unwrap();
    assert_eq!(biomes.len(), 16);

    for (x, z) in sample_points(3, 4, 2).into_iter().map(|(x, z)| (x.min(1), z.min(1))) {
        let out = stdout(&seedmap(&[
            "biome",
            "--seed",
            "111",
            "--x",
            &x.to_string(),
            "--z",
            &z.to_string(),
        ]));
        let id: i64 = out.split_whitespace().next().unwrap().parse().unwrap();
        let index = ((z + 2) * 4 + (x + 2)) as usize;
        assert_eq!(biomes[index].as_i64().unwrap(), id, "cell ({x}, {z})");
    }
}

#[test]
fn modern_versions_without_trees_fail_cleanly() {
    let output = seedmap(&["biome", "--seed", "1", "--mc", "1.18", "--x", "0", "--z", "0"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("decision tree"));
}

#[test]
fn versions_lists_engines() {
    let out = stdout(&seedmap(&["versions"]));
    assert!(out.contains("b1.7"));
    assert!(out.contains("layers"));
    assert!(out.contains("btree20"));
}

#[test]
fn config_round_trips_through_write() {
    let path: PathBuf =
        std::env::temp_dir().join(format!("seedmap-written-{}.toml", std::process::id()));
    let out = stdout(&seedmap(&["config", "--write", path.to_str().unwrap()]));
    assert!(out.contains("version = \"1.12\""));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), out);
}
