//! End-to-End Statistical Tests for wildprompt
//!
//! Tests verify:
//! - Weighted choices converge to their weight share
//! - Multi-select returns distinct options, correctly joined
//! - Cyclic wildcards terminate
//!
//! Seeds are fixed ranges, so every run sees the same draws.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wildprompt-tests --test e2e_statistics
//! ```

use std::collections::HashSet;

use wildprompt_core::{LoadMode, StoreConfig, WildcardEngine};
use wildprompt_tests::fixtures::WildcardTreeFixture;

fn common_share(engine: &WildcardEngine, text: &str) -> f64 {
    let trials = 1000;
    let common = (0..trials)
        .filter(|&seed| engine.process(text, Some(seed)) == "common")
        .count();
    common as f64 / trials as f64
}

#[test]
fn test_block_weight_convergence() {
    let engine = WildcardEngine::from_config(StoreConfig::default());
    let share = common_share(&engine, "{10::common|1::rare}");
    assert!((share - 10.0 / 11.0).abs() < 0.05, "share {share}");
}

#[test]
fn test_wildcard_line_weight_convergence() {
    let fixture = WildcardTreeFixture::sample();
    let engine = fixture.engine(LoadMode::Lazy);
    let share = common_share(&engine, "__rarity__");
    assert!((share - 10.0 / 11.0).abs() < 0.05, "share {share}");
}

#[test]
fn test_uniform_block_is_roughly_balanced() {
    let engine = WildcardEngine::from_config(StoreConfig::default());
    let trials = 1500;
    let mut counts = [0usize; 3];
    for seed in 0..trials {
        match engine.process("{a|b|c}", Some(seed)).as_str() {
            "a" => counts[0] += 1,
            "b" => counts[1] += 1,
            "c" => counts[2] += 1,
            other => panic!("unexpected {other}"),
        }
    }
    for count in counts {
        let share = count as f64 / trials as f64;
        assert!((share - 1.0 / 3.0).abs() < 0.05, "counts {counts:?}");
    }
}

#[test]
fn test_multi_select_correctness() {
    let engine = WildcardEngine::from_config(StoreConfig::default());
    let allowed = ["a", "b", "c", "d", "e"];
    for seed in 0..500 {
        let out = engine.process("{3$$, $$a|b|c|d|e}", Some(seed));
        let parts: Vec<&str> = out.split(", ").collect();
        assert_eq!(parts.len(), 3, "{out}");
        let unique: HashSet<&str> = parts.iter().copied().collect();
        assert_eq!(unique.len(), 3, "{out}");
        assert!(parts.iter().all(|p| allowed.contains(p)), "{out}");
    }
}

#[test]
fn test_multi_select_covers_every_option() {
    let engine = WildcardEngine::from_config(StoreConfig::default());
    let mut seen = HashSet::new();
    for seed in 0..200 {
        let out = engine.process("{2$$ / $$a|b|c|d|e}", Some(seed));
        seen.extend(out.split(" / ").map(String::from));
    }
    assert_eq!(seen.len(), 5);
}

#[test]
fn test_cycle_safety() {
    let fixture = WildcardTreeFixture::new();
    fixture.add_txt("a", &["__b__"]);
    fixture.add_txt("b", &["__a__"]);
    for mode in [LoadMode::Eager, LoadMode::Lazy] {
        let engine = fixture.engine(mode);
        let out = engine.process("__a__", Some(1));
        assert!(out.contains("__a__") || out.contains("__b__"), "{out}");
    }
}

#[test]
fn test_self_reference_with_exit_terminates() {
    let fixture = WildcardTreeFixture::new();
    fixture.add_txt("chain", &["link __chain__", "end"]);
    let engine = fixture.engine(LoadMode::Eager);
    for seed in 0..20 {
        let out = engine.process("__chain__", Some(seed));
        assert!(out.ends_with("end") || out.ends_with("__chain__"), "{out}");
    }
}
