//! Determinism helpers.
//!
//! Repeats an expansion and compares BLAKE3 hashes of every run, reporting
//! the first differing run when output is not stable.

/// Result of a determinism check.
#[derive(Debug, Clone)]
pub struct DeterminismResult {
    /// Whether all runs produced identical output.
    pub is_deterministic: bool,
    /// Number of runs performed.
    pub runs: usize,
    /// BLAKE3 hash of the first run.
    pub hash: String,
    /// Index of the first run whose output differed, if any.
    pub first_mismatch: Option<usize>,
}

/// Runs `generate` `runs` times and checks every output matches the first.
pub fn verify_determinism<F>(mut generate: F, runs: usize) -> DeterminismResult
where
    F: FnMut() -> String,
{
    assert!(runs >= 2, "need at least two runs to compare");

    let first = blake3::hash(generate().as_bytes());
    let mut first_mismatch = None;
    for run in 1..runs {
        let hash = blake3::hash(generate().as_bytes());
        if hash != first && first_mismatch.is_none() {
            first_mismatch = Some(run);
        }
    }

    DeterminismResult {
        is_deterministic: first_mismatch.is_none(),
        runs,
        hash: first.to_hex().to_string(),
        first_mismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_output_is_deterministic() {
        let result = verify_determinism(|| "same".to_string(), 3);
        assert!(result.is_deterministic);
        assert_eq!(result.runs, 3);
        assert_eq!(result.hash.len(), 64);
    }

    #[test]
    fn test_changing_output_is_detected() {
        let mut counter = 0;
        let result = verify_determinism(
            || {
                counter += 1;
                format!("run {}", counter)
            },
            3,
        );
        assert!(!result.is_deterministic);
        assert_eq!(result.first_mismatch, Some(1));
    }
}
