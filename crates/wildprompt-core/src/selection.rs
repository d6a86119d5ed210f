//! Weighted sampling without replacement.
//!
//! Options are either plain text or carry a `weight::text` prefix. The weight
//! always precedes the `::`; `text::5` is an ordinary literal.

use rand::Rng;

/// One selectable option, parsed once from its source text.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightedOption {
    /// Unweighted text (weight 1).
    Literal(String),
    /// Text with an explicit non-negative weight.
    Weighted(f64, String),
}

impl WeightedOption {
    /// Parses an option segment, recognising a leading `weight::` prefix.
    pub fn parse(segment: &str) -> Self {
        if let Some((head, tail)) = segment.split_once("::") {
            if let Some(weight) = parse_weight(head.trim()) {
                return WeightedOption::Weighted(weight, tail.to_string());
            }
        }
        WeightedOption::Literal(segment.to_string())
    }

    /// The option's selection weight.
    pub fn weight(&self) -> f64 {
        match self {
            WeightedOption::Literal(_) => 1.0,
            WeightedOption::Weighted(weight, _) => *weight,
        }
    }

    /// The option's text with any weight prefix removed.
    pub fn text(&self) -> &str {
        match self {
            WeightedOption::Literal(text) | WeightedOption::Weighted(_, text) => text,
        }
    }
}

/// Parses a non-negative decimal weight (`3`, `0.5`, `.5`, `2.`).
fn parse_weight(s: &str) -> Option<f64> {
    let mut digits = 0usize;
    let mut dots = 0usize;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return None,
        }
    }
    if digits == 0 || dots > 1 {
        return None;
    }
    s.parse::<f64>().ok().filter(|w| w.is_finite())
}

/// Picks up to `count` distinct positions from `weights`, without replacement.
///
/// Each draw picks among the positions not yet chosen with probability
/// proportional to their weight. When every remaining weight is zero the draw
/// falls back to a uniform pick, so a request is never left short while
/// options remain. Positions are returned in draw order.
pub fn choose_indices<R: Rng + ?Sized>(weights: &[f64], count: usize, rng: &mut R) -> Vec<usize> {
    let mut remaining: Vec<usize> = (0..weights.len()).collect();
    let picks = count.min(weights.len());
    let mut chosen = Vec::with_capacity(picks);

    for _ in 0..picks {
        let total: f64 = remaining.iter().map(|&i| sanitize(weights[i])).sum();
        let slot = if total > 0.0 && total.is_finite() {
            weighted_slot(&remaining, weights, total, rng)
        } else {
            rng.gen_range(0..remaining.len())
        };
        chosen.push(remaining.remove(slot));
    }

    chosen
}

/// Picks up to `count` distinct options and returns their texts.
pub fn choose<R: Rng + ?Sized>(options: &[WeightedOption], count: usize, rng: &mut R) -> Vec<String> {
    let weights: Vec<f64> = options.iter().map(WeightedOption::weight).collect();
    choose_indices(&weights, count, rng)
        .into_iter()
        .map(|i| options[i].text().to_string())
        .collect()
}

fn sanitize(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

fn weighted_slot<R: Rng + ?Sized>(
    remaining: &[usize],
    weights: &[f64],
    total: f64,
    rng: &mut R,
) -> usize {
    let roll = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = 0;
    for (slot, &index) in remaining.iter().enumerate() {
        let weight = sanitize(weights[index]);
        if weight == 0.0 {
            continue;
        }
        cumulative += weight;
        last_positive = slot;
        if roll < cumulative {
            return slot;
        }
    }
    // Rounding can leave `roll` a hair above the final cumulative sum.
    last_positive
}
