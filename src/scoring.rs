use std::collections::HashMap;
use serde_json::Value;

/// Similarity ratio at or above which two strings count as the same value.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Sequences at least this long leave characters making up more than 1% of them
/// out of the match index.
const AUTOJUNK_MIN_LEN: usize = 200;

/// Character-level similarity in [0, 1]: twice the matched characters over the total length.
///
/// Matches are found Ratcliff/Obershelp style: take the longest common block, then
/// recurse on the unmatched text left and right of it.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * BlockMatcher::new(&a, &b).matched() as f64 / total as f64
}

struct BlockMatcher<'a> {
    a: &'a [char],
    b: &'a [char],
    b2j: HashMap<char, Vec<usize>>,
}

impl<'a> BlockMatcher<'a> {
    fn new(a: &'a [char], b: &'a [char]) -> Self {
        let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, c) in b.iter().enumerate() {
            b2j.entry(*c).or_default().push(j);
        }
        if b.len() >= AUTOJUNK_MIN_LEN {
            let limit = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= limit);
        }
        Self { a, b, b2j }
    }

    /// Longest `a[i..i + k] == b[j..j + k]` inside the ranges; ties go to the smallest `i`, then `j`.
    fn longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> (usize, usize, usize) {
        let (mut besti, mut bestj, mut bestk) = (alo, blo, 0);
        let mut j2len: HashMap<usize, usize> = HashMap::new();

        for i in alo..ahi {
            let mut next = HashMap::new();
            for &j in self.b2j.get(&self.a[i]).map(Vec::as_slice).unwrap_or_default() {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j.checked_sub(1).and_then(|prev| j2len.get(&prev)).copied().unwrap_or(0) + 1;
                next.insert(j, k);
                if k > bestk {
                    (besti, bestj, bestk) = (i + 1 - k, j + 1 - k, k);
                }
            }
            j2len = next;
        }

        // characters dropped from the index can still extend a block
        while besti > alo && bestj > blo && self.a[besti - 1] == self.b[bestj - 1] {
            besti -= 1;
            bestj -= 1;
            bestk += 1;
        }
        while besti + bestk < ahi && bestj + bestk < bhi && self.a[besti + bestk] == self.b[bestj + bestk] {
            bestk += 1;
        }
        (besti, bestj, bestk)
    }

    /// Total size of all matching blocks.
    fn matched(&self) -> usize {
        let mut total = 0;
        let mut pending = vec![(0, self.a.len(), 0, self.b.len())];
        while let Some((alo, ahi, blo, bhi)) = pending.pop() {
            let (i, j, k) = self.longest_match(alo, ahi, blo, bhi);
            if k == 0 {
                continue;
            }
            total += k;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + k < ahi && j + k < bhi {
                pending.push((i + k, ahi, j + k, bhi));
            }
        }
        total
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn coerce_int(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(Value::String(n.to_string())),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    threshold: f64,
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_THRESHOLD)
    }
}

impl Scorer {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn fuzzy_equal(&self, a: &str, b: &str) -> bool {
        similarity(a, b) >= self.threshold
    }

    /// Accuracy of `prediction` against `truth` in [0, 1].
    ///
    /// Strings must match exactly, list items and mapping values are matched fuzzily.
    /// An integer compared with a string is compared as its decimal text.
    pub fn score(&self, prediction: &Value, truth: &Value) -> f64 {
        let (prediction, truth) = match (prediction, truth) {
            (p, t @ Value::String(_)) => match coerce_int(p) {
                Some(p) => return self.score(&p, t),
                None => (p, t),
            },
            (p @ Value::String(_), t) => match coerce_int(t) {
                Some(t) => return self.score(p, &t),
                None => (p, t),
            },
            pair => pair,
        };

        match (truth, prediction) {
            (Value::String(t), p) => match p {
                Value::String(p) if p == t => 1.0,
                _ => 0.0,
            },
            (Value::Array(truth), Value::Array(pred)) => {
                if truth.is_empty() {
                    return 0.0;
                }
                let matched = truth
                    .iter()
                    .filter(|t| {
                        let t = text_of(t);
                        pred.iter().any(|p| self.fuzzy_equal(&t, &text_of(p)))
                    })
                    .count();
                matched as f64 / truth.len() as f64
            }
            (Value::Object(truth), Value::Object(pred)) => {
                if truth.is_empty() {
                    return 0.0;
                }
                let matched = truth
                    .iter()
                    .filter(|(key, t)| match pred.get(key.as_str()) {
                        Some(p) => p == *t || self.fuzzy_equal(&text_of(p), &text_of(t)),
                        None => false,
                    })
                    .count();
                matched as f64 / truth.len() as f64
            }
            _ => 0.0,
        }
    }
}

/// Arithmetic mean of the scores, 0.0 for none.
pub fn mean_accuracy(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

pub fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
