use std::collections::{HashMap, HashSet};

/// Tokens a reader treats as "no value" out of the box.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Set of raw cell texts that load as null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaTokens {
    tokens: HashSet<String>,
}

impl NaTokens {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    /// Matches the raw field exactly; no trimming.
    pub fn is_na(&self, raw: &str) -> bool {
        self.tokens.contains(raw)
    }

    /// `None` for a missing marker, the text otherwise.
    pub fn cell<'a>(&self, raw: &'a str) -> Option<&'a str> {
        if self.is_na(raw) {
            None
        } else {
            Some(raw)
        }
    }
}

impl Default for NaTokens {
    fn default() -> Self {
        Self::new(DEFAULT_NA_VALUES.iter().copied())
    }
}

/// Renames repeated header names to `name.1`, `name.2`, ... in order of
/// appearance. The first occurrence keeps its name.
pub fn mangle_duplicate_headers<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut suffixes: HashMap<&'a str, usize> = HashMap::new();
    let mut out = Vec::new();

    for name in raw {
        let mut candidate = name.to_string();
        if seen.contains(&candidate) {
            let n = suffixes.entry(name).or_insert(0);
            loop {
                *n += 1;
                candidate = format!("{}.{}", name, n);
                if !seen.contains(&candidate) {
                    break;
                }
            }
        }
        seen.insert(candidate.clone());
        out.push(candidate);
    }
    out
}
