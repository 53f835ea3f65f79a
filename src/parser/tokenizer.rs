use std::collections::HashMap;

use crate::errors::ParseError;

use super::syntax::Prefix;

/// Preamble plus every value seen for each recognized prefix, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMap {
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`.
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_present(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    /// Fails when any of `prefixes` was supplied more than once.
    pub fn verify_no_duplicate_prefixes_for(&self, prefixes: &[Prefix]) -> Result<(), ParseError> {
        let duplicated: Vec<&str> = prefixes
            .iter()
            .filter(|prefix| self.all_values(**prefix).len() > 1)
            .map(|prefix| prefix.as_str())
            .collect();
        if duplicated.is_empty() {
            Ok(())
        } else {
            Err(ParseError::DuplicatePrefixes(duplicated.join(" ")))
        }
    }
}

/// Splits `args` on the given prefixes. A prefix only counts at the start of
/// the input or right after whitespace, so `x/` inside a word is plain text.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMap {
    let mut positions: Vec<(usize, Prefix)> = Vec::new();
    for prefix in prefixes {
        let marker = prefix.as_str();
        positions.extend(
            args.match_indices(marker)
                .map(|(start, _)| start)
                .filter(|start| is_token_start(args, *start))
                .map(|start| (start, *prefix)),
        );
    }
    positions.sort_by_key(|(start, _)| *start);

    let preamble_end = positions.first().map(|(start, _)| *start).unwrap_or(args.len());
    let mut map = ArgumentMap {
        preamble: args[..preamble_end].trim().to_string(),
        values: HashMap::new(),
    };

    for (i, (start, prefix)) in positions.iter().enumerate() {
        let value_start = start + prefix.as_str().len();
        let value_end = positions
            .get(i + 1)
            .map(|(next, _)| *next)
            .unwrap_or(args.len());
        let value = args[value_start..value_end].trim().to_string();
        map.values.entry(*prefix).or_default().push(value);
    }
    map
}

fn is_token_start(args: &str, start: usize) -> bool {
    start == 0
        || args[..start]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace)
}
