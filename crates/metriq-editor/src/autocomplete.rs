//! # Autocomplete Filtering
//!
//! Token filter for property-name completion, matching the behavior of
//! the modeled widget's completion hook: array-index segments and a
//! stray quote are stripped from the typed token, the candidate must
//! start with the token's dotted prefix, and the final segment matches
//! case-insensitively anywhere in the candidate.

/// Completion source configured from the host's candidate list.
#[derive(Debug, Clone, Default)]
pub struct AutoComplete {
    case_sensitive: bool,
    options: Vec<String>,
}

impl AutoComplete {
    /// Case-insensitive matcher over the given candidates.
    pub fn new(options: Vec<String>) -> Self {
        AutoComplete {
            case_sensitive: false,
            options,
        }
    }

    /// The full candidate list.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Whether `item` completes the typed `token`.
    pub fn accepts(&self, token: &str, item: &str) -> bool {
        let token = normalize_token(token);
        let (prefix, segment) = match token.rfind('.') {
            Some(dot) => (&token[..dot], &token[dot + 1..]),
            None => ("", token.as_str()),
        };
        if !item.starts_with(prefix) {
            return false;
        }
        if self.case_sensitive {
            item.contains(segment)
        } else {
            item.to_lowercase().contains(&segment.to_lowercase())
        }
    }

    /// All candidates completing `token`.
    pub fn matches(&self, token: &str) -> Vec<&str> {
        self.options
            .iter()
            .map(String::as_str)
            .filter(|item| self.accepts(token, item))
            .collect()
    }
}

/// Strip `.digits.` array-index runs and the first quote from a token,
/// so `"series.0.na` filters like `series.na`-shaped input.
fn normalize_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let mut out = String::with_capacity(token.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '.' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            if j < chars.len() && chars[j] == '.' {
                i = j + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    if let Some(pos) = out.find('"') {
        out.remove(pos);
    }
    out
}
