//! Tolerant JSON loading
//!
//! Skin pack manifests in the wild frequently carry `//` comments,
//! `/* */` blocks, and trailing commas. Loading is two-stage: a strict
//! parse first, then a cleanup pass and exactly one retry. If the retry
//! fails too, the error reports the offending path.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

/// Errors from tolerant JSON loading
#[derive(Debug, thiserror::Error)]
pub enum JsonError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {} (even after comment cleanup): {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Load a JSON document, tolerating comments and trailing commas.
pub fn load_json_file(path: &Path) -> Result<Value, JsonError> {
    let content = fs::read_to_string(path).map_err(|source| JsonError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match serde_json::from_str(&content) {
        Ok(value) => Ok(value),
        Err(_) => {
            let cleaned = strip_comments(&content);
            serde_json::from_str(&cleaned).map_err(|source| JsonError::Parse {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Remove `//` line comments, `/* */` block comments, and trailing
/// commas before a closing `}` or `]`.
///
/// String literals are never touched: the scanner tracks quote and
/// escape state instead of pattern-matching the raw text.
pub fn strip_comments(input: &str) -> String {
    remove_trailing_commas(&remove_comments(input))
}

fn remove_comments(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escape_next = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if in_string {
            if escape_next {
                escape_next = false;
            } else if c == '\\' {
                escape_next = true;
            } else if c == '"' {
                in_string = false;
            }
            out.push(c);
            i += 1;
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
                i += 1;
            }
            '/' if chars.get(i + 1) == Some(&'/') => {
                // Line comment: drop up to (but not including) the newline
                while i < chars.len() && chars[i] != '\n' {
                    i += 1;
                }
            }
            '/' if chars.get(i + 1) == Some(&'*') => {
                i += 2;
                while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                    i += 1;
                }
                i = (i + 2).min(chars.len());
            }
            _ => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

fn remove_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escape_next = false;

    for i in 0..chars.len() {
        let c = chars[i];

        if in_string {
            if escape_next {
                escape_next = false;
            } else if c == '\\' {
                escape_next = true;
            } else if c == '"' {
                in_string = false;
            }
            out.push(c);
            continue;
        }

        if c == '"' {
            in_string = true;
            out.push(c);
            continue;
        }

        // A comma whose next non-whitespace char closes a scope is dropped
        if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                continue;
            }
        }

        out.push(c);
    }

    out
}
