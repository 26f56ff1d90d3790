//! Wildcard expansion against the entries of a single directory.

use std::{ffi::OsString, io, path::Path};

use glob::{MatchOptions, Pattern, PatternError};
use itertools::Itertools;
use thiserror::Error;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

#[derive(Debug, Error)]
pub enum GlobError {
    #[error("cannot read working directory: {0}")]
    ReadDir(#[source] io::Error),
    #[error("invalid pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: PatternError,
    },
}

/// Anything that can list the names in a directory. The parser only ever sees
/// this, never the filesystem directly.
pub trait EntrySource {
    fn entries(&self) -> io::Result<Vec<OsString>>;
}

impl EntrySource for Path {
    fn entries(&self) -> io::Result<Vec<OsString>> {
        std::fs::read_dir(self)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }
}

impl EntrySource for [&str] {
    fn entries(&self) -> io::Result<Vec<OsString>> {
        Ok(self.iter().map(OsString::from).collect())
    }
}

pub fn is_pattern(token: &str) -> bool {
    token.contains(['*', '?'])
}

/// Expands `pattern` against `source`, returning matching names in sorted
/// order. Hidden entries never match. Failures go to `report` and produce no
/// matches.
pub fn expand<S, F>(pattern: &str, source: &S, mut report: F) -> Vec<String>
where
    S: EntrySource + ?Sized,
    F: FnMut(GlobError),
{
    let compiled = match Pattern::new(pattern) {
        Ok(compiled) => compiled,
        Err(source) => {
            report(GlobError::Pattern {
                pattern: pattern.to_owned(),
                source,
            });
            return Vec::new();
        }
    };

    let entries = match source.entries() {
        Ok(entries) => entries,
        Err(err) => {
            report(GlobError::ReadDir(err));
            return Vec::new();
        }
    };

    entries
        .into_iter()
        // non-UTF-8 names cannot be passed on as arguments
        .filter_map(|name| name.into_string().ok())
        .filter(|name| !name.starts_with('.'))
        .filter(|name| compiled.matches_with(name, MATCH_OPTIONS))
        .sorted()
        .collect()
}
