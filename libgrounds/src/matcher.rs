use indexmap::IndexMap;
use regex::Regex;

use crate::{Error, Result};

/// Compiled capture patterns, one regex per group name.
///
/// Group order follows the configuration and decides the iteration order of
/// every later merge, so it is preserved here.
#[derive(Debug)]
pub struct PatternSet {
    patterns: IndexMap<String, Regex>,
}

impl PatternSet {
    /// Compile a group-name to pattern mapping.
    pub fn compile(patterns: &IndexMap<String, String>) -> Result<PatternSet> {
        let mut compiled = IndexMap::new();
        for (group, pattern) in patterns {
            let regex = Regex::new(pattern).map_err(|err| {
                Error::Config(format!("invalid pattern for group `{}': {}", group, err))
            })?;
            compiled.insert(group.clone(), regex);
        }

        Ok(PatternSet { patterns: compiled })
    }

    /// All non-overlapping matches of every group's pattern within the
    /// filename, in match order. Groups without a match stay present with an
    /// empty sequence; a filename no group matches at all is unparseable.
    pub fn captures(&self, filename: &str) -> Result<IndexMap<String, Vec<String>>> {
        let mut captures = IndexMap::new();
        let mut matched = 0;

        for (group, regex) in &self.patterns {
            let values: Vec<String> = regex
                .find_iter(filename)
                .map(|found| found.as_str().to_string())
                .collect();
            matched += values.len();
            captures.insert(group.clone(), values);
        }

        if captures.is_empty() || matched == 0 {
            return Err(Error::Parse(format!(
                "unable to parse document filename `{}'",
                filename
            )));
        }

        Ok(captures)
    }
}
