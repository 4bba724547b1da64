use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static RE_BRACKET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^\[\]]*)\[([^\[\]]*)\](.*)$").unwrap());
static RE_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)-(\d+)$").unwrap());

/// Largest number of hosts a single bracket expression may expand to.
pub const MAX_EXPANDED_HOSTS: usize = 65_536;

/// Deduplicated set of host names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSet {
    hosts: BTreeSet<String>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every host named by a node-list string such as `c[01-04,07],gpu1`.
    pub fn push_hostlist(&mut self, hostlist: &str) {
        self.hosts.extend(expand_hostlist(hostlist));
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

}

impl<'a> FromIterator<&'a str> for NodeSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = NodeSet::new();
        for hostlist in iter {
            set.push_hostlist(hostlist);
        }
        set
    }
}

/// Expands a node-list string into individual host names, in order of appearance.
/// Malformed bracket expressions, and ones naming more than
/// [`MAX_EXPANDED_HOSTS`] hosts, are kept verbatim.
pub fn expand_hostlist(hostlist: &str) -> Vec<String> {
    let mut hosts = Vec::new();
    for token in split_top_level(hostlist) {
        let token = token.trim();
        if token.is_empty() || token == "(null)" {
            continue;
        }
        match expand_token(token) {
            Some(expanded) => hosts.extend(expanded),
            None => {
                tracing::warn!(token, "unable to expand hostlist expression");
                hosts.push(token.to_string());
            }
        }
    }
    hosts
}

fn split_top_level(hostlist: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (pos, ch) in hostlist.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                tokens.push(&hostlist[start..pos]);
                start = pos + 1;
            }
            _ => {}
        }
    }
    tokens.push(&hostlist[start..]);
    tokens
}

fn expand_token(token: &str) -> Option<Vec<String>> {
    let capture = match RE_BRACKET.captures(token) {
        Some(capture) => capture,
        None if token.contains('[') || token.contains(']') => return None,
        None => return Some(vec![token.to_string()]),
    };

    let prefix = capture.get(1)?.as_str();
    let ranges = capture.get(2)?.as_str();
    let suffixes = expand_token(capture.get(3)?.as_str())?;

    let mut hosts = Vec::new();
    for item in ranges.split(',') {
        let values = expand_range(item.trim())?;
        let added = values.len().checked_mul(suffixes.len())?;
        if hosts.len().saturating_add(added) > MAX_EXPANDED_HOSTS {
            return None;
        }
        for value in values {
            for suffix in &suffixes {
                hosts.push(format!("{prefix}{value}{suffix}"));
            }
        }
    }
    Some(hosts)
}

fn expand_range(item: &str) -> Option<Vec<String>> {
    if let Some(capture) = RE_RANGE.captures(item) {
        let first = capture.get(1)?.as_str();
        let last = capture.get(2)?.as_str();
        let width = first.len();
        let low = first.parse::<u64>().ok()?;
        let high = last.parse::<u64>().ok()?;
        if high < low || high - low >= MAX_EXPANDED_HOSTS as u64 {
            return None;
        }
        return Some((low..=high).map(|n| format!("{n:0width$}")).collect());
    }

    if !item.is_empty() && item.chars().all(|ch| ch.is_ascii_alphanumeric()) {
        return Some(vec![item.to_string()]);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_ranges_with_zero_padding() {
        assert_eq!(
            expand_hostlist("c[08-11]"),
            vec!["c08", "c09", "c10", "c11"]
        );
    }

    #[test]
    fn expands_mixed_lists() {
        assert_eq!(
            expand_hostlist("gpu[1,3-4],login1"),
            vec!["gpu1", "gpu3", "gpu4", "login1"]
        );
    }

    #[test]
    fn expands_multiple_bracket_groups() {
        assert_eq!(
            expand_hostlist("r[1-2]n[1-2]"),
            vec!["r1n1", "r1n2", "r2n1", "r2n2"]
        );
    }

    #[test]
    fn empty_and_null_lists_have_no_hosts() {
        assert!(expand_hostlist("").is_empty());
        assert!(expand_hostlist("(null)").is_empty());
    }

    #[test]
    fn malformed_expressions_are_kept_verbatim() {
        assert_eq!(expand_hostlist("c[5-1]"), vec!["c[5-1]"]);
        assert_eq!(expand_hostlist("c[1-2"), vec!["c[1-2"]);
    }

    #[test]
    fn oversized_ranges_are_kept_verbatim() {
        assert_eq!(expand_hostlist("c[0-99999999999]"), vec!["c[0-99999999999]"]);
        assert_eq!(
            expand_hostlist("r[1-1000]n[1-1000],login1"),
            vec!["r[1-1000]n[1-1000]", "login1"]
        );
        assert_eq!(expand_hostlist("c[1-65536]").len(), MAX_EXPANDED_HOSTS);
    }

    #[test]
    fn node_set_deduplicates_across_lists() {
        let set: NodeSet = ["c[1-3]", "c[2-4]", "c1"].into_iter().collect();
        assert_eq!(set.len(), 4);
        assert_eq!(set, ["c1", "c2", "c3", "c4"].into_iter().collect());
    }
}
