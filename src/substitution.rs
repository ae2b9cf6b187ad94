//! Name-substitution mapping derived from the configuration.
//!
//! The template library is written against a module called `register_file`.
//! Every identifier derived from that name is a token, and each token maps to the
//! same identifier derived from the configured module name instead.

use crate::config::ValidatedConfig;
use crate::constants::{TEMPLATE_MODULE_TOKEN, TEMPLATE_TIMESCALE_TOKEN};
use crate::error::Result;
use regex::Regex;

/// Suffixes appended to the module name, in application order.
const NAME_SUFFIXES: [&str; 15] = [
    "tb",
    "transaction",
    "driver",
    "monitor",
    "agent",
    "env",
    "scoreboard",
    "sequence",
    "write_sequence",
    "read_sequence",
    "random_sequence",
    "base_test",
    "basic_test",
    "random_test",
    "test",
];

/// Ordered, immutable list of `(token, replacement)` pairs.
///
/// The tokens are also compiled into one alternation, longest token first,
/// so a single scan finds the leftmost-longest token at every position.
#[derive(Debug, Clone)]
pub struct SubstitutionMap {
    pairs: Vec<(String, String)>,
    pattern: Option<Regex>,
}

impl SubstitutionMap {
    /// Builds a map from explicit pairs, keeping their order.
    ///
    /// # Errors
    /// * `Error::PatternError` if the token alternation cannot be compiled
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let pairs: Vec<(String, String)> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(k, _)| !k.is_empty())
            .collect();

        let mut tokens: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        // Stable sort: among equal lengths, map order decides.
        tokens.sort_by(|a, b| b.len().cmp(&a.len()));
        let pattern = if tokens.is_empty() {
            None
        } else {
            let alternation: Vec<String> = tokens.iter().map(|t| regex::escape(t)).collect();
            Some(Regex::new(&alternation.join("|"))?)
        };

        Ok(Self { pairs, pattern })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// First replacement recorded for `token`.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == token).map(|(_, v)| v)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Token alternation, `None` for an empty map.
    pub(crate) fn pattern(&self) -> Option<&Regex> {
        self.pattern.as_ref()
    }
}

impl PartialEq for SubstitutionMap {
    fn eq(&self, other: &Self) -> bool {
        self.pairs == other.pairs
    }
}

impl Eq for SubstitutionMap {}

/// Derives the substitution map for one run.
///
/// Order: the timescale directive, the interface name, every suffixed name,
/// then the bare module name last. Matching does not depend on this order:
/// a longer token always wins over a token it contains.
pub fn build(config: &ValidatedConfig) -> Result<SubstitutionMap> {
    let module = &config.module_name;
    let mut pairs = Vec::with_capacity(NAME_SUFFIXES.len() + 3);

    pairs.push((
        TEMPLATE_TIMESCALE_TOKEN.to_string(),
        format!("`timescale {}", config.timescale),
    ));
    pairs.push((
        format!("{TEMPLATE_MODULE_TOKEN}_if"),
        config.interface_name.clone(),
    ));
    for suffix in NAME_SUFFIXES {
        pairs.push((
            format!("{TEMPLATE_MODULE_TOKEN}_{suffix}"),
            format!("{module}_{suffix}"),
        ));
    }
    pairs.push((TEMPLATE_MODULE_TOKEN.to_string(), module.clone()));

    SubstitutionMap::from_pairs(pairs)
}
