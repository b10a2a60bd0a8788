use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Deserialize;
use tracing::warn;

use crate::version::GameVersion;

/// Version-gated behaviour toggles, same shape as the JSON tables shipped
/// with protocol data dumps.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub versions: Vec<VersionCondition>,
}

/// One disjunct of a feature's version gate: either a single condition
/// string or an AND-list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VersionCondition {
    One(String),
    All(Vec<String>),
}

static DEFAULT_FEATURES: &str = include_str!("../features.json");

/// The features enabled for one world version. Built once, then queried by
/// name during simulator construction.
#[derive(Debug, Clone, Default)]
pub struct FeatureSet {
    enabled: HashSet<String>,
}

impl FeatureSet {
    pub fn new(features: &[Feature], version: &GameVersion) -> Self {
        let mut enabled = HashSet::new();
        for feature in features {
            let on = feature
                .versions
                .iter()
                .any(|cond| condition_matches(cond, version));
            if on {
                enabled.insert(feature.name.clone());
            }
        }
        Self { enabled }
    }

    /// The embedded default feature table.
    pub fn standard(version: &GameVersion) -> Self {
        let features: Vec<Feature> =
            serde_json::from_str(DEFAULT_FEATURES).expect("embedded feature table is well formed");
        Self::new(&features, version)
    }

    pub fn enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }
}

fn condition_matches(cond: &VersionCondition, version: &GameVersion) -> bool {
    match cond {
        VersionCondition::One(term) => term_matches(term, version),
        VersionCondition::All(terms) => terms.iter().all(|t| term_matches(t, version)),
    }
}

fn term_matches(term: &str, version: &GameVersion) -> bool {
    let Some((pred, param)) = term.split_once(' ') else {
        // A bare version string gates on the major version.
        return version.major_version() == term;
    };
    let ord = match version.compare(param.trim()) {
        Ok(ord) => ord,
        Err(err) => {
            warn!(term, %err, "unparsable feature version condition");
            return false;
        }
    };
    match pred {
        ">" => ord == Ordering::Greater,
        ">=" => ord != Ordering::Less,
        "<" => ord == Ordering::Less,
        "<=" => ord != Ordering::Greater,
        "==" => ord == Ordering::Equal,
        _ => {
            warn!(term, "unknown feature version predicate");
            false
        }
    }
}
