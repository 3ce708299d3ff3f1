//! Dependency relationships.

use super::PoolStr;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The eight relationship kinds a package record carries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Provides,
    Conflicts,
    Obsoletes,
    Requires,
    Suggests,
    Enhances,
    Recommends,
    Supplements,
}

impl DependencyKind {
    pub const ALL: [Self; 8] = [
        Self::Provides,
        Self::Conflicts,
        Self::Obsoletes,
        Self::Requires,
        Self::Suggests,
        Self::Enhances,
        Self::Recommends,
        Self::Supplements,
    ];

    /// Element name used in primary metadata.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provides => "provides",
            Self::Conflicts => "conflicts",
            Self::Obsoletes => "obsoletes",
            Self::Requires => "requires",
            Self::Suggests => "suggests",
            Self::Enhances => "enhances",
            Self::Recommends => "recommends",
            Self::Supplements => "supplements",
        }
    }

    /// Weak dependencies: hints a resolver may ignore.
    #[must_use]
    pub const fn is_weak(self) -> bool {
        matches!(
            self,
            Self::Suggests | Self::Enhances | Self::Recommends | Self::Supplements
        )
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Version comparison operator of a versioned dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Comparison {
    Lt,
    Gt,
    Eq,
    Le,
    Ge,
}

impl Comparison {
    /// Sense bits that encode the operator.
    pub const SENSE_MASK: u64 = 0x0f;

    /// Decode the low sense bits of a dependency flags word.
    ///
    /// Combinations other than the five operators (including "no operator")
    /// yield `None`.
    #[must_use]
    pub const fn from_flags(flags: u64) -> Option<Self> {
        match flags & Self::SENSE_MASK {
            2 => Some(Self::Lt),
            4 => Some(Self::Gt),
            8 => Some(Self::Eq),
            10 => Some(Self::Le),
            12 => Some(Self::Ge),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lt => "LT",
            Self::Gt => "GT",
            Self::Eq => "EQ",
            Self::Le => "LE",
            Self::Ge => "GE",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One normalized dependency entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    pub name: PoolStr,
    pub flags: Option<Comparison>,
    pub epoch: Option<PoolStr>,
    pub version: Option<PoolStr>,
    pub release: Option<PoolStr>,
    /// Needed before installation (pre-install scriptlets or prereq).
    pub pre: bool,
}

/// Dependency lists of a record, one per kind, each in first-accepted order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependencies {
    lists: [Vec<Dependency>; 8],
}

impl Dependencies {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, kind: DependencyKind) -> &[Dependency] {
        &self.lists[kind.index()]
    }

    pub fn push(&mut self, kind: DependencyKind, dependency: Dependency) {
        self.lists[kind.index()].push(dependency);
    }

    /// Non-empty lists in canonical kind order.
    pub fn iter(&self) -> impl Iterator<Item = (DependencyKind, &[Dependency])> {
        DependencyKind::ALL
            .iter()
            .map(move |&kind| (kind, self.get(kind)))
            .filter(|(_, deps)| !deps.is_empty())
    }

    /// Total number of entries over all kinds.
    #[must_use]
    pub fn total(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }
}
