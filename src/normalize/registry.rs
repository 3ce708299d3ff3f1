//! Where each dependency relation lives in a header.

use crate::header::Tag;
use crate::model::DependencyKind;

/// Flags bit marking a legacy weak dependency as strong.
pub const STRONG_FLAG: u64 = 1 << 27;

/// Flags bits that make a requirement a pre-install requirement
/// (prereq, `%pre` and `%post` scriptlet context).
pub const PRE_FLAGS: u64 = (1 << 6) | (1 << 9) | (1 << 10);

/// A relation as stored in the header: the eight kinds plus the two legacy
/// weak relations that predate dedicated tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceRelation {
    Provides,
    Conflicts,
    Obsoletes,
    Requires,
    Suggests,
    Enhances,
    Recommends,
    Supplements,
    OldSuggests,
    OldEnhances,
}

impl SourceRelation {
    /// Kind the relation's entries are filed under. Legacy relations split
    /// on the strong bit.
    #[must_use]
    pub const fn target(self, flags: u64) -> DependencyKind {
        let strong = flags & STRONG_FLAG != 0;
        match self {
            Self::Provides => DependencyKind::Provides,
            Self::Conflicts => DependencyKind::Conflicts,
            Self::Obsoletes => DependencyKind::Obsoletes,
            Self::Requires => DependencyKind::Requires,
            Self::Suggests => DependencyKind::Suggests,
            Self::Enhances => DependencyKind::Enhances,
            Self::Recommends => DependencyKind::Recommends,
            Self::Supplements => DependencyKind::Supplements,
            Self::OldSuggests if strong => DependencyKind::Recommends,
            Self::OldSuggests => DependencyKind::Suggests,
            Self::OldEnhances if strong => DependencyKind::Supplements,
            Self::OldEnhances => DependencyKind::Enhances,
        }
    }
}

/// Tags holding one relation's parallel arrays.
#[derive(Debug, Clone, Copy)]
pub struct RelationSpec {
    pub relation: SourceRelation,
    pub name: Tag,
    pub flags: Tag,
    pub version: Tag,
}

const fn spec(relation: SourceRelation, name: Tag, flags: Tag, version: Tag) -> RelationSpec {
    RelationSpec {
        relation,
        name,
        flags,
        version,
    }
}

/// Relations in processing order. Provides must come before Requires: the
/// requirement filter consults what the package already provides.
pub const RELATIONS: [RelationSpec; 10] = [
    spec(SourceRelation::Provides, Tag::ProvideName, Tag::ProvideFlags, Tag::ProvideVersion),
    spec(SourceRelation::Conflicts, Tag::ConflictName, Tag::ConflictFlags, Tag::ConflictVersion),
    spec(SourceRelation::Obsoletes, Tag::ObsoleteName, Tag::ObsoleteFlags, Tag::ObsoleteVersion),
    spec(SourceRelation::Requires, Tag::RequireName, Tag::RequireFlags, Tag::RequireVersion),
    spec(SourceRelation::Suggests, Tag::SuggestName, Tag::SuggestFlags, Tag::SuggestVersion),
    spec(SourceRelation::Enhances, Tag::EnhanceName, Tag::EnhanceFlags, Tag::EnhanceVersion),
    spec(SourceRelation::Recommends, Tag::RecommendName, Tag::RecommendFlags, Tag::RecommendVersion),
    spec(SourceRelation::Supplements, Tag::SupplementName, Tag::SupplementFlags, Tag::SupplementVersion),
    spec(SourceRelation::OldSuggests, Tag::OldSuggestsName, Tag::OldSuggestsFlags, Tag::OldSuggestsVersion),
    spec(SourceRelation::OldEnhances, Tag::OldEnhancesName, Tag::OldEnhancesFlags, Tag::OldEnhancesVersion),
];

/// Look up the table entry for a relation.
#[must_use]
pub const fn relation_spec(relation: SourceRelation) -> &'static RelationSpec {
    &RELATIONS[relation as usize]
}

/// Every slot holds the relation whose discriminant is its index.
const fn registry_is_ordered() -> bool {
    let mut i = 0;
    while i < RELATIONS.len() {
        if RELATIONS[i].relation as usize != i {
            return false;
        }
        i += 1;
    }
    true
}

const _: () = assert!(registry_is_ordered(), "RELATIONS is out of order");
