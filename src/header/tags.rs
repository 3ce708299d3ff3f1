//! Header tag identifiers and their storage types.

use std::fmt;
use std::str::FromStr;

/// Storage type of a header entry.
///
/// The numeric values match the type codes found in a header index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    Null = 0,
    Char = 1,
    Int8 = 2,
    Int16 = 3,
    Int32 = 4,
    Int64 = 5,
    String = 6,
    Binary = 7,
    StringArray = 8,
    I18nString = 9,
}

impl TagType {
    /// Decode an index entry type code.
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        Some(match code {
            0 => Self::Null,
            1 => Self::Char,
            2 => Self::Int8,
            3 => Self::Int16,
            4 => Self::Int32,
            5 => Self::Int64,
            6 => Self::String,
            7 => Self::Binary,
            8 => Self::StringArray,
            9 => Self::I18nString,
            _ => return None,
        })
    }

    /// Byte width of one element for fixed-size types.
    #[must_use]
    pub const fn element_size(self) -> Option<usize> {
        match self {
            Self::Char | Self::Int8 | Self::Binary => Some(1),
            Self::Int16 => Some(2),
            Self::Int32 => Some(4),
            Self::Int64 => Some(8),
            Self::Null | Self::String | Self::StringArray | Self::I18nString => None,
        }
    }

    /// Whether values of this type are read as numbers.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Char | Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64
        )
    }
}

macro_rules! header_tags {
    ($( $(#[$meta:meta])* $variant:ident = $id:literal, $name:literal, $ty:ident; )+) => {
        /// A header tag the extraction pipeline reads.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u32)]
        pub enum Tag {
            $( $(#[$meta])* $variant = $id, )+
        }

        impl Tag {
            /// Every known tag, in declaration order.
            pub const ALL: &'static [Tag] = &[ $( Tag::$variant, )+ ];

            /// Numeric tag id as stored in a header index.
            #[must_use]
            pub const fn id(self) -> u32 {
                self as u32
            }

            /// Upper-case tag name used in header dumps.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $( Tag::$variant => $name, )+
                }
            }

            /// Storage type the tag is written with.
            #[must_use]
            pub const fn tag_type(self) -> TagType {
                match self {
                    $( Tag::$variant => TagType::$ty, )+
                }
            }

            /// Look a tag up by its numeric id.
            #[must_use]
            pub const fn from_id(id: u32) -> Option<Tag> {
                match id {
                    $( $id => Some(Tag::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

header_tags! {
    SigPgp = 259, "SIGPGP", Binary;
    SigGpg = 262, "SIGGPG", Binary;
    /// Content-addressed header id.
    HeaderId = 269, "SHA1HEADER", String;
    Name = 1000, "NAME", String;
    Version = 1001, "VERSION", String;
    Release = 1002, "RELEASE", String;
    Epoch = 1003, "EPOCH", Int32;
    Summary = 1004, "SUMMARY", I18nString;
    Description = 1005, "DESCRIPTION", I18nString;
    BuildTime = 1006, "BUILDTIME", Int32;
    BuildHost = 1007, "BUILDHOST", String;
    Size = 1009, "SIZE", Int32;
    Vendor = 1011, "VENDOR", String;
    License = 1014, "LICENSE", String;
    Packager = 1015, "PACKAGER", String;
    Group = 1016, "GROUP", I18nString;
    Url = 1020, "URL", String;
    Arch = 1022, "ARCH", String;
    FileModes = 1030, "FILEMODES", Int16;
    FileFlags = 1037, "FILEFLAGS", Int32;
    SourceRpm = 1044, "SOURCERPM", String;
    ArchiveSize = 1046, "ARCHIVESIZE", Int32;
    ProvideName = 1047, "PROVIDENAME", StringArray;
    RequireFlags = 1048, "REQUIREFLAGS", Int32;
    RequireName = 1049, "REQUIRENAME", StringArray;
    RequireVersion = 1050, "REQUIREVERSION", StringArray;
    ConflictFlags = 1053, "CONFLICTFLAGS", Int32;
    ConflictName = 1054, "CONFLICTNAME", StringArray;
    ConflictVersion = 1055, "CONFLICTVERSION", StringArray;
    ChangelogTime = 1080, "CHANGELOGTIME", Int32;
    ChangelogName = 1081, "CHANGELOGNAME", StringArray;
    ChangelogText = 1082, "CHANGELOGTEXT", StringArray;
    ObsoleteName = 1090, "OBSOLETENAME", StringArray;
    /// Non-zero on source packages.
    SourcePackage = 1106, "SOURCEPACKAGE", Int32;
    ProvideFlags = 1112, "PROVIDEFLAGS", Int32;
    ProvideVersion = 1113, "PROVIDEVERSION", StringArray;
    ObsoleteFlags = 1114, "OBSOLETEFLAGS", Int32;
    ObsoleteVersion = 1115, "OBSOLETEVERSION", StringArray;
    DirIndexes = 1116, "DIRINDEXES", Int32;
    BaseNames = 1117, "BASENAMES", StringArray;
    DirNames = 1118, "DIRNAMES", StringArray;
    OldSuggestsName = 1156, "OLDSUGGESTSNAME", StringArray;
    OldSuggestsVersion = 1157, "OLDSUGGESTSVERSION", StringArray;
    OldSuggestsFlags = 1158, "OLDSUGGESTSFLAGS", Int32;
    OldEnhancesName = 1159, "OLDENHANCESNAME", StringArray;
    OldEnhancesVersion = 1160, "OLDENHANCESVERSION", StringArray;
    OldEnhancesFlags = 1161, "OLDENHANCESFLAGS", Int32;
    RecommendName = 5046, "RECOMMENDNAME", StringArray;
    RecommendVersion = 5047, "RECOMMENDVERSION", StringArray;
    RecommendFlags = 5048, "RECOMMENDFLAGS", Int32;
    SuggestName = 5049, "SUGGESTNAME", StringArray;
    SuggestVersion = 5050, "SUGGESTVERSION", StringArray;
    SuggestFlags = 5051, "SUGGESTFLAGS", Int32;
    SupplementName = 5052, "SUPPLEMENTNAME", StringArray;
    SupplementVersion = 5053, "SUPPLEMENTVERSION", StringArray;
    SupplementFlags = 5054, "SUPPLEMENTFLAGS", Int32;
    EnhanceName = 5055, "ENHANCENAME", StringArray;
    EnhanceVersion = 5056, "ENHANCEVERSION", StringArray;
    EnhanceFlags = 5057, "ENHANCEFLAGS", Int32;
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tag {
    type Err = crate::error::RepodataError;

    /// Accepts the dump name (`REQUIRENAME`), case-insensitively, with an
    /// optional `RPMTAG_` prefix. `HDRID` is accepted for the header id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let bare = upper.strip_prefix("RPMTAG_").unwrap_or(&upper);
        if bare == "HDRID" {
            return Ok(Self::HeaderId);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|tag| tag.name() == bare)
            .ok_or_else(|| crate::error::RepodataError::unknown_tag(s))
    }
}
