//! Property-based tests for version comparison and EVR parsing.

use proptest::prelude::*;
use repodata_tools::version::{compare_dependency, rpmvercmp, DependencyOrder, Epoch, Evr};
use std::cmp::Ordering;

fn version_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(r"[0-9a-z._~^+]{0,16}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn rpmvercmp_is_reflexive(v in version_string()) {
        prop_assert_eq!(rpmvercmp(v.as_bytes(), v.as_bytes()), Ordering::Equal);
    }

    #[test]
    fn rpmvercmp_is_antisymmetric(a in version_string(), b in version_string()) {
        let forward = rpmvercmp(a.as_bytes(), b.as_bytes());
        let backward = rpmvercmp(b.as_bytes(), a.as_bytes());
        prop_assert_eq!(forward, backward.reverse(), "{:?} vs {:?}", a, b);
    }

    #[test]
    fn tilde_sorts_before_release(base in "[0-9]{1,3}(\\.[0-9]{1,3}){0,2}", pre in "[a-z0-9]{1,5}") {
        let tilde = format!("{base}~{pre}");
        prop_assert_eq!(rpmvercmp(tilde.as_bytes(), base.as_bytes()), Ordering::Less);
    }

    #[test]
    fn evr_parse_doesnt_panic(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let evr = Evr::parse(&bytes);
        let _ = evr.to_string();
        let _ = evr.epoch_or_default();
    }

    #[test]
    fn evr_parse_recovers_components(
        epoch in "[0-9]{1,3}",
        version in "[0-9a-z.]{1,10}",
        release in "[0-9a-z.]{1,10}",
    ) {
        let s = format!("{epoch}:{version}-{release}");
        let evr = Evr::parse(s.as_bytes());
        prop_assert_eq!(evr.epoch, Epoch::Numeric(epoch.as_bytes()));
        prop_assert_eq!(evr.version, Some(version.as_bytes()));
        prop_assert_eq!(evr.release, Some(release.as_bytes()));
        prop_assert!(evr.is_valid());
    }

    #[test]
    fn compare_dependency_doesnt_panic(a in "\\PC{0,40}", b in "\\PC{0,40}") {
        let _ = compare_dependency(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn compare_dependency_flips_with_arguments(
        a in "libc\\.so\\.6\\((GLIBC_[0-9]\\.[0-9]{1,2})?\\)(\\(64bit\\))?",
        b in "libc\\.so\\.6\\((GLIBC_[0-9]\\.[0-9]{1,2})?\\)(\\(64bit\\))?",
    ) {
        let expected = match compare_dependency(a.as_bytes(), b.as_bytes()) {
            DependencyOrder::FirstWins => DependencyOrder::SecondWins,
            DependencyOrder::SecondWins => DependencyOrder::FirstWins,
            other => other,
        };
        prop_assert_eq!(compare_dependency(b.as_bytes(), a.as_bytes()), expected);
    }
}
