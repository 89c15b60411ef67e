//! Cross-module property tests: round-trip, the total-ordering laws, the
//! pre-release/build precedence rules, and satisfies-equals-lowering.
//! Generators build a version *string* and parse
//! it (never construct a `Version` by hand) so every sample is guaranteed
//! grammar-valid, the same pattern the `canardleteer-proptest-semver`
//! example uses for `semver::Version`.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;
use semver2::Version;

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn arb_component() -> impl Strategy<Value = u64> {
    0u64..10_000u64
}

fn arb_alpha_identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9-]{0,5}".prop_map(|s| s)
}

fn arb_numeric_identifier() -> impl Strategy<Value = String> {
    arb_component().prop_map(|n| n.to_string())
}

fn arb_identifier() -> impl Strategy<Value = String> {
    prop_oneof![arb_alpha_identifier(), arb_numeric_identifier()]
}

fn arb_identifier_list(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(arb_identifier(), 1..=max_len).prop_map(|ids| ids.join("."))
}

fn arb_version_string() -> impl Strategy<Value = String> {
    (
        arb_component(),
        arb_component(),
        arb_component(),
        proptest::option::of(arb_identifier_list(3)),
        proptest::option::of(arb_identifier_list(3)),
    )
        .prop_map(|(major, minor, patch, pre, build)| {
            let mut s = format!("{}.{}.{}", major, minor, patch);
            if let Some(pre) = pre {
                s.push('-');
                s.push_str(&pre);
            }
            if let Some(build) = build {
                s.push('+');
                s.push_str(&build);
            }
            s
        })
}

fn arb_version() -> impl Strategy<Value = Version> {
    arb_version_string().prop_map(|s| Version::parse(&s).unwrap())
}

proptest! {
    #[test]
    fn round_trip(s in arb_version_string()) {
        let parsed_once = Version::parse(&s).unwrap();
        let parsed_twice = Version::parse(&parsed_once.to_string()).unwrap();
        prop_assert_eq!(parsed_once, parsed_twice);
    }

    #[test]
    fn default_ordering_is_antisymmetric_and_hash_consistent(a in arb_version(), b in arb_version()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        if a == b {
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
    }

    #[test]
    fn default_ordering_is_transitive(a in arb_version(), b in arb_version(), c in arb_version()) {
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
    }

    #[test]
    fn prerelease_ranks_below_the_same_release(
        major in arb_component(), minor in arb_component(), patch in arb_component(),
        pre in arb_identifier_list(3),
    ) {
        let with_pre = Version::parse(&format!("{}.{}.{}-{}", major, minor, patch, pre)).unwrap();
        let without_pre = Version::new(major, minor, patch);
        prop_assert!(with_pre < without_pre);
    }

    #[test]
    fn build_is_ignored_by_default_ordering(
        major in arb_component(), minor in arb_component(), patch in arb_component(),
        build in arb_identifier_list(3),
    ) {
        let with_build = Version::parse(&format!("{}.{}.{}+{}", major, minor, patch, build)).unwrap();
        let without_build = Version::new(major, minor, patch);
        prop_assert_eq!(&with_build, &without_build);
        prop_assert_eq!(hash_of(&with_build), hash_of(&without_build));
    }

    #[test]
    fn build_aware_order_prefers_the_version_without_build(
        major in arb_component(), minor in arb_component(), patch in arb_component(),
        build in arb_identifier_list(3),
    ) {
        let with_build = Version::parse(&format!("{}.{}.{}+{}", major, minor, patch, build)).unwrap();
        let without_build = Version::new(major, minor, patch);
        prop_assert_eq!(without_build.compare_with_build(&with_build), Ordering::Greater);
    }

    #[test]
    fn increments_reset_lower_components(v in arb_version()) {
        if let Ok(bumped_major) = v.increment_major(None) {
            prop_assert_eq!(bumped_major.minor(), 0);
            prop_assert_eq!(bumped_major.patch(), 0);
        }
        if let Ok(bumped_minor) = v.increment_minor(None) {
            prop_assert_eq!(bumped_minor.patch(), 0);
        }
    }

    #[test]
    fn satisfies_range_agrees_with_direct_comparison(
        major in arb_component(), minor in arb_component(), patch in arb_component(),
    ) {
        let v = Version::new(major, minor, patch);
        prop_assert!(v.satisfies_range(&format!("={}", v)).unwrap());
        prop_assert!(!v.satisfies_range(&format!(">{}", v)).unwrap());
    }

    #[test]
    fn identity_range_is_idempotent(v in arb_version()) {
        let round_tripped = Version::parse(&v.to_string()).unwrap();
        prop_assert!(round_tripped.satisfies_range(&format!("={}", v)).unwrap());
    }
}
