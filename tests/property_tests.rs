//! Property-based tests for identifier and routing invariants.
//!
//! Tests validate:
//! 1. Bracketed values are placeholders and malformed regions are rejected
//! 2. Route lookup is deterministic and exact-match only

use notification_app::model::{is_placeholder, RegionId};
use notification_app::router::RouteTable;
use proptest::prelude::*;

// ===== Property 1: Placeholders and Regions =====

proptest! {
    #[test]
    fn bracketed_values_are_placeholders(name in "[A-Z_]{1,20}", pad in " {0,3}") {
        let value = format!("{pad}<{name}>{pad}");
        prop_assert!(is_placeholder(&value));
    }

    #[test]
    fn regions_with_uppercase_are_rejected(region in "[a-z]{2}-[A-Z]{1,6}-[1-9]") {
        prop_assert!(RegionId::new(region).is_err());
    }
}

// ===== Property 2: Route Lookup Stability =====

proptest! {
    #[test]
    fn route_lookup_is_deterministic(path in "/?[a-z/]{0,12}") {
        let table = RouteTable::default();

        let first = table.resolve(&path).map(|e| e.view());
        let second = table.resolve(&path).map(|e| e.view());

        prop_assert_eq!(first.clone(), second);
        prop_assert_eq!(first.is_ok(), path == "/");
    }

    #[test]
    fn not_found_reports_requested_path(path in "/[a-z]{1,12}") {
        let table = RouteTable::default();

        let err = table.resolve(&path).unwrap_err();

        prop_assert_eq!(err.path, path);
    }
}
