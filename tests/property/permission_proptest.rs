//! Property-based tests for the permission lattice

use proptest::prelude::*;

use corkboard::shared::{Permission, Requirement, Scope};

fn permission() -> impl Strategy<Value = Permission> {
    prop_oneof![
        Just(Permission::None),
        Just(Permission::Read),
        Just(Permission::Edit),
        Just(Permission::Owner),
    ]
}

fn requirement() -> impl Strategy<Value = Requirement> {
    prop_oneof![
        Just(Requirement::Read),
        Just(Requirement::Edit),
        Just(Requirement::Owner),
    ]
}

proptest! {
    #[test]
    fn test_satisfaction_is_monotone_below_owner(a in permission(), b in permission(), req in requirement()) {
        // Owner is an exact match, so monotonicity only holds for read/edit.
        prop_assume!(req != Requirement::Owner);
        if a <= b && a.satisfies(req) {
            prop_assert!(b.satisfies(req));
        }
    }

    #[test]
    fn test_only_owner_satisfies_owner(p in permission()) {
        prop_assert_eq!(p.satisfies(Requirement::Owner), p == Permission::Owner);
    }

    #[test]
    fn test_stored_scopes_never_reach_owner(edit in any::<bool>(), req in requirement()) {
        let scope = if edit { Scope::Edit } else { Scope::Read };
        let permission = Permission::from(scope);
        prop_assert!(permission < Permission::Owner);
        prop_assert!(!permission.satisfies(Requirement::Owner));
        if req == Requirement::Read {
            prop_assert!(permission.satisfies(req));
        }
    }

    #[test]
    fn test_scope_parse_accepts_only_read_and_edit(raw in "[a-z]{0,6}") {
        let parsed = raw.parse::<Scope>();
        prop_assert_eq!(parsed.is_ok(), raw == "read" || raw == "edit");
    }
}
