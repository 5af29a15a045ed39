//! Privacy isolation under replication: private data never crosses the
//! owner boundary on any query path, in any convergence state.

use crate::support::{agent, assignment, private_profile, public_profile, two_replica_cluster};

#[test]
fn private_data_absent_for_others_across_convergence_rounds() {
    let (cluster, lynn_replica, bob_replica) = two_replica_cluster();
    let lynn = agent("lynn");
    let bob = agent("bob");

    lynn_replica
        .create_profile(&lynn, public_profile(&lynn, "Lynn"))
        .unwrap();
    lynn_replica
        .store_private_data(&lynn, private_profile(&lynn, "Lynn Field"))
        .unwrap();

    for round in 0..3 {
        let view = bob_replica.get_person_profile(&bob, &lynn);
        assert!(
            view.private.is_none(),
            "private data leaked to bob at round {}",
            round
        );
        cluster.converge();
    }

    // Granting lynn a role changes nothing about her private data.
    bob_replica
        .create_profile(&bob, public_profile(&bob, "Bob"))
        .unwrap();
    lynn_replica
        .assign_role(&lynn, assignment(&lynn, &lynn, "FOUNDER"))
        .unwrap();
    cluster.converge();

    assert!(bob_replica.get_person_profile(&bob, &lynn).private.is_none());
    assert!(lynn_replica.get_person_profile(&lynn, &bob).private.is_none());
}

#[test]
fn my_private_data_present_iff_stored() {
    let (_, lynn_replica, _) = two_replica_cluster();
    let lynn = agent("lynn");

    lynn_replica
        .create_profile(&lynn, public_profile(&lynn, "Lynn"))
        .unwrap();
    assert!(lynn_replica.get_my_profile(&lynn).private.is_none());

    lynn_replica
        .store_private_data(&lynn, private_profile(&lynn, "Lynn Field"))
        .unwrap();
    assert!(lynn_replica.get_my_profile(&lynn).private.is_some());
}

#[test]
fn listing_never_carries_private_fields() {
    let (cluster, lynn_replica, bob_replica) = two_replica_cluster();
    let lynn = agent("lynn");
    let bob = agent("bob");

    lynn_replica
        .create_profile(&lynn, public_profile(&lynn, "Lynn"))
        .unwrap();
    lynn_replica
        .store_private_data(&lynn, private_profile(&lynn, "Lynn Field"))
        .unwrap();
    bob_replica
        .create_profile(&bob, public_profile(&bob, "Bob"))
        .unwrap();
    cluster.converge();

    // The listing is public profiles only, filtered record by record; the
    // serialized form has no private fields to leak.
    let listing = bob_replica.get_all_persons(&bob);
    assert_eq!(listing.len(), 2);
    let encoded = serde_json::to_string(&listing).unwrap();
    assert!(!encoded.contains("legal_name"));
    assert!(!encoded.contains("Lynn Field"));
    assert!(!encoded.contains("555-0100"));
}

#[test]
fn private_update_is_visible_to_owner_only() {
    let (cluster, lynn_replica, bob_replica) = two_replica_cluster();
    let lynn = agent("lynn");
    let bob = agent("bob");

    lynn_replica
        .store_private_data(&lynn, private_profile(&lynn, "Lynn Field"))
        .unwrap();
    let mut updated = private_profile(&lynn, "Lynn Field-Reed");
    updated.phone = Some("555-0199".to_string());
    lynn_replica.store_private_data(&lynn, updated).unwrap();
    cluster.converge();

    let mine = lynn_replica.get_my_profile(&lynn).private.unwrap();
    assert_eq!(mine.legal_name, "Lynn Field-Reed");
    assert_eq!(mine.phone.as_deref(), Some("555-0199"));
    assert!(bob_replica.get_person_profile(&bob, &lynn).private.is_none());
}
