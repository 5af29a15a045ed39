//! Cross-replica capability agreement: every replica derives the same
//! level from the same record set, whatever order records arrived in.

use crate::support::{agent, assignment, open_replica, public_profile};
use commonhold::capability::CapabilityLevel;
use commonhold::record::{Record, RecordPayload};
use commonhold::replication::MemoryCluster;

#[test]
fn observation_order_does_not_change_the_level() {
    let lynn = agent("lynn");
    let bob = agent("bob");

    let records: Vec<Record> = [
        assignment(&bob, &lynn, "RESOURCE_STEWARD"),
        assignment(&bob, &lynn, "RESOURCE_COORDINATOR"),
        assignment(&bob, &lynn, "FOUNDER"),
    ]
    .into_iter()
    .map(|a| Record::new(lynn.clone(), RecordPayload::RoleAssignment(a)).unwrap())
    .collect();

    // One replica sees the grants oldest-first, the other newest-first.
    let forward = open_replica();
    for record in &records {
        forward.ingest(record.clone()).unwrap();
    }
    let backward = open_replica();
    for record in records.iter().rev() {
        backward.ingest(record.clone()).unwrap();
    }

    assert_eq!(
        forward.get_capability_level(&bob),
        CapabilityLevel::Governance
    );
    assert_eq!(
        forward.get_capability_level(&bob),
        backward.get_capability_level(&bob)
    );
    // The audit listing differs by arrival, the derived set does not.
    assert_eq!(forward.get_person_roles(&bob).len(), 3);
    assert_eq!(backward.get_person_roles(&bob).len(), 3);
}

#[test]
fn precedence_steps_up_never_sums() {
    let replica = open_replica();
    let lynn = agent("lynn");
    let bob = agent("bob");

    assert_eq!(replica.get_capability_level(&bob), CapabilityLevel::None);

    replica
        .assign_role(&lynn, assignment(&bob, &lynn, "RESOURCE_STEWARD"))
        .unwrap();
    assert_eq!(
        replica.get_capability_level(&bob),
        CapabilityLevel::Stewardship
    );

    replica
        .assign_role(&lynn, assignment(&bob, &lynn, "RESOURCE_COORDINATOR"))
        .unwrap();
    assert_eq!(
        replica.get_capability_level(&bob),
        CapabilityLevel::Coordination
    );

    // Founder plus steward resolves to governance, the maximum.
    replica
        .assign_role(&lynn, assignment(&lynn, &lynn, "FOUNDER"))
        .unwrap();
    replica
        .assign_role(&lynn, assignment(&lynn, &lynn, "RESOURCE_STEWARD"))
        .unwrap();
    assert_eq!(
        replica.get_capability_level(&lynn),
        CapabilityLevel::Governance
    );
}

#[test]
fn role_arriving_before_profile_is_not_an_error() {
    let cluster = MemoryCluster::new();
    let lynn_replica = open_replica();
    let bob_replica = open_replica();
    cluster.register(agent("lynn"), lynn_replica.clone());
    cluster.register(agent("bob"), bob_replica.clone());

    let lynn = agent("lynn");
    let carol = agent("carol");

    // Carol has no profile record anywhere, but a grant for her exists.
    lynn_replica
        .assign_role(&lynn, assignment(&carol, &lynn, "RESOURCE_STEWARD"))
        .unwrap();
    cluster.converge();

    for replica in [&lynn_replica, &bob_replica] {
        assert_eq!(
            replica.get_capability_level(&carol),
            CapabilityLevel::Stewardship
        );
        let view = replica.get_person_profile(&lynn, &carol);
        assert!(view.public.is_none());
        assert!(view.private.is_none());
        assert!(replica.get_all_persons(&lynn).is_empty());
    }

    // Her profile arriving later completes the picture on both replicas.
    bob_replica
        .ingest(
            Record::new(
                carol.clone(),
                RecordPayload::PublicProfile(public_profile(&carol, "Carol")),
            )
            .unwrap(),
        )
        .unwrap();
    cluster.converge();

    assert_eq!(
        lynn_replica
            .get_person_profile(&lynn, &carol)
            .public
            .unwrap()
            .name,
        "Carol"
    );
}

#[test]
fn three_replicas_agree_after_partitioned_writes() {
    let cluster = MemoryCluster::new();
    let replicas: Vec<_> = ["lynn", "bob", "carol"]
        .iter()
        .map(|id| {
            let replica = open_replica();
            cluster.register(agent(id), replica.clone());
            replica
        })
        .collect();

    let lynn = agent("lynn");
    let bob = agent("bob");
    let carol = agent("carol");

    // Disjoint writes land on different replicas before any exchange.
    replicas[0]
        .assign_role(&lynn, assignment(&bob, &lynn, "RESOURCE_STEWARD"))
        .unwrap();
    replicas[1]
        .assign_role(&bob, assignment(&carol, &bob, "RESOURCE_COORDINATOR"))
        .unwrap();
    replicas[2]
        .assign_role(&carol, assignment(&lynn, &carol, "FOUNDER"))
        .unwrap();

    cluster.converge();
    assert!(cluster.is_converged());

    for replica in &replicas {
        assert_eq!(
            replica.get_capability_level(&lynn),
            CapabilityLevel::Governance
        );
        assert_eq!(
            replica.get_capability_level(&bob),
            CapabilityLevel::Stewardship
        );
        assert_eq!(
            replica.get_capability_level(&carol),
            CapabilityLevel::Coordination
        );
    }
}
