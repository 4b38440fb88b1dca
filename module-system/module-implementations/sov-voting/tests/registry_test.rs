use helpers::{voting_error, VotingRunner, C};
use sov_modules_api::utils::generate_address;
use sov_voting::{CallMessage, Proposal, Role, Voter, VotingError, VotingEvent, WorkflowStatus};

mod helpers;

#[test]
fn register_voter() {
    let mut runner = VotingRunner::new();
    let alice = generate_address::<C>("alice");

    assert_eq!(runner.query(|voting, ws| voting.voter(&alice, ws)), None);

    let outcome = runner.admin_call(CallMessage::RegisterVoter { voter: alice });
    assert!(outcome.result.is_ok());
    assert_eq!(outcome.events.len(), 1);
    assert_eq!(outcome.events[0].key(), &"VoterRegistered");
    assert_eq!(
        outcome.events[0].decode::<VotingEvent<C>>().unwrap(),
        VotingEvent::VoterRegistered { voter: alice }
    );

    let voter = runner.query(|voting, ws| voting.voter(&alice, ws)).unwrap();
    assert!(voter.is_registered);
    assert!(!voter.has_voted());
    assert_eq!(voter.voted_proposal_id, None);
}

#[test]
fn register_voter_twice_fails() {
    let mut runner = VotingRunner::new();
    let alice = runner.register_voters(&["alice"])[0];

    let err = voting_error(runner.admin_call(CallMessage::RegisterVoter { voter: alice }));
    assert_eq!(
        err,
        VotingError::AlreadyRegistered {
            voter: alice.to_string()
        }
    );
    assert_eq!(
        runner
            .query(|voting, ws| voting.status(ws))
            .registered_voters,
        1
    );
}

#[test]
fn admin_is_not_implicitly_a_voter() {
    let mut runner = VotingRunner::new();
    let admin = runner.admin;
    runner.advance_to(WorkflowStatus::ProposalsRegistrationStarted);

    let err = voting_error(runner.call(
        &admin,
        CallMessage::RegisterProposal {
            description: "mine".to_owned(),
        },
    ));
    assert_eq!(
        err,
        VotingError::Unauthorized {
            sender: admin.to_string(),
            required: Role::RegisteredVoter,
        }
    );
}

#[test]
fn register_proposals_in_order() {
    let mut runner = VotingRunner::new();
    let voters = runner.register_voters(&["alice", "bob"]);
    runner.advance_to(WorkflowStatus::ProposalsRegistrationStarted);

    for (expected_id, (voter, description)) in voters.iter().zip(["P1", "P2"]).enumerate() {
        let outcome = runner.call(
            voter,
            CallMessage::RegisterProposal {
                description: description.to_owned(),
            },
        );
        assert!(outcome.result.is_ok());
        assert_eq!(
            outcome.events[0].decode::<VotingEvent<C>>().unwrap(),
            VotingEvent::ProposalRegistered {
                proposal_id: expected_id
            }
        );
    }

    // The same voter may submit several proposals.
    runner
        .call(
            &voters[0],
            CallMessage::RegisterProposal {
                description: "P3".to_owned(),
            },
        )
        .result
        .unwrap();

    let proposals = runner.query(|voting, ws| voting.proposals(ws));
    let descriptions: Vec<_> = proposals.iter().map(|p| p.description.as_str()).collect();
    assert_eq!(descriptions, vec!["P1", "P2", "P3"]);
    assert!(proposals.iter().all(|p| p.vote_count == 0));
}

#[test]
fn empty_proposal_is_rejected() {
    let mut runner = VotingRunner::new();
    let alice = runner.register_voters(&["alice"])[0];
    runner.advance_to(WorkflowStatus::ProposalsRegistrationStarted);

    let err = voting_error(runner.call(
        &alice,
        CallMessage::RegisterProposal {
            description: String::new(),
        },
    ));
    assert!(matches!(err, VotingError::InvalidInput { .. }));
    assert!(runner.query(|voting, ws| voting.proposals(ws)).is_empty());
}

#[test]
fn vote_once() {
    let mut runner = VotingRunner::new();
    let alice = runner.register_voters(&["alice"])[0];
    runner.advance_to(WorkflowStatus::ProposalsRegistrationStarted);
    for description in ["P1", "P2"] {
        runner
            .call(
                &alice,
                CallMessage::RegisterProposal {
                    description: description.to_owned(),
                },
            )
            .result
            .unwrap();
    }
    runner.advance_to(WorkflowStatus::VotingSessionStarted);

    let outcome = runner.call(&alice, CallMessage::Vote { proposal_id: 1 });
    assert!(outcome.result.is_ok());
    assert_eq!(outcome.events[0].key(), &"Voted");
    assert_eq!(
        outcome.events[0].decode::<VotingEvent<C>>().unwrap(),
        VotingEvent::Voted {
            voter: alice,
            proposal_id: 1
        }
    );

    let err = voting_error(runner.call(&alice, CallMessage::Vote { proposal_id: 0 }));
    assert_eq!(
        err,
        VotingError::AlreadyVoted {
            voter: alice.to_string()
        }
    );

    assert_eq!(
        runner.query(|voting, ws| voting.voter(&alice, ws)),
        Some(Voter {
            is_registered: true,
            voted_proposal_id: Some(1),
        })
    );
    assert_eq!(
        runner.query(|voting, ws| voting.proposals(ws)),
        vec![
            Proposal {
                description: "P1".to_owned(),
                vote_count: 0
            },
            Proposal {
                description: "P2".to_owned(),
                vote_count: 1
            },
        ]
    );
    assert_eq!(runner.query(|voting, ws| voting.number_of_votes(ws)), 1);
}

#[test]
fn vote_for_missing_proposal_fails() {
    let mut runner = VotingRunner::new();
    let alice = runner.register_voters(&["alice"])[0];
    runner.advance_to(WorkflowStatus::VotingSessionStarted);

    let err = voting_error(runner.call(&alice, CallMessage::Vote { proposal_id: 0 }));
    assert!(matches!(err, VotingError::InvalidInput { .. }));

    // The rejected vote was not counted, so the voter can still vote.
    let voter = runner.query(|voting, ws| voting.voter(&alice, ws)).unwrap();
    assert!(!voter.has_voted());
}

#[test]
fn unregistered_caller_cannot_vote() {
    let mut runner = VotingRunner::new();
    let alice = runner.register_voters(&["alice"])[0];
    runner.advance_to(WorkflowStatus::ProposalsRegistrationStarted);
    runner
        .call(
            &alice,
            CallMessage::RegisterProposal {
                description: "P1".to_owned(),
            },
        )
        .result
        .unwrap();
    runner.advance_to(WorkflowStatus::VotingSessionStarted);

    let mallory = generate_address::<C>("mallory");
    let err = voting_error(runner.call(&mallory, CallMessage::Vote { proposal_id: 0 }));
    assert_eq!(
        err,
        VotingError::Unauthorized {
            sender: mallory.to_string(),
            required: Role::RegisteredVoter,
        }
    );
    assert_eq!(
        runner.query(|voting, ws| voting.proposal(0, ws)).unwrap().vote_count,
        0
    );
}
