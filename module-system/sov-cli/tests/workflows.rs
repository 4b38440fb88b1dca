use clap::Parser;
use serde_json::json;
use sov_modules_api::utils::generate_address;
use sov_modules_api::Address;
use sov_voting::{CallMessage, VotingError};
use sov_voting_cli::{CallWorkflow, Ctx, QueryWorkflow, StorageConfig, VotingNode};

#[derive(clap::Parser)]
struct CallArgs {
    #[clap(subcommand)]
    call: CallWorkflow,
}

#[derive(clap::Parser)]
struct QueryArgs {
    #[clap(subcommand)]
    query: QueryWorkflow,
}

fn storage_config(dir: &tempfile::TempDir) -> StorageConfig {
    StorageConfig {
        path: dir.path().join("state"),
    }
}

fn address(nickname: &str) -> Address {
    generate_address::<Ctx>(nickname)
}

#[test]
fn test_parse_call_workflow() {
    let alice = address("alice");
    let args = CallArgs::parse_from(["call", "register-voter", alice.to_string().as_str()]);
    assert_eq!(
        CallMessage::<Ctx>::from(args.call),
        CallMessage::RegisterVoter { voter: alice }
    );

    let args = CallArgs::parse_from(["call", "vote", "3"]);
    assert_eq!(
        CallMessage::<Ctx>::from(args.call),
        CallMessage::Vote { proposal_id: 3 }
    );

    assert!(CallArgs::try_parse_from(["call", "register-voter", "sov1nope"]).is_err());
}

#[test]
fn test_parse_query_workflow() {
    let args = QueryArgs::parse_from(["query", "proposal", "1"]);
    assert_eq!(args.query, QueryWorkflow::Proposal { proposal_id: 1 });

    let args = QueryArgs::parse_from(["query", "winner"]);
    assert_eq!(args.query, QueryWorkflow::Winner);
}

#[test]
fn test_init_only_once() {
    let tmpdir = tempfile::tempdir().unwrap();
    let node = VotingNode::open(&storage_config(&tmpdir)).unwrap();

    let output = node.init(address("admin")).unwrap();
    assert_eq!(output, json!({ "admin": address("admin").to_string() }));
    assert!(node.init(address("admin")).is_err());
}

#[test]
fn test_full_workflow_across_reopens() {
    let tmpdir = tempfile::tempdir().unwrap();
    let config = storage_config(&tmpdir);
    let admin = address("admin");
    let (a, b, c) = (address("A"), address("B"), address("C"));

    VotingNode::open(&config).unwrap().init(admin).unwrap();

    // Every step reopens the storage, as separate invocations of the binary do.
    let call = |caller: Address, msg: CallMessage<Ctx>| {
        VotingNode::open(&config).unwrap().call(caller, msg)
    };

    for voter in [a, b, c] {
        let output = call(admin, CallMessage::RegisterVoter { voter }).unwrap();
        assert_eq!(
            output,
            json!({ "events": [{ "VoterRegistered": { "voter": voter.to_string() } }] })
        );
    }
    call(admin, CallMessage::StartProposalsRegistration).unwrap();
    call(
        a,
        CallMessage::RegisterProposal {
            description: "P1".to_owned(),
        },
    )
    .unwrap();
    call(
        b,
        CallMessage::RegisterProposal {
            description: "P2".to_owned(),
        },
    )
    .unwrap();
    call(admin, CallMessage::EndProposalsRegistration).unwrap();
    call(admin, CallMessage::StartVotingSession).unwrap();
    for (voter, proposal_id) in [(a, 0), (b, 1), (c, 0)] {
        call(voter, CallMessage::Vote { proposal_id }).unwrap();
    }

    // A rejected call is not committed.
    let err = call(a, CallMessage::Vote { proposal_id: 1 }).unwrap_err();
    assert_eq!(
        err.downcast_ref::<VotingError>(),
        Some(&VotingError::AlreadyVoted {
            voter: a.to_string()
        })
    );

    call(admin, CallMessage::EndVotingSession).unwrap();
    let output = call(admin, CallMessage::TallyVotes).unwrap();
    assert_eq!(
        output,
        json!({ "events": [{ "WorkflowStatusChange": {
            "previous_status": "VotingSessionEnded",
            "new_status": "VotesTallied",
        } }] })
    );

    let node = VotingNode::open(&config).unwrap();
    assert_eq!(
        node.query(QueryWorkflow::Winner).unwrap(),
        json!({ "proposal_id": 0, "description": "P1", "vote_count": 2 })
    );
    assert_eq!(
        node.query(QueryWorkflow::WorkflowStatus).unwrap(),
        json!({ "workflow_status": "VotesTallied", "ordinal": 5 })
    );
    assert_eq!(
        node.query(QueryWorkflow::Voter { address: a }).unwrap(),
        json!({ "is_registered": true, "has_voted": true, "voted_proposal_id": 0 })
    );
    assert_eq!(
        node.query(QueryWorkflow::Status).unwrap(),
        json!({
            "workflow_status": "VotesTallied",
            "registered_voters": 3,
            "proposals": 2,
            "votes_cast": 3,
        })
    );
}

#[test]
fn test_winner_before_tally() {
    let tmpdir = tempfile::tempdir().unwrap();
    let node = VotingNode::open(&storage_config(&tmpdir)).unwrap();
    node.init(address("admin")).unwrap();

    let err = node.query(QueryWorkflow::Winner).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<VotingError>(),
        Some(VotingError::NotYetAvailable { .. })
    ));
    assert_eq!(
        node.query(QueryWorkflow::Voter {
            address: address("nobody")
        })
        .unwrap(),
        json!({ "is_registered": false, "has_voted": false, "voted_proposal_id": null })
    );
}
