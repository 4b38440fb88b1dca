use sov_state::*;

fn open_storage(path: &std::path::Path) -> FileStorage {
    FileStorage::with_path(path).unwrap()
}

#[test]
fn test_value_set_get_remove() {
    let tmpdir = tempfile::tempdir().unwrap();
    let mut working_set = WorkingSet::new(open_storage(tmpdir.path()));
    let value = StateValue::<u32>::new(Prefix::new(b"value".to_vec()));

    assert_eq!(value.get(&mut working_set), None);
    assert!(value.get_or_err(&mut working_set).is_err());

    value.set(&11, &mut working_set);
    assert_eq!(value.get(&mut working_set), Some(11));

    assert_eq!(value.remove(&mut working_set), Some(11));
    assert_eq!(value.get(&mut working_set), None);
}

#[test]
fn test_map_keys_are_isolated_by_prefix() {
    let tmpdir = tempfile::tempdir().unwrap();
    let mut working_set = WorkingSet::new(open_storage(tmpdir.path()));
    let first = StateMap::<u64, String>::new(Prefix::new(b"first/".to_vec()));
    let second = StateMap::<u64, String>::new(Prefix::new(b"second/".to_vec()));

    first.set(&1, &"one".to_owned(), &mut working_set);
    second.set(&1, &"uno".to_owned(), &mut working_set);

    assert_eq!(first.get(&1, &mut working_set).as_deref(), Some("one"));
    assert_eq!(second.get(&1, &mut working_set).as_deref(), Some("uno"));

    assert_eq!(first.remove(&1, &mut working_set).as_deref(), Some("one"));
    assert!(first.get_or_err(&1, &mut working_set).is_err());
    assert_eq!(second.get(&1, &mut working_set).as_deref(), Some("uno"));
}

#[test]
fn test_vec_push_and_iterate() {
    let tmpdir = tempfile::tempdir().unwrap();
    let mut working_set = WorkingSet::new(open_storage(tmpdir.path()));
    let vec = StateVec::<u64>::new(Prefix::new(b"vec".to_vec()));

    assert!(vec.is_empty(&mut working_set));
    assert_eq!(vec.last(&mut working_set), None);

    assert_eq!(vec.push(&10, &mut working_set), 0);
    assert_eq!(vec.push(&20, &mut working_set), 1);
    assert_eq!(vec.push(&30, &mut working_set), 2);

    assert_eq!(vec.len(&mut working_set), 3);
    assert_eq!(vec.last(&mut working_set), Some(30));
    assert_eq!(
        vec.iter(&mut working_set).collect::<Vec<_>>(),
        vec![10, 20, 30]
    );

    vec.set(1, &21, &mut working_set).unwrap();
    assert_eq!(vec.get_or_err(1, &mut working_set).unwrap(), 21);
    assert!(matches!(
        vec.set(3, &40, &mut working_set),
        Err(StateVecError::IndexOutOfBounds(3))
    ));
    assert!(matches!(
        vec.get_or_err(7, &mut working_set),
        Err(StateVecError::IndexOutOfBounds(7))
    ));
}

#[test]
fn test_revert_discards_writes_and_events() {
    let tmpdir = tempfile::tempdir().unwrap();
    let value = StateValue::<u32>::new(Prefix::new(b"value".to_vec()));

    let mut working_set = WorkingSet::new(open_storage(tmpdir.path()));
    value.set(&1, &mut working_set);
    let checkpoint = working_set.checkpoint();

    let mut working_set = checkpoint.to_revertable();
    value.set(&2, &mut working_set);
    working_set.add_event("change", "1 -> 2");
    assert_eq!(value.get(&mut working_set), Some(2));

    let mut working_set = working_set.revert().to_revertable();
    assert_eq!(value.get(&mut working_set), Some(1));
    assert!(working_set.events().is_empty());
}

#[test]
fn test_freeze_and_commit_persists_checkpoint() {
    let tmpdir = tempfile::tempdir().unwrap();
    let value = StateValue::<String>::new(Prefix::new(b"value".to_vec()));
    let vec = StateVec::<u8>::new(Prefix::new(b"vec".to_vec()));

    {
        let storage = open_storage(tmpdir.path());
        let mut working_set = WorkingSet::new(storage.clone());
        value.set(&"persisted".to_owned(), &mut working_set);
        vec.push(&7, &mut working_set);

        let mut checkpoint = working_set.checkpoint();
        let writes = checkpoint.freeze();
        assert_eq!(writes.len(), 3);
        storage.commit(writes).unwrap();
    }

    let mut working_set = WorkingSet::new(open_storage(tmpdir.path()));
    assert_eq!(
        value.get(&mut working_set).as_deref(),
        Some("persisted")
    );
    assert_eq!(vec.iter(&mut working_set).collect::<Vec<_>>(), vec![7]);
}

#[test]
fn test_uncommitted_writes_are_not_persisted() {
    let tmpdir = tempfile::tempdir().unwrap();
    let value = StateValue::<u32>::new(Prefix::new(b"value".to_vec()));

    {
        let mut working_set = WorkingSet::new(open_storage(tmpdir.path()));
        value.set(&5, &mut working_set);
        let _ = working_set.checkpoint();
    }

    let mut working_set = WorkingSet::new(open_storage(tmpdir.path()));
    assert_eq!(value.get(&mut working_set), None);
}

#[test]
fn test_typed_events() {
    #[derive(borsh::BorshSerialize, borsh::BorshDeserialize, Debug, PartialEq)]
    enum Changed {
        Value { from: u32, to: u32 },
    }

    let tmpdir = tempfile::tempdir().unwrap();
    let mut working_set = WorkingSet::new(open_storage(tmpdir.path()));

    working_set
        .add_typed_event("Changed", &Changed::Value { from: 1, to: 2 })
        .unwrap();
    working_set.add_event("note", "plain text");

    let events = working_set.take_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].key(), &"Changed");
    assert_eq!(
        events[0].decode::<Changed>().unwrap(),
        Changed::Value { from: 1, to: 2 }
    );
    assert_eq!(events[1], Event::new("note", "plain text"));
    assert!(working_set.events().is_empty());
}
