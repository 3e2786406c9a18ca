
use rollbook::prelude::*;
use std::error::Error as StdError;
use std::num::NonZero;
use tests_utils::*;

fn ana() -> NewStudent {
    NewStudent {
        name: "Ana".into(),
        age: 20,
        grade: 15.0,
    }
}

fn bo() -> NewStudent {
    NewStudent {
        name: "Bo".into(),
        age: 22,
        grade: 12.5,
    }
}

fn id(value: u64) -> StudentId {
    NonZero::new(value).expect("Test ids should not be zero.")
}

#[test]
fn add_assigns_fresh_ids_and_preserves_order() -> Result<(), Box<dyn StdError>> {
    init_tracing_for_tests();

    let mut roster = Roster::new();

    let first = roster.add(ana())?.clone();
    assert_eq!(first.id, id(1));
    assert_eq!(first.name, "Ana");

    let second = roster.add(bo())?.clone();
    assert_eq!(second.id, id(2));

    assert_eq!(roster.list_all(), &[first, second]);
    Ok(())
}

#[test]
fn add_delete_list_worked_example() -> Result<(), Box<dyn StdError>> {
    init_tracing_for_tests();

    let mut roster = Roster::new();
    roster.add(ana())?;
    roster.add(bo())?;

    roster.delete(id(1))?;

    let remaining = roster.list_all();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, id(2));
    assert_eq!(remaining[0].name, "Bo");
    assert_eq!(remaining[0].age, 22);
    Ok(())
}

#[test]
fn ids_are_not_reused_after_delete() -> Result<(), Box<dyn StdError>> {
    init_tracing_for_tests();

    let mut roster = Roster::new();
    roster.add(ana())?;
    roster.add(bo())?;
    roster.delete(id(2))?;

    let third = roster.add(ana())?;
    assert_eq!(third.id, id(3));
    Ok(())
}

#[test]
fn add_rejects_malformed_fields_without_side_effects() {
    init_tracing_for_tests();

    let mut roster = Roster::new();

    let bad_inputs = [
        NewStudent {
            name: "   ".into(),
            ..ana()
        },
        NewStudent {
            name: "12345".into(),
            ..ana()
        },
        NewStudent { age: 0, ..ana() },
        NewStudent { age: 150, ..ana() },
        NewStudent {
            grade: -0.5,
            ..ana()
        },
        NewStudent {
            grade: 20.5,
            ..ana()
        },
        NewStudent {
            grade: f32::NAN,
            ..ana()
        },
    ];

    for fields in bad_inputs {
        let err = roster.add(fields).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }), "got: {err}");
    }

    assert!(roster.is_empty());
}

#[test]
fn add_normalizes_names() -> Result<(), Box<dyn StdError>> {
    init_tracing_for_tests();

    let mut roster = Roster::new();
    let student = roster.add(NewStudent {
        name: "  ana   maria  TORRES ".into(),
        age: 20,
        grade: 10.0,
    })?;

    assert_eq!(student.name, "Ana Maria Torres");
    Ok(())
}

#[test]
fn update_applies_only_provided_fields() -> Result<(), Box<dyn StdError>> {
    init_tracing_for_tests();

    let mut roster = Roster::new();
    roster.add(ana())?;

    let updated = roster.update(
        id(1),
        StudentPatch {
            grade: Some(18.0),
            ..Default::default()
        },
    )?;

    assert_eq!(updated.name, "Ana");
    assert_eq!(updated.age, 20);
    assert_eq!(updated.grade, 18.0);
    Ok(())
}

#[test]
fn update_on_missing_id_leaves_collection_unchanged() -> Result<(), Box<dyn StdError>> {
    init_tracing_for_tests();

    let mut roster = Roster::new();
    roster.add(ana())?;
    let before = roster.clone();

    let err = roster
        .update(
            id(99),
            StudentPatch {
                name: Some("Bo".into()),
                ..Default::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, Error::NotFound { .. }), "got: {err}");
    assert_eq!(roster, before);
    Ok(())
}

#[test]
fn failed_update_validation_leaves_record_unchanged() -> Result<(), Box<dyn StdError>> {
    init_tracing_for_tests();

    let mut roster = Roster::new();
    roster.add(ana())?;
    let before = roster.clone();

    // Valid name plus invalid grade: nothing may be applied.
    let err = roster
        .update(
            id(1),
            StudentPatch {
                name: Some("Bo".into()),
                grade: Some(99.0),
                ..Default::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, Error::Validation { .. }), "got: {err}");
    assert_eq!(roster, before);
    Ok(())
}

#[test]
fn delete_twice_fails_the_second_time() -> Result<(), Box<dyn StdError>> {
    init_tracing_for_tests();

    let mut roster = Roster::new();
    roster.add(ana())?;

    let removed = roster.delete(id(1))?;
    assert_eq!(removed.name, "Ana");

    let err = roster.delete(id(1)).unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }), "got: {err}");
    assert!(roster.is_empty());
    Ok(())
}

#[test]
fn search_is_case_insensitive_and_lazy_about_misses() -> Result<(), Box<dyn StdError>> {
    init_tracing_for_tests();

    let mut roster = Roster::new();
    roster.add(ana())?;
    roster.add(bo())?;
    roster.add(NewStudent {
        name: "Anabel".into(),
        age: 21,
        grade: 11.0,
    })?;

    let hits: Vec<&str> = roster.search("ANA").map(|s| s.name.as_str()).collect();
    assert_eq!(hits, ["Ana", "Anabel"]);

    assert_eq!(roster.search("").count(), roster.len());
    assert_eq!(roster.search("zzz").count(), 0);
    Ok(())
}

#[test]
fn average_grade_over_collection() -> Result<(), Box<dyn StdError>> {
    init_tracing_for_tests();

    let mut roster = Roster::new();
    assert_eq!(roster.average_grade(), None);

    roster.add(ana())?;
    roster.add(bo())?;
    assert_eq!(roster.average_grade(), Some(13.75));
    Ok(())
}

#[test]
fn from_records_rejects_duplicate_ids() {
    init_tracing_for_tests();

    let duplicate = Student {
        id: id(1),
        name: "Ana".into(),
        age: 20,
        grade: 15.0,
    };
    let records = vec![duplicate.clone(), duplicate];

    let err = Roster::from_records(records).unwrap_err();
    assert!(matches!(err, Error::Validation { field: "id", .. }), "got: {err}");
}

#[test]
fn add_fails_cleanly_when_the_id_space_is_exhausted() -> Result<(), Box<dyn StdError>> {
    init_tracing_for_tests();

    // A persisted file may legitimately carry the highest possible id; the
    // next add must report a typed error, not abort.
    let records = vec![Student {
        id: id(u64::MAX),
        name: "Ana".into(),
        age: 20,
        grade: 15.0,
    }];

    let mut roster = Roster::from_records(records)?;
    let before = roster.clone();

    let err = roster.add(bo()).unwrap_err();
    assert!(matches!(err, Error::Validation { field: "id", .. }), "got: {err}");
    assert_eq!(roster, before);
    Ok(())
}

#[test]
fn from_records_resumes_id_counter_past_highest() -> Result<(), Box<dyn StdError>> {
    init_tracing_for_tests();

    let records = vec![Student {
        id: id(7),
        name: "Ana".into(),
        age: 20,
        grade: 15.0,
    }];

    let mut roster = Roster::from_records(records)?;
    let added = roster.add(bo())?;
    assert_eq!(added.id, id(8));
    Ok(())
}
