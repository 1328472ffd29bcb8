//! Tests for row → session fan-out.

use exam_schedule::extract::{distinct_proctors, roster, session_from_row};
use exam_schedule::session::sentinel;
use exam_schedule::{expand_row, RawRow, Role};

fn row(cells: &[(&str, &str)]) -> RawRow {
    cells.iter().copied().collect()
}

fn full_row() -> RawRow {
    row(&[
        ("examDate", "2024.12.20"),
        ("examTime", "800-1000"),
        ("subject", "Math"),
        ("grade", "G10"),
        ("classNum", "3"),
        ("minutes", "120"),
        ("location", "Room 101"),
        ("proctor1", "张三、李四"),
        ("proctor2", "李四\n王五"),
        ("numOfStudents", "3"),
        ("s1", "Alice"),
        ("s2", ""),
        ("s3", "Bob"),
        ("s4", "Carol"),
    ])
}

#[test]
fn roster_keeps_column_order_and_skips_blanks() {
    assert_eq!(roster(&full_row()), vec!["Alice", "Bob", "Carol"]);
}

#[test]
fn roster_reads_every_non_metadata_column() {
    let r = row(&[
        ("examDate", "2024.12.20"),
        ("seat-b", "Zed"),
        ("subject", "Math"),
        ("seat-a", " Amy "),
    ]);
    assert_eq!(roster(&r), vec!["Zed", "Amy"]);
}

#[test]
fn proctors_are_split_and_deduplicated() {
    assert_eq!(distinct_proctors(&full_row()), vec!["张三", "李四", "王五"]);
}

#[test]
fn missing_secondary_proctor_is_fine() {
    let r = row(&[("proctor1", "张三")]);
    assert_eq!(distinct_proctors(&r), vec!["张三"]);
}

#[test]
fn record_copies_metadata_verbatim() {
    let session = session_from_row(&full_row());
    assert_eq!(session.exam_date, "2024.12.20");
    assert_eq!(session.exam_time, "800-1000");
    assert_eq!(session.subject, "Math");
    assert_eq!(session.class_num, "3");
    assert_eq!(session.proctor1, "张三、李四", "proctor cell is stored unsplit");
    assert_eq!(session.proctor2.as_deref(), Some("李四\n王五"));
    assert_eq!(session.students, vec!["Alice", "Bob", "Carol"]);
}

#[test]
fn missing_metadata_becomes_sentinels() {
    let session = session_from_row(&row(&[("examDate", ""), ("s1", "Alice")]));

    assert_eq!(session.exam_date, sentinel::DATE);
    assert_eq!(session.exam_time, sentinel::TIME);
    assert_eq!(session.subject, sentinel::SUBJECT);
    assert_eq!(session.grade, sentinel::GRADE);
    assert_eq!(session.class_num, sentinel::CLASS_NUM);
    assert_eq!(session.minutes, sentinel::MINUTES);
    assert_eq!(session.location, sentinel::LOCATION);
    assert_eq!(session.proctor1, sentinel::PROCTOR);
    assert_eq!(session.num_of_students, sentinel::NUM_OF_STUDENTS);
    assert_eq!(session.proctor2, None, "proctor2 is absent, not sentineled");
}

#[test]
fn whitespace_only_secondary_proctor_is_absent() {
    let session = session_from_row(&row(&[("proctor1", "张三"), ("proctor2", "  ")]));
    assert_eq!(session.proctor2, None);
}

#[test]
fn expansion_files_proctors_then_students() {
    let assignments = expand_row(&full_row());

    let keys: Vec<(Role, &str)> = assignments
        .iter()
        .map(|a| (a.role, a.name.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            (Role::Proctor, "张三"),
            (Role::Proctor, "李四"),
            (Role::Proctor, "王五"),
            (Role::Student, "Alice"),
            (Role::Student, "Bob"),
            (Role::Student, "Carol"),
        ]
    );
}

#[test]
fn every_assignment_shares_the_same_record() {
    let assignments = expand_row(&full_row());
    let first = &assignments[0].session;
    assert!(assignments.iter().all(|a| &a.session == first));
}

#[test]
fn row_without_people_expands_to_nothing() {
    let r = row(&[("examDate", "2024.12.20"), ("examTime", "800-1000")]);
    assert!(expand_row(&r).is_empty());
}

#[test]
fn role_parses_from_text() {
    assert_eq!("student".parse::<Role>().unwrap(), Role::Student);
    assert_eq!(" Proctor ".parse::<Role>().unwrap(), Role::Proctor);
    assert!("teacher".parse::<Role>().is_err());
    assert_eq!(Role::Proctor.to_string(), "proctor");
}
