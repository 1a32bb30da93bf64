use super::common::*;
use std::sync::Arc;

use crate::placement::{CategoryTier, PlacementEngine};
use crate::roster::domain::MockTestSubmission;
use crate::roster::filter::RosterFilter;
use crate::roster::service::{RosterService, RosterServiceError};
use crate::spreadsheet::DEFAULT_TEST_NAME;

#[test]
fn record_mock_test_scores_and_appends() {
    let (service, store) = build_service(vec![student("STD001", "2024001", "Ama Mensah")]);

    let updated = service
        .record_mock_test(
            "STD001",
            MockTestSubmission {
                test_name: "Mock 1".to_string(),
                date: Some(date(2024, 3, 1)),
                scores: strong_scores(),
            },
        )
        .expect("store available")
        .expect("student exists");

    let test = updated.latest_test().expect("test appended");
    assert_eq!(test.aggregate, 5);
    assert_eq!(test.category, CategoryTier::TopTier);
    assert_eq!(test.predicted_school, "Prempeh College");
    assert_eq!(test.predicted_program, "Science");
    assert_eq!(test.date, date(2024, 3, 1));
    assert!(test.test_id.starts_with("MT"));
    assert_eq!(store.snapshot()[0].mock_tests.len(), 1);
}

#[test]
fn record_mock_test_keeps_insertion_order() {
    let mut seeded = student("STD001", "2024001", "Ama Mensah");
    seeded.mock_tests.push(scored_test("later", date(2024, 6, 1), 8));
    let (service, _) = build_service(vec![seeded]);

    let updated = service
        .record_mock_test(
            "STD001",
            MockTestSubmission {
                test_name: "Backfilled".to_string(),
                date: Some(date(2024, 1, 1)),
                scores: strong_scores(),
            },
        )
        .expect("store available")
        .expect("student exists");

    assert_eq!(updated.mock_tests[0].test_id, "later");
    assert_eq!(updated.mock_tests[1].test_name, "Backfilled");
}

#[test]
fn record_mock_test_for_unknown_student_is_a_miss() {
    let (service, store) = build_service(Vec::new());
    let result = service
        .record_mock_test(
            "STD404",
            MockTestSubmission {
                test_name: "Mock".to_string(),
                date: None,
                scores: strong_scores(),
            },
        )
        .expect("store available");

    assert!(result.is_none());
    assert!(store.snapshot().is_empty());
}

#[test]
fn upsert_student_requires_an_id() {
    let (service, _) = build_service(Vec::new());
    let error = service
        .upsert_student(student("  ", "2024001", "Ama"))
        .expect_err("blank id is rejected");
    assert!(matches!(error, RosterServiceError::MissingStudentId));
    assert!(error.is_client_error());
}

#[test]
fn upsert_student_twice_is_idempotent() {
    let (service, store) = build_service(Vec::new());
    let record = student("STD001", "2024001", "Ama Mensah");

    service.upsert_student(record.clone()).expect("first upsert");
    let once = store.snapshot();
    service.upsert_student(record).expect("second upsert");

    assert_eq!(store.snapshot(), once);
}

#[test]
fn students_applies_filters() {
    let mut kofi = student("STD002", "2024002", "Kofi Boateng");
    kofi.gender = "Male".to_string();
    kofi.mock_tests.push(scored_test("k1", date(2024, 1, 1), 5));
    let mut esi = student("STD003", "2024003", "Esi Owusu");
    esi.class_name = "JHS 3 Grace".to_string();
    esi.mock_tests.push(scored_test("e1", date(2024, 1, 1), 20));
    let (service, _) = build_service(vec![student("STD001", "2024001", "Ama"), kofi, esi]);

    let top_tier = service
        .students(&RosterFilter {
            category: Some(CategoryTier::TopTier),
            ..RosterFilter::default()
        })
        .expect("store available");
    assert_eq!(top_tier.len(), 1);
    assert_eq!(top_tier[0].id, "STD002");

    let prudence = service
        .students(&RosterFilter {
            class: Some("JHS 3 Prudence".to_string()),
            gender: Some("Female".to_string()),
            category: None,
        })
        .expect("store available");
    assert_eq!(prudence.len(), 1);
    assert_eq!(prudence[0].id, "STD001");

    let everyone = service
        .students(&RosterFilter::default())
        .expect("store available");
    assert_eq!(everyone.len(), 3);
}

#[test]
fn store_failures_propagate() {
    let service = RosterService::new(
        Arc::new(UnavailableStore),
        Arc::new(PlacementEngine::standard()),
    );

    assert!(matches!(
        service.dashboard(None),
        Err(RosterServiceError::Store(_))
    ));
    assert!(matches!(
        service.student("STD001"),
        Err(RosterServiceError::Store(_))
    ));
}

#[test]
fn dashboard_honours_configured_and_requested_top_counts() {
    let seed = (1..=4)
        .map(|n| {
            let mut record = student(&format!("STD00{n}"), &format!("202400{n}"), "Student");
            record
                .mock_tests
                .push(scored_test(&format!("t{n}"), date(2024, 1, 1), 4 + n));
            record
        })
        .collect();
    let (service, _) = build_service(seed);
    let service = service.with_top_performers(2);

    assert_eq!(service.dashboard(None).expect("dashboard").top_performers.len(), 2);
    let three = service.dashboard(Some(3)).expect("dashboard");
    assert_eq!(three.top_performers.len(), 3);
    assert_eq!(three.top_performers[0].student_id, "STD001");
}

#[test]
fn import_students_creates_and_replaces_by_index_number() {
    let mut existing = student("STD001", "2024001", "Ama Mensah");
    existing.mock_tests.push(scored_test("keep", date(2024, 1, 1), 9));
    let (service, store) = build_service(vec![existing, student("STD004", "2024009", "Yaw")]);

    let csv = "Name,Index Number,Class,Gender\n\
               Ama Serwaa Mensah,2024001,JHS 3 Grace,Female\n\
               Kojo Antwi,,,Male\n";
    let summary = service.import_students(csv.as_bytes()).expect("csv parses");

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.failed, 0);

    let roster = store.snapshot();
    assert_eq!(roster.len(), 3);
    assert_eq!(roster[0].name, "Ama Serwaa Mensah");
    assert_eq!(roster[0].class_name, "JHS 3 Grace");
    assert_eq!(roster[0].mock_tests[0].test_id, "keep");

    let kojo = &roster[2];
    assert_eq!(kojo.id, "STD005");
    assert_eq!(kojo.index_number, "2024004");
    assert_eq!(kojo.class_name, "JHS 3 Prudence");
    assert!(kojo.mock_tests.is_empty());
}

#[test]
fn import_students_counts_store_rejections() {
    let inner = MemoryStore::default();
    let service = RosterService::new(
        Arc::new(RejectingStore {
            inner: inner.clone(),
            rejected_index: "2024002".to_string(),
        }),
        Arc::new(PlacementEngine::standard()),
    );

    let csv = "Name,Index Number\nA,2024001\nB,2024002\nC,2024003\n";
    let summary = service.import_students(csv.as_bytes()).expect("csv parses");

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures[0].row, 2);
    assert!(summary.failures[0].reason.contains("quota exceeded"));
    assert_eq!(inner.snapshot().len(), 2);
}

#[test]
fn import_mock_tests_scores_rows_and_counts_failures() {
    let (service, store) = build_service(vec![student("STD001", "2024001", "Ama Mensah")]);

    let csv = "Index Number,Test Name,Date,English Language,MATH,Integrated Science,Social Studies\n\
               2024001,Mock 1,2024-01-15,75,65,72,58\n\
               ,Mock 1,2024-01-15,75,65,72,58\n\
               2099999,Mock 1,2024-01-15,75,65,72,58\n\
               2024001,,,92,95,88,90\n";
    let summary = service
        .import_mock_tests_on(csv.as_bytes(), date(2024, 11, 5))
        .expect("csv parses");

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.total(), 4);
    assert_eq!(
        summary.failures.iter().map(|failure| failure.row).collect::<Vec<_>>(),
        vec![2, 3]
    );
    assert!(summary.failures[1].reason.contains("2099999"));

    let tests = &store.snapshot()[0].mock_tests;
    assert_eq!(tests.len(), 2, "rows for one student accumulate");
    assert_eq!(tests[0].aggregate, 15);
    assert_eq!(tests[0].category, CategoryTier::Good);
    assert_eq!(tests[0].predicted_school, "Accra Academy");
    assert_eq!(tests[1].test_name, DEFAULT_TEST_NAME);
    assert_eq!(tests[1].date, date(2024, 11, 5));
    assert_eq!(tests[1].aggregate, 5);
    assert_ne!(tests[0].test_id, tests[1].test_id);
}

#[test]
fn undecodable_rows_are_counted_and_the_batch_continues() {
    let (service, store) = build_service(Vec::new());
    let bytes: &[u8] = b"Name,Index Number\nA,2024001\n\xff\xfe,2024002\nC,2024003\n";
    let summary = service.import_students(bytes).expect("header decodes");

    assert_eq!(summary.imported, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failures[0].row, 2);
    assert!(summary.failures[0].reason.starts_with("unreadable row"));
    let indexes: Vec<String> = store
        .snapshot()
        .into_iter()
        .map(|student| student.index_number)
        .collect();
    assert_eq!(indexes, vec!["2024001", "2024003"]);
}

#[test]
fn undecodable_header_is_a_spreadsheet_error() {
    let (service, _) = build_service(Vec::new());
    let bytes: &[u8] = b"Name,\xff\xfe\nA,2024001\n";
    let error = service
        .import_students(bytes)
        .expect_err("invalid utf-8 header is rejected");
    assert!(matches!(error, RosterServiceError::Spreadsheet(_)));
}

#[test]
fn student_rows_without_index_never_replace_existing_students() {
    let (service, store) = build_service(vec![student("STD001", "2024002", "Ama Mensah")]);

    let summary = service
        .import_students("Name\nNew Kid\n".as_bytes())
        .expect("csv parses");
    assert_eq!(summary.imported, 1);

    let roster = store.snapshot();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster[0].name, "Ama Mensah");
    assert_eq!(roster[0].index_number, "2024002");
    assert_eq!(roster[1].name, "New Kid");
    assert_eq!(roster[1].id, "STD002");
    assert_eq!(roster[1].index_number, "2024003");
}
