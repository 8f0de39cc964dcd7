/// Property-based tests using proptest
/// Tests invariants of lead validation and storage that should hold for all inputs
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use video_courses_api::catalog::{find_course, list_courses};
use video_courses_api::db_storage::{LeadStorage, MemoryDocumentStore, LEAD_COLLECTION};
use video_courses_api::errors::truncate_chars;
use video_courses_api::models::{Lead, LeadRequest};

fn request(name: String, email: String, course_id: Option<String>) -> LeadRequest {
    LeadRequest {
        name,
        email,
        phone: None,
        course_id,
        message: None,
    }
}

// Property: validation only looks at whether a name is present
proptest! {
    #[test]
    fn lead_validation_never_panics(name in "\\PC*", email in "\\PC*") {
        let _ = Lead::try_from(request(name, email, None));
    }

    #[test]
    fn whitespace_names_rejected(name in "[ \\t\\n]{0,10}", email in "[a-z]{1,10}@[a-z]{1,10}\\.com") {
        prop_assert!(Lead::try_from(request(name, email, None)).is_err());
    }

    #[test]
    fn any_email_and_course_accepted(
        name in "[A-Za-zА-Яа-я]{1,20}",
        email in "\\PC*",
        course_id in proptest::option::of("\\PC{0,20}")
    ) {
        let lead = Lead::try_from(request(name.clone(), email.clone(), course_id.clone()));
        prop_assert!(lead.is_ok());
        let lead = lead.unwrap();
        prop_assert_eq!(lead.name, name);
        prop_assert_eq!(lead.email, email);
        prop_assert_eq!(lead.course_id, course_id);
    }
}

// Property: error detail truncation never splits a character
proptest! {
    #[test]
    fn truncation_is_prefix_and_bounded(text in "\\PC*", max in 0usize..100) {
        let cut = truncate_chars(&text, max);
        prop_assert!(text.starts_with(&cut));
        prop_assert!(cut.chars().count() <= max);
        if text.chars().count() <= max {
            prop_assert_eq!(cut, text);
        }
    }
}

// Property: every catalog id resolves to its own course
proptest! {
    #[test]
    fn catalog_lookup_matches_listing(index in 0usize..3) {
        let course = &list_courses()[index];
        prop_assert_eq!(find_course(&course.id), Some(course));
    }
}

// Property: each accepted lead produces exactly one stored document
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn every_insert_creates_one_document(count in 1usize..8) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();

        let store = Arc::new(MemoryDocumentStore::new("landing"));
        let storage = LeadStorage::new(store.clone(), Duration::from_secs(1));

        let ids: Vec<String> = runtime.block_on(async {
            let mut ids = Vec::new();
            for i in 0..count {
                let lead = Lead {
                    name: format!("Lead {}", i),
                    email: "same@example.com".to_string(),
                    phone: None,
                    course_id: None,
                    message: None,
                };
                ids.push(storage.insert(LEAD_COLLECTION, lead).await.unwrap());
            }
            ids
        });

        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), count);
        prop_assert_eq!(store.documents(LEAD_COLLECTION).len(), count);
    }
}
