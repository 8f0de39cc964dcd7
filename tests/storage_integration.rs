use std::env;
use std::sync::Arc;
use std::time::Duration;

use video_courses_api::config::Config;
use video_courses_api::db::Database;
use video_courses_api::db_storage::{
    DocumentStore, LeadStorage, PgDocumentStore, LEAD_COLLECTION,
};
use video_courses_api::models::Lead;

/// Integration smoke test for lead storage against a real Postgres.
/// Marked ignored to avoid running against production by accident; set TEST_DATABASE_URL to run.
#[tokio::test]
#[ignore]
async fn store_lead_smoke_test() -> anyhow::Result<()> {
    let db_url = env::var("TEST_DATABASE_URL")
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL to run this test"))?;

    let config = Config {
        database_url: Some(db_url),
        database_name: env::var("TEST_DATABASE_NAME").ok(),
        store_timeout: Duration::from_secs(10),
        ..Config::default()
    };

    let db = Database::connect_lazy(&config).map_err(|e| anyhow::anyhow!(e))?;
    db.ping(config.store_timeout)
        .await
        .map_err(|e| anyhow::anyhow!(e))?;

    let store = Arc::new(PgDocumentStore::new(db));
    let storage = LeadStorage::new(store.clone(), config.store_timeout);

    let lead = Lead {
        name: "Anna".to_string(),
        email: "anna@example.com".to_string(),
        phone: None,
        course_id: Some("pro".to_string()),
        message: None,
    };

    let id = storage
        .insert(LEAD_COLLECTION, lead)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let stored = store
        .get(LEAD_COLLECTION, &id)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .ok_or_else(|| anyhow::anyhow!("document {} not found after insert", id))?;

    assert_eq!(stored["name"], "Anna");
    assert_eq!(stored["email"], "anna@example.com");
    assert_eq!(stored["course_id"], "pro");
    assert!(stored["phone"].is_null());
    assert!(stored["message"].is_null());

    let collections = store
        .list_collections(10)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    assert!(collections.iter().any(|c| c == LEAD_COLLECTION));

    Ok(())
}
