//! Integration tests for the Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Database queries work correctly
//! - Constraints are enforced
//! - The image upsert is atomic and preserves row identity

use domain_products::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};

fn sample_create(builder: &TestDataBuilder, suffix: &str, image: Option<String>) -> CreateProduct {
    CreateProduct {
        name: builder.name("product", suffix),
        price: 675000,
        original_price: Some(1335000),
        image,
        category: "pants".to_string(),
        condition: "Good".to_string(),
        description: "Celana jeans vintage dalam kondisi sangat baik".to_string(),
        size: Some("32W x 32L".to_string()),
        brand: Some("Levi's".to_string()),
        color: Some("blue".to_string()),
        material: Some("denim".to_string()),
    }
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
async fn test_create_and_get_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let input = sample_create(&builder, "main", None);

    let created = repo.create(input.clone()).await.unwrap();

    assert_eq!(created.name, input.name);
    assert_eq!(created.price, 675000);
    assert_eq!(created.original_price, Some(1335000));
    assert_eq!(created.brand.as_deref(), Some("Levi's"));

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "product should exist");

    assert_eq!(retrieved.id, created.id);
    assert_eq!(retrieved.name, created.name);
}

#[tokio::test]
async fn test_list_returns_newest_first() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("list_order");

    let mut created_ids = vec![];
    for i in 0..3 {
        let input = sample_create(&builder, &format!("item-{}", i), None);
        created_ids.push(repo.create(input).await.unwrap().id);
    }

    let listed = repo.list().await.unwrap();
    assert_eq!(listed.len(), 3);

    // Most recent insert comes back first
    for pair in listed.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
    assert_eq!(listed[0].id, *created_ids.last().unwrap());
}

#[tokio::test]
async fn test_partial_update_preserves_absent_fields() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("partial_update");

    let created = repo
        .create(sample_create(&builder, "original", None))
        .await
        .unwrap();

    let update = UpdateProduct {
        price: Some(550000),
        condition: Some("Fair".to_string()),
        ..Default::default()
    };

    let updated = repo.update(created.id, update).await.unwrap();

    assert_eq!(updated.price, 550000);
    assert_eq!(updated.condition, "Fair");
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.brand, created.brand);
    assert!(updated.updated_at > created.updated_at);
}

#[tokio::test]
async fn test_update_missing_product_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let update = UpdateProduct {
        price: Some(1),
        ..Default::default()
    };

    let result = repo.update(999999, update).await;
    assert!(
        matches!(result, Err(ProductError::NotFound(_))),
        "Expected NotFound, got {:?}",
        result
    );
}

#[tokio::test]
async fn test_delete_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("delete");

    let created = repo
        .create(sample_create(&builder, "to-delete", None))
        .await
        .unwrap();

    let deleted = repo.delete(created.id).await.unwrap();
    assert!(deleted, "delete should return true");

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    assert!(retrieved.is_none(), "product should be deleted");

    let deleted_again = repo.delete(created.id).await.unwrap();
    assert!(!deleted_again, "second delete should return false");
}

// ============================================================================
// Upsert-by-image Tests
// ============================================================================

#[tokio::test]
async fn test_upsert_by_image_inserts_new_row() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("upsert_insert");

    let image = format!("/images/{}.jpg", builder.name("frame", "new"));
    let input = sample_create(&builder, "upserted", Some(image.clone()));

    let product = repo
        .upsert_by_image(input, "[0.1,0.2]".to_string())
        .await
        .unwrap();

    assert_eq!(product.image.as_deref(), Some(image.as_str()));
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_upsert_by_image_keeps_id_and_catalog_fields() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("upsert_refresh");

    let image = format!("/images/{}.jpg", builder.name("frame", "shared"));

    let first = repo
        .upsert_by_image(
            sample_create(&builder, "first", Some(image.clone())),
            "[1.0]".to_string(),
        )
        .await
        .unwrap();

    // Re-run with different catalog fields and a new embedding
    let mut second_input = sample_create(&builder, "second", Some(image.clone()));
    second_input.price = 1;

    let second = repo
        .upsert_by_image(second_input, "[2.0]".to_string())
        .await
        .unwrap();

    // Same row survives; catalog fields are untouched
    assert_eq!(second.id, first.id);
    assert_eq!(second.name, first.name);
    assert_eq!(second.price, first.price);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_concurrent_upserts_converge_on_one_row() {
    let db = TestDatabase::new().await;
    let builder = TestDataBuilder::from_test_name("upsert_concurrent");

    let image = format!("/images/{}.jpg", builder.name("frame", "race"));

    let mut handles = vec![];
    for i in 0..5 {
        let repo = PgProductRepository::new(db.connection());
        let input = sample_create(&builder, "race", Some(image.clone()));
        let embedding = format!("[{}.0]", i);

        handles.push(tokio::spawn(async move {
            repo.upsert_by_image(input, embedding).await
        }));
    }

    let results: Vec<_> = futures::future::join_all(handles)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    let mut ids = vec![];
    for result in results {
        ids.push(result.unwrap().id);
    }
    ids.dedup();
    assert_eq!(ids.len(), 1, "all upserts should target the same row");

    let repo = PgProductRepository::new(db.connection());
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
async fn test_service_validation() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let service = ProductService::new(repo);
    let builder = TestDataBuilder::from_test_name("service_validation");

    let mut input = sample_create(&builder, "invalid", None);
    input.name = String::new();

    let result = service.create_product(input).await;
    assert!(
        matches!(result, Err(ProductError::Validation(_))),
        "empty name should fail validation"
    );

    let mut input = sample_create(&builder, "invalid-price", None);
    input.price = -1;

    let result = service.create_product(input).await;
    assert!(
        matches!(result, Err(ProductError::Validation(_))),
        "negative price should fail validation"
    );
}

#[tokio::test]
async fn test_service_get_missing_is_not_found() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let service = ProductService::new(repo);

    let result = service.get_product(999999).await;
    assert!(matches!(result, Err(ProductError::NotFound(_))));
}
