//! Tests for the product service.

use std::sync::Arc;

use chrono::Utc;
use mockall::predicate::function;
use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockObjectStorage, MockProductRepository, ObjectStorageError};
use crate::domain::service_test_support::{admin, manager, object, png, stored_product};

const OLD_IMAGE: &str = "http://localhost:8080/uploads/old.png";

fn make_service(
    repo: MockProductRepository,
    storage: MockObjectStorage,
) -> ProductService<MockProductRepository> {
    ProductService::new(Arc::new(repo), Arc::new(storage))
}

fn persisted(draft: &ProductDraft) -> Product {
    Product {
        id: ResourceId::generate(),
        name: draft.name.clone(),
        description: draft.description.clone(),
        image_url: draft.image_url.clone(),
        price_configuration: draft.price_configuration.clone(),
        attributes: draft.attributes.clone(),
        tenant_id: draft.tenant_id.clone(),
        category_id: draft.category_id.clone(),
        is_published: draft.is_published,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn repo_holding(product: Product) -> MockProductRepository {
    let mut repo = MockProductRepository::new();
    let updated = product.clone();
    repo.expect_find_by_id()
        .returning(move |_| Ok(Some(product.clone())));
    repo.expect_update().returning(move |_, patch| {
        let mut product = updated.clone();
        patch.apply_to(&mut product);
        Ok(Some(product))
    });
    repo
}

#[fixture]
fn margherita() -> serde_json::Value {
    json!({
        "name": "Margherita",
        "description": "Tomato, mozzarella and basil",
        "tenantId": "T2",
        "categoryId": "65f1c2a4b9e8d70012345678",
        "priceConfiguration": {
            "Size": {"priceType": "base", "availableOptions": {"Small": 400, "Large": 650}}
        },
        "attributes": [{"name": "isHit", "value": "yes"}]
    })
}

#[rstest]
#[tokio::test]
async fn uploaded_images_become_the_product_image(margherita: serde_json::Value) {
    let mut repo = MockProductRepository::new();
    repo.expect_create().times(1).returning(|draft| Ok(persisted(draft)));
    let mut storage = MockObjectStorage::new();
    storage.expect_upload().times(1).returning(|_, _| Ok(()));
    storage
        .expect_object_uri()
        .returning(|name| format!("http://localhost:8080/uploads/{name}"));

    let request = MutationRequest::json(object(margherita)).with_image(png());
    let product = make_service(repo, storage)
        .create(&admin(), request)
        .await
        .expect("created");

    assert!(product.image_url.ends_with(".png"));
    assert!(!product.image_url.ends_with("-t.png"));
    assert_eq!(product.tenant_id.as_str(), "T2");
}

#[rstest]
#[tokio::test]
async fn a_direct_image_url_needs_no_upload(margherita: serde_json::Value) {
    let mut repo = MockProductRepository::new();
    repo.expect_create().returning(|draft| Ok(persisted(draft)));
    let mut body = object(margherita);
    body.insert("imageUrl".to_owned(), json!("https://cdn.example.com/m.png"));

    let product = make_service(repo, MockObjectStorage::new())
        .create(&manager("T1"), MutationRequest::json(body))
        .await
        .expect("created");

    assert_eq!(product.image_url, "https://cdn.example.com/m.png");
    assert_eq!(product.tenant_id.as_str(), "T1");
}

#[rstest]
#[tokio::test]
async fn create_without_any_image_is_rejected(margherita: serde_json::Value) {
    let mut repo = MockProductRepository::new();
    repo.expect_create().never();

    let err = make_service(repo, MockObjectStorage::new())
        .create(&admin(), MutationRequest::json(object(margherita)))
        .await
        .expect_err("image required");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
    assert!(
        err.field_errors()
            .iter()
            .any(|e| e.field() == "image" && e.message() == IMAGE_REQUIRED)
    );
}

#[rstest]
#[tokio::test]
async fn unsupported_image_types_are_rejected(margherita: serde_json::Value) {
    let request = MutationRequest::json(object(margherita))
        .with_image(crate::domain::UploadedImage::new("image/gif", vec![1]));

    let err = make_service(MockProductRepository::new(), MockObjectStorage::new())
        .create(&admin(), request)
        .await
        .expect_err("gif rejected");

    assert_eq!(
        err.field_errors()[0].message(),
        "Invalid image type. Only jpeg, png, jpg, webp allowed"
    );
}

#[rstest]
#[tokio::test]
async fn manager_without_tenant_claim_cannot_create(margherita: serde_json::Value) {
    let actor = crate::domain::ActorClaim::new("m", crate::domain::Role::Manager, None)
        .expect("claim");

    let err = make_service(MockProductRepository::new(), MockObjectStorage::new())
        .create(&actor, MutationRequest::json(object(margherita)))
        .await
        .expect_err("no tenant");

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Tenant ID is missing in auth");
}

#[rstest]
#[tokio::test]
async fn foreign_products_are_forbidden_to_managers() {
    let mut repo = MockProductRepository::new();
    repo.expect_find_by_id()
        .returning(|_| Ok(Some(stored_product("T2", OLD_IMAGE))));
    repo.expect_update().never();

    let err = make_service(repo, MockObjectStorage::new())
        .update(
            &manager("T1"),
            &ResourceId::generate(),
            MutationRequest::json(object(json!({"name": "Diavola"}))),
        )
        .await
        .expect_err("foreign tenant");

    assert_eq!(err.code(), ErrorCode::Forbidden);
    assert_eq!(err.message(), "You are not authorised to update this Product.");
}

#[rstest]
#[tokio::test]
async fn admins_bypass_tenant_scope() {
    let repo = repo_holding(stored_product("T2", OLD_IMAGE));

    let product = make_service(repo, MockObjectStorage::new())
        .update(
            &admin(),
            &ResourceId::generate(),
            MutationRequest::json(object(json!({"isPublished": "true"}))),
        )
        .await
        .expect("admin update");

    assert!(product.is_published);
}

#[rstest]
#[tokio::test]
async fn published_products_can_be_unpublished() {
    let mut published = stored_product("T1", OLD_IMAGE);
    published.is_published = true;
    let repo = repo_holding(published);

    let product = make_service(repo, MockObjectStorage::new())
        .update(
            &manager("T1"),
            &ResourceId::generate(),
            MutationRequest::json(object(json!({"isPublished": false}))),
        )
        .await
        .expect("unpublish");

    assert!(!product.is_published);
}

#[rstest]
#[tokio::test]
async fn replaced_images_delete_the_prior_uri() {
    let repo = repo_holding(stored_product("T1", OLD_IMAGE));
    let mut storage = MockObjectStorage::new();
    storage.expect_upload().returning(|_, _| Ok(()));
    storage
        .expect_object_uri()
        .returning(|name| format!("http://localhost:8080/uploads/{name}"));
    storage
        .expect_delete()
        .with(function(|uri: &str| uri == OLD_IMAGE))
        .times(1)
        .returning(|_| Ok(()));

    let product = make_service(repo, storage)
        .update(
            &manager("T1"),
            &ResourceId::generate(),
            MutationRequest::default().with_image(png()),
        )
        .await
        .expect("updated");

    assert_ne!(product.image_url, OLD_IMAGE);
}

#[rstest]
#[tokio::test]
async fn failed_uploads_retain_the_prior_uri_over_a_supplied_url() {
    let repo = repo_holding(stored_product("T1", OLD_IMAGE));
    let mut storage = MockObjectStorage::new();
    storage
        .expect_upload()
        .returning(|_, _| Err(ObjectStorageError::upload("timeout")));
    storage.expect_delete().never();

    let request = MutationRequest::json(object(json!({
        "imageUrl": "https://cdn.example.com/other.png",
        "description": "Now with extra basil"
    })))
    .with_image(png());
    let product = make_service(repo, storage)
        .update(&manager("T1"), &ResourceId::generate(), request)
        .await
        .expect("update succeeds");

    assert_eq!(product.image_url, OLD_IMAGE);
    assert_eq!(product.description, "Now with extra basil");
}

#[rstest]
#[tokio::test]
async fn deleting_a_missing_product_is_not_found() {
    let mut repo = MockProductRepository::new();
    repo.expect_find_by_id().returning(|_| Ok(None));

    let err = make_service(repo, MockObjectStorage::new())
        .delete(&manager("T1"), &ResourceId::generate())
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "Product not found");
}
