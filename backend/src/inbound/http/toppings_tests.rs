//! Tests for topping HTTP handlers.

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::ports::{MockCategoryCatalog, MockProductCatalog, MockToppingCatalog};
use crate::domain::service_test_support::stored_topping;
use crate::domain::{Error, Role};
use crate::inbound::http::test_utils::{
    ADMIN_TOKEN, CUSTOMER_TOKEN, EXPIRED_TOKEN, MANAGER_TOKEN, MultipartBuilder, PNG_BYTES,
    bearer, state_with,
};

const IMAGE: &str = "http://localhost:8080/uploads/cheese-t.png";

fn test_app(
    toppings: MockToppingCatalog,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = state_with(MockCategoryCatalog::new(), MockProductCatalog::new(), toppings);
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .service(list_toppings)
            .service(get_topping)
            .service(create_topping)
            .service(update_topping)
            .service(delete_topping),
    )
}

#[actix_web::test]
async fn listing_is_public() {
    let mut toppings = MockToppingCatalog::new();
    toppings
        .expect_list()
        .returning(|| Ok(vec![stored_topping("T1", IMAGE)]));
    let app = actix_test::init_service(test_app(toppings)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/api/v1/toppings").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["data"][0]["tenantId"], "T1");
    assert_eq!(body["data"][0]["image"], IMAGE);
}

#[actix_web::test]
async fn malformed_ids_are_rejected_before_lookup() {
    let mut toppings = MockToppingCatalog::new();
    toppings.expect_get().never();
    let app = actix_test::init_service(test_app(toppings)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/toppings/not-an-id")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["errors"][0]["message"], INVALID_ID);
}

#[actix_web::test]
async fn missing_toppings_are_404() {
    let mut toppings = MockToppingCatalog::new();
    toppings
        .expect_get()
        .returning(|_| Err(Error::not_found("Topping not found")));
    let app = actix_test::init_service(test_app(toppings)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/toppings/65f1c2a4b9e8d70012345678")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn multipart_creates_answer_201_with_the_new_id() {
    let created = stored_topping("T1", IMAGE);
    let expected_id = created.id.as_str().to_owned();
    let mut toppings = MockToppingCatalog::new();
    toppings
        .expect_create()
        .withf(|actor, request| {
            actor.role() == Role::Manager
                && request.image.as_ref().is_some_and(|image| image.bytes() == PNG_BYTES)
        })
        .times(1)
        .returning(move |_, _| Ok(created.clone()));
    let app = actix_test::init_service(test_app(toppings)).await;

    let (content_type, body) = MultipartBuilder::new()
        .text("name", "Cheese")
        .text("price", "2.5")
        .file("image", "cheese.png", "image/png", PNG_BYTES)
        .finish();
    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/toppings")
            .insert_header(bearer(MANAGER_TOKEN))
            .insert_header((CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Topping created successfully");
    assert_eq!(body["data"]["id"], Value::String(expected_id));
}

#[rstest]
#[case(None, StatusCode::UNAUTHORIZED)]
#[case(Some(CUSTOMER_TOKEN), StatusCode::FORBIDDEN)]
#[case(Some(EXPIRED_TOKEN), StatusCode::UNAUTHORIZED)]
#[case(Some("forged"), StatusCode::UNAUTHORIZED)]
#[actix_web::test]
async fn creates_are_gated_before_the_body_is_read(
    #[case] token: Option<&str>,
    #[case] status: StatusCode,
) {
    let mut toppings = MockToppingCatalog::new();
    toppings.expect_create().never();
    let app = actix_test::init_service(test_app(toppings)).await;

    let mut request = actix_test::TestRequest::post()
        .uri("/api/v1/toppings")
        .insert_header((CONTENT_TYPE, "application/json"))
        .set_payload("{not json");
    if let Some(token) = token {
        request = request.insert_header(bearer(token));
    }
    let response = actix_test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), status);
}

#[actix_web::test]
async fn expired_tokens_say_so() {
    let app = actix_test::init_service(test_app(MockToppingCatalog::new())).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/toppings/65f1c2a4b9e8d70012345678")
            .insert_header(bearer(EXPIRED_TOKEN))
            .to_request(),
    )
    .await;

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["errors"][0]["message"], "Token has expired");
}

#[actix_web::test]
async fn updates_return_the_stored_topping() {
    let mut updated = stored_topping("T1", IMAGE);
    updated.name = "Pepper".to_owned();
    let mut toppings = MockToppingCatalog::new();
    toppings
        .expect_update()
        .withf(|_, id, request| {
            id.as_str() == "65f1c2a4b9e8d70012345678" && request.image.is_none()
        })
        .returning(move |_, _, _| Ok(updated.clone()));
    let app = actix_test::init_service(test_app(toppings)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/toppings/65F1C2A4B9E8D70012345678")
            .insert_header(bearer(ADMIN_TOKEN))
            .set_json(serde_json::json!({"name": "Pepper"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Topping updated successfully");
    assert_eq!(body["data"]["name"], "Pepper");
}

#[actix_web::test]
async fn foreign_tenant_deletes_are_403() {
    let mut toppings = MockToppingCatalog::new();
    toppings.expect_delete().returning(|_, _| {
        Err(Error::forbidden("You are not authorised to delete this Topping.").with_path("Topping"))
    });
    let app = actix_test::init_service(test_app(toppings)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/toppings/65f1c2a4b9e8d70012345678")
            .insert_header(bearer(MANAGER_TOKEN))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], Value::Bool(false));
}

#[actix_web::test]
async fn deletes_confirm_with_a_message() {
    let mut toppings = MockToppingCatalog::new();
    toppings.expect_delete().times(1).returning(|_, _| Ok(()));
    let app = actix_test::init_service(test_app(toppings)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/toppings/65f1c2a4b9e8d70012345678")
            .insert_header(bearer(MANAGER_TOKEN))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Topping deleted successfully");
    assert!(body.get("data").is_none());
}
