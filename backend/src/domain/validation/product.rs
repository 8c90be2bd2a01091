//! Product field rules.

use serde_json::{Map, Value};

use super::{FieldRule, RuleMode};

const PRODUCT_PRICE_TYPES: [&str; 2] = ["base", "additional"];

/// Rules for product create and update payloads.
///
/// `image_uploaded` relaxes the `imageUrl` requirement on create, since an
/// uploaded file supplies the image instead.
pub fn product_rules(mode: RuleMode, image_uploaded: bool) -> Vec<FieldRule> {
    let optional = mode.optional();
    let mut rules = vec![
        FieldRule::new("name")
            .optional(optional)
            .string("Name must be a string")
            .length(3, Some(100), "Name must be between 3 and 100 characters long"),
        FieldRule::new("description")
            .optional(optional)
            .string("Description must be a string")
            .length(
                10,
                Some(1000),
                "Description must be between 10 and 1000 characters long",
            ),
        FieldRule::new("imageUrl")
            .optional(optional || image_uploaded)
            .url("Image URL must be a valid URL"),
        FieldRule::new("categoryId")
            .optional(optional)
            .resource_id("Invalid category ID"),
        FieldRule::new("priceConfiguration")
            .optional(optional)
            .check(move |value| price_configuration(value, optional)),
        FieldRule::new("attributes")
            .optional(optional)
            .check(move |value| attributes(value, optional)),
        FieldRule::new("isPublished")
            .optional_if_absent()
            .boolean("isPublished must be a boolean"),
    ];
    if mode == RuleMode::Create {
        rules.insert(
            3,
            FieldRule::new("tenantId")
                .string("Tenant ID is required")
                .not_empty("Tenant ID is required"),
        );
    }
    rules
}

fn price_configuration(value: &mut Value, optional: bool) -> Result<(), String> {
    let Value::Object(entries) = value else {
        return Err("priceConfiguration must be an object".to_owned());
    };
    if entries.is_empty() && !optional {
        return Err("priceConfiguration cannot be empty".to_owned());
    }
    for (key, entry) in entries.iter() {
        let price_type = entry.get("priceType").and_then(Value::as_str);
        if !price_type.is_some_and(|kind| PRODUCT_PRICE_TYPES.contains(&kind)) {
            return Err(format!("Invalid or missing priceType for key \"{key}\""));
        }
        let options = entry
            .get("availableOptions")
            .and_then(Value::as_object)
            .filter(|options| !options.is_empty())
            .ok_or_else(|| format!("availableOptions must be a non-empty object for key \"{key}\""))?;
        price_options(key, options)?;
    }
    Ok(())
}

fn price_options(key: &str, options: &Map<String, Value>) -> Result<(), String> {
    let all_numbers = options
        .values()
        .all(|price| price.as_f64().is_some_and(f64::is_finite));
    if all_numbers {
        Ok(())
    } else {
        Err(format!(
            "Option value in availableOptions must be a valid number for key \"{key}\""
        ))
    }
}

fn attributes(value: &mut Value, optional: bool) -> Result<(), String> {
    let Value::Array(items) = value else {
        return Err("Attributes must be an array".to_owned());
    };
    if items.is_empty() && !optional {
        return Err("Attributes cannot be empty".to_owned());
    }
    for (index, item) in items.iter().enumerate() {
        let has_name = item
            .get("name")
            .and_then(Value::as_str)
            .is_some_and(|name| !name.is_empty());
        if !has_name {
            return Err(format!("Attribute at index {index} must have a valid name"));
        }
        let has_scalar_value = matches!(
            item.get("value"),
            Some(Value::String(_) | Value::Number(_) | Value::Bool(_))
        );
        if !has_scalar_value {
            return Err(format!(
                "Attribute at index {index} must have a valid value (string, number, or boolean)"
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::validation::Validator;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object fixture, got {other}"),
        }
    }

    #[fixture]
    fn valid_product() -> Map<String, Value> {
        payload(json!({
            "name": "Margherita",
            "description": "Tomato, mozzarella and basil",
            "imageUrl": "https://cdn.example.com/margherita.png",
            "tenantId": "T1",
            "categoryId": "65f1c2a4b9e8d70012345678",
            "priceConfiguration": {
                "Size": {"priceType": "base", "availableOptions": {"Small": 400, "Large": 650}}
            },
            "attributes": [{"name": "isHit", "value": true}]
        }))
    }

    async fn messages(rules: Vec<FieldRule>, body: &mut Map<String, Value>) -> Vec<(String, String)> {
        Validator::new(rules)
            .validate(body)
            .await
            .expect("validation runs")
            .errors()
            .iter()
            .map(|e| (e.field().to_owned(), e.message().to_owned()))
            .collect()
    }

    #[rstest]
    #[tokio::test]
    async fn complete_payloads_are_valid(mut valid_product: Map<String, Value>) {
        assert!(messages(product_rules(RuleMode::Create, false), &mut valid_product)
            .await
            .is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn uploads_stand_in_for_image_urls(mut valid_product: Map<String, Value>) {
        valid_product.remove("imageUrl");
        assert!(messages(product_rules(RuleMode::Create, true), &mut valid_product)
            .await
            .is_empty());
    }

    #[rstest]
    #[case("name", json!("ab"), "Name must be between 3 and 100 characters long")]
    #[case("description", json!("short"), "Description must be between 10 and 1000 characters long")]
    #[case("imageUrl", json!("not a url"), "Image URL must be a valid URL")]
    #[case("tenantId", json!(""), "Tenant ID is required")]
    #[case("categoryId", json!("123"), "Invalid category ID")]
    #[case("priceConfiguration", json!({}), "priceConfiguration cannot be empty")]
    #[case(
        "priceConfiguration",
        json!({"Size": {"priceType": "discount", "availableOptions": {"S": 1}}}),
        "Invalid or missing priceType for key \"Size\""
    )]
    #[case(
        "priceConfiguration",
        json!({"Size": {"priceType": "base", "availableOptions": ["S"]}}),
        "availableOptions must be a non-empty object for key \"Size\""
    )]
    #[case(
        "priceConfiguration",
        json!({"Size": {"priceType": "base", "availableOptions": {"S": "cheap"}}}),
        "Option value in availableOptions must be a valid number for key \"Size\""
    )]
    #[case("attributes", json!([]), "Attributes cannot be empty")]
    #[case(
        "attributes",
        json!([{"name": "isHit", "value": null}]),
        "Attribute at index 0 must have a valid value (string, number, or boolean)"
    )]
    #[tokio::test]
    async fn each_field_rule_reports_its_message(
        mut valid_product: Map<String, Value>,
        #[case] field: &str,
        #[case] value: Value,
        #[case] message: &str,
    ) {
        valid_product.insert(field.to_owned(), value);
        let reported = messages(product_rules(RuleMode::Create, false), &mut valid_product).await;
        assert_eq!(reported, vec![(field.to_owned(), message.to_owned())]);
    }

    #[rstest]
    #[case(json!(null))]
    #[case(json!(0))]
    #[case(json!(""))]
    #[tokio::test]
    async fn update_rules_treat_falsy_values_as_absent(#[case] falsy: Value) {
        let mut body = payload(json!({
            "name": falsy.clone(),
            "description": falsy.clone(),
            "imageUrl": falsy.clone(),
            "categoryId": falsy.clone(),
            "priceConfiguration": falsy.clone(),
            "attributes": falsy,
        }));
        let reported = messages(product_rules(RuleMode::Update, false), &mut body).await;
        assert!(reported.is_empty());
        assert!(body.is_empty(), "falsy optional fields are dropped");
    }

    #[rstest]
    #[case(json!(false), false)]
    #[case(json!("false"), false)]
    #[case(json!(true), true)]
    #[tokio::test]
    async fn update_rules_keep_publication_flags(#[case] flag: Value, #[case] expected: bool) {
        let mut body = payload(json!({"isPublished": flag}));
        assert!(messages(product_rules(RuleMode::Update, false), &mut body)
            .await
            .is_empty());

        let patch: crate::domain::ProductPatch =
            serde_json::from_value(Value::Object(body)).expect("patch decodes");
        assert_eq!(patch.is_published, Some(expected));
    }

    #[rstest]
    #[tokio::test]
    async fn update_rules_skip_null_publication_flags() {
        let mut body = payload(json!({"isPublished": null}));
        assert!(messages(product_rules(RuleMode::Update, false), &mut body)
            .await
            .is_empty());
        assert!(body.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn update_rules_allow_empty_collections() {
        let mut body = payload(json!({"priceConfiguration": {}, "attributes": []}));
        assert!(messages(product_rules(RuleMode::Update, false), &mut body)
            .await
            .is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn create_reports_every_missing_field() {
        let mut body = Map::new();
        let reported = messages(product_rules(RuleMode::Create, false), &mut body).await;
        let fields: Vec<&str> = reported.iter().map(|(field, _)| field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "name",
                "description",
                "imageUrl",
                "tenantId",
                "categoryId",
                "priceConfiguration",
                "attributes"
            ]
        );
    }
}
