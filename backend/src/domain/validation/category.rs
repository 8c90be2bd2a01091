//! Category field rules and the name uniqueness check.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use super::{AsyncCheck, CheckFailure, FieldRule, RuleMode, stringify};
use crate::domain::category_service::map_category_repository_error;
use crate::domain::ports::CategoryRepository;
use crate::domain::resource_id::ResourceId;

const CATEGORY_PRICE_TYPES: [&str; 3] = ["base", "additional", "discount"];
const WIDGET_TYPES: [&str; 2] = ["radio", "switch"];

static CATEGORY_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn category_name_regex() -> &'static Regex {
    CATEGORY_NAME_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9\s]+$")
            .unwrap_or_else(|error| panic!("category name regex failed to compile: {error}"))
    })
}

/// Rejects a category name that another category already uses.
///
/// The lookup is a point-in-time read; the storage uniqueness constraint
/// covers concurrent creates.
pub struct UniqueCategoryName {
    repository: Arc<dyn CategoryRepository>,
    current: Option<ResourceId>,
}

impl UniqueCategoryName {
    /// Check names against `repository`.
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self {
            repository,
            current: None,
        }
    }

    /// Ignore the category being updated.
    #[must_use]
    pub fn excluding(mut self, id: ResourceId) -> Self {
        self.current = Some(id);
        self
    }
}

#[async_trait]
impl AsyncCheck for UniqueCategoryName {
    async fn check(&self, value: &Value) -> Result<(), CheckFailure> {
        let Some(name) = value.as_str() else {
            return Ok(());
        };
        let existing = self
            .repository
            .find_by_name(name)
            .await
            .map_err(|error| CheckFailure::Aborted(map_category_repository_error(error)))?;
        let clash = existing
            .iter()
            .any(|category| self.current.as_ref() != Some(&category.id));
        if clash {
            debug!(name, "category name already taken");
            Err(CheckFailure::Rejected(
                "Category with this name already exists".to_owned(),
            ))
        } else {
            Ok(())
        }
    }
}

/// Rules for category create and update payloads.
pub fn category_rules(unique_name: UniqueCategoryName, mode: RuleMode) -> Vec<FieldRule> {
    let optional = mode.optional();
    vec![
        FieldRule::new("name")
            .optional(optional)
            .matches(
                category_name_regex(),
                "Name can only contain alphanumeric characters and spaces",
            )
            .length(3, Some(100), "Name must be between 3 and 100 characters long")
            .check_async(unique_name),
        FieldRule::new("priceConfiguration")
            .optional(optional)
            .check(price_configuration),
        FieldRule::new("attributes")
            .optional(optional)
            .check(attributes),
    ]
}

fn price_configuration(value: &mut Value) -> Result<(), String> {
    let Value::Object(entries) = value else {
        return Err("Price configuration must be an object".to_owned());
    };
    if entries.is_empty() {
        return Err("Price configuration cannot be empty".to_owned());
    }
    for (key, entry) in entries.iter_mut() {
        let price_type = entry.get("priceType").and_then(Value::as_str);
        if !price_type.is_some_and(|kind| CATEGORY_PRICE_TYPES.contains(&kind)) {
            return Err(format!("Invalid price type for key {key}"));
        }
        let options = entry
            .get_mut("availableOptions")
            .and_then(Value::as_array_mut)
            .filter(|options| !options.is_empty())
            .ok_or_else(|| format!("Available options must be a non-empty array for key {key}"))?;
        stringify_all(options);
    }
    Ok(())
}

fn attributes(value: &mut Value) -> Result<(), String> {
    let Value::Array(items) = value else {
        return Err("Attributes must be an array".to_owned());
    };
    if items.is_empty() {
        return Err("Attributes cannot be empty".to_owned());
    }
    for (index, item) in items.iter_mut().enumerate() {
        let attribute = item
            .as_object_mut()
            .ok_or_else(|| format!("Attribute at index {index} must have a valid name"))?;
        attribute_entry(index, attribute)?;
    }
    Ok(())
}

fn attribute_entry(index: usize, attribute: &mut Map<String, Value>) -> Result<(), String> {
    let has_name = attribute
        .get("name")
        .and_then(Value::as_str)
        .is_some_and(|name| !name.trim().is_empty());
    if !has_name {
        return Err(format!("Attribute at index {index} must have a valid name"));
    }
    let widget = attribute.get("widgetType").and_then(Value::as_str);
    if !widget.is_some_and(|kind| WIDGET_TYPES.contains(&kind)) {
        return Err(format!("Invalid widget type for attribute at index {index}"));
    }
    let options = attribute
        .get_mut("availableOptions")
        .and_then(Value::as_array_mut)
        .filter(|options| !options.is_empty())
        .ok_or_else(|| {
            format!("Available options must be a non-empty array for attribute at index {index}")
        })?;
    stringify_all(options);
    let options: Vec<Value> = options.clone();

    let default_value = match attribute.get("defaultValue") {
        None | Some(Value::Null) => {
            return Err(format!(
                "Attribute at index {index} must have a default value"
            ));
        }
        Some(value) => Value::String(stringify(value)),
    };
    if !options.contains(&default_value) {
        return Err(format!(
            "Default value for attribute at index {index} must be one of the available options"
        ));
    }
    attribute.insert("defaultValue".to_owned(), default_value);
    Ok(())
}

fn stringify_all(options: &mut [Value]) {
    for option in options.iter_mut() {
        if !option.is_string() {
            *option = Value::String(stringify(option));
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Category;
    use crate::domain::ports::{CategoryRepositoryError, MockCategoryRepository};
    use crate::domain::validation::{ValidationOutcome, Validator};
    use chrono::Utc;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object fixture, got {other}"),
        }
    }

    fn existing(name: &str, id: &ResourceId) -> Category {
        Category {
            id: id.clone(),
            name: name.to_owned(),
            price_configuration: Default::default(),
            attributes: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn repository_with(found: Vec<Category>) -> Arc<dyn CategoryRepository> {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_name()
            .returning(move |_| Ok(found.clone()));
        Arc::new(repo)
    }

    #[fixture]
    fn valid_category() -> Map<String, Value> {
        payload(json!({
            "name": "Pizza",
            "priceConfiguration": {
                "Size": {"priceType": "base", "availableOptions": ["Small", "Large"]}
            },
            "attributes": [{
                "name": "Spicy",
                "widgetType": "switch",
                "defaultValue": true,
                "availableOptions": [true, false]
            }]
        }))
    }

    #[rstest]
    #[tokio::test]
    async fn valid_payloads_pass_and_are_normalised(mut valid_category: Map<String, Value>) {
        let validator = Validator::new(category_rules(
            UniqueCategoryName::new(repository_with(Vec::new())),
            RuleMode::Create,
        ));
        let outcome = validator.validate(&mut valid_category).await.expect("validation runs");

        assert_eq!(outcome, ValidationOutcome::Valid);
        assert_eq!(
            valid_category.get("attributes"),
            Some(&json!([{
                "name": "Spicy",
                "widgetType": "switch",
                "defaultValue": "true",
                "availableOptions": ["true", "false"]
            }]))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn existing_names_are_rejected(mut valid_category: Map<String, Value>) {
        let taken = existing("Pizza", &ResourceId::generate());
        let validator = Validator::new(category_rules(
            UniqueCategoryName::new(repository_with(vec![taken])),
            RuleMode::Create,
        ));
        let outcome = validator.validate(&mut valid_category).await.expect("validation runs");

        assert_eq!(outcome.errors().len(), 1);
        assert_eq!(outcome.errors()[0].field(), "name");
        assert_eq!(
            outcome.errors()[0].message(),
            "Category with this name already exists"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn renaming_to_own_name_is_allowed() {
        let id = ResourceId::generate();
        let validator = Validator::new(category_rules(
            UniqueCategoryName::new(repository_with(vec![existing("Pizza", &id)])).excluding(id),
            RuleMode::Update,
        ));
        let mut body = payload(json!({"name": "Pizza"}));
        let outcome = validator.validate(&mut body).await.expect("validation runs");
        assert!(outcome.is_valid());
    }

    #[rstest]
    #[tokio::test]
    async fn storage_failures_abort_validation(mut valid_category: Map<String, Value>) {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_name()
            .returning(|_| Err(CategoryRepositoryError::connection("down")));
        let validator = Validator::new(category_rules(
            UniqueCategoryName::new(Arc::new(repo)),
            RuleMode::Create,
        ));
        let error = validator
            .validate(&mut valid_category)
            .await
            .expect_err("storage failure");
        assert_eq!(error.code(), crate::domain::ErrorCode::InternalError);
    }

    #[rstest]
    #[case(json!({"name": "Pi"}), "Name must be between 3 and 100 characters long")]
    #[case(json!({"name": "Pizza!"}), "Name can only contain alphanumeric characters and spaces")]
    #[case(json!({"priceConfiguration": []}), "Price configuration must be an object")]
    #[case(json!({"priceConfiguration": {}}), "Price configuration cannot be empty")]
    #[case(
        json!({"priceConfiguration": {"Size": {"priceType": "bogus", "availableOptions": ["S"]}}}),
        "Invalid price type for key Size"
    )]
    #[case(
        json!({"priceConfiguration": {"Size": {"priceType": "discount", "availableOptions": []}}}),
        "Available options must be a non-empty array for key Size"
    )]
    #[case(json!({"attributes": {}}), "Attributes must be an array")]
    #[case(json!({"attributes": []}), "Attributes cannot be empty")]
    #[case(
        json!({"attributes": [{"name": "", "widgetType": "radio", "defaultValue": "a", "availableOptions": ["a"]}]}),
        "Attribute at index 0 must have a valid name"
    )]
    #[case(
        json!({"attributes": [{"name": "Crust", "widgetType": "slider", "defaultValue": "a", "availableOptions": ["a"]}]}),
        "Invalid widget type for attribute at index 0"
    )]
    #[case(
        json!({"attributes": [{"name": "Crust", "widgetType": "radio", "availableOptions": ["a"]}]}),
        "Attribute at index 0 must have a default value"
    )]
    #[case(
        json!({"attributes": [{"name": "Crust", "widgetType": "radio", "defaultValue": "b", "availableOptions": ["a"]}]}),
        "Default value for attribute at index 0 must be one of the available options"
    )]
    #[tokio::test]
    async fn update_rules_report_shape_errors(#[case] body: Value, #[case] message: &str) {
        let validator = Validator::new(category_rules(
            UniqueCategoryName::new(repository_with(Vec::new())),
            RuleMode::Update,
        ));
        let mut body = payload(body);
        let outcome = validator.validate(&mut body).await.expect("validation runs");
        let messages: Vec<&str> = outcome.errors().iter().map(|e| e.message()).collect();
        assert_eq!(messages, vec![message]);
    }

    #[rstest]
    #[tokio::test]
    async fn create_rules_require_every_field() {
        let validator = Validator::new(category_rules(
            UniqueCategoryName::new(repository_with(Vec::new())),
            RuleMode::Create,
        ));
        let mut body = Map::new();
        let outcome = validator.validate(&mut body).await.expect("validation runs");
        let fields: Vec<&str> = outcome.errors().iter().map(|e| e.field()).collect();
        assert_eq!(fields, vec!["name", "priceConfiguration", "attributes"]);
    }
}
