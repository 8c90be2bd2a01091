//! Declarative field validation.
//!
//! A [`Validator`] owns an ordered list of [`FieldRule`]s. Every rule runs and
//! every failure is collected; within a single rule the chain of checks stops
//! at its first failure. Checks may normalise their own field (for example by
//! coercing option lists to strings) but never touch other fields.
//!
//! Rules marked optional pass when their field is falsy: missing, `null`,
//! `false`, `0`, or `""`. Such fields are dropped from the payload so later
//! stages treat them as absent. Flags whose `false` is meaningful use
//! [`FieldRule::optional_if_absent`], which skips only missing or `null`.

mod category;
mod image;
mod product;
mod topping;

use async_trait::async_trait;
use regex::Regex;
use serde_json::{Map, Number, Value};
use url::Url;

use super::error::Error;
use super::resource_id::ResourceId;

pub use category::{UniqueCategoryName, category_rules};
pub use image::{ALLOWED_IMAGE_TYPES, ImageRequirement, image_errors};
pub use product::product_rules;
pub use topping::topping_rules;

/// Whether rules validate a create (required fields) or an update
/// (every field optional).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleMode {
    Create,
    Update,
}

impl RuleMode {
    /// Optionality applied to every rule built in this mode.
    #[must_use]
    pub const fn optional(self) -> bool {
        matches!(self, Self::Update)
    }
}

/// A single field failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    field: String,
    message: String,
}

impl FieldError {
    /// Build a failure for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Payload key the failure refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

/// Result of validating a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    Invalid(Vec<FieldError>),
}

impl ValidationOutcome {
    /// Build an outcome from collected failures.
    #[must_use]
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            Self::Valid
        } else {
            Self::Invalid(errors)
        }
    }

    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Collected failures; empty when valid.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    /// Append further failures, keeping report order.
    #[must_use]
    pub fn with_errors(self, extra: Vec<FieldError>) -> Self {
        let mut errors = match self {
            Self::Valid => Vec::new(),
            Self::Invalid(errors) => errors,
        };
        errors.extend(extra);
        Self::from_errors(errors)
    }

    /// Convert into a domain result, surfacing every failure.
    pub fn into_result(self) -> Result<(), Error> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(errors) => Err(Error::validation(errors)),
        }
    }
}

/// Why an asynchronous check did not pass.
#[derive(Debug)]
pub enum CheckFailure {
    /// The value is invalid; reported as a field error.
    Rejected(String),
    /// The check itself could not run; aborts validation.
    Aborted(Error),
}

/// Check that suspends, typically to query storage.
#[async_trait]
pub trait AsyncCheck: Send + Sync {
    /// Inspect the field's current value.
    async fn check(&self, value: &Value) -> Result<(), CheckFailure>;
}

type SyncCheck = Box<dyn Fn(&mut Value) -> Result<(), String> + Send + Sync>;

enum Step {
    Sync(SyncCheck),
    Async(Box<dyn AsyncCheck>),
}

/// Ordered chain of checks over one payload field.
///
/// # Examples
/// ```
/// use catalog::domain::validation::{FieldRule, Validator};
/// use serde_json::json;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let validator = Validator::new(vec![
///     FieldRule::new("name").string("Name must be a string").length(3, None, "Name is too short"),
/// ]);
/// let mut payload = json!({"name": "ab"}).as_object().cloned().unwrap();
/// let outcome = validator.validate(&mut payload).await.unwrap();
/// assert_eq!(outcome.errors()[0].message(), "Name is too short");
/// # });
/// ```
pub struct FieldRule {
    field: &'static str,
    optional: bool,
    absent_only: bool,
    steps: Vec<Step>,
}

impl FieldRule {
    /// Start a required rule for `field`.
    #[must_use]
    pub const fn new(field: &'static str) -> Self {
        Self {
            field,
            optional: false,
            absent_only: false,
            steps: Vec::new(),
        }
    }

    /// Let falsy values pass and drop them from the payload.
    #[must_use]
    pub fn optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Skip only a missing or `null` value; `false` and `0` are validated
    /// and kept.
    #[must_use]
    pub fn optional_if_absent(mut self) -> Self {
        self.optional = true;
        self.absent_only = true;
        self
    }

    fn skips(&self, value: &Value) -> bool {
        self.optional && if self.absent_only { value.is_null() } else { is_falsy(value) }
    }

    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Append a synchronous check that may normalise the value.
    #[must_use]
    pub fn check<F>(mut self, check: F) -> Self
    where
        F: Fn(&mut Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.steps.push(Step::Sync(Box::new(check)));
        self
    }

    /// Append an asynchronous check.
    #[must_use]
    pub fn check_async(mut self, check: impl AsyncCheck + 'static) -> Self {
        self.steps.push(Step::Async(Box::new(check)));
        self
    }

    /// Value must be a string.
    #[must_use]
    pub fn string(self, message: &'static str) -> Self {
        self.check(move |value| ensure(value.is_string(), message))
    }

    /// String length in characters must lie within `min..=max`.
    #[must_use]
    pub fn length(self, min: usize, max: Option<usize>, message: &'static str) -> Self {
        self.check(move |value| {
            let len = value.as_str().map(|text| text.chars().count());
            ensure(
                len.is_some_and(|len| len >= min && max.is_none_or(|max| len <= max)),
                message,
            )
        })
    }

    /// String must be non-empty once trimmed.
    #[must_use]
    pub fn not_empty(self, message: &'static str) -> Self {
        self.check(move |value| {
            ensure(
                value.as_str().is_some_and(|text| !text.trim().is_empty()),
                message,
            )
        })
    }

    /// String must match `pattern`.
    #[must_use]
    pub fn matches(self, pattern: &'static Regex, message: &'static str) -> Self {
        self.check(move |value| {
            ensure(
                value.as_str().is_some_and(|text| pattern.is_match(text)),
                message,
            )
        })
    }

    /// String must be an absolute `http` or `https` URL with a host.
    #[must_use]
    pub fn url(self, message: &'static str) -> Self {
        self.check(move |value| ensure(value.as_str().is_some_and(is_web_url), message))
    }

    /// String must be a resource identifier.
    #[must_use]
    pub fn resource_id(self, message: &'static str) -> Self {
        self.check(move |value| {
            ensure(
                value.as_str().is_some_and(ResourceId::is_valid),
                message,
            )
        })
    }

    /// Number, or numeric string, strictly greater than zero.
    ///
    /// Numeric strings are normalised to numbers.
    #[must_use]
    pub fn positive_number(self, message: &'static str) -> Self {
        self.check(move |value| {
            let number = match value {
                Value::Number(number) => number.as_f64(),
                Value::String(text) => text.trim().parse::<f64>().ok(),
                _ => None,
            };
            match number.filter(|n| n.is_finite() && *n > 0.0).and_then(Number::from_f64) {
                Some(number) => {
                    if value.is_string() {
                        *value = Value::Number(number);
                    }
                    Ok(())
                }
                None => Err(message.to_owned()),
            }
        })
    }

    /// Value must be a boolean; `"true"` and `"false"` strings are coerced.
    #[must_use]
    pub fn boolean(self, message: &'static str) -> Self {
        self.check(move |value| {
            let coerced = match value {
                Value::Bool(flag) => Some(*flag),
                Value::String(text) => text.parse::<bool>().ok(),
                _ => None,
            };
            let flag = coerced.ok_or_else(|| message.to_owned())?;
            *value = Value::Bool(flag);
            Ok(())
        })
    }

    async fn run(&self, value: &mut Value) -> Result<Result<(), String>, Error> {
        for step in &self.steps {
            let result = match step {
                Step::Sync(check) => check(value),
                Step::Async(check) => match check.check(value).await {
                    Ok(()) => Ok(()),
                    Err(CheckFailure::Rejected(message)) => Err(message),
                    Err(CheckFailure::Aborted(error)) => return Err(error),
                },
            };
            if result.is_err() {
                return Ok(result);
            }
        }
        Ok(Ok(()))
    }
}

/// Ordered rule set applied to a payload.
pub struct Validator {
    rules: Vec<FieldRule>,
}

impl Validator {
    #[must_use]
    pub const fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    /// Run every rule against `payload`, normalising fields in place.
    ///
    /// # Errors
    /// Returns an error only when a check cannot run (for example a storage
    /// failure); invalid values are reported through the outcome.
    pub async fn validate(&self, payload: &mut Map<String, Value>) -> Result<ValidationOutcome, Error> {
        let mut errors = Vec::new();
        for rule in &self.rules {
            let mut value = payload.get(rule.field).cloned().unwrap_or(Value::Null);
            if rule.skips(&value) {
                payload.remove(rule.field);
                continue;
            }
            match rule.run(&mut value).await? {
                Ok(()) => {
                    if !value.is_null() || payload.contains_key(rule.field) {
                        payload.insert(rule.field.to_owned(), value);
                    }
                }
                Err(message) => errors.push(FieldError::new(rule.field, message)),
            }
        }
        Ok(ValidationOutcome::from_errors(errors))
    }
}

/// Falsy values count as absent for optional rules.
#[must_use]
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_none_or(|n| n == 0.0 || n.is_nan()),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Render a scalar as the string a form would have sent.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn ensure(condition: bool, message: &str) -> Result<(), String> {
    if condition {
        Ok(())
    } else {
        Err(message.to_owned())
    }
}

fn is_web_url(text: &str) -> bool {
    Url::parse(text).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some_and(|host| !host.is_empty())
    })
}
