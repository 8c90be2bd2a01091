//! Topping field rules.

use super::{FieldRule, RuleMode};

/// Rules for topping create and update payloads.
pub fn topping_rules(mode: RuleMode) -> Vec<FieldRule> {
    let optional = mode.optional();
    let mut rules = vec![
        FieldRule::new("name")
            .optional(optional)
            .string("Name must be a string")
            .length(3, None, "Name must be at least 3 characters long"),
        FieldRule::new("price")
            .optional(optional)
            .positive_number("Price must be a number greater than 0"),
    ];
    if mode == RuleMode::Create {
        rules.push(
            FieldRule::new("tenantId")
                .string("Tenant ID is required")
                .not_empty("Tenant ID is required"),
        );
    }
    rules
}
