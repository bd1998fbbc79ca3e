//! Canned value engine
//!
//! Maps requested attribute types onto fixed values. Lookups are pure: the
//! tables are built once and only ever read.

use crate::contracts::*;
use ngsi_v1::ValueResolver;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Accepted spellings (case-folded) and the category each one names
const TYPE_ALIASES: [(&str, AttributeCategory); 8] = [
    ("array", AttributeCategory::Array),
    ("boolean", AttributeCategory::Boolean),
    ("float", AttributeCategory::Number),
    ("integer", AttributeCategory::Number),
    ("number", AttributeCategory::Number),
    ("structuredvalue", AttributeCategory::StructuredValue),
    ("string", AttributeCategory::Text),
    ("text", AttributeCategory::Text),
];

/// Resolves attribute type names to canned values
#[derive(Debug, Clone)]
pub struct TypeValueResolver {
    aliases: HashMap<&'static str, AttributeCategory>,
    /// Indexed by category discriminant, in `AttributeCategory::ALL` order
    values: [Value; 5],
}

impl Default for TypeValueResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeValueResolver {
    /// Build the alias and value tables
    pub fn new() -> Self {
        Self {
            aliases: TYPE_ALIASES.iter().copied().collect(),
            values: AttributeCategory::ALL.map(canned_value),
        }
    }

    /// Canned value for `type_name`, or `None` when the type is not modelled.
    ///
    /// Matching ignores case; `float` and `integer` share the `number` value,
    /// `string` shares the `text` value.
    pub fn resolve(&self, type_name: &str) -> Option<Value> {
        self.category(type_name)
            .map(|category| self.value_for(category))
    }

    /// Category named by `type_name`, if any
    pub fn category(&self, type_name: &str) -> Option<AttributeCategory> {
        let folded = type_name.to_lowercase();
        self.aliases.get(folded.as_str()).copied()
    }

    /// Canned value for a known category
    pub fn value_for(&self, category: AttributeCategory) -> Value {
        self.values[category as usize].clone()
    }

    /// Adapter handed to the v1 formatter; resolves on attribute type only
    pub fn by_type(&self) -> ByTypeResolver<'_> {
        ByTypeResolver { resolver: self }
    }
}

fn canned_value(category: AttributeCategory) -> Value {
    match category {
        AttributeCategory::Array => json!(["Arthur", "Dent"]),
        AttributeCategory::Boolean => json!(true),
        AttributeCategory::Number => json!(42),
        AttributeCategory::StructuredValue => json!({ "somevalue": "this" }),
        AttributeCategory::Text => json!("I never could get the hang of thursdays"),
    }
}

/// [`ValueResolver`] over a [`TypeValueResolver`].
///
/// Attribute names are ignored: every attribute of a given type receives the
/// same value.
#[derive(Debug, Clone, Copy)]
pub struct ByTypeResolver<'a> {
    resolver: &'a TypeValueResolver,
}

impl ValueResolver for ByTypeResolver<'_> {
    fn resolve(&self, _name: &str, attr_type: &str) -> Option<Value> {
        self.resolver.resolve(attr_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RECOGNIZED: [&str; 8] = [
        "array",
        "boolean",
        "number",
        "float",
        "integer",
        "structuredValue",
        "string",
        "text",
    ];

    #[test]
    fn test_canonical_values() {
        let resolver = TypeValueResolver::new();

        assert_eq!(resolver.resolve("array"), Some(json!(["Arthur", "Dent"])));
        assert_eq!(resolver.resolve("boolean"), Some(json!(true)));
        assert_eq!(resolver.resolve("number"), Some(json!(42)));
        assert_eq!(
            resolver.resolve("structuredValue"),
            Some(json!({ "somevalue": "this" }))
        );
        assert_eq!(
            resolver.resolve("text"),
            Some(json!("I never could get the hang of thursdays"))
        );
    }

    #[test]
    fn test_value_table_follows_category_order() {
        let resolver = TypeValueResolver::new();

        for (index, category) in AttributeCategory::ALL.iter().enumerate() {
            assert_eq!(*category as usize, index);
            assert_eq!(resolver.value_for(*category), canned_value(*category));
        }
    }

    #[test]
    fn test_mixed_case_lookup() {
        let resolver = TypeValueResolver::new();

        assert_eq!(resolver.resolve("BOOLEAN"), Some(json!(true)));
        assert_eq!(resolver.resolve("Boolean"), Some(json!(true)));
        assert_eq!(resolver.resolve("Float"), Some(json!(42)));
        assert_eq!(
            resolver.resolve("STRUCTUREDVALUE"),
            Some(json!({ "somevalue": "this" }))
        );
    }

    #[test]
    fn test_aliases_share_values() {
        let resolver = TypeValueResolver::new();

        assert_eq!(resolver.resolve("float"), resolver.resolve("number"));
        assert_eq!(resolver.resolve("integer"), resolver.resolve("number"));
        assert_eq!(resolver.resolve("string"), resolver.resolve("text"));
        assert_eq!(resolver.category("integer"), Some(AttributeCategory::Number));
        assert_eq!(resolver.category("String"), Some(AttributeCategory::Text));
    }

    #[test]
    fn test_unknown_types() {
        let resolver = TypeValueResolver::new();

        assert_eq!(resolver.resolve("frobnicate"), None);
        assert_eq!(resolver.resolve(""), None);
        assert_eq!(resolver.resolve(" number"), None);
        assert_eq!(resolver.resolve("Structured Value"), None);
    }

    #[test]
    fn test_repeated_lookups_are_identical() {
        let resolver = TypeValueResolver::new();
        let first = resolver.resolve("array");

        for _ in 0..100 {
            assert_eq!(resolver.resolve("array"), first);
        }
        assert_eq!(TypeValueResolver::new().resolve("array"), first);
    }

    #[test]
    fn test_by_type_ignores_attribute_name() {
        let resolver = TypeValueResolver::new();
        let adapter = resolver.by_type();

        assert_eq!(adapter.resolve("temperature", "number"), Some(json!(42)));
        assert_eq!(adapter.resolve("humidity", "number"), Some(json!(42)));
        assert_eq!(adapter.resolve("number", "frobnicate"), None);
    }

    proptest! {
        #[test]
        fn prop_resolution_ignores_case(
            name in prop::sample::select(RECOGNIZED.to_vec()),
            mask in prop::collection::vec(any::<bool>(), 16),
        ) {
            let resolver = TypeValueResolver::new();
            let mixed: String = name
                .chars()
                .zip(mask.iter().cycle())
                .map(|(c, upper)| if *upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
                .collect();

            prop_assert!(resolver.resolve(&mixed).is_some());
            prop_assert_eq!(resolver.resolve(&mixed), resolver.resolve(name));
            prop_assert_eq!(resolver.resolve(&name.to_uppercase()), resolver.resolve(name));
        }

        #[test]
        fn prop_unrecognized_names_resolve_to_none(name in "[a-zA-Z]{0,16}") {
            prop_assume!(!RECOGNIZED.iter().any(|r| r.eq_ignore_ascii_case(&name)));
            prop_assert_eq!(TypeValueResolver::new().resolve(&name), None);
        }
    }
}
