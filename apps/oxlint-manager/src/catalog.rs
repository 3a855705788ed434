//! Rule catalog: which oxlint rules belong to which category.
//!
//! Category edits cascade to every rule listed here for that category, and
//! the selector view lists rules grouped by it. Settings may replace the
//! list for any category via `[catalog]`.

use crate::models::Category;
use std::collections::{BTreeMap, HashMap};

const CORRECTNESS: &[&str] = &[
    "for-direction",
    "no-async-promise-executor",
    "no-caller",
    "no-class-assign",
    "no-compare-neg-zero",
    "no-cond-assign",
    "no-const-assign",
    "no-constant-condition",
    "no-debugger",
    "no-dupe-class-members",
    "no-dupe-else-if",
    "no-dupe-keys",
    "no-duplicate-case",
    "no-empty-pattern",
    "no-self-assign",
    "no-unsafe-finally",
    "no-unused-vars",
    "use-isnan",
    "valid-typeof",
];

const NURSERY: &[&str] = &[
    "getter-return",
    "no-misleading-character-class",
    "no-undef",
    "no-unreachable",
];

const PEDANTIC: &[&str] = &[
    "array-callback-return",
    "eqeqeq",
    "max-classes-per-file",
    "max-lines",
    "no-case-declarations",
    "no-else-return",
    "no-inner-declarations",
    "no-lonely-if",
    "no-negated-condition",
    "no-promise-executor-return",
    "no-redeclare",
    "no-self-compare",
    "no-throw-literal",
    "radix",
    "require-await",
    "symbol-description",
];

const PERF: &[&str] = &["no-await-in-loop", "no-useless-call"];

const RESTRICTION: &[&str] = &[
    "default-case",
    "no-alert",
    "no-bitwise",
    "no-console",
    "no-div-regex",
    "no-empty",
    "no-empty-function",
    "no-eq-null",
    "no-eval",
    "no-iterator",
    "no-plusplus",
    "no-proto",
    "no-regex-spaces",
    "no-restricted-globals",
    "no-var",
    "no-void",
    "unicode-bom",
];

const STYLE: &[&str] = &[
    "curly",
    "default-case-last",
    "default-param-last",
    "func-names",
    "func-style",
    "grouped-accessor-pairs",
    "guard-for-in",
    "init-declarations",
    "max-params",
    "new-cap",
    "no-continue",
    "no-duplicate-imports",
    "no-labels",
    "no-magic-numbers",
    "no-multi-str",
    "no-nested-ternary",
    "no-template-curly-in-string",
    "no-ternary",
    "prefer-exponentiation-operator",
    "prefer-numeric-literals",
    "prefer-object-has-own",
    "prefer-object-spread",
    "prefer-rest-params",
    "prefer-spread",
    "sort-imports",
    "sort-keys",
    "vars-on-top",
    "yoda",
];

const SUSPICIOUS: &[&str] = &[
    "block-scoped-var",
    "no-extend-native",
    "no-extra-bind",
    "no-new",
    "no-unexpected-multiline",
    "no-unneeded-ternary",
    "no-useless-concat",
    "no-useless-constructor",
];

fn builtin_rules(category: Category) -> &'static [&'static str] {
    match category {
        Category::Correctness => CORRECTNESS,
        Category::Nursery => NURSERY,
        Category::Pedantic => PEDANTIC,
        Category::Perf => PERF,
        Category::Restriction => RESTRICTION,
        Category::Style => STYLE,
        Category::Suspicious => SUSPICIOUS,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    rules: BTreeMap<Category, Vec<String>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        let rules = Category::ALL
            .into_iter()
            .map(|c| (c, builtin_rules(c).iter().map(|r| r.to_string()).collect()))
            .collect();
        Self { rules }
    }

    /// Built-in catalog with whole categories replaced by `overrides`.
    ///
    /// Keys must be category names; an unknown key is an error.
    pub fn with_overrides(overrides: &HashMap<String, Vec<String>>) -> Result<Self, String> {
        let mut cat = Self::builtin();
        for (name, rules) in overrides {
            let category: Category = name.parse()?;
            cat.rules.insert(category, rules.clone());
        }
        Ok(cat)
    }

    pub fn rules_in(&self, category: Category) -> &[String] {
        self.rules.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Category a rule is listed under, if any (first match in category order).
    pub fn category_of(&self, rule: &str) -> Option<Category> {
        self.rules
            .iter()
            .find(|(_, rules)| rules.iter().any(|r| r == rule))
            .map(|(c, _)| *c)
    }

    /// Categories with their rules, in `Category::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        self.rules.iter().map(|(c, r)| (*c, r.as_slice()))
    }
}
