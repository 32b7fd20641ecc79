//! Structural validation engine
//!
//! A fixed battery of rules evaluated against a freshly built node and,
//! recursively, every child. The engine only reads: violations are
//! reported, never repaired, and identical input always produces the
//! identical outcome. All violations found in one pass are accumulated,
//! bounded by `max_issues`, unless `fail_fast` stops at the first.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builder::ValidationMode;
use crate::datatypes::Reference;
use crate::element::{has_present_fields, Cardinality, Element, FieldValue};

/// Rule ids, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// A field declared 1..1 is absent.
    RequiredField,
    /// A list field violates its declared 1..* or 0..0 bound.
    ListCardinality,
    /// A list contains a null-equivalent (empty) element.
    ListElement,
    /// A choice value's variant is outside the declared set.
    ChoiceVariant,
    /// A reference designates a target kind outside the field's whitelist.
    ReferenceTarget,
    /// An element carries neither a primitive value nor any children.
    ValueOrChildren,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::RequiredField => "required-field",
            Self::ListCardinality => "list-cardinality",
            Self::ListElement => "list-element",
            Self::ChoiceVariant => "choice-variant",
            Self::ReferenceTarget => "reference-target",
            Self::ValueOrChildren => "value-or-children",
        };
        write!(f, "{}", s)
    }
}

/// One rule violation: which rule, where, and why.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub rule: Rule,
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(rule: Rule, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule,
            path: path.into(),
            message: message.into(),
        }
    }

    fn to_json(&self) -> Value {
        serde_json::json!({
            "severity": "error",
            "code": self.rule.to_string(),
            "diagnostics": self.message,
            "expression": [self.path],
        })
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.path, self.rule, self.message)
    }
}

/// Knobs for one validation run.
#[derive(Debug, Clone)]
pub struct ValidatorSettings {
    pub mode: ValidationMode,
    pub fail_fast: bool,
    pub max_issues: usize,
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Enforced,
            fail_fast: false,
            max_issues: 256,
        }
    }
}

impl ValidatorSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub fn max_issues(mut self, max_issues: usize) -> Self {
        self.max_issues = max_issues;
        self
    }
}

/// Result of validating one tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationOutcome {
    pub fn success() -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
        }
    }

    /// Renders the issues as a FHIR OperationOutcome value, the shape
    /// diagnostic surfaces expect.
    pub fn to_operation_outcome(&self) -> Value {
        serde_json::json!({
            "resourceType": "OperationOutcome",
            "issue": self.issues.iter().map(|i| i.to_json()).collect::<Vec<_>>(),
        })
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            return write!(f, "valid");
        }
        write!(f, "{} issue(s)", self.issues.len())?;
        for issue in &self.issues {
            write!(f, "; {}", issue)?;
        }
        Ok(())
    }
}

/// Runs the rule battery over `root` and its subtree. `name` anchors the
/// issue paths, conventionally the root's type name.
pub fn validate_tree(
    name: &str,
    root: &dyn Element,
    settings: &ValidatorSettings,
) -> ValidationOutcome {
    if settings.mode == ValidationMode::Disabled {
        return ValidationOutcome::success();
    }
    let mut run = ValidationRun::new(settings);
    run.check_element(name, root);
    let outcome = run.finish();
    tracing::debug!(
        root = name,
        valid = outcome.valid,
        issues = outcome.issues.len(),
        "validation run complete"
    );
    outcome
}

/// Short-lived state for one run.
struct ValidationRun<'a> {
    settings: &'a ValidatorSettings,
    issues: Vec<ValidationIssue>,
    done: bool,
}

impl<'a> ValidationRun<'a> {
    fn new(settings: &'a ValidatorSettings) -> Self {
        Self {
            settings,
            issues: Vec::new(),
            done: false,
        }
    }

    fn finish(self) -> ValidationOutcome {
        ValidationOutcome {
            valid: self.issues.is_empty(),
            issues: self.issues,
        }
    }

    fn check_element(&mut self, path: &str, element: &dyn Element) {
        if self.done {
            return;
        }
        tracing::trace!(path, ty = element.type_name(), "checking element");
        let fields = element.fields();

        // 1. required scalar and composite fields
        for field in &fields {
            if !field.cardinality.is_list()
                && field.cardinality.is_required()
                && !field.is_present()
            {
                self.push(
                    Rule::RequiredField,
                    join(path, field.name),
                    "required field is missing",
                );
            }
        }

        // 2. list cardinality bounds
        for field in &fields {
            if let FieldValue::List(items) = &field.value {
                match field.cardinality {
                    Cardinality::NonEmpty if items.is_empty() => self.push(
                        Rule::ListCardinality,
                        join(path, field.name),
                        "list must contain at least one element",
                    ),
                    Cardinality::Forbidden if !items.is_empty() => self.push(
                        Rule::ListCardinality,
                        join(path, field.name),
                        "list must be empty in this context",
                    ),
                    _ => {}
                }
            }
        }

        // 3. null-equivalent list entries
        for field in &fields {
            if let FieldValue::List(items) = &field.value {
                for (i, item) in items.iter().enumerate() {
                    if item.is_empty() {
                        self.push(
                            Rule::ListElement,
                            format!("{}.{}[{}]", path, field.name, i),
                            "list element is empty",
                        );
                    }
                }
            }
        }

        // 4. choice-variant membership
        for field in &fields {
            if let (Some(variants), FieldValue::Choice(choice)) =
                (field.choice_variants, &field.value)
            {
                if !variants.contains(&choice.type_name()) {
                    self.push(
                        Rule::ChoiceVariant,
                        join(path, field.name),
                        format!(
                            "value of type {} is not one of the declared variants ({})",
                            choice.type_name(),
                            variants.join(", ")
                        ),
                    );
                }
            }
        }

        // 5. reference-target whitelist
        for field in &fields {
            if let (Some(targets), FieldValue::Element(child)) =
                (field.reference_targets, &field.value)
            {
                if let Some(reference) = child.as_any().downcast_ref::<Reference>() {
                    if let Some(kind) = reference.target_kind() {
                        if !targets.contains(&kind) {
                            self.push(
                                Rule::ReferenceTarget,
                                join(path, field.name),
                                format!(
                                    "reference to {} is not allowed here (allowed: {})",
                                    kind,
                                    targets.join(", ")
                                ),
                            );
                        }
                    }
                }
            }
        }

        // 6. value or children
        if element.scalar().is_none()
            && element.extensions().is_empty()
            && !has_present_fields(&fields)
        {
            self.push(
                Rule::ValueOrChildren,
                path.to_string(),
                "element has neither a value nor children",
            );
        }

        // Recursive descent, extensions included, so a deep violation is
        // reported under its full path.
        for (i, ext) in element.extensions().iter().enumerate() {
            self.check_element(&format!("{}.extension[{}]", path, i), ext);
        }
        for field in &fields {
            match &field.value {
                FieldValue::Absent => {}
                FieldValue::Element(child) => {
                    self.check_element(&join(path, field.name), *child)
                }
                FieldValue::Choice(choice) => {
                    self.check_element(&join(path, field.name), choice.as_element())
                }
                FieldValue::List(items) => {
                    for (i, child) in items.iter().enumerate() {
                        self.check_element(
                            &format!("{}.{}[{}]", path, field.name, i),
                            *child,
                        );
                    }
                }
            }
        }
    }

    fn push(&mut self, rule: Rule, path: impl Into<String>, message: impl Into<String>) {
        if self.done {
            return;
        }
        self.issues.push(ValidationIssue::new(rule, path, message));
        if self.settings.fail_fast || self.issues.len() >= self.settings.max_issues {
            self.done = true;
        }
    }
}

fn join(path: &str, name: &str) -> String {
    format!("{}.{}", path, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementCore, Field};
    use crate::primitives::FhirString;

    /// Synthetic element covering every field shape, so the battery can
    /// be exercised without a full resource model.
    #[derive(Debug, Default)]
    struct Fixture {
        core: ElementCore,
        label: Option<FhirString>,
        notes: Vec<FhirString>,
        tags: Vec<FhirString>,
        link: Option<Reference>,
    }

    impl Element for Fixture {
        fn type_name(&self) -> &'static str {
            "Fixture"
        }

        fn core(&self) -> &ElementCore {
            &self.core
        }

        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::required("label", self.label.as_ref()),
                Field::non_empty_list("notes", &self.notes),
                Field::forbidden_list("tags", &self.tags),
                Field::reference("link", self.link.as_ref(), &["Patient"]),
            ]
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    fn settings() -> ValidatorSettings {
        ValidatorSettings::default()
    }

    #[test]
    fn empty_fixture_reports_all_violations_in_one_pass() {
        let outcome = validate_tree("Fixture", &Fixture::default(), &settings());
        assert!(!outcome.valid);
        let rules: Vec<Rule> = outcome.issues.iter().map(|i| i.rule).collect();
        assert_eq!(
            rules,
            vec![Rule::RequiredField, Rule::ListCardinality, Rule::ValueOrChildren]
        );
        assert_eq!(outcome.issues[0].path, "Fixture.label");
        assert_eq!(outcome.issues[1].path, "Fixture.notes");
        assert_eq!(outcome.issues[2].path, "Fixture");
    }

    #[test]
    fn fail_fast_stops_after_the_first_issue() {
        let outcome = validate_tree(
            "Fixture",
            &Fixture::default(),
            &settings().fail_fast(true),
        );
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].rule, Rule::RequiredField);
    }

    #[test]
    fn max_issues_bounds_the_run() {
        let outcome = validate_tree(
            "Fixture",
            &Fixture::default(),
            &settings().max_issues(2),
        );
        assert_eq!(outcome.issues.len(), 2);
    }

    #[test]
    fn forbidden_list_rejects_entries() {
        let fixture = Fixture {
            label: Some(FhirString::new("ok")),
            notes: vec![FhirString::new("note")],
            tags: vec![FhirString::new("nope")],
            ..Fixture::default()
        };
        let outcome = validate_tree("Fixture", &fixture, &settings());
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].rule, Rule::ListCardinality);
        assert_eq!(outcome.issues[0].path, "Fixture.tags");
    }

    #[test]
    fn reference_outside_whitelist_is_rejected() {
        let fixture = Fixture {
            label: Some(FhirString::new("ok")),
            notes: vec![FhirString::new("note")],
            link: Some(Reference::local("Observation", "1").unwrap()),
            ..Fixture::default()
        };
        let outcome = validate_tree("Fixture", &fixture, &settings());
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].rule, Rule::ReferenceTarget);
        assert_eq!(outcome.issues[0].path, "Fixture.link");
    }

    #[test]
    fn empty_list_element_is_reported_with_its_position() {
        let fixture = Fixture {
            label: Some(FhirString::new("ok")),
            notes: vec![FhirString::new("first"), FhirString::default()],
            ..Fixture::default()
        };
        let outcome = validate_tree("Fixture", &fixture, &settings());
        // The empty entry trips both the list rule and, on descent, the
        // value-or-children rule at the same path.
        assert!(outcome
            .issues
            .iter()
            .any(|i| i.rule == Rule::ListElement && i.path == "Fixture.notes[1]"));
        assert!(outcome
            .issues
            .iter()
            .any(|i| i.rule == Rule::ValueOrChildren && i.path == "Fixture.notes[1]"));
    }

    #[test]
    fn disabled_mode_skips_the_battery() {
        let outcome = validate_tree(
            "Fixture",
            &Fixture::default(),
            &settings().mode(ValidationMode::Disabled),
        );
        assert!(outcome.valid);
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn operation_outcome_rendering() {
        let outcome = validate_tree("Fixture", &Fixture::default(), &settings());
        let rendered = outcome.to_operation_outcome();
        assert_eq!(rendered["resourceType"], "OperationOutcome");
        assert_eq!(rendered["issue"][0]["severity"], "error");
        assert_eq!(rendered["issue"][0]["code"], "required-field");
        assert_eq!(rendered["issue"][0]["expression"][0], "Fixture.label");
    }

    #[test]
    fn identical_input_yields_identical_outcome() {
        let first = validate_tree("Fixture", &Fixture::default(), &settings());
        let second = validate_tree("Fixture", &Fixture::default(), &settings());
        assert_eq!(first, second);
    }
}
