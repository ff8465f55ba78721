//! Form schema: the static catalogue of form types and their fields

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Built-in schema, embedded at build time
const BUILTIN_SCHEMA: &str = include_str!("../../assets/schema.json");

/// Label shown in the form-type selector for "no form type chosen"
pub const PLACEHOLDER_LABEL: &str = "Select";

/// Errors raised while loading a schema
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Invalid schema JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate form type: {0}")]
    DuplicateFormType(String),

    #[error("Duplicate field {field} in form type {form_type}")]
    DuplicateField { form_type: String, field: String },

    #[error("Dropdown field {field} in form type {form_type} has no options")]
    EmptyOptions { form_type: String, field: String },
}

/// Input kind of a field. Dropdown options travel with the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Number,
    File,
    Dropdown { options: Vec<String> },
    Date,
    Password,
}

impl FieldKind {
    pub fn is_file(&self) -> bool {
        matches!(self, FieldKind::File)
    }

    /// Whether typed characters go straight into the value
    pub fn is_typed(&self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::Number | FieldKind::Date | FieldKind::Password
        )
    }

    /// Character filter applied by the keyboard handler.
    /// The engine itself stores whatever it is given.
    pub fn accepts_char(&self, c: char) -> bool {
        match self {
            FieldKind::Number => c.is_ascii_digit() || c == '.' || c == '-',
            FieldKind::Date => c.is_ascii_digit() || c == '-',
            FieldKind::Text | FieldKind::Password | FieldKind::File => !c.is_control(),
            FieldKind::Dropdown { .. } => false,
        }
    }

    /// Short hint shown next to empty inputs
    pub fn placeholder(&self) -> &'static str {
        match self {
            FieldKind::Text | FieldKind::Password => "",
            FieldKind::Number => "0",
            FieldKind::Date => "YYYY-MM-DD",
            FieldKind::File => "path/to/file",
            FieldKind::Dropdown { .. } => "←/→ to choose",
        }
    }
}

/// One named, typed input slot within a form type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub label: String,
    #[serde(default)]
    pub required: bool,
}

impl FieldDefinition {
    /// Label with the required marker
    pub fn display_label(&self) -> String {
        if self.required {
            format!("{} *", self.label)
        } else {
            self.label.clone()
        }
    }

    /// Dropdown options, empty for other kinds
    pub fn options(&self) -> &[String] {
        match &self.kind {
            FieldKind::Dropdown { options } => options,
            _ => &[],
        }
    }
}

/// A named form type with its ordered fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormType {
    pub key: String,
    pub fields: Vec<FieldDefinition>,
}

impl FormType {
    pub fn display_name(&self) -> String {
        display_name(&self.key)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Ordered mapping from form-type key to field definitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    types: Vec<FormType>,
}

impl FormSchema {
    /// Load the schema compiled into the binary
    pub fn builtin() -> Result<Self, SchemaError> {
        Self::from_json(BUILTIN_SCHEMA)
    }

    /// Parse and check a schema document
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let types: Vec<FormType> = serde_json::from_str(json)?;
        Self::new(types)
    }

    pub fn new(types: Vec<FormType>) -> Result<Self, SchemaError> {
        let mut keys = HashSet::new();
        for form_type in &types {
            if !keys.insert(form_type.key.as_str()) {
                return Err(SchemaError::DuplicateFormType(form_type.key.clone()));
            }

            let mut names = HashSet::new();
            for field in &form_type.fields {
                if !names.insert(field.name.as_str()) {
                    return Err(SchemaError::DuplicateField {
                        form_type: form_type.key.clone(),
                        field: field.name.clone(),
                    });
                }
                if matches!(&field.kind, FieldKind::Dropdown { options } if options.is_empty()) {
                    return Err(SchemaError::EmptyOptions {
                        form_type: form_type.key.clone(),
                        field: field.name.clone(),
                    });
                }
            }
        }

        Ok(Self { types })
    }

    pub fn types(&self) -> &[FormType] {
        &self.types
    }

    pub fn get(&self, key: &str) -> Option<&FormType> {
        self.types.iter().find(|t| t.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Field list for a form type; the placeholder (`None`) has no fields
    pub fn fields(&self, key: Option<&str>) -> &[FieldDefinition] {
        key.and_then(|k| self.get(k))
            .map(|t| t.fields.as_slice())
            .unwrap_or(&[])
    }

    pub fn first_key(&self) -> Option<&str> {
        self.types.first().map(|t| t.key.as_str())
    }

    /// Next selector position, cycling through the placeholder
    pub fn cycle(&self, current: Option<&str>, forward: bool) -> Option<String> {
        let mut slots: Vec<Option<&str>> = vec![None];
        slots.extend(self.types.iter().map(|t| Some(t.key.as_str())));
        cycle_slots(&slots, current, forward).map(str::to_string)
    }

    /// Next data type, cycling only through real form types
    pub fn cycle_data_type(&self, current: Option<&str>, forward: bool) -> Option<String> {
        let slots: Vec<Option<&str>> = self.types.iter().map(|t| Some(t.key.as_str())).collect();
        if slots.is_empty() {
            return None;
        }
        cycle_slots(&slots, current, forward).map(str::to_string)
    }
}

fn cycle_slots<'a>(
    slots: &[Option<&'a str>],
    current: Option<&str>,
    forward: bool,
) -> Option<&'a str> {
    let len = slots.len();
    let position = slots.iter().position(|s| *s == current);
    let next = match (position, forward) {
        (Some(i), true) => (i + 1) % len,
        (Some(0), false) => len - 1,
        (Some(i), false) => i - 1,
        (None, _) => 0,
    };
    slots[next]
}

/// Human-readable name for a form-type key: `userInfo` -> `User Info`
pub fn display_name(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}

/// Display name for an optional key, falling back to the placeholder label
pub fn display_name_or_placeholder(key: Option<&str>) -> String {
    key.map(display_name)
        .unwrap_or_else(|| PLACEHOLDER_LABEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    mod builtin {
        use super::*;

        #[test]
        fn test_builtin_parses() {
            let schema = FormSchema::builtin().unwrap();
            let keys: Vec<_> = schema.types().iter().map(|t| t.key.as_str()).collect();
            assert_eq!(keys, vec!["userInfo", "addressInfo", "paymentInfo"]);
        }

        #[test]
        fn test_user_info_fields_in_order() {
            let schema = FormSchema::builtin().unwrap();
            let fields = schema.fields(Some("userInfo"));
            let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, vec!["firstName", "lastName", "age", "aadhar"]);
            assert_eq!(fields[2].kind, FieldKind::Number);
            assert!(fields[3].kind.is_file());
            assert!(fields[0].required);
            assert!(!fields[3].required);
        }

        #[test]
        fn test_dropdown_options_carried_by_variant() {
            let schema = FormSchema::builtin().unwrap();
            let state = schema.get("addressInfo").unwrap().field("state").unwrap();
            assert_eq!(state.options(), ["California", "Texas", "New York"]);
        }

        #[test]
        fn test_payment_kinds() {
            let schema = FormSchema::builtin().unwrap();
            let payment = schema.get("paymentInfo").unwrap();
            assert_eq!(payment.field("expiryDate").unwrap().kind, FieldKind::Date);
            assert_eq!(payment.field("cvv").unwrap().kind, FieldKind::Password);
            assert!(payment.field("Reciept").unwrap().kind.is_file());
        }

        #[test]
        fn test_placeholder_has_no_fields() {
            let schema = FormSchema::builtin().unwrap();
            assert!(schema.fields(None).is_empty());
            assert!(schema.fields(Some("unknown")).is_empty());
        }
    }

    mod validation {
        use super::*;

        #[test]
        fn test_rejects_duplicate_form_type() {
            let json = r#"[{"key": "a", "fields": []}, {"key": "a", "fields": []}]"#;
            let err = FormSchema::from_json(json).unwrap_err();
            assert!(matches!(err, SchemaError::DuplicateFormType(k) if k == "a"));
        }

        #[test]
        fn test_rejects_duplicate_field() {
            let json = r#"[{"key": "a", "fields": [
                {"name": "x", "type": "text", "label": "X"},
                {"name": "x", "type": "number", "label": "X2"}
            ]}]"#;
            let err = FormSchema::from_json(json).unwrap_err();
            assert!(matches!(err, SchemaError::DuplicateField { .. }));
        }

        #[test]
        fn test_rejects_empty_dropdown() {
            let json = r#"[{"key": "a", "fields": [
                {"name": "x", "type": "dropdown", "label": "X", "options": []}
            ]}]"#;
            let err = FormSchema::from_json(json).unwrap_err();
            assert!(matches!(err, SchemaError::EmptyOptions { .. }));
        }

        #[test]
        fn test_required_defaults_to_false() {
            let json = r#"[{"key": "a", "fields": [{"name": "x", "type": "text", "label": "X"}]}]"#;
            let schema = FormSchema::from_json(json).unwrap();
            assert!(!schema.fields(Some("a"))[0].required);
        }

        #[test]
        fn test_unknown_kind_is_parse_error() {
            let json = r#"[{"key": "a", "fields": [{"name": "x", "type": "color", "label": "X"}]}]"#;
            assert!(matches!(
                FormSchema::from_json(json),
                Err(SchemaError::Parse(_))
            ));
        }
    }

    mod cycling {
        use super::*;

        #[test]
        fn test_cycle_passes_through_placeholder() {
            let schema = FormSchema::builtin().unwrap();
            assert_eq!(schema.cycle(None, true), Some("userInfo".to_string()));
            assert_eq!(schema.cycle(Some("paymentInfo"), true), None);
            assert_eq!(schema.cycle(None, false), Some("paymentInfo".to_string()));
            assert_eq!(
                schema.cycle(Some("addressInfo"), false),
                Some("userInfo".to_string())
            );
        }

        #[test]
        fn test_cycle_data_type_skips_placeholder() {
            let schema = FormSchema::builtin().unwrap();
            assert_eq!(
                schema.cycle_data_type(Some("paymentInfo"), true),
                Some("userInfo".to_string())
            );
            assert_eq!(
                schema.cycle_data_type(None, true),
                Some("userInfo".to_string())
            );
        }
    }

    #[test]
    fn test_display_name_splits_camel_case() {
        assert_eq!(display_name("userInfo"), "User Info");
        assert_eq!(display_name("paymentInfo"), "Payment Info");
        assert_eq!(display_name("x"), "X");
        assert_eq!(display_name_or_placeholder(None), "Select");
    }

    #[test]
    fn test_display_label_marks_required() {
        let schema = FormSchema::builtin().unwrap();
        let fields = schema.fields(Some("userInfo"));
        assert_eq!(fields[0].display_label(), "First Name *");
        assert_eq!(fields[2].display_label(), "Age");
    }

    #[test]
    fn test_accepts_char_filters_by_kind() {
        assert!(FieldKind::Number.accepts_char('7'));
        assert!(!FieldKind::Number.accepts_char('a'));
        assert!(FieldKind::Date.accepts_char('-'));
        assert!(!FieldKind::Date.accepts_char('/'));
        assert!(FieldKind::Text.accepts_char('a'));
        assert!(!FieldKind::Dropdown { options: vec![] }.accepts_char('a'));
    }
}
