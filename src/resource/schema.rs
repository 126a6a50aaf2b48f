//! Declarative resource schemas
//!
//! A schema lists the attributes a resource accepts, their types, defaults
//! and constraints. [`ResourceSchema::prepare`] fills in defaults and checks
//! every constraint so that bad input is rejected before any remote call.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ResourceError;

/// Attribute type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "of", rename_all = "snake_case")]
pub enum FieldType {
    String,
    Bool,
    Int,
    /// Ordered list of elements
    List(Box<FieldType>),
    /// Nested block with its own attributes
    Block(Vec<FieldSchema>),
}

/// Value constraint checked during [`ResourceSchema::prepare`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Validator {
    /// String must not be empty
    NotEmpty,
    /// Integer must be at least this value
    IntAtLeast(i64),
    /// String must be one of the listed values
    StringInSlice {
        values: &'static [&'static str],
        ignore_case: bool,
    },
}

impl Validator {
    fn check(&self, value: &Value, path: &str) -> Result<(), ResourceError> {
        match self {
            Validator::NotEmpty => match value.as_str() {
                Some("") => Err(ResourceError::validation(path, "must not be empty")),
                _ => Ok(()),
            },
            Validator::IntAtLeast(min) => match value.as_i64() {
                Some(n) if n < *min => Err(ResourceError::validation(
                    path,
                    format!("expected to be at least ({}), got {}", min, n),
                )),
                _ => Ok(()),
            },
            Validator::StringInSlice {
                values,
                ignore_case,
            } => {
                let Some(s) = value.as_str() else {
                    return Ok(());
                };
                let found = values.iter().any(|allowed| {
                    if *ignore_case {
                        allowed.eq_ignore_ascii_case(s)
                    } else {
                        *allowed == s
                    }
                });
                if found {
                    Ok(())
                } else {
                    Err(ResourceError::validation(
                        path,
                        format!("expected to be one of {:?}, got {}", values, s),
                    ))
                }
            }
        }
    }
}

/// One attribute of a resource schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSchema {
    pub name: &'static str,
    #[serde(flatten)]
    pub field_type: FieldType,
    pub required: bool,
    /// Set by the provider, never by configuration
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub computed: bool,
    /// Changing this attribute replaces the resource
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub force_new: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub validators: Vec<Validator>,
}

impl FieldSchema {
    fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            required: false,
            computed: false,
            force_new: false,
            default: None,
            min_items: None,
            validators: Vec::new(),
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldType::String)
    }

    pub fn bool(name: &'static str) -> Self {
        Self::new(name, FieldType::Bool)
    }

    pub fn int(name: &'static str) -> Self {
        Self::new(name, FieldType::Int)
    }

    pub fn list(name: &'static str, element: FieldType) -> Self {
        Self::new(name, FieldType::List(Box::new(element)))
    }

    pub fn block(name: &'static str, fields: Vec<FieldSchema>) -> Self {
        Self::new(name, FieldType::Block(fields))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn computed(mut self) -> Self {
        self.computed = true;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn min_items(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    pub fn validate(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    /// Nested attributes of a block, or of a list of blocks
    pub fn nested_fields_mut(&mut self) -> Option<&mut Vec<FieldSchema>> {
        match &mut self.field_type {
            FieldType::Block(fields) => Some(fields),
            FieldType::List(element) => match element.as_mut() {
                FieldType::Block(fields) => Some(fields),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Schema of a resource or data source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
}

impl ResourceSchema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldSchema> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    /// Fill in defaults and validate all attributes in place.
    pub fn prepare(&self, data: &mut super::ResourceData) -> Result<(), ResourceError> {
        prepare_block(&self.fields, data.attributes_mut(), "")
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn prepare_block(
    fields: &[FieldSchema],
    attributes: &mut Map<String, Value>,
    prefix: &str,
) -> Result<(), ResourceError> {
    if let Some(unknown) = attributes
        .keys()
        .find(|key| !fields.iter().any(|f| f.name == key.as_str()))
    {
        return Err(ResourceError::validation(
            join(prefix, unknown),
            "unsupported attribute",
        ));
    }

    for field in fields {
        if field.computed {
            continue;
        }
        let path = join(prefix, field.name);
        match attributes.get_mut(field.name).filter(|v| !v.is_null()) {
            Some(value) => prepare_value(field, &field.field_type, value, &path)?,
            None => {
                if let Some(default) = &field.default {
                    attributes.insert(field.name.to_string(), default.clone());
                } else if field.required {
                    return Err(ResourceError::validation(
                        path,
                        "required attribute is not set",
                    ));
                } else {
                    attributes.remove(field.name);
                }
            }
        }
    }
    Ok(())
}

fn prepare_value(
    field: &FieldSchema,
    field_type: &FieldType,
    value: &mut Value,
    path: &str,
) -> Result<(), ResourceError> {
    match field_type {
        FieldType::String if !value.is_string() => {
            Err(ResourceError::validation(path, "expected a string"))
        }
        FieldType::Bool if !value.is_boolean() => {
            Err(ResourceError::validation(path, "expected a boolean"))
        }
        FieldType::Int if !value.is_i64() => {
            Err(ResourceError::validation(path, "expected an integer"))
        }
        FieldType::String | FieldType::Bool | FieldType::Int => {
            for validator in &field.validators {
                validator.check(value, path)?;
            }
            Ok(())
        }
        FieldType::List(element) => {
            let Some(items) = value.as_array_mut() else {
                return Err(ResourceError::validation(path, "expected a list"));
            };
            if let Some(min) = field.min_items.filter(|min| items.len() < *min) {
                return Err(ResourceError::validation(
                    path,
                    format!("at least {} item(s) required, got {}", min, items.len()),
                ));
            }
            for (index, item) in items.iter_mut().enumerate() {
                prepare_value(field, element, item, &join(path, &index.to_string()))?;
            }
            Ok(())
        }
        FieldType::Block(fields) => match value.as_object_mut() {
            Some(attributes) => prepare_block(fields, attributes, path),
            None => Err(ResourceError::validation(path, "expected a block")),
        },
    }
}
