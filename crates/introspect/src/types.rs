//! Type definitions for GraphQL introspection responses.
//!
//! These types mirror the structure of GraphQL introspection query responses
//! and can be deserialized from JSON using serde. Lists the server sends as
//! `null` (e.g. `fields` on a scalar) deserialize as empty.

use crate::type_ref::{TypeKind, TypeRef};
use crate::{IntrospectionError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Built-in GraphQL scalar types; these need no declaration.
pub const BUILTIN_SCALARS: &[&str] = &["Boolean", "Float", "ID", "Int", "String"];

/// Top-level introspection response wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectionResponse {
    pub data: IntrospectionData,
}

impl IntrospectionResponse {
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.data.schema
    }
}

/// Data field of the introspection response containing the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub schema: Schema,
}

/// Complete GraphQL schema information from introspection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(default)]
    pub query_type: Option<RootType>,
    #[serde(default)]
    pub mutation_type: Option<RootType>,
    #[serde(default)]
    pub subscription_type: Option<RootType>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub types: Vec<FullType>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub directives: Vec<Directive>,
}

/// The `{ name }` object naming a root operation type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootType {
    pub name: String,
}

/// One declared type.
///
/// Only the collections relevant to `kind` are populated; the rest are empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullType {
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fields: Vec<Field>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub input_fields: Vec<InputValue>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub interfaces: Vec<TypeRef>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub enum_values: Vec<EnumValue>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub possible_types: Vec<TypeRef>,
}

impl FullType {
    /// A type of `kind` with every collection empty.
    #[must_use]
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            description: None,
            fields: Vec::new(),
            input_fields: Vec::new(),
            interfaces: Vec::new(),
            enum_values: Vec::new(),
            possible_types: Vec::new(),
        }
    }

    /// `true` for the five scalars every GraphQL schema has implicitly.
    #[must_use]
    pub fn is_builtin_scalar(&self) -> bool {
        self.kind == TypeKind::Scalar && BUILTIN_SCALARS.contains(&self.name.as_str())
    }
}

/// A field of an object or interface type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub args: Vec<InputValue>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            args: Vec::new(),
            type_ref,
            is_deprecated: false,
            deprecation_reason: None,
        }
    }

    #[must_use]
    pub fn with_arg(mut self, arg: InputValue) -> Self {
        self.args.push(arg);
        self
    }
}

/// An argument or an input object field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    /// The default value as GraphQL source text, e.g. `"10"` or `"{a: 1}"`.
    #[serde(default)]
    pub default_value: Option<String>,
}

impl InputValue {
    #[must_use]
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            type_ref,
            default_value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    #[serde(default)]
    pub deprecation_reason: Option<String>,
}

impl EnumValue {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_deprecated: false,
            deprecation_reason: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub locations: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub args: Vec<InputValue>,
}

impl Schema {
    /// Finds a declared type by name.
    #[must_use]
    pub fn type_by_name(&self, name: &str) -> Option<&FullType> {
        self.types.iter().find(|type_def| type_def.name == name)
    }

    /// All fields of the query root type. Empty if there is none.
    #[must_use]
    pub fn queries(&self) -> Vec<&Field> {
        self.root_fields(self.query_type.as_ref()).collect()
    }

    /// The query root field called `name`.
    #[must_use]
    pub fn query(&self, name: &str) -> Option<&Field> {
        self.root_fields(self.query_type.as_ref())
            .find(|field| field.name == name)
    }

    /// All fields of the mutation root type. Empty if there is none.
    #[must_use]
    pub fn mutations(&self) -> Vec<&Field> {
        self.root_fields(self.mutation_type.as_ref()).collect()
    }

    #[must_use]
    pub fn mutation(&self, name: &str) -> Option<&Field> {
        self.root_fields(self.mutation_type.as_ref())
            .find(|field| field.name == name)
    }

    /// All fields of the subscription root type. Empty if there is none.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<&Field> {
        self.root_fields(self.subscription_type.as_ref()).collect()
    }

    #[must_use]
    pub fn subscription(&self, name: &str) -> Option<&Field> {
        self.root_fields(self.subscription_type.as_ref())
            .find(|field| field.name == name)
    }

    fn root_fields<'a>(&'a self, root: Option<&'a RootType>) -> impl Iterator<Item = &'a Field> {
        self.types
            .iter()
            .filter(move |type_def| {
                type_def.kind == TypeKind::Object
                    && root.is_some_and(|root| root.name == type_def.name)
            })
            .flat_map(|type_def| type_def.fields.iter())
    }

    /// Checks that the query root, if named, is declared at most once and is an object type.
    pub fn validate(&self) -> Result<()> {
        let Some(root) = &self.query_type else {
            return Ok(());
        };

        let mut declared = self.types.iter().filter(|type_def| type_def.name == root.name);
        if let Some(type_def) = declared.next() {
            if type_def.kind != TypeKind::Object {
                return Err(IntrospectionError::Invalid(format!(
                    "query root type `{}` has kind {:?}, expected OBJECT",
                    root.name, type_def.kind
                )));
            }
        }
        if declared.next().is_some() {
            return Err(IntrospectionError::Invalid(format!(
                "query root type `{}` is declared more than once",
                root.name
            )));
        }

        Ok(())
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
