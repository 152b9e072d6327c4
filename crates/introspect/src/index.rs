//! Namespaced index of every member a schema exposes.
//!
//! Root operation fields are listed individually (`query.user`,
//! `mutation.login`); every other declared type gets one entry keyed by its
//! kind (`scalar.DateTime`, `enum.Color`, `type.User`, ...).

use crate::printer::{render_field, render_full_type};
use crate::type_ref::TypeKind;
use crate::types::{Field, FullType, RootType, Schema};
use std::collections::BTreeMap;
use std::fmt;

/// The namespace a schema member is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    Query,
    Mutation,
    Subscription,
    Scalar,
    Enum,
    Interface,
    Input,
    Type,
}

impl Namespace {
    pub const ALL: [Self; 8] = [
        Self::Query,
        Self::Mutation,
        Self::Subscription,
        Self::Scalar,
        Self::Enum,
        Self::Interface,
        Self::Input,
        Self::Type,
    ];

    /// The key prefix, without the trailing dot.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
            Self::Scalar => "scalar",
            Self::Enum => "enum",
            Self::Interface => "interface",
            Self::Input => "input",
            Self::Type => "type",
        }
    }

    /// Namespace for a declared type that is not a root operation type.
    #[must_use]
    pub const fn for_kind(kind: TypeKind) -> Self {
        match kind {
            TypeKind::Scalar => Self::Scalar,
            TypeKind::Enum => Self::Enum,
            TypeKind::Interface => Self::Interface,
            TypeKind::InputObject => Self::Input,
            _ => Self::Type,
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified schema member, borrowing from the [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaMember<'a> {
    Query(&'a Field),
    Mutation(&'a Field),
    Subscription(&'a Field),
    Scalar(&'a FullType),
    Enum(&'a FullType),
    Interface(&'a FullType),
    Input(&'a FullType),
    /// Objects, unions and anything else.
    Type(&'a FullType),
}

impl<'a> SchemaMember<'a> {
    fn from_type(type_def: &'a FullType) -> Self {
        match Namespace::for_kind(type_def.kind) {
            Namespace::Scalar => Self::Scalar(type_def),
            Namespace::Enum => Self::Enum(type_def),
            Namespace::Interface => Self::Interface(type_def),
            Namespace::Input => Self::Input(type_def),
            _ => Self::Type(type_def),
        }
    }

    #[must_use]
    pub const fn namespace(&self) -> Namespace {
        match self {
            Self::Query(_) => Namespace::Query,
            Self::Mutation(_) => Namespace::Mutation,
            Self::Subscription(_) => Namespace::Subscription,
            Self::Scalar(_) => Namespace::Scalar,
            Self::Enum(_) => Namespace::Enum,
            Self::Interface(_) => Namespace::Interface,
            Self::Input(_) => Namespace::Input,
            Self::Type(_) => Namespace::Type,
        }
    }

    /// The field name for root members, the type name otherwise.
    #[must_use]
    pub fn name(&self) -> &'a str {
        match self {
            Self::Query(field) | Self::Mutation(field) | Self::Subscription(field) => {
                field.name.as_str()
            }
            Self::Scalar(type_def)
            | Self::Enum(type_def)
            | Self::Interface(type_def)
            | Self::Input(type_def)
            | Self::Type(type_def) => type_def.name.as_str(),
        }
    }

    /// `<namespace>.<name>`, e.g. `query.user`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}.{}", self.namespace(), self.name())
    }

    /// The field signature for root members, the type block otherwise.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Query(field) | Self::Mutation(field) | Self::Subscription(field) => {
                render_field(field)
            }
            Self::Scalar(type_def)
            | Self::Enum(type_def)
            | Self::Interface(type_def)
            | Self::Input(type_def)
            | Self::Type(type_def) => render_full_type(type_def),
        }
    }
}

/// Classifies every member of `schema`, in declaration order.
///
/// A type named like a root operation type contributes one member per field;
/// root matching is by name and checked before the kind, so root types never
/// show up under `type.`.
#[must_use]
pub fn schema_members(schema: &Schema) -> Vec<SchemaMember<'_>> {
    let mut members = Vec::new();

    for type_def in &schema.types {
        let is_root =
            |root: Option<&RootType>| root.is_some_and(|root| root.name == type_def.name);

        if is_root(schema.query_type.as_ref()) {
            members.extend(type_def.fields.iter().map(SchemaMember::Query));
        } else if is_root(schema.mutation_type.as_ref()) {
            members.extend(type_def.fields.iter().map(SchemaMember::Mutation));
        } else if is_root(schema.subscription_type.as_ref()) {
            members.extend(type_def.fields.iter().map(SchemaMember::Subscription));
        } else {
            members.push(SchemaMember::from_type(type_def));
        }
    }

    members
}

/// Builds the `<namespace>.<name>` → rendered text map for `schema`.
///
/// # Examples
///
/// ```
/// # use graphql_schema_map::{schema_map, EnumValue, FullType, Schema, TypeKind};
/// let schema = Schema {
///     types: vec![FullType {
///         enum_values: vec![EnumValue::new("RED"), EnumValue::new("BLUE")],
///         ..FullType::new(TypeKind::Enum, "Color")
///     }],
///     ..Schema::default()
/// };
///
/// let map = schema_map(&schema);
/// assert_eq!(map["enum.Color"], "enum Color {\n\tRED\n\tBLUE\n}");
/// ```
#[must_use]
#[tracing::instrument(skip(schema), fields(types = schema.types.len()))]
pub fn schema_map(schema: &Schema) -> BTreeMap<String, String> {
    let map: BTreeMap<String, String> = schema_members(schema)
        .iter()
        .map(|member| (member.key(), member.render()))
        .collect();
    tracing::debug!(entries = map.len(), "Schema map built");
    map
}
