//! Type references as used by fields, arguments and input fields.
//!
//! On the wire a type reference is a chain of `{ kind, name, ofType }`
//! objects. In memory it is a recursive [`TypeRef`] with no depth limit, so
//! types like `[[[String!]!]!]!` survive intact.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The `__TypeKind` of an introspected type or type-reference layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
    /// A kind string this crate does not know about.
    #[serde(other)]
    Unknown,
}

/// A possibly-wrapped reference to a named type.
///
/// Deserializes from (and serializes back to) the introspection wire shape.
/// A chain that runs out before reaching a named layer ends in
/// [`TypeRef::Truncated`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireTypeRef", into = "WireTypeRef")]
pub enum TypeRef {
    /// The terminal layer: a scalar, object, interface, union, enum or input object.
    Named { kind: TypeKind, name: String },
    /// `[T]`
    List(Box<TypeRef>),
    /// `T!`
    NonNull(Box<TypeRef>),
    /// No kind, no name and nothing inside.
    Truncated,
}

impl TypeRef {
    #[must_use]
    pub fn named(kind: TypeKind, name: impl Into<String>) -> Self {
        Self::Named {
            kind,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::List(Box::new(inner))
    }

    #[must_use]
    pub fn non_null(inner: Self) -> Self {
        Self::NonNull(Box::new(inner))
    }

    /// Converts the type reference to a GraphQL type string.
    ///
    /// - `String` for a nullable scalar
    /// - `String!` for a non-null scalar
    /// - `[String]` for a list
    /// - `[String!]!` for a non-null list of non-null strings
    ///
    /// Malformed chains yield partial output (`"!"`, `"[]"`) or an empty
    /// string; they never fail.
    ///
    /// # Examples
    ///
    /// ```
    /// # use graphql_schema_map::{TypeKind, TypeRef};
    /// let type_ref = TypeRef::non_null(TypeRef::list(TypeRef::non_null(TypeRef::named(
    ///     TypeKind::Scalar,
    ///     "String",
    /// ))));
    /// assert_eq!(type_ref.to_type_string(), "[String!]!");
    /// ```
    #[must_use]
    pub fn to_type_string(&self) -> String {
        self.to_string()
    }

    /// The layer directly inside a wrapper, `None` for terminal layers.
    #[must_use]
    pub fn inner(&self) -> Option<&Self> {
        match self {
            Self::List(inner) | Self::NonNull(inner) => Some(inner),
            Self::Named { .. } | Self::Truncated => None,
        }
    }

    /// Detaches the layer inside a wrapper, leaving [`TypeRef::Truncated`].
    fn take_inner(&mut self) -> Option<Self> {
        match self {
            Self::List(inner) | Self::NonNull(inner) => {
                Some(std::mem::replace(&mut **inner, Self::Truncated))
            }
            Self::Named { .. } | Self::Truncated => None,
        }
    }

    /// Iterates the chain from the outermost layer inwards.
    pub fn layers(&self) -> impl Iterator<Item = &Self> {
        std::iter::successors(Some(self), |layer| layer.inner())
    }

    /// Returns `true` if a `LIST` layer occurs anywhere in the chain.
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.layers().any(|layer| matches!(layer, Self::List(_)))
    }

    /// Returns `true` if the outermost layer is `NON_NULL`.
    #[must_use]
    pub fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull(_))
    }

    /// Number of `LIST`/`NON_NULL` layers around the terminal layer.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers().filter(|layer| layer.inner().is_some()).count()
    }

    /// The name of the terminal named type, if the chain reaches one.
    #[must_use]
    pub fn named_type(&self) -> Option<&str> {
        match self.layers().last() {
            Some(Self::Named { name, .. }) => Some(name),
            _ => None,
        }
    }
}

// Chains can be arbitrarily deep, so formatting and dropping walk the layers
// in a loop instead of recursing.
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layers: Vec<&Self> = self.layers().collect();

        for layer in &layers {
            match layer {
                Self::Named { name, .. } => f.write_str(name)?,
                Self::List(_) => f.write_str("[")?,
                Self::NonNull(_) | Self::Truncated => {}
            }
        }
        for layer in layers.iter().rev() {
            match layer {
                Self::List(_) => f.write_str("]")?,
                Self::NonNull(_) => f.write_str("!")?,
                Self::Named { .. } | Self::Truncated => {}
            }
        }
        Ok(())
    }
}

impl Drop for TypeRef {
    fn drop(&mut self) {
        let mut next = self.take_inner();
        while let Some(mut layer) = next {
            next = layer.take_inner();
        }
    }
}

/// The `{ kind, name, ofType }` object as it appears in JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireTypeRef {
    #[serde(default)]
    kind: Option<TypeKind>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    of_type: Option<Box<WireTypeRef>>,
}

impl From<WireTypeRef> for TypeRef {
    fn from(wire: WireTypeRef) -> Self {
        let mut wrappers = Vec::new();
        let mut terminal = Self::Truncated;
        let mut layer = Some(wire);

        while let Some(WireTypeRef {
            kind,
            name,
            of_type,
        }) = layer
        {
            layer = of_type.map(|of_type| *of_type);
            match (kind, name) {
                (Some(kind @ (TypeKind::List | TypeKind::NonNull)), _) => wrappers.push(kind),
                (Some(kind), Some(name)) if kind != TypeKind::Unknown => {
                    terminal = Self::Named { kind, name };
                    break;
                }
                // A layer without usable kind information defers to whatever it wraps.
                _ => {}
            }
        }

        wrappers
            .into_iter()
            .rev()
            .fold(terminal, |inner, kind| match kind {
                TypeKind::List => Self::list(inner),
                _ => Self::non_null(inner),
            })
    }
}

impl From<TypeRef> for WireTypeRef {
    fn from(type_ref: TypeRef) -> Self {
        let wrap = |kind: TypeKind, of_type: Option<Self>| Self {
            kind: Some(kind),
            name: None,
            of_type: of_type.map(Box::new),
        };
        let layers: Vec<&TypeRef> = type_ref.layers().collect();

        layers
            .into_iter()
            .rev()
            .fold(None, |of_type, layer| match layer {
                TypeRef::Named { kind, name } => Some(Self {
                    kind: Some(*kind),
                    name: Some(name.clone()),
                    of_type: None,
                }),
                TypeRef::List(_) => Some(wrap(TypeKind::List, of_type)),
                TypeRef::NonNull(_) => Some(wrap(TypeKind::NonNull, of_type)),
                TypeRef::Truncated => None,
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn string() -> TypeRef {
        TypeRef::named(TypeKind::Scalar, "String")
    }

    #[test]
    fn test_type_ref_to_string() {
        assert_eq!(string().to_type_string(), "String");
        assert_eq!(TypeRef::non_null(string()).to_type_string(), "String!");
        assert_eq!(TypeRef::list(string()).to_type_string(), "[String]");
        assert_eq!(
            TypeRef::non_null(TypeRef::list(TypeRef::non_null(string()))).to_type_string(),
            "[String!]!"
        );
    }

    #[test]
    fn test_named_kinds_resolve_to_name() {
        for kind in [
            TypeKind::Scalar,
            TypeKind::Object,
            TypeKind::Interface,
            TypeKind::Union,
            TypeKind::Enum,
            TypeKind::InputObject,
        ] {
            assert_eq!(TypeRef::named(kind, "Thing").to_string(), "Thing");
        }
    }

    #[test]
    fn test_deep_nesting_has_no_ceiling() {
        let mut type_ref = string();
        for _ in 0..32 {
            type_ref = TypeRef::non_null(TypeRef::list(type_ref));
        }

        let expected = format!("{}String{}", "[".repeat(32), "]!".repeat(32));
        assert_eq!(type_ref.to_type_string(), expected);
        assert_eq!(type_ref.depth(), 64);
        assert_eq!(type_ref.named_type(), Some("String"));
    }

    #[test]
    fn test_very_deep_chain_formats_and_drops() {
        let mut type_ref = string();
        for _ in 0..100_000 {
            type_ref = TypeRef::list(type_ref);
        }

        let rendered = type_ref.to_type_string();
        assert_eq!(rendered.len(), "String".len() + 200_000);
        assert!(rendered.starts_with("[[[String]"));
        assert_eq!(type_ref.depth(), 100_000);
        drop(type_ref);
    }

    #[test]
    fn test_is_list() {
        assert!(!string().is_list());
        assert!(!TypeRef::non_null(string()).is_list());
        assert!(TypeRef::list(string()).is_list());
        assert!(TypeRef::non_null(TypeRef::list(TypeRef::non_null(string()))).is_list());
        assert!(TypeRef::non_null(TypeRef::non_null(TypeRef::list(string()))).is_list());
    }

    #[test]
    fn test_truncated_chains_degrade() {
        assert_eq!(TypeRef::Truncated.to_type_string(), "");
        assert_eq!(TypeRef::non_null(TypeRef::Truncated).to_type_string(), "!");
        assert_eq!(TypeRef::list(TypeRef::Truncated).to_type_string(), "[]");
        assert_eq!(TypeRef::list(TypeRef::Truncated).named_type(), None);
    }

    #[test]
    fn test_deserialize_wire_chain() {
        let type_ref: TypeRef = serde_json::from_value(json!({
            "kind": "NON_NULL",
            "name": null,
            "ofType": {
                "kind": "LIST",
                "name": null,
                "ofType": {
                    "kind": "NON_NULL",
                    "name": null,
                    "ofType": { "kind": "SCALAR", "name": "String", "ofType": null }
                }
            }
        }))
        .unwrap();

        assert_eq!(
            type_ref,
            TypeRef::non_null(TypeRef::list(TypeRef::non_null(string())))
        );
        assert_eq!(type_ref.to_string(), "[String!]!");
    }

    #[test]
    fn test_deserialize_wrapper_without_inner() {
        let type_ref: TypeRef =
            serde_json::from_value(json!({ "kind": "NON_NULL", "name": null })).unwrap();
        assert_eq!(type_ref, TypeRef::non_null(TypeRef::Truncated));
        assert_eq!(type_ref.to_string(), "!");

        let type_ref: TypeRef = serde_json::from_value(json!({})).unwrap();
        assert_eq!(type_ref, TypeRef::Truncated);
        assert_eq!(type_ref.to_string(), "");
    }

    #[test]
    fn test_layer_without_kind_defers_to_inner() {
        let type_ref: TypeRef = serde_json::from_value(json!({
            "kind": "SOMETHING_NEW",
            "name": "Ignored",
            "ofType": { "kind": "ENUM", "name": "Color" }
        }))
        .unwrap();
        assert_eq!(type_ref, TypeRef::named(TypeKind::Enum, "Color"));
    }

    #[test]
    fn test_serialize_back_to_wire_shape() {
        let value =
            serde_json::to_value(TypeRef::list(TypeRef::named(TypeKind::Object, "User"))).unwrap();
        assert_eq!(
            value,
            json!({
                "kind": "LIST",
                "name": null,
                "ofType": { "kind": "OBJECT", "name": "User" }
            })
        );
    }
}
