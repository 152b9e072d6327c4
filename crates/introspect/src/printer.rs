//! SDL-like rendering of fields and declared types.
//!
//! The output is meant for display and diffing. It approximates SDL but is
//! not guaranteed to re-parse: descriptions, directives and default values
//! are left out.

use crate::type_ref::TypeKind;
use crate::types::{Field, FullType, InputValue};
use std::fmt;

/// Renders a field as a call signature: `name(arg: Type, ...): Type`.
///
/// A field without arguments renders as `name(): Type`.
#[must_use]
pub fn render_field(field: &Field) -> String {
    FieldSignature(field).to_string()
}

/// Renders a declared type as an SDL-like block.
///
/// Built-in scalars render as an empty string. Kinds without a block form
/// (unions) fall back to a `#`-prefixed dump of the raw structure.
#[must_use]
pub fn render_full_type(type_def: &FullType) -> String {
    if !has_block_form(type_def.kind) {
        tracing::warn!(
            kind = ?type_def.kind,
            name = %type_def.name,
            "No SDL rendering for this kind, dumping raw structure"
        );
    }
    TypeBlock(type_def).to_string()
}

fn has_block_form(kind: TypeKind) -> bool {
    matches!(
        kind,
        TypeKind::Object
            | TypeKind::Interface
            | TypeKind::InputObject
            | TypeKind::Enum
            | TypeKind::Scalar
    )
}

struct FieldSignature<'a>(&'a Field);

impl fmt::Display for FieldSignature<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let field = self.0;
        write!(f, "{}(", field.name)?;
        write_args(f, &field.args)?;
        write!(f, "): {}", field.type_ref)
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[InputValue]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}: {}", arg.name, arg.type_ref)?;
    }
    Ok(())
}

struct TypeBlock<'a>(&'a FullType);

impl fmt::Display for TypeBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_def = self.0;
        match type_def.kind {
            TypeKind::Object => writeln!(f, "type {} {{", type_def.name)?,
            TypeKind::Interface => writeln!(f, "interface {} {{", type_def.name)?,
            TypeKind::InputObject => writeln!(f, "input {} {{", type_def.name)?,
            TypeKind::Enum => writeln!(f, "enum {} {{", type_def.name)?,
            TypeKind::Scalar if type_def.is_builtin_scalar() => return Ok(()),
            TypeKind::Scalar => return write!(f, "scalar {}", type_def.name),
            _ => writeln!(f, "#{type_def:?}")?,
        }

        for field in &type_def.input_fields {
            writeln!(f, "\t{}: {}", field.name, field.type_ref)?;
        }
        for field in &type_def.fields {
            writeln!(f, "\t{}: {}", field.name, field.type_ref)?;
        }
        for value in &type_def.enum_values {
            writeln!(f, "\t{}", value.name)?;
        }

        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_ref::TypeRef;
    use crate::types::{EnumValue, BUILTIN_SCALARS};

    fn scalar(name: &str) -> TypeRef {
        TypeRef::named(TypeKind::Scalar, name)
    }

    #[test]
    fn test_render_field_without_args() {
        let field = Field::new("foo", scalar("String"));
        insta::assert_snapshot!(render_field(&field), @"foo(): String");
    }

    #[test]
    fn test_render_field_with_args() {
        let field = Field::new(
            "users",
            TypeRef::non_null(TypeRef::list(TypeRef::named(TypeKind::Object, "User"))),
        )
        .with_arg(InputValue::new("first", scalar("Int")))
        .with_arg(InputValue::new(
            "filter",
            TypeRef::non_null(TypeRef::named(TypeKind::InputObject, "UserFilter")),
        ));

        insta::assert_snapshot!(
            render_field(&field),
            @"users(first: Int, filter: UserFilter!): [User]!"
        );
    }

    #[test]
    fn test_render_object() {
        let type_def = FullType {
            fields: vec![
                Field::new("id", TypeRef::non_null(scalar("ID"))),
                Field::new("tags", TypeRef::list(TypeRef::non_null(scalar("String"))))
                    .with_arg(InputValue::new("limit", scalar("Int"))),
            ],
            ..FullType::new(TypeKind::Object, "Post")
        };

        // Body lines list the field type only, never the arguments.
        assert_eq!(
            render_full_type(&type_def),
            "type Post {\n\tid: ID!\n\ttags: [String!]\n}"
        );
    }

    #[test]
    fn test_render_interface_and_input() {
        let node = FullType {
            fields: vec![Field::new("id", TypeRef::non_null(scalar("ID")))],
            ..FullType::new(TypeKind::Interface, "Node")
        };
        assert_eq!(render_full_type(&node), "interface Node {\n\tid: ID!\n}");

        let filter = FullType {
            input_fields: vec![
                InputValue::new("name", scalar("String")),
                InputValue::new("ids", TypeRef::list(TypeRef::non_null(scalar("ID")))),
            ],
            ..FullType::new(TypeKind::InputObject, "UserFilter")
        };
        assert_eq!(
            render_full_type(&filter),
            "input UserFilter {\n\tname: String\n\tids: [ID!]\n}"
        );
    }

    #[test]
    fn test_render_enum() {
        let color = FullType {
            enum_values: ["RED", "GREEN", "BLUE"].map(EnumValue::new).to_vec(),
            ..FullType::new(TypeKind::Enum, "Color")
        };
        assert_eq!(
            render_full_type(&color),
            "enum Color {\n\tRED\n\tGREEN\n\tBLUE\n}"
        );
    }

    #[test]
    fn test_render_scalars() {
        for name in BUILTIN_SCALARS {
            assert_eq!(render_full_type(&FullType::new(TypeKind::Scalar, *name)), "");
        }
        insta::assert_snapshot!(
            render_full_type(&FullType::new(TypeKind::Scalar, "DateTime")),
            @"scalar DateTime"
        );
    }

    #[test]
    fn test_render_empty_object() {
        assert_eq!(
            render_full_type(&FullType::new(TypeKind::Object, "Empty")),
            "type Empty {\n}"
        );
    }

    #[test]
    fn test_union_falls_back_to_raw_structure() {
        let union = FullType {
            possible_types: vec![
                TypeRef::named(TypeKind::Object, "Cat"),
                TypeRef::named(TypeKind::Object, "Dog"),
            ],
            ..FullType::new(TypeKind::Union, "Pet")
        };

        let rendered = render_full_type(&union);
        assert!(rendered.starts_with("#FullType {"));
        assert!(rendered.contains("Pet"));
        assert!(rendered.contains("Dog"));
        assert!(rendered.ends_with("\n}"));
    }

    #[test]
    fn test_mixed_bodies_are_all_emitted() {
        let odd = FullType {
            input_fields: vec![InputValue::new("a", scalar("Int"))],
            fields: vec![Field::new("b", scalar("Int"))],
            ..FullType::new(TypeKind::Object, "Odd")
        };
        assert_eq!(render_full_type(&odd), "type Odd {\n\ta: Int\n\tb: Int\n}");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let type_def = FullType {
            fields: (0..50)
                .map(|i| Field::new(format!("field{i}"), scalar("Int")))
                .collect(),
            ..FullType::new(TypeKind::Object, "Wide")
        };
        assert_eq!(render_full_type(&type_def), render_full_type(&type_def));
    }

    #[test]
    fn test_truncated_type_renders_partially() {
        let field = Field::new("broken", TypeRef::non_null(TypeRef::Truncated));
        assert_eq!(render_field(&field), "broken(): !");
    }
}
