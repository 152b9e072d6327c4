//! GraphQL introspection schema model, type-reference resolution and
//! namespaced schema index.
//!
//! This crate turns the response to a GraphQL introspection query into a
//! typed [`Schema`], renders its fields and types as SDL-like text, and
//! indexes every member under a `<namespace>.<name>` key. Fetching the
//! response is up to the caller; [`introspection_request_body`] is the body
//! to POST.
//!
//! # Examples
//!
//! ## One-step response to schema map
//!
//! ```
//! use graphql_schema_map::introspection_to_schema_map;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let body = r#"{"data": {"__schema": {
//!     "queryType": {"name": "Query"},
//!     "types": [{
//!         "kind": "OBJECT",
//!         "name": "Query",
//!         "fields": [{
//!             "name": "hello",
//!             "args": [],
//!             "type": {"kind": "NON_NULL", "name": null,
//!                      "ofType": {"kind": "SCALAR", "name": "String"}}
//!         }]
//!     }],
//!     "directives": []
//! }}}"#;
//!
//! let map = introspection_to_schema_map(body)?;
//! assert_eq!(map["query.hello"], "hello(): String!");
//! # Ok(())
//! # }
//! ```
//!
//! ## Step-by-step usage
//!
//! ```no_run
//! use graphql_schema_map::{parse_introspection_response, render_full_type, schema_members};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let body = String::new();
//! // Parse the body your HTTP client received
//! let response = parse_introspection_response(&body)?;
//! let schema = response.schema();
//!
//! for field in schema.queries() {
//!     println!("{}: {}", field.name, field.type_ref);
//! }
//!
//! for member in schema_members(schema) {
//!     println!("{} => {}", member.key(), member.render());
//! }
//!
//! if let Some(user) = schema.type_by_name("User") {
//!     println!("{}", render_full_type(user));
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod index;
mod printer;
mod query;
mod type_ref;
mod types;

pub use error::{IntrospectionError, Result};
pub use index::{schema_map, schema_members, Namespace, SchemaMember};
pub use printer::{render_field, render_full_type};
pub use query::{
    introspection_request_body, parse_introspection_response, parse_introspection_slice,
    parse_introspection_value, INTROSPECTION_QUERY, OPERATION_NAME,
};
pub use type_ref::{TypeKind, TypeRef};
pub use types::*;

use std::collections::BTreeMap;

/// Parses an introspection response body and builds its schema map.
///
/// This is a convenience function that combines
/// [`parse_introspection_response`] and [`schema_map`] into a single call.
///
/// # Errors
///
/// Returns an error if the body cannot be parsed; see
/// [`parse_introspection_response`].
#[tracing::instrument(skip(body))]
pub fn introspection_to_schema_map(body: &str) -> Result<BTreeMap<String, String>> {
    tracing::debug!("Parsing introspection response");
    let response = parse_introspection_response(body)?;
    let map = schema_map(response.schema());
    tracing::info!(entries = map.len(), "Schema map complete");
    Ok(map)
}
