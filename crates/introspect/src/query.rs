//! The introspection query and parsing of the server's response.
//!
//! Sending the request is left to the caller: POST
//! [`introspection_request_body`] to the endpoint with any HTTP client and
//! hand the body to [`parse_introspection_response`].

use crate::{IntrospectionData, IntrospectionError, IntrospectionResponse, Result, Schema};
use serde::Deserialize;

/// Operation name of [`INTROSPECTION_QUERY`].
pub const OPERATION_NAME: &str = "IntrospectionQuery";

/// Standard GraphQL introspection query.
///
/// This query fetches the complete schema information including:
/// - Query, mutation, and subscription root types
/// - All type definitions with their fields and arguments
/// - Directive definitions
/// - Deprecation information
///
/// The `TypeRef` fragment nests `ofType` eight levels deep, which covers
/// wrappers like `[[[String!]!]!]!`. [`crate::TypeRef`] itself accepts any
/// depth the server sends.
pub const INTROSPECTION_QUERY: &str = r"
query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      ...FullType
    }
    directives {
      name
      description
      locations
      args {
        ...InputValue
      }
    }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args {
      ...InputValue
    }
    type {
      ...TypeRef
    }
    isDeprecated
    deprecationReason
  }
  inputFields {
    ...InputValue
  }
  interfaces {
    ...TypeRef
  }
  enumValues(includeDeprecated: true) {
    name
    description
    isDeprecated
    deprecationReason
  }
  possibleTypes {
    ...TypeRef
  }
}

fragment InputValue on __InputValue {
  name
  description
  type {
    ...TypeRef
  }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
                ofType {
                  kind
                  name
                }
              }
            }
          }
        }
      }
    }
  }
}
";

/// JSON body to POST to a GraphQL endpoint to run the introspection query.
#[must_use]
pub fn introspection_request_body() -> serde_json::Value {
    serde_json::json!({
        "operationName": OPERATION_NAME,
        "query": INTROSPECTION_QUERY,
    })
}

/// Parses a raw introspection response body.
///
/// # Errors
///
/// - [`IntrospectionError::Parse`] if the body is not JSON or does not have
///   the introspection shape; the error names the offending JSON path
/// - [`IntrospectionError::Graphql`] if the server answered with `errors`
///   and no `data`
/// - [`IntrospectionError::Invalid`] if `__schema` is missing or its query
///   root type is malformed
///
/// # Examples
///
/// ```
/// # use graphql_schema_map::parse_introspection_response;
/// let body = r#"{"data": {"__schema": {
///     "queryType": {"name": "Query"},
///     "types": [{"kind": "OBJECT", "name": "Query", "fields": []}],
///     "directives": []
/// }}}"#;
/// let response = parse_introspection_response(body).unwrap();
/// assert_eq!(response.schema().types.len(), 1);
/// ```
#[tracing::instrument(skip(body), fields(size = body.len()))]
pub fn parse_introspection_response(body: &str) -> Result<IntrospectionResponse> {
    read_body(serde_json::Deserializer::from_str(body))
}

/// Like [`parse_introspection_response`], for a body that is still bytes.
#[tracing::instrument(skip(body), fields(size = body.len()))]
pub fn parse_introspection_slice(body: &[u8]) -> Result<IntrospectionResponse> {
    read_body(serde_json::Deserializer::from_slice(body))
}

/// Like [`parse_introspection_response`], for an already decoded JSON value.
#[tracing::instrument(skip(value))]
pub fn parse_introspection_value(value: serde_json::Value) -> Result<IntrospectionResponse> {
    read_envelope(serde_stacker::Deserializer::new(value))?.into_response()
}

/// Type references nest one JSON object per wrapper, so the parser runs
/// without serde_json's recursion limit and grows the stack on demand.
fn read_body<'de, R>(
    mut deserializer: serde_json::Deserializer<R>,
) -> Result<IntrospectionResponse>
where
    R: serde_json::de::Read<'de>,
{
    deserializer.disable_recursion_limit();
    let envelope = read_envelope(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end().map_err(trailing_input)?;
    envelope.into_response()
}

fn read_envelope<'de, D>(deserializer: D) -> Result<Envelope>
where
    D: serde::Deserializer<'de, Error = serde_json::Error>,
{
    serde_path_to_error::deserialize(deserializer).map_err(|e| {
        tracing::error!(path = %e.path(), error = %e.inner(), "Failed to parse introspection response");
        IntrospectionError::parse(&e)
    })
}

fn trailing_input(err: serde_json::Error) -> IntrospectionError {
    IntrospectionError::Parse {
        path: ".".to_string(),
        message: err.to_string(),
    }
}

/// A GraphQL response as sent over the wire, before validation.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<EnvelopeData>,
    #[serde(default)]
    errors: Option<Vec<GraphqlError>>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    #[serde(rename = "__schema", default)]
    schema: Option<Schema>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

impl Envelope {
    fn into_response(self) -> Result<IntrospectionResponse> {
        let errors = self.errors.unwrap_or_default();

        let Some(data) = self.data else {
            if errors.is_empty() {
                return Err(IntrospectionError::Invalid(
                    "response has neither `data` nor `errors`".to_string(),
                ));
            }
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(IntrospectionError::Graphql(messages.join("; ")));
        };

        let schema = data.schema.ok_or_else(|| {
            IntrospectionError::Invalid("`data.__schema` is missing".to_string())
        })?;

        if !errors.is_empty() {
            tracing::warn!(
                errors = errors.len(),
                "Introspection response carried errors alongside data"
            );
        }

        schema.validate()?;

        tracing::debug!(
            types = schema.types.len(),
            directives = schema.directives.len(),
            "Introspection response parsed"
        );

        Ok(IntrospectionResponse {
            data: IntrospectionData { schema },
        })
    }
}
