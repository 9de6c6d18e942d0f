//! API documentation metadata and its OpenAPI 3 rendering.
//!
//! Each operation is described once in [`RATING_OPERATIONS`]. The table is
//! kept apart from the handlers and only consumed by [`openapi_document`],
//! which is served at `GET /api/docs/openapi.json`.

use serde_json::{json, Map, Value};

use ratings_core::rating::{MAX_COMMENT_LEN, MAX_RATING, MIN_RATING};

/// Path parameter of an operation.
#[derive(Debug, Clone, Copy)]
pub struct ParamDoc {
    pub name: &'static str,
    pub description: &'static str,
}

/// Documented response of an operation.
#[derive(Debug, Clone, Copy)]
pub struct ResponseDoc {
    pub status: u16,
    pub description: &'static str,
    /// Name of a schema under `components/schemas`, if the response has a body.
    pub schema: Option<&'static str>,
}

/// Metadata for one HTTP operation.
#[derive(Debug, Clone, Copy)]
pub struct OperationDoc {
    pub method: &'static str,
    pub path: &'static str,
    pub operation_id: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub tag: &'static str,
    pub authenticated: bool,
    pub params: &'static [ParamDoc],
    /// Name of the request body schema under `components/schemas`.
    pub request_body: Option<&'static str>,
    pub responses: &'static [ResponseDoc],
}

const RATING_ID: ParamDoc = ParamDoc {
    name: "id",
    description: "ID of the rating",
};

const fn error(status: u16, description: &'static str) -> ResponseDoc {
    ResponseDoc {
        status,
        description,
        schema: Some("Error"),
    }
}

const UNAUTHORIZED: ResponseDoc = error(401, "Missing or invalid bearer token");
const NOT_FOUND: ResponseDoc = error(404, "Rating not found");
const RATE_LIMITED: ResponseDoc = error(429, "Too many requests");
const INTERNAL: ResponseDoc = error(500, "Internal server error");

/// The rating resource operations, in route order.
pub const RATING_OPERATIONS: &[OperationDoc] = &[
    OperationDoc {
        method: "get",
        path: "/api/ratings",
        operation_id: "ratings.list",
        summary: "Get all ratings",
        description: "Fetches a list of all ratings.",
        tag: "Ratings",
        authenticated: false,
        params: &[],
        request_body: None,
        responses: &[
            ResponseDoc {
                status: 200,
                description: "List of all ratings",
                schema: Some("RatingList"),
            },
            RATE_LIMITED,
            INTERNAL,
        ],
    },
    OperationDoc {
        method: "post",
        path: "/api/ratings",
        operation_id: "ratings.create",
        summary: "Create a new rating",
        description: "Adds a new rating authored by the caller.",
        tag: "Ratings",
        authenticated: true,
        params: &[],
        request_body: Some("CreateRating"),
        responses: &[
            ResponseDoc {
                status: 201,
                description: "Rating created successfully",
                schema: Some("RatingEnvelope"),
            },
            error(400, "Invalid or malformed request body"),
            UNAUTHORIZED,
            RATE_LIMITED,
            INTERNAL,
        ],
    },
    OperationDoc {
        method: "get",
        path: "/api/ratings/{id}",
        operation_id: "ratings.show",
        summary: "Get a specific rating",
        description: "Fetches the details of a specific rating by its ID.",
        tag: "Ratings",
        authenticated: false,
        params: &[RATING_ID],
        request_body: None,
        responses: &[
            ResponseDoc {
                status: 200,
                description: "Details of the rating",
                schema: Some("Rating"),
            },
            NOT_FOUND,
            RATE_LIMITED,
            INTERNAL,
        ],
    },
    OperationDoc {
        method: "put",
        path: "/api/ratings/{id}",
        operation_id: "ratings.update",
        summary: "Update a specific rating",
        description: "Updates the score and comment of a rating. Only the author or an admin may update.",
        tag: "Ratings",
        authenticated: true,
        params: &[RATING_ID],
        request_body: Some("UpdateRating"),
        responses: &[
            ResponseDoc {
                status: 200,
                description: "Rating updated successfully",
                schema: Some("RatingEnvelope"),
            },
            error(400, "Invalid or malformed request body"),
            UNAUTHORIZED,
            error(403, "Caller may not update this rating"),
            NOT_FOUND,
            RATE_LIMITED,
            INTERNAL,
        ],
    },
    OperationDoc {
        method: "delete",
        path: "/api/ratings/{id}",
        operation_id: "ratings.delete",
        summary: "Delete a specific rating",
        description: "Deletes a specific rating by its ID.",
        tag: "Ratings",
        authenticated: true,
        params: &[RATING_ID],
        request_body: None,
        responses: &[
            ResponseDoc {
                status: 200,
                description: "Rating deleted successfully",
                schema: Some("Message"),
            },
            UNAUTHORIZED,
            NOT_FOUND,
            RATE_LIMITED,
            INTERNAL,
        ],
    },
];

/* --------------------------------------------------------------------------
Rendering
-------------------------------------------------------------------------- */

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn render_operation(op: &OperationDoc) -> Value {
    let mut responses = Map::new();
    for response in op.responses {
        let mut entry = json!({ "description": response.description });
        if let Some(schema) = response.schema {
            entry["content"] = json!({ "application/json": { "schema": schema_ref(schema) } });
        }
        responses.insert(response.status.to_string(), entry);
    }

    let parameters: Vec<Value> = op
        .params
        .iter()
        .map(|p| {
            json!({
                "name": p.name,
                "in": "path",
                "required": true,
                "description": p.description,
                "schema": { "type": "integer", "format": "int64" },
            })
        })
        .collect();

    let mut operation = json!({
        "operationId": op.operation_id,
        "summary": op.summary,
        "description": op.description,
        "tags": [op.tag],
        "responses": responses,
    });
    if !parameters.is_empty() {
        operation["parameters"] = Value::Array(parameters);
    }
    if let Some(body) = op.request_body {
        operation["requestBody"] = json!({
            "required": true,
            "content": { "application/json": { "schema": schema_ref(body) } },
        });
    }
    if op.authenticated {
        operation["security"] = json!([{ "bearerAuth": [] }]);
    }
    operation
}

fn component_schemas() -> Value {
    let rating_value = json!({
        "type": "integer",
        "minimum": MIN_RATING,
        "maximum": MAX_RATING,
    });
    let comment = json!({
        "type": "string",
        "nullable": true,
        "maxLength": MAX_COMMENT_LEN,
    });

    json!({
        "Rating": {
            "type": "object",
            "required": ["id", "user_id", "role_id", "rating", "created_at", "updated_at"],
            "properties": {
                "id": { "type": "integer", "format": "int64" },
                "user_id": { "type": "integer", "format": "int64" },
                "role_id": { "type": "integer", "format": "int64" },
                "rating": rating_value,
                "comment": comment,
                "created_at": { "type": "string", "format": "date-time" },
                "updated_at": { "type": "string", "format": "date-time" },
            },
        },
        "RatingList": {
            "type": "array",
            "items": schema_ref("Rating"),
        },
        "RatingEnvelope": {
            "type": "object",
            "required": ["message", "rating"],
            "properties": {
                "message": { "type": "string" },
                "rating": schema_ref("Rating"),
            },
        },
        "CreateRating": {
            "type": "object",
            "required": ["role_id", "rating"],
            "properties": {
                "role_id": { "type": "integer", "format": "int64" },
                "rating": rating_value,
                "comment": comment,
            },
        },
        "UpdateRating": {
            "type": "object",
            "required": ["rating"],
            "properties": {
                "rating": rating_value,
                "comment": comment,
            },
        },
        "Message": {
            "type": "object",
            "required": ["message"],
            "properties": { "message": { "type": "string" } },
        },
        "Error": {
            "type": "object",
            "required": ["error", "code"],
            "properties": {
                "error": { "type": "string" },
                "code": { "type": "string" },
                "fields": {
                    "type": "object",
                    "additionalProperties": { "type": "array", "items": { "type": "string" } },
                },
            },
        },
    })
}

/// Render [`RATING_OPERATIONS`] as an OpenAPI 3.0 document.
pub fn openapi_document() -> Value {
    let mut paths = Map::new();
    for op in RATING_OPERATIONS {
        let item = paths
            .entry(op.path)
            .or_insert_with(|| Value::Object(Map::new()));
        item[op.method] = render_operation(op);
    }

    json!({
        "openapi": "3.0.3",
        "info": {
            "title": "Ratings API",
            "version": env!("CARGO_PKG_VERSION"),
        },
        "tags": [{ "name": "Ratings", "description": "Ratings of roles by users" }],
        "paths": paths,
        "components": {
            "schemas": component_schemas(),
            "securitySchemes": {
                "bearerAuth": { "type": "http", "scheme": "bearer", "bearerFormat": "JWT" },
            },
        },
    })
}
