//! OpenAPI document handler.

use axum::Json;
use serde_json::{json, Map, Value};

const RESULT_STRING_FIELDS: &[(&str, &str)] = &[
    ("requestedUrl", "URL specified by the client, normalized"),
    ("finalUrl", "URL the body was read from, after redirects"),
    ("contentType", "Content-Type of the fetched page"),
    ("lang", "Value of <html lang>"),
    ("title", "Text of <head><title>, trimmed"),
    ("description", "meta[name=description], else og:description"),
    ("canonical", "Absolute href of <link rel=canonical>"),
    ("charset", "meta[charset]"),
    ("themeColor", "meta[name=theme-color]"),
    ("author", "meta[name=author]"),
    ("keywords", "meta[name=keywords]"),
    ("robots", "meta[name=robots]"),
    ("generator", "meta[name=generator]"),
    ("favicon", "Absolute href of the first link[rel=icon]"),
];

const RESULT_MAP_FIELDS: &[(&str, &str)] = &[
    ("og", "og:* properties keyed without the prefix"),
    ("twitter", "twitter:* names keyed without the prefix"),
    ("metaByName", "meta[name] content keyed by lowercased name"),
    ("metaByProperty", "meta[property] content keyed by lowercased property"),
];

fn string_field(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

fn string_map(description: &str) -> Value {
    json!({
        "type": "object",
        "additionalProperties": { "type": "string" },
        "description": description
    })
}

/// Builds the OpenAPI 3.0.0 description of the service.
pub fn openapi_document() -> Value {
    let mut result_properties = Map::new();
    for (name, description) in RESULT_STRING_FIELDS {
        result_properties.insert((*name).to_string(), string_field(description));
    }
    result_properties.insert(
        "status".to_string(),
        json!({ "type": "integer", "description": "HTTP status code of the fetched page" }),
    );
    for (name, item) in [
        ("icons", "Icon"),
        ("alternates", "Alternate"),
        ("metaTags", "MetaTag"),
        ("linkTags", "LinkTag"),
    ] {
        result_properties.insert(
            name.to_string(),
            json!({ "type": "array", "items": { "$ref": format!("#/components/schemas/{item}") } }),
        );
    }
    for (name, description) in RESULT_MAP_FIELDS {
        result_properties.insert((*name).to_string(), string_map(description));
    }

    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Page Meta Proxy API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Fetches a page and returns the metadata in its <head> as JSON."
        },
        "paths": {
            "/meta": {
                "get": {
                    "summary": "Extract page metadata",
                    "parameters": [{
                        "name": "url",
                        "in": "query",
                        "required": true,
                        "description": "Absolute http or https URL to fetch",
                        "schema": { "type": "string", "format": "uri", "maxLength": crate::config::MAX_URL_LENGTH }
                    }],
                    "responses": {
                        "200": {
                            "description": "Extracted metadata, or a non-HTML notice",
                            "content": { "application/json": { "schema": { "oneOf": [
                                { "$ref": "#/components/schemas/MetaExtractionResult" },
                                { "$ref": "#/components/schemas/NonHtmlResponse" }
                            ] } } }
                        },
                        "400": {
                            "description": "Missing, invalid or unsupported url",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
                        },
                        "502": {
                            "description": "The page could not be fetched",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
                        },
                        "508": {
                            "description": "Request was issued by this service",
                            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/ErrorResponse" } } }
                        }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "MetaExtractionResult": {
                    "type": "object",
                    "required": [
                        "requestedUrl", "finalUrl", "status", "icons", "alternates", "og",
                        "twitter", "metaByName", "metaByProperty", "metaTags", "linkTags"
                    ],
                    "properties": result_properties
                },
                "NonHtmlResponse": {
                    "type": "object",
                    "required": ["requestedUrl", "finalUrl", "status", "error"],
                    "properties": {
                        "requestedUrl": { "type": "string" },
                        "finalUrl": { "type": "string" },
                        "status": { "type": "integer" },
                        "contentType": { "type": "string" },
                        "error": { "type": "string", "enum": [crate::extract::NON_HTML_ERROR] }
                    }
                },
                "MetaTag": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "property": { "type": "string" },
                        "httpEquiv": { "type": "string" },
                        "charset": { "type": "string" },
                        "content": { "type": "string" }
                    }
                },
                "LinkTag": {
                    "type": "object",
                    "required": ["rels"],
                    "properties": {
                        "rels": { "type": "array", "items": { "type": "string" } },
                        "href": { "type": "string" },
                        "hreflang": { "type": "string" },
                        "type": { "type": "string" },
                        "sizes": { "type": "string" }
                    }
                },
                "Icon": {
                    "type": "object",
                    "required": ["href", "rel"],
                    "properties": {
                        "href": string_field("Icon URL, resolved to absolute"),
                        "rel": string_field("icon, apple-touch-icon, apple-touch-icon-precomposed or shortcut"),
                        "type": string_field("MIME type"),
                        "sizes": string_field("Sizes, e.g. 32x32")
                    }
                },
                "Alternate": {
                    "type": "object",
                    "required": ["href"],
                    "properties": {
                        "href": string_field("Alternate URL, resolved to absolute"),
                        "hreflang": string_field("Language code"),
                        "type": string_field("MIME type, e.g. application/rss+xml"),
                        "title": string_field("Title, for feeds")
                    }
                },
                "ErrorResponse": {
                    "type": "object",
                    "required": ["error"],
                    "properties": {
                        "success": { "type": "boolean" },
                        "error": { "type": "string" }
                    }
                }
            }
        }
    })
}

pub async fn doc_handler() -> Json<Value> {
    Json(openapi_document())
}
