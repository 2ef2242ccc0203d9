use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "api": {
                "type": "object",
                "properties": {
                    "base_url": { "type": "string", "format": "uri" },
                    "user_agent": { "type": "string" },
                    "timeout_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "credentials": {
                "type": "object",
                "properties": {
                    "api_key_id": { "type": "string" },
                    "api_key_secret": { "type": "string" },
                    "profile": { "type": "string" }
                }
            },
            "polling": {
                "type": "object",
                "properties": {
                    "interval_secs": { "type": "integer", "minimum": 0 },
                    "max_attempts": { "type": "integer", "minimum": 1 },
                    "on_timeout": { "type": "string", "enum": ["abort", "skip"] }
                }
            },
            "request": {
                "type": "object",
                "properties": {
                    "scan_types": {
                        "type": "array",
                        "minItems": 1,
                        "items": { "type": "string" }
                    },
                    "policy_sandbox": { "type": "string" },
                    "status": { "type": "string", "enum": ["open", "closed"] }
                }
            },
            "output": {
                "type": "object",
                "properties": {
                    "directory": { "type": "string" }
                }
            }
        }
    })
});
