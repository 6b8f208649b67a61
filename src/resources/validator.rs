use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use tracing::debug;

use crate::resources::store::StoreError;

/// 매니페스트 검증 오류 타입
#[derive(Debug)]
pub enum ManifestError {
    ParseError(String),
    SchemaError { path: String, message: String },
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ManifestError::ParseError(message) =>
                write!(f, "JSON 파싱 오류: {}", message),
            ManifestError::SchemaError { path, message } =>
                write!(f, "{} (위치: {})", message, path),
        }
    }
}

/// 매니페스트 JSON을 역직렬화 전에 검증하는 구조체입니다.
///
/// 스키마는 kind가 알려진 값인지, metadata가 갖춰졌는지, 네임스페이스가 필요한
/// 종류에 네임스페이스가 있는지 정도의 구조만 검사합니다. 의미 검증(정규식
/// 컴파일 등)은 리컨실러의 몫입니다.
pub struct ManifestValidator {
    schema: JSONSchema,
}

impl ManifestValidator {
    pub fn new() -> Result<Self, StoreError> {
        // 내장 JSON 스키마 정의
        let schema_str = r#"{
            "$schema": "http://json-schema.org/draft-07/schema#",
            "type": "object",
            "required": ["kind", "metadata"],
            "properties": {
                "kind": {
                    "type": "string",
                    "enum": ["GatewayClass", "Gateway", "HTTPRoute", "Service"]
                },
                "metadata": {
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": {"type": "string", "minLength": 1},
                        "namespace": {"type": "string", "minLength": 1},
                        "generation": {"type": "integer", "minimum": 0}
                    }
                },
                "spec": {"type": "object"}
            },
            "allOf": [
                {
                    "if": {"properties": {"kind": {"const": "GatewayClass"}}},
                    "then": {
                        "required": ["spec"],
                        "properties": {
                            "spec": {"required": ["controllerName"]}
                        }
                    }
                },
                {
                    "if": {"properties": {"kind": {"const": "Gateway"}}},
                    "then": {
                        "required": ["spec"],
                        "properties": {
                            "metadata": {"required": ["name", "namespace"]},
                            "spec": {"required": ["gatewayClassName"]}
                        }
                    }
                },
                {
                    "if": {"properties": {"kind": {"const": "HTTPRoute"}}},
                    "then": {
                        "properties": {
                            "metadata": {"required": ["name", "namespace"]},
                            "spec": {
                                "properties": {
                                    "rules": {
                                        "type": "array",
                                        "items": {
                                            "type": "object",
                                            "properties": {
                                                "matches": {"type": "array"},
                                                "backendRefs": {
                                                    "type": "array",
                                                    "items": {
                                                        "type": "object",
                                                        "required": ["name"]
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                {
                    "if": {"properties": {"kind": {"const": "Service"}}},
                    "then": {
                        "properties": {
                            "metadata": {"required": ["name", "namespace"]}
                        }
                    }
                }
            ]
        }"#;

        // 스키마 컴파일
        let schema_value: Value = serde_json::from_str(schema_str)
            .map_err(|e| StoreError::Invalid {
                reason: format!("스키마 파싱 오류: {}", e),
            })?;

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_value)
            .map_err(|e| StoreError::Invalid {
                reason: format!("스키마 컴파일 오류: {}", e),
            })?;

        debug!("매니페스트 스키마 컴파일 성공");
        Ok(Self { schema })
    }

    /// 매니페스트 문자열 유효성 검사.
    ///
    /// 파일 하나에 객체 하나 또는 객체 배열을 담을 수 있으며, 검증을 통과한
    /// 문서 목록을 반환합니다.
    pub fn validate(&self, json_str: &str) -> Result<Vec<Value>, Vec<ManifestError>> {
        // JSON 파싱
        let value = match serde_json::from_str::<Value>(json_str) {
            Ok(v) => v,
            Err(e) => {
                return Err(vec![ManifestError::ParseError(e.to_string())]);
            }
        };

        let documents = match value {
            Value::Array(items) => items,
            other => vec![other],
        };

        let mut validation_errors = Vec::new();
        for (index, document) in documents.iter().enumerate() {
            if let Err(errors) = self.schema.validate(document) {
                validation_errors.extend(errors.map(|error| {
                    ManifestError::SchemaError {
                        path: format!("[{}]{}", index, error.instance_path),
                        message: error.to_string(),
                    }
                }));
            }
        }

        if !validation_errors.is_empty() {
            return Err(validation_errors);
        }

        Ok(documents)
    }
}
