//! Code generation settings
//!
//! JSON 파일, 환경 변수(`DBX_CODEGEN_*`)에서 로드할 수 있습니다.

use crate::error::{CodegenError, CodegenResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "DBX_CODEGEN_";

/// Settings shared by every call generated within one context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Emit null checks. When off, every value is assumed non-null.
    pub null_check: bool,
    /// Name hint of the variable holding a call result
    pub result_hint: String,
    /// Name hint of the variable capturing the raw UDF return value
    pub external_result_hint: String,
    /// Name hint of null indicator variables
    pub null_hint: String,
    /// Prefix of the member field holding a function instance
    pub function_field_prefix: String,
    /// Prefix of the member field holding a structured type converter
    pub converter_field_prefix: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            null_check: true,
            result_hint: "result".to_string(),
            external_result_hint: "externalResult".to_string(),
            null_hint: "isNull".to_string(),
            function_field_prefix: "function_".to_string(),
            converter_field_prefix: "converter".to_string(),
        }
    }
}

impl CodegenConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_null_check(mut self, null_check: bool) -> Self {
        self.null_check = null_check;
        self
    }

    /// JSON 문자열에서 로드 (누락된 필드는 기본값)
    pub fn from_json(json: &str) -> CodegenResult<Self> {
        let config: CodegenConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 파일에서 로드
    pub fn from_file(path: impl AsRef<Path>) -> CodegenResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// 파일에 저장
    pub fn save(&self, path: impl AsRef<Path>) -> CodegenResult<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        // 디렉토리 생성
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        Ok(())
    }

    /// 환경 변수에서 로드
    pub fn load_from_env(self) -> CodegenResult<Self> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply `DBX_CODEGEN_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(mut self, lookup: F) -> CodegenResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(value) = var("NULL_CHECK") {
            self.null_check = parse_bool(&value).ok_or_else(|| {
                CodegenError::Config(format!("{}NULL_CHECK: invalid bool '{}'", ENV_PREFIX, value))
            })?;
        }
        if let Some(value) = var("RESULT_HINT") {
            self.result_hint = value;
        }
        if let Some(value) = var("EXTERNAL_RESULT_HINT") {
            self.external_result_hint = value;
        }
        if let Some(value) = var("NULL_HINT") {
            self.null_hint = value;
        }
        if let Some(value) = var("FUNCTION_FIELD_PREFIX") {
            self.function_field_prefix = value;
        }
        if let Some(value) = var("CONVERTER_FIELD_PREFIX") {
            self.converter_field_prefix = value;
        }

        self.validate()?;
        Ok(self)
    }

    /// Name hints must be usable as identifiers.
    pub fn validate(&self) -> CodegenResult<()> {
        let hints = [
            ("result_hint", &self.result_hint),
            ("external_result_hint", &self.external_result_hint),
            ("null_hint", &self.null_hint),
            ("function_field_prefix", &self.function_field_prefix),
            ("converter_field_prefix", &self.converter_field_prefix),
        ];
        for (name, value) in hints {
            if !is_identifier(value) {
                return Err(CodegenError::Config(format!(
                    "{} '{}' is not a valid identifier",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CodegenConfig::default();
        assert!(config.null_check);
        assert_eq!(config.result_hint, "result");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_partial() {
        let config = CodegenConfig::from_json(r#"{ "null_check": false }"#).unwrap();
        assert!(!config.null_check);
        assert_eq!(config.external_result_hint, "externalResult");
    }

    #[test]
    fn test_from_json_invalid_hint() {
        let result = CodegenConfig::from_json(r#"{ "result_hint": "1abc" }"#);
        assert!(matches!(result, Err(CodegenError::Config(_))));
    }

    #[test]
    fn test_persistence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/codegen.json");

        let config = CodegenConfig::new().with_null_check(false);
        config.save(&path).unwrap();

        let loaded = CodegenConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("DBX_CODEGEN_NULL_CHECK", "0"),
            ("DBX_CODEGEN_RESULT_HINT", "callResult"),
        ]
        .into_iter()
        .collect();

        let config = CodegenConfig::new()
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert!(!config.null_check);
        assert_eq!(config.result_hint, "callResult");
        assert_eq!(config.null_hint, "isNull");
    }

    #[test]
    fn test_overrides_invalid_bool() {
        let result = CodegenConfig::new().apply_overrides(|key| {
            (key == "DBX_CODEGEN_NULL_CHECK").then(|| "maybe".to_string())
        });
        assert!(matches!(result, Err(CodegenError::Config(_))));
    }

    #[test]
    fn test_load_from_env() {
        // 환경 변수 설정 (unsafe)
        unsafe {
            env::set_var("DBX_CODEGEN_EXTERNAL_RESULT_HINT", "udfResult");
        }

        let config = CodegenConfig::new().load_from_env().unwrap();
        assert_eq!(config.external_result_hint, "udfResult");

        // 정리 (unsafe)
        unsafe {
            env::remove_var("DBX_CODEGEN_EXTERNAL_RESULT_HINT");
        }
    }
}
