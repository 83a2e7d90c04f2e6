//! # DBX Codegen: Scalar UDF Call Generation
//!
//! DBX 컬럼형 실행 엔진의 스칼라 UDF 호출 코드 생성기입니다.
//! 엔진 내부 표현으로 계산된 피연산자 식을 받아, UDF의 `eval` 메서드를 호출하고
//! 그 결과를 다시 내부 표현으로 돌려놓는 소스 조각을 만듭니다.
//!
//! ## 주요 특징
//!
//! - **Overload resolution**: 피연산자 타입에 맞는 `eval` 시그니처 선택 (varargs 포함)
//! - **Null-safe arguments**: 객체 파라미터는 `isNull ? null : (...)` 가드
//! - **TIMESTAMP_LTZ ↔ `long`**: epoch millis 특수 처리
//! - **Reusable members**: 함수 인스턴스와 converter 필드는 컨텍스트당 한 번만 등록
//! - **Apache Arrow bridge**: Arrow 스키마에서 논리 타입 도출
//!
//! ## 빠른 시작
//!
//! ```rust
//! use std::sync::Arc;
//! use dbx_codegen::{
//!     CallGenerator, CodeGeneratorContext, EvalMethod, GeneratedExpression, LogicalType,
//!     ScalarFunctionCallGen, ScalarUdf,
//! };
//!
//! # fn main() -> dbx_codegen::CodegenResult<()> {
//! let udf = ScalarUdf::new("str_len", "com.acme.StrLen")
//!     .with_method(EvalMethod::parse(&["java.lang.String"], "int"));
//!
//! let mut ctx = CodeGeneratorContext::default();
//! let operand = GeneratedExpression::new("field$0", "isNull$0", "", LogicalType::string());
//!
//! let call = ScalarFunctionCallGen::new(Arc::new(udf));
//! let result = call.generate(&mut ctx, &[operand], &LogicalType::int().not_null())?;
//!
//! assert_eq!(
//!     result.code(),
//!     "result$1 = function_str_len$0.eval(isNull$0 ? null : (field$0.toString()));"
//! );
//! assert_eq!(result.null_term(), "false");
//! # Ok(())
//! # }
//! ```
//!
//! ## 모듈 구조
//!
//! - [`codegen`]: call generator, argument adapter, context, conversions
//! - [`types`]: logical types, runtime classes, literal values, Arrow bridge
//! - [`config`]: code generation options
//! - [`error`]: [`CodegenError`]
//! - [`logging`]: tracing subscriber setup

pub mod codegen;
pub mod config;
pub mod error;
pub mod types;

// Logging utilities
pub mod logging;

// Re-export commonly used types
pub use codegen::{
    CallGenerator, CodeGeneratorContext, CodegenContext, EvalMethod, GeneratedExpression,
    ScalarFunction, ScalarFunctionCallGen, ScalarUdf, StandardTypeConverter, TypeConverter,
};
pub use config::CodegenConfig;
pub use error::{CodegenError, CodegenResult};
pub use types::{DataType, ExternalClass, LogicalType, ScalarValue};
