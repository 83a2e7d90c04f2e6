//! Scalar UDF call code generation
//!
//! 스칼라 UDF 호출 한 건을 생성된 소스 조각으로 바꿉니다.
//!
//! ```text
//! operands ─▶ MethodResolver ─▶ ArgumentAdapter ─▶ eval(...) ─▶ result conversion ─▶ GeneratedExpression
//!                                     │                              │
//!                                     └──────── TypeConverter ───────┘
//! ```
//!
//! Reusable members (function instances, structured-type converters) and
//! local variables are registered on the [`CodegenContext`].

pub mod arguments;
pub mod call;
pub mod context;
pub mod converter;
pub mod expr;
pub mod function;
pub mod generate_utils;
pub mod resolver;

pub use arguments::{ArgumentAdapter, prepare_function_args};
pub use call::{CallGenerator, ScalarFunctionCallGen};
pub use context::{CodeGeneratorContext, CodegenContext};
pub use converter::{StandardTypeConverter, TypeConverter};
pub use expr::{ALWAYS_NULL, GeneratedExpression, NEVER_NULL, concat_code};
pub use function::{EvalMethod, ScalarFunction, ScalarUdf};
pub use generate_utils::{generate_input_field_unboxing, generate_non_null_field};
pub use resolver::{MethodResolver, ResolvedMethod, ResolvedSignature, SignatureResolver};
