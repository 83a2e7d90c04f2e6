//! Shared expression builders

use super::context::CodegenContext;
use super::expr::{GeneratedExpression, NEVER_NULL};
use crate::types::{LogicalType, primitive_default_value, primitive_type_term};

/// Non-null expression over an existing term. No code.
pub fn generate_non_null_field(result_type: &LogicalType, term: &str) -> GeneratedExpression {
    GeneratedExpression::new(term, NEVER_NULL, "", result_type.clone())
}

/// Read an externally sourced, possibly-null boxed value into a fresh
/// internal result variable plus null indicator.
pub fn generate_input_field_unboxing(
    ctx: &mut dyn CodegenContext,
    input_type: &LogicalType,
    input_term: &str,
) -> GeneratedExpression {
    let result_type_term = primitive_type_term(input_type);
    let default_value = primitive_default_value(input_type);
    let unboxing_term = match input_type.internal_primitive() {
        Some(primitive) => format!("{}.{}", input_term, primitive.unbox_method()),
        None => input_term.to_string(),
    };

    let result_hint = ctx.config().result_hint.clone();
    let result_term = ctx.add_reusable_local_variable(&result_type_term, &result_hint);

    if !ctx.null_check() {
        let code = format!("{} = {};", result_term, unboxing_term);
        return GeneratedExpression::new(result_term, NEVER_NULL, code, input_type.clone());
    }

    let null_hint = ctx.config().null_hint.clone();
    let null_term = ctx.add_reusable_local_variable("boolean", &null_hint);
    let code = format!(
        "{null} = {input} == null;\n{result} = {default};\nif (!{null}) {{\n  {result} = {unboxing};\n}}",
        null = null_term,
        input = input_term,
        result = result_term,
        default = default_value,
        unboxing = unboxing_term,
    );
    GeneratedExpression::new(result_term, null_term, code, input_type.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::context::CodeGeneratorContext;
    use crate::config::CodegenConfig;

    #[test]
    fn test_non_null_field() {
        let expr = generate_non_null_field(&LogicalType::int(), "result$0");
        assert_eq!(expr.result_term(), "result$0");
        assert_eq!(expr.null_term(), NEVER_NULL);
        assert!(expr.code().is_empty());
    }

    #[test]
    fn test_unboxing_primitive_backed() {
        let mut ctx = CodeGeneratorContext::default();
        let expr = generate_input_field_unboxing(&mut ctx, &LogicalType::int(), "boxed$0");
        assert_eq!(expr.result_term(), "result$0");
        assert_eq!(expr.null_term(), "isNull$1");
        assert_eq!(
            expr.code(),
            "isNull$1 = boxed$0 == null;\nresult$0 = -1;\nif (!isNull$1) {\n  result$0 = boxed$0.intValue();\n}"
        );
        assert_eq!(
            ctx.reusable_local_variable_code(),
            "int result$0;\nboolean isNull$1;"
        );
    }

    #[test]
    fn test_unboxing_object() {
        let mut ctx = CodeGeneratorContext::default();
        let expr = generate_input_field_unboxing(&mut ctx, &LogicalType::string(), "s$0");
        assert!(expr.code().contains("result$0 = null;"));
        assert!(expr.code().contains("result$0 = s$0;"));
    }

    #[test]
    fn test_unboxing_without_null_check() {
        let mut ctx = CodeGeneratorContext::new(CodegenConfig::new().with_null_check(false));
        let expr = generate_input_field_unboxing(&mut ctx, &LogicalType::bigint(), "boxed$0");
        assert_eq!(expr.code(), "result$0 = boxed$0.longValue();");
        assert_eq!(expr.null_term(), NEVER_NULL);
    }
}
