//! Argument adaptation
//!
//! 이미 생성된 피연산자 식을 eval 메서드가 기대하는 외부 인자 식으로 바꿉니다.

use tracing::trace;

use super::context::CodegenContext;
use super::converter::{MILLISECOND_ACCESSOR, TypeConverter};
use super::expr::GeneratedExpression;
use crate::error::{CodegenError, CodegenResult};
use crate::types::{DataType, ExternalClass, LogicalType};

/// Turns operand expressions into call-site arguments of a resolved method.
pub struct ArgumentAdapter<'a> {
    converter: &'a dyn TypeConverter,
}

impl<'a> ArgumentAdapter<'a> {
    pub fn new(converter: &'a dyn TypeConverter) -> Self {
        Self { converter }
    }

    /// One argument per operand, same order.
    ///
    /// `parameter_classes` and `parameter_types` must already be aligned 1:1
    /// with `operands` (variadic parameters expanded).
    pub fn prepare_arguments(
        &self,
        ctx: &mut dyn CodegenContext,
        operands: &[GeneratedExpression],
        parameter_classes: &[ExternalClass],
        parameter_types: &[DataType],
    ) -> CodegenResult<Vec<GeneratedExpression>> {
        for len in [parameter_classes.len(), parameter_types.len()] {
            if len != operands.len() {
                return Err(CodegenError::ArityMismatch {
                    expected: len,
                    actual: operands.len(),
                });
            }
        }

        operands
            .iter()
            .zip(parameter_classes)
            .zip(parameter_types)
            .map(|((operand, class), declared)| {
                self.prepare_argument(ctx, operand, class, declared)
            })
            .collect()
    }

    fn prepare_argument(
        &self,
        ctx: &mut dyn CodegenContext,
        operand: &GeneratedExpression,
        class: &ExternalClass,
        declared: &DataType,
    ) -> CodegenResult<GeneratedExpression> {
        // TIMESTAMP_LTZ handed to a `long` parameter as epoch millis
        let operand = if operand.result_type().is_timestamp_ltz() && class.is_primitive_long() {
            operand.with_result_term(format!(
                "{}.{}",
                operand.result_term(),
                MILLISECOND_ACCESSOR
            ))
        } else {
            operand.clone()
        };

        if class.is_primitive() {
            return Ok(operand);
        }

        let target = self.conversion_target(declared, operand.result_type());
        let external = self
            .converter
            .internal_to_external(ctx, &target, operand.result_term())?;
        let argument = if ctx.null_check() {
            format!("{} ? null : ({})", operand.null_term(), external)
        } else {
            external
        };

        trace!(target: "codegen", target_type = %target, argument = %argument, "prepared argument");
        Ok(operand.with_result_term(argument))
    }

    /// Declared type, unless it is generic: then the operand's own type,
    /// bridged to the declared class when that class is supported.
    fn conversion_target(&self, declared: &DataType, operand_type: &LogicalType) -> DataType {
        if !declared.is_generic() {
            return declared.clone();
        }
        let actual = DataType::new(operand_type.clone());
        let class = declared.conversion_class();
        if self.converter.supports_output_conversion(operand_type, class) {
            actual.bridged_to(class.clone())
        } else {
            actual
        }
    }
}

/// Free-function form of [`ArgumentAdapter::prepare_arguments`].
pub fn prepare_function_args(
    ctx: &mut dyn CodegenContext,
    converter: &dyn TypeConverter,
    operands: &[GeneratedExpression],
    parameter_classes: &[ExternalClass],
    parameter_types: &[DataType],
) -> CodegenResult<Vec<GeneratedExpression>> {
    ArgumentAdapter::new(converter).prepare_arguments(
        ctx,
        operands,
        parameter_classes,
        parameter_types,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::context::CodeGeneratorContext;
    use crate::codegen::converter::StandardTypeConverter;
    use crate::config::CodegenConfig;
    use crate::types::PrimitiveKind;

    fn operand(term: &str, null_term: &str, logical_type: LogicalType) -> GeneratedExpression {
        GeneratedExpression::new(term, null_term, format!("// load {}", term), logical_type)
    }

    fn prepare(
        ctx: &mut CodeGeneratorContext,
        operands: &[GeneratedExpression],
        classes: &[ExternalClass],
    ) -> CodegenResult<Vec<GeneratedExpression>> {
        let types: Vec<DataType> = classes.iter().map(DataType::from_class).collect();
        prepare_function_args(ctx, &StandardTypeConverter, operands, classes, &types)
    }

    #[test]
    fn test_primitive_parameter_passes_through() {
        let mut ctx = CodeGeneratorContext::default();
        let op = operand("field$0", "false", LogicalType::int().not_null());
        let args = prepare(
            &mut ctx,
            std::slice::from_ref(&op),
            &[ExternalClass::Primitive(PrimitiveKind::Int)],
        )
        .unwrap();
        assert_eq!(args, vec![op]);
    }

    #[test]
    fn test_ltz_to_long_uses_millisecond_accessor() {
        let mut ctx = CodeGeneratorContext::default();
        let op = operand("ts$0", "isNull$0", LogicalType::timestamp_ltz(3).not_null());
        let args = prepare(
            &mut ctx,
            std::slice::from_ref(&op),
            &[ExternalClass::Primitive(PrimitiveKind::Long)],
        )
        .unwrap();
        assert_eq!(args[0].result_term(), "ts$0.getMillisecond()");
        assert_eq!(args[0].code(), op.code());
        assert_eq!(args[0].null_term(), op.null_term());
    }

    #[test]
    fn test_object_parameter_is_null_guarded() {
        let mut ctx = CodeGeneratorContext::default();
        let op = operand("str$0", "isNull$0", LogicalType::string());
        let args = prepare(
            &mut ctx,
            std::slice::from_ref(&op),
            &[ExternalClass::object("java.lang.String")],
        )
        .unwrap();
        assert_eq!(args[0].result_term(), "isNull$0 ? null : (str$0.toString())");
        assert_eq!(args[0].code(), op.code());
        assert_eq!(args[0].null_term(), "isNull$0");
    }

    #[test]
    fn test_null_check_disabled_omits_guard() {
        let mut ctx = CodeGeneratorContext::new(CodegenConfig::new().with_null_check(false));
        let op = operand("str$0", "isNull$0", LogicalType::string());
        let args = prepare(
            &mut ctx,
            std::slice::from_ref(&op),
            &[ExternalClass::object("java.lang.String")],
        )
        .unwrap();
        assert_eq!(args[0].result_term(), "str$0.toString()");
    }

    #[test]
    fn test_generic_parameter_uses_operand_type() {
        let mut ctx = CodeGeneratorContext::default();
        let op = operand("arr$0", "isNull$0", LogicalType::array(LogicalType::int()));

        // declared `java.util.List` is RAW, but ARRAY<INT> can be handed out as a List
        let list = ExternalClass::object("java.util.List");
        let args = prepare(&mut ctx, std::slice::from_ref(&op), &[list]).unwrap();
        assert_eq!(
            args[0].result_term(),
            "isNull$0 ? null : (((java.util.List) converter$0.toExternal(arr$0)))"
        );
        assert_eq!(
            ctx.converters()[0].conversion_class().type_term(),
            "java.util.List"
        );
    }

    #[test]
    fn test_generic_parameter_falls_back_to_default_class() {
        let mut ctx = CodeGeneratorContext::default();
        let op = operand("arr$0", "isNull$0", LogicalType::array(LogicalType::int()));
        let point = ExternalClass::object("com.acme.Point");
        let args = prepare(&mut ctx, std::slice::from_ref(&op), &[point]).unwrap();
        assert_eq!(
            args[0].result_term(),
            "isNull$0 ? null : (((java.lang.Integer[]) converter$0.toExternal(arr$0)))"
        );
    }

    #[test]
    fn test_misaligned_parameters() {
        let mut ctx = CodeGeneratorContext::default();
        let op = operand("a", "false", LogicalType::int());
        let result = prepare(&mut ctx, &[op.clone(), op], &[ExternalClass::object("x")]);
        assert!(matches!(
            result,
            Err(CodegenError::ArityMismatch {
                expected: 1,
                actual: 2
            })
        ));
    }
}
