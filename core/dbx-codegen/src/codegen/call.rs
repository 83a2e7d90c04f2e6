//! Scalar UDF call generation
//!
//! eval 메서드 결정 → 인자 변환 → 호출 → 반환값을 내부 표현으로 변환.
//!
//! Generated code for a boxed result looks like:
//!
//! ```text
//! java.lang.Integer externalResult$0 = (java.lang.Integer) function_f$1.eval(isNull$0 ? null : (s$0.toString()));
//! result$2 = externalResult$0 == null ? null : (externalResult$0);
//! isNull$4 = result$2 == null;
//! result$3 = -1;
//! if (!isNull$4) {
//!   result$3 = result$2.intValue();
//! }
//! ```

use std::sync::Arc;

use tracing::debug;

use super::arguments::ArgumentAdapter;
use super::context::CodegenContext;
use super::converter::{FROM_EPOCH_MILLIS, StandardTypeConverter, TypeConverter};
use super::expr::{GeneratedExpression, concat_code};
use super::function::ScalarFunction;
use super::generate_utils::{generate_input_field_unboxing, generate_non_null_field};
use super::resolver::{MethodResolver, ResolvedSignature, SignatureResolver};
use crate::error::CodegenResult;
use crate::types::{
    DataType, ExternalClass, ExternalValue, LogicalType, boxed_type_term, primitive_type_term,
};

/// Generates code for one kind of call.
pub trait CallGenerator {
    fn generate(
        &self,
        ctx: &mut dyn CodegenContext,
        operands: &[GeneratedExpression],
        return_type: &LogicalType,
    ) -> CodegenResult<GeneratedExpression>;
}

/// Call generator for a user-defined scalar function.
pub struct ScalarFunctionCallGen {
    function: Arc<dyn ScalarFunction>,
    resolver: Arc<dyn MethodResolver>,
    converter: Arc<dyn TypeConverter>,
}

impl ScalarFunctionCallGen {
    /// Uses [`SignatureResolver`] and [`StandardTypeConverter`].
    pub fn new(function: Arc<dyn ScalarFunction>) -> Self {
        Self {
            function,
            resolver: Arc::new(SignatureResolver::new()),
            converter: Arc::new(StandardTypeConverter::new()),
        }
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn MethodResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_converter(mut self, converter: Arc<dyn TypeConverter>) -> Self {
        self.converter = converter;
        self
    }

    pub fn function(&self) -> &Arc<dyn ScalarFunction> {
        &self.function
    }

    /// External form of literal operands, `None` for everything else.
    fn fold_literal_arguments(
        &self,
        operands: &[GeneratedExpression],
    ) -> CodegenResult<Vec<Option<ExternalValue>>> {
        operands
            .iter()
            .map(|operand| {
                if !operand.is_literal() {
                    return Ok(None);
                }
                match operand.literal_value() {
                    Some(value) => self
                        .converter
                        .literal_to_external(value, operand.result_type())
                        .map(Some),
                    None => Ok(Some(ExternalValue::Null)),
                }
            })
            .collect()
    }

    /// Data type the raw return value is converted from.
    ///
    /// The function's own result type wins; otherwise the call's return type
    /// when it accepts `result_class`, else whatever `result_class` maps to.
    fn result_external_type(
        &self,
        arguments: &[Option<ExternalValue>],
        operand_types: &[LogicalType],
        return_type: &LogicalType,
        result_class: &ExternalClass,
    ) -> DataType {
        let supports = |logical_type: &LogicalType| {
            self.converter
                .supports_output_conversion(logical_type, result_class)
        };
        match self.function.result_type(arguments, operand_types) {
            Some(declared) if supports(declared.logical_type()) => {
                declared.bridged_to(result_class.clone())
            }
            Some(declared) => declared,
            None if supports(return_type) => {
                DataType::new(return_type.clone()).bridged_to(result_class.clone())
            }
            None => DataType::from_class(result_class),
        }
    }
}

impl CallGenerator for ScalarFunctionCallGen {
    fn generate(
        &self,
        ctx: &mut dyn CodegenContext,
        operands: &[GeneratedExpression],
        return_type: &LogicalType,
    ) -> CodegenResult<GeneratedExpression> {
        let operand_types: Vec<LogicalType> =
            operands.iter().map(|o| o.result_type().clone()).collect();

        let method = self
            .resolver
            .resolve_eval_method(self.function.as_ref(), &operand_types)?;
        let signature = ResolvedSignature::new(self.function.as_ref(), method, &operand_types);
        let result_class = &signature.result_class;

        let arguments = self.fold_literal_arguments(operands)?;

        let parameters = ArgumentAdapter::new(self.converter.as_ref()).prepare_arguments(
            ctx,
            operands,
            &signature.parameter_classes,
            &signature.parameter_types,
        )?;

        // 결과 변환이 실패해도 함수/로컬 변수가 남지 않도록 등록보다 먼저 수행
        let external_result = if result_class.is_primitive() {
            None
        } else {
            let result_external_type =
                self.result_external_type(&arguments, &operand_types, return_type, result_class);
            let external_hint = ctx.config().external_result_hint.clone();
            let external_term = ctx.new_name(&external_hint);
            let internal =
                self.converter
                    .external_to_internal(ctx, &result_external_type, &external_term)?;
            Some((external_term, internal))
        };

        let function_reference = ctx.add_reusable_function(&self.function);

        let result_type_term = if result_class.is_primitive() {
            primitive_type_term(return_type)
        } else {
            boxed_type_term(return_type)
        };
        let result_hint = ctx.config().result_hint.clone();
        let result_term = ctx.add_reusable_local_variable(&result_type_term, &result_hint);

        let invocation = format!(
            "{}.eval({})",
            function_reference,
            parameters
                .iter()
                .map(|p| p.result_term())
                .collect::<Vec<_>>()
                .join(", ")
        );
        // `long` epoch millis standing in for TIMESTAMP_LTZ
        let eval_result = if return_type.is_timestamp_ltz() && result_class.is_primitive_long() {
            format!("{}({})", FROM_EPOCH_MILLIS, invocation)
        } else {
            invocation
        };

        let set_result = match external_result {
            None => format!("{} = {};", result_term, eval_result),
            Some((external_term, internal)) => format!(
                "{ty} {ext} = ({ty}) {eval};\n{result} = {ext} == null ? null : ({internal});",
                ty = result_class.type_term(),
                ext = external_term,
                eval = eval_result,
                result = result_term,
                internal = internal,
            ),
        };

        let result_unboxing = if result_class.is_primitive() {
            generate_non_null_field(return_type, &result_term)
        } else {
            generate_input_field_unboxing(ctx, return_type, &result_term)
        };

        let code = concat_code(
            parameters
                .iter()
                .map(|p| p.code())
                .chain([set_result.as_str(), result_unboxing.code()]),
        );

        let parameter_terms: Vec<_> = signature
            .parameter_classes
            .iter()
            .map(|c| c.type_term())
            .collect();
        debug!(
            target: "codegen",
            function = %self.function.identifier(),
            parameters = ?parameter_terms,
            result_class = %result_class,
            return_type = %return_type,
            result = %result_unboxing.result_term(),
            "generated scalar function call"
        );

        Ok(result_unboxing.with_code(code))
    }
}
