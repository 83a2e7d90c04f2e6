//! Code generation context
//!
//! 하나의 컴파일 단위(생성되는 클래스) 안에서 재사용 멤버, 지역 변수,
//! 함수 인스턴스 등록을 관리합니다. 단일 스레드에서 사용됩니다.

use std::sync::Arc;

use ahash::AHashMap;
use tracing::trace;

use super::function::ScalarFunction;
use crate::config::CodegenConfig;
use crate::types::{DataType, classes};

/// Registry of reusable artifacts that call generators talk to.
pub trait CodegenContext {
    fn config(&self) -> &CodegenConfig;

    /// Whether generated code tracks nulls.
    fn null_check(&self) -> bool {
        self.config().null_check
    }

    /// Fresh name unique within the compilation unit.
    fn new_name(&mut self, hint: &str) -> String;

    /// Declare a local variable of the generated method and return its name.
    fn add_reusable_local_variable(&mut self, type_term: &str, hint: &str) -> String;

    /// Member field holding the function instance.
    ///
    /// Idempotent per [`ScalarFunction::identifier`].
    fn add_reusable_function(&mut self, function: &Arc<dyn ScalarFunction>) -> String;

    /// Member field holding a converter for a structured data type.
    ///
    /// Idempotent per data type.
    fn add_reusable_converter(&mut self, data_type: &DataType) -> String;
}

/// Default [`CodegenContext`] collecting declarations for the enclosing class.
pub struct CodeGeneratorContext {
    config: CodegenConfig,
    name_counter: u64,
    /// Function instances, indexed by `references[i]` in generated code
    references: Vec<Arc<dyn ScalarFunction>>,
    /// Converted data types, indexed by `converters[i]` in generated code
    converters: Vec<DataType>,
    reusable_functions: AHashMap<String, String>,
    reusable_converters: AHashMap<DataType, String>,
    member_statements: Vec<String>,
    init_statements: Vec<String>,
    open_statements: Vec<String>,
    close_statements: Vec<String>,
    local_variables: Vec<(String, String)>,
}

impl CodeGeneratorContext {
    pub fn new(config: CodegenConfig) -> Self {
        Self {
            config,
            name_counter: 0,
            references: Vec::new(),
            converters: Vec::new(),
            reusable_functions: AHashMap::new(),
            reusable_converters: AHashMap::new(),
            member_statements: Vec::new(),
            init_statements: Vec::new(),
            open_statements: Vec::new(),
            close_statements: Vec::new(),
            local_variables: Vec::new(),
        }
    }

    /// Function instances to pass to the generated class constructor.
    pub fn references(&self) -> &[Arc<dyn ScalarFunction>] {
        &self.references
    }

    /// Data types whose converters the generated class expects.
    pub fn converters(&self) -> &[DataType] {
        &self.converters
    }

    pub fn function_count(&self) -> usize {
        self.references.len()
    }

    /// Member field declarations.
    pub fn reusable_member_code(&self) -> String {
        self.member_statements.join("\n")
    }

    /// Constructor body assigning member fields.
    pub fn reusable_init_code(&self) -> String {
        self.init_statements.join("\n")
    }

    pub fn reusable_open_code(&self) -> String {
        self.open_statements.join("\n")
    }

    pub fn reusable_close_code(&self) -> String {
        self.close_statements.join("\n")
    }

    /// Local variable declarations of the generated method.
    pub fn reusable_local_variable_code(&self) -> String {
        self.local_variables
            .iter()
            .map(|(type_term, name)| format!("{} {};", type_term, name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for CodeGeneratorContext {
    fn default() -> Self {
        Self::new(CodegenConfig::default())
    }
}

impl CodegenContext for CodeGeneratorContext {
    fn config(&self) -> &CodegenConfig {
        &self.config
    }

    fn new_name(&mut self, hint: &str) -> String {
        let name = format!("{}${}", hint, self.name_counter);
        self.name_counter += 1;
        name
    }

    fn add_reusable_local_variable(&mut self, type_term: &str, hint: &str) -> String {
        let name = self.new_name(hint);
        self.local_variables
            .push((type_term.to_string(), name.clone()));
        name
    }

    fn add_reusable_function(&mut self, function: &Arc<dyn ScalarFunction>) -> String {
        if let Some(field) = self.reusable_functions.get(function.identifier()) {
            return field.clone();
        }

        let hint = format!(
            "{}{}",
            self.config.function_field_prefix,
            sanitize(function.identifier())
        );
        let field = self.new_name(&hint);
        let class_name = function.class_name();
        let index = self.references.len();

        self.member_statements
            .push(format!("private transient {} {};", class_name, field));
        self.init_statements.push(format!(
            "{} = (({}) references[{}]);",
            field, class_name, index
        ));
        self.open_statements
            .push(format!("{}.open(functionContext);", field));
        self.close_statements.push(format!("{}.close();", field));

        self.references.push(Arc::clone(function));
        self.reusable_functions
            .insert(function.identifier().to_string(), field.clone());

        trace!(target: "codegen", function = %function.identifier(), field = %field, "registered function instance");
        field
    }

    fn add_reusable_converter(&mut self, data_type: &DataType) -> String {
        if let Some(field) = self.reusable_converters.get(data_type) {
            return field.clone();
        }

        let hint = self.config.converter_field_prefix.clone();
        let field = self.new_name(&hint);
        let index = self.converters.len();

        self.member_statements.push(format!(
            "private transient {} {};",
            classes::DATA_STRUCTURE_CONVERTER,
            field
        ));
        self.init_statements.push(format!(
            "{} = (({}) converters[{}]);",
            field,
            classes::DATA_STRUCTURE_CONVERTER,
            index
        ));
        self.open_statements
            .push(format!("{}.open(classLoader);", field));

        self.converters.push(data_type.clone());
        self.reusable_converters
            .insert(data_type.clone(), field.clone());

        trace!(target: "codegen", data_type = %data_type, field = %field, "registered converter");
        field
    }
}

/// Identifier-safe form of a function identifier.
fn sanitize(identifier: &str) -> String {
    identifier
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
