//! Semantic analysis: scoped symbol resolution, type inference, and
//! assignability checking.
//!
//! The analyzer walks the AST once (after a hoisting pre-pass over top-level
//! declarations), inferring a [`TypeAnnotation`] for every expression. Every
//! check reports to the diagnostic sink and continues; unknown names are
//! typed as `any` to avoid cascading errors.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::ast::*;
use crate::diagnostics::Diagnostics;
use crate::lexer::Span;

/// What a name is bound to in some scope.
///
/// Declaration facts are cloned out of the AST at definition time so that
/// inference can look back into them at use sites.
#[derive(Debug, Clone)]
enum Symbol {
    Variable {
        type_annotation: Option<TypeAnnotation>,
        initializer: Option<Expression>,
    },
    Parameter {
        type_annotation: Option<TypeAnnotation>,
    },
    Function {
        params: Vec<Parameter>,
        return_type: Option<TypeAnnotation>,
    },
    Class,
    Interface,
    BuiltinType,
    BuiltinValue,
}

/// A stack of scopes, innermost last. `define` writes to the innermost scope
/// and shadows outer bindings silently; `resolve` searches innermost-out.
struct SymbolTable {
    scopes: Vec<FxHashMap<String, Symbol>>,
}

impl SymbolTable {
    fn new() -> Self {
        Self { scopes: Vec::new() }
    }

    fn enter_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    fn exit_scope(&mut self) {
        self.scopes.pop();
    }

    fn define(&mut self, name: &str, symbol: Symbol) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), symbol);
        }
    }

    fn resolve(&self, name: &str) -> Option<&Symbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    fn depth(&self) -> usize {
        self.scopes.len()
    }
}

/// Semantic analyzer for a parsed program.
pub struct SemanticAnalyzer<'a> {
    diagnostics: &'a mut Diagnostics,
    is_typescript: bool,
    symbols: SymbolTable,
    /// Declared return types of the enclosing functions, innermost last.
    function_returns: Vec<Option<TypeAnnotation>>,
}

impl<'a> SemanticAnalyzer<'a> {
    pub fn new(diagnostics: &'a mut Diagnostics, is_typescript: bool) -> Self {
        Self {
            diagnostics,
            is_typescript,
            symbols: SymbolTable::new(),
            function_returns: Vec::new(),
        }
    }

    pub fn analyze(&mut self, program: &Program) {
        self.symbols.enter_scope();
        self.define_builtins();

        // First pass: hoist top-level declarations so forward references
        // resolve. This is the only forward-declaration mechanism.
        for stmt in &program.statements {
            match stmt {
                Statement::FunctionDecl(func) => self.define_function(func),
                Statement::ClassDecl(class) => self.symbols.define(&class.name, Symbol::Class),
                Statement::InterfaceDecl(interface) => {
                    self.symbols.define(&interface.name, Symbol::Interface)
                }
                Statement::VarDecl(var) => self.define_variable(var),
                _ => {}
            }
        }

        // Second pass: full walk.
        for stmt in &program.statements {
            self.visit_statement(stmt);
        }

        self.symbols.exit_scope();
        debug_assert_eq!(self.symbols.depth(), 0);
    }

    fn define_builtins(&mut self) {
        for name in ["any", "void", "number", "string", "boolean", "undefined", "null"] {
            self.symbols.define(name, Symbol::BuiltinType);
        }
        for name in [
            "console", "Math", "Date", "Array", "Object", "String", "Number", "Boolean",
        ] {
            self.symbols.define(name, Symbol::BuiltinValue);
        }
    }

    fn define_function(&mut self, func: &FunctionDeclStmt) {
        self.symbols.define(
            &func.name,
            Symbol::Function {
                params: func.params.clone(),
                return_type: func.return_type.clone(),
            },
        );
    }

    fn define_variable(&mut self, var: &VarDeclStmt) {
        self.symbols.define(
            &var.name,
            Symbol::Variable {
                type_annotation: var.type_annotation.clone(),
                initializer: var.initializer.clone(),
            },
        );
    }

    // ============ STATEMENTS ============

    fn visit_statement(&mut self, stmt: &Statement) {
        match stmt {
            Statement::Block(block) => self.visit_block(block),
            Statement::VarDecl(var) => self.visit_var_decl(var),
            Statement::FunctionDecl(func) => self.visit_function_decl(func),
            Statement::ClassDecl(class) => self.visit_class_decl(class),
            Statement::InterfaceDecl(interface) => self.visit_interface_decl(interface),
            Statement::Expression(expr_stmt) => {
                self.infer_expression(&expr_stmt.expression);
            }
            Statement::Return(ret) => self.visit_return(ret),
            Statement::If(if_stmt) => self.visit_if(if_stmt),
            Statement::While(while_stmt) => self.visit_while(while_stmt),
            Statement::For(for_stmt) => self.visit_for(for_stmt),
            Statement::Import(_) | Statement::Export(_) => {}
            Statement::Empty(_) => {}
        }
    }

    fn visit_block(&mut self, block: &BlockStmt) {
        self.symbols.enter_scope();
        for stmt in &block.statements {
            self.visit_statement(stmt);
        }
        self.symbols.exit_scope();
    }

    fn visit_var_decl(&mut self, var: &VarDeclStmt) {
        if let Some(init) = &var.initializer {
            let init_type = self.infer_expression(init);

            if let Some(declared) = &var.type_annotation {
                if !self.assignable(declared, &init_type) {
                    let span = init.span();
                    self.error(
                        span,
                        format!(
                            "Type '{}' is not assignable to type '{}'",
                            init_type, declared
                        ),
                    );
                }
            }
        } else if var.type_annotation.is_none() && self.is_typescript {
            self.error(
                var.span,
                format!(
                    "Variable '{}' has no type annotation and is not initialized",
                    var.name
                ),
            );
        }

        self.define_variable(var);
    }

    fn visit_function_decl(&mut self, func: &FunctionDeclStmt) {
        // Visible to the rest of the enclosing scope (top-level functions
        // are additionally hoisted for forward references).
        self.define_function(func);

        self.symbols.enter_scope();
        self.define_params(&func.params);
        self.function_returns.push(func.return_type.clone());

        self.visit_block(&func.body);

        self.function_returns.pop();
        self.symbols.exit_scope();
    }

    fn define_params(&mut self, params: &[Parameter]) {
        for param in params {
            self.symbols.define(
                &param.name,
                Symbol::Parameter {
                    type_annotation: param.type_annotation.clone(),
                },
            );

            if self.is_typescript && param.type_annotation.is_none() {
                self.error(
                    param.span,
                    format!("Parameter '{}' has no type annotation", param.name),
                );
            }
        }
    }

    fn visit_class_decl(&mut self, class: &ClassDeclStmt) {
        self.symbols.define(&class.name, Symbol::Class);

        if let Some(super_class) = &class.super_class {
            match self.symbols.resolve(super_class) {
                None => self.error(
                    class.span,
                    format!("Cannot find superclass '{}'", super_class),
                ),
                Some(Symbol::Class) => {}
                Some(_) => self.error(class.span, format!("'{}' is not a class", super_class)),
            }
        }

        for interface in &class.interfaces {
            match self.symbols.resolve(interface) {
                None => self.error(class.span, format!("Cannot find interface '{}'", interface)),
                Some(Symbol::Interface) => {}
                Some(_) => self.error(class.span, format!("'{}' is not an interface", interface)),
            }
        }

        self.symbols.enter_scope();

        for member in &class.members {
            match member {
                ClassMember::Property(prop) => self.visit_property_member(prop),
                ClassMember::Method(method) => self.visit_method_member(method),
            }
        }

        self.symbols.exit_scope();
    }

    fn visit_property_member(&mut self, prop: &PropertyMember) {
        if prop.type_annotation.is_none()
            && prop.initializer.is_none()
            && self.is_typescript
        {
            self.error(
                prop.span,
                format!(
                    "Property '{}' has no type annotation and is not initialized",
                    prop.name
                ),
            );
        }

        if let Some(init) = &prop.initializer {
            let init_type = self.infer_expression(init);

            if let Some(declared) = &prop.type_annotation {
                if !self.assignable(declared, &init_type) {
                    let span = init.span();
                    self.error(
                        span,
                        format!(
                            "Type '{}' is not assignable to type '{}'",
                            init_type, declared
                        ),
                    );
                }
            }
        }
    }

    fn visit_method_member(&mut self, method: &MethodMember) {
        self.symbols.enter_scope();
        self.define_params(&method.params);
        self.function_returns.push(method.return_type.clone());

        self.visit_block(&method.body);

        self.function_returns.pop();
        self.symbols.exit_scope();
    }

    fn visit_interface_decl(&mut self, interface: &InterfaceDeclStmt) {
        self.symbols.define(&interface.name, Symbol::Interface);

        for extended in &interface.extends {
            match self.symbols.resolve(extended) {
                None => self.error(
                    interface.span,
                    format!("Cannot find interface '{}'", extended),
                ),
                Some(Symbol::Interface) => {}
                Some(_) => self.error(
                    interface.span,
                    format!("'{}' is not an interface", extended),
                ),
            }
        }

        for member in &interface.members {
            if let InterfaceMember::Method(method) = member {
                for param in &method.params {
                    if param.type_annotation.is_none() {
                        self.error(
                            param.span,
                            format!("Parameter '{}' must have a type annotation", param.name),
                        );
                    }
                }
            }
        }
    }

    fn visit_return(&mut self, ret: &ReturnStmt) {
        let Some(declared) = self.function_returns.last().cloned() else {
            self.error(ret.span, "Return statement not allowed outside of function");
            return;
        };

        match &ret.value {
            None => {
                if let Some(return_type) = &declared {
                    if !is_void(return_type) {
                        self.error(ret.span, "Function with return type must return a value");
                    }
                }
            }
            Some(value) => {
                let value_type = self.infer_expression(value);

                if let Some(return_type) = &declared {
                    if is_void(return_type) && !is_void(&value_type) {
                        self.error(
                            ret.span,
                            "Function with void return type cannot return a value",
                        );
                    } else if !self.assignable(return_type, &value_type) {
                        self.error(
                            ret.span,
                            format!(
                                "Return type '{}' is not assignable to function return type '{}'",
                                value_type, return_type
                            ),
                        );
                    }
                }
            }
        }
    }

    fn check_condition(&mut self, condition: &Expression) {
        let cond_type = self.infer_expression(condition);
        if !is_boolean(&cond_type) && !is_any(&cond_type) {
            let span = condition.span();
            self.error(span, "Condition must be a boolean expression");
        }
    }

    fn visit_if(&mut self, if_stmt: &IfStmt) {
        self.check_condition(&if_stmt.condition);
        self.visit_statement(&if_stmt.then_branch);
        if let Some(else_branch) = &if_stmt.else_branch {
            self.visit_statement(else_branch);
        }
    }

    fn visit_while(&mut self, while_stmt: &WhileStmt) {
        self.check_condition(&while_stmt.condition);
        self.visit_statement(&while_stmt.body);
    }

    fn visit_for(&mut self, for_stmt: &ForStmt) {
        self.symbols.enter_scope();

        if let Some(initializer) = &for_stmt.initializer {
            self.visit_statement(initializer);
        }
        if let Some(condition) = &for_stmt.condition {
            self.check_condition(condition);
        }
        if let Some(increment) = &for_stmt.increment {
            self.infer_expression(increment);
        }

        self.visit_statement(&for_stmt.body);

        self.symbols.exit_scope();
    }

    // ============ EXPRESSIONS ============

    fn infer_expression(&mut self, expr: &Expression) -> TypeAnnotation {
        match expr {
            Expression::Binary(binary) => self.infer_binary(binary),
            Expression::Unary(unary) => self.infer_unary(unary),
            Expression::Call(call) => self.infer_call(call),
            Expression::Member(member) => {
                self.infer_expression(&member.object);
                TypeAnnotation::named("any", member.span)
            }
            Expression::Index(index) => self.infer_index(index),
            Expression::Assign(assign) => self.infer_assign(assign),
            Expression::Literal(literal) => self.infer_literal(literal),
            Expression::Identifier(identifier) => self.infer_identifier(identifier),
            Expression::Object(object) => self.infer_object(object),
            Expression::Array(array) => self.infer_array(array),
            Expression::New(new_expr) => self.infer_new(new_expr),
            Expression::Function(func) => self.infer_function_expr(func),
            Expression::Conditional(conditional) => self.infer_conditional(conditional),
            Expression::This(span) => TypeAnnotation::named("any", *span),
        }
    }

    fn infer_binary(&mut self, binary: &BinaryExpr) -> TypeAnnotation {
        let left = self.infer_expression(&binary.left);
        let right = self.infer_expression(&binary.right);
        let span = binary.span;

        match binary.operator {
            BinaryOp::Add => {
                // String concatenation wins over numeric addition.
                if is_string(&left) || is_string(&right) {
                    return TypeAnnotation::named("string", span);
                }
                self.require_numeric_operands(&left, &right, binary.operator, span);
                TypeAnnotation::named("number", span)
            }
            BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod | BinaryOp::Exp => {
                self.require_numeric_operands(&left, &right, binary.operator, span);
                TypeAnnotation::named("number", span)
            }
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::StrictEq
            | BinaryOp::StrictNotEq
            | BinaryOp::Gt
            | BinaryOp::Lt
            | BinaryOp::GtEq
            | BinaryOp::LtEq => TypeAnnotation::named("boolean", span),
            BinaryOp::And | BinaryOp::Or => {
                if (!is_boolean(&left) && !is_any(&left))
                    || (!is_boolean(&right) && !is_any(&right))
                {
                    self.error(
                        span,
                        format!(
                            "Operator '{}' can only be applied to booleans",
                            binary.operator.as_str()
                        ),
                    );
                }
                TypeAnnotation::named("boolean", span)
            }
            BinaryOp::BitAnd
            | BinaryOp::BitOr
            | BinaryOp::BitXor
            | BinaryOp::LShift
            | BinaryOp::RShift
            | BinaryOp::URShift => {
                if (!is_number(&left) && !is_any(&left)) || (!is_number(&right) && !is_any(&right))
                {
                    self.error(span, "Bitwise operator can only be applied to numbers");
                }
                TypeAnnotation::named("number", span)
            }
        }
    }

    fn require_numeric_operands(
        &mut self,
        left: &TypeAnnotation,
        right: &TypeAnnotation,
        operator: BinaryOp,
        span: Span,
    ) {
        if (!is_number(left) && !is_any(left)) || (!is_number(right) && !is_any(right)) {
            self.error(
                span,
                format!(
                    "Operator '{}' can only be applied to numbers",
                    operator.as_str()
                ),
            );
        }
    }

    fn infer_unary(&mut self, unary: &UnaryExpr) -> TypeAnnotation {
        let operand = self.infer_expression(&unary.operand);
        let span = unary.span;

        match unary.operator {
            UnaryOp::Not => TypeAnnotation::named("boolean", span),
            UnaryOp::Neg | UnaryOp::Plus | UnaryOp::Increment | UnaryOp::Decrement => {
                if !is_number(&operand) && !is_any(&operand) {
                    self.error(
                        span,
                        format!(
                            "Operator '{}' can only be applied to numbers",
                            unary.operator.as_str().trim_end()
                        ),
                    );
                }
                TypeAnnotation::named("number", span)
            }
            UnaryOp::Typeof => TypeAnnotation::named("string", span),
        }
    }

    fn infer_call(&mut self, call: &CallExpr) -> TypeAnnotation {
        let callee_type = self.infer_expression(&call.callee);

        match callee_type {
            TypeAnnotation::Function(func) => {
                if call.arguments.len() != func.params.len() {
                    self.error(
                        call.span,
                        format!(
                            "Expected {} arguments, but got {}",
                            func.params.len(),
                            call.arguments.len()
                        ),
                    );
                }

                for (argument, param) in call.arguments.iter().zip(&func.params) {
                    let arg_type = self.infer_expression(argument);
                    if let Some(param_type) = &param.type_annotation {
                        if !self.assignable(param_type, &arg_type) {
                            let span = argument.span();
                            self.error(
                                span,
                                format!(
                                    "Argument of type '{}' is not assignable to parameter of type '{}'",
                                    arg_type, param_type
                                ),
                            );
                        }
                    }
                }
                // Extra arguments past the parameter list are still inferred.
                for argument in call.arguments.iter().skip(func.params.len()) {
                    self.infer_expression(argument);
                }

                (*func.return_type).clone()
            }
            ref t if is_any(t) => {
                for argument in &call.arguments {
                    self.infer_expression(argument);
                }
                TypeAnnotation::named("any", call.span)
            }
            other => {
                self.error(
                    call.span,
                    format!("Cannot call non-function type: {}", other),
                );
                TypeAnnotation::named("any", call.span)
            }
        }
    }

    fn infer_index(&mut self, index: &IndexExpr) -> TypeAnnotation {
        self.infer_expression(&index.object);
        let index_type = self.infer_expression(&index.index);

        if !is_number(&index_type) && !is_string(&index_type) && !is_any(&index_type) {
            let span = index.index.span();
            self.error(span, "Index expression must be of type 'number' or 'string'");
        }

        TypeAnnotation::named("any", index.span)
    }

    fn infer_assign(&mut self, assign: &AssignExpr) -> TypeAnnotation {
        let target_type = self.infer_expression(&assign.target);
        let value_type = self.infer_expression(&assign.value);

        match assign.operator {
            AssignOp::Assign => {}
            AssignOp::AddAssign => {
                if !is_string(&target_type) && !is_number(&target_type) && !is_any(&target_type) {
                    self.error(
                        assign.span,
                        "Operator '+=' can only be applied to string or number",
                    );
                }
            }
            AssignOp::SubAssign
            | AssignOp::MulAssign
            | AssignOp::DivAssign
            | AssignOp::ModAssign => {
                if !is_number(&target_type) && !is_any(&target_type) {
                    self.error(
                        assign.span,
                        format!(
                            "Operator '{}' can only be applied to number",
                            assign.operator.as_str()
                        ),
                    );
                }
            }
        }

        if !self.assignable(&target_type, &value_type) {
            self.error(
                assign.span,
                format!(
                    "Type '{}' is not assignable to type '{}'",
                    value_type, target_type
                ),
            );
        }

        value_type
    }

    fn infer_literal(&mut self, literal: &LiteralExpr) -> TypeAnnotation {
        let name = match literal.value {
            LiteralValue::Number(_) => "number",
            LiteralValue::String(_) => "string",
            LiteralValue::Boolean(_) => "boolean",
            LiteralValue::Null => "null",
            LiteralValue::Undefined => "undefined",
        };
        TypeAnnotation::named(name, literal.span)
    }

    fn infer_identifier(&mut self, identifier: &IdentifierExpr) -> TypeAnnotation {
        let span = identifier.span;

        let Some(symbol) = self.symbols.resolve(&identifier.name).cloned() else {
            self.error(span, format!("Cannot find name '{}'", identifier.name));
            return TypeAnnotation::named("any", span);
        };

        match symbol {
            Symbol::Variable {
                type_annotation,
                initializer,
            } => {
                if let Some(ty) = type_annotation {
                    ty
                } else if let Some(init) = initializer {
                    self.infer_expression(&init)
                } else {
                    TypeAnnotation::named("any", span)
                }
            }
            Symbol::Parameter { type_annotation } => {
                type_annotation.unwrap_or_else(|| TypeAnnotation::named("any", span))
            }
            Symbol::Function {
                params,
                return_type,
            } => TypeAnnotation::Function(FunctionType {
                params,
                return_type: Box::new(
                    return_type.unwrap_or_else(|| TypeAnnotation::named("any", span)),
                ),
                span,
            }),
            Symbol::Class
            | Symbol::Interface
            | Symbol::BuiltinType
            | Symbol::BuiltinValue => TypeAnnotation::named(&identifier.name, span),
        }
    }

    fn infer_object(&mut self, object: &ObjectExpr) -> TypeAnnotation {
        // Insertion order is preserved; a duplicate key keeps its first slot
        // and takes the last value's type.
        let mut property_types: IndexMap<String, TypeAnnotation> = IndexMap::new();

        for property in &object.properties {
            let ty = self.infer_expression(&property.value);
            property_types.insert(property.key.clone(), ty);
        }

        let properties = property_types
            .into_iter()
            .map(|(name, type_annotation)| ObjectTypeProperty {
                name,
                type_annotation,
                optional: false,
                span: object.span,
            })
            .collect();

        TypeAnnotation::Object(ObjectType {
            properties,
            span: object.span,
        })
    }

    fn infer_array(&mut self, array: &ArrayExpr) -> TypeAnnotation {
        let mut element_type: Option<TypeAnnotation> = None;

        for element in &array.elements {
            let ty = self.infer_expression(element);

            match &element_type {
                None => element_type = Some(ty),
                Some(current) => {
                    if !self.assignable(current, &ty) && !self.assignable(&ty, current) {
                        element_type = Some(TypeAnnotation::named("any", array.span));
                        break;
                    }
                }
            }
        }

        let element =
            element_type.unwrap_or_else(|| TypeAnnotation::named("any", array.span));

        TypeAnnotation::Array(ArrayType {
            element: Box::new(element),
            span: array.span,
        })
    }

    fn infer_new(&mut self, new_expr: &NewExpr) -> TypeAnnotation {
        let constructor_type = self.infer_expression(&new_expr.callee);

        for argument in &new_expr.arguments {
            self.infer_expression(argument);
        }

        match constructor_type {
            TypeAnnotation::Named(_) => constructor_type,
            other => {
                self.error(
                    new_expr.span,
                    format!("Cannot instantiate non-class type: {}", other),
                );
                TypeAnnotation::named("any", new_expr.span)
            }
        }
    }

    fn infer_function_expr(&mut self, func: &FunctionExpr) -> TypeAnnotation {
        self.symbols.enter_scope();
        self.define_params(&func.params);
        self.function_returns.push(func.return_type.clone());

        self.visit_block(&func.body);

        self.function_returns.pop();
        self.symbols.exit_scope();

        TypeAnnotation::Function(FunctionType {
            params: func.params.clone(),
            return_type: Box::new(
                func.return_type
                    .clone()
                    .unwrap_or_else(|| TypeAnnotation::named("any", func.span)),
            ),
            span: func.span,
        })
    }

    fn infer_conditional(&mut self, conditional: &ConditionalExpr) -> TypeAnnotation {
        self.check_condition(&conditional.condition);

        let then_type = self.infer_expression(&conditional.then_expr);
        let else_type = self.infer_expression(&conditional.else_expr);

        if self.assignable(&then_type, &else_type) {
            else_type
        } else if self.assignable(&else_type, &then_type) {
            then_type
        } else if self.is_typescript {
            let span = conditional.span;
            TypeAnnotation::Union(UnionType {
                types: vec![then_type, else_type],
                span,
            })
        } else {
            TypeAnnotation::named("any", conditional.span)
        }
    }

    // ============ ASSIGNABILITY ============

    /// Is `source` assignable to a slot of type `target`?
    fn assignable(&self, target: &TypeAnnotation, source: &TypeAnnotation) -> bool {
        if is_any(target) || is_any(source) {
            return true;
        }

        // Null can occupy any non-primitive slot.
        if is_null(source) {
            return !is_primitive(target);
        }

        // Undefined is assignable everywhere in JavaScript mode.
        if is_undefined(source) && !self.is_typescript {
            return true;
        }

        if let (TypeAnnotation::Named(t), TypeAnnotation::Named(s)) = (target, source) {
            if t.name == s.name {
                return true;
            }
        }

        // A union target accepts anything assignable to one of its members.
        if let TypeAnnotation::Union(union) = target {
            return union.types.iter().any(|member| self.assignable(member, source));
        }

        // An intersection source must be assignable through all its members.
        if let TypeAnnotation::Intersection(intersection) = source {
            return intersection
                .types
                .iter()
                .all(|member| self.assignable(target, member));
        }

        if let (TypeAnnotation::Array(t), TypeAnnotation::Array(s)) = (target, source) {
            return self.assignable(&t.element, &s.element);
        }

        // Structural object typing: every required property of the target
        // must appear on the source with an assignable type.
        if let (TypeAnnotation::Object(t), TypeAnnotation::Object(s)) = (target, source) {
            for target_prop in &t.properties {
                let source_prop = s
                    .properties
                    .iter()
                    .find(|p| p.name == target_prop.name);

                match source_prop {
                    None => {
                        if !target_prop.optional {
                            return false;
                        }
                    }
                    Some(source_prop) => {
                        if !self.assignable(
                            &target_prop.type_annotation,
                            &source_prop.type_annotation,
                        ) {
                            return false;
                        }
                    }
                }
            }
            return true;
        }

        // Functions: same arity, contravariant parameters, covariant return.
        if let (TypeAnnotation::Function(t), TypeAnnotation::Function(s)) = (target, source) {
            if t.params.len() != s.params.len() {
                return false;
            }

            for (target_param, source_param) in t.params.iter().zip(&s.params) {
                let (Some(target_ty), Some(source_ty)) =
                    (&target_param.type_annotation, &source_param.type_annotation)
                else {
                    continue;
                };
                if !self.assignable(source_ty, target_ty) {
                    return false;
                }
            }

            return self.assignable(&t.return_type, &s.return_type);
        }

        false
    }

    fn error(&mut self, span: Span, message: impl Into<String>) {
        self.diagnostics.report(span.line, span.column, message);
    }
}

fn is_named(ty: &TypeAnnotation, name: &str) -> bool {
    matches!(ty, TypeAnnotation::Named(t) if t.name == name)
}

fn is_any(ty: &TypeAnnotation) -> bool {
    is_named(ty, "any")
}

fn is_void(ty: &TypeAnnotation) -> bool {
    is_named(ty, "void")
}

fn is_number(ty: &TypeAnnotation) -> bool {
    is_named(ty, "number")
}

fn is_string(ty: &TypeAnnotation) -> bool {
    is_named(ty, "string")
}

fn is_boolean(ty: &TypeAnnotation) -> bool {
    is_named(ty, "boolean")
}

fn is_null(ty: &TypeAnnotation) -> bool {
    is_named(ty, "null")
}

fn is_undefined(ty: &TypeAnnotation) -> bool {
    is_named(ty, "undefined")
}

fn is_primitive(ty: &TypeAnnotation) -> bool {
    is_number(ty) || is_string(ty) || is_boolean(ty) || is_void(ty) || is_null(ty)
        || is_undefined(ty)
}
