//! JavaScript code generation.
//!
//! Walks the AST and produces ES-compatible JavaScript text. Type
//! annotations, access modifiers, and `readonly` are erased; interface
//! declarations become a one-line comment; classes without a `constructor`
//! get one synthesized. Indentation is two spaces per nesting level.

use crate::ast::*;

const INDENT: &str = "  ";

/// Tree-walking JavaScript emitter. Assumes a well-typed AST; never fails.
pub struct CodeGenerator {
    indent_level: usize,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self { indent_level: 0 }
    }

    pub fn generate(&mut self, program: &Program) -> String {
        let mut out = String::new();

        if program.is_module {
            out.push_str("// Generated by tstrip\n");
            out.push_str("// TypeScript/JavaScript compilation output\n\n");
        }

        for stmt in &program.statements {
            out.push_str(&self.emit_statement(stmt));
            if !matches!(stmt, Statement::Block(_)) {
                out.push('\n');
            }
        }

        out
    }

    fn indent(&self) -> String {
        INDENT.repeat(self.indent_level)
    }

    // ============ STATEMENTS ============

    fn emit_statement(&mut self, stmt: &Statement) -> String {
        match stmt {
            Statement::Block(block) => self.emit_block(block),
            Statement::VarDecl(var) => format!("{};", self.emit_var_decl_inline(var)),
            Statement::FunctionDecl(func) => self.emit_function_decl(func),
            Statement::ClassDecl(class) => self.emit_class_decl(class),
            Statement::InterfaceDecl(interface) => {
                format!("// Interface {} (not emitted in JavaScript)", interface.name)
            }
            Statement::Expression(expr_stmt) => {
                format!("{};", self.emit_expression(&expr_stmt.expression))
            }
            Statement::Return(ret) => match &ret.value {
                None => "return;".to_string(),
                Some(value) => format!("return {};", self.emit_expression(value)),
            },
            Statement::If(if_stmt) => self.emit_if(if_stmt),
            Statement::While(while_stmt) => {
                let condition = self.emit_expression(&while_stmt.condition);
                format!(
                    "while ({}) {}",
                    condition,
                    self.emit_braced_body(&while_stmt.body)
                )
            }
            Statement::For(for_stmt) => self.emit_for(for_stmt),
            Statement::Import(import) => self.emit_import(import),
            Statement::Export(_) => "// Export statement".to_string(),
            Statement::Empty(_) => ";".to_string(),
        }
    }

    fn emit_block(&mut self, block: &BlockStmt) -> String {
        let mut out = String::from("{\n");
        self.indent_level += 1;

        for stmt in &block.statements {
            out.push_str(&self.indent());
            out.push_str(&self.emit_statement(stmt));
            if !matches!(stmt, Statement::Block(_)) {
                out.push('\n');
            }
        }

        self.indent_level -= 1;
        out.push_str(&self.indent());
        out.push_str("}\n");
        out
    }

    /// Emit a statement body, wrapping a non-block statement in braces.
    fn emit_braced_body(&mut self, body: &Statement) -> String {
        if let Statement::Block(block) = body {
            return self.emit_block(block);
        }

        let mut out = String::from("{\n");
        self.indent_level += 1;
        out.push_str(&self.indent());
        out.push_str(&self.emit_statement(body));
        out.push('\n');
        self.indent_level -= 1;
        out.push_str(&self.indent());
        out.push('}');
        out
    }

    /// `let`/`const` plus name and initializer, without the trailing `;` so
    /// the same emission serves statements and `for` headers.
    fn emit_var_decl_inline(&mut self, var: &VarDeclStmt) -> String {
        let keyword = if var.is_const { "const" } else { "let" };
        match &var.initializer {
            Some(init) => format!("{} {} = {}", keyword, var.name, self.emit_expression(init)),
            None => format!("{} {}", keyword, var.name),
        }
    }

    fn emit_function_decl(&mut self, func: &FunctionDeclStmt) -> String {
        format!(
            "function {}({}) {}",
            func.name,
            param_names(&func.params),
            self.emit_block(&func.body)
        )
    }

    fn emit_class_decl(&mut self, class: &ClassDeclStmt) -> String {
        let mut out = format!("class {}", class.name);

        if let Some(super_class) = &class.super_class {
            out.push_str(" extends ");
            out.push_str(super_class);
        }

        out.push_str(" {\n");
        self.indent_level += 1;

        let has_constructor = class.members.iter().any(
            |m| matches!(m, ClassMember::Method(method) if method.name == "constructor"),
        );

        // Without a user-written constructor, synthesize one that runs
        // `super()` and the instance property initializers.
        if !has_constructor {
            out.push_str(&self.indent());
            out.push_str("constructor() {\n");

            if class.super_class.is_some() {
                out.push_str(&self.indent());
                out.push_str(INDENT);
                out.push_str("super();\n");
            }

            for member in &class.members {
                if let ClassMember::Property(prop) = member {
                    if !prop.is_static {
                        if let Some(init) = &prop.initializer {
                            let value = self.emit_expression(init);
                            out.push_str(&self.indent());
                            out.push_str(INDENT);
                            out.push_str(&format!("this.{} = {};\n", prop.name, value));
                        }
                    }
                }
            }

            out.push_str(&self.indent());
            out.push_str("}\n\n");
        }

        // Static properties
        for member in &class.members {
            if let ClassMember::Property(prop) = member {
                if prop.is_static {
                    out.push_str(&self.indent());
                    out.push_str("static ");
                    out.push_str(&prop.name);
                    if let Some(init) = &prop.initializer {
                        let value = self.emit_expression(init);
                        out.push_str(" = ");
                        out.push_str(&value);
                    }
                    out.push_str(";\n");
                }
            }
        }

        // Methods
        for member in &class.members {
            if let ClassMember::Method(method) = member {
                out.push_str(&self.indent());
                if method.is_static {
                    out.push_str("static ");
                }
                out.push_str(&format!(
                    "{}({}) {}",
                    method.name,
                    param_names(&method.params),
                    self.emit_block(&method.body)
                ));
            }
        }

        self.indent_level -= 1;
        out.push_str(&self.indent());
        out.push_str("}\n");
        out
    }

    fn emit_if(&mut self, if_stmt: &IfStmt) -> String {
        let condition = self.emit_expression(&if_stmt.condition);
        let mut out = format!(
            "if ({}) {}",
            condition,
            self.emit_braced_body(&if_stmt.then_branch)
        );

        if let Some(else_branch) = &if_stmt.else_branch {
            out.push_str(" else ");
            out.push_str(&self.emit_braced_body(else_branch));
        }

        out
    }

    fn emit_for(&mut self, for_stmt: &ForStmt) -> String {
        let mut out = String::from("for (");

        // A declaration initializer is emitted inline, without its `;`.
        if let Some(initializer) = &for_stmt.initializer {
            match initializer.as_ref() {
                Statement::VarDecl(var) => out.push_str(&self.emit_var_decl_inline(var)),
                Statement::Expression(expr_stmt) => {
                    out.push_str(&self.emit_expression(&expr_stmt.expression))
                }
                other => out.push_str(&self.emit_statement(other)),
            }
        }
        out.push_str("; ");

        if let Some(condition) = &for_stmt.condition {
            out.push_str(&self.emit_expression(condition));
        }
        out.push_str("; ");

        if let Some(increment) = &for_stmt.increment {
            out.push_str(&self.emit_expression(increment));
        }
        out.push_str(") ");

        out.push_str(&self.emit_braced_body(&for_stmt.body));
        out
    }

    fn emit_import(&mut self, import: &ImportStmt) -> String {
        let specifiers: Vec<String> = import
            .specifiers
            .iter()
            .map(|specifier| match specifier {
                ImportSpecifier::Namespace { local } => format!("* as {}", local),
                ImportSpecifier::Default { local } => local.clone(),
                ImportSpecifier::Named { imported, local } => {
                    if imported == local {
                        local.clone()
                    } else {
                        format!("{} as {}", imported, local)
                    }
                }
            })
            .collect();

        format!(
            "// Import statement: {} from '{}'",
            specifiers.join(", "),
            import.source
        )
    }

    // ============ EXPRESSIONS ============

    fn emit_expression(&mut self, expr: &Expression) -> String {
        match expr {
            Expression::Binary(binary) => format!(
                "({} {} {})",
                self.emit_expression(&binary.left),
                binary.operator.as_str(),
                self.emit_expression(&binary.right)
            ),
            Expression::Unary(unary) => {
                if unary.prefix {
                    format!(
                        "{}{}",
                        unary.operator.as_str(),
                        self.emit_expression(&unary.operand)
                    )
                } else {
                    format!(
                        "{}{}",
                        self.emit_expression(&unary.operand),
                        unary.operator.as_str()
                    )
                }
            }
            Expression::Call(call) => format!(
                "{}({})",
                self.emit_expression(&call.callee),
                self.emit_arguments(&call.arguments)
            ),
            Expression::Member(member) => format!(
                "{}{}{}",
                self.emit_expression(&member.object),
                if member.optional { "?." } else { "." },
                member.property
            ),
            Expression::Index(index) => format!(
                "{}[{}]",
                self.emit_expression(&index.object),
                self.emit_expression(&index.index)
            ),
            Expression::Assign(assign) => format!(
                "{} {} {}",
                self.emit_expression(&assign.target),
                assign.operator.as_str(),
                self.emit_expression(&assign.value)
            ),
            Expression::Literal(literal) => emit_literal(&literal.value),
            Expression::Identifier(identifier) => identifier.name.clone(),
            Expression::Object(object) => self.emit_object(object),
            Expression::Array(array) => {
                let elements: Vec<String> = array
                    .elements
                    .iter()
                    .map(|element| self.emit_expression(element))
                    .collect();
                format!("[{}]", elements.join(", "))
            }
            Expression::New(new_expr) => format!(
                "new {}({})",
                self.emit_expression(&new_expr.callee),
                self.emit_arguments(&new_expr.arguments)
            ),
            Expression::Function(func) => {
                let header = match &func.name {
                    Some(name) => format!("function {}(", name),
                    None => "function(".to_string(),
                };
                format!(
                    "{}{}) {}",
                    header,
                    param_names(&func.params),
                    self.emit_block(&func.body)
                )
            }
            Expression::Conditional(conditional) => format!(
                "({} ? {} : {})",
                self.emit_expression(&conditional.condition),
                self.emit_expression(&conditional.then_expr),
                self.emit_expression(&conditional.else_expr)
            ),
            Expression::This(_) => "this".to_string(),
        }
    }

    fn emit_arguments(&mut self, arguments: &[Expression]) -> String {
        let rendered: Vec<String> = arguments
            .iter()
            .map(|argument| self.emit_expression(argument))
            .collect();
        rendered.join(", ")
    }

    fn emit_object(&mut self, object: &ObjectExpr) -> String {
        if object.properties.is_empty() {
            return "{}".to_string();
        }

        let mut out = String::from("{\n");
        self.indent_level += 1;

        for (i, property) in object.properties.iter().enumerate() {
            let value = self.emit_expression(&property.value);
            out.push_str(&self.indent());
            out.push_str(&property.key);
            out.push_str(": ");
            out.push_str(&value);
            if i < object.properties.len() - 1 {
                out.push(',');
            }
            out.push('\n');
        }

        self.indent_level -= 1;
        out.push_str(&self.indent());
        out.push('}');
        out
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn param_names(params: &[Parameter]) -> String {
    params
        .iter()
        .map(|param| param.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn emit_literal(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Number(n) => format!("{}", n),
        LiteralValue::String(s) => format!("\"{}\"", escape_string(s)),
        LiteralValue::Boolean(b) => b.to_string(),
        LiteralValue::Null => "null".to_string(),
        LiteralValue::Undefined => "undefined".to_string(),
    }
}

fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}
