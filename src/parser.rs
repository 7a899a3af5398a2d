//! Parser for TypeScript/JavaScript source code.
//!
//! Recursive descent over the token stream with one-token lookahead plus a
//! peek-by-offset primitive. Syntax errors are reported to the shared
//! diagnostic sink and recovered with panic-mode synchronization at statement
//! and class/interface body boundaries, so the parser never fails outright:
//! it always produces a `Program`.

use crate::ast::*;
use crate::diagnostics::Diagnostics;
use crate::lexer::{Span, Token, TokenKind};

/// Marker for an already-reported syntax error. Raising one unwinds to the
/// nearest recovery loop, which synchronizes and resumes.
pub struct ParseInterrupt;

type ParseResult<T> = Result<T, ParseInterrupt>;

/// Parser over a token stream produced by the lexer.
pub struct Parser<'a> {
    tokens: Vec<Token>,
    current: usize,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            tokens,
            current: 0,
            diagnostics,
        }
    }

    /// Parse a complete program. Never fails; syntax errors land in the
    /// diagnostic sink and parsing resumes at the next statement boundary.
    pub fn parse(mut self) -> Program {
        let span = self.peek().span;

        // A file is a module when any import/export token appears anywhere.
        let is_module = self
            .tokens
            .iter()
            .any(|t| matches!(t.kind, TokenKind::Import | TokenKind::Export));

        let mut statements = Vec::new();
        while !self.is_at_end() {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(ParseInterrupt) => self.synchronize(),
            }
        }

        Program {
            statements,
            is_module,
            span,
        }
    }

    // ============ STATEMENTS ============

    fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.peek().kind {
            TokenKind::Let | TokenKind::Const | TokenKind::Var => {
                Ok(Statement::VarDecl(self.parse_variable_declaration()?))
            }
            TokenKind::Function => Ok(Statement::FunctionDecl(self.parse_function_declaration()?)),
            TokenKind::Class => Ok(Statement::ClassDecl(self.parse_class_declaration()?)),
            TokenKind::Interface => {
                Ok(Statement::InterfaceDecl(self.parse_interface_declaration()?))
            }
            TokenKind::If => self.parse_if_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Import => Ok(Statement::Import(self.parse_import_statement()?)),
            TokenKind::Export => Ok(Statement::Export(self.parse_export_statement()?)),
            TokenKind::LBrace => Ok(Statement::Block(self.parse_block_statement()?)),
            TokenKind::Semicolon => {
                let span = self.peek().span;
                self.advance();
                Ok(Statement::Empty(span))
            }
            _ => Ok(Statement::Expression(self.parse_expression_statement()?)),
        }
    }

    fn parse_variable_declaration(&mut self) -> ParseResult<VarDeclStmt> {
        let keyword = self.advance().clone(); // let/const/var
        let is_const = keyword.kind == TokenKind::Const;

        let name = self
            .consume(TokenKind::Identifier, "Expected variable name")?
            .lexeme;

        let type_annotation = if self.match_token(TokenKind::Colon) {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };

        let initializer = if self.match_token(TokenKind::Eq) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.consume(
            TokenKind::Semicolon,
            "Expected ';' after variable declaration",
        )?;

        Ok(VarDeclStmt {
            name,
            type_annotation,
            initializer,
            is_const,
            span: keyword.span,
        })
    }

    fn parse_function_declaration(&mut self) -> ParseResult<FunctionDeclStmt> {
        let keyword = self.advance().clone(); // function

        let name = self
            .consume(TokenKind::Identifier, "Expected function name")?
            .lexeme;

        self.consume(TokenKind::LParen, "Expected '(' after function name")?;
        let params = self.parse_parameter_list()?;
        self.consume(TokenKind::RParen, "Expected ')' after parameters")?;

        let return_type = if self.match_token(TokenKind::Colon) {
            Some(self.parse_type_annotation()?)
        } else {
            None
        };

        let body = self.parse_block_statement()?;

        Ok(FunctionDeclStmt {
            name,
            params,
            return_type,
            body,
            span: keyword.span,
        })
    }

    fn parse_parameter_list(&mut self) -> ParseResult<Vec<Parameter>> {
        let mut params = Vec::new();

        if !self.check(TokenKind::RParen) {
            loop {
                let span = self.peek().span;
                let name = self
                    .consume(TokenKind::Identifier, "Expected parameter name")?
                    .lexeme;

                let type_annotation = if self.match_token(TokenKind::Colon) {
                    Some(self.parse_type_annotation()?)
                } else {
                    None
                };

                params.push(Parameter {
                    name,
                    type_annotation,
                    span,
                });

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        Ok(params)
    }

    fn parse_class_declaration(&mut self) -> ParseResult<ClassDeclStmt> {
        let keyword = self.advance().clone(); // class

        let name = self
            .consume(TokenKind::Identifier, "Expected class name")?
            .lexeme;

        let super_class = if self.match_token(TokenKind::Extends) {
            Some(
                self.consume(TokenKind::Identifier, "Expected superclass name")?
                    .lexeme,
            )
        } else {
            None
        };

        let mut interfaces = Vec::new();
        if self.match_token(TokenKind::Implements) {
            loop {
                interfaces.push(
                    self.consume(TokenKind::Identifier, "Expected interface name")?
                        .lexeme,
                );
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::LBrace, "Expected '{' before class body")?;

        let mut members = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            match self.parse_class_member() {
                Ok(member) => members.push(member),
                Err(ParseInterrupt) => self.synchronize(),
            }
        }

        self.consume(TokenKind::RBrace, "Expected '}' after class body")?;

        Ok(ClassDeclStmt {
            name,
            super_class,
            interfaces,
            members,
            span: keyword.span,
        })
    }

    fn parse_class_member(&mut self) -> ParseResult<ClassMember> {
        let member_span = self.peek().span;

        // Modifiers are accepted in any order; access defaults to public.
        let mut access = AccessModifier::Public;
        let mut is_static = false;
        let mut is_readonly = false;

        loop {
            match self.peek().kind {
                TokenKind::Public => {
                    access = AccessModifier::Public;
                    self.advance();
                }
                TokenKind::Private => {
                    access = AccessModifier::Private;
                    self.advance();
                }
                TokenKind::Protected => {
                    access = AccessModifier::Protected;
                    self.advance();
                }
                TokenKind::Static => {
                    is_static = true;
                    self.advance();
                }
                TokenKind::Readonly => {
                    is_readonly = true;
                    self.advance();
                }
                _ => break,
            }
        }

        // A member is a method iff it starts with `function` or is an
        // identifier immediately followed by `(`.
        let is_method = self.check(TokenKind::Function)
            || (self.check(TokenKind::Identifier) && self.peek_at(1).kind == TokenKind::LParen);

        if is_method {
            let name = if self.match_token(TokenKind::Function) {
                self.consume(TokenKind::Identifier, "Expected method name")?
                    .lexeme
            } else {
                self.advance().lexeme.clone()
            };

            self.consume(TokenKind::LParen, "Expected '(' after method name")?;
            let params = self.parse_parameter_list()?;
            self.consume(TokenKind::RParen, "Expected ')' after parameters")?;

            let return_type = if self.match_token(TokenKind::Colon) {
                Some(self.parse_type_annotation()?)
            } else {
                None
            };

            let body = self.parse_block_statement()?;

            Ok(ClassMember::Method(MethodMember {
                name,
                params,
                return_type,
                body,
                access,
                is_static,
                span: member_span,
            }))
        } else {
            let name = self
                .consume(TokenKind::Identifier, "Expected property name")?
                .lexeme;

            let type_annotation = if self.match_token(TokenKind::Colon) {
                Some(self.parse_type_annotation()?)
            } else {
                None
            };

            let initializer = if self.match_token(TokenKind::Eq) {
                Some(self.parse_expression()?)
            } else {
                None
            };

            self.consume(
                TokenKind::Semicolon,
                "Expected ';' after property declaration",
            )?;

            Ok(ClassMember::Property(PropertyMember {
                name,
                type_annotation,
                initializer,
                access,
                is_static,
                is_readonly,
                span: member_span,
            }))
        }
    }

    fn parse_interface_declaration(&mut self) -> ParseResult<InterfaceDeclStmt> {
        let keyword = self.advance().clone(); // interface

        let name = self
            .consume(TokenKind::Identifier, "Expected interface name")?
            .lexeme;

        let mut extends = Vec::new();
        if self.match_token(TokenKind::Extends) {
            loop {
                extends.push(
                    self.consume(TokenKind::Identifier, "Expected interface name")?
                        .lexeme,
                );
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::LBrace, "Expected '{' before interface body")?;

        let mut members = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            match self.parse_interface_member() {
                Ok(member) => members.push(member),
                Err(ParseInterrupt) => self.synchronize(),
            }
        }

        self.consume(TokenKind::RBrace, "Expected '}' after interface body")?;

        Ok(InterfaceDeclStmt {
            name,
            extends,
            members,
            span: keyword.span,
        })
    }

    fn parse_interface_member(&mut self) -> ParseResult<InterfaceMember> {
        let member_span = self.peek().span;
        let is_readonly = self.match_token(TokenKind::Readonly);

        let name = self
            .consume(TokenKind::Identifier, "Expected member name")?
            .lexeme;

        if self.match_token(TokenKind::LParen) {
            // Method signature
            let params = self.parse_parameter_list()?;
            self.consume(TokenKind::RParen, "Expected ')' after parameters")?;
            self.consume(
                TokenKind::Colon,
                "Expected return type for interface method",
            )?;
            let return_type = self.parse_type_annotation()?;
            self.consume(TokenKind::Semicolon, "Expected ';' after method signature")?;

            Ok(InterfaceMember::Method(InterfaceMethodSig {
                name,
                params,
                return_type,
                span: member_span,
            }))
        } else {
            // Property signature
            self.consume(
                TokenKind::Colon,
                "Expected type annotation for interface property",
            )?;
            let type_annotation = self.parse_type_annotation()?;
            self.consume(
                TokenKind::Semicolon,
                "Expected ';' after property signature",
            )?;

            Ok(InterfaceMember::Property(InterfacePropertySig {
                name,
                type_annotation,
                is_readonly,
                span: member_span,
            }))
        }
    }

    fn parse_if_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance().clone(); // if

        self.consume(TokenKind::LParen, "Expected '(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RParen, "Expected ')' after if condition")?;

        let then_branch = Box::new(self.parse_statement()?);

        let else_branch = if self.match_token(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Statement::If(IfStmt {
            condition,
            then_branch,
            else_branch,
            span: keyword.span,
        }))
    }

    fn parse_while_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance().clone(); // while

        self.consume(TokenKind::LParen, "Expected '(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.consume(TokenKind::RParen, "Expected ')' after while condition")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Statement::While(WhileStmt {
            condition,
            body,
            span: keyword.span,
        }))
    }

    fn parse_for_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance().clone(); // for

        self.consume(TokenKind::LParen, "Expected '(' after 'for'")?;

        // The initializer forms below consume their own ';'.
        let initializer = if self.match_token(TokenKind::Semicolon) {
            None
        } else if matches!(
            self.peek().kind,
            TokenKind::Let | TokenKind::Const | TokenKind::Var
        ) {
            Some(Box::new(Statement::VarDecl(
                self.parse_variable_declaration()?,
            )))
        } else {
            Some(Box::new(Statement::Expression(
                self.parse_expression_statement()?,
            )))
        };

        let condition = if !self.check(TokenKind::Semicolon) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.consume(TokenKind::Semicolon, "Expected ';' after loop condition")?;

        let increment = if !self.check(TokenKind::RParen) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.consume(TokenKind::RParen, "Expected ')' after for clauses")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Statement::For(ForStmt {
            initializer,
            condition,
            increment,
            body,
            span: keyword.span,
        }))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        let keyword = self.advance().clone(); // return

        let value = if !self.check(TokenKind::Semicolon) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.consume(TokenKind::Semicolon, "Expected ';' after return value")?;

        Ok(Statement::Return(ReturnStmt {
            value,
            span: keyword.span,
        }))
    }

    fn parse_import_statement(&mut self) -> ParseResult<ImportStmt> {
        let keyword = self.advance().clone(); // import

        let mut specifiers = Vec::new();

        if self.match_token(TokenKind::LBrace) {
            // import { a, b as c } from "m";
            self.parse_named_import_specifiers(&mut specifiers)?;
        } else if self.check(TokenKind::Identifier) {
            // import d from "m";  /  import d, { a } from "m";
            let local = self.advance().lexeme.clone();
            specifiers.push(ImportSpecifier::Default { local });

            if self.match_token(TokenKind::Comma) {
                self.consume(TokenKind::LBrace, "Expected '{' after default import")?;
                self.parse_named_import_specifiers(&mut specifiers)?;
            }
        } else if self.match_token(TokenKind::Star) {
            // import * as ns from "m";
            self.consume(TokenKind::As, "Expected 'as' after '*'")?;
            let local = self
                .consume(TokenKind::Identifier, "Expected namespace name")?
                .lexeme;
            specifiers.push(ImportSpecifier::Namespace { local });
        } else {
            return Err(self.error_at_current("Expected import specifiers"));
        }

        self.consume(TokenKind::From, "Expected 'from' after import specifiers")?;
        let source = self
            .consume(TokenKind::StringLiteral, "Expected module source")?
            .lexeme;
        self.consume(TokenKind::Semicolon, "Expected ';' after import statement")?;

        Ok(ImportStmt {
            specifiers,
            source,
            span: keyword.span,
        })
    }

    /// Parse `a, b as c` up to and including the closing `}`.
    fn parse_named_import_specifiers(
        &mut self,
        specifiers: &mut Vec<ImportSpecifier>,
    ) -> ParseResult<()> {
        if !self.check(TokenKind::RBrace) {
            loop {
                let imported = self
                    .consume(TokenKind::Identifier, "Expected imported name")?
                    .lexeme;
                let local = if self.match_token(TokenKind::As) {
                    self.consume(TokenKind::Identifier, "Expected local name")?
                        .lexeme
                } else {
                    imported.clone()
                };
                specifiers.push(ImportSpecifier::Named { imported, local });

                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RBrace, "Expected '}' after import specifiers")?;
        Ok(())
    }

    fn parse_export_statement(&mut self) -> ParseResult<ExportStmt> {
        let keyword = self.advance().clone(); // export

        // `default` is not a reserved word in this language; it arrives as an
        // identifier token.
        if self.check(TokenKind::Identifier) && self.peek().lexeme == "default" {
            self.advance();
            let expression = self.parse_expression()?;
            self.consume(TokenKind::Semicolon, "Expected ';' after export default")?;
            return Ok(ExportStmt {
                kind: ExportKind::Default { expression },
                span: keyword.span,
            });
        }

        if self.match_token(TokenKind::LBrace) {
            let mut specifiers = Vec::new();
            if !self.check(TokenKind::RBrace) {
                loop {
                    let local = self
                        .consume(TokenKind::Identifier, "Expected exported name")?
                        .lexeme;
                    let exported = if self.match_token(TokenKind::As) {
                        self.consume(TokenKind::Identifier, "Expected alias")?.lexeme
                    } else {
                        local.clone()
                    };
                    specifiers.push(ExportSpecifier { local, exported });

                    if !self.match_token(TokenKind::Comma) {
                        break;
                    }
                }
            }
            self.consume(TokenKind::RBrace, "Expected '}' after export specifiers")?;

            let source = if self.match_token(TokenKind::From) {
                Some(
                    self.consume(TokenKind::StringLiteral, "Expected module source")?
                        .lexeme,
                )
            } else {
                None
            };

            self.consume(TokenKind::Semicolon, "Expected ';' after export statement")?;

            return Ok(ExportStmt {
                kind: ExportKind::Named { specifiers, source },
                span: keyword.span,
            });
        }

        // export <declaration>
        let declaration = Box::new(self.parse_statement()?);
        Ok(ExportStmt {
            kind: ExportKind::Declaration { declaration },
            span: keyword.span,
        })
    }

    fn parse_block_statement(&mut self) -> ParseResult<BlockStmt> {
        let open = self.consume(TokenKind::LBrace, "Expected '{' before block")?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.consume(TokenKind::RBrace, "Expected '}' after block")?;

        Ok(BlockStmt {
            statements,
            span: open.span,
        })
    }

    fn parse_expression_statement(&mut self) -> ParseResult<ExpressionStmt> {
        let span = self.peek().span;
        let expression = self.parse_expression()?;
        self.consume(TokenKind::Semicolon, "Expected ';' after expression")?;

        Ok(ExpressionStmt { expression, span })
    }

    // ============ TYPE ANNOTATIONS ============

    fn parse_type_annotation(&mut self) -> ParseResult<TypeAnnotation> {
        let first = self.parse_primary_type()?;

        // Union and intersection are suffix loops on a base type, so
        // `number | string` parses anywhere a type annotation does.
        if self.check(TokenKind::Pipe) {
            let span = first.span();
            let mut types = vec![first];
            while self.match_token(TokenKind::Pipe) {
                types.push(self.parse_primary_type()?);
            }
            return Ok(TypeAnnotation::Union(UnionType { types, span }));
        }

        if self.check(TokenKind::Amp) {
            let span = first.span();
            let mut types = vec![first];
            while self.match_token(TokenKind::Amp) {
                types.push(self.parse_primary_type()?);
            }
            return Ok(TypeAnnotation::Intersection(IntersectionType {
                types,
                span,
            }));
        }

        Ok(first)
    }

    fn parse_primary_type(&mut self) -> ParseResult<TypeAnnotation> {
        let token = self.peek().clone();

        if self.match_type_name() {
            let name = token.lexeme.clone();

            // Array<T> is the keyword-style array type
            if name == "Array" && self.match_token(TokenKind::Lt) {
                let element = self.parse_type_annotation()?;
                self.consume(TokenKind::Gt, "Expected '>' after array element type")?;
                return Ok(TypeAnnotation::Array(ArrayType {
                    element: Box::new(element),
                    span: token.span,
                }));
            }

            // T[]
            if self.match_token(TokenKind::LBracket) {
                self.consume(TokenKind::RBracket, "Expected ']' after '['")?;
                return Ok(TypeAnnotation::Array(ArrayType {
                    element: Box::new(TypeAnnotation::named(&name, token.span)),
                    span: token.span,
                }));
            }

            // Generic<T, ...>
            if self.match_token(TokenKind::Lt) {
                let mut arguments = vec![self.parse_type_annotation()?];
                while self.match_token(TokenKind::Comma) {
                    arguments.push(self.parse_type_annotation()?);
                }
                self.consume(TokenKind::Gt, "Expected '>' after generic type arguments")?;
                return Ok(TypeAnnotation::Generic(GenericType {
                    base: Box::new(TypeAnnotation::named(&name, token.span)),
                    arguments,
                    span: token.span,
                }));
            }

            return Ok(TypeAnnotation::named(&name, token.span));
        }

        if self.check(TokenKind::LParen) {
            // `(params) => T` is a function type; anything else parenthesized
            // is a grouped type (typically a union).
            if self.function_type_ahead() {
                self.advance(); // (
                let params = self.parse_parameter_list()?;
                self.consume(TokenKind::RParen, "Expected ')' after function parameters")?;
                self.consume(TokenKind::Arrow, "Expected '=>' after function parameters")?;
                let return_type = Box::new(self.parse_type_annotation()?);
                return Ok(TypeAnnotation::Function(FunctionType {
                    params,
                    return_type,
                    span: token.span,
                }));
            }

            self.advance(); // (
            let inner = self.parse_type_annotation()?;
            self.consume(TokenKind::RParen, "Expected ')' after type")?;
            return Ok(inner);
        }

        if self.match_token(TokenKind::LBrace) {
            // Object type: { name: T; other?: U; }
            let mut properties = Vec::new();
            while !self.check(TokenKind::RBrace) && !self.is_at_end() {
                let prop_span = self.peek().span;
                let name = self
                    .consume(TokenKind::Identifier, "Expected property name")?
                    .lexeme;
                let optional = self.match_token(TokenKind::Question);
                self.consume(TokenKind::Colon, "Expected ':' after property name")?;
                let type_annotation = self.parse_type_annotation()?;

                properties.push(ObjectTypeProperty {
                    name,
                    type_annotation,
                    optional,
                    span: prop_span,
                });

                if !self.check(TokenKind::RBrace) {
                    self.consume(
                        TokenKind::Semicolon,
                        "Expected ';' or '}' after property definition",
                    )?;
                }
            }
            self.consume(TokenKind::RBrace, "Expected '}' after object type")?;

            return Ok(TypeAnnotation::Object(ObjectType {
                properties,
                span: token.span,
            }));
        }

        Err(self.error_at_current("Expected type annotation"))
    }

    /// Consume the next token if it can name a type (an identifier or one of
    /// the builtin type keywords).
    fn match_type_name(&mut self) -> bool {
        if matches!(
            self.peek().kind,
            TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::Boolean
                | TokenKind::Any
                | TokenKind::Void
        ) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// With the cursor on `(`, decide whether the matching `)` is followed by
    /// `=>`, which makes this a function type.
    fn function_type_ahead(&self) -> bool {
        let mut depth = 0usize;
        let mut i = self.current;
        while let Some(token) = self.tokens.get(i) {
            match token.kind {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return self
                            .tokens
                            .get(i + 1)
                            .is_some_and(|t| t.kind == TokenKind::Arrow);
                    }
                }
                TokenKind::Eof => return false,
                _ => {}
            }
            i += 1;
        }
        false
    }

    // ============ EXPRESSIONS ============

    fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> ParseResult<Expression> {
        let expr = self.parse_conditional()?;

        let operator = match self.peek().kind {
            TokenKind::Eq => Some(AssignOp::Assign),
            TokenKind::PlusEq => Some(AssignOp::AddAssign),
            TokenKind::MinusEq => Some(AssignOp::SubAssign),
            TokenKind::StarEq => Some(AssignOp::MulAssign),
            TokenKind::SlashEq => Some(AssignOp::DivAssign),
            TokenKind::PercentEq => Some(AssignOp::ModAssign),
            _ => None,
        };

        if let Some(operator) = operator {
            let op_span = self.advance().span;
            let value = self.parse_assignment()?;

            if matches!(
                expr,
                Expression::Identifier(_) | Expression::Member(_) | Expression::Index(_)
            ) {
                return Ok(Expression::Assign(AssignExpr {
                    operator,
                    target: Box::new(expr),
                    value: Box::new(value),
                    span: op_span,
                }));
            }

            return Err(self.error_at(op_span, "Invalid assignment target"));
        }

        Ok(expr)
    }

    fn parse_conditional(&mut self) -> ParseResult<Expression> {
        let expr = self.parse_logical_or()?;

        if self.match_token(TokenKind::Question) {
            let then_expr = self.parse_expression()?;
            self.consume(TokenKind::Colon, "Expected ':' in conditional expression")?;
            // Right-associative: the else branch recurses into conditional.
            let else_expr = self.parse_conditional()?;

            let span = expr.span();
            return Ok(Expression::Conditional(ConditionalExpr {
                condition: Box::new(expr),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
                span,
            }));
        }

        Ok(expr)
    }

    fn parse_logical_or(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_logical_and()?;
        while self.match_token(TokenKind::PipePipe) {
            let span = self.previous().span;
            let right = self.parse_logical_and()?;
            expr = binary(BinaryOp::Or, expr, right, span);
        }
        Ok(expr)
    }

    fn parse_logical_and(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_equality()?;
        while self.match_token(TokenKind::AmpAmp) {
            let span = self.previous().span;
            let right = self.parse_equality()?;
            expr = binary(BinaryOp::And, expr, right, span);
        }
        Ok(expr)
    }

    fn parse_equality(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_comparison()?;
        loop {
            let operator = match self.peek().kind {
                TokenKind::EqEq => BinaryOp::Eq,
                TokenKind::BangEq => BinaryOp::NotEq,
                TokenKind::EqEqEq => BinaryOp::StrictEq,
                TokenKind::BangEqEq => BinaryOp::StrictNotEq,
                _ => break,
            };
            let span = self.advance().span;
            let right = self.parse_comparison()?;
            expr = binary(operator, expr, right, span);
        }
        Ok(expr)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_bitwise_or()?;
        loop {
            let operator = match self.peek().kind {
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtEq => BinaryOp::GtEq,
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtEq => BinaryOp::LtEq,
                _ => break,
            };
            let span = self.advance().span;
            let right = self.parse_bitwise_or()?;
            expr = binary(operator, expr, right, span);
        }
        Ok(expr)
    }

    fn parse_bitwise_or(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_bitwise_xor()?;
        while self.match_token(TokenKind::Pipe) {
            let span = self.previous().span;
            let right = self.parse_bitwise_xor()?;
            expr = binary(BinaryOp::BitOr, expr, right, span);
        }
        Ok(expr)
    }

    fn parse_bitwise_xor(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_bitwise_and()?;
        while self.match_token(TokenKind::Caret) {
            let span = self.previous().span;
            let right = self.parse_bitwise_and()?;
            expr = binary(BinaryOp::BitXor, expr, right, span);
        }
        Ok(expr)
    }

    fn parse_bitwise_and(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_shift()?;
        while self.match_token(TokenKind::Amp) {
            let span = self.previous().span;
            let right = self.parse_shift()?;
            expr = binary(BinaryOp::BitAnd, expr, right, span);
        }
        Ok(expr)
    }

    fn parse_shift(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_additive()?;
        loop {
            let operator = match self.peek().kind {
                TokenKind::LtLt => BinaryOp::LShift,
                TokenKind::GtGt => BinaryOp::RShift,
                TokenKind::GtGtGt => BinaryOp::URShift,
                _ => break,
            };
            let span = self.advance().span;
            let right = self.parse_additive()?;
            expr = binary(operator, expr, right, span);
        }
        Ok(expr)
    }

    fn parse_additive(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_multiplicative()?;
        loop {
            let operator = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            let span = self.advance().span;
            let right = self.parse_multiplicative()?;
            expr = binary(operator, expr, right, span);
        }
        Ok(expr)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_unary()?;
        loop {
            let operator = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Mod,
                TokenKind::StarStar => BinaryOp::Exp,
                _ => break,
            };
            let span = self.advance().span;
            let right = self.parse_unary()?;
            expr = binary(operator, expr, right, span);
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> ParseResult<Expression> {
        let operator = match self.peek().kind {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            TokenKind::Plus => Some(UnaryOp::Plus),
            TokenKind::PlusPlus => Some(UnaryOp::Increment),
            TokenKind::MinusMinus => Some(UnaryOp::Decrement),
            TokenKind::Typeof => Some(UnaryOp::Typeof),
            _ => None,
        };

        if let Some(operator) = operator {
            let span = self.advance().span;
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expression::Unary(UnaryExpr {
                operator,
                operand,
                prefix: true,
                span,
            }));
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> ParseResult<Expression> {
        let expr = self.parse_call()?;

        let operator = match self.peek().kind {
            TokenKind::PlusPlus => Some(UnaryOp::Increment),
            TokenKind::MinusMinus => Some(UnaryOp::Decrement),
            _ => None,
        };

        if let Some(operator) = operator {
            let span = self.advance().span;
            return Ok(Expression::Unary(UnaryExpr {
                operator,
                operand: Box::new(expr),
                prefix: false,
                span,
            }));
        }

        Ok(expr)
    }

    fn parse_call(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.match_token(TokenKind::LParen) {
                expr = self.finish_call(expr)?;
            } else if self.match_token(TokenKind::Dot) || self.match_token(TokenKind::QuestionDot)
            {
                let op = self.previous().clone();
                let property = self
                    .consume(TokenKind::Identifier, "Expected property name after '.'")?
                    .lexeme;
                expr = Expression::Member(MemberExpr {
                    object: Box::new(expr),
                    property,
                    optional: op.kind == TokenKind::QuestionDot,
                    span: op.span,
                });
            } else if self.match_token(TokenKind::LBracket) {
                let span = self.previous().span;
                let index = self.parse_expression()?;
                self.consume(TokenKind::RBracket, "Expected ']' after index")?;
                expr = Expression::Index(IndexExpr {
                    object: Box::new(expr),
                    index: Box::new(index),
                    span,
                });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expression) -> ParseResult<Expression> {
        let span = self.previous().span; // the '('
        let arguments = self.parse_argument_list()?;

        Ok(Expression::Call(CallExpr {
            callee: Box::new(callee),
            arguments,
            span,
        }))
    }

    /// Parse `arg, arg, ...` up to and including the closing `)`.
    fn parse_argument_list(&mut self) -> ParseResult<Vec<Expression>> {
        let mut arguments = Vec::new();

        if !self.check(TokenKind::RParen) {
            loop {
                if arguments.len() >= 255 {
                    let span = self.peek().span;
                    self.diagnostics.report(
                        span.line,
                        span.column,
                        "Cannot have more than 255 arguments",
                    );
                }
                arguments.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }

        self.consume(TokenKind::RParen, "Expected ')' after arguments")?;
        Ok(arguments)
    }

    fn parse_primary(&mut self) -> ParseResult<Expression> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::BooleanLiteral => {
                self.advance();
                Ok(Expression::Literal(LiteralExpr {
                    value: LiteralValue::Boolean(token.lexeme == "true"),
                    span: token.span,
                }))
            }
            TokenKind::NullLiteral => {
                self.advance();
                Ok(Expression::Literal(LiteralExpr {
                    value: LiteralValue::Null,
                    span: token.span,
                }))
            }
            TokenKind::UndefinedLiteral => {
                self.advance();
                Ok(Expression::Literal(LiteralExpr {
                    value: LiteralValue::Undefined,
                    span: token.span,
                }))
            }
            TokenKind::NumberLiteral => {
                self.advance();
                let value = token.lexeme.parse().unwrap_or(f64::NAN);
                Ok(Expression::Literal(LiteralExpr {
                    value: LiteralValue::Number(value),
                    span: token.span,
                }))
            }
            TokenKind::StringLiteral => {
                self.advance();
                Ok(Expression::Literal(LiteralExpr {
                    value: LiteralValue::String(token.lexeme),
                    span: token.span,
                }))
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(Expression::Identifier(IdentifierExpr {
                    name: token.lexeme,
                    span: token.span,
                }))
            }
            TokenKind::This => {
                self.advance();
                Ok(Expression::This(token.span))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.consume(TokenKind::RParen, "Expected ')' after expression")?;
                Ok(expr)
            }
            TokenKind::New => {
                self.advance();
                let callee = self.parse_new_callee()?;
                self.consume(TokenKind::LParen, "Expected '(' after class name")?;
                let arguments = self.parse_argument_list()?;
                Ok(Expression::New(NewExpr {
                    callee: Box::new(callee),
                    arguments,
                    span: token.span,
                }))
            }
            TokenKind::Function => {
                self.advance();
                let name = if self.check(TokenKind::Identifier) {
                    Some(self.advance().lexeme.clone())
                } else {
                    None
                };

                self.consume(TokenKind::LParen, "Expected '(' after function name")?;
                let params = self.parse_parameter_list()?;
                self.consume(TokenKind::RParen, "Expected ')' after parameters")?;

                let return_type = if self.match_token(TokenKind::Colon) {
                    Some(self.parse_type_annotation()?)
                } else {
                    None
                };

                let body = self.parse_block_statement()?;

                Ok(Expression::Function(FunctionExpr {
                    name,
                    params,
                    return_type,
                    body,
                    span: token.span,
                }))
            }
            TokenKind::LBrace => {
                self.advance();
                let mut properties = Vec::new();

                if !self.check(TokenKind::RBrace) {
                    loop {
                        let key_token = self.peek().clone();
                        let key = match key_token.kind {
                            TokenKind::Identifier | TokenKind::StringLiteral => {
                                self.advance().lexeme.clone()
                            }
                            _ => return Err(self.error_at_current("Expected property name")),
                        };

                        // Shorthand property: { x } means { x: x }
                        let value = if self.check(TokenKind::Comma) || self.check(TokenKind::RBrace)
                        {
                            Expression::Identifier(IdentifierExpr {
                                name: key.clone(),
                                span: key_token.span,
                            })
                        } else {
                            self.consume(TokenKind::Colon, "Expected ':' after property name")?;
                            self.parse_expression()?
                        };

                        properties.push(ObjectProperty {
                            key,
                            value,
                            span: key_token.span,
                        });

                        if !self.match_token(TokenKind::Comma) {
                            break;
                        }
                    }
                }

                self.consume(TokenKind::RBrace, "Expected '}' after object literal")?;

                Ok(Expression::Object(ObjectExpr {
                    properties,
                    span: token.span,
                }))
            }
            TokenKind::LBracket => {
                self.advance();
                let mut elements = Vec::new();

                if !self.check(TokenKind::RBracket) {
                    loop {
                        // Tolerate a trailing comma
                        if self.check(TokenKind::RBracket) {
                            break;
                        }
                        elements.push(self.parse_expression()?);
                        if !self.match_token(TokenKind::Comma) {
                            break;
                        }
                    }
                }

                self.consume(TokenKind::RBracket, "Expected ']' after array literal")?;

                Ok(Expression::Array(ArrayExpr {
                    elements,
                    span: token.span,
                }))
            }
            _ => Err(self.error_at_current("Expected expression")),
        }
    }

    /// Callee of a `new` expression: a primary plus member/index chains, but
    /// no call parentheses; those belong to the mandatory argument list.
    fn parse_new_callee(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.match_token(TokenKind::Dot) || self.match_token(TokenKind::QuestionDot) {
                let op = self.previous().clone();
                let property = self
                    .consume(TokenKind::Identifier, "Expected property name after '.'")?
                    .lexeme;
                expr = Expression::Member(MemberExpr {
                    object: Box::new(expr),
                    property,
                    optional: op.kind == TokenKind::QuestionDot,
                    span: op.span,
                });
            } else if self.match_token(TokenKind::LBracket) {
                let span = self.previous().span;
                let index = self.parse_expression()?;
                self.consume(TokenKind::RBracket, "Expected ']' after index")?;
                expr = Expression::Index(IndexExpr {
                    object: Box::new(expr),
                    index: Box::new(index),
                    span,
                });
            } else {
                break;
            }
        }

        Ok(expr)
    }

    // ============ HELPERS ============

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn peek_at(&self, offset: usize) -> &Token {
        // Clamped to the trailing EOF token.
        let index = (self.current + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.error_at_current(message))
        }
    }

    fn error_at_current(&mut self, message: impl Into<String>) -> ParseInterrupt {
        let span = self.peek().span;
        self.error_at(span, message)
    }

    fn error_at(&mut self, span: Span, message: impl Into<String>) -> ParseInterrupt {
        self.diagnostics.report(span.line, span.column, message);
        ParseInterrupt
    }

    /// Panic-mode recovery: advance until just past a `;` or to a token that
    /// can begin a statement. Never consumes EOF.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }

            match self.peek().kind {
                TokenKind::Class
                | TokenKind::Function
                | TokenKind::Let
                | TokenKind::Const
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Return
                | TokenKind::Import
                | TokenKind::Export => return,
                _ => {}
            }

            self.advance();
        }
    }
}

fn binary(operator: BinaryOp, left: Expression, right: Expression, span: Span) -> Expression {
    Expression::Binary(BinaryExpr {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn parse(source: &str) -> Program {
        let mut diagnostics = Diagnostics::new(source);
        let tokens = Lexer::new(source, &mut diagnostics).tokenize();
        let program = Parser::new(tokens, &mut diagnostics).parse();
        assert!(
            !diagnostics.has_errors(),
            "unexpected diagnostics: {:?}",
            diagnostics.errors()
        );
        program
    }

    fn parse_with_errors(source: &str) -> (Program, Vec<crate::diagnostics::Diagnostic>) {
        let mut diagnostics = Diagnostics::new(source);
        let tokens = Lexer::new(source, &mut diagnostics).tokenize();
        let program = Parser::new(tokens, &mut diagnostics).parse();
        (program, diagnostics.into_errors())
    }

    #[test]
    fn test_empty_program() {
        let program = parse("");
        assert!(program.statements.is_empty());
        assert!(!program.is_module);
    }

    #[test]
    fn test_variable_declaration() {
        let program = parse("let x: number = 1;");
        assert_eq!(program.statements.len(), 1);
        let Statement::VarDecl(decl) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        assert_eq!(decl.name, "x");
        assert!(!decl.is_const);
        assert!(decl.type_annotation.is_some());
        assert!(decl.initializer.is_some());
    }

    #[test]
    fn test_const_declaration() {
        let program = parse("const y = \"hi\";");
        let Statement::VarDecl(decl) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        assert!(decl.is_const);
        assert!(decl.type_annotation.is_none());
    }

    #[test]
    fn test_multiplication_binds_tighter_than_addition() {
        let program = parse("x = 1 + 2 * 3;");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected expression statement");
        };
        let Expression::Assign(assign) = &stmt.expression else {
            panic!("expected assignment");
        };
        let Expression::Binary(add) = assign.value.as_ref() else {
            panic!("expected binary expression");
        };
        assert_eq!(add.operator, BinaryOp::Add);
        let Expression::Binary(mul) = add.right.as_ref() else {
            panic!("expected nested multiplication");
        };
        assert_eq!(mul.operator, BinaryOp::Mul);
    }

    #[test]
    fn test_binary_left_associativity() {
        // (1 - 2) - 3
        let program = parse("a = 1 - 2 - 3;");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected expression statement");
        };
        let Expression::Assign(assign) = &stmt.expression else {
            panic!("expected assignment");
        };
        let Expression::Binary(outer) = assign.value.as_ref() else {
            panic!("expected binary expression");
        };
        assert_eq!(outer.operator, BinaryOp::Sub);
        assert!(matches!(outer.left.as_ref(), Expression::Binary(_)));
        assert!(matches!(outer.right.as_ref(), Expression::Literal(_)));
    }

    #[test]
    fn test_conditional_right_associativity() {
        let program = parse("x = a ? b : c ? d : e;");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected expression statement");
        };
        let Expression::Assign(assign) = &stmt.expression else {
            panic!("expected assignment");
        };
        let Expression::Conditional(outer) = assign.value.as_ref() else {
            panic!("expected conditional");
        };
        assert!(matches!(
            outer.else_expr.as_ref(),
            Expression::Conditional(_)
        ));
    }

    #[test]
    fn test_assignment_right_associativity() {
        let program = parse("a = b = 1;");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected expression statement");
        };
        let Expression::Assign(outer) = &stmt.expression else {
            panic!("expected assignment");
        };
        assert!(matches!(outer.value.as_ref(), Expression::Assign(_)));
    }

    #[test]
    fn test_compound_assignment() {
        let program = parse("a += 2;");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected expression statement");
        };
        let Expression::Assign(assign) = &stmt.expression else {
            panic!("expected assignment");
        };
        assert_eq!(assign.operator, AssignOp::AddAssign);
    }

    #[test]
    fn test_invalid_assignment_target() {
        let (_, errors) = parse_with_errors("1 = 2;");
        assert!(errors.iter().any(|e| e.message == "Invalid assignment target"));
    }

    #[test]
    fn test_recovery_after_bad_statement() {
        let (program, errors) = parse_with_errors("let = 1; let y = 2;");
        assert!(!errors.is_empty());
        // The second declaration survives panic-mode recovery.
        assert!(program
            .statements
            .iter()
            .any(|s| matches!(s, Statement::VarDecl(d) if d.name == "y")));
    }

    #[test]
    fn test_function_declaration() {
        let program = parse("function add(a: number, b: number): number { return a + b; }");
        let Statement::FunctionDecl(func) = &program.statements[0] else {
            panic!("expected function declaration");
        };
        assert_eq!(func.name, "add");
        assert_eq!(func.params.len(), 2);
        assert!(func.return_type.is_some());
        assert_eq!(func.body.statements.len(), 1);
    }

    #[test]
    fn test_class_declaration() {
        let program = parse(
            "class Circle extends Shape implements Drawable { \
                private radius: number = 1; \
                static count: number = 0; \
                constructor(r: number) { this.radius = r; } \
                area(): number { return 3.14 * this.radius * this.radius; } \
             }",
        );
        let Statement::ClassDecl(class) = &program.statements[0] else {
            panic!("expected class declaration");
        };
        assert_eq!(class.name, "Circle");
        assert_eq!(class.super_class.as_deref(), Some("Shape"));
        assert_eq!(class.interfaces, vec!["Drawable".to_string()]);
        assert_eq!(class.members.len(), 4);

        let ClassMember::Property(radius) = &class.members[0] else {
            panic!("expected property");
        };
        assert_eq!(radius.access, AccessModifier::Private);
        assert!(!radius.is_static);

        let ClassMember::Property(count) = &class.members[1] else {
            panic!("expected property");
        };
        assert!(count.is_static);

        let ClassMember::Method(ctor) = &class.members[2] else {
            panic!("expected method");
        };
        assert_eq!(ctor.name, "constructor");

        let ClassMember::Method(area) = &class.members[3] else {
            panic!("expected method");
        };
        assert_eq!(area.name, "area");
        assert_eq!(area.access, AccessModifier::Public);
    }

    #[test]
    fn test_class_modifier_order_is_free() {
        let program = parse("class A { static private x: number = 1; readonly public y: number = 2; }");
        let Statement::ClassDecl(class) = &program.statements[0] else {
            panic!("expected class declaration");
        };
        let ClassMember::Property(x) = &class.members[0] else {
            panic!("expected property");
        };
        assert!(x.is_static);
        assert_eq!(x.access, AccessModifier::Private);
        let ClassMember::Property(y) = &class.members[1] else {
            panic!("expected property");
        };
        assert!(y.is_readonly);
    }

    #[test]
    fn test_interface_declaration() {
        let program = parse(
            "interface Shape { readonly name: string; area(): number; scale(factor: number): void; }",
        );
        let Statement::InterfaceDecl(interface) = &program.statements[0] else {
            panic!("expected interface declaration");
        };
        assert_eq!(interface.name, "Shape");
        assert_eq!(interface.members.len(), 3);

        let InterfaceMember::Property(name) = &interface.members[0] else {
            panic!("expected property signature");
        };
        assert!(name.is_readonly);

        let InterfaceMember::Method(scale) = &interface.members[2] else {
            panic!("expected method signature");
        };
        assert_eq!(scale.params.len(), 1);
    }

    #[test]
    fn test_if_else_chain() {
        let program = parse("if (a) { f(); } else if (b) { g(); } else { h(); }");
        let Statement::If(stmt) = &program.statements[0] else {
            panic!("expected if statement");
        };
        assert!(matches!(
            stmt.else_branch.as_deref(),
            Some(Statement::If(_))
        ));
    }

    #[test]
    fn test_for_statement() {
        let program = parse("for (let i = 0; i < 5; i++) { console.log(i); }");
        let Statement::For(stmt) = &program.statements[0] else {
            panic!("expected for statement");
        };
        assert!(matches!(
            stmt.initializer.as_deref(),
            Some(Statement::VarDecl(_))
        ));
        assert!(stmt.condition.is_some());
        assert!(stmt.increment.is_some());
    }

    #[test]
    fn test_for_with_empty_clauses() {
        let program = parse("for (;;) { tick(); }");
        let Statement::For(stmt) = &program.statements[0] else {
            panic!("expected for statement");
        };
        assert!(stmt.initializer.is_none());
        assert!(stmt.condition.is_none());
        assert!(stmt.increment.is_none());
    }

    #[test]
    fn test_import_forms() {
        let named = parse("import { a, b as c } from \"m\";");
        let Statement::Import(import) = &named.statements[0] else {
            panic!("expected import");
        };
        assert_eq!(import.source, "m");
        assert_eq!(import.specifiers.len(), 2);
        assert!(matches!(
            &import.specifiers[1],
            ImportSpecifier::Named { imported, local } if imported == "b" && local == "c"
        ));

        let default = parse("import d from \"m\";");
        let Statement::Import(import) = &default.statements[0] else {
            panic!("expected import");
        };
        assert!(matches!(&import.specifiers[0], ImportSpecifier::Default { local } if local == "d"));

        let mixed = parse("import d, { a } from \"m\";");
        let Statement::Import(import) = &mixed.statements[0] else {
            panic!("expected import");
        };
        assert_eq!(import.specifiers.len(), 2);

        let namespace = parse("import * as ns from \"m\";");
        let Statement::Import(import) = &namespace.statements[0] else {
            panic!("expected import");
        };
        assert!(
            matches!(&import.specifiers[0], ImportSpecifier::Namespace { local } if local == "ns")
        );
    }

    #[test]
    fn test_export_forms() {
        let default = parse("export default f;");
        let Statement::Export(export) = &default.statements[0] else {
            panic!("expected export");
        };
        assert!(matches!(export.kind, ExportKind::Default { .. }));

        let named = parse("export { a, b as c } from \"m\";");
        let Statement::Export(export) = &named.statements[0] else {
            panic!("expected export");
        };
        let ExportKind::Named { specifiers, source } = &export.kind else {
            panic!("expected named export");
        };
        assert_eq!(specifiers.len(), 2);
        assert_eq!(source.as_deref(), Some("m"));

        let decl = parse("export function f() { return 1; }");
        let Statement::Export(export) = &decl.statements[0] else {
            panic!("expected export");
        };
        assert!(matches!(export.kind, ExportKind::Declaration { .. }));
    }

    #[test]
    fn test_is_module_flag() {
        assert!(parse("import d from \"m\";").is_module);
        assert!(parse("export default 1;").is_module);
        assert!(!parse("let x = 1;").is_module);
    }

    #[test]
    fn test_member_and_index_chains() {
        let program = parse("a.b?.c[0]();");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected expression statement");
        };
        let Expression::Call(call) = &stmt.expression else {
            panic!("expected call");
        };
        let Expression::Index(index) = call.callee.as_ref() else {
            panic!("expected index");
        };
        let Expression::Member(optional) = index.object.as_ref() else {
            panic!("expected member");
        };
        assert!(optional.optional);
    }

    #[test]
    fn test_new_expression() {
        let program = parse("let d = new ns.Date(1, 2);");
        let Statement::VarDecl(decl) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        let Some(Expression::New(new_expr)) = &decl.initializer else {
            panic!("expected new expression");
        };
        assert!(matches!(new_expr.callee.as_ref(), Expression::Member(_)));
        assert_eq!(new_expr.arguments.len(), 2);
    }

    #[test]
    fn test_new_chained_call() {
        let program = parse("new Date().getTime();");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected expression statement");
        };
        let Expression::Call(call) = &stmt.expression else {
            panic!("expected call");
        };
        let Expression::Member(member) = call.callee.as_ref() else {
            panic!("expected member");
        };
        assert!(matches!(member.object.as_ref(), Expression::New(_)));
    }

    #[test]
    fn test_prefix_and_postfix() {
        let program = parse("x = ++a;");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected expression statement");
        };
        let Expression::Assign(assign) = &stmt.expression else {
            panic!("expected assignment");
        };
        let Expression::Unary(unary) = assign.value.as_ref() else {
            panic!("expected unary");
        };
        assert!(unary.prefix);

        let program = parse("a--;");
        let Statement::Expression(stmt) = &program.statements[0] else {
            panic!("expected expression statement");
        };
        let Expression::Unary(unary) = &stmt.expression else {
            panic!("expected unary");
        };
        assert!(!unary.prefix);
        assert_eq!(unary.operator, UnaryOp::Decrement);
    }

    #[test]
    fn test_object_literal_with_shorthand() {
        let program = parse("let o = { a: 1, b, \"c\": 3 };");
        let Statement::VarDecl(decl) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        let Some(Expression::Object(object)) = &decl.initializer else {
            panic!("expected object literal");
        };
        assert_eq!(object.properties.len(), 3);
        assert!(matches!(
            &object.properties[1].value,
            Expression::Identifier(id) if id.name == "b"
        ));
    }

    #[test]
    fn test_array_literal_trailing_comma() {
        let program = parse("let a = [1, 2, 3, ];");
        let Statement::VarDecl(decl) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        let Some(Expression::Array(array)) = &decl.initializer else {
            panic!("expected array literal");
        };
        assert_eq!(array.elements.len(), 3);
    }

    #[test]
    fn test_function_expression() {
        let program = parse("let f = function named(a: number): number { return a; };");
        let Statement::VarDecl(decl) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        let Some(Expression::Function(func)) = &decl.initializer else {
            panic!("expected function expression");
        };
        assert_eq!(func.name.as_deref(), Some("named"));
        assert_eq!(func.params.len(), 1);
    }

    #[test]
    fn test_type_annotation_array_forms() {
        let program = parse("let a: number[] = []; let b: Array<string> = [];");
        let Statement::VarDecl(a) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        assert!(matches!(
            a.type_annotation.as_ref().unwrap(),
            TypeAnnotation::Array(_)
        ));
        let Statement::VarDecl(b) = &program.statements[1] else {
            panic!("expected variable declaration");
        };
        assert!(matches!(
            b.type_annotation.as_ref().unwrap(),
            TypeAnnotation::Array(_)
        ));
    }

    #[test]
    fn test_type_annotation_union_suffix() {
        let program = parse("let u: number | string | boolean = 1;");
        let Statement::VarDecl(decl) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        let Some(TypeAnnotation::Union(union)) = &decl.type_annotation else {
            panic!("expected union type");
        };
        assert_eq!(union.types.len(), 3);
    }

    #[test]
    fn test_type_annotation_intersection_suffix() {
        let program = parse("let i: A & B = x;");
        let Statement::VarDecl(decl) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        assert!(matches!(
            decl.type_annotation.as_ref().unwrap(),
            TypeAnnotation::Intersection(_)
        ));
    }

    #[test]
    fn test_type_annotation_parenthesized_union() {
        let program = parse("let u: (number | string) = 1;");
        let Statement::VarDecl(decl) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        assert!(matches!(
            decl.type_annotation.as_ref().unwrap(),
            TypeAnnotation::Union(_)
        ));
    }

    #[test]
    fn test_type_annotation_function_type() {
        let program = parse("let f: (a: number, b: number) => number = add;");
        let Statement::VarDecl(decl) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        let Some(TypeAnnotation::Function(func)) = &decl.type_annotation else {
            panic!("expected function type");
        };
        assert_eq!(func.params.len(), 2);
    }

    #[test]
    fn test_type_annotation_object_type() {
        let program = parse("let p: { x: number; y?: number } = o;");
        let Statement::VarDecl(decl) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        let Some(TypeAnnotation::Object(object)) = &decl.type_annotation else {
            panic!("expected object type");
        };
        assert_eq!(object.properties.len(), 2);
        assert!(!object.properties[0].optional);
        assert!(object.properties[1].optional);
    }

    #[test]
    fn test_type_annotation_generic() {
        let program = parse("let m: Map<string, number> = x;");
        let Statement::VarDecl(decl) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        let Some(TypeAnnotation::Generic(generic)) = &decl.type_annotation else {
            panic!("expected generic type");
        };
        assert_eq!(generic.arguments.len(), 2);
    }

    #[test]
    fn test_empty_statement() {
        let program = parse(";;");
        assert_eq!(program.statements.len(), 2);
        assert!(matches!(program.statements[0], Statement::Empty(_)));
    }

    #[test]
    fn test_typeof_expression() {
        let program = parse("let t = typeof x;");
        let Statement::VarDecl(decl) = &program.statements[0] else {
            panic!("expected variable declaration");
        };
        let Some(Expression::Unary(unary)) = &decl.initializer else {
            panic!("expected unary");
        };
        assert_eq!(unary.operator, UnaryOp::Typeof);
    }

    #[test]
    fn test_class_member_recovery() {
        // One bad member does not take the rest of the class with it.
        let (program, errors) = parse_with_errors("class A { : ; good(): void { return; } }");
        assert!(!errors.is_empty());
        let Statement::ClassDecl(class) = &program.statements[0] else {
            panic!("expected class declaration");
        };
        assert!(class
            .members
            .iter()
            .any(|m| matches!(m, ClassMember::Method(method) if method.name == "good")));
    }
}
