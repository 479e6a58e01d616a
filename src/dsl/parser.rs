//! Parser for the netlist format.

use std::collections::HashMap;

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{DcNetError, Result};

/// Parser for netlists.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self {
            lexer,
            current: Token {
                kind: TokenKind::Newline,
                text: String::new(),
                line: 1,
                column: 1,
            },
        }
    }

    /// Parse the entire netlist.
    pub fn parse(&mut self) -> Result<CircuitAst> {
        let mut ast = CircuitAst::new();

        self.advance()?;
        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            match self.current.kind {
                TokenKind::Directive => {
                    self.parse_directive(&mut ast)?;
                }
                TokenKind::Identifier => {
                    let component = self.parse_component()?;
                    ast.components.push(component);
                }
                _ => {
                    return Err(DcNetError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            match self.current.kind {
                TokenKind::Newline => self.advance()?,
                TokenKind::Eof => {}
                _ => {
                    return Err(DcNetError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    /// Consume a node name, which may lex as an identifier or a number.
    fn expect_node(&mut self) -> Result<String> {
        match self.current.kind {
            TokenKind::Identifier | TokenKind::Number => {
                let text = std::mem::take(&mut self.current.text);
                self.advance()?;
                Ok(text)
            }
            _ => Err(DcNetError::parse(
                self.current.line,
                format!("expected node name, got {:?}", self.current.kind),
            )),
        }
    }

    fn parse_directive(&mut self, ast: &mut CircuitAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".ground" | ".gnd" => {
                let node = self.expect_node()?;
                if ast.ground_node.is_some() {
                    return Err(DcNetError::parse(line, "ground node declared twice"));
                }
                ast.ground_node = Some(node);
            }
            ".end" => {
                // Ignore everything after .end
                while self.current.kind != TokenKind::Eof {
                    self.advance()?;
                }
            }
            _ => {
                return Err(DcNetError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    fn parse_component(&mut self) -> Result<ComponentDef> {
        let first_token = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        // Standalone keywords ("SW S1 ...") name the component with the next token
        let (component_type, name) = if let Some(ct) = ComponentType::from_keyword(&first_token) {
            if self.current.kind != TokenKind::Identifier {
                return Err(DcNetError::parse(
                    line,
                    format!("expected component name after '{}'", first_token),
                ));
            }
            let name = std::mem::take(&mut self.current.text);
            self.advance()?;
            (ct, name)
        } else if first_token.to_uppercase().starts_with("SW") {
            (ComponentType::Switch, first_token)
        } else {
            let first_char = first_token.chars().next().unwrap_or('?');
            let ct = ComponentType::from_prefix(first_char).ok_or_else(|| {
                DcNetError::UnknownComponentType {
                    component_type: first_token.clone(),
                    line,
                }
            })?;
            (ct, first_token)
        };

        let expected_nodes = component_type.expected_node_count();
        let mut nodes = Vec::with_capacity(expected_nodes);
        let mut value = None;
        let mut state = None;
        let mut params = HashMap::new();

        while self.current.kind != TokenKind::Newline && self.current.kind != TokenKind::Eof {
            if nodes.len() < expected_nodes {
                nodes.push(self.expect_node()?);
                continue;
            }

            let text = std::mem::take(&mut self.current.text);
            match self.current.kind {
                TokenKind::Identifier => {
                    self.advance()?;

                    // param=value
                    if self.current.kind == TokenKind::Equals {
                        self.advance()?;
                        let val_text = std::mem::take(&mut self.current.text);
                        let v = match self.current.kind {
                            TokenKind::Number | TokenKind::Identifier => parse_value(&val_text),
                            _ => None,
                        }
                        .ok_or_else(|| {
                            DcNetError::invalid_component(
                                &name,
                                line,
                                format!("invalid value for parameter '{}'", text),
                            )
                        })?;
                        self.advance()?;
                        params.insert(text.to_lowercase(), v);
                        continue;
                    }

                    // Source type keyword, value follows
                    if text.eq_ignore_ascii_case("DC") {
                        continue;
                    }

                    if state.is_some() {
                        return Err(DcNetError::invalid_component(
                            &name,
                            line,
                            format!("unexpected word '{}'", text),
                        ));
                    }
                    state = Some(text);
                }
                TokenKind::Number => {
                    self.advance()?;
                    let v = parse_value(&text).ok_or_else(|| {
                        DcNetError::invalid_component(&name, line, format!("invalid number: {}", text))
                    })?;
                    if value.is_some() {
                        return Err(DcNetError::invalid_component(
                            &name,
                            line,
                            format!("unexpected extra value {}", text),
                        ));
                    }
                    value = Some(v);
                }
                _ => {
                    return Err(DcNetError::parse(
                        line,
                        format!("unexpected token: {:?}", text),
                    ));
                }
            }
        }

        if nodes.len() < expected_nodes {
            return Err(DcNetError::invalid_component(
                &name,
                line,
                format!("expected {} nodes, got {}", expected_nodes, nodes.len()),
            ));
        }

        Ok(ComponentDef {
            component_type,
            name,
            nodes,
            value,
            state,
            params,
            line,
        })
    }
}
