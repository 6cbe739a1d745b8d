use crate::expression::expr::{
    BinaryOp,
    Expr
};
use crate::expression::expressionerror::ExpressionError;
use crate::expression::symboltable::{
    symbol_table,
    Symbol
};
use crate::expression::tokenizer::{
    tokenize,
    Token,
    TokenKind
};

/// 括號與一元運算子的巢狀上限，避免惡意輸入耗盡堆疊。
const MAX_DEPTH: usize = 256;

/// 運算式樹的高度上限。`x + x + ... + x` 之類的長串會長成同樣高的樹，
/// 求值、化簡與釋放都沿著樹遞迴。
const MAX_HEIGHT: usize = 512;

// ─────────────────────────────────────────────────────────────────────────────
// 文法（優先序由低到高）
//
//   sum     := product (('+' | '-') product)*
//   product := unary (('*' | '/') unary)*
//   unary   := ('+' | '-') unary | power
//   power   := primary (('^' | '**') unary)?      右結合，-x^2 = -(x^2)
//   primary := number | name | name '(' args ')' | '(' sum ')'
//   name    := identifier ('.' identifier)?       限 np / numpy / math
// ─────────────────────────────────────────────────────────────────────────────

pub fn parse(text: &str) -> Result<Expr, ExpressionError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(ExpressionError::Empty);
    }
    let mut parser = Parser::new(tokens);
    let node = parser.parse_sum()?;
    parser.expect_end()?;
    Ok(node.expr)
}

/// 解析中的子樹與其高度（葉節點為 1）。
struct Node {
    expr: Expr,
    height: usize
}

impl Node {
    fn leaf(expr: Expr) -> Node {
        Node { expr, height: 1 }
    }

    fn branch(expr: Expr, child_height: usize, position: usize) -> Result<Node, ExpressionError> {
        let height = child_height + 1;
        if height > MAX_HEIGHT {
            return Err(ExpressionError::NestingTooDeep { position });
        }
        Ok(Node { expr, height })
    }

    fn binary(op: BinaryOp, lhs: Node, rhs: Node, position: usize) -> Result<Node, ExpressionError> {
        let child_height = lhs.height.max(rhs.height);
        Node::branch(Expr::binary(op, lhs.expr, rhs.expr), child_height, position)
    }
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Parser {
        Parser { tokens, cursor: 0, depth: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(Token::kind)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn next_or_end(&mut self, expected: &'static str) -> Result<Token, ExpressionError> {
        self.advance().ok_or(ExpressionError::UnexpectedEnd { expected })
    }

    fn unexpected(token: &Token, expected: &'static str) -> ExpressionError {
        match token.kind() {
            TokenKind::RightParen => ExpressionError::UnbalancedParenthesis {
                position: token.position(),
            },
            kind => ExpressionError::UnexpectedToken {
                found: kind.to_string(),
                expected,
                position: token.position(),
            },
        }
    }

    fn expect_end(&self) -> Result<(), ExpressionError> {
        match self.peek() {
            None => Ok(()),
            Some(token) => Err(Self::unexpected(token, "an operator or end of expression")),
        }
    }

    fn enter(&mut self, position: usize) -> Result<(), ExpressionError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExpressionError::NestingTooDeep { position });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn current_position(&self) -> usize {
        self.peek().map_or(0, Token::position)
    }

    fn parse_sum(&mut self) -> Result<Node, ExpressionError> {
        let mut lhs = self.parse_product()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            let position = self.current_position();
            self.advance();
            let rhs = self.parse_product()?;
            lhs = Node::binary(op, lhs, rhs, position)?;
        }
    }

    fn parse_product(&mut self) -> Result<Node, ExpressionError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                _ => return Ok(lhs),
            };
            let position = self.current_position();
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Node::binary(op, lhs, rhs, position)?;
        }
    }

    fn parse_unary(&mut self) -> Result<Node, ExpressionError> {
        let negate = match self.peek_kind() {
            Some(TokenKind::Minus) => true,
            Some(TokenKind::Plus) => false,
            _ => return self.parse_power(),
        };
        let position = self.current_position();
        self.advance();
        self.enter(position)?;
        let operand = self.parse_unary();
        self.leave();
        let operand = operand?;
        if negate {
            Node::branch(Expr::neg(operand.expr), operand.height, position)
        } else {
            Ok(operand)
        }
    }

    fn parse_power(&mut self) -> Result<Node, ExpressionError> {
        let base = self.parse_primary()?;
        if self.peek_kind() != Some(&TokenKind::Caret) {
            return Ok(base);
        }
        let position = self.current_position();
        self.advance();
        self.enter(position)?;
        let exponent = self.parse_unary();
        self.leave();
        Node::binary(BinaryOp::Pow, base, exponent?, position)
    }

    fn parse_primary(&mut self) -> Result<Node, ExpressionError> {
        let token = self.next_or_end("a number, name or '('")?;
        match token.kind() {
            TokenKind::Number(value) => Ok(Node::leaf(Expr::Number(*value))),
            TokenKind::Identifier(name) => self.parse_name(name.clone(), token.position()),
            TokenKind::LeftParen => {
                self.enter(token.position())?;
                let inner = self.parse_sum();
                self.leave();
                let inner = inner?;
                match self.advance() {
                    Some(close) if close.kind() == &TokenKind::RightParen => Ok(inner),
                    Some(other) => Err(ExpressionError::UnexpectedToken {
                        found: other.kind().to_string(),
                        expected: "')'",
                        position: other.position(),
                    }),
                    None => Err(ExpressionError::UnbalancedParenthesis {
                        position: token.position(),
                    }),
                }
            }
            _ => Err(Self::unexpected(&token, "a number, name or '('")),
        }
    }

    fn parse_name(&mut self, first: String, position: usize) -> Result<Node, ExpressionError> {
        let table = symbol_table();
        let (namespace, name) = if self.peek_kind() == Some(&TokenKind::Dot) {
            self.advance();
            let member = self.next_or_end("a name after '.'")?;
            let TokenKind::Identifier(member_name) = member.kind() else {
                return Err(Self::unexpected(&member, "a name after '.'"));
            };
            if !table.is_allowed_namespace(&first) {
                return Err(ExpressionError::DisallowedNamespace {
                    namespace: first,
                    position,
                });
            }
            (Some(first), member_name.clone())
        } else {
            (None, first)
        };
        let full_name = match &namespace {
            Some(namespace) => format!("{}.{}", namespace, name),
            None => name.clone(),
        };

        let is_call = self.peek_kind() == Some(&TokenKind::LeftParen);
        match (table.lookup(&name), is_call) {
            (Some(Symbol::Function(function)), true) => {
                let open_position = self.current_position();
                self.advance();
                let args = self.parse_arguments(open_position)?;
                if args.len() != function.arity() {
                    return Err(ExpressionError::ArgumentCount {
                        name: full_name,
                        expected: function.arity(),
                        found: args.len(),
                        position,
                    });
                }
                let child_height = args.iter().map(|arg| arg.height).max().unwrap_or(0);
                let args = args.into_iter().map(|arg| arg.expr).collect();
                Node::branch(Expr::Call(function, args), child_height, position)
            }
            (Some(Symbol::Function(_)), false) => match self.peek() {
                Some(token) => Err(Self::unexpected(token, "'(' after function name")),
                None => Err(ExpressionError::UnexpectedEnd {
                    expected: "'(' after function name",
                }),
            },
            (Some(Symbol::Constant(constant)), false) => Ok(Node::leaf(Expr::Constant(constant))),
            (Some(Symbol::Variable), false) if namespace.is_none() => Ok(Node::leaf(Expr::Variable)),
            (_, true) => Err(ExpressionError::UnknownFunction {
                name: full_name,
                position,
            }),
            (_, false) => Err(ExpressionError::UnknownIdentifier {
                name: full_name,
                position,
            }),
        }
    }

    /// 已消耗 '('；讀到對應的 ')' 為止。
    fn parse_arguments(&mut self, open_position: usize) -> Result<Vec<Node>, ExpressionError> {
        self.enter(open_position)?;
        let args = self.parse_argument_list(open_position);
        self.leave();
        args
    }

    fn parse_argument_list(&mut self, open_position: usize) -> Result<Vec<Node>, ExpressionError> {
        let mut args = Vec::new();
        if self.peek_kind() == Some(&TokenKind::RightParen) {
            self.advance();
            return Ok(args);
        }
        loop {
            args.push(self.parse_sum()?);
            match self.advance() {
                Some(token) if token.kind() == &TokenKind::Comma => continue,
                Some(token) if token.kind() == &TokenKind::RightParen => return Ok(args),
                Some(token) => {
                    return Err(ExpressionError::UnexpectedToken {
                        found: token.kind().to_string(),
                        expected: "',' or ')'",
                        position: token.position(),
                    })
                }
                None => {
                    return Err(ExpressionError::UnbalancedParenthesis {
                        position: open_position,
                    })
                }
            }
        }
    }
}
