//! Recursive-descent formula parser
//!
//! Each grammar rule returns `Ok(None)` when its first token does not fit,
//! leaving the stream where it was so the caller can try another
//! alternative. Once a rule has committed (an operator or an opening
//! delimiter was consumed) a missing piece is an immediate error.

use crate::config::compile_time::syntax::MAX_PARSE_DEPTH;
use crate::grammar::ast::{BinaryOperator, Node};
use crate::lexical::LexerError;
use crate::log_debug;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::{Token, TokenKind, TokenStream};

/// Outcome of a grammar rule: no match, a node, or a committed failure
type RuleResult = SyntaxResult<Option<Node>>;

pub struct FormulaParser<I>
where
    I: Iterator<Item = Token>,
{
    tokens: TokenStream<I>,
    depth: usize,
    deepest: usize,
}

impl<I> FormulaParser<I>
where
    I: Iterator<Item = Token>,
{
    pub fn new(tokens: TokenStream<I>) -> Self {
        log_debug!("Creating formula parser", "first_token" => tokens.peek().kind);

        Self {
            tokens,
            depth: 0,
            deepest: 0,
        }
    }

    /// Parse one complete formula; the whole token sequence must be consumed
    pub fn parse_formula(&mut self) -> SyntaxResult<Node> {
        let node = match self.parse_statement()? {
            Some(node) => node,
            None => return Err(SyntaxError::at_token("expression", self.tokens.peek())),
        };

        let next = self.tokens.peek();
        match next.kind {
            TokenKind::EndOfInput => Ok(node),
            TokenKind::LexError => Err(SyntaxError::Lexical(LexerError::from_token(next))),
            _ => Err(SyntaxError::trailing_input(next)),
        }
    }

    /// Deepest grouping or negation nesting reached so far
    pub fn deepest_nesting(&self) -> usize {
        self.deepest
    }

    pub fn tokens(&self) -> &TokenStream<I> {
        &self.tokens
    }

    // Statement := IntersectExpr ( ('+' | '-' | '\') Statement )?
    fn parse_statement(&mut self) -> RuleResult {
        let Some(first) = self.parse_intersection()? else {
            return Ok(None);
        };

        let mut chain = Vec::new();
        while let Some(operator) = union_family(self.tokens.current_kind()) {
            let operator_token = self.tokens.take();
            match self.parse_intersection()? {
                Some(operand) => chain.push((operator, operand)),
                None => return Err(self.missing_operand(&operator_token)),
            }
        }

        Ok(Some(fold_right(first, chain)))
    }

    // IntersectExpr := Primary ( '*' IntersectExpr )?
    fn parse_intersection(&mut self) -> RuleResult {
        let Some(first) = self.parse_primary()? else {
            return Ok(None);
        };

        let mut chain = Vec::new();
        while let Some(operator_token) = self.tokens.advance_if(TokenKind::Intersection) {
            match self.parse_primary()? {
                Some(operand) => chain.push((BinaryOperator::Intersection, operand)),
                None => return Err(self.missing_operand(&operator_token)),
            }
        }

        Ok(Some(fold_right(first, chain)))
    }

    // Primary := Identifier | Const | '!' Primary | ('(' | '[') Statement (')' | ']')
    fn parse_primary(&mut self) -> RuleResult {
        if let Some(node) = self.parse_operand() {
            return Ok(Some(node));
        }
        if let Some(node) = self.parse_negation()? {
            return Ok(Some(node));
        }
        self.parse_group()
    }

    fn parse_operand(&mut self) -> Option<Node> {
        match self.tokens.current_kind() {
            TokenKind::Identifier => Some(Node::Identifier(self.tokens.take().text)),
            TokenKind::Const => Some(Node::Const(self.tokens.take().text == "1")),
            _ => None,
        }
    }

    fn parse_negation(&mut self) -> RuleResult {
        let Some(bang) = self.tokens.advance_if(TokenKind::Negation) else {
            return Ok(None);
        };

        match self.nested(|parser| parser.parse_primary())? {
            Some(operand) => Ok(Some(Node::negation(operand))),
            None => Err(self.missing_operand(&bang)),
        }
    }

    fn parse_group(&mut self) -> RuleResult {
        let Some(closing) = self.tokens.current_kind().closing_delimiter() else {
            return Ok(None);
        };
        let opening = self.tokens.take();

        let Some(inner) = self.nested(|parser| parser.parse_statement())? else {
            return Err(SyntaxError::at_token("expression", self.tokens.peek()));
        };

        let found = self.tokens.take();
        if found.kind == closing {
            Ok(Some(inner))
        } else if found.kind == TokenKind::LexError {
            Err(SyntaxError::Lexical(LexerError::from_token(&found)))
        } else {
            Err(SyntaxError::unmatched_delimiter(&opening, &found))
        }
    }

    /// Error for an operator whose operand never came
    fn missing_operand(&self, operator: &Token) -> SyntaxError {
        let current = self.tokens.peek();
        if current.kind == TokenKind::LexError {
            SyntaxError::Lexical(LexerError::from_token(current))
        } else {
            SyntaxError::missing_operand(operator)
        }
    }

    /// Run a rule one grouping or negation level deeper
    ///
    /// Operator chains are collected iteratively, so only these two
    /// constructs grow the recursion.
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> SyntaxResult<T>) -> SyntaxResult<T> {
        if self.depth >= MAX_PARSE_DEPTH {
            return Err(SyntaxError::max_recursion_depth(self.tokens.peek().offset));
        }

        self.depth += 1;
        self.deepest = self.deepest.max(self.depth);
        let result = rule(self);
        self.depth -= 1;
        result
    }
}

fn union_family(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Union => Some(BinaryOperator::Union),
        TokenKind::Difference => Some(BinaryOperator::Difference),
        TokenKind::SymmetricDifference => Some(BinaryOperator::SymmetricDifference),
        _ => None,
    }
}

/// Combine `first op1 a op2 b` right-associatively as `first op1 (a op2 b)`
fn fold_right(first: Node, chain: Vec<(BinaryOperator, Node)>) -> Node {
    let mut lefts = Vec::with_capacity(chain.len());
    let mut last = first;
    for (operator, operand) in chain {
        lefts.push((last, operator));
        last = operand;
    }

    lefts
        .into_iter()
        .rev()
        .fold(last, |right, (left, operator)| Node::binary(operator, left, right))
}
