use thiserror::Error;

/// 運算式無法編譯的原因。`position` 為字元索引（從 0 起算）。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    #[error("malformed number '{text}' at position {position}")]
    MalformedNumber { text: String, position: usize },

    #[error("unexpected {found} at position {position}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        position: usize,
    },

    #[error("unexpected end of expression, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("unbalanced parenthesis at position {position}")]
    UnbalancedParenthesis { position: usize },

    #[error("unknown identifier '{name}' at position {position}")]
    UnknownIdentifier { name: String, position: usize },

    #[error("unknown function '{name}' at position {position}")]
    UnknownFunction { name: String, position: usize },

    #[error("function '{name}' takes {expected} argument(s) but {found} were given")]
    ArgumentCount {
        name: String,
        expected: usize,
        found: usize,
        position: usize,
    },

    #[error("namespace '{namespace}' is not allowed at position {position}")]
    DisallowedNamespace { namespace: String, position: usize },

    #[error("expression nested too deeply or too long at position {position}")]
    NestingTooDeep { position: usize },
}

impl ExpressionError {
    pub fn position(&self) -> Option<usize> {
        match self {
            ExpressionError::Empty | ExpressionError::UnexpectedEnd { .. } => None,
            ExpressionError::UnexpectedCharacter { position, .. }
            | ExpressionError::MalformedNumber { position, .. }
            | ExpressionError::UnexpectedToken { position, .. }
            | ExpressionError::UnbalancedParenthesis { position }
            | ExpressionError::UnknownIdentifier { position, .. }
            | ExpressionError::UnknownFunction { position, .. }
            | ExpressionError::ArgumentCount { position, .. }
            | ExpressionError::DisallowedNamespace { position, .. }
            | ExpressionError::NestingTooDeep { position } => Some(*position),
        }
    }
}
