use std::collections::HashMap;
use std::sync::LazyLock;

use crate::expression::expr::{
    Constant,
    Function
};

/// 公式中唯一允許的自由變數名稱。
pub const VARIABLE_NAME: &str = "x";

/// 允許出現在函數/常數名稱前的命名空間（如 `np.exp`）。
const ALLOWED_NAMESPACES: [&str; 3] = ["np", "numpy", "math"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Variable,
    Constant(Constant),
    Function(Function)
}

/// 名稱 → 符號的唯讀對照表，程序啟動後第一次使用時建立一次，
/// 之後不再變動，因此跨執行緒共享不需同步。
pub struct SymbolTable {
    entries: HashMap<&'static str, Symbol>
}

static SYMBOL_TABLE: LazyLock<SymbolTable> = LazyLock::new(SymbolTable::standard);

pub fn symbol_table() -> &'static SymbolTable {
    &SYMBOL_TABLE
}

impl SymbolTable {
    fn standard() -> SymbolTable {
        let entries = HashMap::from([
            (VARIABLE_NAME, Symbol::Variable),
            ("pi", Symbol::Constant(Constant::Pi)),
            ("e", Symbol::Constant(Constant::E)),
            ("sin", Symbol::Function(Function::Sin)),
            ("cos", Symbol::Function(Function::Cos)),
            ("tan", Symbol::Function(Function::Tan)),
            ("asin", Symbol::Function(Function::Asin)),
            ("arcsin", Symbol::Function(Function::Asin)),
            ("acos", Symbol::Function(Function::Acos)),
            ("arccos", Symbol::Function(Function::Acos)),
            ("atan", Symbol::Function(Function::Atan)),
            ("arctan", Symbol::Function(Function::Atan)),
            ("sinh", Symbol::Function(Function::Sinh)),
            ("cosh", Symbol::Function(Function::Cosh)),
            ("tanh", Symbol::Function(Function::Tanh)),
            ("exp", Symbol::Function(Function::Exp)),
            ("log", Symbol::Function(Function::Ln)),
            ("ln", Symbol::Function(Function::Ln)),
            ("log10", Symbol::Function(Function::Log10)),
            ("log2", Symbol::Function(Function::Log2)),
            ("sqrt", Symbol::Function(Function::Sqrt)),
            ("abs", Symbol::Function(Function::Abs)),
            ("fabs", Symbol::Function(Function::Abs)),
            ("pow", Symbol::Function(Function::Pow)),
            ("power", Symbol::Function(Function::Pow)),
        ]);
        SymbolTable { entries }
    }

    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.entries.get(name).copied()
    }

    pub fn is_allowed_namespace(&self, namespace: &str) -> bool {
        ALLOWED_NAMESPACES.contains(&namespace)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// 顯示用名稱
// ─────────────────────────────────────────────────────────────────────────────

impl Constant {
    pub fn display_name(&self) -> &'static str {
        match self {
            Constant::Pi => "π",
            Constant::E => "e"
        }
    }

    pub fn latex_name(&self) -> &'static str {
        match self {
            Constant::Pi => "\\pi",
            Constant::E => "e"
        }
    }
}

impl Function {
    pub fn display_name(&self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Exp => "exp",
            Function::Ln => "log",
            Function::Log10 => "log10",
            Function::Log2 => "log2",
            Function::Sqrt => "sqrt",
            Function::Abs => "abs",
            Function::Pow => "pow"
        }
    }

    /// `sqrt`、`abs`、`exp`、`pow` 在 LaTeX 中有專屬寫法，由 formatter 處理，
    /// 這裡回傳 `None`。
    pub fn latex_name(&self) -> Option<&'static str> {
        match self {
            Function::Sin => Some("\\sin"),
            Function::Cos => Some("\\cos"),
            Function::Tan => Some("\\tan"),
            Function::Asin => Some("\\operatorname{asin}"),
            Function::Acos => Some("\\operatorname{acos}"),
            Function::Atan => Some("\\operatorname{atan}"),
            Function::Sinh => Some("\\sinh"),
            Function::Cosh => Some("\\cosh"),
            Function::Tanh => Some("\\tanh"),
            Function::Ln => Some("\\log"),
            Function::Log10 => Some("\\log_{10}"),
            Function::Log2 => Some("\\log_{2}"),
            Function::Exp | Function::Sqrt | Function::Abs | Function::Pow => None
        }
    }
}
