/// Syntactic category of a top-level form, decided once from its head symbol
/// and matched exhaustively by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Fn,
    Fx,
    Let,
    Var,
    Class,
    Struct,
    Enum,
    DefMacro,
    Export,
    Import,
    Other,
}

impl FormKind {
    pub fn classify(head: &str) -> Self {
        match head {
            "fn" => Self::Fn,
            "fx" => Self::Fx,
            "let" => Self::Let,
            "var" => Self::Var,
            "class" => Self::Class,
            "struct" => Self::Struct,
            "enum" => Self::Enum,
            "defmacro" | "macro" => Self::DefMacro,
            "export" => Self::Export,
            "import" => Self::Import,
            _ => Self::Other,
        }
    }

    /// True for forms that define a named entity directly, as opposed to
    /// module-linkage statements and unrecognized forms.
    pub fn is_definition(self) -> bool {
        !matches!(self, Self::Export | Self::Import | Self::Other)
    }
}
