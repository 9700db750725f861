use std::io::IsTerminal;

/// 終端機顏色（ANSI 前景色）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Red,
    Blue,
    Yellow,
    Cyan,
}

impl Color {
    fn code(self) -> &'static str {
        match self {
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Cyan => "\x1b[36m",
        }
    }
}

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy)]
pub struct Painter {
    enabled: bool,
}

impl Painter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// stdout 是終端機且未設定 NO_COLOR 時才上色
    pub fn for_stdout() -> Self {
        let enabled = std::io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self::new(enabled)
    }

    pub fn paint(&self, color: Option<Color>, text: &str) -> String {
        match color {
            Some(color) if self.enabled => format!("{}{}{}", color.code(), text, RESET),
            _ => text.to_string(),
        }
    }
}
