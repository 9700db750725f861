use crate::domain::model::{JudgeStatus, StatField, UserStats};
use crate::utils::style::{Color, Painter};
use std::io::Write;

/// 清除目前這行用的寬度
const CLEAR_WIDTH: usize = 20;

pub fn version_banner() -> String {
    format!(
        "boj-tool: a CLI tool for BOJ\nv{}",
        env!("CARGO_PKG_VERSION")
    )
}

pub fn status_text(painter: &Painter, status: &JudgeStatus) -> String {
    painter.paint(status.verdict.color(), &status.summary())
}

/// 覆寫同一行顯示最新狀態，記住上一次的寬度以清掉較長的舊文字
#[derive(Debug)]
pub struct StatusLine {
    painter: Painter,
    last_width: usize,
}

impl StatusLine {
    pub fn new(painter: Painter) -> Self {
        Self {
            painter,
            last_width: 0,
        }
    }

    pub fn render(&mut self, status: &JudgeStatus) -> String {
        let current = status.summary().chars().count();
        let width = CLEAR_WIDTH.max(self.last_width).max(current);
        self.last_width = current;
        format!("\r{}\r{}", " ".repeat(width), status_text(&self.painter, status))
    }

    pub fn update(&mut self, status: &JudgeStatus) -> std::io::Result<()> {
        let line = self.render(status);
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "{}", line)?;
        stdout.flush()
    }
}

fn stat_label(field: StatField) -> (&'static str, Option<Color>) {
    match field {
        StatField::Rank => ("Rank:\t\t", Some(Color::Blue)),
        StatField::Solved => ("Solved:\t\t", Some(Color::Green)),
        StatField::Submissions => ("Submissions:\t", Some(Color::Yellow)),
        StatField::AcceptedCount => ("AC count:\t", Some(Color::Green)),
        StatField::PresentationErrorCount => ("PE count:\t", Some(Color::Red)),
        StatField::WrongAnswerCount => ("WA count:\t", Some(Color::Red)),
        StatField::TimeLimitCount => ("TLE count:\t", Some(Color::Red)),
        StatField::CompileErrorCount => ("Compile errors:\t", Some(Color::Red)),
        StatField::MemoryLimitCount => ("MLE count:\t", Some(Color::Red)),
        StatField::OutputLimitCount => ("PLE count:\t", Some(Color::Red)),
        StatField::RuntimeErrorCount => ("RTE count:\t", Some(Color::Red)),
        StatField::Organization => ("Organization:\t", None),
        StatField::FirstPlace => ("First place:\t", Some(Color::Green)),
        StatField::SecondPlace => ("Second place:\t", Some(Color::Cyan)),
    }
}

pub fn stats_report(painter: &Painter, stats: &UserStats) -> String {
    let mut lines = vec![format!("Stats of user {}", stats.username), String::new()];
    for entry in &stats.entries {
        let (label, color) = stat_label(entry.field);
        lines.push(format!("{}{}", painter.paint(color, label), entry.value));
    }
    lines.join("\n")
}
