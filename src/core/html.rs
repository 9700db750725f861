//! Extraction of the few values boj-tool needs from BOJ pages.
//!
//! Every function takes raw HTML and returns `None` when the expected element
//! is absent; callers decide whether that means "not logged in" or an error.

use crate::domain::model::{JudgeStatus, StatEntry, StatField, UserStats, Verdict};
use scraper::{ElementRef, Html, Selector};

fn select_first<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    Selector::parse(selector)
        .ok()
        .and_then(|s| doc.select(&s).next())
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// 導覽列上的 `a.username`，只有登入時才存在
pub fn extract_username(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    select_first(&doc, "a.username")
        .map(element_text)
        .filter(|name| !name.is_empty())
}

pub fn extract_csrf_key(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    select_first(&doc, r#"input[name="csrf_key"]"#)
        .and_then(|input| input.value().attr("value"))
        .map(|value| value.to_string())
        .filter(|value| !value.is_empty())
}

/// status 頁面的第一筆（最新）提交
pub fn extract_latest_status(html: &str) -> Option<JudgeStatus> {
    let doc = Html::parse_document(html);

    let result = select_first(&doc, "span.result-text")?;
    // 結果文字在內層 span，沒有內層時退回外層文字
    let raw_text = Selector::parse("span")
        .ok()
        .and_then(|s| result.select(&s).next())
        .map(element_text)
        .unwrap_or_else(|| element_text(result));

    let memory_kb = select_first(&doc, "td.memory")
        .map(element_text)
        .unwrap_or_default();
    let time_ms = select_first(&doc, "td.time")
        .map(element_text)
        .unwrap_or_default();
    let solution_id = select_first(&doc, "table#status-table tbody tr td")
        .map(element_text)
        .and_then(|id| id.parse().ok());

    Some(JudgeStatus {
        solution_id,
        verdict: Verdict::parse(&raw_text),
        raw_text,
        memory_kb,
        time_ms,
    })
}

impl StatField {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "랭킹" => Some(StatField::Rank),
            "푼 문제" => Some(StatField::Solved),
            "제출" => Some(StatField::Submissions),
            "맞았습니다" => Some(StatField::AcceptedCount),
            "출력 형식" => Some(StatField::PresentationErrorCount),
            "틀렸습니다" => Some(StatField::WrongAnswerCount),
            "시간 초과" => Some(StatField::TimeLimitCount),
            "컴파일 에러" => Some(StatField::CompileErrorCount),
            "메모리 초과" => Some(StatField::MemoryLimitCount),
            "출력 초과" => Some(StatField::OutputLimitCount),
            "런타임 에러" => Some(StatField::RuntimeErrorCount),
            "학교/회사" => Some(StatField::Organization),
            "대회 우승" => Some(StatField::FirstPlace),
            "대회 준우승" => Some(StatField::SecondPlace),
            _ => None,
        }
    }
}

/// 把 td 內以 tab / 換行分隔的多個值合併成 `a, b`
fn join_cell_values(text: &str) -> String {
    text.trim()
        .split(['\t', '\n'])
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 使用者頁面的 `table#statics`，找不到表格時回傳 `None`
pub fn extract_user_stats(html: &str, username: &str) -> Option<UserStats> {
    let doc = Html::parse_document(html);
    let row_selector = Selector::parse("table#statics tbody tr").ok()?;
    let th_selector = Selector::parse("th").ok()?;
    let td_selector = Selector::parse("td").ok()?;

    // 表格不存在代表使用者不存在
    select_first(&doc, "table#statics")?;

    let entries = doc
        .select(&row_selector)
        .filter_map(|row| {
            let label = row.select(&th_selector).next().map(element_text)?;
            let field = StatField::from_label(&label)?;
            let value = row
                .select(&td_selector)
                .next()
                .map(|td| join_cell_values(&td.text().collect::<String>()))
                .unwrap_or_default();
            Some(StatEntry { field, value })
        })
        .collect();

    Some(UserStats {
        username: username.to_string(),
        entries,
    })
}
