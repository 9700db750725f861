use crate::domain::model::{JudgeStatus, Verdict};
use crate::utils::style::Color;

/// 部分分數，例如 `57점`
fn partial_score(text: &str) -> Option<&str> {
    let digits = text.strip_suffix('점')?;
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(digits)
}

impl Verdict {
    /// 將 status 頁面上的結果文字轉成評測結果
    pub fn parse(text: &str) -> Self {
        let text = text.trim();

        if text.contains("채점 준비 중") {
            return Verdict::Preparing;
        }
        if let Some(idx) = text.find("채점 중") {
            let rest = &text[idx + "채점 중".len()..];
            return Verdict::Judging(rest.to_string());
        }
        if let Some(score) = partial_score(text) {
            return Verdict::Partial(score.to_string());
        }

        match text {
            "맞았습니다!!" => Verdict::Accepted,
            "출력 형식이 잘못되었습니다" => Verdict::PresentationError,
            "틀렸습니다" => Verdict::WrongAnswer,
            "시간 초과" => Verdict::TimeLimitExceeded,
            "메모리 초과" => Verdict::MemoryLimitExceeded,
            "출력 초과" => Verdict::OutputLimitExceeded,
            "컴파일 에러" => Verdict::CompileError,
            "기다리는 중" => Verdict::Waiting,
            // BOJ 可能在後面附上原因，例如 "런타임 에러 (IndexError)"
            t if t.starts_with("런타임 에러") => Verdict::RuntimeError,
            other => Verdict::Unknown(other.to_string()),
        }
    }

    pub fn is_finished(&self) -> bool {
        !matches!(
            self,
            Verdict::Waiting | Verdict::Preparing | Verdict::Judging(_) | Verdict::Unknown(_)
        )
    }

    pub fn color(&self) -> Option<Color> {
        match self {
            Verdict::Waiting | Verdict::Preparing | Verdict::Judging(_) | Verdict::Partial(_) => {
                Some(Color::Yellow)
            }
            Verdict::Accepted => Some(Color::Green),
            Verdict::PresentationError
            | Verdict::WrongAnswer
            | Verdict::TimeLimitExceeded
            | Verdict::MemoryLimitExceeded
            | Verdict::OutputLimitExceeded => Some(Color::Red),
            Verdict::RuntimeError | Verdict::CompileError => Some(Color::Blue),
            Verdict::Unknown(_) => None,
        }
    }
}

impl JudgeStatus {
    /// 簡短格式，例如 `AC (2020KB, 0ms)`
    pub fn summary(&self) -> String {
        match &self.verdict {
            Verdict::Waiting => "Waiting...".to_string(),
            Verdict::Preparing => "Preparing...".to_string(),
            Verdict::Judging(rest) => format!("Judging...{}", rest),
            Verdict::Partial(score) => format!("Partial ({})", score),
            Verdict::Accepted => format!("AC ({}KB, {}ms)", self.memory_kb, self.time_ms),
            Verdict::PresentationError => "PE".to_string(),
            Verdict::WrongAnswer => "WA".to_string(),
            Verdict::TimeLimitExceeded => "TLE".to_string(),
            Verdict::MemoryLimitExceeded => "MLE".to_string(),
            Verdict::OutputLimitExceeded => "PLE".to_string(),
            Verdict::RuntimeError => "RTE".to_string(),
            Verdict::CompileError => "Compile Error".to_string(),
            Verdict::Unknown(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(text: &str) -> JudgeStatus {
        JudgeStatus {
            solution_id: None,
            verdict: Verdict::parse(text),
            raw_text: text.to_string(),
            memory_kb: "2020".to_string(),
            time_ms: "4".to_string(),
        }
    }

    #[test]
    fn test_parse_pending_states() {
        assert_eq!(Verdict::parse("기다리는 중"), Verdict::Waiting);
        assert_eq!(Verdict::parse("채점 준비 중"), Verdict::Preparing);
        assert_eq!(
            Verdict::parse("채점 중 (35%)"),
            Verdict::Judging(" (35%)".to_string())
        );
        assert_eq!(Verdict::parse("  채점 중  "), Verdict::Judging(String::new()));
    }

    #[test]
    fn test_parse_final_verdicts() {
        assert_eq!(Verdict::parse("맞았습니다!!"), Verdict::Accepted);
        assert_eq!(Verdict::parse("틀렸습니다"), Verdict::WrongAnswer);
        assert_eq!(
            Verdict::parse("출력 형식이 잘못되었습니다"),
            Verdict::PresentationError
        );
        assert_eq!(Verdict::parse("시간 초과"), Verdict::TimeLimitExceeded);
        assert_eq!(Verdict::parse("메모리 초과"), Verdict::MemoryLimitExceeded);
        assert_eq!(Verdict::parse("출력 초과"), Verdict::OutputLimitExceeded);
        assert_eq!(Verdict::parse("런타임 에러"), Verdict::RuntimeError);
        assert_eq!(
            Verdict::parse("런타임 에러 (IndexError)"),
            Verdict::RuntimeError
        );
        assert_eq!(Verdict::parse("컴파일 에러"), Verdict::CompileError);
        assert_eq!(Verdict::parse("57점"), Verdict::Partial("57".to_string()));
    }

    #[test]
    fn test_finished_states() {
        assert!(!Verdict::Waiting.is_finished());
        assert!(!Verdict::Preparing.is_finished());
        assert!(!Verdict::Judging(String::new()).is_finished());
        assert!(!Verdict::Unknown("?".to_string()).is_finished());
        assert!(Verdict::Partial("10".to_string()).is_finished());
        assert!(Verdict::Accepted.is_finished());
        assert!(Verdict::CompileError.is_finished());
    }

    #[test]
    fn test_partial_score_larger_than_u32() {
        let verdict = Verdict::parse("99999999999점");
        assert_eq!(verdict, Verdict::Partial("99999999999".to_string()));
        assert!(verdict.is_finished());
        assert_eq!(status("99999999999점").summary(), "Partial (99999999999)");
    }

    #[test]
    fn test_partial_requires_whole_text() {
        assert_eq!(
            Verdict::parse("점수 100점"),
            Verdict::Unknown("점수 100점".to_string())
        );
    }

    #[test]
    fn test_summary() {
        assert_eq!(status("맞았습니다!!").summary(), "AC (2020KB, 4ms)");
        assert_eq!(status("컴파일 에러").summary(), "Compile Error");
        assert_eq!(status("100점").summary(), "Partial (100)");
        assert_eq!(status("채점 중 (50%)").summary(), "Judging... (50%)");
        assert_eq!(status("출력 초과").summary(), "PLE");
    }

    #[test]
    fn test_colors() {
        assert_eq!(Verdict::Accepted.color(), Some(Color::Green));
        assert_eq!(Verdict::WrongAnswer.color(), Some(Color::Red));
        assert_eq!(Verdict::RuntimeError.color(), Some(Color::Blue));
        assert_eq!(Verdict::Partial("1".to_string()).color(), Some(Color::Yellow));
    }
}
