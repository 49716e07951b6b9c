//! 视图投影
//!
//! 由 (题库, 会话状态, 当前时间) 生成只读的渲染快照，
//! 每次交互或定时刷新后重新计算。

use chrono::{DateTime, Local};

use crate::models::{QuestionBank, QuizPhase, SessionState};

/// 渲染快照
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: QuizPhase,
    /// 剩余时间（MM:SS），仅在 InProgress 阶段存在
    pub time_display: Option<String>,
    pub score: usize,
    pub total: usize,
    /// 当前题目视图，仅在 InProgress 阶段存在
    pub question: Option<QuestionView>,
    /// 逐题回顾列表，仅在 Completed 且进入回顾模式时存在
    pub review: Option<Vec<ReviewEntry>>,
}

/// 当前题目的展示数据
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionView {
    /// 题号（从 1 开始）
    pub number: usize,
    pub total: usize,
    pub kind_label: &'static str,
    pub instruction: &'static str,
    pub prompts: Vec<String>,
    pub choices: Vec<String>,
    /// 本题此前记录过的答案，用于回退时恢复选中项
    pub recorded: Option<String>,
}

/// 回顾列表中的一项
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewEntry {
    pub number: usize,
    pub kind_label: &'static str,
    pub prompts: Vec<String>,
    /// None 表示未作答
    pub selected: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

/// 把剩余秒数格式化为 MM:SS（向下取整）
pub fn format_remaining(seconds: i64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// 生成渲染快照
pub fn project(bank: &QuestionBank, session: &SessionState, now: DateTime<Local>) -> Snapshot {
    let in_progress = session.phase == QuizPhase::InProgress;

    let time_display = in_progress.then(|| format_remaining(session.remaining_seconds(now)));

    let question = if in_progress {
        bank.get(session.current_index).map(|q| QuestionView {
            number: session.current_index + 1,
            total: bank.len(),
            kind_label: q.kind.label(),
            instruction: if q.options_are_images {
                "哪一项与众不同？"
            } else {
                "请选择正确的选项"
            },
            prompts: q.prompts.clone(),
            choices: q.choices().to_vec(),
            recorded: session.answers.get(&session.current_index).cloned(),
        })
    } else {
        None
    };

    let review = (session.phase == QuizPhase::Completed && session.reviewing).then(|| {
        bank.questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let selected = session.answers.get(&i).cloned();
                ReviewEntry {
                    number: i + 1,
                    kind_label: q.kind.label(),
                    prompts: q.prompts.clone(),
                    is_correct: selected.as_deref() == Some(q.correct_answer.as_str()),
                    selected,
                    correct_answer: q.correct_answer.clone(),
                    explanation: q.explanation.clone(),
                }
            })
            .collect()
    });

    Snapshot {
        phase: session.phase,
        time_display,
        score: session.score,
        total: bank.len(),
        question,
        review,
    }
}
