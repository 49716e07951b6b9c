use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 整场测验的时长（秒）
pub const TEST_DURATION_SECONDS: i64 = 600;
/// 内置题库的题目数量
pub const NUM_QUESTIONS: usize = 10;

/// 题目类型（仅用于展示，不影响判分逻辑）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SeriesCompletion,
    AdvancedSeriesCompletion,
    OddOneOut,
    MatrixReasoning,
    VisualAnalogy,
}

impl QuestionKind {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionKind::SeriesCompletion => "序列补全",
            QuestionKind::AdvancedSeriesCompletion => "进阶序列补全",
            QuestionKind::OddOneOut => "找出异类",
            QuestionKind::MatrixReasoning => "矩阵推理",
            QuestionKind::VisualAnalogy => "图形类比",
        }
    }
}

/// 单道题目
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub kind: QuestionKind,
    /// 提示图形描述（由渲染层解析为具体图像）
    pub prompts: Vec<String>,
    /// 为 true 时选项就是 prompts 本身（找出异类类题目）
    #[serde(default)]
    pub options_are_images: bool,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    /// 逻辑说明，仅在回顾阶段展示
    pub explanation: String,
}

impl Question {
    /// 本题的可选项集合
    pub fn choices(&self) -> &[String] {
        if self.options_are_images {
            &self.prompts
        } else {
            &self.options
        }
    }

    fn validate(&self, idx: usize) -> Result<(), String> {
        if self.prompts.is_empty() {
            return Err(format!("第 {} 题缺少提示图形", idx + 1));
        }
        if self.options_are_images && !self.options.is_empty() {
            return Err(format!(
                "第 {} 题的选项应为提示图形本身，不应另设 options",
                idx + 1
            ));
        }
        if !self.options_are_images && self.options.is_empty() {
            return Err(format!("第 {} 题缺少选项", idx + 1));
        }
        // 正确答案必须在选项中恰好出现一次，否则判分会产生歧义
        let hits = self
            .choices()
            .iter()
            .filter(|c| **c == self.correct_answer)
            .count();
        match hits {
            1 => Ok(()),
            0 => Err(format!("第 {} 题的正确答案不在选项中", idx + 1)),
            _ => Err(format!("第 {} 题的正确答案在选项中重复出现", idx + 1)),
        }
    }
}

/// 题库：固定有序的题目序列，加载后只读
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBank {
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Question> {
        self.questions.get(idx)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.is_empty() {
            return Err("题库为空".to_string());
        }
        for (i, q) in self.questions.iter().enumerate() {
            q.validate(i)?;
        }
        Ok(())
    }
}

/// 测验阶段
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuizPhase {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

/// 会话状态：单个测验会话的全部可变数据
///
/// 所有转移操作都是同步的，时间由调用方采样后传入，
/// 状态机自身不读取时钟。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionState {
    pub phase: QuizPhase,
    /// 当前题目下标，仅在 InProgress 阶段有意义
    pub current_index: usize,
    pub score: usize,
    /// 题目下标 -> 已选答案；缺项表示尚未作答
    pub answers: HashMap<usize, String>,
    pub start_time: Option<DateTime<Local>>,
    /// 仅在 Completed 阶段有效的子状态，由用户显式触发
    pub reviewing: bool,
}

impl SessionState {
    /// 开始测验：NotStarted -> InProgress，记录起始时间
    pub fn start(&mut self, now: DateTime<Local>) {
        debug_assert_eq!(self.phase, QuizPhase::NotStarted);
        if self.phase != QuizPhase::NotStarted {
            return;
        }
        self.phase = QuizPhase::InProgress;
        self.current_index = 0;
        self.start_time = Some(now);
    }

    pub fn elapsed_seconds(&self, now: DateTime<Local>) -> i64 {
        self.start_time
            .map(|start| (now - start).num_seconds())
            .unwrap_or(0)
    }

    /// 剩余秒数，下限为 0
    pub fn remaining_seconds(&self, now: DateTime<Local>) -> i64 {
        (TEST_DURATION_SECONDS - self.elapsed_seconds(now)).max(0)
    }

    /// 超时检查：倒计时归零则强制结束，保留已记录的进度
    ///
    /// 每次渲染前调用，且必须先于同一轮中的作答动作执行。
    /// 返回 true 表示本次调用发生了 InProgress -> Completed 的转移。
    pub fn check_timeout(&mut self, now: DateTime<Local>) -> bool {
        if self.phase == QuizPhase::InProgress && self.remaining_seconds(now) == 0 {
            self.phase = QuizPhase::Completed;
            true
        } else {
            false
        }
    }

    /// 提交当前题目的答案并前进
    ///
    /// selected 不做合法性校验，任意字符串都按相等比较判分。
    /// 得分在每次提交后根据 answers 全量重算，
    /// 因此回退修改答案后重新提交不会重复计分。
    pub fn submit_answer(&mut self, bank: &QuestionBank, selected: String) {
        debug_assert_eq!(self.phase, QuizPhase::InProgress);
        if self.phase != QuizPhase::InProgress {
            return;
        }
        self.answers.insert(self.current_index, selected);
        self.score = self.recompute_score(bank);
        if self.current_index + 1 >= bank.len() {
            self.phase = QuizPhase::Completed;
        } else {
            self.current_index += 1;
        }
    }

    fn recompute_score(&self, bank: &QuestionBank) -> usize {
        self.answers
            .iter()
            .filter(|(idx, answer)| {
                bank.get(**idx)
                    .is_some_and(|q| q.correct_answer == **answer)
            })
            .count()
    }

    /// 回到上一题：记录当前选中项但不判分，下标减一
    ///
    /// 在第 0 题时为空操作。
    pub fn go_to_previous(&mut self, selected: String) {
        if self.phase != QuizPhase::InProgress || self.current_index == 0 {
            return;
        }
        self.answers.insert(self.current_index, selected);
        self.current_index -= 1;
    }

    /// 进入回顾模式，幂等
    pub fn toggle_review(&mut self) {
        debug_assert_eq!(self.phase, QuizPhase::Completed);
        if self.phase == QuizPhase::Completed {
            self.reviewing = true;
        }
    }

    /// 重新开始：整个会话回到初始状态，无前置条件
    pub fn restart(&mut self) {
        *self = SessionState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_bank(n: usize) -> QuestionBank {
        QuestionBank {
            questions: (0..n)
                .map(|i| Question {
                    kind: QuestionKind::SeriesCompletion,
                    prompts: vec![format!("图形 {}", i + 1)],
                    options_are_images: false,
                    options: vec![
                        "甲".to_string(),
                        "乙".to_string(),
                        "丙".to_string(),
                        "丁".to_string(),
                    ],
                    correct_answer: "甲".to_string(),
                    explanation: format!("第 {} 题说明", i + 1),
                })
                .collect(),
        }
    }

    #[test]
    fn test_start_sets_phase_and_time() {
        let mut session = SessionState::default();
        let now = Local::now();
        session.start(now);

        assert_eq!(session.phase, QuizPhase::InProgress);
        assert_eq!(session.current_index, 0);
        assert_eq!(session.start_time, Some(now));
    }

    #[test]
    fn test_partial_score() {
        let bank = test_bank(10);
        let mut session = SessionState::default();
        session.start(Local::now());

        // 前 3 题答对，后 7 题答错
        for i in 0..10 {
            let selected = if i < 3 { "甲" } else { "乙" };
            session.submit_answer(&bank, selected.to_string());
        }

        assert_eq!(session.score, 3);
        assert_eq!(session.phase, QuizPhase::Completed);
        assert_eq!(session.answers.len(), 10);
    }

    #[test]
    fn test_unknown_option_counts_wrong() {
        let bank = test_bank(2);
        let mut session = SessionState::default();
        session.start(Local::now());

        // 不在选项集合中的字符串按普通错误答案处理
        session.submit_answer(&bank, "不存在的选项".to_string());

        assert_eq!(session.score, 0);
        assert_eq!(session.current_index, 1);
    }

    #[test]
    fn test_go_to_previous_keeps_score_and_floors_at_zero() {
        let bank = test_bank(3);
        let mut session = SessionState::default();
        session.start(Local::now());

        // 第 0 题时回退是空操作
        session.go_to_previous("乙".to_string());
        assert_eq!(session.current_index, 0);
        assert!(session.answers.is_empty());

        session.submit_answer(&bank, "甲".to_string());
        assert_eq!(session.score, 1);

        // 回退记录当前选中项但不改变得分
        session.go_to_previous("乙".to_string());
        assert_eq!(session.current_index, 0);
        assert_eq!(session.score, 1);
        assert_eq!(session.answers.get(&1).map(String::as_str), Some("乙"));
    }

    #[test]
    fn test_resubmit_after_back_rescores() {
        let bank = test_bank(3);
        let mut session = SessionState::default();
        session.start(Local::now());

        session.submit_answer(&bank, "甲".to_string());
        assert_eq!(session.score, 1);

        // 回退后改成错误答案重新提交，得分随 answers 重算而下降
        session.go_to_previous("乙".to_string());
        session.submit_answer(&bank, "乙".to_string());
        assert_eq!(session.score, 0);
        assert_eq!(session.current_index, 1);

        // 再把第 1 题改对，得分恢复为 1，不会重复计分
        session.submit_answer(&bank, "甲".to_string());
        assert_eq!(session.score, 1);
    }

    #[test]
    fn test_remaining_clamped_and_monotonic() {
        let mut session = SessionState::default();
        let start = Local::now();
        session.start(start);

        assert_eq!(session.remaining_seconds(start), TEST_DURATION_SECONDS);

        let later = start + Duration::seconds(100);
        let even_later = start + Duration::seconds(200);
        assert!(session.remaining_seconds(later) > session.remaining_seconds(even_later));

        let after_deadline = start + Duration::seconds(TEST_DURATION_SECONDS + 50);
        assert_eq!(session.remaining_seconds(after_deadline), 0);
    }

    #[test]
    fn test_timeout_completes_and_preserves_progress() {
        let bank = test_bank(10);
        let mut session = SessionState::default();
        let start = Local::now();
        session.start(start);

        for _ in 0..4 {
            session.submit_answer(&bank, "甲".to_string());
        }
        assert_eq!(session.score, 4);

        let deadline = start + Duration::seconds(TEST_DURATION_SECONDS);
        assert!(session.check_timeout(deadline));
        assert_eq!(session.phase, QuizPhase::Completed);
        // 进度原样保留，未作答的题目保持缺项
        assert_eq!(session.score, 4);
        assert_eq!(session.current_index, 4);
        assert_eq!(session.answers.len(), 4);
    }

    #[test]
    fn test_check_timeout_noop_before_deadline() {
        let mut session = SessionState::default();
        let start = Local::now();
        session.start(start);

        assert!(!session.check_timeout(start + Duration::seconds(10)));
        assert_eq!(session.phase, QuizPhase::InProgress);
    }

    #[test]
    fn test_toggle_review_idempotent() {
        let bank = test_bank(1);
        let mut session = SessionState::default();
        session.start(Local::now());
        session.submit_answer(&bank, "甲".to_string());
        assert_eq!(session.phase, QuizPhase::Completed);

        session.toggle_review();
        let snapshot = session.clone();
        session.toggle_review();
        assert_eq!(session, snapshot);
        assert!(session.reviewing);
    }

    #[test]
    fn test_restart_resets_everything() {
        let bank = test_bank(3);
        let mut session = SessionState::default();
        session.start(Local::now());
        session.submit_answer(&bank, "甲".to_string());
        session.submit_answer(&bank, "乙".to_string());
        session.submit_answer(&bank, "甲".to_string());
        session.toggle_review();

        session.restart();
        assert_eq!(session, SessionState::default());
    }

    #[test]
    fn test_validate_rejects_ambiguous_correct_answer() {
        let mut bank = test_bank(1);
        bank.questions[0].options = vec!["甲".to_string(), "甲".to_string()];
        assert!(bank.validate().is_err());

        bank.questions[0].options = vec!["乙".to_string(), "丙".to_string()];
        assert!(bank.validate().is_err());

        bank.questions[0].options = vec!["甲".to_string(), "乙".to_string()];
        assert!(bank.validate().is_ok());
    }

    #[test]
    fn test_validate_odd_one_out_shape() {
        let mut bank = test_bank(1);
        bank.questions[0].options_are_images = true;
        // options 与 options_are_images 同时存在视为非法
        assert!(bank.validate().is_err());

        bank.questions[0].options = Vec::new();
        bank.questions[0].prompts = vec!["甲".to_string(), "乙".to_string()];
        assert!(bank.validate().is_ok());
    }
}
