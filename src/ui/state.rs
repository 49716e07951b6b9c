//! App 状态定义 (Model)
//!
//! 包含应用状态结构体及相关枚举

use crate::models::{QuestionBank, SessionState};

/// 应用状态
pub struct App {
    pub bank: QuestionBank,
    pub session: SessionState,
    pub mode: UiMode,
    /// 当前题目内待提交的选中项下标（尚未调用任何转移操作）
    pub selected_option: usize,
    /// 回顾列表的滚动偏移
    pub review_scroll: u16,
    pub message: Option<String>,
}

/// 界面模式
#[derive(Debug, Clone, PartialEq)]
pub enum UiMode {
    Normal,
    /// 重新开始前的确认弹窗
    ConfirmRestart,
}

impl App {
    /// 创建新的应用实例
    pub fn new(bank: QuestionBank) -> Self {
        Self {
            bank,
            session: SessionState::default(),
            mode: UiMode::Normal,
            selected_option: 0,
            review_scroll: 0,
            message: None,
        }
    }

    /// 当前题目的选项集合
    pub fn current_choices(&self) -> &[String] {
        self.bank
            .get(self.session.current_index)
            .map(|q| q.choices())
            .unwrap_or(&[])
    }

    /// 当前待提交的选中项内容
    pub fn pending_selection(&self) -> Option<String> {
        self.current_choices().get(self.selected_option).cloned()
    }

    /// 进入一道题时同步选中项：有已记录的答案则恢复，否则选第一项
    pub fn sync_selection(&mut self) {
        let idx = self.session.current_index;
        let pos = self
            .session
            .answers
            .get(&idx)
            .and_then(|answer| self.current_choices().iter().position(|c| c == answer))
            .unwrap_or(0);
        self.selected_option = pos;
    }
}
