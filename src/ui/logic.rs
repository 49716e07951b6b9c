//! 业务逻辑处理 (Update/Dispatch)
//!
//! 包含核心的 dispatch 逻辑和各种业务处理方法。
//! 所有需要时间的操作都以参数形式接收采样好的 now。

use chrono::{DateTime, Local};

use super::actions::Action;
use super::state::{App, UiMode};
use crate::models::QuizPhase;

impl App {
    /// 核心逻辑分发，返回 true 表示退出应用
    pub fn dispatch(&mut self, action: Action, now: DateTime<Local>) -> bool {
        match action {
            Action::Quit => return true,
            Action::MoveSelectionUp => self.move_selection_up(),
            Action::MoveSelectionDown => self.move_selection_down(),

            Action::StartQuiz => self.start_quiz(now),
            Action::NextQuestion => self.submit_current(now),
            Action::PrevQuestion => self.go_previous(now),
            Action::ToggleReview => self.toggle_review(),

            Action::StartRestart => self.mode = UiMode::ConfirmRestart,
            Action::ConfirmRestart => self.confirm_restart(),
            Action::Cancel => self.cancel(),
        }
        false
    }

    // ============ 选择/滚动相关 ============

    /// 向上移动：答题时切换选项，回顾时滚动列表
    pub fn move_selection_up(&mut self) {
        match self.session.phase {
            QuizPhase::InProgress => {
                if self.selected_option > 0 {
                    self.selected_option -= 1;
                }
            }
            QuizPhase::Completed if self.session.reviewing => {
                self.review_scroll = self.review_scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    /// 向下移动：答题时切换选项，回顾时滚动列表
    pub fn move_selection_down(&mut self) {
        match self.session.phase {
            QuizPhase::InProgress => {
                if self.selected_option + 1 < self.current_choices().len() {
                    self.selected_option += 1;
                }
            }
            QuizPhase::Completed if self.session.reviewing => {
                self.review_scroll = self.review_scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    // ============ 测验流程相关 ============

    /// 开始测验
    pub fn start_quiz(&mut self, now: DateTime<Local>) {
        if self.session.phase != QuizPhase::NotStarted {
            return;
        }
        self.session.start(now);
        self.sync_selection();
        self.message = None;
    }

    /// 提交当前选中项并前进到下一题（或结束测验）
    ///
    /// 超时检查先于提交执行：倒计时已归零时丢弃本次作答。
    pub fn submit_current(&mut self, now: DateTime<Local>) {
        if self.session.phase != QuizPhase::InProgress {
            return;
        }
        if self.session.check_timeout(now) {
            self.message = Some("时间到！测验已结束".to_string());
            return;
        }
        if let Some(selected) = self.pending_selection() {
            self.session.submit_answer(&self.bank, selected);
            if self.session.phase == QuizPhase::InProgress {
                self.sync_selection();
            }
        }
    }

    /// 记录当前选中项并回到上一题（第 0 题时不可用）
    pub fn go_previous(&mut self, now: DateTime<Local>) {
        if self.session.phase != QuizPhase::InProgress {
            return;
        }
        if self.session.check_timeout(now) {
            self.message = Some("时间到！测验已结束".to_string());
            return;
        }
        if self.session.current_index == 0 {
            return;
        }
        if let Some(selected) = self.pending_selection() {
            self.session.go_to_previous(selected);
            self.sync_selection();
        }
    }

    /// 进入回顾模式
    pub fn toggle_review(&mut self) {
        if self.session.phase == QuizPhase::Completed {
            self.session.toggle_review();
            self.review_scroll = 0;
        }
    }

    // ============ 重新开始相关 ============

    /// 确认重新开始：会话完整重置
    pub fn confirm_restart(&mut self) {
        self.session.restart();
        self.selected_option = 0;
        self.review_scroll = 0;
        self.mode = UiMode::Normal;
        self.message = Some("已重新开始".to_string());
    }

    /// 取消当前弹窗
    pub fn cancel(&mut self) {
        self.mode = UiMode::Normal;
        self.message = None;
    }
}
