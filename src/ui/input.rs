//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use std::io;

use chrono::Local;
use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, UiMode};
use crate::models::QuizPhase;

/// 根据界面模式、测验阶段和按键获取对应的 Action
pub fn get_action(app: &App, key: KeyCode) -> Option<Action> {
    if app.mode == UiMode::ConfirmRestart {
        return match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                Some(Action::ConfirmRestart)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        };
    }

    match app.session.phase {
        QuizPhase::NotStarted => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('s') | KeyCode::Enter => Some(Action::StartQuiz),
            _ => None,
        },
        QuizPhase::InProgress => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            KeyCode::Char('n') | KeyCode::Enter | KeyCode::Right => Some(Action::NextQuestion),
            KeyCode::Char('p') | KeyCode::Left => Some(Action::PrevQuestion),
            KeyCode::Char('r') => Some(Action::StartRestart),
            _ => None,
        },
        QuizPhase::Completed => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('r') => Some(Action::StartRestart),
            KeyCode::Char('v') | KeyCode::Enter => Some(Action::ToggleReview),
            // 回顾模式下 j/k 滚动列表
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            _ => None,
        },
    }
}

/// 处理按键事件
pub fn handle_key_event(app: &mut App, key: KeyCode) -> io::Result<bool> {
    if let Some(action) = get_action(app, key) {
        Ok(app.dispatch(action, Local::now()))
    } else {
        Ok(false)
    }
}
