//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

/// 用户操作枚举
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    MoveSelectionUp,
    MoveSelectionDown,

    // 测验流程
    StartQuiz,
    NextQuestion,
    PrevQuestion,
    ToggleReview,

    // 重新开始（经确认弹窗）
    StartRestart,
    ConfirmRestart,
    Cancel, // Esc / n
}
