//! 视图层模块
//!
//! 包含主渲染入口和各屏幕的渲染函数。
//! 渲染只读取由 snapshot::project 生成的快照与 App 内的界面状态。

pub mod components;
pub mod layouts;

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::state::{App, UiMode};
use crate::models::{NUM_QUESTIONS, QuizPhase, TEST_DURATION_SECONDS};
use crate::snapshot::{QuestionView, ReviewEntry, Snapshot, project};
use components::render_dialog_framework;
use layouts::centered_rect;

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &mut App) {
    // 每次渲染重新采样时间并生成快照
    let snapshot = project(&app.bank, &app.session, Local::now());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题 + 倒计时
            Constraint::Min(10),   // 主体
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_title(frame, &snapshot, chunks[0]);

    match (&snapshot.question, &snapshot.review, snapshot.phase) {
        (Some(view), _, _) => render_question(frame, app, view, chunks[1]),
        (_, Some(entries), _) => render_review(frame, app, entries, chunks[1]),
        (_, _, QuizPhase::Completed) => render_result(frame, &snapshot, chunks[1]),
        _ => render_welcome(frame, chunks[1]),
    }

    render_help(frame, app, chunks[2]);

    // 渲染弹窗
    if app.mode == UiMode::ConfirmRestart {
        render_restart_dialog(frame);
    }
}

fn render_title(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    match &snapshot.time_display {
        Some(time) => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(20), Constraint::Length(26)])
                .split(area);

            let title = Paragraph::new("🧠 图形推理挑战")
                .style(title_style)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(title, chunks[0]);

            let timer = Paragraph::new(format!("⏰ 剩余时间 {}", time))
                .style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(timer, chunks[1]);
        }
        None => {
            let title = Paragraph::new("🧠 图形推理挑战")
                .style(title_style)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(title, area);
        }
    }
}

fn render_welcome(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from("欢迎来到图形推理挑战！"),
        Line::from(""),
        Line::from("本测验通过识别视觉序列中的规律，评估你的逻辑与抽象推理能力。"),
        Line::from(format!(
            "你将有 {} 分钟时间完成 {} 道题目。",
            TEST_DURATION_SECONDS / 60,
            NUM_QUESTIONS
        )),
        Line::from(""),
        Line::from(Span::styled(
            "注意：计时一旦开始便不会暂停。",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let welcome = Paragraph::new(lines)
        .block(Block::default().title("测验说明").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(welcome, area);
}

fn render_question(frame: &mut Frame, app: &App, view: &QuestionView, area: Rect) {
    let prompt_height = view.prompts.len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(prompt_height), Constraint::Min(6)])
        .split(area);

    // 提示图形
    let prompt_lines: Vec<Line> = view
        .prompts
        .iter()
        .enumerate()
        .map(|(i, p)| Line::from(format!("图 {}：{}", i + 1, p)))
        .collect();

    let prompts = Paragraph::new(prompt_lines)
        .block(
            Block::default()
                .title(format!(
                    "第 {}/{} 题 · {}",
                    view.number, view.total, view.kind_label
                ))
                .borders(Borders::ALL),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(prompts, chunks[0]);

    // 选项列表
    let items: Vec<ListItem> = view
        .choices
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            let style = if i == app.selected_option {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default()
            };
            // 已提交过的答案带标记，回退浏览时一目了然
            let marker = if view.recorded.as_deref() == Some(choice.as_str()) {
                "●"
            } else {
                " "
            };
            ListItem::new(Line::from(Span::styled(
                format!("{} {}. {}", marker, i + 1, choice),
                style,
            )))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title(view.instruction).borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.selected_option));

    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn render_result(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "🎉 测验完成！",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("你的得分：{} / {}", snapshot.score, snapshot.total)),
        Line::from(""),
        Line::from("感谢参与测验，按 [v] 查看每道题的作答情况。"),
    ];

    let result = Paragraph::new(lines)
        .block(Block::default().title("测验结果").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(result, area);
}

fn render_review(frame: &mut Frame, app: &App, entries: &[ReviewEntry], area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    for entry in entries {
        lines.push(Line::from(Span::styled(
            format!("第 {} 题 · {}", entry.number, entry.kind_label),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
        for (i, prompt) in entry.prompts.iter().enumerate() {
            lines.push(Line::from(format!("  图 {}：{}", i + 1, prompt)));
        }

        let (mark, color) = if entry.is_correct {
            ("✅ 正确", Color::Green)
        } else {
            ("❌ 错误", Color::Red)
        };
        let selected = entry.selected.as_deref().unwrap_or("未作答");
        lines.push(Line::from(vec![
            Span::raw(format!("  你的答案：{}  ", selected)),
            Span::styled(mark, Style::default().fg(color)),
        ]));
        lines.push(Line::from(format!("  正确答案：{}", entry.correct_answer)));
        lines.push(Line::from(Span::styled(
            format!("  逻辑说明：{}", entry.explanation),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(""));
    }

    let review = Paragraph::new(lines)
        .block(Block::default().title("答题回顾").borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((app.review_scroll, 0));

    frame.render_widget(review, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.mode == UiMode::ConfirmRestart {
        "[y] 确认  [n] 取消"
    } else {
        match app.session.phase {
            QuizPhase::NotStarted => "[Enter] 开始测验  [q] 退出",
            QuizPhase::InProgress => {
                "[j/k] 选择选项  [Enter] 下一题  [p] 上一题  [r] 重新开始  [q] 退出"
            }
            QuizPhase::Completed if app.session.reviewing => {
                "[j/k] 滚动  [r] 重新开始  [q] 退出"
            }
            QuizPhase::Completed => "[v] 回顾答题  [r] 重新开始  [q] 退出",
        }
    };

    let message = app.message.as_deref().unwrap_or("");
    let text = if message.is_empty() {
        help_text.to_string()
    } else {
        format!("{}  |  {}", help_text, message)
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_restart_dialog(frame: &mut Frame) {
    let area = centered_rect(50, 20, frame.area());
    let inner = render_dialog_framework(frame, area, "⚠️ 确认操作");

    let dialog = Paragraph::new("确认重新开始？当前作答进度将被清空。\n\n[y] 确认  [n] 取消")
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true });

    frame.render_widget(dialog, inner);
}
