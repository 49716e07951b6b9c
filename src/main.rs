mod bank;
mod models;
mod snapshot;
mod storage;
mod ui;

use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::models::QuizPhase;
use crate::storage::load_bank;
use crate::ui::{App, render};

/// 获取数据目录路径 (~/.local/share/pattern-seeker/)
fn get_data_dir() -> io::Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "无法获取用户数据目录"))?
        .join("pattern-seeker");

    fs::create_dir_all(&data_dir)?;

    Ok(data_dir)
}

fn main() -> io::Result<()> {
    // 自定义题库路径 (~/.local/share/pattern-seeker/questions.toml)，
    // 文件不存在时使用内置题库
    let bank_path = get_data_dir()?.join("questions.toml");

    // 加载题库
    let bank = load_bank(&bank_path)?;

    // 创建应用状态
    let mut app = App::new(bank);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 恢复终端
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    // 退出时回显成绩
    if app.session.phase == QuizPhase::Completed {
        println!("最终得分：{} / {}", app.session.score, app.bank.len());
    }

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        // 每轮先做超时检查，再渲染和处理按键，
        // 保证倒计时归零后任何未提交的作答都会被丢弃
        if app.session.check_timeout(Local::now()) {
            app.message = Some("时间到！测验已结束".to_string());
        }

        terminal.draw(|f| render(f, app))?;

        // 带超时的轮询：没有按键时也按固定节奏刷新倒计时
        if crossterm::event::poll(Duration::from_millis(250))? {
            if let crossterm::event::Event::Key(key) = crossterm::event::read()? {
                if key.kind == crossterm::event::KeyEventKind::Press {
                    if ui::handle_key_event(app, key.code)? {
                        break;
                    }
                }
            }
        }
    }
    Ok(())
}
