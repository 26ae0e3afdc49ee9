//! 遥控模式（交互式 Shell）
//!
//! 专用输入线程 + crossbeam 通道：保留历史记录，不阻塞 tokio。
//!
//! 每行输入一个按键后回车：
//!
//! | 按键 | 动作 |
//! |------|------|
//! | `w` | 前进（速度 10） |
//! | `2` | 全速前进（速度 255） |
//! | `s` | 后退（速度 10） |
//! | `a` / `d` | 左转 / 右转 |
//! | `r` / `g` / `b` | LED 变红 / 绿 / 蓝 |
//! | `e` | 开心表情 |
//! | `q` | 退出 |
//! | 其他（含空行、Ctrl+C） | 停止 |

use anyhow::Result;
use crossbeam_channel::{Receiver, bounded};
use ozo_sdk::ble::BleTransport;
use ozo_sdk::{Emotion, LedSelector, MotorCommand, OzoBot};
use rustyline::DefaultEditor;
use std::thread;
use tracing::warn;

use super::oneshot::{ConnectArgs, OneShotMode, finish};

/// Ctrl+C 在输入线程中被转换为该标记
const INTERRUPT: &str = "\u{3}";

/// 按键对应的动作
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TeleopAction {
    Drive(MotorCommand),
    Leds { red: u8, green: u8, blue: u8 },
    Emotion(Emotion),
    Help,
    Stop,
    Quit,
}

impl TeleopAction {
    /// 解析一行输入
    pub fn from_key(line: &str) -> Self {
        match line.trim() {
            "q" | "quit" | "exit" => TeleopAction::Quit,
            "help" | "?" => TeleopAction::Help,
            "w" => TeleopAction::Drive(MotorCommand::default().with_speed(10)),
            "2" => TeleopAction::Drive(MotorCommand::default().with_speed(255)),
            "s" => TeleopAction::Drive(MotorCommand::default().with_speed(-10)),
            "a" => TeleopAction::Drive(MotorCommand::default().with_turn_left(255)),
            "d" => TeleopAction::Drive(MotorCommand::default().with_turn_right(255)),
            "r" => TeleopAction::Leds {
                red: 255,
                green: 0,
                blue: 0,
            },
            "g" => TeleopAction::Leds {
                red: 0,
                green: 255,
                blue: 0,
            },
            "b" => TeleopAction::Leds {
                red: 0,
                green: 0,
                blue: 255,
            },
            "e" => TeleopAction::Emotion(Emotion::Happy),
            _ => TeleopAction::Stop,
        }
    }

    /// 执行动作（不等待）；返回 `false` 表示退出
    pub async fn apply<T: BleTransport>(self, bot: &mut OzoBot<T>) -> Result<bool> {
        match self {
            TeleopAction::Drive(command) => bot.control_motors(command, false).await?,
            TeleopAction::Leds { red, green, blue } => {
                bot.set_leds(LedSelector::ALL, red, green, blue).await?
            },
            TeleopAction::Emotion(emotion) => bot.play_emotion(emotion, false).await?,
            TeleopAction::Help => print_help(),
            TeleopAction::Stop => bot.stop_movement().await?,
            TeleopAction::Quit => return Ok(false),
        }
        Ok(true)
    }
}

/// 输入线程
pub struct ReplInput {
    command_rx: Receiver<String>,
    _input_thread: thread::JoinHandle<Result<()>>,
}

impl ReplInput {
    /// 创建专用输入线程（保留历史记录）
    pub fn new() -> Self {
        let (command_tx, command_rx) = bounded::<String>(10);

        // Editor 在输入线程内创建，生命周期与会话一致
        let input_thread = thread::spawn(move || {
            let mut rl = DefaultEditor::new()
                .map_err(|e| anyhow::anyhow!("Failed to initialize readline: {}", e))?;

            let history_path = ".ozo_history";
            rl.load_history(history_path).ok(); // 首次运行没有历史文件

            loop {
                match rl.readline("ozo> ") {
                    Ok(line) => {
                        let line = line.trim().to_string();
                        if !line.is_empty() {
                            let _ = rl.add_history_entry(line.as_str());
                        }

                        let quit = TeleopAction::from_key(&line) == TeleopAction::Quit;
                        if command_tx.send(line).is_err() || quit {
                            break;
                        }
                    },

                    Err(rustyline::error::ReadlineError::Interrupted) => {
                        println!("^C");
                        if command_tx.send(INTERRUPT.to_string()).is_err() {
                            break;
                        }
                    },

                    Err(rustyline::error::ReadlineError::Eof) => {
                        let _ = command_tx.send("q".to_string());
                        break;
                    },

                    Err(err) => {
                        eprintln!("Error: {:?}", err);
                        let _ = command_tx.send("q".to_string());
                        break;
                    },
                }
            }

            rl.save_history(history_path).ok();
            Ok(())
        });

        Self {
            command_rx,
            _input_thread: input_thread,
        }
    }

    /// 等待用户输入（在 tokio 任务中使用）
    pub async fn recv_command(&self) -> Option<String> {
        let rx = self.command_rx.clone();
        tokio::task::spawn_blocking(move || rx.recv())
            .await
            .ok()
            .and_then(|result| result.ok())
    }
}

/// 运行遥控模式
pub async fn run_repl(args: &ConnectArgs) -> Result<()> {
    let mode = OneShotMode::new(args)?;
    let mut bot = mode.connect().await?;

    println!();
    println!("Ozo CLI v{} - 遥控模式", env!("CARGO_PKG_VERSION"));
    print_help();

    let input = ReplInput::new();
    let result = teleop_loop(&input, &mut bot).await;
    finish(&mut bot, result).await
}

async fn teleop_loop<T: BleTransport>(input: &ReplInput, bot: &mut OzoBot<T>) -> Result<()> {
    while let Some(line) = input.recv_command().await {
        if line == INTERRUPT {
            eprintln!("🛑 停止");
        }

        let action = TeleopAction::from_key(&line);
        match action.apply(bot).await {
            Ok(true) => {},
            Ok(false) => break,
            // 单条指令失败不结束会话
            Err(e) => {
                warn!("Teleop command failed: {}", e);
                eprintln!("❌ Error: {}", e);
            },
        }
    }
    Ok(())
}

/// 打印帮助信息
fn print_help() {
    println!("按键（输入后回车）:");
    println!("  w        前进");
    println!("  2        全速前进");
    println!("  s        后退");
    println!("  a / d    左转 / 右转");
    println!("  r/g/b    LED 变红 / 绿 / 蓝");
    println!("  e        开心表情");
    println!("  q        退出");
    println!("  其他     停止（空行、Ctrl+C 同样停止）");
    println!();
}
