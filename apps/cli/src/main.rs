//! # Ozo CLI
//!
//! Command-line interface for Ozobot Evo control.
//!
//! ## 双模式架构
//!
//! ### One-shot 模式（推荐用于脚本）
//!
//! ```bash
//! # 配置默认设备
//! ozo-cli config set address AA:BB:CC:DD:EE:FF
//!
//! # 执行操作（内部：连接 -> 执行 -> 断开）
//! ozo-cli leds --leds left,right --green 255
//! ozo-cli move --speed 10 --duration 5
//! ozo-cli emotion happy
//! ```
//!
//! ### 遥控模式
//!
//! ```bash
//! $ ozo-cli shell
//! ozo> w
//! ozo> a
//! ozo> q
//! ```

#[cfg(not(target_os = "linux"))]
compile_error!("ozo-cli requires the BlueZ backend and only builds on Linux");

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod modes;

use commands::{
    ConfigCommand, EmotionCommand, LedsCommand, MoveCommand, RobotAction, RotateCommand,
    SearchCommand,
};
use modes::oneshot::{ConnectArgs, OneShotMode};
use modes::repl::run_repl;

/// Ozo CLI - Ozobot Evo 命令行工具
#[derive(Parser, Debug)]
#[command(name = "ozo-cli")]
#[command(about = "Command-line interface for Ozobot Evo control", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    connect: ConnectArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 配置管理
    #[command(subcommand)]
    Config(ConfigCommand),

    /// 扫描附近设备
    Search,

    /// 设置 LED 颜色
    Leds {
        #[command(flatten)]
        args: LedsCommand,
    },

    /// 行驶
    Move {
        #[command(flatten)]
        args: MoveCommand,
    },

    /// 原地旋转约 90°
    Rotate {
        #[command(flatten)]
        args: RotateCommand,
    },

    /// 停止运动
    Stop,

    /// 播放表情
    Emotion {
        #[command(flatten)]
        args: EmotionCommand,
    },

    /// 演示：LED、前进、转弯、表情
    Demo,

    /// 启动遥控 Shell
    Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ozo_cli=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let action = match cli.command {
        Commands::Config(cmd) => return cmd.execute().await,

        Commands::Search => {
            let mode = OneShotMode::new(&cli.connect)?;
            let search = SearchCommand::new(mode.config().search.clone());
            search.execute(&mode.scanner()).await?;
            return Ok(());
        },

        Commands::Shell => return run_repl(&cli.connect).await,

        Commands::Leds { args } => RobotAction::Leds(args),
        Commands::Move { args } => RobotAction::Move(args),
        Commands::Rotate { args } => RobotAction::Rotate(args),
        Commands::Stop => RobotAction::Stop,
        Commands::Emotion { args } => RobotAction::Emotion(args),
        Commands::Demo => RobotAction::Demo,
    };

    OneShotMode::new(&cli.connect)?.run(&action).await
}
