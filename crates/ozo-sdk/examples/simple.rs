//! 基础演示
//!
//! 扫描 → 连接 → LED 变绿 → 前进 5 秒 → 边走边左转 5 秒 → 开心表情 → 断开。
//! 按 Ctrl+C 会打断当前的等待并让小车停下。

use clap::Parser;
use ozo_sdk::prelude::*;
use std::time::Duration;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "simple")]
#[command(about = "Ozobot Evo 基础演示")]
struct Args {
    /// 设备地址（省略时扫描并使用第一个匹配的设备）
    #[arg(long)]
    address: Option<String>,

    /// 设备名称前缀
    #[arg(long, default_value = "Ozo")]
    prefix: String,

    /// 扫描时长（秒）
    #[arg(long, default_value = "10")]
    scan_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    ozo_sdk::init_logger("info");
    let args = Args::parse();

    println!("🤖 Ozo SDK - 基础演示");
    println!("=========================\n");

    // ==================== 步骤 1: 找到设备 ====================
    let address = match args.address {
        Some(address) => address,
        None => {
            println!("🔍 步骤 1: 扫描设备（{} 秒）...", args.scan_secs);
            let scanner = BluezScanner::new();
            let options = SearchOptions::new(&args.prefix, Duration::from_secs(args.scan_secs));
            let found = search(&scanner, &options).await?;
            for (name, address) in &found {
                println!("   {} => {}", name, address);
            }
            let Some((name, address)) = found.into_iter().next() else {
                anyhow::bail!("no device with prefix {:?} found", args.prefix);
            };
            println!("   使用 {}", name);
            address
        },
    };

    // ==================== 步骤 2: 连接 ====================
    println!("📡 步骤 2: 连接 {}...", address);
    let mut bot = OzoBuilder::new().address(&address).build()?;
    let token = bot.cancel_token();
    ctrlc::set_handler(move || token.cancel())?;
    bot.connect().await?;

    // ==================== 步骤 3: 动作 ====================
    let result = run(&mut bot).await;

    // ==================== 步骤 4: 断开 ====================
    println!("🔌 断开连接");
    bot.disconnect().await?;
    result
}

async fn run(bot: &mut OzoBot<BluezTransport>) -> anyhow::Result<()> {
    println!("💡 LED 变绿");
    bot.set_leds(LedSelector::ALL, 0, 255, 0).await?;

    println!("🚗 前进 5 秒");
    bot.control_motors(MotorCommand::drive(10, 5.0), true).await?;

    println!("↪️  边走边左转 5 秒");
    bot.control_motors(MotorCommand::drive(10, 5.0).with_turn_left(50), true)
        .await?;

    println!("😀 开心");
    bot.play_emotion(Emotion::Happy, true).await?;
    Ok(())
}
