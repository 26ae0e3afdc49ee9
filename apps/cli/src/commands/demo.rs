//! 演示流程
//!
//! LED 变绿 → 前进 5 秒 → 边走边左转 5 秒 → 开心表情。
//! 扫描与连接、断开由 One-shot 模式负责。

use anyhow::Result;
use ozo_sdk::ble::BleTransport;
use ozo_sdk::{Emotion, LedSelector, MotorCommand, OzoBot};

pub async fn run<T: BleTransport>(bot: &mut OzoBot<T>) -> Result<()> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use ozo_sdk::ble::MockTransport;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_demo_sequence() {
        let transport = MockTransport::new([19, 30]);
        let mut bot = OzoBot::new(transport.clone());
        bot.connect().await.unwrap();
        transport.clear_writes();

        let start = tokio::time::Instant::now();
        run(&mut bot).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(11));

        let hex = transport.written_hex();
        assert_eq!(hex.len(), 6);
        assert_eq!(hex[0], "6e00ff0000ff0000");
        assert_eq!(hex[1], "68000000000000000a000000000000140000");
        assert_eq!(hex[2], "68000000000000000a000000320000140000");
    }
}
