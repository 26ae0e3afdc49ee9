//! 命令定义和实现

pub mod config;
pub mod demo;
pub mod emotion;
pub mod leds;
pub mod r#move;
pub mod search;

pub use config::ConfigCommand;
pub use emotion::EmotionCommand;
pub use leds::LedsCommand;
pub use r#move::{MoveCommand, RotateCommand};
pub use search::SearchCommand;

use anyhow::Result;
use ozo_sdk::OzoBot;
use ozo_sdk::ble::BleTransport;

/// 需要连接机器人的一次性操作
#[derive(Debug)]
pub enum RobotAction {
    Leds(LedsCommand),
    Move(MoveCommand),
    Rotate(RotateCommand),
    Stop,
    Emotion(EmotionCommand),
    Demo,
}

impl RobotAction {
    pub async fn execute<T: BleTransport>(&self, bot: &mut OzoBot<T>) -> Result<()> {
        match self {
            RobotAction::Leds(cmd) => cmd.execute(bot).await,
            RobotAction::Move(cmd) => cmd.execute(bot).await,
            RobotAction::Rotate(cmd) => cmd.execute(bot).await,
            RobotAction::Stop => {
                println!("🛑 停止运动");
                bot.stop_movement().await?;
                Ok(())
            },
            RobotAction::Emotion(cmd) => cmd.execute(bot).await,
            RobotAction::Demo => demo::run(bot).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ozo_sdk::ble::MockTransport;

    #[tokio::test]
    async fn test_stop_action() {
        let transport = MockTransport::new([19, 30]);
        let mut bot = OzoBot::new(transport.clone());
        bot.connect().await.unwrap();
        transport.clear_writes();

        RobotAction::Stop.execute(&mut bot).await.unwrap();
        assert_eq!(
            transport.written_hex(),
            vec!["6800015cad020000000000000000ffffffff".to_string()]
        );
    }
}
