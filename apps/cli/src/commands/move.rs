//! 运动命令
//!
//! `move`：按速度/转向/持续时间行驶；`rotate`：原地旋转约 90°。
//! 数值超出范围时由协议层静默钳位。

use anyhow::Result;
use clap::{Args, ValueEnum};
use ozo_sdk::ble::BleTransport;
use ozo_sdk::protocol::DEFAULT_MOTOR_DURATION_SECS;
use ozo_sdk::{MotorCommand, OzoBot};

/// 行驶命令参数
#[derive(Args, Debug, Clone)]
pub struct MoveCommand {
    /// 速度（-256 ~ 255，负数后退）
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub speed: i32,

    /// 左转幅度（0-255）
    #[arg(long, default_value_t = 0)]
    pub left: i32,

    /// 右转幅度（0-255）
    #[arg(long, default_value_t = 0)]
    pub right: i32,

    /// 持续时间（秒，0-32768）
    #[arg(short, long, default_value_t = DEFAULT_MOTOR_DURATION_SECS)]
    pub duration: f64,

    /// 发送后立即返回，不等待运动结束
    #[arg(long)]
    pub no_wait: bool,
}

impl MoveCommand {
    pub fn to_motor_command(&self) -> MotorCommand {
        MotorCommand::drive(self.speed, self.duration)
            .with_turn_left(self.left)
            .with_turn_right(self.right)
    }

    pub async fn execute<T: BleTransport>(&self, bot: &mut OzoBot<T>) -> Result<()> {
        let command = self.to_motor_command();
        println!(
            "🚗 速度 {}，左转 {}，右转 {}，持续 {:.2} 秒",
            self.speed,
            self.left,
            self.right,
            command.clamped_duration()
        );
        bot.control_motors(command, !self.no_wait).await?;
        Ok(())
    }
}

/// 旋转方向
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateDirection {
    Left,
    Right,
}

/// 旋转命令参数
#[derive(Args, Debug, Clone)]
pub struct RotateCommand {
    /// 方向
    #[arg(value_enum)]
    pub direction: RotateDirection,

    /// 发送后立即返回，不等待旋转结束
    #[arg(long)]
    pub no_wait: bool,
}

impl RotateCommand {
    pub async fn execute<T: BleTransport>(&self, bot: &mut OzoBot<T>) -> Result<()> {
        let wait = !self.no_wait;
        match self.direction {
            RotateDirection::Left => {
                println!("↩️  左转");
                bot.rotate_left(wait).await?;
            },
            RotateDirection::Right => {
                println!("↪️  右转");
                bot.rotate_right(wait).await?;
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use ozo_sdk::ble::MockTransport;
    use std::time::Duration;

    #[derive(Parser)]
    struct MoveCli {
        #[command(flatten)]
        args: MoveCommand,
    }

    #[derive(Parser)]
    struct RotateCli {
        #[command(flatten)]
        args: RotateCommand,
    }

    #[test]
    fn test_parse_move_defaults() {
        let cli = MoveCli::parse_from(["test"]);
        assert_eq!(cli.args.speed, 0);
        assert_eq!(cli.args.duration, 10.0);
        assert!(!cli.args.no_wait);
    }

    #[test]
    fn test_parse_negative_speed() {
        let cli = MoveCli::parse_from(["test", "--speed", "-10", "--left", "50", "-d", "2.5"]);
        let cmd = cli.args.to_motor_command();
        assert_eq!(cmd.speed, -10);
        assert_eq!(cmd.turn_left, 50);
        assert_eq!(cmd.duration, 2.5);
    }

    #[test]
    fn test_parse_rotate() {
        let cli = RotateCli::parse_from(["test", "left", "--no-wait"]);
        assert_eq!(cli.args.direction, RotateDirection::Left);
        assert!(cli.args.no_wait);
        assert!(RotateCli::try_parse_from(["test", "up"]).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_move_waits() {
        let transport = MockTransport::new([19, 30]);
        let mut bot = OzoBot::new(transport.clone());
        bot.connect().await.unwrap();
        transport.clear_writes();

        let cmd = MoveCommand {
            speed: 10,
            left: 0,
            right: 0,
            duration: 5.0,
            no_wait: false,
        };
        let start = tokio::time::Instant::now();
        cmd.execute(&mut bot).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(5));
        assert_eq!(
            transport.written_hex(),
            vec!["68000000000000000a000000000000140000".to_string()]
        );
    }

    #[tokio::test]
    async fn test_rotate_no_wait() {
        let transport = MockTransport::new([19, 30]);
        let mut bot = OzoBot::new(transport.clone());
        bot.connect().await.unwrap();
        transport.clear_writes();

        let cmd = RotateCommand {
            direction: RotateDirection::Right,
            no_wait: true,
        };
        cmd.execute(&mut bot).await.unwrap();
        let writes = transport.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].channel_id, 19);
        assert_eq!(writes[0].data[13], 255);
    }
}
