//! LED 命令

use anyhow::Result;
use clap::Args;
use ozo_sdk::ble::BleTransport;
use ozo_sdk::{LedSelector, OzoBot};

/// LED 命令参数
#[derive(Args, Debug, Clone)]
pub struct LedsCommand {
    /// LED 组合（top, left, center_left, center, center_right, right, back, all），
    /// 用 `|` 或 `,` 连接
    #[arg(short, long, default_value = "all")]
    pub leds: LedSelector,

    /// 红色分量（0-255）
    #[arg(short, long, default_value_t = 0)]
    pub red: u8,

    /// 绿色分量（0-255）
    #[arg(short, long, default_value_t = 0)]
    pub green: u8,

    /// 蓝色分量（0-255）
    #[arg(short, long, default_value_t = 0)]
    pub blue: u8,
}

impl LedsCommand {
    pub async fn execute<T: BleTransport>(&self, bot: &mut OzoBot<T>) -> Result<()> {
        println!(
            "💡 LED {:?} → RGB({}, {}, {})",
            self.leds, self.red, self.green, self.blue
        );
        bot.set_leds(self.leds, self.red, self.green, self.blue).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use ozo_sdk::ble::MockTransport;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: LedsCommand,
    }

    #[test]
    fn test_parse_defaults() {
        let cli = TestCli::parse_from(["test"]);
        assert_eq!(cli.args.leds, LedSelector::ALL);
        assert_eq!((cli.args.red, cli.args.green, cli.args.blue), (0, 0, 0));
    }

    #[test]
    fn test_parse_selection() {
        let cli = TestCli::parse_from(["test", "--leds", "left|right", "-g", "255"]);
        assert_eq!(cli.args.leds, LedSelector::LEFT | LedSelector::RIGHT);
        assert_eq!(cli.args.green, 255);
    }

    #[test]
    fn test_parse_rejects_out_of_range_colour() {
        assert!(TestCli::try_parse_from(["test", "--red", "256"]).is_err());
        assert!(TestCli::try_parse_from(["test", "--leds", "nose"]).is_err());
    }

    #[tokio::test]
    async fn test_execute_writes_led_command() {
        let transport = MockTransport::new([19, 30]);
        let mut bot = OzoBot::new(transport.clone());
        bot.connect().await.unwrap();
        transport.clear_writes();

        let cmd = LedsCommand {
            leds: LedSelector::BACK,
            red: 1,
            green: 2,
            blue: 3,
        };
        cmd.execute(&mut bot).await.unwrap();
        assert_eq!(transport.written_hex(), vec!["6e00800001020300".to_string()]);
    }
}
