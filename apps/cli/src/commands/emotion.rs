//! 表情命令

use anyhow::Result;
use clap::Args;
use ozo_sdk::ble::BleTransport;
use ozo_sdk::{Emotion, OzoBot, ProtocolError};

/// 解析表情：名称（happy/sad/surprised/laugh）或编号（1-4）
pub fn parse_emotion(s: &str) -> Result<Emotion, ProtocolError> {
    match s.trim().parse::<u8>() {
        Ok(selector) => Emotion::try_from(selector),
        Err(_) => s.parse(),
    }
}

/// 表情命令参数
#[derive(Args, Debug, Clone)]
pub struct EmotionCommand {
    /// 表情名称或编号（happy=1, sad=2, surprised=3, laugh=4）
    #[arg(value_parser = parse_emotion)]
    pub emotion: Emotion,

    /// 发送后立即返回
    #[arg(long)]
    pub no_wait: bool,
}

impl EmotionCommand {
    pub async fn execute<T: BleTransport>(&self, bot: &mut OzoBot<T>) -> Result<()> {
        println!("🎭 播放表情: {}", self.emotion);
        bot.play_emotion(self.emotion, !self.no_wait).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_emotion() {
        assert_eq!(parse_emotion("happy").unwrap(), Emotion::Happy);
        assert_eq!(parse_emotion("LAUGH").unwrap(), Emotion::Laugh);
        assert_eq!(parse_emotion("2").unwrap(), Emotion::Sad);
        assert_eq!(parse_emotion("3").unwrap(), Emotion::Surprised);
        assert_eq!(
            parse_emotion("9").unwrap_err(),
            ProtocolError::UnknownEmotion(9)
        );
        assert!(matches!(
            parse_emotion("angry"),
            Err(ProtocolError::UnknownEmotionName(_))
        ));
    }
}
