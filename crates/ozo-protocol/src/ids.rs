//! 通道（GATT 特征值）ID 与操作码常量
//!
//! Evo 只使用两个特征值：电机通道和默认通道。
//! 二者在连接时按数值 ID 解析一次，之后在整个连接期间缓存。

/// 电机通道特征值 ID
pub const MOTOR_CHARACTERISTIC_ID: u16 = 19;

/// 默认通道特征值 ID（LED、声音、表情、停止等）
pub const DEFAULT_CHARACTERISTIC_ID: u16 = 30;

/// LED 指令操作码
pub const OPCODE_LED: u8 = 0x6e;

/// 电机指令操作码
pub const OPCODE_MOTOR: u8 = 0x68;

/// 逻辑通道
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    /// 电机通道（ID 19）
    Motor,
    /// 默认通道（ID 30）
    Default,
}

impl Channel {
    /// 所有需要解析的通道（按解析顺序）
    pub const ALL: [Channel; 2] = [Channel::Motor, Channel::Default];

    /// 通道对应的特征值 ID
    pub const fn id(self) -> u16 {
        match self {
            Channel::Motor => MOTOR_CHARACTERISTIC_ID,
            Channel::Default => DEFAULT_CHARACTERISTIC_ID,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Channel::Motor => write!(f, "motor({})", self.id()),
            Channel::Default => write!(f, "default({})", self.id()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_ids() {
        assert_eq!(Channel::Motor.id(), 19);
        assert_eq!(Channel::Default.id(), 30);
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::Motor.to_string(), "motor(19)");
        assert_eq!(Channel::Default.to_string(), "default(30)");
    }
}
