//! LED 选择位掩码
//!
//! 每一位对应机器人上的一颗 LED。位 6 (0x40) 未使用。
//! 在线上以 2 字节大端形式编码。

use crate::ProtocolError;
use bitflags::bitflags;
use std::str::FromStr;

bitflags! {
    /// LED 选择器
    ///
    /// ```rust
    /// use ozo_protocol::LedSelector;
    ///
    /// let front = LedSelector::LEFT | LedSelector::RIGHT;
    /// assert_eq!(front.bits(), 0x22);
    /// assert_eq!(LedSelector::ALL.bits(), 0xFF);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct LedSelector: u16 {
        const TOP = 1;
        const LEFT = 2;
        const CENTER_LEFT = 4;
        const CENTER = 8;
        const CENTER_RIGHT = 16;
        const RIGHT = 32;
        const BACK = 128;
        /// 全部 LED（包含未使用的 0x40 位，与设备固件一致）
        const ALL = 255;
    }
}

impl Default for LedSelector {
    fn default() -> Self {
        LedSelector::ALL
    }
}

impl LedSelector {
    /// 大端字节表示
    pub fn to_be_bytes(self) -> [u8; 2] {
        self.bits().to_be_bytes()
    }

    fn parse_name(name: &str) -> Result<Self, ProtocolError> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "top" => Ok(LedSelector::TOP),
            "left" => Ok(LedSelector::LEFT),
            "center_left" => Ok(LedSelector::CENTER_LEFT),
            "center" => Ok(LedSelector::CENTER),
            "center_right" => Ok(LedSelector::CENTER_RIGHT),
            "right" => Ok(LedSelector::RIGHT),
            "back" => Ok(LedSelector::BACK),
            "all" => Ok(LedSelector::ALL),
            _ => Err(ProtocolError::UnknownLed(name.trim().to_string())),
        }
    }
}

/// 解析 LED 名称组合
///
/// 支持 `|`、`,`、`+` 分隔，如 `"left|right"`、`"top,back"`。
impl FromStr for LedSelector {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut selector = LedSelector::empty();
        for part in s.split(['|', ',', '+']).filter(|p| !p.trim().is_empty()) {
            selector |= LedSelector::parse_name(part)?;
        }

        if selector.is_empty() {
            return Err(ProtocolError::UnknownLed(s.to_string()));
        }

        Ok(selector)
    }
}
