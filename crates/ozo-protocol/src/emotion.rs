//! 表情动画
//!
//! 每个表情对应设备上一段预录的动画/声音，由三条固定指令触发：
//! 1. 触发指令（指向系统资源目录）
//! 2. 文件名引用（如 `0100.wav`）
//! 3. 校验/结束指令
//!
//! 这些字节是协议常量，不做任何计算。

use crate::ids::Channel;
use crate::{OzoCommand, ProtocolError};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::str::FromStr;

/// 表情选择器（封闭集合）
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive,
)]
#[num_enum(error_type(name = ProtocolError, constructor = ProtocolError::UnknownEmotion))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Emotion {
    Happy = 1,
    Sad = 2,
    Surprised = 3,
    Laugh = 4,
}

// 表情指令表（均写入默认通道）
const HAPPY: [OzoCommand; 3] = [
    OzoCommand::from_static(
        Channel::Default,
        &[
            0x03, 0x00, 0x00, 0x60, 0x00, 0x00, 0x0c, 0x00, 0x6c, 0x00, 0x0f, 0xce, 0xfb, 0x02,
            0x2f, 0x73, 0x79, 0x73, 0x74, 0x65,
        ],
    ),
    OzoCommand::from_static(
        Channel::Default,
        &[
            0x03, 0x00, 0x18, 0x60, 0x00, 0x00, 0x09, 0x00, 0x30, 0x31, 0x30, 0x30, 0x2e, 0x77,
            0x61, 0x76, 0x00,
        ],
    ),
    OzoCommand::from_static(
        Channel::Default,
        &[0x7e, 0x00, 0x21, 0x00, 0xaa, 0xfd, 0xb8, 0xe4],
    ),
];

const SAD: [OzoCommand; 3] = [
    OzoCommand::from_static(
        Channel::Default,
        &[
            0x03, 0x00, 0x00, 0x60, 0x00, 0x00, 0x0c, 0x00, 0x6c, 0x00, 0x10, 0xce, 0xfb, 0x02,
            0x2f, 0x73, 0x79, 0x73, 0x74, 0x65,
        ],
    ),
    OzoCommand::from_static(
        Channel::Default,
        &[
            0x03, 0x00, 0x18, 0x60, 0x00, 0x00, 0x09, 0x00, 0x30, 0x31, 0x31, 0x30, 0x2e, 0x77,
            0x61, 0x76, 0x00,
        ],
    ),
    OzoCommand::from_static(
        Channel::Default,
        &[0x7e, 0x00, 0x21, 0x00, 0xb1, 0xa7, 0x39, 0xf3],
    ),
];

const SURPRISED: [OzoCommand; 3] = [
    OzoCommand::from_static(
        Channel::Default,
        &[
            0x03, 0x00, 0x00, 0x60, 0x00, 0x00, 0x0c, 0x00, 0x6c, 0x00, 0x11, 0xce, 0xfb, 0x02,
            0x2f, 0x73, 0x79, 0x73, 0x74, 0x65,
        ],
    ),
    OzoCommand::from_static(
        Channel::Default,
        &[
            0x03, 0x00, 0x18, 0x60, 0x00, 0x00, 0x09, 0x00, 0x30, 0x31, 0x37, 0x30, 0x2e, 0x77,
            0x61, 0x76, 0x00,
        ],
    ),
    OzoCommand::from_static(
        Channel::Default,
        &[0x7e, 0x00, 0x21, 0x00, 0x5a, 0x7a, 0x0e, 0x9e],
    ),
];

const LAUGH: [OzoCommand; 3] = [
    OzoCommand::from_static(
        Channel::Default,
        &[
            0x03, 0x00, 0x00, 0x60, 0x00, 0x00, 0x0c, 0x00, 0x6c, 0x00, 0x12, 0xce, 0xfb, 0x02,
            0x2f, 0x73, 0x79, 0x73, 0x74, 0x65,
        ],
    ),
    OzoCommand::from_static(
        Channel::Default,
        &[
            0x03, 0x00, 0x18, 0x60, 0x00, 0x00, 0x09, 0x00, 0x30, 0x32, 0x35, 0x30, 0x2e, 0x77,
            0x61, 0x76, 0x00,
        ],
    ),
    OzoCommand::from_static(
        Channel::Default,
        &[0x7e, 0x00, 0x21, 0x00, 0xe3, 0x55, 0x36, 0x94],
    ),
];

impl Emotion {
    /// 所有表情
    pub const ALL: [Emotion; 4] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprised,
        Emotion::Laugh,
    ];

    /// 表情对应的三条固定指令（触发、文件名、结束）
    pub fn commands(self) -> [OzoCommand; 3] {
        match self {
            Emotion::Happy => HAPPY,
            Emotion::Sad => SAD,
            Emotion::Surprised => SURPRISED,
            Emotion::Laugh => LAUGH,
        }
    }

    /// 小写名称
    pub fn name(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprised => "surprised",
            Emotion::Laugh => "laugh",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Emotion {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Emotion::ALL
            .into_iter()
            .find(|e| e.name() == normalized)
            .ok_or_else(|| ProtocolError::UnknownEmotionName(s.to_string()))
    }
}
