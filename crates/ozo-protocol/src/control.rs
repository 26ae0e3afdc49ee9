//! 控制指令构建
//!
//! 包含 LED、电机、停止以及连接初始化指令。
//! 所有函数都是纯函数：输入意图，输出与硬件协议逐位一致的字节序列。

use crate::emotion::Emotion;
use crate::ids::{Channel, OPCODE_LED, OPCODE_MOTOR};
use crate::led::LedSelector;
use crate::OzoCommand;

// ============================================================================
// 参数范围
// ============================================================================

/// 前进/后退速度下限
pub const SPEED_MIN: i32 = -256;
/// 前进/后退速度上限
pub const SPEED_MAX: i32 = 255;
/// 转向幅度上限（下限为 0）
pub const TURN_MAX: i32 = 255;
/// 持续时间上限（秒）
pub const DURATION_MAX_SECS: f64 = 32768.0;
/// 持续时间定点刻度：1 秒 = 4 tick
pub const DURATION_TICKS_PER_SEC: f64 = 4.0;

/// 反向行驶方向标志
pub const DIRECTION_REVERSE: u8 = 0xFF;
/// 正向行驶方向标志
pub const DIRECTION_FORWARD: u8 = 0x00;

/// 原地旋转使用的转向幅度
pub const ROTATE_TURN: i32 = 255;
/// 原地旋转持续时间（秒），约 90°
pub const ROTATE_DURATION_SECS: f64 = 1.25;

/// 电机指令默认持续时间（秒）
pub const DEFAULT_MOTOR_DURATION_SECS: f64 = 10.0;

/// LED 指令长度
pub const LED_COMMAND_LEN: usize = 8;
/// 电机指令长度
pub const MOTOR_COMMAND_LEN: usize = 18;

// ============================================================================
// 固定字面量指令
// ============================================================================

/// 停止所有运动（预制指令，非算法生成）
///
/// `6800015cad020000000000000000ffffffff`
static STOP_COMMAND: [u8; MOTOR_COMMAND_LEN] = [
    0x68, 0x00, 0x01, 0x5c, 0xad, 0x02, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xff,
    0xff, 0xff, 0xff,
];

/// 关闭自主待机行为
static DISABLE_AUTONOMY: [u8; 6] = [0x78, 0x00, 0x00, 0x00, 0x00, 0x00];

/// 初始化电机子系统
static INIT_MOTOR: [u8; 1] = [0x45];

/// 初始化声音子系统（`m/audio/0101`）
static INIT_SOUND: [u8; 20] = [
    0x03, 0x00, 0x0c, 0x60, 0x00, 0x00, 0x0c, 0x00, 0x6d, 0x2f, 0x61, 0x75, 0x64, 0x69, 0x6f,
    0x2f, 0x30, 0x31, 0x30, 0x31,
];

// ============================================================================
// LED 指令
// ============================================================================

/// LED 指令
///
/// 颜色分量为 `u8`，超出 0-255 的值无法表达，因此不做钳位。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedCommand {
    pub selector: LedSelector,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl LedCommand {
    pub fn new(selector: LedSelector, red: u8, green: u8, blue: u8) -> Self {
        Self {
            selector,
            red,
            green,
            blue,
        }
    }

    /// 编码为线上字节
    pub fn encode(&self) -> [u8; LED_COMMAND_LEN] {
        encode_leds(self.selector, self.red, self.green, self.blue)
    }

    /// 转换为默认通道上的指令
    pub fn to_command(&self) -> OzoCommand {
        OzoCommand::new(Channel::Default, self.encode().to_vec())
    }
}

/// 构建 LED 指令
///
/// 布局：`0x6e` + 选择器(2B BE) + `0x00` + R + G + B + `0x00`
///
/// ```rust
/// use ozo_protocol::{encode_leds, LedSelector};
///
/// let bytes = encode_leds(LedSelector::ALL, 0, 255, 0);
/// assert_eq!(bytes, [0x6e, 0x00, 0xff, 0x00, 0x00, 0xff, 0x00, 0x00]);
/// ```
pub fn encode_leds(selector: LedSelector, red: u8, green: u8, blue: u8) -> [u8; LED_COMMAND_LEN] {
    let [sel_hi, sel_lo] = selector.to_be_bytes();
    [OPCODE_LED, sel_hi, sel_lo, 0x00, red, green, blue, 0x00]
}

// ============================================================================
// 电机指令
// ============================================================================

/// 电机意图
///
/// 所有字段在编码时静默钳位到合法范围（遥控场景下宽松处理，不返回错误）：
/// - `speed`: [-256, 255]，负数表示后退
/// - `turn_left` / `turn_right`: [0, 255]
/// - `duration`: [0, 32768] 秒
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotorCommand {
    pub speed: i32,
    pub turn_left: i32,
    pub turn_right: i32,
    /// 持续时间（秒）
    pub duration: f64,
}

impl Default for MotorCommand {
    fn default() -> Self {
        Self {
            speed: 0,
            turn_left: 0,
            turn_right: 0,
            duration: DEFAULT_MOTOR_DURATION_SECS,
        }
    }
}

impl MotorCommand {
    /// 直线行驶
    pub fn drive(speed: i32, duration: f64) -> Self {
        Self {
            speed,
            duration,
            ..Self::default()
        }
    }

    /// 原地左转约 90°
    pub fn rotate_left() -> Self {
        Self {
            turn_left: ROTATE_TURN,
            duration: ROTATE_DURATION_SECS,
            ..Self::default()
        }
    }

    /// 原地右转约 90°
    pub fn rotate_right() -> Self {
        Self {
            turn_right: ROTATE_TURN,
            duration: ROTATE_DURATION_SECS,
            ..Self::default()
        }
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_turn_left(mut self, turn_left: i32) -> Self {
        self.turn_left = turn_left;
        self
    }

    pub fn with_turn_right(mut self, turn_right: i32) -> Self {
        self.turn_right = turn_right;
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// 钳位后的持续时间（秒），NaN 视为 0
    pub fn clamped_duration(&self) -> f64 {
        clamp_duration(self.duration)
    }

    /// 编码为线上字节
    pub fn encode(&self) -> [u8; MOTOR_COMMAND_LEN] {
        encode_motor(self.speed, self.turn_left, self.turn_right, self.duration)
    }

    /// 转换为电机通道上的指令
    pub fn to_command(&self) -> OzoCommand {
        OzoCommand::new(Channel::Motor, self.encode().to_vec())
    }
}

fn clamp_duration(duration: f64) -> f64 {
    if duration.is_nan() {
        0.0
    } else {
        duration.clamp(0.0, DURATION_MAX_SECS)
    }
}

/// 速度编码：返回 (速度字节, 方向字节)
///
/// 负速度重新编码为 `speed + 255`（按 8 位截断），方向字节为 255。
pub fn encode_speed(speed: i32) -> (u8, u8) {
    let speed = speed.clamp(SPEED_MIN, SPEED_MAX);
    if speed < 0 {
        ((speed + 255).rem_euclid(256) as u8, DIRECTION_REVERSE)
    } else {
        (speed as u8, DIRECTION_FORWARD)
    }
}

/// 持续时间编码：秒 × 4 后截断为整数，再截断为 16 位
pub fn encode_duration_ticks(duration: f64) -> u16 {
    let ticks = (clamp_duration(duration) * DURATION_TICKS_PER_SEC) as u32;
    (ticks & 0xFFFF) as u16
}

/// 构建电机指令
///
/// 布局（18 字节，大端）：
///
/// ```text
/// [0]      0x68
/// [1..8]   保留（0）
/// [8]      速度
/// [9]      方向（0 前进 / 255 后退）
/// [10..12] 保留（0）
/// [12]     左转幅度
/// [13]     右转幅度
/// [14..16] 持续时间 tick（BE）
/// [16..18] 保留（0）
/// ```
pub fn encode_motor(
    speed: i32,
    turn_left: i32,
    turn_right: i32,
    duration: f64,
) -> [u8; MOTOR_COMMAND_LEN] {
    let (speed, direction) = encode_speed(speed);
    let turn_left = turn_left.clamp(0, TURN_MAX) as u8;
    let turn_right = turn_right.clamp(0, TURN_MAX) as u8;
    let [ticks_hi, ticks_lo] = encode_duration_ticks(duration).to_be_bytes();

    let mut bytes = [0u8; MOTOR_COMMAND_LEN];
    bytes[0] = OPCODE_MOTOR;
    bytes[8] = speed;
    bytes[9] = direction;
    bytes[12] = turn_left;
    bytes[13] = turn_right;
    bytes[14] = ticks_hi;
    bytes[15] = ticks_lo;
    bytes
}

// ============================================================================
// 固定指令
// ============================================================================

/// 停止所有运动
pub fn encode_stop() -> &'static [u8; MOTOR_COMMAND_LEN] {
    &STOP_COMMAND
}

/// 停止指令（写入默认通道）
pub fn stop_command() -> OzoCommand {
    OzoCommand::from_static(Channel::Default, &STOP_COMMAND)
}

/// 表情的三条固定指令
pub fn encode_emotion(emotion: Emotion) -> [OzoCommand; 3] {
    emotion.commands()
}

/// 连接后的初始化序列（严格有序）
///
/// 1. 关闭自主待机行为（默认通道）
/// 2. 初始化电机（电机通道）
/// 3. 初始化声音（默认通道）
pub fn encode_connect_init() -> [OzoCommand; 3] {
    [
        OzoCommand::from_static(Channel::Default, &DISABLE_AUTONOMY),
        OzoCommand::from_static(Channel::Motor, &INIT_MOTOR),
        OzoCommand::from_static(Channel::Default, &INIT_SOUND),
    ]
}
