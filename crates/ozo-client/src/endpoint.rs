//! 通道解析
//!
//! 连接后在设备发布的通道列表中按数值 ID 查找电机通道与默认通道。
//! ID 由设备设计保证唯一，第一个匹配即为结果。

use ozo_ble::BleChannel;
use ozo_protocol::Channel;

/// 按 ID 查找通道（第一个匹配）
pub fn resolve_channel<C: BleChannel>(channels: &[C], id: u16) -> Option<C> {
    channels.iter().find(|c| c.id() == id).cloned()
}

/// 一次连接期间缓存的两个通道
#[derive(Debug, Clone)]
pub struct Endpoints<C> {
    motor: C,
    default: C,
}

impl<C: BleChannel> Endpoints<C> {
    /// 解析两个通道，失败时返回缺失的通道
    pub fn resolve(channels: &[C]) -> Result<Self, Channel> {
        let motor = resolve_channel(channels, Channel::Motor.id()).ok_or(Channel::Motor)?;
        let default = resolve_channel(channels, Channel::Default.id()).ok_or(Channel::Default)?;
        Ok(Self { motor, default })
    }

    /// 逻辑通道对应的已解析通道
    pub fn get(&self, channel: Channel) -> &C {
        match channel {
            Channel::Motor => &self.motor,
            Channel::Default => &self.default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestChannel {
        id: u16,
        tag: &'static str,
    }

    impl BleChannel for TestChannel {
        fn id(&self) -> u16 {
            self.id
        }
    }

    fn ch(id: u16, tag: &'static str) -> TestChannel {
        TestChannel { id, tag }
    }

    #[test]
    fn test_resolve_first_match_wins() {
        let channels = vec![ch(3, "a"), ch(19, "first"), ch(19, "second"), ch(30, "d")];
        assert_eq!(resolve_channel(&channels, 19).unwrap().tag, "first");
        assert!(resolve_channel(&channels, 42).is_none());
    }

    #[test]
    fn test_endpoints_resolve() {
        let channels = vec![ch(30, "default"), ch(19, "motor")];
        let endpoints = Endpoints::resolve(&channels).unwrap();
        assert_eq!(endpoints.get(Channel::Motor).tag, "motor");
        assert_eq!(endpoints.get(Channel::Default).tag, "default");
    }

    #[test]
    fn test_endpoints_missing_motor() {
        let channels = vec![ch(30, "default")];
        assert_eq!(Endpoints::resolve(&channels).unwrap_err(), Channel::Motor);
    }

    #[test]
    fn test_endpoints_missing_default() {
        let channels = vec![ch(19, "motor")];
        assert_eq!(Endpoints::resolve(&channels).unwrap_err(), Channel::Default);
    }
}
