//! Message trait - codec から見たメッセージの抽象化
//!
//! # 学習ポイント
//! - Blanket impl（serde 型なら自動で Message になる）
//! - Object-safe trait（`&mut dyn Message` として codec に渡せる）
//! - `Any` による具体型の復元（独自 codec 用）

use std::any::Any;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Message は codec が扱う型消去済みメッセージ
///
/// # Trait Bounds
/// - `Serialize` / `DeserializeOwned`: JSON codec のため
/// - `Send + Sync + 'static`: 呼び出し間を跨いで `Box<dyn Any>` に入れるため
///
/// 独自 codec は `as_any_mut()` で具体型へ downcast できます。
pub trait Message: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// JSON payload で自身を置き換える
    fn merge_json(&mut self, payload: &[u8]) -> Result<(), serde_json::Error>;

    fn to_json(&self) -> Result<Vec<u8>, serde_json::Error>;

    fn type_name(&self) -> &'static str;
}

impl<T> Message for T
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn merge_json(&mut self, payload: &[u8]) -> Result<(), serde_json::Error> {
        *self = serde_json::from_slice(payload)?;
        Ok(())
    }

    fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::EchoReq;
    use super::*;

    #[test]
    fn merge_json_replaces_value() {
        let mut msg = EchoReq::default();
        let target: &mut dyn Message = &mut msg;
        target.merge_json(br#"{"text":"hi"}"#).unwrap();
        assert_eq!(msg.text, "hi");
    }

    #[test]
    fn downcast_through_any() {
        let mut msg = EchoReq {
            text: "a".to_string(),
        };
        let erased: &mut dyn Message = &mut msg;
        let typed = erased.as_any_mut().downcast_mut::<EchoReq>().unwrap();
        typed.text.push('b');
        assert_eq!(msg.text, "ab");
    }

    #[test]
    fn to_json_uses_serde() {
        let msg = EchoReq {
            text: "x".to_string(),
        };
        assert_eq!(Message::to_json(&msg).unwrap(), br#"{"text":"x"}"#.to_vec());
        assert!(Message::type_name(&msg).ends_with("EchoReq"));
    }
}
