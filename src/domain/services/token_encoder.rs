// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::models::subscription::{Subscription, SubscriptionClaims};

/// 退订令牌错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// 令牌格式错误
    #[error("Malformed token")]
    Malformed,
    /// 签名校验失败
    #[error("Invalid token signature")]
    InvalidSignature,
}

/// 退订令牌编码器
///
/// 令牌对调用方是不透明的字符串，只有编码器自身能够解析。
pub trait TokenEncoder: Send + Sync {
    /// 为订阅生成退订令牌
    fn encode(&self, subscription: &Subscription) -> Result<String, TokenError>;
    /// 解析退订令牌
    fn decode(&self, token: &str) -> Result<SubscriptionClaims, TokenError>;
}
