// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::subscription::{Subscription, SubscriptionClaims};
use crate::domain::services::token_encoder::{TokenEncoder, TokenError};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// 基于HMAC-SHA256的退订令牌编码器
///
/// 令牌格式为 `base64url(json声明).hex(签名)`，签名覆盖编码后的声明部分。
#[derive(Clone)]
pub struct HmacTokenEncoder {
    secret: Vec<u8>,
}

impl HmacTokenEncoder {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn mac(&self, payload: &str) -> Result<HmacSha256, TokenError> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| TokenError::Malformed)?;
        mac.update(payload.as_bytes());
        Ok(mac)
    }
}

impl TokenEncoder for HmacTokenEncoder {
    fn encode(&self, subscription: &Subscription) -> Result<String, TokenError> {
        let claims = SubscriptionClaims::from(subscription);
        let json = serde_json::to_vec(&claims).map_err(|_| TokenError::Malformed)?;
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = hex::encode(self.mac(&payload)?.finalize().into_bytes());

        Ok(format!("{}.{}", payload, signature))
    }

    fn decode(&self, token: &str) -> Result<SubscriptionClaims, TokenError> {
        let (payload, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let signature = hex::decode(signature).map_err(|_| TokenError::Malformed)?;

        self.mac(payload)?
            .verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Malformed)?;
        serde_json::from_slice(&json).map_err(|_| TokenError::Malformed)
    }
}
