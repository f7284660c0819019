// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 订阅实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// 订阅唯一标识符
    pub id: Uuid,
    /// 所属项目ID
    pub project_id: Uuid,
    /// 订阅者邮箱
    pub email: String,
    /// 创建时间
    pub created_at: DateTime<FixedOffset>,
}

/// 退订令牌中携带的声明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionClaims {
    pub subscription_id: Uuid,
    pub email: String,
}

impl From<&Subscription> for SubscriptionClaims {
    fn from(subscription: &Subscription) -> Self {
        Self {
            subscription_id: subscription.id,
            email: subscription.email.clone(),
        }
    }
}
