// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// 明文密钥前缀
pub const API_KEY_PREFIX: &str = "sx_";
/// 存储的可见前缀长度
const VISIBLE_PREFIX_LEN: usize = 8;

/// API密钥实体
///
/// 仅保存密钥的 SHA-256 摘要和可见前缀，明文只在创建时返回一次
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(skip_serializing)]
    pub key_hash: String,
    pub prefix: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

impl ApiKey {
    /// 生成新密钥，返回实体和明文
    pub fn generate(user_id: Uuid, name: String, expires_in_days: Option<i64>) -> (Self, String) {
        let mut bytes = [0u8; 24];
        rand::rng().fill_bytes(&mut bytes);
        let raw = format!("{}{}", API_KEY_PREFIX, URL_SAFE_NO_PAD.encode(bytes));
        let now = Utc::now();
        let key = Self::from_raw(user_id, name, &raw, expires_in_days.map(|d| now + Duration::days(d)));
        (key, raw)
    }

    /// 由已有明文构建实体（用于启动时注册的初始密钥）
    pub fn from_raw(
        user_id: Uuid,
        name: String,
        raw: &str,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            key_hash: hash_key(raw),
            prefix: raw.chars().take(VISIBLE_PREFIX_LEN).collect(),
            expires_at,
            created_at: Utc::now(),
            last_used_at: None,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|at| at <= now).unwrap_or(false)
    }
}

/// 计算密钥摘要
pub fn hash_key(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}
