// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::api_key::hash_key;
use crate::domain::repositories::api_key_repository::ApiKeyRepository;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// 已认证的调用方，由认证中间件写入请求扩展
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub api_key_id: Uuid,
}

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    pub api_keys: Arc<dyn ApiKeyRepository>,
}

/// 认证中间件
///
/// 验证 `Authorization: Bearer <key>` 中的API密钥：按摘要查找、拒绝过期密钥，
/// 并记录最近使用时间
///
/// # 返回值
///
/// * `Ok(Response)` - 认证成功的响应
/// * `Err(StatusCode)` - 认证失败的状态码
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    debug!("AuthMiddleware processing path: {}", req.uri().path());

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let key = match state.api_keys.find_by_hash(&hash_key(token)).await {
        Ok(Some(key)) => key,
        Ok(None) => {
            warn!("Unknown API key presented");
            return Err(StatusCode::UNAUTHORIZED);
        }
        Err(e) => {
            error!("Error checking API key: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    if key.is_expired(Utc::now()) {
        warn!(prefix = %key.prefix, "Expired API key presented");
        return Err(StatusCode::UNAUTHORIZED);
    }

    if let Err(e) = state.api_keys.touch(key.id).await {
        warn!("Failed to record API key usage: {}", e);
    }

    req.extensions_mut().insert(AuthUser {
        user_id: key.user_id,
        api_key_id: key.id,
    });
    Ok(next.run(req).await)
}
