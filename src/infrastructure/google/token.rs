// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use ring::rand::SystemRandom;
use ring::signature::{RsaKeyPair, RSA_PKCS1_SHA256};
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

use super::credentials::{CredentialError, ServiceAccountKey};

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const EXPIRY_MARGIN_SECS: i64 = 60;

/// 认证错误类型
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("failed to sign token assertion")]
    Signing,
    #[error("token request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("token endpoint returned HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// 访问令牌来源
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, AuthError>;
}

/// 固定令牌（用于测试或外部已获取令牌的场景）
pub struct StaticToken(pub String);

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> Result<String, AuthError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// `expires_in` 截断到 `0..=ASSERTION_LIFETIME_SECS`
    fn new(value: String, expires_in: Option<i64>, now: DateTime<Utc>) -> Self {
        let lifetime = expires_in
            .unwrap_or(ASSERTION_LIFETIME_SECS)
            .clamp(0, ASSERTION_LIFETIME_SECS);
        Self {
            value,
            expires_at: now + Duration::seconds(lifetime),
        }
    }
}

/// 服务账号令牌提供者
///
/// 用服务账号私钥签发 RS256 JWT，在 `token_uri` 换取访问令牌。
/// 令牌在提供者生命周期内缓存，只有过期时才重新获取。
pub struct GoogleTokenProvider {
    key_pair: RsaKeyPair,
    client_email: String,
    private_key_id: Option<String>,
    token_uri: String,
    scope: String,
    http: reqwest::Client,
    rng: SystemRandom,
    cached: Mutex<Option<CachedToken>>,
}

impl GoogleTokenProvider {
    pub fn new(
        key: &ServiceAccountKey,
        scope: impl Into<String>,
        http: reqwest::Client,
    ) -> Result<Self, CredentialError> {
        Ok(Self {
            key_pair: key.key_pair()?,
            client_email: key.client_email.clone(),
            private_key_id: key.private_key_id.clone(),
            token_uri: key.token_uri.clone(),
            scope: scope.into(),
            http,
            rng: SystemRandom::new(),
            cached: Mutex::new(None),
        })
    }

    /// 生成签名后的 JWT 断言
    fn signed_assertion(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        let mut header = json!({ "alg": "RS256", "typ": "JWT" });
        if let Some(kid) = &self.private_key_id {
            header["kid"] = json!(kid);
        }
        let issued_at = now.timestamp();
        let claims = json!({
            "iss": self.client_email,
            "scope": self.scope,
            "aud": self.token_uri,
            "iat": issued_at,
            "exp": issued_at + ASSERTION_LIFETIME_SECS,
        });

        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header.to_string()),
            URL_SAFE_NO_PAD.encode(claims.to_string())
        );

        let mut signature = vec![0u8; self.key_pair.public().modulus_len()];
        self.key_pair
            .sign(
                &RSA_PKCS1_SHA256,
                &self.rng,
                signing_input.as_bytes(),
                &mut signature,
            )
            .map_err(|_| AuthError::Signing)?;

        Ok(format!(
            "{}.{}",
            signing_input,
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    async fn exchange(&self, now: DateTime<Utc>) -> Result<CachedToken, AuthError> {
        let assertion = self.signed_assertion(now)?;
        let response = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = response.json().await?;
        let cached = CachedToken::new(token.access_token, token.expires_in, now);
        debug!(
            "Obtained access token for {} (expires at {})",
            self.client_email, cached.expires_at
        );

        Ok(cached)
    }
}

#[async_trait]
impl TokenSource for GoogleTokenProvider {
    async fn access_token(&self) -> Result<String, AuthError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref() {
            if token.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS) > now {
                return Ok(token.value.clone());
            }
        }

        let token = self.exchange(now).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }
}
