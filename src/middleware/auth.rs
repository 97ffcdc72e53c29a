use std::sync::Arc;

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::AppState;
use crate::config::AuthConfig;
use crate::db::enums::{UserRole, UserStatus};
use crate::db::models::api::error_codes;
use crate::db::models::AuthUser;
use crate::db::repositories::UserRepo;
use crate::error::AppError;
use crate::services::context::RequestContext;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user_id
    pub email: String,
    pub role: UserRole,
    pub exp: u64,    // expiration time
    pub iat: u64,    // issued at
    pub jti: String, // JWT ID
}

/// Issues and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in: u64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            expires_in: config.token_expires_in,
        }
    }

    pub fn expires_in(&self) -> u64 {
        self.expires_in
    }

    pub fn generate_token(&self, user: &AuthUser) -> Result<String, AppError> {
        let now = Utc::now().timestamp().max(0) as u64;

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            exp: now + self.expires_in,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(token_data.claims)
    }
}

/// The authenticated caller, placed in request extensions by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthUserInfo {
    pub user: AuthUser,
}

impl AuthUserInfo {
    pub fn context(&self) -> RequestContext {
        RequestContext::new(self.user.id, self.user.role)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUserInfo
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(|user| AuthUserInfo { user })
            .ok_or_else(|| {
                AppError::auth_with_code("Authentication required", error_codes::AUTH_INVALID_TOKEN)
            })
    }
}

fn bearer_token(request: &Request<Body>) -> Option<String> {
    request
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .map(|auth| auth.token().trim().to_string())
        .filter(|token| !token.is_empty())
}

pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next<Body>,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or_else(|| {
        AppError::auth_with_code("Access token required", error_codes::AUTH_INVALID_TOKEN)
    })?;

    // 验证token
    let claims = state.token_service.verify_token(&token).map_err(|e| {
        tracing::debug!("Token verification failed: {}", e);
        AppError::auth_with_code("Invalid or expired token", error_codes::AUTH_INVALID_TOKEN)
    })?;

    // 先查缓存，未命中再查数据库
    let user = match state.user_cache.get_user(claims.sub).await {
        Some(user) => user,
        None => {
            let user = {
                let mut conn = state.db.get()?;
                UserRepo::find_by_id(&mut conn, claims.sub)?
                    .map(|user| AuthUser::from(&user))
                    .ok_or_else(|| {
                        AppError::auth_with_code(
                            "User no longer exists",
                            error_codes::AUTH_INVALID_TOKEN,
                        )
                    })?
            };
            state.user_cache.cache_user(&user).await;
            user
        }
    };

    match user.status {
        UserStatus::Approved => {}
        UserStatus::Pending => {
            return Err(AppError::forbidden_with_code(
                "Your account is awaiting admin approval",
                error_codes::AUTH_ACCOUNT_PENDING,
            ));
        }
        UserStatus::Rejected => {
            return Err(AppError::forbidden_with_code(
                "Your registration was rejected",
                error_codes::AUTH_ACCOUNT_REJECTED,
            ));
        }
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Layered inside [`require_auth`]; rejects non-admin callers.
pub async fn require_admin(request: Request<Body>, next: Next<Body>) -> Result<Response, AppError> {
    let is_admin = request
        .extensions()
        .get::<AuthUser>()
        .map(|user| user.role == UserRole::Admin);

    match is_admin {
        Some(true) => Ok(next.run(request).await),
        Some(false) => Err(AppError::forbidden("Admin access required")),
        None => Err(AppError::auth_with_code(
            "Authentication required",
            error_codes::AUTH_INVALID_TOKEN,
        )),
    }
}
