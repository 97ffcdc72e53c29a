use bcrypt::{hash, verify};
use chrono::Utc;
use diesel::prelude::*;

use crate::{
    config::AuthConfig,
    db::enums::{EntityType, NotificationType, UserRole, UserStatus},
    db::models::api::error_codes,
    db::models::notification::NewNotification,
    db::models::user::{
        AuthUser, ChangePasswordRequest, LoginRequest, LoginResponse, NewUser, RegisterRequest,
        UpdateProfileRequest, UpdateUserProfile, User, UserResponse,
    },
    db::repositories::UserRepo,
    error::AppError,
    middleware::auth::TokenService,
    services::context::RequestContext,
    services::notifications_service::NotificationsService,
    validation::auth::{
        normalize_email, validate_password_change, validate_update_profile, UpdateProfileChanges,
    },
    validation::trimmed_text,
};

pub struct AuthService;

impl AuthService {
    pub fn register(
        conn: &mut PgConnection,
        auth: &AuthConfig,
        req: &RegisterRequest,
    ) -> Result<User, AppError> {
        let name = trimmed_text("name", &req.name, 2, 100)?;
        let email = normalize_email(&req.email);

        if UserRepo::exists_by_email(conn, &email)? {
            return Err(AppError::duplicate_with_code(
                "Email already registered",
                Some("email".to_string()),
                error_codes::USER_EMAIL_EXISTS,
            ));
        }

        let password_hash = hash(&req.password, auth.bcrypt_cost)?;

        let new_user = NewUser {
            name,
            email,
            password_hash,
            phone: req.phone.clone(),
            wing: req.wing.trim().to_uppercase(),
            flat_number: req.flat_number.trim().to_string(),
            resident_type: req.resident_type,
            role: UserRole::Resident,
            status: UserStatus::Pending,
            occupation: req.occupation.clone(),
        };

        // 注册与管理员通知在同一事务中完成
        let user = conn.transaction::<_, AppError, _>(|conn| {
            let user = UserRepo::insert(conn, &new_user)?;

            let notice = NewNotification::new(
                user.id,
                NotificationType::Registration,
                "New resident registration",
                format!(
                    "{} registered for flat {}-{} and is awaiting approval",
                    user.name, user.wing, user.flat_number
                ),
            )
            .related_to(EntityType::User, user.id);
            NotificationsService::notify_admins(conn, &notice)?;

            Ok(user)
        })?;

        tracing::info!(user_id = %user.id, "Resident registered, pending approval");
        Ok(user)
    }

    pub fn login(
        conn: &mut PgConnection,
        tokens: &TokenService,
        req: &LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let invalid = || {
            AppError::auth_with_code(
                "Invalid email or password",
                error_codes::AUTH_INVALID_CREDENTIALS,
            )
        };

        let user = UserRepo::find_by_email(conn, &normalize_email(&req.email))?
            .ok_or_else(invalid)?;

        if !verify(&req.password, &user.password_hash)? {
            tracing::warn!(user_id = %user.id, "Login failed - invalid password");
            return Err(invalid());
        }

        match user.status {
            UserStatus::Pending => {
                return Err(AppError::forbidden_with_code(
                    "Your account is awaiting admin approval",
                    error_codes::AUTH_ACCOUNT_PENDING,
                ));
            }
            UserStatus::Rejected => {
                let message = match user.rejection_reason.as_deref() {
                    Some(reason) => format!("Your registration was rejected: {}", reason),
                    None => "Your registration was rejected".to_string(),
                };
                return Err(AppError::forbidden_with_code(
                    message,
                    error_codes::AUTH_ACCOUNT_REJECTED,
                ));
            }
            UserStatus::Approved => {}
        }

        let token = tokens.generate_token(&AuthUser::from(&user))?;

        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: tokens.expires_in(),
            user: UserResponse::from(user),
        })
    }

    pub fn me(conn: &mut PgConnection, ctx: &RequestContext) -> Result<UserResponse, AppError> {
        let user = UserRepo::find_by_id(conn, ctx.user_id)?
            .ok_or_else(|| AppError::not_found("User"))?;
        Ok(UserResponse::from(user))
    }

    pub fn update_profile(
        conn: &mut PgConnection,
        ctx: &RequestContext,
        req: &UpdateProfileRequest,
    ) -> Result<UserResponse, AppError> {
        validate_update_profile(&UpdateProfileChanges {
            name: req.name.as_deref(),
            phone: req.phone.as_deref(),
            occupation: req.occupation.as_deref(),
            profile_photo: req.profile_photo.as_deref(),
        })?;

        let changes = UpdateUserProfile {
            name: req
                .name
                .as_deref()
                .map(|n| trimmed_text("name", n, 2, 100))
                .transpose()?,
            phone: req.phone.clone(),
            occupation: req.occupation.clone(),
            profile_photo: req.profile_photo.clone(),
            updated_at: Some(Utc::now()),
        };

        let user = UserRepo::update_profile(conn, ctx.user_id, &changes)?;
        Ok(UserResponse::from(user))
    }

    pub fn change_password(
        conn: &mut PgConnection,
        auth: &AuthConfig,
        ctx: &RequestContext,
        req: &ChangePasswordRequest,
    ) -> Result<(), AppError> {
        validate_password_change(&req.current_password, &req.new_password)?;

        let user = UserRepo::find_by_id(conn, ctx.user_id)?
            .ok_or_else(|| AppError::not_found("User"))?;

        if !verify(&req.current_password, &user.password_hash)? {
            return Err(AppError::validation("Current password is incorrect"));
        }

        let new_hash = hash(&req.new_password, auth.bcrypt_cost)?;
        UserRepo::update_password(conn, user.id, &new_hash)?;

        tracing::info!(user_id = %user.id, "Password changed");
        Ok(())
    }
}
