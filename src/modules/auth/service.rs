use tracing::instrument;

use coursegate_auth::issue_token;
use coursegate_config::JwtConfig;
use coursegate_core::{AppError, DomainError};
use coursegate_db::UserStore;
use coursegate_models::{
    AuthResponse, LoginRequest, RegisterRequest, Role, User, UserId, UserRecord,
};

use crate::metrics::{
    track_login_failure, track_login_success, track_registration_rejected, track_token_issued,
    track_user_registered,
};
use crate::modules::users::UserService;

pub struct AuthService;

impl AuthService {
    /// Self-service registration. The privileged role cannot be requested
    /// here; it is only granted through the admin CLI.
    #[instrument(skip(store, jwt_config))]
    pub async fn register(
        store: &dyn UserStore,
        dto: RegisterRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let role = match Role::for_registration(dto.role.as_deref()) {
            Ok(role) => role,
            Err(err) => {
                let reason = match err {
                    DomainError::Forbidden(_) => "privileged_role",
                    _ => "invalid_role",
                };
                track_registration_rejected(reason);
                return Err(err.into());
            }
        };

        let user = UserService::create(store, &dto.email, &dto.name, role, &dto.password)
            .await
            .inspect_err(|err| {
                if err.domain() == Some(&DomainError::EmailConflict) {
                    track_registration_rejected("email_conflict");
                }
            })?;

        track_user_registered(user.role.as_str());
        Self::session_for(&user, jwt_config)
    }

    #[instrument(skip(store, jwt_config))]
    pub async fn login(
        store: &dyn UserStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<AuthResponse, AppError> {
        let user = match UserService::verify_credentials(store, &dto.email, &dto.password).await {
            Ok(user) => user,
            Err(err) => {
                if err.domain() == Some(&DomainError::InvalidCredentials) {
                    track_login_failure();
                }
                return Err(err);
            }
        };

        track_login_success(user.role.as_str());
        Self::session_for(&user, jwt_config)
    }

    /// The account behind a verified token. A token for an account that no
    /// longer exists is treated as invalid.
    #[instrument(skip(store))]
    pub async fn current_user(
        store: &dyn UserStore,
        user_id: UserId,
    ) -> Result<User, AppError> {
        let user = UserService::find_by_id(store, user_id)
            .await?
            .ok_or(DomainError::InvalidToken)?;
        Ok(user.to_public())
    }

    fn session_for(user: &UserRecord, jwt_config: &JwtConfig) -> Result<AuthResponse, AppError> {
        let token = issue_token(user.id, &user.email, user.role, jwt_config)?;
        track_token_issued();

        Ok(AuthResponse {
            token,
            user: user.to_public(),
        })
    }
}
