use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::{
    claims::TokenKind,
    dto::{LoginRequest, RefreshRequest, RegisterRequest},
    jwt::{TokenPair, TokenService},
    password::PasswordHasher,
    roles::Role,
};
use crate::{
    db::{db_failure, StoreError},
    error::{AppError, AppResult},
    users::{
        repo::UserStore,
        repo_types::{NewUser, UserInfo},
    },
};

pub(crate) const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Login, registration and token refresh over injected store, token and hashing capabilities.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<dyn TokenService>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        tokens: Arc<dyn TokenService>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }

    fn issue(&self, user_id: Uuid, role: Role) -> AppResult<TokenPair> {
        self.tokens.issue(user_id, role).map_err(|e| {
            error!(error = %e, user_id = %user_id, "token issue failed");
            AppError::TokenGeneration
        })
    }

    /// Unknown email and wrong password produce the same error.
    #[instrument(skip(self, req))]
    pub async fn login(&self, req: LoginRequest) -> AppResult<TokenPair> {
        let email = normalize_email(&req.email);
        if email.is_empty() || req.password.is_empty() {
            return Err(AppError::MissingFields);
        }

        let user = match self.users.find_by_email(&email).await {
            Ok(Some(u)) => u,
            Ok(None) => {
                warn!(email = %email, "login unknown email");
                return Err(AppError::InvalidCredentials);
            }
            Err(e) => return Err(db_failure("find_by_email")(e)),
        };

        if !self.hasher.verify(&req.password, &user.password_hash) {
            warn!(email = %email, user_id = %user.id, "login invalid password");
            return Err(AppError::InvalidCredentials);
        }

        let tokens = self.issue(user.id, user.role)?;
        info!(user_id = %user.id, email = %user.email, "user logged in");
        Ok(tokens)
    }

    /// Creates the user and its profile as a pair. If the profile insert fails the
    /// user row is deleted again.
    #[instrument(skip(self, req))]
    pub async fn register(&self, req: RegisterRequest) -> AppResult<TokenPair> {
        let email = normalize_email(&req.email);
        let first_name = req.first_name.trim();
        let last_name = req.last_name.trim();
        let location = req.location.trim();
        let role = req.role.trim();
        if [first_name, last_name, email.as_str(), location, role]
            .iter()
            .any(|f| f.is_empty())
            || req.password.is_empty()
        {
            return Err(AppError::MissingFields);
        }

        let role: Role = role
            .parse()
            .map_err(|e: super::roles::UnknownRole| AppError::invalid_input(e.to_string()))?;

        if !is_valid_email(&email) {
            warn!(email = %email, "invalid email");
            return Err(AppError::invalid_input("Invalid email"));
        }
        if req.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::invalid_input(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        match self.users.email_exists(&email).await {
            Ok(false) => {}
            Ok(true) => {
                warn!(email = %email, "email already registered");
                return Err(AppError::UserAlreadyExists);
            }
            Err(e) => return Err(db_failure("email_exists")(e)),
        }

        let password_hash = self.hasher.hash(&req.password).map_err(|e| {
            error!(error = %e, "hash_password failed");
            AppError::InternalServer
        })?;

        let user = match self
            .users
            .create_user(&NewUser {
                id: Uuid::new_v4(),
                email,
                password_hash,
                role,
                location: location.to_string(),
            })
            .await
        {
            Ok(u) => u,
            // lost a race with a concurrent registration for the same email
            Err(StoreError::Conflict) => return Err(AppError::UserAlreadyExists),
            Err(e) => return Err(db_failure("create_user")(e)),
        };

        let profile = UserInfo {
            id: Uuid::new_v4(),
            user_id: user.id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            avatar: String::new(),
            bio: String::new(),
            location: location.to_string(),
            phone: String::new(),
        };
        if let Err(e) = self.users.create_user_info(&profile).await {
            error!(error = %e, user_id = %user.id, "create user_info failed; removing user");
            if let Err(del) = self.users.delete_user(user.id).await {
                error!(error = %del, user_id = %user.id, "compensating user delete failed");
            }
            return Err(AppError::DatabaseError);
        }

        let tokens = self.issue(user.id, user.role)?;
        info!(user_id = %user.id, email = %user.email, role = %user.role, "user registered");
        Ok(tokens)
    }

    /// Only refresh tokens are accepted.
    #[instrument(skip(self, req))]
    pub async fn refresh_token(&self, req: RefreshRequest) -> AppResult<TokenPair> {
        let token = req.refresh_token.trim();
        if token.is_empty() {
            return Err(AppError::MissingFields);
        }

        let claims = self.tokens.parse(token).map_err(|e| {
            warn!(error = %e, "refresh token rejected");
            AppError::InvalidCredentials
        })?;
        if claims.kind != TokenKind::Refresh {
            warn!(user_id = %claims.sub, "access token presented for refresh");
            return Err(AppError::InvalidCredentials);
        }

        self.issue(claims.sub, claims.role)
    }

    /// Checks an access token and returns its subject and role.
    pub fn validate_token(&self, token: &str) -> AppResult<(Uuid, Role)> {
        if token.is_empty() {
            return Err(AppError::MissingFields);
        }
        let claims = self
            .tokens
            .parse(token)
            .map_err(|_| AppError::InvalidCredentials)?;
        if claims.kind != TokenKind::Access {
            return Err(AppError::InvalidCredentials);
        }
        Ok((claims.sub, claims.role))
    }
}
