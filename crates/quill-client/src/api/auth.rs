//! Auth API.

use quill_types::{AuthResponse, LoginRequest, RegisterRequest, UpdateProfileRequest, User};

use crate::client::{Auth, QuillClient};
use crate::error::Result;

/// Auth API client.
pub struct AuthApi {
    client: QuillClient,
}

impl AuthApi {
    pub(crate) fn new(client: QuillClient) -> Self {
        Self { client }
    }

    /// Register a new account.
    ///
    /// The server enforces email uniqueness, password length, and email
    /// shape; its rejection is authoritative over any client-side checks.
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthResponse> {
        self.client.post("auth/register", &request, Auth::None).await
    }

    /// Log in with email and password.
    pub async fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        self.client.post("auth/login", &request, Auth::None).await
    }

    /// Invalidate the current session server-side.
    pub async fn logout(&self) -> Result<()> {
        self.client.post_empty("auth/logout", Auth::Required).await
    }

    /// Fetch the authenticated user's profile.
    pub async fn me(&self) -> Result<User> {
        self.client.get("auth/me", Auth::Required).await
    }

    /// Update the authenticated user's profile.
    pub async fn update_profile(&self, request: UpdateProfileRequest) -> Result<User> {
        self.client.put("users/me", &request, Auth::Required).await
    }
}
