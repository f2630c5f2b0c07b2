// src/application/commands/user_commands.rs
//
// User Command Handlers

use crate::application::dto::*;
use crate::application::error_handling::ErrorResponse;
use crate::application::state::AppState;
use crate::domain::{Actor, Role};
use crate::services::{RegisterUserRequest, UpdateProfileRequest};

use super::{parse_id, with_resource};

pub fn register_user(state: &AppState, dto: RegisterUserDto) -> Result<UserDto, ErrorResponse> {
    let role = match dto.role.as_deref() {
        None | Some("") => Role::User,
        Some(raw) => raw.parse::<Role>()?,
    };

    let user = state.user_service.register_user(RegisterUserRequest {
        username: dto.username,
        email: dto.email,
        role,
    })?;
    Ok(user.into())
}

/// Public profile: the user plus review and watchlist counts and recent reviews
pub fn get_user_profile(state: &AppState, user_id: &str) -> Result<UserProfileDto, ErrorResponse> {
    let id = parse_id(user_id, "user")?;
    let profile = with_resource(state.user_service.get_profile(id), "User")?;
    Ok(profile.into())
}

pub fn update_profile(
    state: &AppState,
    actor: &Actor,
    dto: UpdateProfileDto,
) -> Result<UserDto, ErrorResponse> {
    let user_id = parse_id(&dto.user_id, "user")?;

    let user = with_resource(
        state.user_service.update_profile(
            actor,
            UpdateProfileRequest {
                user_id,
                username: dto.username,
                email: dto.email,
                profile_picture: dto.profile_picture,
            },
        ),
        "User",
    )?;
    Ok(user.into())
}
