use axum::{
    extract::{Path, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::{ApiError, ApiResult, FieldError, MessageBody},
    profiles::{
        dto::{parse_skills, EducationBody, ExperienceBody, ProfileBody, ProfileResponse},
        repo::{Education, Experience, Profile, ProfileFields, ProfileWithOwner, SocialLinks},
    },
    state::AppState,
    users::repo::User,
};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/profile/me", get(me))
        .route(
            "/profile",
            post(create_or_update).get(list).delete(delete_account),
        )
        .route("/profile/user/:user_id", get(by_user))
        .route("/profile/experience", put(add_experience))
        .route("/profile/experience/:exp_id", delete(remove_experience))
        .route("/profile/education", put(add_education))
        .route("/profile/education/:edu_id", delete(remove_education))
}

fn no_profile() -> ApiError {
    ApiError::msg("There is no profile for this user")
}

/// Unset and empty inputs both mean "leave the stored value alone".
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

async fn owner_view(state: &AppState, user_id: Uuid) -> ApiResult<ProfileResponse> {
    let row = ProfileWithOwner::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("profile missing right after a write"))?;
    Ok(row.into())
}

#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let row = ProfileWithOwner::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(no_profile)?;
    Ok(Json(row.into()))
}

#[instrument(skip(state, payload))]
pub async fn create_or_update(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ProfileBody>,
) -> ApiResult<Json<ProfileResponse>> {
    let status = payload.status.unwrap_or_default();
    let skills_raw = payload.skills.unwrap_or_default();

    let mut errors = Vec::new();
    if status.is_empty() {
        errors.push(FieldError::new("Status is required", "status"));
    }
    if skills_raw.is_empty() {
        errors.push(FieldError::new("Skills is required", "skills"));
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let fields = ProfileFields {
        company: non_empty(payload.company),
        website: non_empty(payload.website),
        location: non_empty(payload.location),
        bio: non_empty(payload.bio),
        github_username: non_empty(payload.github_username),
        status,
        skills: parse_skills(&skills_raw),
        social: SocialLinks {
            youtube: non_empty(payload.youtube),
            twitter: non_empty(payload.twitter),
            facebook: non_empty(payload.facebook),
            linkedin: non_empty(payload.linkedin),
            instagram: non_empty(payload.instagram),
        },
    };

    let saved = match Profile::find_by_user(&state.db, user_id).await? {
        Some(_) => Profile::update_by_user(&state.db, user_id, &fields).await?,
        None => Profile::insert(&state.db, user_id, &fields).await?,
    };
    info!(user_id = %user_id, profile_id = %saved.id, "profile saved");

    owner_view(&state, user_id).await.map(Json)
}

#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ProfileResponse>>> {
    let rows = ProfileWithOwner::list(&state.db).await?;
    Ok(Json(rows.into_iter().map(ProfileResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ProfileResponse>> {
    // A malformed id gets the same answer as an unknown one.
    let Ok(user_id) = user_id.parse::<Uuid>() else {
        return Err(ApiError::msg("Profile not found"));
    };
    let row = ProfileWithOwner::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::msg("Profile not found"))?;
    Ok(Json(row.into()))
}

#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<MessageBody>> {
    // Posts survive account deletion; they keep their author snapshot.
    Profile::delete_by_user(&state.db, user_id).await?;
    User::delete(&state.db, user_id).await?;
    info!(user_id = %user_id, "account deleted");
    Ok(Json(MessageBody::new("User deleted")))
}

#[instrument(skip(state, payload))]
pub async fn add_experience(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ExperienceBody>,
) -> ApiResult<Json<ProfileResponse>> {
    let title = payload.title.unwrap_or_default();
    let company = payload.company.unwrap_or_default();

    let mut errors = Vec::new();
    if title.is_empty() {
        errors.push(FieldError::new("Title is required", "title"));
    }
    if company.is_empty() {
        errors.push(FieldError::new("Company is required", "company"));
    }
    let from = match payload.from {
        Some(from) => from,
        None => {
            errors.push(FieldError::new("From date is required", "from"));
            return Err(ApiError::Validation(errors));
        }
    };
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let mut profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(no_profile)?;

    profile.add_experience(Experience {
        id: Uuid::new_v4(),
        title,
        company,
        location: payload.location,
        from,
        to: payload.to,
        current: payload.current,
        description: payload.description,
    });
    Profile::set_experience(&state.db, user_id, &profile.experience.0).await?;
    info!(user_id = %user_id, "experience added");

    owner_view(&state, user_id).await.map(Json)
}

#[instrument(skip(state))]
pub async fn remove_experience(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(exp_id): Path<String>,
) -> ApiResult<Json<ProfileResponse>> {
    let mut profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(no_profile)?;

    // Unknown and malformed ids fall through to a 200 with the unchanged
    // profile.
    if let Ok(exp_id) = exp_id.parse::<Uuid>() {
        profile.remove_experience(exp_id);
        Profile::set_experience(&state.db, user_id, &profile.experience.0).await?;
    }

    owner_view(&state, user_id).await.map(Json)
}

#[instrument(skip(state, payload))]
pub async fn add_education(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<EducationBody>,
) -> ApiResult<Json<ProfileResponse>> {
    let school = payload.school.unwrap_or_default();
    let degree = payload.degree.unwrap_or_default();
    let field_of_study = payload.field_of_study.unwrap_or_default();

    let mut errors = Vec::new();
    if school.is_empty() {
        errors.push(FieldError::new("School is required", "school"));
    }
    if degree.is_empty() {
        errors.push(FieldError::new("Degree is required", "degree"));
    }
    if field_of_study.is_empty() {
        errors.push(FieldError::new("Field of study is required", "field_of_study"));
    }
    let from = match payload.from {
        Some(from) => from,
        None => {
            errors.push(FieldError::new("From date is required", "from"));
            return Err(ApiError::Validation(errors));
        }
    };
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }

    let mut profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(no_profile)?;

    profile.add_education(Education {
        id: Uuid::new_v4(),
        school,
        degree,
        field_of_study,
        from,
        to: payload.to,
        current: payload.current,
        description: payload.description,
    });
    Profile::set_education(&state.db, user_id, &profile.education.0).await?;
    info!(user_id = %user_id, "education added");

    owner_view(&state, user_id).await.map(Json)
}

#[instrument(skip(state))]
pub async fn remove_education(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(edu_id): Path<String>,
) -> ApiResult<Json<ProfileResponse>> {
    let mut profile = Profile::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(no_profile)?;

    if let Ok(edu_id) = edu_id.parse::<Uuid>() {
        profile.remove_education(edu_id);
        Profile::set_education(&state.db, user_id, &profile.education.0).await?;
    }

    owner_view(&state, user_id).await.map(Json)
}
