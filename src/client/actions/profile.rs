use uuid::Uuid;

use crate::client::actions::alert::{set_alert, DEFAULT_TIMEOUT};
use crate::client::actions::{Action, AlertKind, AuthAction, ProfileAction, SliceError};
use crate::client::api::{ApiClient, RequestFailure};
use crate::client::store::Store;
use crate::error::MessageBody;
use crate::profiles::dto::{EducationBody, ExperienceBody, ProfileBody, ProfileResponse};

/// Field errors become danger alerts, then the slice records the failure.
fn profile_failure(store: &Store, failure: &RequestFailure) {
    for err in &failure.errors {
        set_alert(store, err.msg.clone(), AlertKind::Danger, DEFAULT_TIMEOUT);
    }
    store.dispatch(Action::Profile(ProfileAction::Error(SliceError::from(
        failure,
    ))));
}

pub async fn get_current_profile(store: &Store, api: &ApiClient) {
    store.dispatch(Action::Profile(ProfileAction::Clear));
    match api.get::<ProfileResponse>("/api/profile/me").await {
        Ok(profile) => store.dispatch(Action::Profile(ProfileAction::Loaded(profile))),
        Err(failure) => profile_failure(store, &failure),
    }
}

pub async fn get_profiles(store: &Store, api: &ApiClient) {
    store.dispatch(Action::Profile(ProfileAction::Clear));
    match api.get::<Vec<ProfileResponse>>("/api/profile").await {
        Ok(profiles) => store.dispatch(Action::Profile(ProfileAction::AllLoaded(profiles))),
        Err(failure) => profile_failure(store, &failure),
    }
}

pub async fn get_profile_by_user(store: &Store, api: &ApiClient, user_id: Uuid) {
    match api
        .get::<ProfileResponse>(&format!("/api/profile/user/{user_id}"))
        .await
    {
        Ok(profile) => store.dispatch(Action::Profile(ProfileAction::Loaded(profile))),
        Err(failure) => profile_failure(store, &failure),
    }
}

/// `edit` picks the success message; a brand new profile also navigates to
/// the dashboard.
pub async fn create_profile(
    store: &Store,
    api: &ApiClient,
    body: ProfileBody,
    edit: bool,
) -> Result<(), RequestFailure> {
    match api.post::<_, ProfileResponse>("/api/profile", &body).await {
        Ok(profile) => {
            store.dispatch(Action::Profile(ProfileAction::Loaded(profile)));
            let msg = if edit { "Profile Updated" } else { "Profile Created" };
            set_alert(store, msg, AlertKind::Success, DEFAULT_TIMEOUT);
            if !edit {
                store.dispatch(Action::Navigate("/dashboard".into()));
            }
            Ok(())
        }
        Err(failure) => {
            profile_failure(store, &failure);
            Err(failure)
        }
    }
}

pub async fn add_experience(
    store: &Store,
    api: &ApiClient,
    body: ExperienceBody,
) -> Result<(), RequestFailure> {
    match api
        .put::<_, ProfileResponse>("/api/profile/experience", &body)
        .await
    {
        Ok(profile) => {
            store.dispatch(Action::Profile(ProfileAction::Loaded(profile)));
            set_alert(store, "Experience Added", AlertKind::Success, DEFAULT_TIMEOUT);
            store.dispatch(Action::Navigate("/dashboard".into()));
            Ok(())
        }
        Err(failure) => {
            profile_failure(store, &failure);
            Err(failure)
        }
    }
}

pub async fn add_education(
    store: &Store,
    api: &ApiClient,
    body: EducationBody,
) -> Result<(), RequestFailure> {
    match api
        .put::<_, ProfileResponse>("/api/profile/education", &body)
        .await
    {
        Ok(profile) => {
            store.dispatch(Action::Profile(ProfileAction::Loaded(profile)));
            set_alert(store, "Education Added", AlertKind::Success, DEFAULT_TIMEOUT);
            store.dispatch(Action::Navigate("/dashboard".into()));
            Ok(())
        }
        Err(failure) => {
            profile_failure(store, &failure);
            Err(failure)
        }
    }
}

pub async fn delete_experience(store: &Store, api: &ApiClient, experience_id: Uuid) {
    match api
        .delete::<ProfileResponse>(&format!("/api/profile/experience/{experience_id}"))
        .await
    {
        Ok(profile) => {
            store.dispatch(Action::Profile(ProfileAction::Loaded(profile)));
            set_alert(
                store,
                "Experience Removed",
                AlertKind::Success,
                DEFAULT_TIMEOUT,
            );
        }
        Err(failure) => profile_failure(store, &failure),
    }
}

pub async fn delete_education(store: &Store, api: &ApiClient, education_id: Uuid) {
    match api
        .delete::<ProfileResponse>(&format!("/api/profile/education/{education_id}"))
        .await
    {
        Ok(profile) => {
            store.dispatch(Action::Profile(ProfileAction::Loaded(profile)));
            set_alert(
                store,
                "Education Removed",
                AlertKind::Success,
                DEFAULT_TIMEOUT,
            );
        }
        Err(failure) => profile_failure(store, &failure),
    }
}

/// Deletes the account server-side, then tears the session down.
pub async fn delete_account(store: &Store, api: &ApiClient) -> Result<(), RequestFailure> {
    match api.delete::<MessageBody>("/api/profile").await {
        Ok(_) => {
            api.set_auth_token(None);
            store.dispatch(Action::Profile(ProfileAction::Clear));
            store.dispatch(Action::Auth(AuthAction::AccountDeleted));
            set_alert(
                store,
                "Your account has been permanently deleted",
                AlertKind::Success,
                DEFAULT_TIMEOUT,
            );
            Ok(())
        }
        Err(failure) => {
            profile_failure(store, &failure);
            Err(failure)
        }
    }
}
