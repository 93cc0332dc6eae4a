use crate::client::actions::{ProfileAction, SliceError};
use crate::profiles::dto::ProfileResponse;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileState {
    pub profile: Option<ProfileResponse>,
    pub profiles: Vec<ProfileResponse>,
    pub loading: bool,
    pub error: Option<SliceError>,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            profile: None,
            profiles: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

pub fn reduce(state: &ProfileState, action: &ProfileAction) -> ProfileState {
    match action {
        ProfileAction::Loaded(profile) => ProfileState {
            profile: Some(profile.clone()),
            loading: false,
            ..state.clone()
        },
        ProfileAction::AllLoaded(profiles) => ProfileState {
            profiles: profiles.clone(),
            loading: false,
            ..state.clone()
        },
        ProfileAction::Error(error) => ProfileState {
            profile: None,
            error: Some(error.clone()),
            loading: false,
            ..state.clone()
        },
        ProfileAction::Clear => ProfileState {
            profile: None,
            profiles: Vec::new(),
            loading: false,
            error: state.error.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::dto::ProfileOwner;
    use crate::profiles::repo::SocialLinks;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn profile() -> ProfileResponse {
        ProfileResponse {
            id: Uuid::new_v4(),
            user: ProfileOwner {
                id: Uuid::new_v4(),
                name: "Ada".into(),
                avatar: "https://www.gravatar.com/avatar/x".into(),
            },
            company: None,
            website: None,
            location: None,
            bio: None,
            status: "Developer".into(),
            github_username: None,
            skills: vec!["js".into(), "node".into()],
            social: SocialLinks::default(),
            experience: Vec::new(),
            education: Vec::new(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn loaded_sets_the_profile_and_clears_loading() {
        let state = reduce(&ProfileState::default(), &ProfileAction::Loaded(profile()));
        assert!(state.profile.is_some());
        assert!(!state.loading);
    }

    #[test]
    fn error_clears_the_profile_and_records_the_payload() {
        let loaded = reduce(&ProfileState::default(), &ProfileAction::Loaded(profile()));
        let state = reduce(
            &loaded,
            &ProfileAction::Error(SliceError {
                msg: "Bad Request".into(),
                status: 400,
            }),
        );

        assert_eq!(state.profile, None);
        assert_eq!(
            state.error,
            Some(SliceError {
                msg: "Bad Request".into(),
                status: 400
            })
        );
        assert!(!state.loading);
    }

    #[test]
    fn clear_drops_the_profile_and_the_profiles_cache() {
        let mut state = reduce(&ProfileState::default(), &ProfileAction::Loaded(profile()));
        state = reduce(&state, &ProfileAction::AllLoaded(vec![profile()]));

        let cleared = reduce(&state, &ProfileAction::Clear);

        assert_eq!(cleared.profile, None);
        assert!(cleared.profiles.is_empty());
        assert!(!cleared.loading);
    }

    #[test]
    fn clearing_twice_equals_clearing_once() {
        let loaded = reduce(&ProfileState::default(), &ProfileAction::Loaded(profile()));

        let once = reduce(&loaded, &ProfileAction::Clear);
        let twice = reduce(&once, &ProfileAction::Clear);

        assert_eq!(once, twice);
    }
}
