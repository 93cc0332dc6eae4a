use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

/// Social links are rebuilt wholesale on every profile save; only the fields
/// supplied non-empty survive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// Work-history entry, stored inside the profile row as JSONB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub from: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Date>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub id: Uuid,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: Date,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Date>,
    #[serde(default)]
    pub current: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: String,
    pub github_username: Option<String>,
    pub skills: Vec<String>,
    pub social: Json<SocialLinks>,
    pub experience: Json<Vec<Experience>>,
    pub education: Json<Vec<Education>>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Fields collected from a create-or-update request. `None` keeps the stored
/// value on update; the social block always replaces the stored one.
#[derive(Debug, Clone)]
pub struct ProfileFields {
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub status: String,
    pub skills: Vec<String>,
    pub social: SocialLinks,
}

impl Profile {
    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, company, website, location, bio, status, github_username,
                   skills, social, experience, education, created_at, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn insert(
        db: &PgPool,
        user_id: Uuid,
        fields: &ProfileFields,
    ) -> anyhow::Result<Profile> {
        let row = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles (user_id, company, website, location, bio, status,
                                  github_username, skills, social)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, user_id, company, website, location, bio, status, github_username,
                      skills, social, experience, education, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&fields.company)
        .bind(&fields.website)
        .bind(&fields.location)
        .bind(&fields.bio)
        .bind(&fields.status)
        .bind(&fields.github_username)
        .bind(&fields.skills)
        .bind(Json(&fields.social))
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    /// Text fields only overwrite when a value was supplied; status, skills
    /// and social always replace the stored ones.
    pub async fn update_by_user(
        db: &PgPool,
        user_id: Uuid,
        fields: &ProfileFields,
    ) -> anyhow::Result<Profile> {
        let row = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE profiles
            SET company = COALESCE($2, company),
                website = COALESCE($3, website),
                location = COALESCE($4, location),
                bio = COALESCE($5, bio),
                github_username = COALESCE($6, github_username),
                status = $7,
                skills = $8,
                social = $9,
                updated_at = now()
            WHERE user_id = $1
            RETURNING id, user_id, company, website, location, bio, status, github_username,
                      skills, social, experience, education, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&fields.company)
        .bind(&fields.website)
        .bind(&fields.location)
        .bind(&fields.bio)
        .bind(&fields.github_username)
        .bind(&fields.status)
        .bind(&fields.skills)
        .bind(Json(&fields.social))
        .fetch_one(db)
        .await?;
        Ok(row)
    }

    pub async fn set_experience(
        db: &PgPool,
        user_id: Uuid,
        experience: &[Experience],
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE profiles SET experience = $2, updated_at = now() WHERE user_id = $1")
            .bind(user_id)
            .bind(Json(experience))
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn set_education(
        db: &PgPool,
        user_id: Uuid,
        education: &[Education],
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE profiles SET education = $2, updated_at = now() WHERE user_id = $1")
            .bind(user_id)
            .bind(Json(education))
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn delete_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }

    /// Newest entry first.
    pub fn add_experience(&mut self, entry: Experience) {
        self.experience.0.insert(0, entry);
    }

    /// Removing an id that is not in the list leaves it untouched.
    pub fn remove_experience(&mut self, entry_id: Uuid) {
        self.experience.0.retain(|e| e.id != entry_id);
    }

    /// Newest entry first.
    pub fn add_education(&mut self, entry: Education) {
        self.education.0.insert(0, entry);
    }

    /// Removing an id that is not in the list leaves it untouched.
    pub fn remove_education(&mut self, entry_id: Uuid) {
        self.education.0.retain(|e| e.id != entry_id);
    }
}

/// Profile row joined with its owner's public fields, the shape every read
/// endpoint returns.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileWithOwner {
    pub id: Uuid,
    pub user_id: Uuid,
    pub company: Option<String>,
    pub website: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub status: String,
    pub github_username: Option<String>,
    pub skills: Vec<String>,
    pub social: Json<SocialLinks>,
    pub experience: Json<Vec<Experience>>,
    pub education: Json<Vec<Education>>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub user_name: String,
    pub user_avatar: String,
}

impl ProfileWithOwner {
    pub async fn find_by_user(
        db: &PgPool,
        user_id: Uuid,
    ) -> anyhow::Result<Option<ProfileWithOwner>> {
        let row = sqlx::query_as::<_, ProfileWithOwner>(
            r#"
            SELECT p.id, p.user_id, p.company, p.website, p.location, p.bio, p.status,
                   p.github_username, p.skills, p.social, p.experience, p.education,
                   p.created_at, p.updated_at,
                   u.name AS user_name, u.avatar AS user_avatar
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(row)
    }

    pub async fn list(db: &PgPool) -> anyhow::Result<Vec<ProfileWithOwner>> {
        let rows = sqlx::query_as::<_, ProfileWithOwner>(
            r#"
            SELECT p.id, p.user_id, p.company, p.website, p.location, p.bio, p.status,
                   p.github_username, p.skills, p.social, p.experience, p.education,
                   p.created_at, p.updated_at,
                   u.name AS user_name, u.avatar AS user_avatar
            FROM profiles p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.created_at ASC
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn profile_fixture() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            company: None,
            website: None,
            location: None,
            bio: None,
            status: "Developer".into(),
            github_username: None,
            skills: vec!["js".into(), "node".into()],
            social: Json(SocialLinks::default()),
            experience: Json(Vec::new()),
            education: Json(Vec::new()),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn experience_fixture(title: &str) -> Experience {
        Experience {
            id: Uuid::new_v4(),
            title: title.into(),
            company: "Acme".into(),
            location: None,
            from: date!(2020 - 01 - 01),
            to: None,
            current: false,
            description: None,
        }
    }

    fn education_fixture(school: &str) -> Education {
        Education {
            id: Uuid::new_v4(),
            school: school.into(),
            degree: "BSc".into(),
            field_of_study: "CS".into(),
            from: date!(2016 - 09 - 01),
            to: Some(date!(2020 - 06 - 30)),
            current: false,
            description: None,
        }
    }

    #[test]
    fn experience_inserts_at_the_head() {
        let mut profile = profile_fixture();
        profile.add_experience(experience_fixture("first"));
        profile.add_experience(experience_fixture("second"));

        let titles: Vec<_> = profile
            .experience
            .0
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, ["second", "first"]);
    }

    #[test]
    fn experience_removes_by_id() {
        let mut profile = profile_fixture();
        let keep = experience_fixture("keep");
        let gone = experience_fixture("gone");
        let gone_id = gone.id;
        profile.add_experience(keep);
        profile.add_experience(gone);

        profile.remove_experience(gone_id);

        assert_eq!(profile.experience.0.len(), 1);
        assert_eq!(profile.experience.0[0].title, "keep");
    }

    #[test]
    fn removing_unknown_experience_id_is_silently_ignored() {
        let mut profile = profile_fixture();
        profile.add_experience(experience_fixture("only"));

        profile.remove_experience(Uuid::new_v4());

        assert_eq!(
            profile.experience.0.len(),
            1,
            "an unknown id must not remove anything"
        );
    }

    #[test]
    fn education_inserts_at_the_head() {
        let mut profile = profile_fixture();
        profile.add_education(education_fixture("first"));
        profile.add_education(education_fixture("second"));

        let schools: Vec<_> = profile
            .education
            .0
            .iter()
            .map(|e| e.school.as_str())
            .collect();
        assert_eq!(schools, ["second", "first"]);
    }

    #[test]
    fn removing_unknown_education_id_is_silently_ignored() {
        let mut profile = profile_fixture();
        profile.add_education(education_fixture("only"));

        profile.remove_education(Uuid::new_v4());

        assert_eq!(profile.education.0.len(), 1);
    }

    #[test]
    fn empty_social_links_serialize_as_an_empty_object() {
        let json = serde_json::to_value(SocialLinks::default()).expect("serialize");
        assert_eq!(json, serde_json::json!({}));
    }
}
