//! Presentational layer: pure render functions from state to display text,
//! plus the form structs that collect input before it becomes a request
//! body. Nothing here performs I/O or touches the store.

use time::{format_description::FormatItem, macros::format_description, Date};

use crate::auth::dto::LoginRequest;
use crate::client::actions::Alert;
use crate::client::store::ClientState;
use crate::posts::dto::{CommentRequest, CreatePostRequest, PostResponse};
use crate::profiles::dto::{EducationBody, ExperienceBody, ProfileBody, ProfileResponse};
use crate::profiles::repo::{Education, Experience};
use crate::users::dto::RegisterRequest;

const DISPLAY_DATE: &[FormatItem<'static>] = format_description!("[year]/[month]/[day]");
const INPUT_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

fn format_date(date: Date) -> String {
    date.format(&DISPLAY_DATE).unwrap_or_default()
}

/// An open-ended range renders as "from - Now".
fn format_range(from: Date, to: Option<Date>) -> String {
    match to {
        Some(to) => format!("{} - {}", format_date(from), format_date(to)),
        None => format!("{} - Now", format_date(from)),
    }
}

fn opt(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

fn parse_input_date(value: &str) -> Option<Date> {
    Date::parse(value, INPUT_DATE).ok()
}

pub fn render_alerts(alerts: &[Alert]) -> String {
    alerts
        .iter()
        .map(|a| format!("[{}] {}", a.kind.as_str(), a.msg))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_profiles(profiles: &[ProfileResponse]) -> String {
    let mut out = String::from("Developers\n");
    if profiles.is_empty() {
        out.push_str("No profiles found...\n");
        return out;
    }
    for p in profiles {
        let company = p
            .company
            .as_deref()
            .map(|c| format!(" at {c}"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{} - {}{} [{}]\n",
            p.user.name,
            p.status,
            company,
            p.skills.join(", ")
        ));
    }
    out
}

pub fn render_profile(profile: &ProfileResponse) -> String {
    let mut out = format!("{}\n{}", profile.user.name, profile.status);
    if let Some(company) = &profile.company {
        out.push_str(&format!(" at {company}"));
    }
    out.push('\n');
    if let Some(location) = &profile.location {
        out.push_str(&format!("{location}\n"));
    }
    if let Some(bio) = &profile.bio {
        out.push_str(&format!("{bio}\n"));
    }
    out.push_str(&format!("Skills: {}\n", profile.skills.join(", ")));
    for (label, link) in [
        ("youtube", &profile.social.youtube),
        ("twitter", &profile.social.twitter),
        ("facebook", &profile.social.facebook),
        ("linkedin", &profile.social.linkedin),
        ("instagram", &profile.social.instagram),
    ] {
        if let Some(url) = link {
            out.push_str(&format!("{label}: {url}\n"));
        }
    }
    out.push_str(&render_experience_table(&profile.experience));
    out.push_str(&render_education_table(&profile.education));
    out
}

pub fn render_experience_table(experience: &[Experience]) -> String {
    let mut out = String::from("Experience Credentials\n");
    if experience.is_empty() {
        out.push_str("No experience credentials\n");
        return out;
    }
    out.push_str("Company | Title | Years\n");
    for e in experience {
        out.push_str(&format!(
            "{} | {} | {}\n",
            e.company,
            e.title,
            format_range(e.from, e.to)
        ));
    }
    out
}

pub fn render_education_table(education: &[Education]) -> String {
    let mut out = String::from("Education Credentials\n");
    if education.is_empty() {
        out.push_str("No education credentials\n");
        return out;
    }
    out.push_str("School | Field of study | Years\n");
    for e in education {
        out.push_str(&format!(
            "{} | {} | {}\n",
            e.school,
            e.field_of_study,
            format_range(e.from, e.to)
        ));
    }
    out
}

pub fn render_posts(posts: &[PostResponse]) -> String {
    let mut out = String::from("Posts\n");
    for p in posts {
        out.push_str(&format!(
            "{}: {} ({} likes, {} comments)\n",
            p.name,
            p.text,
            p.likes.len(),
            p.comments.len()
        ));
    }
    out
}

pub fn render_post(post: &PostResponse) -> String {
    let mut out = format!("{}\n{}\n", post.name, post.text);
    out.push_str(&format!("Likes: {}\n", post.likes.len()));
    for c in &post.comments {
        out.push_str(&format!("  {}: {}\n", c.name, c.text));
    }
    out
}

/// One-screen summary: alerts, greeting, then the caller's credentials.
pub fn render_dashboard(state: &ClientState) -> String {
    let mut out = String::from("Dashboard\n");
    let alerts = render_alerts(&state.alerts);
    if !alerts.is_empty() {
        out.push_str(&alerts);
        out.push('\n');
    }
    if let Some(user) = &state.auth.user {
        out.push_str(&format!("Welcome {}\n", user.name));
    }
    match &state.profile.profile {
        Some(profile) => {
            out.push_str(&render_experience_table(&profile.experience));
            out.push_str(&render_education_table(&profile.education));
        }
        None => out.push_str("You have not yet setup a profile, please add some info\n"),
    }
    out
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn into_request(self) -> RegisterRequest {
        RegisterRequest {
            name: Some(self.name),
            email: Some(self.email),
            password: Some(self.password),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn into_request(self) -> LoginRequest {
        LoginRequest {
            email: Some(self.email),
            password: Some(self.password),
        }
    }
}

/// Empty fields are dropped so the server keeps the stored values.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub company: String,
    pub website: String,
    pub location: String,
    pub status: String,
    pub skills: String,
    pub github_username: String,
    pub bio: String,
    pub youtube: String,
    pub twitter: String,
    pub facebook: String,
    pub linkedin: String,
    pub instagram: String,
}

impl ProfileForm {
    pub fn into_request(self) -> ProfileBody {
        ProfileBody {
            company: opt(self.company),
            website: opt(self.website),
            location: opt(self.location),
            bio: opt(self.bio),
            status: opt(self.status),
            github_username: opt(self.github_username),
            skills: opt(self.skills),
            youtube: opt(self.youtube),
            twitter: opt(self.twitter),
            facebook: opt(self.facebook),
            linkedin: opt(self.linkedin),
            instagram: opt(self.instagram),
        }
    }
}

/// Dates are collected in the date-input format "YYYY-MM-DD".
#[derive(Debug, Clone, Default)]
pub struct ExperienceForm {
    pub title: String,
    pub company: String,
    pub location: String,
    pub from: String,
    pub to: String,
    pub current: bool,
    pub description: String,
}

impl ExperienceForm {
    pub fn into_request(self) -> ExperienceBody {
        ExperienceBody {
            title: opt(self.title),
            company: opt(self.company),
            location: opt(self.location),
            from: parse_input_date(&self.from),
            to: parse_input_date(&self.to),
            current: self.current,
            description: opt(self.description),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EducationForm {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub from: String,
    pub to: String,
    pub current: bool,
    pub description: String,
}

impl EducationForm {
    pub fn into_request(self) -> EducationBody {
        EducationBody {
            school: opt(self.school),
            degree: opt(self.degree),
            field_of_study: opt(self.field_of_study),
            from: parse_input_date(&self.from),
            to: parse_input_date(&self.to),
            current: self.current,
            description: opt(self.description),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostForm {
    pub text: String,
}

impl PostForm {
    pub fn into_request(self) -> CreatePostRequest {
        CreatePostRequest {
            text: opt(self.text),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommentForm {
    pub text: String,
}

impl CommentForm {
    pub fn into_request(self) -> CommentRequest {
        CommentRequest {
            text: opt(self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::actions::AlertKind;
    use time::macros::date;
    use uuid::Uuid;

    #[test]
    fn open_ended_ranges_render_as_now() {
        assert_eq!(
            format_range(date!(2020 - 01 - 01), None),
            "2020/01/01 - Now"
        );
        assert_eq!(
            format_range(date!(2020 - 01 - 01), Some(date!(2021 - 06 - 30))),
            "2020/01/01 - 2021/06/30"
        );
    }

    #[test]
    fn input_dates_parse_the_date_input_format() {
        assert_eq!(parse_input_date("2020-01-01"), Some(date!(2020 - 01 - 01)));
        assert_eq!(parse_input_date(""), None);
        assert_eq!(parse_input_date("01/01/2020"), None);
    }

    #[test]
    fn alerts_render_one_line_each() {
        let alerts = vec![
            Alert {
                id: Uuid::new_v4(),
                msg: "Profile Created".into(),
                kind: AlertKind::Success,
            },
            Alert {
                id: Uuid::new_v4(),
                msg: "Invalid credentials".into(),
                kind: AlertKind::Danger,
            },
        ];

        let out = render_alerts(&alerts);

        assert_eq!(out, "[success] Profile Created\n[danger] Invalid credentials");
    }

    #[test]
    fn experience_table_lists_company_title_and_years() {
        let experience = vec![Experience {
            id: Uuid::new_v4(),
            title: "Engineer".into(),
            company: "Acme".into(),
            location: None,
            from: date!(2020 - 01 - 01),
            to: None,
            current: true,
            description: None,
        }];

        let out = render_experience_table(&experience);

        assert!(out.starts_with("Experience Credentials\n"));
        assert!(out.contains("Acme | Engineer | 2020/01/01 - Now"));
    }

    #[test]
    fn profile_detail_shows_status_skills_links_and_credentials() {
        use crate::profiles::dto::ProfileOwner;
        use crate::profiles::repo::SocialLinks;
        use time::OffsetDateTime;

        let profile = ProfileResponse {
            id: Uuid::new_v4(),
            user: ProfileOwner {
                id: Uuid::new_v4(),
                name: "Ada".into(),
                avatar: "https://www.gravatar.com/avatar/x".into(),
            },
            company: Some("Acme".into()),
            website: None,
            location: Some("London".into()),
            bio: None,
            status: "Developer".into(),
            github_username: None,
            skills: vec!["js".into(), "node".into()],
            social: SocialLinks {
                twitter: Some("https://twitter.com/ada".into()),
                ..SocialLinks::default()
            },
            experience: Vec::new(),
            education: vec![Education {
                id: Uuid::new_v4(),
                school: "MIT".into(),
                degree: "BSc".into(),
                field_of_study: "CS".into(),
                from: date!(2016 - 09 - 01),
                to: Some(date!(2020 - 06 - 30)),
                current: false,
                description: None,
            }],
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };

        let out = render_profile(&profile);

        assert!(out.contains("Ada\nDeveloper at Acme"));
        assert!(out.contains("London"));
        assert!(out.contains("Skills: js, node"));
        assert!(out.contains("twitter: https://twitter.com/ada"));
        assert!(out.contains("Education Credentials"));
        assert!(out.contains("MIT | CS | 2016/09/01 - 2020/06/30"));
    }

    #[test]
    fn education_table_lists_school_field_of_study_and_years() {
        let education = vec![Education {
            id: Uuid::new_v4(),
            school: "MIT".into(),
            degree: "BSc".into(),
            field_of_study: "CS".into(),
            from: date!(2016 - 09 - 01),
            to: None,
            current: true,
            description: None,
        }];

        let out = render_education_table(&education);

        assert!(out.starts_with("Education Credentials\n"));
        assert!(out.contains("School | Field of study | Years"));
        assert!(out.contains("MIT | CS | 2016/09/01 - Now"));
    }

    #[test]
    fn login_form_always_sends_both_fields() {
        // Presence checks belong to the server, so empties go on the wire.
        let body = LoginForm::default().into_request();
        assert_eq!(body.email.as_deref(), Some(""));
        assert_eq!(body.password.as_deref(), Some(""));

        let body = LoginForm {
            email: "ada@devlink.dev".into(),
            password: "hunter22".into(),
        }
        .into_request();
        assert_eq!(body.email.as_deref(), Some("ada@devlink.dev"));
        assert_eq!(body.password.as_deref(), Some("hunter22"));
    }

    #[test]
    fn profile_form_drops_empty_fields() {
        let body = ProfileForm {
            status: "Developer".into(),
            skills: "js,node".into(),
            ..ProfileForm::default()
        }
        .into_request();

        assert_eq!(body.status.as_deref(), Some("Developer"));
        assert_eq!(body.skills.as_deref(), Some("js,node"));
        assert_eq!(body.company, None);
        assert_eq!(body.youtube, None);
    }

    #[test]
    fn experience_form_parses_its_dates() {
        let body = ExperienceForm {
            title: "Engineer".into(),
            company: "Acme".into(),
            from: "2020-01-01".into(),
            current: true,
            ..ExperienceForm::default()
        }
        .into_request();

        assert_eq!(body.from, Some(date!(2020 - 01 - 01)));
        assert_eq!(body.to, None);
        assert!(body.current);
    }
}
