//! Drives a full session against a running devlink server and prints the
//! rendered screens. Point `DEVLINK_BASE_URL` at the server; it defaults
//! to http://localhost:8080.

use anyhow::Context;
use tracing::info;
use uuid::Uuid;

use devlink::client::actions::{auth, post, profile};
use devlink::client::api::ApiClient;
use devlink::client::components::{
    self, CommentForm, EducationForm, ExperienceForm, PostForm, ProfileForm, RegisterForm,
};
use devlink::client::store::Store;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devlink=info".into()),
        )
        .init();

    let base_url =
        std::env::var("DEVLINK_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".into());
    info!(%base_url, "starting client demo");

    let api = ApiClient::new(base_url);
    let store = Store::new();

    // Throwaway account per run so the demo can be replayed.
    let email = format!("demo-{}@devlink.dev", Uuid::new_v4().simple());
    let register = RegisterForm {
        name: "Demo User".into(),
        email,
        password: "demo-password".into(),
    };
    auth::register(&store, &api, register.into_request())
        .await
        .context("registration failed, is the server running?")?;

    let profile_form = ProfileForm {
        status: "Developer".into(),
        skills: "js,node".into(),
        company: "Devlink".into(),
        bio: "Building things in public.".into(),
        ..ProfileForm::default()
    };
    profile::create_profile(&store, &api, profile_form.into_request(), false)
        .await
        .context("profile creation failed")?;

    let experience = ExperienceForm {
        title: "Engineer".into(),
        company: "Devlink".into(),
        from: "2024-01-01".into(),
        current: true,
        ..ExperienceForm::default()
    };
    profile::add_experience(&store, &api, experience.into_request())
        .await
        .context("adding experience failed")?;

    let education = EducationForm {
        school: "Devlink Academy".into(),
        degree: "Certificate".into(),
        field_of_study: "Web Development".into(),
        from: "2023-01-01".into(),
        to: "2023-12-31".into(),
        ..EducationForm::default()
    };
    profile::add_education(&store, &api, education.into_request())
        .await
        .context("adding education failed")?;

    profile::get_current_profile(&store, &api).await;
    println!("{}", components::render_dashboard(&store.state()));

    let post_form = PostForm {
        text: "Hello from the demo client".into(),
    };
    post::create_post(&store, &api, post_form.into_request())
        .await
        .context("post creation failed")?;

    let post_id = store
        .state()
        .posts
        .posts
        .first()
        .map(|p| p.id)
        .context("post missing from the store after creation")?;
    post::like_post(&store, &api, post_id).await;
    let comment = CommentForm {
        text: "First comment".into(),
    };
    post::add_comment(&store, &api, post_id, comment.into_request())
        .await
        .context("adding a comment failed")?;

    post::get_posts(&store, &api).await;
    println!("{}", components::render_posts(&store.state().posts.posts));

    post::get_post(&store, &api, post_id).await;
    let snapshot = store.state();
    if let Some(open) = &snapshot.posts.post {
        println!("{}", components::render_post(open));
    }

    profile::get_profiles(&store, &api).await;
    println!(
        "{}",
        components::render_profiles(&store.state().profile.profiles)
    );

    auth::logout(&store, &api);
    info!("demo finished");
    Ok(())
}
