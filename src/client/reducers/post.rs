use crate::client::actions::{PostAction, SliceError};
use crate::posts::dto::PostResponse;

#[derive(Debug, Clone, PartialEq)]
pub struct PostState {
    pub posts: Vec<PostResponse>,
    pub post: Option<PostResponse>,
    pub loading: bool,
    pub error: Option<SliceError>,
}

impl Default for PostState {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            post: None,
            loading: true,
            error: None,
        }
    }
}

pub fn reduce(state: &PostState, action: &PostAction) -> PostState {
    match action {
        PostAction::Loaded(posts) => PostState {
            posts: posts.clone(),
            loading: false,
            ..state.clone()
        },
        PostAction::Single(post) => PostState {
            post: Some(post.clone()),
            loading: false,
            ..state.clone()
        },
        PostAction::Added(post) => {
            let mut posts = Vec::with_capacity(state.posts.len() + 1);
            posts.push(post.clone());
            posts.extend(state.posts.iter().cloned());
            PostState {
                posts,
                loading: false,
                ..state.clone()
            }
        }
        PostAction::Deleted(post_id) => PostState {
            posts: state
                .posts
                .iter()
                .filter(|p| p.id != *post_id)
                .cloned()
                .collect(),
            loading: false,
            ..state.clone()
        },
        PostAction::LikesUpdated { post_id, likes } => PostState {
            posts: state
                .posts
                .iter()
                .map(|p| {
                    if p.id == *post_id {
                        PostResponse {
                            likes: likes.clone(),
                            ..p.clone()
                        }
                    } else {
                        p.clone()
                    }
                })
                .collect(),
            loading: false,
            ..state.clone()
        },
        PostAction::CommentsUpdated { post_id, comments } => PostState {
            post: match &state.post {
                Some(p) if p.id == *post_id => Some(PostResponse {
                    comments: comments.clone(),
                    ..p.clone()
                }),
                other => other.clone(),
            },
            loading: false,
            ..state.clone()
        },
        PostAction::Error(error) => PostState {
            error: Some(error.clone()),
            loading: false,
            ..state.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::repo::{Comment, Like};
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn post(text: &str) -> PostResponse {
        PostResponse {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Ada".into(),
            avatar: "https://www.gravatar.com/avatar/x".into(),
            text: text.into(),
            likes: Vec::new(),
            comments: Vec::new(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn added_posts_go_to_the_head_of_the_list() {
        let state = reduce(&PostState::default(), &PostAction::Loaded(vec![post("old")]));
        let state = reduce(&state, &PostAction::Added(post("new")));

        let texts: Vec<_> = state.posts.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, ["new", "old"]);
    }

    #[test]
    fn deleted_removes_only_the_named_post() {
        let keep = post("keep");
        let gone = post("gone");
        let gone_id = gone.id;
        let state = reduce(&PostState::default(), &PostAction::Loaded(vec![keep, gone]));

        let state = reduce(&state, &PostAction::Deleted(gone_id));

        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.posts[0].text, "keep");
    }

    #[test]
    fn likes_update_targets_a_single_post() {
        let liked = post("liked");
        let liked_id = liked.id;
        let other = post("other");
        let state = reduce(&PostState::default(), &PostAction::Loaded(vec![liked, other]));

        let likes = vec![Like { user: Uuid::new_v4() }];
        let state = reduce(
            &state,
            &PostAction::LikesUpdated {
                post_id: liked_id,
                likes: likes.clone(),
            },
        );

        assert_eq!(state.posts[0].likes, likes);
        assert!(state.posts[1].likes.is_empty());
    }

    #[test]
    fn comments_update_replaces_the_open_posts_comments() {
        let open = post("open");
        let open_id = open.id;
        let state = reduce(&PostState::default(), &PostAction::Single(open));

        let comments = vec![Comment {
            id: Uuid::new_v4(),
            user: Uuid::new_v4(),
            text: "hi".into(),
            name: "Grace".into(),
            avatar: "https://www.gravatar.com/avatar/y".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
        }];
        let state = reduce(
            &state,
            &PostAction::CommentsUpdated {
                post_id: open_id,
                comments: comments.clone(),
            },
        );

        assert_eq!(state.post.map(|p| p.comments), Some(comments));
    }

    #[test]
    fn errors_record_message_and_status() {
        let state = reduce(
            &PostState::default(),
            &PostAction::Error(SliceError {
                msg: "Unauthorized".into(),
                status: 401,
            }),
        );

        assert_eq!(state.error.map(|e| e.status), Some(401));
        assert!(!state.loading);
    }
}
