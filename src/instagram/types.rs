use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as handed back by a [`PostResolver`](super::PostResolver)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub owner_username: String,
    pub caption: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub video_view_count: Option<i64>,
    pub likes: Option<i64>,
    pub comments: Option<i64>,
    pub tagged_users: Vec<TaggedUser>,
    pub is_video: bool,
    pub video_url: Option<String>,
    pub typename: String,
    pub location: Option<Location>,
}

/// Tagged users arrive either as bare usernames or as user objects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaggedUser {
    Name(String),
    Profile { username: String },
    Node { user: UserRef },
}

impl TaggedUser {
    pub fn username(&self) -> &str {
        match self {
            TaggedUser::Name(name) => name,
            TaggedUser::Profile { username } => username,
            TaggedUser::Node { user } => &user.username,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<GraphQlData>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlData {
    #[serde(alias = "shortcode_media")]
    pub xdt_shortcode_media: Option<ShortcodeMedia>,
}

#[derive(Debug, Deserialize)]
pub struct ShortcodeMedia {
    #[serde(rename = "__typename")]
    pub typename: String,
    pub owner: UserRef,
    #[serde(default)]
    pub is_video: bool,
    pub video_url: Option<String>,
    pub video_view_count: Option<i64>,
    pub taken_at_timestamp: Option<i64>,
    pub edge_media_to_caption: Option<Edges<CaptionNode>>,
    pub edge_media_preview_like: Option<Count>,
    pub edge_media_to_parent_comment: Option<Count>,
    pub edge_media_to_comment: Option<Count>,
    pub edge_media_to_tagged_user: Option<Edges<TaggedUser>>,
    pub location: Option<Location>,
}

#[derive(Debug, Deserialize)]
pub struct Edges<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
pub struct CaptionNode {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct Count {
    pub count: i64,
}

impl From<ShortcodeMedia> for Post {
    fn from(media: ShortcodeMedia) -> Self {
        let caption = media
            .edge_media_to_caption
            .and_then(|c| c.edges.into_iter().next())
            .map(|e| e.node.text);
        let comments = media
            .edge_media_to_parent_comment
            .or(media.edge_media_to_comment)
            .map(|c| c.count);
        let tagged_users = media
            .edge_media_to_tagged_user
            .map(|t| t.edges.into_iter().map(|e| e.node).collect())
            .unwrap_or_default();

        Post {
            owner_username: media.owner.username,
            caption,
            timestamp: media
                .taken_at_timestamp
                .and_then(|t| DateTime::<Utc>::from_timestamp(t, 0)),
            video_view_count: media.video_view_count,
            likes: media.edge_media_preview_like.map(|c| c.count),
            comments,
            tagged_users,
            is_video: media.is_video,
            video_url: media.video_url,
            typename: media
                .typename
                .strip_prefix("XDT")
                .unwrap_or(&media.typename)
                .to_string(),
            location: media.location,
        }
    }
}
