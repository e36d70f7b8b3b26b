use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unsaved article content held by the editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub body: String,
    pub tag_list: Vec<String>,
}

/// The signed-in user an article is published on behalf of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub email: String,
    pub username: String,
    pub token: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub username: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub following: bool,
}

/// An article as returned by the API after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
    #[serde(default)]
    pub tag_list: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub favorited: bool,
    #[serde(default)]
    pub favorites_count: u32,
    pub author: Author,
}

/// Result of a create-article call that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Created(Article),
    /// Server-side validation messages, already flattened for display
    Rejected(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_serializes_with_camel_case_tag_list() {
        let draft = Draft {
            title: "How to train your dragon".to_string(),
            description: "Ever wonder how?".to_string(),
            body: "You have to believe".to_string(),
            tag_list: vec!["dragons".to_string(), "training".to_string()],
        };

        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["title"], "How to train your dragon");
        assert_eq!(value["tagList"][1], "training");
        assert!(value.get("tag_list").is_none());
    }

    #[test]
    fn test_article_deserialization() {
        let raw = r#"{
            "slug": "how-to-train-your-dragon",
            "title": "How to train your dragon",
            "description": "Ever wonder how?",
            "body": "It takes a Jacobian",
            "tagList": ["dragons", "training"],
            "createdAt": "2016-02-18T03:22:56.637Z",
            "updatedAt": "2016-02-18T03:48:35.824Z",
            "favorited": false,
            "favoritesCount": 0,
            "author": {
                "username": "jake",
                "bio": "I work at statefarm",
                "image": "https://i.stack.imgur.com/xHWG8.jpg",
                "following": false
            }
        }"#;

        let article: Article = serde_json::from_str(raw).unwrap();
        assert_eq!(article.slug, "how-to-train-your-dragon");
        assert_eq!(article.tag_list, vec!["dragons", "training"]);
        assert_eq!(article.author.username, "jake");
        assert!(article.created_at < article.updated_at);
    }

    #[test]
    fn test_current_user_optional_fields() {
        let raw = r#"{"email":"jake@jake.jake","username":"jake","token":"jwt.token.here"}"#;
        let user: CurrentUser = serde_json::from_str(raw).unwrap();
        assert_eq!(user.token, "jwt.token.here");
        assert!(user.bio.is_none());
    }
}
