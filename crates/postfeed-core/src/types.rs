use serde::{Deserialize, Serialize};
use serde_json::from_slice;

use crate::Result;

/// A single blog-post-like record as served by the posts endpoint.
///
/// Wire names are camelCase (`userId`); every field is required and `null`
/// is rejected. Extra keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Author reference. Not validated against anything.
    pub user_id: i64,
    /// Identity of the post within a fetch result.
    pub id: i64,
    /// Headline text.
    pub title: String,
    /// Body text.
    pub body: String,
}

impl Post {
    /// Creates a post from its parts.
    pub fn new(user_id: i64, id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            user_id,
            id,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Decodes a JSON array of posts.
    ///
    /// The decode is atomic: one malformed element fails the whole list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Decode`] if `bytes` is not valid JSON, is not
    /// an array, or contains an element missing a field or carrying the
    /// wrong type.
    pub fn decode_list(bytes: &[u8]) -> Result<Vec<Self>> {
        let posts: Vec<Self> = from_slice(bytes)?;
        Ok(posts)
    }
}
