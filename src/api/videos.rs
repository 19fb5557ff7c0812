use serde_json::json;

use super::client::ApiClient;
use super::types::{ApiError, Comment, Video};

impl ApiClient {
    pub async fn get_video(&self, video_id: &str) -> Result<Video, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| self.http_client().get(format!("{base_url}/videos/{video_id}")))
            .await?;
        Self::read_envelope(response).await
    }

    pub async fn get_related_videos(&self, video_id: &str) -> Result<Vec<Video>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                self.http_client()
                    .get(format!("{base_url}/videos/related/{video_id}"))
            })
            .await?;
        Self::read_envelope(response).await
    }

    pub async fn get_comments(&self, video_id: &str) -> Result<Vec<Comment>, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                self.http_client()
                    .get(format!("{base_url}/comments/{video_id}"))
            })
            .await?;
        Self::read_envelope(response).await
    }

    pub async fn post_comment(&self, video_id: &str, content: &str) -> Result<Comment, ApiError> {
        let base_url = self.resolved_base_url().await;
        let response = self
            .send_with_refresh(|| {
                self.http_client()
                    .post(format!("{base_url}/comments/{video_id}"))
                    .json(&json!({ "content": content }))
            })
            .await?;
        Self::read_envelope(response).await
    }
}
