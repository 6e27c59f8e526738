//! Client for the Ecoleta REST API.

use super::{build_http_client, check_status, join_url, ClientError};
use crate::model::{join_item_ids, ItemView, PointDetail, PointFilter, PointView};
use reqwest::multipart::{Form, Part};
use url::Url;

/// Picture attached to a point submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub async fn read(path: &std::path::Path) -> Result<Self, ClientError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("image")
            .to_string();
        Ok(ImageFile { file_name, bytes })
    }
}

/// Everything `POST /points` receives: text fields plus an optional image.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSubmission {
    pub fields: Vec<(&'static str, String)>,
    pub image: Option<ImageFile>,
}

impl PointSubmission {
    fn into_form(self) -> Form {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        if let Some(image) = self.image {
            form = form.part("image", Part::bytes(image.bytes).file_name(image.file_name));
        }
        form
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// `base_url` is the backend root, e.g. `http://localhost:3333`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(ApiClient {
            http: build_http_client()?,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn points_url(&self, filter: &PointFilter) -> Result<Url, ClientError> {
        let mut url = join_url(&self.base_url, "points")?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(city) = filter.city.as_deref().filter(|s| !s.is_empty()) {
                pairs.append_pair("city", city);
            }
            if let Some(uf) = filter.uf.as_deref().filter(|s| !s.is_empty()) {
                pairs.append_pair("uf", uf);
            }
            if !filter.items.is_empty() {
                pairs.append_pair("items", &join_item_ids(&filter.items));
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }

    /// GET /items
    pub async fn items(&self) -> Result<Vec<ItemView>, ClientError> {
        let url = join_url(&self.base_url, "items")?;
        Ok(check_status(self.http.get(url).send().await?).await?.json().await?)
    }

    /// GET /points with the filter's query parameters.
    pub async fn points(&self, filter: &PointFilter) -> Result<Vec<PointView>, ClientError> {
        let url = self.points_url(filter)?;
        Ok(check_status(self.http.get(url).send().await?).await?.json().await?)
    }

    /// GET /points/:id
    pub async fn point(&self, id: i64) -> Result<PointDetail, ClientError> {
        let url = join_url(&self.base_url, &format!("points/{}", id))?;
        Ok(check_status(self.http.get(url).send().await?).await?.json().await?)
    }

    /// POST /points as one multipart request.
    pub async fn create_point(&self, submission: PointSubmission) -> Result<PointView, ClientError> {
        let url = join_url(&self.base_url, "points")?;
        let resp = self.http.post(url).multipart(submission.into_form()).send().await?;
        Ok(check_status(resp).await?.json().await?)
    }
}
