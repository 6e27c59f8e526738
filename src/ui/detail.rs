//! Mobile Detail screen: one point, its items, and the two contact actions.
//! Opening the links is left to the device.

use crate::client::{ApiClient, ClientError};
use crate::model::PointDetail;
use url::Url;

pub const WHATSAPP_MESSAGE: &str = "Olá! Tenho interesse na coleta de resíduos";
pub const MAIL_SUBJECT: &str = "Interesse na coleta de resíduos";

/// Input for the native mail composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    pub subject: String,
    pub recipients: Vec<String>,
}

impl MailDraft {
    /// `mailto:` rendering for environments without a composer.
    pub fn mailto_url(&self) -> Result<Url, ClientError> {
        let mut url = Url::parse(&format!("mailto:{}", self.recipients.join(",")))?;
        url.set_query(Some(&format!("subject={}", self.subject)));
        Ok(url)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointDetailView {
    detail: PointDetail,
}

impl PointDetailView {
    pub fn new(detail: PointDetail) -> Self {
        PointDetailView { detail }
    }

    /// One GET; a failure leaves nothing to render.
    pub async fn load(api: &ApiClient, point_id: i64) -> Result<Self, ClientError> {
        Ok(Self::new(api.point(point_id).await?))
    }

    pub fn name(&self) -> &str {
        &self.detail.point.point.name
    }

    pub fn image_url(&self) -> &str {
        &self.detail.point.image_url
    }

    /// Accepted item titles, comma-joined.
    pub fn items_line(&self) -> String {
        self.detail
            .items
            .iter()
            .map(|i| i.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `"<city>, <uf>"`
    pub fn address_line(&self) -> String {
        let p = &self.detail.point.point;
        format!("{}, {}", p.city, p.uf)
    }

    /// `whatsapp://send?phone=<number>&text=<greeting>`
    pub fn whatsapp_link(&self) -> Result<Url, ClientError> {
        let mut url = Url::parse("whatsapp://send")?;
        url.set_query(Some(&format!(
            "phone={}&text={}",
            self.detail.point.point.whatsapp, WHATSAPP_MESSAGE
        )));
        Ok(url)
    }

    pub fn mail_draft(&self) -> MailDraft {
        MailDraft {
            subject: MAIL_SUBJECT.to_string(),
            recipients: vec![self.detail.point.point.email.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemTitle, Point};

    fn view() -> PointDetailView {
        let point = Point {
            id: 9,
            image: "f00dbabe1234-fachada.jpg".into(),
            name: "Recicla Recife".into(),
            email: "contato@recicla.org".into(),
            whatsapp: "5581999990000".into(),
            latitude: -8.05,
            longitude: -34.9,
            city: "Recife".into(),
            uf: "PE".into(),
        };
        PointDetailView::new(PointDetail {
            point: point.into_view("http://localhost:3333"),
            items: vec![
                ItemTitle { title: "Lâmpadas".into() },
                ItemTitle { title: "Óleo de Cozinha".into() },
            ],
        })
    }

    #[test]
    fn renders_items_and_address() {
        let v = view();
        assert_eq!(v.name(), "Recicla Recife");
        assert_eq!(v.items_line(), "Lâmpadas, Óleo de Cozinha");
        assert_eq!(v.address_line(), "Recife, PE");
        assert_eq!(v.image_url(), "http://localhost:3333/uploads/f00dbabe1234-fachada.jpg");
    }

    #[test]
    fn whatsapp_link_carries_phone_and_greeting() {
        let url = view().whatsapp_link().unwrap();
        assert_eq!(url.scheme(), "whatsapp");
        assert!(url.as_str().starts_with("whatsapp://send?phone=5581999990000&text="));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[1], ("text".to_string(), WHATSAPP_MESSAGE.to_string()));
    }

    #[test]
    fn mail_draft_targets_point_email() {
        let draft = view().mail_draft();
        assert_eq!(draft.subject, MAIL_SUBJECT);
        assert_eq!(draft.recipients, vec!["contato@recicla.org".to_string()]);
        let url = draft.mailto_url().unwrap();
        assert_eq!(
            url.as_str(),
            "mailto:contato@recicla.org?subject=Interesse%20na%20coleta%20de%20res%C3%ADduos"
        );
    }
}
