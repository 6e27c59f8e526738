//! Web CreatePoint form: contact data, picture, map position, UF/city and
//! accepted items, submitted as one multipart request.

use super::{select_id, toggle_id, LocationPicker};
use crate::client::api::{ImageFile, PointSubmission};
use crate::client::{ApiClient, ClientError};
use crate::model::{join_item_ids, PointView};
use std::str::FromStr;

/// Free-text inputs of the form, keyed by their `name` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Name,
    Email,
    Whatsapp,
}

impl FromStr for InputField {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(InputField::Name),
            "email" => Ok(InputField::Email),
            "whatsapp" => Ok(InputField::Whatsapp),
            other => Err(ClientError::Incomplete(format!("unknown input '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatePointForm {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub image: Option<ImageFile>,
    /// Where the map opens; the device position when known.
    pub map_center: (f64, f64),
    /// Picked (latitude, longitude); `None` until the map is clicked.
    pub marker: Option<(f64, f64)>,
    pub location: LocationPicker,
    selected_items: Vec<i64>,
}

impl CreatePointForm {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_input(mut self, field: InputField, value: impl Into<String>) -> Self {
        let value = value.into();
        match field {
            InputField::Name => self.name = value,
            InputField::Email => self.email = value,
            InputField::Whatsapp => self.whatsapp = value,
        }
        self
    }

    #[must_use]
    pub fn with_image(self, image: Option<ImageFile>) -> Self {
        CreatePointForm { image, ..self }
    }

    #[must_use]
    pub fn with_map_center(self, latitude: f64, longitude: f64) -> Self {
        CreatePointForm {
            map_center: (latitude, longitude),
            ..self
        }
    }

    /// Map click: move the marker.
    #[must_use]
    pub fn with_marker(self, latitude: f64, longitude: f64) -> Self {
        CreatePointForm {
            marker: Some((latitude, longitude)),
            ..self
        }
    }

    #[must_use]
    pub fn select_uf(self, value: &str) -> Self {
        let location = self.location.clone().select_uf(value);
        CreatePointForm { location, ..self }
    }

    #[must_use]
    pub fn select_city(self, value: &str) -> Self {
        let location = self.location.clone().select_city(value);
        CreatePointForm { location, ..self }
    }

    /// Item grid click: select the item, or deselect it if already selected.
    #[must_use]
    pub fn toggle_item(mut self, id: i64) -> Self {
        toggle_id(&mut self.selected_items, id);
        self
    }

    /// Preselect `ids`; repeats select once.
    #[must_use]
    pub fn with_items(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        for id in ids {
            select_id(&mut self.selected_items, id);
        }
        self
    }

    /// Submitted coordinates: the marker, or the map center if none was picked.
    pub fn position(&self) -> (f64, f64) {
        self.marker.unwrap_or(self.map_center)
    }

    pub fn is_selected(&self, id: i64) -> bool {
        self.selected_items.contains(&id)
    }

    pub fn selected_items(&self) -> &[i64] {
        &self.selected_items
    }

    /// UF whose cities the city select needs.
    pub fn cities_lookup(&self) -> Option<&str> {
        self.location.cities_lookup()
    }

    pub fn city_selection_enabled(&self) -> bool {
        self.location.city_selection_enabled()
    }

    /// Submit is disabled until both UF and city are chosen.
    pub fn can_submit(&self) -> bool {
        self.location.is_complete()
    }

    /// Text fields in the order they are appended to the multipart body.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let (latitude, longitude) = self.position();
        vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("whatsapp", self.whatsapp.clone()),
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
            ("uf", self.location.uf_value().to_string()),
            ("city", self.location.city_value().to_string()),
            ("items", join_item_ids(&self.selected_items)),
        ]
    }

    pub fn submission(&self) -> Result<PointSubmission, ClientError> {
        if !self.can_submit() {
            return Err(ClientError::Incomplete("select a UF and a city".into()));
        }
        Ok(PointSubmission {
            fields: self.form_fields(),
            image: self.image.clone(),
        })
    }

    /// Send the form in one request.
    pub async fn submit(&self, api: &ApiClient) -> Result<PointView, ClientError> {
        let submission = self.submission()?;
        let created = api.create_point(submission).await?;
        tracing::info!(point_id = created.point.id, "collection point created");
        Ok(created)
    }
}
