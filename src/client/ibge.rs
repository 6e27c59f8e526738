//! IBGE localities API: federative units and their municipalities.
//!
//! Responses are passed through with field renaming only: a UF becomes
//! `Location { id, name: sigla }` and a city `Location { id, name: nome }`.

use super::{build_http_client, check_status, join_url, ClientError};
use serde::{Deserialize, Serialize};
use url::Url;

/// One entry of an IBGE listing, as the IBGE API spells it.
#[derive(Debug, Clone, Deserialize)]
pub struct IbgeLocality {
    pub id: i64,
    #[serde(default)]
    pub sigla: Option<String>,
    pub nome: String,
}

/// A selectable UF or city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
}

impl IbgeLocality {
    /// UFs are selected by their two-letter code.
    pub fn into_uf(self) -> Location {
        Location {
            id: self.id,
            name: self.sigla.unwrap_or(self.nome),
        }
    }

    /// Cities are selected by their name.
    pub fn into_city(self) -> Location {
        Location {
            id: self.id,
            name: self.nome,
        }
    }
}

#[derive(Debug, Clone)]
pub struct IbgeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl IbgeClient {
    /// `base_url` is the service root, e.g. `https://servicodados.ibge.gov.br`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Ok(IbgeClient {
            http: build_http_client()?,
            base_url: Url::parse(base_url)?,
        })
    }

    pub fn ufs_url(&self) -> Result<Url, ClientError> {
        let mut url = join_url(&self.base_url, "api/v1/localidades/estados")?;
        url.query_pairs_mut().append_pair("orderBy", "nome");
        Ok(url)
    }

    pub fn cities_url(&self, uf: &str) -> Result<Url, ClientError> {
        let mut url = join_url(&self.base_url, "api/v1/localidades/estados/")?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Incomplete("IBGE url cannot be a base".into()))?
            .pop_if_empty()
            .push(uf)
            .push("municipios");
        url.query_pairs_mut().append_pair("orderBy", "nome");
        Ok(url)
    }

    /// All UFs ordered by name.
    pub async fn ufs(&self) -> Result<Vec<Location>, ClientError> {
        let url = self.ufs_url()?;
        tracing::debug!(%url, "fetching UFs");
        let rows: Vec<IbgeLocality> = check_status(self.http.get(url).send().await?).await?.json().await?;
        Ok(rows.into_iter().map(IbgeLocality::into_uf).collect())
    }

    /// Municipalities of `uf` ordered by name.
    pub async fn cities(&self, uf: &str) -> Result<Vec<Location>, ClientError> {
        let url = self.cities_url(uf)?;
        tracing::debug!(%url, "fetching cities");
        let rows: Vec<IbgeLocality> = check_status(self.http.get(url).send().await?).await?.json().await?;
        Ok(rows.into_iter().map(IbgeLocality::into_city).collect())
    }
}
