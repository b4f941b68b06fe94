//! Moto business logic service

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::moto::{Moto, MotoFilter, MotoInput, MotoSortField};
use crate::domain::{DomainError, DomainResult, RepositoryProvider};
use crate::shared::listing::{
    list_from, FilterCriteria, LinkTemplate, PageRequest, PageResult, SortSpec,
};

/// Paging defaults and link base for the moto listing
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Path the navigation links point at (e.g. `/api/v1/motos`)
    pub base_path: String,
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            base_path: "/api/v1/motos".to_string(),
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// Raw listing parameters as received from the caller
#[derive(Debug, Clone, Default)]
pub struct MotoQuery {
    pub model: Option<String>,
    pub plate: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

pub struct MotoService {
    repos: Arc<dyn RepositoryProvider>,
    listing: ListingConfig,
}

impl MotoService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, listing: ListingConfig) -> Self {
        Self { repos, listing }
    }

    pub fn listing(&self) -> &ListingConfig {
        &self.listing
    }

    /// Filter, sort and page the fleet.
    pub async fn list(&self, query: MotoQuery) -> DomainResult<PageResult<Moto>> {
        let filter = FilterCriteria::new()
            .with(MotoFilter::Model, query.model)
            .with(MotoFilter::Plate, query.plate);
        let sort =
            SortSpec::<MotoSortField>::resolve(query.sort_by.as_deref(), query.sort_dir.as_deref());
        let page = PageRequest::from_query(
            query.page,
            query.page_size,
            self.listing.default_page_size,
            self.listing.max_page_size,
        );
        let links = LinkTemplate::for_query(&self.listing.base_path, &filter, &sort);

        list_from::<Moto, _>(self.repos.motos(), &filter, sort, page, &links).await
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Moto> {
        self.repos
            .motos()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Moto", "id", id))
    }

    pub async fn create(&self, input: MotoInput) -> DomainResult<Moto> {
        let now = Utc::now();
        let input = input.normalized(now)?;

        if self.repos.motos().find_by_plate(&input.plate).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "plate '{}' already exists",
                input.plate
            )));
        }

        let moto = self.repos.motos().insert(Moto::new(input, now)).await?;
        info!(moto_id = %moto.id, plate = %moto.plate, "Moto created");
        Ok(moto)
    }

    pub async fn update(&self, id: Uuid, input: MotoInput) -> DomainResult<Moto> {
        let mut moto = self.get(id).await?;
        let now = Utc::now();
        let input = input.normalized(now)?;

        if let Some(other) = self.repos.motos().find_by_plate(&input.plate).await? {
            if other.id != id {
                return Err(DomainError::Conflict(format!(
                    "plate '{}' already exists",
                    input.plate
                )));
            }
        }

        moto.apply(input, now);
        let moto = self.repos.motos().update(moto).await?;
        info!(moto_id = %moto.id, "Moto updated");
        Ok(moto)
    }

    /// Delete a moto and its maintenance history.
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        if !self.repos.motos().delete(id).await? {
            return Err(DomainError::not_found("Moto", "id", id));
        }
        info!(moto_id = %id, "Moto deleted");
        Ok(())
    }
}
