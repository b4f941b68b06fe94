//! SeaORM implementation of MotoRepository

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, LikeExpr, Order};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use super::{conflict_or_storage, parse_id};
use crate::domain::moto::{Moto, MotoFilter, MotoRepository, MotoSortField, MotoStatus};
use crate::infrastructure::database::entities::{maintenance, moto};
use crate::shared::errors::{DomainError, DomainResult};
use crate::shared::listing::{FilterCriteria, ItemSource, SortDirection, SortSpec, Window};

/// Escape character for LIKE patterns built from caller input
const LIKE_ESCAPE: char = '!';

pub struct SeaOrmMotoRepository {
    db: DatabaseConnection,
}

impl SeaOrmMotoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_domain(status: moto::MotoStatus) -> MotoStatus {
    match status {
        moto::MotoStatus::Available => MotoStatus::Available,
        moto::MotoStatus::InUse => MotoStatus::InUse,
        moto::MotoStatus::Maintenance => MotoStatus::Maintenance,
    }
}

fn status_to_entity(status: MotoStatus) -> moto::MotoStatus {
    match status {
        MotoStatus::Available => moto::MotoStatus::Available,
        MotoStatus::InUse => moto::MotoStatus::InUse,
        MotoStatus::Maintenance => moto::MotoStatus::Maintenance,
    }
}

fn model_to_domain(m: moto::Model) -> DomainResult<Moto> {
    Ok(Moto {
        id: parse_id("moto", &m.id)?,
        plate: m.plate,
        model: m.model,
        year: m.year,
        chassis: m.chassis,
        status: status_to_domain(m.status),
        latitude: m.latitude,
        longitude: m.longitude,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(m: &Moto) -> moto::ActiveModel {
    moto::ActiveModel {
        id: Set(m.id.to_string()),
        plate: Set(m.plate.clone()),
        model: Set(m.model.clone()),
        plate_search: Set(m.plate.to_lowercase()),
        model_search: Set(m.model.to_lowercase()),
        year: Set(m.year),
        chassis: Set(m.chassis.clone()),
        status: Set(status_to_entity(m.status)),
        latitude: Set(m.latitude),
        longitude: Set(m.longitude),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    }
}

// ── Query building ──────────────────────────────────────────────

/// SQLite's `LOWER()` only folds ASCII, so filters run against columns
/// lowercased in Rust on write.
fn filter_column(field: MotoFilter) -> moto::Column {
    match field {
        MotoFilter::Model => moto::Column::ModelSearch,
        MotoFilter::Plate => moto::Column::PlateSearch,
    }
}

fn sort_column(field: MotoSortField) -> moto::Column {
    match field {
        MotoSortField::Model => moto::Column::Model,
        MotoSortField::Plate => moto::Column::Plate,
        MotoSortField::Year => moto::Column::Year,
    }
}

/// `%needle%` with LIKE wildcards in the needle taken literally.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Case-insensitive substring match on every filter term.
fn filtered(filter: &FilterCriteria<MotoFilter>) -> Select<moto::Entity> {
    let condition = filter
        .terms()
        .iter()
        .fold(Condition::all(), |condition, (field, needle)| {
            condition.add(
                Expr::col(filter_column(*field))
                    .like(LikeExpr::new(contains_pattern(needle)).escape(LIKE_ESCAPE)),
            )
        });
    moto::Entity::find().filter(condition)
}

/// The sort column in the requested direction, then the id ascending.
fn ordered(query: Select<moto::Entity>, sort: SortSpec<MotoSortField>) -> Select<moto::Entity> {
    let order = match sort.direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };
    query
        .order_by(sort_column(sort.field), order)
        .order_by_asc(moto::Column::Id)
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl ItemSource<Moto> for SeaOrmMotoRepository {
    type Error = DomainError;

    async fn count(&self, filter: &FilterCriteria<MotoFilter>) -> DomainResult<u64> {
        Ok(filtered(filter).count(&self.db).await?)
    }

    async fn fetch(
        &self,
        filter: &FilterCriteria<MotoFilter>,
        sort: SortSpec<MotoSortField>,
        window: Option<Window>,
    ) -> DomainResult<Vec<Moto>> {
        let mut query = ordered(filtered(filter), sort);
        if let Some(window) = window {
            query = query.offset(window.offset).limit(window.limit);
        }
        debug!(?sort, ?window, "Fetching motos");

        query
            .all(&self.db)
            .await?
            .into_iter()
            .map(model_to_domain)
            .collect()
    }
}

#[async_trait]
impl MotoRepository for SeaOrmMotoRepository {
    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Moto>> {
        moto::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn find_by_plate(&self, plate: &str) -> DomainResult<Option<Moto>> {
        moto::Entity::find()
            .filter(moto::Column::Plate.eq(plate))
            .one(&self.db)
            .await?
            .map(model_to_domain)
            .transpose()
    }

    async fn insert(&self, moto: Moto) -> DomainResult<Moto> {
        let inserted = domain_to_active(&moto)
            .insert(&self.db)
            .await
            .map_err(|e| {
                conflict_or_storage(e, || format!("plate '{}' already exists", moto.plate))
            })?;
        model_to_domain(inserted)
    }

    async fn update(&self, moto: Moto) -> DomainResult<Moto> {
        let updated = domain_to_active(&moto)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => DomainError::not_found("Moto", "id", moto.id),
                e => conflict_or_storage(e, || format!("plate '{}' already exists", moto.plate)),
            })?;
        model_to_domain(updated)
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let txn = self.db.begin().await?;

        maintenance::Entity::delete_many()
            .filter(maintenance::Column::MotoId.eq(id.to_string()))
            .exec(&txn)
            .await?;
        let result = moto::Entity::delete_by_id(id.to_string()).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    async fn count_all(&self) -> DomainResult<u64> {
        Ok(moto::Entity::find().count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::moto::MotoInput;
    use crate::infrastructure::database::test_db;
    use chrono::{Duration, Utc};

    fn moto(plate: &str, model: &str, year: i32) -> Moto {
        Moto::new(
            MotoInput {
                plate: plate.to_string(),
                model: model.to_string(),
                year,
                chassis: None,
                status: MotoStatus::Available,
                latitude: Some(-23.5),
                longitude: Some(-46.6),
            },
            Utc::now(),
        )
    }

    async fn seeded() -> SeaOrmMotoRepository {
        let repo = SeaOrmMotoRepository::new(test_db().await);
        for m in [
            moto("ABC1D23", "CG 160", 2022),
            moto("EFG4H56", "NMax 160", 2023),
            moto("IJK7L89", "Pop 110i", 2021),
            moto("LMN0P12", "CG 160 Titan", 2023),
            moto("QRS3T45", "Fazer 250", 2023),
        ] {
            repo.insert(m).await.unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn insert_and_find_round_trip() {
        let repo = SeaOrmMotoRepository::new(test_db().await);
        let original = moto("ABC1D23", "CG 160", 2022);
        repo.insert(original.clone()).await.unwrap();

        let found = repo.find_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(found.plate, "ABC1D23");
        assert_eq!(found.latitude, Some(-23.5));
        assert!(repo.find_by_plate("ABC1D23").await.unwrap().is_some());
        assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_plate_is_a_conflict() {
        let repo = SeaOrmMotoRepository::new(test_db().await);
        repo.insert(moto("ABC1D23", "CG 160", 2022)).await.unwrap();
        let err = repo.insert(moto("ABC1D23", "Biz", 2021)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn filter_is_case_insensitive_substring() {
        let repo = seeded().await;
        let filter = FilterCriteria::new().with(MotoFilter::Model, Some("cg"));
        assert_eq!(repo.count(&filter).await.unwrap(), 2);

        let items = repo
            .fetch(&filter, SortSpec::default(), None)
            .await
            .unwrap();
        assert!(items.iter().all(|m| m.model.to_lowercase().contains("cg")));
    }

    #[tokio::test]
    async fn filter_folds_non_ascii_case() {
        let repo = seeded().await;
        repo.insert(moto("TNR7A00", "TÉNÉRÉ 700", 2024)).await.unwrap();

        let filter = FilterCriteria::new().with(MotoFilter::Model, Some("ténéré"));
        assert_eq!(repo.count(&filter).await.unwrap(), 1);
        let items = repo
            .fetch(&filter, SortSpec::default(), None)
            .await
            .unwrap();
        assert_eq!(items[0].model, "TÉNÉRÉ 700");

        let upper = FilterCriteria::new().with(MotoFilter::Model, Some("ÉNÉ"));
        assert_eq!(repo.count(&upper).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn renamed_model_is_found_by_its_new_name() {
        let repo = SeaOrmMotoRepository::new(test_db().await);
        let mut m = repo.insert(moto("ABC1D23", "CG 160", 2022)).await.unwrap();
        m.model = "Ténéré 700".to_string();
        repo.update(m).await.unwrap();

        let old = FilterCriteria::new().with(MotoFilter::Model, Some("cg"));
        let new = FilterCriteria::new().with(MotoFilter::Model, Some("TÉNÉRÉ"));
        assert_eq!(repo.count(&old).await.unwrap(), 0);
        assert_eq!(repo.count(&new).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn like_wildcards_are_literal() {
        let repo = seeded().await;
        let filter = FilterCriteria::new().with(MotoFilter::Model, Some("%"));
        assert_eq!(repo.count(&filter).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn year_desc_breaks_ties_by_id_ascending() {
        let repo = seeded().await;
        let sort = SortSpec::new(MotoSortField::Year, SortDirection::Desc);
        let items = repo
            .fetch(&FilterCriteria::new(), sort, None)
            .await
            .unwrap();

        let years: Vec<i32> = items.iter().map(|m| m.year).collect();
        assert_eq!(years, vec![2023, 2023, 2023, 2022, 2021]);
        let tied: Vec<Uuid> = items.iter().take(3).map(|m| m.id).collect();
        let mut sorted = tied.clone();
        sorted.sort();
        assert_eq!(tied, sorted);
    }

    #[tokio::test]
    async fn window_limits_rows() {
        let repo = seeded().await;
        let items = repo
            .fetch(
                &FilterCriteria::new(),
                SortSpec::default(),
                Some(Window { offset: 1, limit: 2 }),
            )
            .await
            .unwrap();
        let models: Vec<&str> = items.iter().map(|m| m.model.as_str()).collect();
        assert_eq!(models, vec!["CG 160 Titan", "Fazer 250"]);
    }

    #[tokio::test]
    async fn update_missing_moto_is_not_found() {
        let repo = SeaOrmMotoRepository::new(test_db().await);
        let err = repo.update(moto("ABC1D23", "CG", 2022)).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_persists_changes() {
        let repo = SeaOrmMotoRepository::new(test_db().await);
        let mut m = repo.insert(moto("ABC1D23", "CG 160", 2022)).await.unwrap();
        m.model = "CG 160 Fan".to_string();
        m.updated_at = m.updated_at + Duration::minutes(5);
        repo.update(m.clone()).await.unwrap();

        let found = repo.find_by_id(m.id).await.unwrap().unwrap();
        assert_eq!(found.model, "CG 160 Fan");
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let repo = seeded().await;
        let m = repo.find_by_plate("ABC1D23").await.unwrap().unwrap();
        assert!(repo.delete(m.id).await.unwrap());
        assert!(!repo.delete(m.id).await.unwrap());
        assert_eq!(repo.count_all().await.unwrap(), 4);
    }
}
