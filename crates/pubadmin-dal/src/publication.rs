use crate::{Error, error::Result};
use futures::TryStreamExt as _;
use pubadmin_types::{Publication, PublicationData};
use sqlx::Pool;
use tracing::debug;

#[derive(Debug, Clone, sqlx::FromRow)]
struct PublicationRow {
    id: i64,
    title: String,
    description: Option<String>,
    release_date: String,
    cover_url: String,
}

impl From<PublicationRow> for Publication {
    fn from(row: PublicationRow) -> Self {
        Publication {
            id: row.id,
            title: row.title,
            description: row.description,
            release_date: row.release_date,
            cover_url: row.cover_url,
        }
    }
}

const SELECT_PUBLICATION: &str =
    "SELECT id, title, description, release_date, cover_url FROM publication";

pub type PublicationRepository = PublicationRepositoryImpl<Pool<crate::ChosenDB>>;

pub struct PublicationRepositoryImpl<E> {
    executor: E,
}

impl<'c, E> PublicationRepositoryImpl<E>
where
    for<'a> &'a E: sqlx::Executor<'c, Database = crate::ChosenDB>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub async fn create(&self, payload: PublicationData) -> Result<Publication> {
        let result = sqlx::query(
            "INSERT INTO publication (title, description, release_date, cover_url, created, modified)
            VALUES (?, ?, ?, ?, datetime('now'), datetime('now'))",
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.release_date)
        .bind(&payload.cover_url)
        .execute(&self.executor)
        .await?;

        let id = result.last_insert_rowid();
        debug!("Created publication {id}");
        self.get(id).await
    }

    pub async fn update(&self, id: i64, payload: PublicationData) -> Result<Publication> {
        let result = sqlx::query(
            "UPDATE publication SET title = ?, description = ?, release_date = ?, cover_url = ?,
            modified = datetime('now') WHERE id = ?",
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.release_date)
        .bind(&payload.cover_url)
        .bind(id)
        .execute(&self.executor)
        .await?;

        if result.rows_affected() == 0 {
            Err(Error::RecordNotFound(format!("Publication {id}")))
        } else {
            self.get(id).await
        }
    }

    /// All publications in order of creation
    pub async fn list(&self) -> Result<Vec<Publication>> {
        let sql = format!("{SELECT_PUBLICATION} ORDER BY id");
        let records = sqlx::query_as::<_, PublicationRow>(&sql)
            .fetch(&self.executor)
            .map_ok(Publication::from)
            .try_collect::<Vec<_>>()
            .await?;
        Ok(records)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let res = sqlx::query("DELETE FROM publication WHERE id = ?")
            .bind(id)
            .execute(&self.executor)
            .await?;

        if res.rows_affected() == 0 {
            Err(Error::RecordNotFound(format!("Publication {id}")))
        } else {
            debug!("Deleted publication {id}");
            Ok(())
        }
    }

    pub async fn get(&self, id: i64) -> Result<Publication> {
        let sql = format!("{SELECT_PUBLICATION} WHERE id = ?");
        let record = sqlx::query_as::<_, PublicationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.executor)
            .await?
            .ok_or_else(|| Error::RecordNotFound(format!("Publication {id}")))?;
        Ok(record.into())
    }
}
