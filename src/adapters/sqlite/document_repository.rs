//! SQLite implementation of the DocumentRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::errors::DomainResult;
use crate::domain::models::Document;
use crate::domain::ports::DocumentRepository;

#[derive(Clone)]
pub struct SqliteDocumentRepository {
    pool: SqlitePool,
}

impl SqliteDocumentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentRepository for SqliteDocumentRepository {
    async fn get(&self, id: &str) -> DomainResult<Option<Document>> {
        let row: Option<DocumentRow> = sqlx::query_as(
            "SELECT id, file_name, content, uploaded_at FROM documents WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(DocumentRow::try_into_document).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<Document>> {
        let rows: Vec<DocumentRow> = sqlx::query_as(
            "SELECT id, file_name, content, uploaded_at FROM documents ORDER BY uploaded_at",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DocumentRow::try_into_document).collect()
    }

    async fn insert(&self, document: &Document) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO documents (id, file_name, content, uploaded_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&document.id)
        .bind(&document.file_name)
        .bind(&document.content)
        .bind(document.uploaded_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: String,
    file_name: String,
    content: String,
    uploaded_at: String,
}

impl DocumentRow {
    fn try_into_document(self) -> DomainResult<Document> {
        use crate::adapters::sqlite::parse_datetime;

        Ok(Document {
            id: self.id,
            file_name: self.file_name,
            content: self.content,
            uploaded_at: parse_datetime(&self.uploaded_at)?,
        })
    }
}
