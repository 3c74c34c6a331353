//! Page repository for the document index

use anyhow::Result;
use sqlx::{PgPool, Row};

use crate::language::Language;
use crate::models::{Page, PageRecord};

/// Maximum number of rows a search returns.
const RESULT_LIMIT: i64 = 50;

/// Read/write access to the pages table
#[derive(Clone)]
pub struct PageRepository {
    pool: PgPool,
}

impl PageRepository {
    /// Create a new page repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Hybrid search: a ranked lexical match over the precomputed search
    /// vector, OR a case-insensitive substring match over title and
    /// content. The union covers both recall modes; the lexical rank
    /// orders the result.
    pub async fn hybrid_search(&self, query: &str, language: Language) -> Result<Vec<Page>> {
        let pattern = format!("%{}%", escape_like(query));

        // The CASE mirrors the mapping the storage trigger applies when it
        // derives content_tsv; both sides fall back to english.
        let rows = sqlx::query(
            r#"
            SELECT title, url, language, last_updated, content
            FROM pages
            WHERE language = $1
              AND (content_tsv @@ plainto_tsquery(
                       CASE $2 WHEN 'danish' THEN 'danish'::regconfig ELSE 'english'::regconfig END,
                       $3)
                   OR title ILIKE $4
                   OR content ILIKE $4)
            ORDER BY ts_rank(content_tsv, plainto_tsquery(
                       CASE $2 WHEN 'danish' THEN 'danish'::regconfig ELSE 'english'::regconfig END,
                       $3)) DESC
            LIMIT $5
            "#,
        )
        .bind(language.code())
        .bind(language.ts_config())
        .bind(query)
        .bind(&pattern)
        .bind(RESULT_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        let pages = rows
            .into_iter()
            .map(|row| Page {
                title: row.get("title"),
                url: row.get("url"),
                language: row.get("language"),
                last_updated: row.get("last_updated"),
                content: row.get("content"),
            })
            .collect();

        Ok(pages)
    }

    /// Upsert a page by title. The storage trigger re-derives the search
    /// vector before the row becomes visible to search.
    pub async fn upsert(&self, record: &PageRecord, language: Language) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO pages (title, url, language, last_updated, content)
            VALUES ($1, $2, $3, NOW(), $4)
            ON CONFLICT (title) DO UPDATE
            SET url = EXCLUDED.url,
                language = EXCLUDED.language,
                last_updated = EXCLUDED.last_updated,
                content = EXCLUDED.content
            "#,
        )
        .bind(&record.title)
        .bind(&record.url)
        .bind(language.code())
        .bind(&record.content)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Current number of indexed pages.
    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pages")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Escape LIKE metacharacters so the substring branch matches the query
/// literally.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_passes_plain_text_through() {
        assert_eq!(escape_like("golang tutorial"), "golang tutorial");
    }

    #[test]
    fn escape_like_neutralizes_metacharacters() {
        assert_eq!(escape_like("100%_done"), "100\\%\\_done");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
