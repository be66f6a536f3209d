//! CSV export endpoint
//!
//! Streams a whole session as a CSV attachment. Rows are read from the store
//! in bounded chunks and encoded one batch at a time, so the response body
//! never holds the full session in memory. Column validation happens before
//! the first byte of the body is produced.

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use futures::Stream;
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::export::CsvExporter;
use crate::{db, ApiResult, AppState};

/// Rows fetched from the store per round trip while streaming
const FETCH_CHUNK: i64 = 1000;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Comma-separated, ordered column list; defaults when omitted
    pub fields: Option<String>,
}

/// GET /api/sessions/{name}/export?fields=a,b,c
pub async fn export_csv(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<ExportQuery>,
) -> ApiResult<Response> {
    let name = db::measurements::resolve_session(&state.db, &name).await?;

    let exporter = match &query.fields {
        Some(list) => {
            let fields: Vec<String> = list
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            CsvExporter::new(&fields)?
        }
        None => CsvExporter::with_default_fields(),
    };

    let filename = format!("{}.csv", name.replace('"', "").replace(['\r', '\n'], " "));
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];

    let stream = csv_stream(state.db.clone(), name, exporter);

    Ok((headers, Body::from_stream(stream)).into_response())
}

/// Lazily encode one session as CSV chunks, header first.
fn csv_stream(
    db: SqlitePool,
    session: String,
    mut exporter: CsvExporter,
) -> impl Stream<Item = Result<Vec<u8>, anyhow::Error>> {
    async_stream::try_stream! {
        yield encode_rows(std::iter::once(exporter.header()))?;

        let mut offset: i64 = 0;
        loop {
            let batch = db::measurements::fetch(&db, &session, Some(FETCH_CHUNK), Some(offset))
                .await
                .map_err(anyhow::Error::from)?;
            if batch.is_empty() {
                break;
            }
            offset += batch.len() as i64;

            yield encode_rows(batch.iter().map(|m| exporter.row(m)))?;
        }
    }
}

/// Encode rows into one CSV byte chunk
fn encode_rows(
    rows: impl Iterator<Item = Vec<String>>,
) -> Result<Vec<u8>, anyhow::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.write_record(&row)?;
    }

    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}
