use axum::{
    extract::{Extension, Path},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::common::PortalResult;
use crate::domains::exports::{export, Dataset, ExportFormat};
use crate::server::app::AxumAppState;
use crate::server::middleware::AuthUser;
use crate::server::routes::today;

/// GET /export/{dataset}/{format}, served as a file download
pub async fn export_handler(
    Extension(state): Extension<AxumAppState>,
    user: AuthUser,
    Path((dataset, format)): Path<(Dataset, ExportFormat)>,
) -> PortalResult<Response> {
    let file = export(user.actor(), dataset, format, today(), &state.deps).await?;

    Ok((
        [
            (CONTENT_TYPE, file.content_type.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        file.bytes,
    )
        .into_response())
}
