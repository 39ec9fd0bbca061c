use actix_web::{
    http::header::{ContentDisposition, DispositionParam, DispositionType},
    post, web, HttpResponse,
};

use crate::{
    auth::AuthenticatedUser,
    errors::AppError,
    services::export_service::{export, ExportFormat, ExportRequest},
};

#[post("/export/{format}")]
pub async fn export_artifact(
    format: web::Path<String>,
    request: web::Json<ExportRequest>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let format: ExportFormat = format.parse()?;
    let file = export(&request, format);

    log::info!("Exporting {} as {}", file.file_name, format.extension());

    Ok(HttpResponse::Ok()
        .content_type(file.content_type)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file.file_name)],
        })
        .body(file.body))
}
