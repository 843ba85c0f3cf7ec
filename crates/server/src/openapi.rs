use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct EntryDoc { pub id: i64, pub name: String, pub message: String, pub date: String }

#[derive(ToSchema)]
pub struct SubmitEntryRequest { pub name: String, pub message: String }

#[derive(ToSchema)]
pub struct ErrorBody { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::guestbook::list_entries,
        crate::routes::guestbook::submit_entry,
    ),
    components(
        schemas(
            HealthResponse,
            EntryDoc,
            SubmitEntryRequest,
            ErrorBody,
        )
    ),
    tags(
        (name = "health"),
        (name = "guestbook")
    )
)]
pub struct ApiDoc;
