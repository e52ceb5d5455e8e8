use medway_core::{Category, Collection, Doctor, Media, Organisation, Role, User};

use super::admin::AdminAccessResponse;
use super::categories::CreateCategoryRequest;
use super::doctors::CreateDoctorRequest;
use super::health::HealthResponse;
use super::media::CreateMediaRequest;
use super::organisations::CreateOrganisationRequest;
use super::schemas::{ErrorResponse, LoginRequest, LoginResponse, MeResponse, MessageResponse};
use super::users::CreateUserRequest;

#[derive(utoipa::OpenApi)]
#[openapi(
    info(
        title = "Medway Marketplace API",
        version = "0.1.0",
        description = "HTTP API for the Medway telemedicine marketplace. Three principal types (users, doctors, organisations) authenticate independently; content collections are gated by per-operation policy.",
        license(name = "MIT")
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Sessions", description = "Per-collection login, logout, and session inspection"),
        (name = "Users", description = "User and admin accounts"),
        (name = "Doctors", description = "Doctor profiles and storefront listing"),
        (name = "Organisations", description = "Medical organisations"),
        (name = "Doctor Categories", description = "Specialisation catalogue"),
        (name = "Media", description = "Media asset metadata"),
        (name = "Admin", description = "Admin-panel access gate")
    ),
    paths(
        super::health::health,
        super::session::users_login,
        super::session::users_logout,
        super::session::users_me,
        super::session::doctors_login,
        super::session::doctors_logout,
        super::session::doctors_me,
        super::session::organisations_login,
        super::session::organisations_logout,
        super::session::organisations_me,
        super::users::list_users,
        super::users::get_user,
        super::users::create_user,
        super::users::update_user,
        super::users::delete_user,
        super::doctors::list_doctors,
        super::doctors::get_doctor,
        super::doctors::create_doctor,
        super::doctors::update_doctor,
        super::doctors::delete_doctor,
        super::organisations::list_organisations,
        super::organisations::get_organisation,
        super::organisations::create_organisation,
        super::organisations::update_organisation,
        super::organisations::delete_organisation,
        super::categories::list_categories,
        super::categories::get_category,
        super::categories::create_category,
        super::categories::update_category,
        super::categories::delete_category,
        super::media::list_media,
        super::media::get_media,
        super::media::create_media,
        super::media::update_media,
        super::media::delete_media,
        super::admin::admin_access,
    ),
    components(schemas(
        ErrorResponse,
        MessageResponse,
        LoginRequest,
        LoginResponse,
        MeResponse,
        AdminAccessResponse,
        HealthResponse,
        CreateUserRequest,
        CreateDoctorRequest,
        CreateOrganisationRequest,
        CreateCategoryRequest,
        CreateMediaRequest,
        Collection,
        Role,
        User,
        Doctor,
        Organisation,
        Category,
        Media,
    ))
)]
pub struct ApiDoc;
