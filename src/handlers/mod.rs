pub mod employee;
pub mod health;

use actix_web::{error, web, HttpResponse, ResponseError};

use crate::db::EmployeeStore;
use crate::errors::AppError;

/// Registers every route against `store`. Shared by the server and the handler tests.
pub fn configure(store: web::Data<dyn EmployeeStore>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            log::debug!("Rejected request body: {}", err);
            let response = AppError::BadRequest("Invalid request body".to_string()).error_response();
            error::InternalError::from_response(err, response).into()
        });

        cfg.app_data(store)
            .app_data(json_config)
            .service(web::resource("/health").route(web::get().to(health::health)))
            .service(
                web::resource("/employees")
                    .route(web::get().to(employee::get_employees))
                    .route(web::post().to(employee::create_employee)),
            )
            .service(
                web::resource("/employees/{id}")
                    .route(web::get().to(employee::get_employee))
                    .route(web::put().to(employee::update_employee))
                    .route(web::delete().to(employee::delete_employee)),
            )
            .default_service(web::to(route_not_found));
    }
}

async fn route_not_found() -> HttpResponse {
    AppError::NotFound("Route not found".to_string()).error_response()
}
