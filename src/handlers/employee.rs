use actix_web::{web, HttpResponse};
use log::{error, info};

use crate::db::EmployeeDb;
use crate::errors::AppError;
use crate::models::employee::{EmployeeChanges, EmployeeEnvelope, EmployeeList, NewEmployee};
use crate::utils::validation::validate_payload;

pub async fn get_employees(db: web::Data<EmployeeDb>) -> Result<HttpResponse, actix_web::Error> {
    let employees = db.all();
    Ok(HttpResponse::Ok().json(EmployeeList { employees }))
}

pub async fn get_employee(
    db: web::Data<EmployeeDb>,
    id: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let employee = db.find(&id).ok_or_else(AppError::employee_not_found)?;
    Ok(HttpResponse::Ok().json(EmployeeEnvelope { employee }))
}

pub async fn create_employee(
    db: web::Data<EmployeeDb>,
    new_employee: web::Json<NewEmployee>,
) -> Result<HttpResponse, actix_web::Error> {
    validate_payload(&*new_employee)?;

    let employee = db.insert(new_employee.into_inner()).map_err(|err| {
        error!("Failed to create employee: {}", err);
        err
    })?;

    info!("Created employee {}", employee.id);
    Ok(HttpResponse::Created().json(EmployeeEnvelope { employee }))
}

pub async fn update_employee(
    db: web::Data<EmployeeDb>,
    id: web::Path<String>,
    updates: web::Json<EmployeeChanges>,
) -> Result<HttpResponse, actix_web::Error> {
    validate_payload(&*updates)?;

    let id = id.into_inner();
    let employee = db.update(&id, updates.into_inner()).map_err(|err| {
        error!("Failed to update employee {}: {}", id, err);
        err
    })?;

    info!("Updated employee {}", employee.id);
    Ok(HttpResponse::Ok().json(EmployeeEnvelope { employee }))
}

pub async fn delete_employee(
    db: web::Data<EmployeeDb>,
    id: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let id = id.into_inner();
    db.remove(&id).map_err(|err| {
        error!("Failed to delete employee {}: {}", id, err);
        err
    })?;

    info!("Deleted employee {}", id);
    Ok(HttpResponse::NoContent().finish())
}
