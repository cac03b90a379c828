//! Employee roster business logic.
//!
//! Provides the employee lookups the payroll engine consumes plus seeding from
//! the TOML roster configuration. Termination is a soft flag so history for
//! former employees stays intact.

use crate::{
    config::roster::RosterConfig,
    entities::{Employee, employee},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info};

/// Retrieves all non-terminated employees, ordered by id.
///
/// The stable ordering matters: the monthly close iterates this list, and
/// repeated runs over the same roster must visit employees in the same order.
pub async fn active_employees(db: &DatabaseConnection) -> Result<Vec<employee::Model>> {
    Employee::find()
        .filter(employee::Column::IsTerminated.eq(false))
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an employee by id, returning None if absent.
pub async fn get_employee_by_id(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<Option<employee::Model>> {
    Employee::find_by_id(employee_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an employee by registration code, terminated or not.
pub async fn get_employee_by_registration(
    db: &DatabaseConnection,
    registration: &str,
) -> Result<Option<employee::Model>> {
    Employee::find()
        .filter(employee::Column::Registration.eq(registration))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new employee, validating name and salary.
pub async fn create_employee(
    db: &DatabaseConnection,
    name: String,
    registration: String,
    role: String,
    salary: f64,
) -> Result<employee::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Employee name cannot be empty".to_string(),
        });
    }
    if !salary.is_finite() || salary < 0.0 {
        return Err(Error::InvalidSalary { amount: salary });
    }

    let model = employee::ActiveModel {
        registration: Set(registration),
        name: Set(name.trim().to_string()),
        role: Set(role),
        salary: Set(salary),
        is_terminated: Set(false),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    Ok(result)
}

/// Marks an employee as terminated. The row is kept so that payroll history
/// remains queryable; subsequent close runs skip the employee.
pub async fn terminate_employee(
    db: &DatabaseConnection,
    employee_id: i64,
) -> Result<employee::Model> {
    let employee = get_employee_by_id(db, employee_id)
        .await?
        .ok_or(Error::EmployeeNotFound { id: employee_id })?;

    let mut active_model: employee::ActiveModel = employee.into();
    active_model.is_terminated = Set(true);
    let updated = active_model.update(db).await?;
    Ok(updated)
}

/// Updates an employee's base salary; takes effect on the next calculation.
pub async fn update_employee_salary(
    db: &DatabaseConnection,
    employee_id: i64,
    salary: f64,
) -> Result<employee::Model> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(Error::InvalidSalary { amount: salary });
    }

    let employee = get_employee_by_id(db, employee_id)
        .await?
        .ok_or(Error::EmployeeNotFound { id: employee_id })?;

    let mut active_model: employee::ActiveModel = employee.into();
    active_model.salary = Set(salary);
    let updated = active_model.update(db).await?;
    Ok(updated)
}

/// Seeds the roster from configuration. Idempotent by registration code:
/// employees already present are left untouched, so re-running the binary does
/// not duplicate the roster.
pub async fn seed_roster(db: &DatabaseConnection, config: &RosterConfig) -> Result<usize> {
    let mut seeded = 0;

    for seed in &config.employees {
        if get_employee_by_registration(db, &seed.registration)
            .await?
            .is_some()
        {
            debug!("Employee {} already present, skipping", seed.registration);
            continue;
        }

        let created = create_employee(
            db,
            seed.name.clone(),
            seed.registration.clone(),
            seed.role.clone(),
            seed.salary,
        )
        .await?;

        if seed.terminated {
            terminate_employee(db, created.id).await?;
        }
        seeded += 1;
    }

    info!("Seeded {} employees from roster config", seeded);
    Ok(seeded)
}
