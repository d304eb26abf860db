// MySQL persistence round trips
//
// Exercises the MySQL repositories end to end: transactional payroll
// creation with items and stub, the stub view transition, and cascade
// deletes. Each test works in a throwaway tenant so runs do not
// interfere with each other.

use std::sync::Arc;

use rust_decimal_macros::dec;
use sqlx::MySqlPool;
use uuid::Uuid;

use payledger::config::statutory::StatutoryConfig;
use payledger::modules::employees::models::Employee;
use payledger::modules::employees::repositories::MySqlEmployeeRepository;
use payledger::modules::payroll::models::PayStubStatus;
use payledger::modules::payroll::repositories::{
    MySqlPayStubRepository, MySqlPayrollRepository, PayrollRepository,
};
use payledger::modules::payroll::services::{PayrollService, PeriodProcessor};
use payledger::modules::periods::repositories::{MySqlPeriodRepository, PeriodRepository};
use payledger::modules::taxes::repositories::MySqlTaxBracketRepository;

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::{create_test_pool, TestDataFactory};

fn fresh_tenant() -> String {
    format!("tenant-{}", Uuid::new_v4())
}

async fn seed_employee(pool: &MySqlPool, employee: &Employee) {
    sqlx::query(
        r#"
        INSERT INTO employees
            (id, tenant_id, staff_number, first_name, last_name, basic_salary,
             is_active, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&employee.id)
    .bind(&employee.tenant_id)
    .bind(&employee.staff_number)
    .bind(&employee.first_name)
    .bind(&employee.last_name)
    .bind(employee.basic_salary)
    .bind(employee.is_active)
    .bind(employee.created_at)
    .bind(employee.updated_at)
    .execute(pool)
    .await
    .expect("employee seed insert failed");
}

fn processor(pool: &MySqlPool) -> PeriodProcessor {
    PeriodProcessor::new(
        StatutoryConfig::default(),
        Arc::new(MySqlEmployeeRepository::new(pool.clone())),
        Arc::new(MySqlPeriodRepository::new(pool.clone())),
        Arc::new(MySqlTaxBracketRepository::new(pool.clone())),
        Arc::new(MySqlPayrollRepository::new(pool.clone())),
        Arc::new(MySqlPayStubRepository::new(pool.clone())),
    )
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_process_employee_persists_payroll_items_and_stub() {
    let pool = create_test_pool().await;
    let tenant = fresh_tenant();

    let employee = TestDataFactory::employee(&tenant, "Ada", Some(dec!(30000)));
    seed_employee(&pool, &employee).await;

    let periods = MySqlPeriodRepository::new(pool.clone());
    let period = TestDataFactory::january_period(&tenant);
    periods.create(&period).await.unwrap();

    let processor = processor(&pool);
    let payroll = processor
        .process_employee(&period.id, &employee.id, &tenant)
        .await
        .unwrap();

    let payrolls = MySqlPayrollRepository::new(pool.clone());
    let stored = payrolls
        .find_by_id(&payroll.id, &tenant)
        .await
        .unwrap()
        .expect("payroll row should exist");
    assert_eq!(stored.net_salary, dec!(26790));
    assert_eq!(stored.items.len(), 4);
    for (index, item) in stored.items.iter().enumerate() {
        assert_eq!(item.position, index as i32);
    }

    let removed = processor.delete_for_period(&period.id, &tenant).await.unwrap();
    assert_eq!(removed, 1);
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_duplicate_processing_is_rejected_by_the_constraint() {
    let pool = create_test_pool().await;
    let tenant = fresh_tenant();

    let employee = TestDataFactory::employee(&tenant, "Grace", Some(dec!(45000)));
    seed_employee(&pool, &employee).await;

    let periods = MySqlPeriodRepository::new(pool.clone());
    let period = TestDataFactory::january_period(&tenant);
    periods.create(&period).await.unwrap();

    let processor = processor(&pool);
    processor
        .process_employee(&period.id, &employee.id, &tenant)
        .await
        .unwrap();

    let err = processor
        .process_employee(&period.id, &employee.id, &tenant)
        .await
        .unwrap_err();
    assert!(err.is_conflict());

    let payrolls = MySqlPayrollRepository::new(pool.clone());
    let rows = payrolls.find_by_period(&period.id, &tenant).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_pay_stub_first_read_marks_viewed() {
    let pool = create_test_pool().await;
    let tenant = fresh_tenant();

    let employee = TestDataFactory::employee(&tenant, "Joan", Some(dec!(60000)));
    seed_employee(&pool, &employee).await;

    let periods = MySqlPeriodRepository::new(pool.clone());
    let period = TestDataFactory::january_period(&tenant);
    periods.create(&period).await.unwrap();

    let payroll = processor(&pool)
        .process_employee(&period.id, &employee.id, &tenant)
        .await
        .unwrap();

    let service = PayrollService::new(
        StatutoryConfig::default(),
        Arc::new(MySqlTaxBracketRepository::new(pool.clone())),
        Arc::new(MySqlPayrollRepository::new(pool.clone())),
        Arc::new(MySqlPayStubRepository::new(pool.clone())),
    );

    let first = service
        .get_pay_stub_for_payroll(&payroll.id, &tenant)
        .await
        .unwrap();
    assert_eq!(first.status, PayStubStatus::Viewed);
    assert!(first.viewed_at.is_some());

    let second = service
        .get_pay_stub_for_payroll(&payroll.id, &tenant)
        .await
        .unwrap();
    assert_eq!(second.status, PayStubStatus::Viewed);
    assert!(second.viewed_at.is_some());
}

#[tokio::test]
#[ignore = "Requires test database configuration"]
async fn test_period_delete_cascades_payroll_records() {
    let pool = create_test_pool().await;
    let tenant = fresh_tenant();

    let employee = TestDataFactory::employee(&tenant, "Mary", Some(dec!(35000)));
    seed_employee(&pool, &employee).await;

    let periods = MySqlPeriodRepository::new(pool.clone());
    let period = TestDataFactory::january_period(&tenant);
    periods.create(&period).await.unwrap();

    processor(&pool)
        .process_employee(&period.id, &employee.id, &tenant)
        .await
        .unwrap();

    periods.delete(&period.id, &tenant).await.unwrap();

    assert!(periods.find_by_id(&period.id, &tenant).await.unwrap().is_none());
    let payrolls = MySqlPayrollRepository::new(pool.clone());
    let rows = payrolls.find_by_period(&period.id, &tenant).await.unwrap();
    assert!(rows.is_empty(), "period delete must remove payroll rows");
}
