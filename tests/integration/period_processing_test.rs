// Period processing flows
//
// Runs the period processor end to end against the in-memory
// repositories: single-employee processing with its failure taxonomy,
// batch runs with partial failures, idempotent re-runs, and the
// delete-then-reprocess path.

use std::sync::Arc;

use rust_decimal_macros::dec;

use payledger::config::statutory::StatutoryConfig;
use payledger::core::ErrorKind;
use payledger::modules::payroll::models::OutcomeStatus;
use payledger::modules::payroll::services::PeriodProcessor;

#[path = "../helpers/mod.rs"]
mod helpers;
use helpers::{
    MemoryEmployeeRepository, MemoryPayrollStore, MemoryPeriodRepository,
    MemoryTaxBracketRepository, TestDataFactory, TENANT,
};

struct Harness {
    processor: PeriodProcessor,
    employees: Arc<MemoryEmployeeRepository>,
    periods: Arc<MemoryPeriodRepository>,
    brackets: Arc<MemoryTaxBracketRepository>,
    store: Arc<MemoryPayrollStore>,
}

fn harness() -> Harness {
    let employees = Arc::new(MemoryEmployeeRepository::new());
    let store = Arc::new(MemoryPayrollStore::new());
    let periods = Arc::new(MemoryPeriodRepository::with_payrolls(store.clone()));
    let brackets = Arc::new(MemoryTaxBracketRepository::new());

    let processor = PeriodProcessor::new(
        StatutoryConfig::default(),
        employees.clone(),
        periods.clone(),
        brackets.clone(),
        store.clone(),
        store.clone(),
    );

    Harness {
        processor,
        employees,
        periods,
        brackets,
        store,
    }
}

#[tokio::test]
async fn test_process_employee_creates_payroll_items_and_stub() {
    let h = harness();
    let period = TestDataFactory::january_period(TENANT);
    let employee = TestDataFactory::employee(TENANT, "Ada", Some(dec!(30000)));
    h.periods.add(period.clone());
    h.employees.add(employee.clone());

    let payroll = h
        .processor
        .process_employee(&period.id, &employee.id, TENANT)
        .await
        .unwrap();

    assert_eq!(payroll.gross_salary, dec!(30000));
    assert_eq!(payroll.net_salary, dec!(26790));
    assert_eq!(payroll.items.len(), 4);

    use payledger::modules::payroll::repositories::{PayStubRepository, PayrollRepository};
    let stored = PayrollRepository::find_by_id(h.store.as_ref(), &payroll.id, TENANT)
        .await
        .unwrap()
        .expect("payroll should be persisted");
    assert_eq!(stored.net_salary, dec!(26790));

    let stub = PayStubRepository::find_by_payroll(h.store.as_ref(), &payroll.id, TENANT)
        .await
        .unwrap()
        .expect("stub should be persisted");
    assert!(stub.stub_number.starts_with("PS"));
    assert_eq!(stub.stub_number.len(), 12);
    assert!(stub.stub_number[2..].chars().all(|c| c.is_ascii_digit()));
    assert!(stub.stub_number.ends_with("0001"));
}

#[tokio::test]
async fn test_process_employee_unknown_period_is_not_found() {
    let h = harness();
    let employee = TestDataFactory::employee(TENANT, "Ada", Some(dec!(30000)));
    h.employees.add(employee.clone());

    let err = h
        .processor
        .process_employee("missing-period", &employee.id, TENANT)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_process_employee_unknown_employee_is_not_found() {
    let h = harness();
    let period = TestDataFactory::january_period(TENANT);
    h.periods.add(period.clone());

    let err = h
        .processor
        .process_employee(&period.id, "missing-employee", TENANT)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_process_employee_twice_is_conflict_with_one_row() {
    let h = harness();
    let period = TestDataFactory::january_period(TENANT);
    let employee = TestDataFactory::employee(TENANT, "Ada", Some(dec!(30000)));
    h.periods.add(period.clone());
    h.employees.add(employee.clone());

    h.processor
        .process_employee(&period.id, &employee.id, TENANT)
        .await
        .unwrap();
    let err = h
        .processor
        .process_employee(&period.id, &employee.id, TENANT)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    use payledger::modules::payroll::repositories::PayrollRepository;
    let rows = h.store.find_by_period(&period.id, TENANT).await.unwrap();
    assert_eq!(rows.len(), 1, "duplicate processing must never add rows");
}

#[tokio::test]
async fn test_process_employee_without_salary_is_invalid_state() {
    let h = harness();
    let period = TestDataFactory::january_period(TENANT);
    let unconfigured = TestDataFactory::employee(TENANT, "NoSalary", None);
    let zero = TestDataFactory::employee(TENANT, "ZeroSalary", Some(dec!(0)));
    h.periods.add(period.clone());
    h.employees.add(unconfigured.clone());
    h.employees.add(zero.clone());

    for employee_id in [&unconfigured.id, &zero.id] {
        let err = h
            .processor
            .process_employee(&period.id, employee_id, TENANT)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }
}

#[tokio::test]
async fn test_process_period_records_partial_failure_and_continues() {
    let h = harness();
    let period = TestDataFactory::january_period(TENANT);
    h.periods.add(period.clone());

    let paid_a = TestDataFactory::employee(TENANT, "Ada", Some(dec!(30000)));
    let paid_b = TestDataFactory::employee(TENANT, "Grace", Some(dec!(50000)));
    let unpaid = TestDataFactory::employee(TENANT, "NoSalary", None);
    h.employees.add(paid_a.clone());
    h.employees.add(paid_b.clone());
    h.employees.add(unpaid.clone());

    let summary = h.processor.process_period(&period.id, TENANT).await.unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.details.len(), 3);

    let failed = summary
        .details
        .iter()
        .find(|d| d.employee_id == unpaid.id)
        .expect("failing employee must appear in details");
    assert_eq!(failed.status, OutcomeStatus::Error);
    assert_eq!(failed.reason.as_deref(), Some("No salary configured"));
    assert!(failed.net_salary.is_none());

    let processed = summary
        .details
        .iter()
        .find(|d| d.employee_id == paid_a.id)
        .unwrap();
    assert_eq!(processed.status, OutcomeStatus::Processed);
    assert_eq!(processed.net_salary, Some(dec!(26790)));
}

#[tokio::test]
async fn test_process_period_skips_already_processed_employees() {
    let h = harness();
    let period = TestDataFactory::january_period(TENANT);
    h.periods.add(period.clone());

    let first = TestDataFactory::employee(TENANT, "Ada", Some(dec!(30000)));
    let second = TestDataFactory::employee(TENANT, "Grace", Some(dec!(40000)));
    h.employees.add(first.clone());
    h.employees.add(second.clone());

    h.processor
        .process_employee(&period.id, &first.id, TENANT)
        .await
        .unwrap();

    let summary = h.processor.process_period(&period.id, TENANT).await.unwrap();
    assert_eq!(summary.processed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.errors, 0);

    let skipped = summary
        .details
        .iter()
        .find(|d| d.employee_id == first.id)
        .unwrap();
    assert_eq!(skipped.status, OutcomeStatus::Skipped);
    assert_eq!(skipped.reason.as_deref(), Some("Payroll already exists"));

    // A second full run skips everyone.
    let rerun = h.processor.process_period(&period.id, TENANT).await.unwrap();
    assert_eq!(rerun.processed, 0);
    assert_eq!(rerun.skipped, 2);
    assert_eq!(rerun.errors, 0);
}

#[tokio::test]
async fn test_delete_for_period_allows_reprocessing() {
    let h = harness();
    let period = TestDataFactory::january_period(TENANT);
    h.periods.add(period.clone());
    h.employees
        .add(TestDataFactory::employee(TENANT, "Ada", Some(dec!(30000))));
    h.employees
        .add(TestDataFactory::employee(TENANT, "Grace", Some(dec!(40000))));

    let first_run = h.processor.process_period(&period.id, TENANT).await.unwrap();
    assert_eq!(first_run.processed, 2);

    let removed = h
        .processor
        .delete_for_period(&period.id, TENANT)
        .await
        .unwrap();
    assert_eq!(removed, 2);
    assert_eq!(h.store.stub_count(), 0, "stubs go with their payrolls");

    let second_run = h.processor.process_period(&period.id, TENANT).await.unwrap();
    assert_eq!(second_run.processed, 2);
    assert_eq!(second_run.skipped, 0);
}

#[tokio::test]
async fn test_process_period_unknown_period_aborts() {
    let h = harness();
    let err = h
        .processor
        .process_period("missing-period", TENANT)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_batch_uses_tenant_brackets_when_configured() {
    let h = harness();
    let period = TestDataFactory::january_period(TENANT);
    h.periods.add(period.clone());

    // Flat 10%, no relief: 30 000 gross, 1 080 pension, 28 920 taxable
    // gives tax 2 892 instead of the default table's 1 230.
    h.brackets.add(TestDataFactory::bracket(
        TENANT,
        dec!(0),
        None,
        dec!(10),
        dec!(0),
    ));
    let employee = TestDataFactory::employee(TENANT, "Ada", Some(dec!(30000)));
    h.employees.add(employee.clone());

    let summary = h.processor.process_period(&period.id, TENANT).await.unwrap();
    let detail = summary
        .details
        .iter()
        .find(|d| d.employee_id == employee.id)
        .unwrap();

    // 30 000 - (2 892 + 900 + 1 080)
    assert_eq!(detail.net_salary, Some(dec!(25128)));
}

#[tokio::test]
async fn test_period_listing_is_most_recent_first() {
    use payledger::modules::periods::models::PayrollPeriod;
    use payledger::modules::periods::repositories::PeriodRepository;

    let h = harness();
    let january = TestDataFactory::january_period(TENANT);
    let february = PayrollPeriod::new(
        TENANT,
        "February 2024",
        helpers::date(2024, 2, 1),
        helpers::date(2024, 2, 29),
        helpers::date(2024, 2, 27),
        None,
    )
    .unwrap();
    h.periods.create(&january).await.unwrap();
    h.periods.create(&february).await.unwrap();
    h.periods
        .create(&TestDataFactory::january_period("tenant-other"))
        .await
        .unwrap();

    let listed = h.periods.list(TENANT).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].name, "February 2024");
    assert_eq!(listed[1].name, "January 2024");
}

#[tokio::test]
async fn test_tenants_do_not_see_each_other() {
    let h = harness();
    let period = TestDataFactory::january_period(TENANT);
    h.periods.add(period.clone());
    h.employees
        .add(TestDataFactory::employee(TENANT, "Ada", Some(dec!(30000))));
    h.employees.add(TestDataFactory::employee(
        "tenant-other",
        "Outsider",
        Some(dec!(90000)),
    ));

    let summary = h.processor.process_period(&period.id, TENANT).await.unwrap();
    assert_eq!(summary.total(), 1, "other tenants' employees stay out");

    let err = h
        .processor
        .process_period(&period.id, "tenant-other")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound, "periods are tenant scoped");
}
