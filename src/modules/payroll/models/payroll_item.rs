use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Whether a payroll line adds to or subtracts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(20)", rename_all = "lowercase")]
pub enum PayrollItemType {
    #[serde(rename = "earning")]
    Earning,

    #[serde(rename = "deduction")]
    Deduction,
}

impl std::fmt::Display for PayrollItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayrollItemType::Earning => write!(f, "earning"),
            PayrollItemType::Deduction => write!(f, "deduction"),
        }
    }
}

impl std::str::FromStr for PayrollItemType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "earning" => Ok(PayrollItemType::Earning),
            "deduction" => Ok(PayrollItemType::Deduction),
            _ => Err(format!("Invalid payroll item type: {}", s)),
        }
    }
}

/// What a payroll line represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(30)", rename_all = "snake_case")]
pub enum PayrollItemCategory {
    #[serde(rename = "basic_salary")]
    BasicSalary,

    #[serde(rename = "allowance")]
    Allowance,

    #[serde(rename = "overtime")]
    Overtime,

    #[serde(rename = "income_tax")]
    IncomeTax,

    #[serde(rename = "health_insurance")]
    HealthInsurance,

    #[serde(rename = "pension")]
    Pension,

    #[serde(rename = "other")]
    Other,
}

impl std::fmt::Display for PayrollItemCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayrollItemCategory::BasicSalary => write!(f, "basic_salary"),
            PayrollItemCategory::Allowance => write!(f, "allowance"),
            PayrollItemCategory::Overtime => write!(f, "overtime"),
            PayrollItemCategory::IncomeTax => write!(f, "income_tax"),
            PayrollItemCategory::HealthInsurance => write!(f, "health_insurance"),
            PayrollItemCategory::Pension => write!(f, "pension"),
            PayrollItemCategory::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for PayrollItemCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "basic_salary" => Ok(PayrollItemCategory::BasicSalary),
            "allowance" => Ok(PayrollItemCategory::Allowance),
            "overtime" => Ok(PayrollItemCategory::Overtime),
            "income_tax" => Ok(PayrollItemCategory::IncomeTax),
            "health_insurance" => Ok(PayrollItemCategory::HealthInsurance),
            "pension" => Ok(PayrollItemCategory::Pension),
            "other" => Ok(PayrollItemCategory::Other),
            _ => Err(format!("Invalid payroll item category: {}", s)),
        }
    }
}

/// One earning or deduction line on a payroll.
///
/// `position` preserves the display order the calculation engine emitted.
/// `payroll_id` is set when the parent payroll is persisted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PayrollItem {
    pub id: String,

    #[serde(skip_deserializing)]
    pub payroll_id: Option<String>,

    pub item_type: PayrollItemType,
    pub category: PayrollItemCategory,
    pub name: String,
    pub amount: Decimal,
    pub is_statutory: bool,
    pub position: i32,
}

impl PayrollItem {
    pub fn earning(
        category: PayrollItemCategory,
        name: impl Into<String>,
        amount: Decimal,
        position: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            payroll_id: None,
            item_type: PayrollItemType::Earning,
            category,
            name: name.into(),
            amount,
            is_statutory: false,
            position,
        }
    }

    pub fn deduction(
        category: PayrollItemCategory,
        name: impl Into<String>,
        amount: Decimal,
        is_statutory: bool,
        position: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            payroll_id: None,
            item_type: PayrollItemType::Deduction,
            category,
            name: name.into(),
            amount,
            is_statutory,
            position,
        }
    }
}
