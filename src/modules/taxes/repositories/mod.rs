pub mod tax_bracket_repository;

pub use tax_bracket_repository::{MySqlTaxBracketRepository, TaxBracketRepository};
