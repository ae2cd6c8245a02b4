mod chain;
mod token;

pub use chain::Chain;
pub use token::{RiskFlags, TokenParams, TokenRecord};

#[cfg(test)]
pub(crate) use token::tests::{params as test_params, record as test_record};
