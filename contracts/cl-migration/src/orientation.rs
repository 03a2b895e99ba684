use migration_periphery::msg::OrderingRule;

use crate::error::ContractError;

/// Checks a denom against the Cosmos SDK grammar `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn is_valid_denom(denom: &str) -> bool {
    let mut chars = denom.chars();
    let starts_with_letter = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic());

    starts_with_letter
        && (3..=128).contains(&denom.len())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'))
}

/// Returns the pair in the order a concentrated pool stores it under `rule`.
pub fn canonical_pair<'a>(
    rule: &OrderingRule,
    asset0: &'a str,
    asset1: &'a str,
) -> Result<(&'a str, &'a str), ContractError> {
    if asset0 == asset1 || !is_valid_denom(asset0) || !is_valid_denom(asset1) {
        return Err(ContractError::InvalidOrientation {
            asset0: asset0.to_string(),
            asset1: asset1.to_string(),
        });
    }

    let lexicographic = if asset0 < asset1 {
        (asset0, asset1)
    } else {
        (asset1, asset0)
    };

    Ok(match rule {
        OrderingRule::Lexicographic {} => lexicographic,
        OrderingRule::QuoteLast { quote_denom } => {
            if asset0 == quote_denom.as_str() {
                (asset1, asset0)
            } else if asset1 == quote_denom.as_str() {
                (asset0, asset1)
            } else {
                lexicographic
            }
        }
        OrderingRule::QuoteFirst { quote_denom } => {
            if asset0 == quote_denom.as_str() {
                (asset0, asset1)
            } else if asset1 == quote_denom.as_str() {
                (asset1, asset0)
            } else {
                lexicographic
            }
        }
    })
}

/// Whether the stored `(asset0, asset1)` pairing has to be swapped to match `rule`.
pub fn needs_flip(
    rule: &OrderingRule,
    asset0: &str,
    asset1: &str,
) -> Result<bool, ContractError> {
    let (token0, _) = canonical_pair(rule, asset0, asset1)?;
    Ok(token0 != asset0)
}
