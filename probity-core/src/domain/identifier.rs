// probity-core/src/domain/identifier.rs

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::domain::error::DomainError;

const MAX_IDENTIFIER_LEN: usize = 255;

fn re_identifier() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_$]*$").unwrap_or_else(|_| {
            // Hardcoded pattern; the fallback matches nothing.
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

/// A schema, table or column name supplied by the caller.
///
/// Identifiers cannot be bound as query parameters, so they end up in the SQL
/// text. Construction is the only gate: once an `Identifier` exists it is safe
/// to interpolate unquoted, which keeps the warehouse's own case folding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.len() > MAX_IDENTIFIER_LEN || !re_identifier().is_match(raw) {
            return Err(DomainError::InvalidIdentifier(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `schema.table`, both parts validated.
pub fn qualified_table(schema: &str, table: &str) -> Result<String, DomainError> {
    let schema = Identifier::parse(schema)?;
    let table = Identifier::parse(table)?;
    Ok(format!("{schema}.{table}"))
}

/// Double-quotes a name reported by the warehouse itself (e.g. a column
/// discovered through a probe query). Embedded quotes are doubled.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
