//! Maven-style SCM connection strings

use crate::error::ScmError;

/// Parsed `scm:<provider>:<url>` connection
///
/// The character right after `scm` is the delimiter and may be `:` or `|`,
/// e.g. `scm|svn|https://host/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScmRepository {
    pub provider: String,
    pub url: String,
}

impl ScmRepository {
    pub fn parse(connection: &str) -> Result<Self, ScmError> {
        let malformed = || ScmError::MalformedConnection(connection.to_string());

        let rest = connection.trim().strip_prefix("scm").ok_or_else(malformed)?;
        let mut chars = rest.chars();
        let delimiter = match chars.next() {
            Some(c @ (':' | '|')) => c,
            _ => return Err(malformed()),
        };
        let (provider, url) = chars
            .as_str()
            .split_once(delimiter)
            .ok_or_else(malformed)?;
        if provider.is_empty() || url.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            provider: provider.to_string(),
            url: url.to_string(),
        })
    }
}
