use crate::filter::error::FilterParseError;
use crate::record::{Node, Path, Record};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Equals,
    Contains,
    StartsWith,
    EndsWith,
    Gt,
    Lt,
    Exists,
    IsNotEmpty,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Equals,
        Operator::Contains,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::Gt,
        Operator::Lt,
        Operator::Exists,
        Operator::IsNotEmpty,
    ];

    pub fn requires_value(self) -> bool {
        !matches!(self, Operator::Exists | Operator::IsNotEmpty)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::Contains => "contains",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Exists => "exists",
            Operator::IsNotEmpty => "isNotEmpty",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], "");
        match normalized.as_str() {
            "equals" | "eq" => Ok(Operator::Equals),
            "contains" => Ok(Operator::Contains),
            "startswith" => Ok(Operator::StartsWith),
            "endswith" => Ok(Operator::EndsWith),
            "gt" => Ok(Operator::Gt),
            "lt" => Ok(Operator::Lt),
            "exists" => Ok(Operator::Exists),
            "isnotempty" | "notempty" => Ok(Operator::IsNotEmpty),
            _ => Err(FilterParseError::UnknownOperator(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub field: Path,
    pub operator: Operator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl FilterPredicate {
    pub fn new(field: impl Into<Path>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: Some(value.into()),
        }
    }

    /// For `exists` / `isNotEmpty`.
    pub fn unary(field: impl Into<Path>, operator: Operator) -> Self {
        Self {
            field: field.into(),
            operator,
            value: None,
        }
    }

    pub fn validate(&self) -> Result<(), FilterParseError> {
        if self.field.as_str().is_empty() {
            return Err(FilterParseError::EmptyField);
        }
        if self.operator.requires_value() && self.value.is_none() {
            return Err(FilterParseError::MissingValue {
                field: self.field.to_string(),
                operator: self.operator.to_string(),
            });
        }
        Ok(())
    }

    pub fn matches(&self, record: &Node) -> bool {
        let Some(found) = record.get(&self.field) else {
            return false;
        };

        match self.operator {
            Operator::Exists => !found.is_null(),
            Operator::IsNotEmpty => !found.is_null() && !found.is_empty_string(),
            Operator::Gt | Operator::Lt => {
                let rhs = self.value.as_deref().and_then(crate::record::parse_number);
                let (Some(lhs), Some(rhs)) = (found.as_f64(), rhs) else {
                    return false;
                };
                if self.operator == Operator::Gt {
                    lhs > rhs
                } else {
                    lhs < rhs
                }
            }
            Operator::Equals | Operator::Contains | Operator::StartsWith | Operator::EndsWith => {
                let Some(value) = self.value.as_deref() else {
                    return false;
                };
                let lhs = found.text().to_lowercase();
                let rhs = value.to_lowercase();
                match self.operator {
                    Operator::Equals => lhs == rhs,
                    Operator::Contains => lhs.contains(&rhs),
                    Operator::StartsWith => lhs.starts_with(&rhs),
                    _ => lhs.ends_with(&rhs),
                }
            }
        }
    }
}

/// `field:operator[:value]`; the value may itself contain `:`.
impl FromStr for FilterPredicate {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let (Some(field), Some(operator)) = (parts.next(), parts.next()) else {
            return Err(FilterParseError::Malformed(s.to_string()));
        };

        let predicate = FilterPredicate {
            field: Path::parse(field.trim()),
            operator: operator.parse()?,
            value: parts.next().map(str::to_string),
        };
        predicate.validate()?;
        Ok(predicate)
    }
}

/// Keep the records that satisfy every predicate. No predicates keeps everything.
pub fn filter(records: &[Record], predicates: &[FilterPredicate]) -> Vec<Record> {
    if predicates.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|r| predicates.iter().all(|p| p.matches(r)))
        .map(Arc::clone)
        .collect()
}
