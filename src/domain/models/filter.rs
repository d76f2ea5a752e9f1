use std::fmt;

/// Store-agnostic query expression.
///
/// Field paths use dot notation (`data.username`). A path crossing an array
/// matches when any element matches, the way document stores evaluate nested
/// fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// Matches every document.
    All,
    Eq { field: String, value: String },
    Or(Vec<Filter>),
    And(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Number of equality leaves in the expression.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::All => 0,
            Self::Eq { .. } => 1,
            Self::Or(children) | Self::And(children) => {
                children.iter().map(Filter::leaf_count).sum()
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Filter], op: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", op)?;
        }
        write!(f, "{}", child)?;
    }
    write!(f, ")")
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "*"),
            Self::Eq { field, value } => write!(f, "{}={:?}", field, value),
            Self::Or(children) => write_joined(f, children, "OR"),
            Self::And(children) => write_joined(f, children, "AND"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let filter = Filter::And(vec![
            Filter::Or(vec![Filter::eq("year", "2026"), Filter::eq("data.year", "2026")]),
            Filter::eq("data.username", "alice"),
        ]);

        assert_eq!(
            filter.to_string(),
            r#"((year="2026" OR data.year="2026") AND data.username="alice")"#
        );
        assert_eq!(Filter::All.to_string(), "*");
    }
}
