use serde::Serialize;
use serde_json::{Map, Value};

use super::snapshot::value_to_text;

/// Canonical lookup fields after alias resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupField {
    Currency,
    Month,
    Year,
    Username,
    Web,
}

/// Which request key supplied the currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyAlias {
    /// `cur`, the historical primary name.
    Cur,
    /// `currency`, accepted by the filter but not by record refinement.
    Currency,
}

/// Request keys understood by the lookup endpoint, in precedence order.
/// When two keys map to the same field, the earlier one wins.
pub const FIELD_ALIASES: &[(&str, LookupField)] = &[
    ("cur", LookupField::Currency),
    ("currency", LookupField::Currency),
    ("month", LookupField::Month),
    ("year", LookupField::Year),
    ("username", LookupField::Username),
    ("web", LookupField::Web),
];

/// A decoded lookup request. Empty values are normalized to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LookupRequest {
    pub currency: Option<String>,
    pub currency_alias: Option<CurrencyAlias>,
    pub month: Option<String>,
    pub year: Option<String>,
    pub username: Option<String>,
    pub web: Option<String>,
}

impl LookupRequest {
    /// Decode from a JSON object body through [`FIELD_ALIASES`]. Unknown keys
    /// are ignored.
    pub fn from_json(body: &Map<String, Value>) -> Self {
        let mut request = Self::default();

        for (key, field) in FIELD_ALIASES {
            let Some(text) = body.get(*key).and_then(value_to_text) else {
                continue;
            };
            let text = text.trim();
            if text.is_empty() {
                continue;
            }

            let slot = match field {
                LookupField::Currency => &mut request.currency,
                LookupField::Month => &mut request.month,
                LookupField::Year => &mut request.year,
                LookupField::Username => &mut request.username,
                LookupField::Web => &mut request.web,
            };
            if slot.is_some() {
                continue;
            }
            *slot = Some(text.to_string());

            if *field == LookupField::Currency {
                request.currency_alias = Some(if *key == "cur" {
                    CurrencyAlias::Cur
                } else {
                    CurrencyAlias::Currency
                });
            }
        }

        request
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self.currency_alias = Some(CurrencyAlias::Cur);
        self
    }

    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = Some(month.into());
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_web(mut self, web: impl Into<String>) -> Self {
        self.web = Some(web.into());
        self
    }

    /// Currency used when refining candidate records. Only the `cur` key
    /// participates here; a currency sent as `currency` narrows the document
    /// filter but not the record choice.
    // TODO: confirm with the reporting team whether `currency` should also
    // refine records; until then the `cur`-only behavior is kept.
    pub fn refinement_currency(&self) -> Option<&str> {
        match self.currency_alias {
            Some(CurrencyAlias::Cur) => self.currency.as_deref(),
            _ => None,
        }
    }
}
