// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Market Atlas Analytics Engine - Filter Engine

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use crate::catalog;
use crate::error::EngineError;
use crate::types::{ChannelType, Record, View};

// ─── Dimension ───────────────────────────────────────────────────────────────

/// Closed set of filterable/groupable dimensions. Each variant maps to one
/// typed accessor on `Record`; there is no dynamic field lookup anywhere.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Year,
    Region,
    Country,
    ServiceType,
    EndUserType,
    DeliveryChannel,
    BusinessModel,
    ProductType,
    BladeMaterial,
    HandleLength,
    Application,
    EndUser,
    DistributionChannelType,
    DistributionChannel,
    Brand,
    Company,
}

impl Dimension {
    /// Parse the UI-facing camelCase key.
    pub fn parse(key: &str) -> Result<Self, EngineError> {
        match key {
            "year" => Ok(Self::Year),
            "region" => Ok(Self::Region),
            "country" => Ok(Self::Country),
            "serviceType" => Ok(Self::ServiceType),
            "endUserType" => Ok(Self::EndUserType),
            "deliveryChannel" => Ok(Self::DeliveryChannel),
            "businessModel" => Ok(Self::BusinessModel),
            "productType" => Ok(Self::ProductType),
            "bladeMaterial" => Ok(Self::BladeMaterial),
            "handleLength" => Ok(Self::HandleLength),
            "application" => Ok(Self::Application),
            "endUser" => Ok(Self::EndUser),
            "distributionChannelType" => Ok(Self::DistributionChannelType),
            "distributionChannel" => Ok(Self::DistributionChannel),
            "brand" => Ok(Self::Brand),
            "company" => Ok(Self::Company),
            other => Err(EngineError::UnknownDimension(other.to_string())),
        }
    }

    /// The record's value for this dimension, as text. Year is rendered in
    /// canonical decimal form so mixed textual/numeric selections compare.
    pub fn value_of<'a>(&self, record: &'a Record) -> Cow<'a, str> {
        match self {
            Self::Year => Cow::Owned(record.year.to_string()),
            Self::Region => Cow::Borrowed(record.region.as_str()),
            Self::Country => Cow::Borrowed(record.country.as_str()),
            Self::ServiceType => Cow::Borrowed(record.service_type.as_str()),
            Self::EndUserType => Cow::Borrowed(record.end_user_type.as_str()),
            Self::DeliveryChannel => Cow::Borrowed(record.delivery_channel.as_str()),
            Self::BusinessModel => Cow::Borrowed(record.business_model.as_str()),
            Self::ProductType => Cow::Borrowed(record.product_type.as_str()),
            Self::BladeMaterial => Cow::Borrowed(record.blade_material.as_str()),
            Self::HandleLength => Cow::Borrowed(record.handle_length.as_str()),
            Self::Application => Cow::Borrowed(record.application.as_str()),
            Self::EndUser => Cow::Borrowed(record.end_user.as_str()),
            Self::DistributionChannelType => {
                Cow::Borrowed(match record.distribution_channel_type {
                    ChannelType::Direct => "Direct",
                    ChannelType::Indirect => "Indirect",
                })
            }
            Self::DistributionChannel => Cow::Borrowed(record.distribution_channel.as_str()),
            Self::Brand => Cow::Borrowed(record.brand.as_str()),
            Self::Company => Cow::Borrowed(record.company.as_str()),
        }
    }
}

/// Normalize a selection value to its canonical comparison form. Numeric
/// year selections ("2024", " 2024 ", 2024) all collapse to "2024".
fn canonical(dim: Dimension, raw: &str) -> String {
    let trimmed = raw.trim();
    if dim == Dimension::Year {
        if let Ok(year) = trimmed.parse::<i64>() {
            return year.to_string();
        }
    }
    trimmed.to_string()
}

// ─── FilterState ─────────────────────────────────────────────────────────────

/// One view's selection bag: dimension → accepted values. An absent or
/// empty set imposes no constraint; multiple dimensions AND together.
/// Owned by the presentation layer; the core never mutates it during
/// recomputation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FilterState {
    selections: BTreeMap<Dimension, BTreeSet<String>>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection set for one dimension. An empty iterator
    /// clears the constraint.
    pub fn set<I, S>(&mut self, dim: Dimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<String> = values
            .into_iter()
            .map(|v| canonical(dim, v.as_ref()))
            .collect();
        if set.is_empty() {
            self.selections.remove(&dim);
        } else {
            self.selections.insert(dim, set);
        }
    }

    pub fn clear(&mut self, dim: Dimension) {
        self.selections.remove(&dim);
    }

    pub fn clear_all(&mut self) {
        self.selections.clear();
    }

    /// Non-empty selection for a dimension, if any.
    pub fn selection(&self, dim: Dimension) -> Option<&BTreeSet<String>> {
        self.selections.get(&dim)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.selections.is_empty()
    }

    /// Whether a record passes every active constraint. An empty set is
    /// treated as no constraint; `set()` never stores one, but deserialized
    /// state can carry one.
    pub fn matches(&self, record: &Record) -> bool {
        self.selections
            .iter()
            .all(|(dim, set)| set.is_empty() || set.contains(dim.value_of(record).as_ref()))
    }

    /// Select a single region for a view. On scoped views
    /// (incremental/attractiveness/YoY) the region must belong to the scoped
    /// subset, and any country selection outside the region's allowed set is
    /// reset.
    pub fn select_region(&mut self, view: View, region: &str) {
        let allowed: &[&str] = if view.is_scoped() {
            if !catalog::SCOPED_REGIONS.contains(&region) {
                return;
            }
            catalog::scoped_countries(region)
        } else {
            catalog::countries(region)
        };

        self.set(Dimension::Region, [region]);
        if let Some(countries) = self.selections.get_mut(&Dimension::Country) {
            countries.retain(|c| allowed.contains(&c.as_str()));
            if countries.is_empty() {
                self.selections.remove(&Dimension::Country);
            }
        }
    }
}

// ─── Apply ───────────────────────────────────────────────────────────────────

/// Stable filter: keeps input relative order, never mutates input.
pub fn apply<'a>(records: &'a [Record], state: &FilterState) -> Vec<&'a Record> {
    records.iter().filter(|r| state.matches(r)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
