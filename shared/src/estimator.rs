//! Project price estimator shown on the pricing page.
//!
//! The price is a pure function of four inputs: site type, page count,
//! selected features and delivery urgency. All prices are whole euros and the
//! urgency multiplier is stored as a percentage so the final rounding is exact.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::OnceLock;

pub const MIN_PAGES: u32 = 1;
pub const MAX_PAGES: u32 = 15;
pub const DEFAULT_PAGES: u32 = 4;

/// Feature identifiers and surcharges, in display order.
pub const FEATURES: [(&str, u32); 8] = [
    ("blog", 80),
    ("gallery", 50),
    ("contact", 30),
    ("checkout", 100),
    ("booking", 120),
    ("multilingual", 100),
    ("seo", 60),
    ("cms", 80),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    Portfolio,
    #[default]
    Business,
    Ecommerce,
    Booking,
    Custom,
}

impl SiteType {
    pub const ALL: [SiteType; 5] = [
        SiteType::Portfolio,
        SiteType::Business,
        SiteType::Ecommerce,
        SiteType::Booking,
        SiteType::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SiteType::Portfolio => "portfolio",
            SiteType::Business => "business",
            SiteType::Ecommerce => "ecommerce",
            SiteType::Booking => "booking",
            SiteType::Custom => "custom",
        }
    }

    /// Unknown identifiers fall back to the default site type.
    pub fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(value.trim()))
            .unwrap_or_default()
    }
}

impl From<String> for SiteType {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl<'de> Deserialize<'de> for SiteType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Loose::deserialize(deserializer)?
            .text()
            .map(|value| Self::parse(&value))
            .unwrap_or_default())
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Normal,
    Fast,
    Rush,
}

impl Urgency {
    pub const ALL: [Urgency; 3] = [Urgency::Normal, Urgency::Fast, Urgency::Rush];

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::Fast => "fast",
            Urgency::Rush => "rush",
        }
    }

    pub fn parse(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|u| u.as_str().eq_ignore_ascii_case(value.trim()))
            .unwrap_or_default()
    }
}

impl From<String> for Urgency {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl<'de> Deserialize<'de> for Urgency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Loose::deserialize(deserializer)?
            .text()
            .map(|value| Self::parse(&value))
            .unwrap_or_default())
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasePrices {
    pub portfolio: u32,
    pub business: u32,
    pub ecommerce: u32,
    pub booking: u32,
    pub custom: u32,
}

impl BasePrices {
    pub fn price(&self, site_type: SiteType) -> u32 {
        match site_type {
            SiteType::Portfolio => self.portfolio,
            SiteType::Business => self.business,
            SiteType::Ecommerce => self.ecommerce,
            SiteType::Booking => self.booking,
            SiteType::Custom => self.custom,
        }
    }
}

impl Default for BasePrices {
    fn default() -> Self {
        Self {
            portfolio: 200,
            business: 300,
            ecommerce: 500,
            booking: 450,
            custom: 600,
        }
    }
}

/// Urgency multipliers as percentages (120 == 1.2x).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrgencyMultipliers {
    pub normal: u32,
    pub fast: u32,
    pub rush: u32,
}

impl UrgencyMultipliers {
    pub fn percent(&self, urgency: Urgency) -> u32 {
        match urgency {
            Urgency::Normal => self.normal,
            Urgency::Fast => self.fast,
            Urgency::Rush => self.rush,
        }
    }
}

impl Default for UrgencyMultipliers {
    fn default() -> Self {
        Self {
            normal: 100,
            fast: 120,
            rush: 150,
        }
    }
}

/// The one price table both the pricing page and the backend quote from.
///
/// Missing sections in an externalized table keep their compiled-in values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceTable {
    pub base: BasePrices,
    pub per_extra_page: u32,
    pub features: BTreeMap<String, u32>,
    pub urgency: UrgencyMultipliers,
}

impl Default for PriceTable {
    fn default() -> Self {
        Self {
            base: BasePrices::default(),
            per_extra_page: 40,
            features: FEATURES
                .iter()
                .map(|(id, price)| (id.to_string(), *price))
                .collect(),
            urgency: UrgencyMultipliers::default(),
        }
    }
}

impl PriceTable {
    /// Compiled-in table, built once.
    pub fn standard() -> &'static PriceTable {
        static STANDARD: OnceLock<PriceTable> = OnceLock::new();
        STANDARD.get_or_init(PriceTable::default)
    }

    /// Surcharge for a feature id; unknown ids cost nothing.
    pub fn feature_price(&self, id: &str) -> u32 {
        self.features.get(id).copied().unwrap_or(0)
    }

    /// Priced features in the `FEATURES` order, then any ids only this table knows.
    pub fn listed_features(&self) -> Vec<(&str, u32)> {
        let known = FEATURES
            .iter()
            .filter_map(|(id, _)| self.features.get_key_value(*id));
        let extra = self
            .features
            .iter()
            .filter(|(id, _)| !FEATURES.iter().any(|(known, _)| *known == id.as_str()));
        known
            .chain(extra)
            .map(|(id, price)| (id.as_str(), *price))
            .collect()
    }

    pub fn breakdown(&self, input: &EstimateInput) -> EstimateBreakdown {
        let page_count = clamp_pages(input.page_count);
        let base = u64::from(self.base.price(input.site_type));
        let extra_pages = u64::from(page_count - MIN_PAGES) * u64::from(self.per_extra_page);
        let features: u64 = input
            .features
            .iter()
            .map(|f| u64::from(self.feature_price(f)))
            .sum();
        let multiplier_percent = self.urgency.percent(input.urgency);
        let subtotal = base + extra_pages + features;
        // Round half up; every operand is non-negative.
        let total = (subtotal * u64::from(multiplier_percent) + 50) / 100;

        EstimateBreakdown {
            base: saturate(base),
            extra_pages: saturate(extra_pages),
            features: saturate(features),
            subtotal: saturate(subtotal),
            multiplier_percent,
            total: saturate(total),
        }
    }

    pub fn estimate(&self, input: &EstimateInput) -> u32 {
        self.breakdown(input).total
    }
}

fn saturate(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

pub fn clamp_pages(page_count: u32) -> u32 {
    page_count.clamp(MIN_PAGES, MAX_PAGES)
}

/// Estimator selections. Deserializing never fails on a JSON object: odd
/// values fall back to defaults and page counts are clamped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimateInput {
    pub site_type: SiteType,
    #[serde(deserialize_with = "lenient_pages")]
    pub page_count: u32,
    #[serde(deserialize_with = "lenient_features")]
    pub features: BTreeSet<String>,
    pub urgency: Urgency,
}

impl Default for EstimateInput {
    fn default() -> Self {
        Self {
            site_type: SiteType::default(),
            page_count: DEFAULT_PAGES,
            features: BTreeSet::new(),
            urgency: Urgency::default(),
        }
    }
}

impl EstimateInput {
    pub fn set_page_count(&mut self, page_count: u32) {
        self.page_count = clamp_pages(page_count);
    }

    /// Adds the feature if absent, removes it otherwise.
    pub fn toggle_feature(&mut self, id: &str) {
        if !self.features.remove(id) {
            self.features.insert(id.to_string());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateBreakdown {
    pub base: u32,
    pub extra_pages: u32,
    pub features: u32,
    pub subtotal: u32,
    pub multiplier_percent: u32,
    pub total: u32,
}

/// Any JSON value, flattened to text where it is a scalar.
enum Loose {
    Text(String),
    List(Vec<Loose>),
    Nothing,
}

impl Loose {
    fn text(self) -> Option<String> {
        match self {
            Loose::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Loose {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LooseVisitor)
    }
}

struct LooseVisitor;

impl<'de> Visitor<'de> for LooseVisitor {
    type Value = Loose;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Loose, E> {
        Ok(Loose::Text(v.to_string()))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Loose, E> {
        Ok(Loose::Text(v.to_string()))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Loose, E> {
        Ok(Loose::Text(v.to_string()))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Loose, E> {
        Ok(Loose::Text(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Loose, E> {
        Ok(Loose::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Loose, E> {
        Ok(Loose::Text(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Loose, E> {
        Ok(Loose::Nothing)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Loose, E> {
        Ok(Loose::Nothing)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Loose, D::Error> {
        Loose::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Loose, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element::<Loose>()? {
            items.push(item);
        }
        Ok(Loose::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Loose, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Loose::Nothing)
    }
}

/// Numbers and numeric strings round to the nearest page and clamp into
/// range. Anything else is the default page count.
fn lenient_pages<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let pages = Loose::deserialize(deserializer)?
        .text()
        .and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|pages| pages.is_finite())
        .map(|pages| pages.round().clamp(f64::from(MIN_PAGES), f64::from(MAX_PAGES)) as u32)
        .unwrap_or(DEFAULT_PAGES);
    Ok(pages)
}

/// A list of ids, or a single id. `null` and other shapes select nothing.
fn lenient_features<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeSet<String>, D::Error> {
    Ok(match Loose::deserialize(deserializer)? {
        Loose::List(items) => items.into_iter().filter_map(Loose::text).collect(),
        Loose::Text(id) => BTreeSet::from([id]),
        Loose::Nothing => BTreeSet::new(),
    })
}

/// Estimate with the compiled-in price table.
pub fn estimate(input: &EstimateInput) -> u32 {
    PriceTable::standard().estimate(input)
}

pub fn breakdown(input: &EstimateInput) -> EstimateBreakdown {
    PriceTable::standard().breakdown(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(site_type: SiteType, pages: u32, features: &[&str], urgency: Urgency) -> EstimateInput {
        EstimateInput {
            site_type,
            page_count: pages,
            features: features.iter().map(|f| f.to_string()).collect(),
            urgency,
        }
    }

    fn feature_subsets() -> Vec<Vec<&'static str>> {
        (0u32..1 << FEATURES.len())
            .map(|mask| {
                FEATURES
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, (id, _))| *id)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn business_site_with_seo() {
        let b = breakdown(&input(SiteType::Business, 4, &["seo"], Urgency::Normal));
        assert_eq!(b.base, 300);
        assert_eq!(b.extra_pages, 120);
        assert_eq!(b.features, 60);
        assert_eq!(b.multiplier_percent, 100);
        assert_eq!(b.total, 480);
    }

    #[test]
    fn rushed_single_page_shop() {
        let i = input(SiteType::Ecommerce, 1, &["checkout", "cms"], Urgency::Rush);
        let b = breakdown(&i);
        assert_eq!(b.extra_pages, 0);
        assert_eq!(b.features, 180);
        assert_eq!(b.total, 1020);
    }

    #[test]
    fn defaults_match_pricing_page() {
        let i = EstimateInput::default();
        assert_eq!(i.site_type, SiteType::Business);
        assert_eq!(i.page_count, 4);
        assert!(i.features.is_empty());
        assert_eq!(i.urgency, Urgency::Normal);
        assert_eq!(estimate(&i), 420);
    }

    #[test]
    fn fast_multiplier_rounds_to_nearest() {
        // (200 + 0 + 30) * 1.2 = 276
        assert_eq!(estimate(&input(SiteType::Portfolio, 1, &["contact"], Urgency::Fast)), 276);
        // (450 + 40 + 50) * 1.5 = 810
        assert_eq!(estimate(&input(SiteType::Booking, 2, &["gallery"], Urgency::Rush)), 810);
        // (300 + 0 + 30) * 1.5 = 495
        assert_eq!(estimate(&input(SiteType::Business, 1, &["contact"], Urgency::Rush)), 495);
    }

    #[test]
    fn half_values_round_up() {
        let mut table = PriceTable::default();
        table.urgency.fast = 125;
        table.base.portfolio = 202;
        // 202 * 1.25 = 252.5
        assert_eq!(table.estimate(&input(SiteType::Portfolio, 1, &[], Urgency::Fast)), 253);
    }

    #[test]
    fn page_count_is_clamped() {
        let low = input(SiteType::Custom, 0, &[], Urgency::Normal);
        let one = input(SiteType::Custom, 1, &[], Urgency::Normal);
        assert_eq!(estimate(&low), estimate(&one));
        assert_eq!(estimate(&one), 600);

        let high = input(SiteType::Custom, 500, &[], Urgency::Normal);
        let max = input(SiteType::Custom, MAX_PAGES, &[], Urgency::Normal);
        assert_eq!(estimate(&high), estimate(&max));
        assert_eq!(estimate(&max), 600 + 14 * 40);

        let mut i = EstimateInput::default();
        i.set_page_count(99);
        assert_eq!(i.page_count, MAX_PAGES);
    }

    #[test]
    fn unknown_features_cost_nothing() {
        let plain = input(SiteType::Business, 3, &[], Urgency::Normal);
        let odd = input(SiteType::Business, 3, &["teleport", "blockchain"], Urgency::Normal);
        assert_eq!(estimate(&plain), estimate(&odd));
    }

    #[test]
    fn unknown_enum_values_fall_back_to_defaults() {
        assert_eq!(SiteType::parse("spaceship"), SiteType::Business);
        assert_eq!(SiteType::parse(" ECOMMERCE "), SiteType::Ecommerce);
        assert_eq!(Urgency::parse("yesterday"), Urgency::Normal);

        let parsed: EstimateInput = serde_json::from_str(
            r#"{"site_type":"castle","page_count":2,"features":["seo"],"urgency":"asap"}"#,
        )
        .unwrap();
        assert_eq!(parsed.site_type, SiteType::Business);
        assert_eq!(parsed.urgency, Urgency::Normal);
        assert_eq!(estimate(&parsed), 300 + 40 + 60);
    }

    #[test]
    fn malformed_input_values_are_tolerated() {
        let parsed: EstimateInput = serde_json::from_str(
            r#"{"site_type":7,"page_count":-3,"features":null,"urgency":{"when":"now"}}"#,
        )
        .unwrap();
        assert_eq!(parsed.site_type, SiteType::Business);
        assert_eq!(parsed.page_count, MIN_PAGES);
        assert!(parsed.features.is_empty());
        assert_eq!(parsed.urgency, Urgency::Normal);
        assert_eq!(estimate(&parsed), 300);

        let parse_pages = |raw: &str| {
            serde_json::from_str::<EstimateInput>(&format!(r#"{{"page_count":{raw}}}"#))
                .unwrap()
                .page_count
        };
        assert_eq!(parse_pages("2.5"), 3);
        assert_eq!(parse_pages("2.4"), 2);
        assert_eq!(parse_pages("\"6\""), 6);
        assert_eq!(parse_pages("1e9"), MAX_PAGES);
        assert_eq!(parse_pages("18446744073709551615"), MAX_PAGES);
        assert_eq!(parse_pages("\"many\""), DEFAULT_PAGES);
        assert_eq!(parse_pages("null"), DEFAULT_PAGES);
        assert_eq!(parse_pages("[2]"), DEFAULT_PAGES);

        let single: EstimateInput = serde_json::from_str(r#"{"features":"seo"}"#).unwrap();
        assert_eq!(single.features, BTreeSet::from(["seo".to_string()]));
        let mixed: EstimateInput =
            serde_json::from_str(r#"{"features":["blog", null, {"x": 1}, "cms"]}"#).unwrap();
        assert_eq!(mixed.features.len(), 2);
    }

    #[test]
    fn missing_input_fields_use_defaults() {
        let parsed: EstimateInput = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, EstimateInput::default());
    }

    #[test]
    fn partial_price_table_keeps_defaults() {
        let table: PriceTable =
            serde_json::from_str(r#"{"per_extra_page": 50, "base": {"business": 350}}"#).unwrap();
        assert_eq!(table.per_extra_page, 50);
        assert_eq!(table.base.business, 350);
        assert_eq!(table.base.custom, 600);
        assert_eq!(table.urgency, UrgencyMultipliers::default());
        assert_eq!(table.feature_price("seo"), 60);
    }

    #[test]
    fn features_are_listed_in_display_order() {
        let table = PriceTable::default();
        let ids: Vec<&str> = table.listed_features().into_iter().map(|(id, _)| id).collect();
        let expected: Vec<&str> = FEATURES.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, expected);

        let mut table = PriceTable::default();
        table.features.remove("gallery");
        table.features.insert("analytics".to_string(), 40);
        let listed = table.listed_features();
        assert_eq!(listed[0], ("blog", 80));
        assert_eq!(listed[1], ("contact", 30));
        assert_eq!(listed.last(), Some(&("analytics", 40)));
        assert_eq!(listed.len(), FEATURES.len());
    }

    #[test]
    fn toggling_a_feature_twice_removes_it() {
        let mut i = EstimateInput::default();
        i.toggle_feature("blog");
        assert!(i.features.contains("blog"));
        i.toggle_feature("blog");
        assert!(i.features.is_empty());
    }

    #[test]
    fn estimate_is_never_below_scaled_base() {
        let table = PriceTable::standard();
        for site in SiteType::ALL {
            for urgency in Urgency::ALL {
                let floor = (u64::from(table.base.price(site)) * u64::from(table.urgency.percent(urgency)) + 50) / 100;
                for pages in MIN_PAGES..=MAX_PAGES {
                    for subset in feature_subsets() {
                        let total = estimate(&input(site, pages, &subset, urgency));
                        assert!(u64::from(total) >= floor, "{site} {pages} {subset:?} {urgency}");
                    }
                }
            }
        }
    }

    #[test]
    fn more_pages_never_cost_less() {
        for site in SiteType::ALL {
            for urgency in Urgency::ALL {
                for pages in MIN_PAGES..MAX_PAGES {
                    let fewer = estimate(&input(site, pages, &["blog"], urgency));
                    let more = estimate(&input(site, pages + 1, &["blog"], urgency));
                    assert!(more >= fewer);
                }
            }
        }
    }

    #[test]
    fn adding_a_feature_never_costs_less() {
        for subset in feature_subsets() {
            for (id, _) in FEATURES {
                let before = input(SiteType::Booking, 5, &subset, Urgency::Fast);
                let mut after = before.clone();
                after.features.insert(id.to_string());
                assert!(estimate(&after) >= estimate(&before));
            }
        }
    }

    #[test]
    fn faster_delivery_never_costs_less() {
        for site in SiteType::ALL {
            let normal = estimate(&input(site, 6, &["seo", "cms"], Urgency::Normal));
            let fast = estimate(&input(site, 6, &["seo", "cms"], Urgency::Fast));
            let rush = estimate(&input(site, 6, &["seo", "cms"], Urgency::Rush));
            assert!(normal <= fast && fast <= rush);
        }
    }

    #[test]
    fn single_page_and_no_features_add_nothing() {
        let b = breakdown(&input(SiteType::Portfolio, 1, &[], Urgency::Normal));
        assert_eq!(b.extra_pages, 0);
        assert_eq!(b.features, 0);
        assert_eq!(b.total, 200);
    }

    #[test]
    fn estimate_is_repeatable() {
        let i = input(SiteType::Custom, 9, &["multilingual", "booking"], Urgency::Fast);
        assert_eq!(estimate(&i), estimate(&i));
    }
}
