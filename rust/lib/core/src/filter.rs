//! Client-side filtering and sorting of record listings.
//!
//! [`filter_and_sort`] is pure and idempotent, so hosts can call it on
//! every keystroke. [`ViewContext`] holds the live filter controls for one
//! listing view and keeps the export links in sync with them.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::collate::{turkish_cmp, turkish_lowercase};
use crate::model::{Company, Pallet};

/// What a listing needs to know about a record.
pub trait Listable {
    fn name(&self) -> &str;
    fn company_id(&self) -> Option<i64>;
    fn price(&self) -> f64;

    fn volume(&self) -> Option<f64> {
        None
    }

    fn price_per_desi(&self) -> Option<f64> {
        None
    }
}

impl Listable for Pallet {
    fn name(&self) -> &str {
        &self.name
    }

    fn company_id(&self) -> Option<i64> {
        Some(self.company_id)
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn volume(&self) -> Option<f64> {
        Some(self.total_desi())
    }

    fn price_per_desi(&self) -> Option<f64> {
        let total = self.total_desi();
        (self.price > 0.0 && total > 0.0).then(|| self.price / total)
    }
}

impl Listable for Company {
    fn name(&self) -> &str {
        &self.name
    }

    fn company_id(&self) -> Option<i64> {
        self.id
    }

    fn price(&self) -> f64 {
        0.0
    }
}

// ── Filter ──────────────────────────────────────────────────────────

/// Active filter predicates. All must hold for a record to be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    /// Case-insensitive substring of the name. Empty matches everything.
    pub search: String,
    pub company_id: Option<i64>,
    pub min_price: f64,
    pub max_price: f64,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            search: String::new(),
            company_id: None,
            min_price: 0.0,
            max_price: f64::INFINITY,
        }
    }
}

impl FilterSpec {
    pub fn matches<T: Listable>(&self, item: &T) -> bool {
        self.matches_with(&turkish_lowercase(&self.search), item)
    }

    fn matches_with<T: Listable>(&self, needle: &str, item: &T) -> bool {
        let company_ok = match self.company_id {
            Some(id) => item.company_id() == Some(id),
            None => true,
        };
        let price = number_or_zero(Some(item.price()));
        let price_ok = price >= self.min_price && price <= self.max_price;
        let name_ok = needle.is_empty() || turkish_lowercase(item.name()).contains(needle);
        company_ok && price_ok && name_ok
    }

    /// Query string carrying the active filters, in the form the export
    /// endpoints accept. Unset filters are omitted.
    pub fn query_string(&self) -> String {
        let mut qs = url::form_urlencoded::Serializer::new(String::new());
        if let Some(id) = self.company_id {
            qs.append_pair("company_id", &id.to_string());
        }
        if self.min_price > 0.0 {
            qs.append_pair("min_price", &self.min_price.to_string());
        }
        if self.max_price.is_finite() {
            qs.append_pair("max_price", &self.max_price.to_string());
        }
        if !self.search.is_empty() {
            qs.append_pair("search", &self.search);
        }
        qs.finish()
    }
}

// ── Sort ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Price,
    Volume,
    PricePerDesi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Name,
            direction: SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort order '{0}' (expected e.g. name_asc, price_desc, volume_asc, price_per_desi_desc)")]
pub struct UnknownSortOrder(pub String);

/// Parses the sort control value: `{key}_{asc|desc}`.
impl FromStr for SortSpec {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || UnknownSortOrder(s.to_string());
        let (key, dir) = s.trim().rsplit_once('_').ok_or_else(err)?;
        let key = match key {
            "name" => SortKey::Name,
            "price" => SortKey::Price,
            "volume" => SortKey::Volume,
            "price_per_desi" => SortKey::PricePerDesi,
            _ => return Err(err()),
        };
        let direction = match dir {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(err()),
        };
        Ok(Self { key, direction })
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::Volume => "volume",
            SortKey::PricePerDesi => "price_per_desi",
        };
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}_{}", key, dir)
    }
}

impl SortSpec {
    pub fn compare<T: Listable>(&self, a: &T, b: &T) -> Ordering {
        let ord = match self.key {
            SortKey::Name => turkish_cmp(a.name(), b.name()),
            SortKey::Price => cmp_num(Some(a.price()), Some(b.price())),
            SortKey::Volume => cmp_num(a.volume(), b.volume()),
            SortKey::PricePerDesi => cmp_num(a.price_per_desi(), b.price_per_desi()),
        };
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

fn number_or_zero(v: Option<f64>) -> f64 {
    match v {
        Some(x) if !x.is_nan() => x,
        _ => 0.0,
    }
}

fn cmp_num(a: Option<f64>, b: Option<f64>) -> Ordering {
    number_or_zero(a).total_cmp(&number_or_zero(b))
}

// ── View ────────────────────────────────────────────────────────────

/// The visible, ordered subset of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<T> {
    pub items: Vec<T>,
}

impl<T> FilteredView<T> {
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// The "no results" indicator is visible iff nothing matched.
    pub fn show_no_results(&self) -> bool {
        self.items.is_empty()
    }
}

/// Filter then sort. The sort is stable, so ties keep input order.
pub fn filter_and_sort<'a, T: Listable>(
    items: &'a [T],
    filter: &FilterSpec,
    sort: &SortSpec,
) -> FilteredView<&'a T> {
    let needle = turkish_lowercase(&filter.search);
    let mut visible: Vec<&T> = items
        .iter()
        .filter(|item| filter.matches_with(&needle, *item))
        .collect();
    visible.sort_by(|a, b| sort.compare(*a, *b));
    tracing::trace!(total = items.len(), visible = visible.len(), "filtered listing");
    FilteredView { items: visible }
}

// ── Links ───────────────────────────────────────────────────────────

/// PDF and CSV export URLs for the current filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLinks {
    pub pdf: String,
    pub csv: String,
}

impl ExportLinks {
    pub fn for_filter(base_url: &str, filter: &FilterSpec) -> Self {
        let base = base_url.trim_end_matches('/');
        let qs = filter.query_string();
        let link = |format: &str| {
            if qs.is_empty() {
                format!("{}/export/pallets/{}", base, format)
            } else {
                format!("{}/export/pallets/{}?{}", base, format, qs)
            }
        };
        Self {
            pdf: link("pdf"),
            csv: link("csv"),
        }
    }
}

/// Full-page "view details" URL for a pallet.
pub fn details_url(base_url: &str, id: i64) -> String {
    format!("{}/pallets/{}", base_url.trim_end_matches('/'), id)
}

// ── ViewContext ─────────────────────────────────────────────────────

/// Live filter/sort state of one listing view.
///
/// Setters take the raw control text and parse it leniently: an empty or
/// unparseable value clears that filter instead of failing.
#[derive(Debug, Clone, Default)]
pub struct ViewContext {
    base_url: String,
    filter: FilterSpec,
    sort: SortSpec,
}

impl ViewContext {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn set_search(&mut self, raw: &str) {
        self.filter.search = raw.to_string();
    }

    pub fn set_company(&mut self, raw: &str) {
        self.filter.company_id = raw.trim().parse().ok();
    }

    pub fn set_min_price(&mut self, raw: &str) {
        self.filter.min_price = parse_price(raw).unwrap_or(0.0);
    }

    pub fn set_max_price(&mut self, raw: &str) {
        self.filter.max_price = parse_price(raw).unwrap_or(f64::INFINITY);
    }

    pub fn set_sort(&mut self, raw: &str) -> Result<(), UnknownSortOrder> {
        self.sort = raw.parse()?;
        Ok(())
    }

    pub fn apply<'a, T: Listable>(&self, items: &'a [T]) -> FilteredView<&'a T> {
        filter_and_sort(items, &self.filter, &self.sort)
    }

    pub fn export_links(&self) -> ExportLinks {
        ExportLinks::for_filter(&self.base_url, &self.filter)
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pallet(id: i64, name: &str, company_id: i64, price: f64, volume: Option<f64>) -> Pallet {
        Pallet {
            id: Some(id),
            name: name.into(),
            company_id,
            price,
            total_volume: volume,
            ..Default::default()
        }
    }

    fn fixture() -> Vec<Pallet> {
        vec![
            pallet(1, "Euro Palet", 1, 250.0, Some(50.0)),
            pallet(2, "çam palet", 2, 100.0, Some(40.0)),
            pallet(3, "Ağaç Palet", 1, 175.5, Some(20.0)),
            pallet(4, "Islak Depo", 2, 0.0, None),
            pallet(5, "İhracat", 3, 400.0, Some(80.0)),
        ]
    }

    fn names<T: Listable>(view: &FilteredView<&T>) -> Vec<String> {
        view.items.iter().map(|p| p.name().to_string()).collect()
    }

    #[test]
    fn default_filter_keeps_everything() {
        let items = fixture();
        let view = filter_and_sort(&items, &FilterSpec::default(), &SortSpec::default());
        assert_eq!(view.count(), items.len());
        assert!(!view.show_no_results());
    }

    #[test]
    fn output_is_exactly_the_matching_set() {
        let items = fixture();
        let spec = FilterSpec {
            search: "PALET".into(),
            company_id: Some(1),
            min_price: 100.0,
            max_price: 250.0,
        };
        let view = filter_and_sort(&items, &spec, &SortSpec::default());
        for item in &view.items {
            assert!(spec.matches(*item));
        }
        let expected = items.iter().filter(|p| spec.matches(*p)).count();
        assert_eq!(view.count(), expected);
        assert_eq!(names(&view), ["Ağaç Palet", "Euro Palet"]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let items = fixture();
        let spec = FilterSpec {
            min_price: 100.0,
            max_price: 175.5,
            ..Default::default()
        };
        let view = filter_and_sort(&items, &spec, &SortSpec::default());
        assert_eq!(names(&view), ["Ağaç Palet", "çam palet"]);
    }

    #[test]
    fn search_uses_turkish_case_folding() {
        let items = fixture();
        let spec = FilterSpec {
            search: "ıslak".into(),
            ..Default::default()
        };
        assert_eq!(names(&filter_and_sort(&items, &spec, &SortSpec::default())), ["Islak Depo"]);

        let spec = FilterSpec {
            search: "ihr".into(),
            ..Default::default()
        };
        assert_eq!(names(&filter_and_sort(&items, &spec, &SortSpec::default())), ["İhracat"]);
    }

    #[test]
    fn no_results_indicator() {
        let items = fixture();
        let spec = FilterSpec {
            search: "yok böyle".into(),
            ..Default::default()
        };
        let view = filter_and_sort(&items, &spec, &SortSpec::default());
        assert_eq!(view.count(), 0);
        assert!(view.show_no_results());
    }

    #[test]
    fn filtering_is_idempotent() {
        let items = fixture();
        let spec = FilterSpec {
            search: "a".into(),
            max_price: 300.0,
            ..Default::default()
        };
        let sort: SortSpec = "price_desc".parse().unwrap();
        let once: Vec<Pallet> = filter_and_sort(&items, &spec, &sort)
            .items
            .into_iter()
            .cloned()
            .collect();
        let twice: Vec<Pallet> = filter_and_sort(&once, &spec, &sort)
            .items
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once, twice);
        assert_eq!(
            filter_and_sort(&items, &spec, &sort),
            filter_and_sort(&items, &spec, &sort)
        );
    }

    #[test]
    fn name_sort_is_turkish() {
        let items = vec![
            pallet(1, "çam", 1, 1.0, None),
            pallet(2, "Ağaç", 1, 2.0, None),
            pallet(3, "elma", 1, 3.0, None),
        ];
        let view = filter_and_sort(&items, &FilterSpec::default(), &"name_asc".parse().unwrap());
        assert_eq!(names(&view), ["Ağaç", "çam", "elma"]);
    }

    #[test]
    fn desc_is_reverse_of_asc_for_distinct_keys() {
        let items = fixture();
        for key in ["name", "price", "volume"] {
            let asc: SortSpec = format!("{key}_asc").parse().unwrap();
            let desc: SortSpec = format!("{key}_desc").parse().unwrap();
            let mut up = names(&filter_and_sort(&items, &FilterSpec::default(), &asc));
            let down = names(&filter_and_sort(&items, &FilterSpec::default(), &desc));
            up.reverse();
            assert_eq!(up, down, "key {key}");
        }
    }

    #[test]
    fn missing_numbers_sort_as_zero() {
        let items = vec![
            pallet(1, "a", 1, 10.0, Some(5.0)),
            pallet(2, "b", 1, f64::NAN, None),
            pallet(3, "c", 1, 5.0, Some(1.0)),
        ];
        let view = filter_and_sort(&items, &FilterSpec::default(), &"price_asc".parse().unwrap());
        assert_eq!(names(&view), ["b", "c", "a"]);

        let view = filter_and_sort(
            &items,
            &FilterSpec::default(),
            &"price_per_desi_desc".parse().unwrap(),
        );
        // 10/5 = 2, 5/1 = 5, NaN price -> none -> 0
        assert_eq!(names(&view), ["c", "a", "b"]);
    }

    #[test]
    fn sort_spec_parsing() {
        let spec: SortSpec = "price_per_desi_desc".parse().unwrap();
        assert_eq!(spec.key, SortKey::PricePerDesi);
        assert_eq!(spec.direction, SortDirection::Desc);
        assert_eq!(spec.to_string(), "price_per_desi_desc");
        assert!("weight_asc".parse::<SortSpec>().is_err());
        assert!("name".parse::<SortSpec>().is_err());
        assert!("name_up".parse::<SortSpec>().is_err());
    }

    #[test]
    fn companies_filter_by_name() {
        let items = vec![
            Company {
                id: Some(1),
                name: "Şahin Kereste".into(),
                contact_email: "a@b.c".into(),
            },
            Company {
                id: Some(2),
                name: "Akın Ambalaj".into(),
                contact_email: "d@e.f".into(),
            },
        ];
        let view = filter_and_sort(&items, &FilterSpec::default(), &SortSpec::default());
        assert_eq!(names(&view), ["Akın Ambalaj", "Şahin Kereste"]);
    }

    #[test]
    fn view_context_parses_controls_leniently() {
        let mut ctx = ViewContext::new("http://localhost:5000/");
        ctx.set_search("palet");
        ctx.set_company("");
        ctx.set_min_price("abc");
        ctx.set_max_price("");
        assert_eq!(ctx.filter().company_id, None);
        assert_eq!(ctx.filter().min_price, 0.0);
        assert_eq!(ctx.filter().max_price, f64::INFINITY);

        ctx.set_company("2");
        ctx.set_min_price("99,5");
        ctx.set_max_price("500");
        assert_eq!(ctx.filter().company_id, Some(2));
        assert_eq!(ctx.filter().min_price, 99.5);
        assert!(ctx.set_sort("bogus").is_err());
        assert_eq!(ctx.sort(), SortSpec::default());
        assert_eq!(names(&ctx.apply(&fixture())), ["çam palet"]);
    }

    #[test]
    fn export_links_follow_filter_state() {
        let mut ctx = ViewContext::new("http://localhost:5000/");
        assert_eq!(
            ctx.export_links().pdf,
            "http://localhost:5000/export/pallets/pdf"
        );

        ctx.set_company("3");
        ctx.set_min_price("10");
        ctx.set_max_price("99.9");
        ctx.set_search("çam palet");
        let links = ctx.export_links();
        assert_eq!(
            links.csv,
            "http://localhost:5000/export/pallets/csv?company_id=3&min_price=10&max_price=99.9&search=%C3%A7am+palet"
        );
        assert!(links.pdf.starts_with("http://localhost:5000/export/pallets/pdf?company_id=3"));

        ctx.set_company("");
        assert!(!ctx.export_links().csv.contains("company_id"));
    }

    #[test]
    fn explicit_zero_max_price_is_kept() {
        let mut ctx = ViewContext::new("http://h");
        ctx.set_max_price("0");
        assert_eq!(ctx.filter().max_price, 0.0);
        assert_eq!(names(&ctx.apply(&fixture())), ["Islak Depo"]);
        assert!(ctx.export_links().csv.ends_with("?max_price=0"));
    }

    #[test]
    fn details_link() {
        assert_eq!(details_url("http://h/", 12), "http://h/pallets/12");
    }
}
