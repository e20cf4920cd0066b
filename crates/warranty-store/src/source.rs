//! The claim lookups the warranty-year repository needs from storage.

use chrono::NaiveDate;
use warranty_core::Claim;

use crate::StoreError;

/// Read access to the claims feed.
///
/// VIN matching is case-insensitive and ignores surrounding whitespace.
pub trait ClaimSource: Send {
    /// All claims for a vehicle, newest id first.
    fn claims_by_vin(&self, vin: &str) -> Result<Vec<Claim>, StoreError>;

    /// Earliest retail date on file for a vehicle; `None` when it has no claims.
    fn retail_date(&self, vin: &str) -> Result<Option<NaiveDate>, StoreError>;

    /// Claims whose repair range touches `from..=to`
    /// (`ro_open_date <= to AND ro_close_date >= from`), ordered by open date
    /// then id.
    fn claims_overlapping(
        &self,
        vin: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Claim>, StoreError>;
}

impl<S: ClaimSource + ?Sized> ClaimSource for Box<S> {
    fn claims_by_vin(&self, vin: &str) -> Result<Vec<Claim>, StoreError> {
        (**self).claims_by_vin(vin)
    }

    fn retail_date(&self, vin: &str) -> Result<Option<NaiveDate>, StoreError> {
        (**self).retail_date(vin)
    }

    fn claims_overlapping(
        &self,
        vin: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Claim>, StoreError> {
        (**self).claims_overlapping(vin, from, to)
    }
}

/// Claims held in a plain vector. Used for tests and small fixtures.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    claims: Vec<Claim>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, claim: Claim) {
        self.claims.retain(|c| c.id != claim.id);
        self.claims.push(claim);
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    fn for_vin<'a>(&'a self, vin: &'a str) -> impl Iterator<Item = &'a Claim> + 'a {
        self.claims.iter().filter(move |c| c.matches_vin(vin))
    }
}

impl FromIterator<Claim> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = Claim>>(iter: I) -> Self {
        let mut store = Self::new();
        for claim in iter {
            store.insert(claim);
        }
        store
    }
}

impl ClaimSource for MemoryStore {
    fn claims_by_vin(&self, vin: &str) -> Result<Vec<Claim>, StoreError> {
        let mut claims: Vec<Claim> = self.for_vin(vin).cloned().collect();
        claims.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(claims)
    }

    fn retail_date(&self, vin: &str) -> Result<Option<NaiveDate>, StoreError> {
        Ok(self.for_vin(vin).map(|c| c.retail_date).min())
    }

    fn claims_overlapping(
        &self,
        vin: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Claim>, StoreError> {
        let mut claims: Vec<Claim> = self
            .for_vin(vin)
            .filter(|c| c.ro_open_date <= to && c.ro_close_date >= from)
            .cloned()
            .collect();
        claims.sort_by_key(|c| (c.ro_open_date, c.id));
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn claim(id: i64, vin: &str, retail: NaiveDate, open: NaiveDate, close: NaiveDate) -> Claim {
        Claim {
            id,
            vin: vin.into(),
            retail_date: retail,
            ro_open_date: open,
            ro_close_date: close,
        }
    }

    fn store() -> MemoryStore {
        let retail = ymd(2023, 3, 15);
        [
            claim(1, "VIN-A", retail, ymd(2023, 5, 1), ymd(2023, 5, 3)),
            claim(2, "vin-a", retail, ymd(2024, 3, 10), ymd(2024, 3, 20)),
            claim(3, "VIN-A", ymd(2023, 3, 16), ymd(2023, 4, 1), ymd(2023, 4, 2)),
            claim(4, "VIN-B", ymd(2021, 1, 1), ymd(2022, 1, 1), ymd(2022, 1, 5)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn claims_by_vin_newest_id_first() {
        let ids: Vec<i64> = store()
            .claims_by_vin(" Vin-A ")
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn retail_date_is_earliest() {
        let s = store();
        assert_eq!(s.retail_date("VIN-A").unwrap(), Some(ymd(2023, 3, 15)));
        assert_eq!(s.retail_date("VIN-Z").unwrap(), None);
    }

    #[test]
    fn overlapping_filters_and_orders() {
        let ids: Vec<i64> = store()
            .claims_overlapping("vin-a", ymd(2023, 4, 2), ymd(2024, 3, 10))
            .unwrap()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let none = store()
            .claims_overlapping("VIN-A", ymd(2024, 3, 21), ymd(2025, 1, 1))
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn insert_replaces_same_id() {
        let mut s = store();
        assert_eq!(s.len(), 4);
        let retail = ymd(2023, 3, 15);
        s.insert(claim(1, "VIN-C", retail, retail, retail));
        assert_eq!(s.len(), 4);
        assert_eq!(s.claims_by_vin("VIN-C").unwrap().len(), 1);
    }

    #[test]
    fn boxed_source_delegates() {
        let boxed: Box<dyn ClaimSource> = Box::new(store());
        assert_eq!(boxed.claims_by_vin("VIN-B").unwrap().len(), 1);
    }
}
