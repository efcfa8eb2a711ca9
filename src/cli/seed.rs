//! The built-in fleet, used when the configuration does not provide one.

use fleet::UnitRecord;
use rust_decimal::Decimal;

const SEED: [(&str, &str, &str, u32); 15] = [
    ("C001", "Toyota", "Camry", 160),
    ("C002", "Honda", "Accord", 170),
    ("C003", "Mahindra", "Thar", 150),
    ("C004", "Ford", "Fiesta", 1000),
    ("C005", "Hyundai", "Elantra", 150),
    ("C006", "Mercedes", "C-Class", 200),
    ("C007", "BMW", "5 Series", 220),
    ("C008", "Jeep", "Wrangler", 120),
    ("C009", "Toyota", "RAV4", 110),
    ("C010", "Tesla", "Model 3", 150),
    ("C011", "Nissan", "Leaf", 90),
    ("C012", "Porsche", "911", 300),
    ("C013", "Chevrolet", "Corvette", 280),
    ("C014", "Ford", "F-150", 130),
    ("C015", "Chevrolet", "Silverado", 140),
];

pub fn records() -> Vec<UnitRecord> {
    SEED.iter()
        .map(|&(id, brand, model, rate)| UnitRecord {
            id: id.to_string(),
            brand: brand.to_string(),
            model: model.to_string(),
            daily_rate: Decimal::from(rate),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn seed_ids_are_unique() {
        let ids: BTreeSet<_> = records().into_iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), SEED.len());
    }

    #[test]
    fn camry_costs_160_per_day() {
        let camry = &records()[0];
        assert_eq!(camry.id, "C001");
        assert_eq!(camry.daily_rate, Decimal::from(160));
    }
}
