/// Pounds-to-kilograms conversion factor.
pub const LB_TO_KG: f64 = 0.453592;

/// Chargeable basis of a freight invoice: a single invoice charges by
/// weight or by volume, never both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Chargeable {
    WeightKg(f64),
    VolumeCbm(f64),
}

/// Normalize a mass measurement to kilograms. A unit token starting
/// with `kg` (case-insensitive) passes through unchanged; anything else
/// is pounds.
pub fn to_kilograms(value: f64, unit: &str) -> f64 {
    if unit.to_ascii_lowercase().starts_with("kg") {
        value
    } else {
        value * LB_TO_KG
    }
}

/// Classify a chargeable capture by its unit token. Volume units are
/// stored as-is; no interconversion between volume units is attempted.
pub fn classify_chargeable(value: f64, unit: &str) -> Chargeable {
    let u = unit.to_ascii_lowercase();
    if u.starts_with("m3") || u.starts_with("cbm") {
        Chargeable::VolumeCbm(value)
    } else {
        Chargeable::WeightKg(to_kilograms(value, unit))
    }
}
