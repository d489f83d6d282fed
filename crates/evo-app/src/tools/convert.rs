//! Unit conversions for `/convert`.

/// Supported conversion kinds, in help order.
pub const KINDS: [&str; 4] = ["km_to_miles", "miles_to_km", "c_to_f", "f_to_c"];

const KM_PER_MILE: f64 = 0.621371;

/// Apply a named conversion. `None` means the kind is unknown.
pub fn convert(kind: &str, value: f64) -> Option<f64> {
    match kind {
        "km_to_miles" => Some(value * KM_PER_MILE),
        "miles_to_km" => Some(value / KM_PER_MILE),
        "c_to_f" => Some(value * 9.0 / 5.0 + 32.0),
        "f_to_c" => Some((value - 32.0) * 5.0 / 9.0),
        _ => None,
    }
}
