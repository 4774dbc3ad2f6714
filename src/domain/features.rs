// ============================================================
// Layer 3 — Feature Record
// ============================================================
// The single row fed to both survival models. Sixteen named
// numeric columns in a fixed order:
//
//   0..=11  raw columns (user-supplied or baseline defaults)
//   12..=15 engineered columns (see data::engineer)
//
// Both models were fitted on exactly this column order, so the
// order of FEATURE_COLUMNS is part of the model contract.
// A FeatureRecord always has all sixteen fields, which makes
// "every expected column is present" true by construction.
//
// Reference: Rust Book §5 (Structs), §8 (Arrays and Slices)

use serde::Serialize;

/// Number of model input columns.
pub const NUM_FEATURES: usize = 16;

/// Column names in model input order.
pub const FEATURE_COLUMNS: [&str; NUM_FEATURES] = [
    "dist_min_ci_0_5h",
    "log1p_area_first",
    "num_perimeters_0_5h",
    "dt_first_last_0_5h",
    "event_start_month",
    "alignment_abs",
    "low_temporal_resolution_0_5h",
    "area_first_ha",
    "event_start_dayofweek",
    "event_start_hour",
    "cross_track_component",
    "radial_growth_m",
    "dist_to_5km_threshold_m",
    "eta_hours",
    "danger_index",
    "directed_threat_speed",
];

/// Dense numeric row in FEATURE_COLUMNS order — what a model sees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow(pub [f64; NUM_FEATURES]);

/// One prediction request's complete, named feature set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub dist_min_ci_0_5h:             f64,
    pub log1p_area_first:             f64,
    pub num_perimeters_0_5h:          f64,
    pub dt_first_last_0_5h:           f64,
    pub event_start_month:            f64,
    pub alignment_abs:                f64,
    pub low_temporal_resolution_0_5h: f64,
    pub area_first_ha:                f64,
    pub event_start_dayofweek:        f64,
    pub event_start_hour:             f64,
    pub cross_track_component:        f64,
    pub radial_growth_m:              f64,
    pub dist_to_5km_threshold_m:      f64,
    pub eta_hours:                    f64,
    pub danger_index:                 f64,
    pub directed_threat_speed:        f64,
}

impl FeatureRecord {
    /// Flatten into model input order.
    pub fn to_row(&self) -> FeatureRow {
        FeatureRow([
            self.dist_min_ci_0_5h,
            self.log1p_area_first,
            self.num_perimeters_0_5h,
            self.dt_first_last_0_5h,
            self.event_start_month,
            self.alignment_abs,
            self.low_temporal_resolution_0_5h,
            self.area_first_ha,
            self.event_start_dayofweek,
            self.event_start_hour,
            self.cross_track_component,
            self.radial_growth_m,
            self.dist_to_5km_threshold_m,
            self.eta_hours,
            self.danger_index,
            self.directed_threat_speed,
        ])
    }

    /// (column name, value) pairs in model input order.
    pub fn named_values(&self) -> Vec<(&'static str, f64)> {
        FEATURE_COLUMNS
            .iter()
            .copied()
            .zip(self.to_row().0)
            .collect()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_record() -> FeatureRecord {
        FeatureRecord {
            dist_min_ci_0_5h:             0.0,
            log1p_area_first:             1.0,
            num_perimeters_0_5h:          2.0,
            dt_first_last_0_5h:           3.0,
            event_start_month:            4.0,
            alignment_abs:                5.0,
            low_temporal_resolution_0_5h: 6.0,
            area_first_ha:                7.0,
            event_start_dayofweek:        8.0,
            event_start_hour:             9.0,
            cross_track_component:        10.0,
            radial_growth_m:              11.0,
            dist_to_5km_threshold_m:      12.0,
            eta_hours:                    13.0,
            danger_index:                 14.0,
            directed_threat_speed:        15.0,
        }
    }

    #[test]
    fn test_row_follows_column_order() {
        // Each field holds its own column index, so the row must read 0..16
        let row = numbered_record().to_row();
        for (i, v) in row.0.iter().enumerate() {
            assert_eq!(*v, i as f64, "column {} out of place", FEATURE_COLUMNS[i]);
        }
    }

    #[test]
    fn test_named_values_line_up() {
        let named = numbered_record().named_values();
        assert_eq!(named.len(), NUM_FEATURES);
        assert_eq!(named[13], ("eta_hours", 13.0));
        assert_eq!(named[0].0, "dist_min_ci_0_5h");
    }

    #[test]
    fn test_json_keys_follow_column_order() {
        let json = serde_json::to_string(&numbered_record()).unwrap();
        let positions: Vec<usize> = FEATURE_COLUMNS
            .iter()
            .map(|c| json.find(&format!("\"{c}\"")).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }
}
