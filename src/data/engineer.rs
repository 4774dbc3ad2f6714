// ============================================================
// Layer 4 — Feature Engineering
// ============================================================
// Turns six user signals plus the baseline columns into the full
// 16-column FeatureRecord.
//
// Derived columns (applied in order):
//   1. dist_to_5km_threshold_m = max(dist - 5000, 0)
//   2. eta_hours               = threshold_dist / max(closing_speed, 0.1)
//   3. danger_index            = area * growth_rate / (dist + 1)
//   4. directed_threat_speed   = centroid_speed * alignment
//
// Plus one transformed raw column:
//      log1p_area_first        = ln(1 + area)
//
// Every function here is pure: same inputs, same outputs.

use crate::data::baseline::FeatureBaseline;
use crate::domain::{features::FeatureRecord, telemetry::TelemetryInput};

/// Distance at which a fire is considered to threaten the zone (m).
pub const THREAT_THRESHOLD_M: f64 = 5_000.0;

/// Lowest closing speed used when estimating ETA (m/h).
/// Keeps the division well-defined for stationary or receding fires.
pub const MIN_CLOSING_SPEED: f64 = 0.1;

/// Distance still to cover before the fire is within the threshold.
pub fn dist_to_threshold(dist_min_m: f64) -> f64 {
    (dist_min_m - THREAT_THRESHOLD_M).max(0.0)
}

/// Hours until the fire reaches the threshold at the current closing speed.
pub fn eta_hours(dist_to_threshold_m: f64, closing_speed_m_per_h: f64) -> f64 {
    dist_to_threshold_m / closing_speed_m_per_h.max(MIN_CLOSING_SPEED)
}

pub fn danger_index(area_first_ha: f64, growth_rate_ha_per_h: f64, dist_min_m: f64) -> f64 {
    (area_first_ha * growth_rate_ha_per_h) / (dist_min_m + 1.0)
}

pub fn directed_threat_speed(centroid_speed_m_per_h: f64, alignment_abs: f64) -> f64 {
    centroid_speed_m_per_h * alignment_abs
}

/// Build the full model input for one request.
pub fn engineer_features(input: &TelemetryInput, baseline: &FeatureBaseline) -> FeatureRecord {
    let threshold_dist = dist_to_threshold(input.dist_min_m);

    let record = FeatureRecord {
        dist_min_ci_0_5h:             input.dist_min_m,
        log1p_area_first:             input.area_first_ha.ln_1p(),
        num_perimeters_0_5h:          baseline.num_perimeters_0_5h,
        dt_first_last_0_5h:           baseline.dt_first_last_0_5h,
        event_start_month:            baseline.event_start_month,
        alignment_abs:                input.alignment_abs,
        low_temporal_resolution_0_5h: baseline.low_temporal_resolution_0_5h,
        area_first_ha:                input.area_first_ha,
        event_start_dayofweek:        baseline.event_start_dayofweek,
        event_start_hour:             baseline.event_start_hour,
        cross_track_component:        baseline.cross_track_component,
        radial_growth_m:              baseline.radial_growth_m,
        dist_to_5km_threshold_m:      threshold_dist,
        eta_hours:                    eta_hours(threshold_dist, input.closing_speed_m_per_h),
        danger_index:                 danger_index(
                                          input.area_first_ha,
                                          input.area_growth_rate_ha_per_h,
                                          input.dist_min_m,
                                      ),
        directed_threat_speed:        directed_threat_speed(
                                          input.centroid_speed_m_per_h,
                                          input.alignment_abs,
                                      ),
    };

    tracing::debug!(
        "Engineered features: threshold_dist={:.1} eta={:.2}h danger={:.4} directed={:.1}",
        record.dist_to_5km_threshold_m,
        record.eta_hours,
        record.danger_index,
        record.directed_threat_speed,
    );

    record
}
