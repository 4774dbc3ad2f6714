// ============================================================
// Layer 3 — Telemetry Input Domain Type
// ============================================================
// The six early-tracking signals a user supplies for one
// prediction request (first 5 hours of a fire's perimeter
// history).
//
// Each signal has a fixed range. Values outside the range are
// clamped into it, the same way a range-bounded slider would
// never let them through in the first place.
//
// Reference: Rust Book §5 (Structs), §6 (Enums and match)

use crate::domain::error::InputError;

/// Bounds and default for one user-controlled signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputRange {
    /// Short key used by the interactive session (`distance=20000`)
    pub key:     &'static str,
    /// Human-readable label with units
    pub label:   &'static str,
    pub min:     f64,
    pub max:     f64,
    pub default: f64,
}

impl InputRange {
    /// Clamp a value into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const DISTANCE: InputRange = InputRange {
    key: "distance", label: "Distance to Evac Zone (meters)",
    min: 5_000.0, max: 100_000.0, default: 15_000.0,
};

pub const AREA: InputRange = InputRange {
    key: "area", label: "Initial Area (hectares)",
    min: 0.0, max: 5_000.0, default: 50.0,
};

pub const GROWTH_RATE: InputRange = InputRange {
    key: "growth-rate", label: "Area Growth Rate (ha/hr)",
    min: 0.0, max: 1_000.0, default: 10.0,
};

pub const CLOSING_SPEED: InputRange = InputRange {
    key: "closing-speed", label: "Closing Speed (m/hr)",
    min: -500.0, max: 5_000.0, default: 200.0,
};

pub const ALIGNMENT: InputRange = InputRange {
    key: "alignment", label: "Alignment to Zone (0 to 1)",
    min: 0.0, max: 1.0, default: 0.8,
};

pub const CENTROID_SPEED: InputRange = InputRange {
    key: "centroid-speed", label: "Centroid Speed (m/hr)",
    min: 0.0, max: 5_000.0, default: 250.0,
};

/// All six ranges, in display order.
pub const INPUT_RANGES: [InputRange; 6] = [
    DISTANCE, AREA, GROWTH_RATE, CLOSING_SPEED, ALIGNMENT, CENTROID_SPEED,
];

/// One request's worth of user-supplied fire telemetry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetryInput {
    /// Minimum distance from the fire to the evacuation zone (m)
    pub dist_min_m: f64,

    /// Burned area at the first observed perimeter (ha)
    pub area_first_ha: f64,

    /// Area growth over the tracking window (ha/h)
    pub area_growth_rate_ha_per_h: f64,

    /// Rate at which the fire front approaches the zone (m/h).
    /// Negative when the fire is moving away.
    pub closing_speed_m_per_h: f64,

    /// |cos| of the angle between fire motion and the zone bearing, 0..1
    pub alignment_abs: f64,

    /// Speed of the perimeter centroid (m/h)
    pub centroid_speed_m_per_h: f64,
}

impl Default for TelemetryInput {
    fn default() -> Self {
        Self {
            dist_min_m:                DISTANCE.default,
            area_first_ha:             AREA.default,
            area_growth_rate_ha_per_h: GROWTH_RATE.default,
            closing_speed_m_per_h:     CLOSING_SPEED.default,
            alignment_abs:             ALIGNMENT.default,
            centroid_speed_m_per_h:    CENTROID_SPEED.default,
        }
    }
}

impl TelemetryInput {
    /// Values paired with their ranges, in `INPUT_RANGES` order.
    pub fn fields(&self) -> [(InputRange, f64); 6] {
        [
            (DISTANCE,       self.dist_min_m),
            (AREA,           self.area_first_ha),
            (GROWTH_RATE,    self.area_growth_rate_ha_per_h),
            (CLOSING_SPEED,  self.closing_speed_m_per_h),
            (ALIGNMENT,      self.alignment_abs),
            (CENTROID_SPEED, self.centroid_speed_m_per_h),
        ]
    }

    /// Reject NaN / infinite values, then clamp every field into range.
    ///
    /// Clamped fields are logged at warn level so the user can see that
    /// the prediction did not use the exact value they typed.
    pub fn sanitized(self) -> Result<Self, InputError> {
        for (range, value) in self.fields() {
            if !value.is_finite() {
                return Err(InputError::NonFinite { key: range.key, value });
            }
            if !range.contains(value) {
                tracing::warn!(
                    "{} = {} is outside [{}, {}], clamping",
                    range.key, value, range.min, range.max
                );
            }
        }

        Ok(Self {
            dist_min_m:                DISTANCE.clamp(self.dist_min_m),
            area_first_ha:             AREA.clamp(self.area_first_ha),
            area_growth_rate_ha_per_h: GROWTH_RATE.clamp(self.area_growth_rate_ha_per_h),
            closing_speed_m_per_h:     CLOSING_SPEED.clamp(self.closing_speed_m_per_h),
            alignment_abs:             ALIGNMENT.clamp(self.alignment_abs),
            centroid_speed_m_per_h:    CENTROID_SPEED.clamp(self.centroid_speed_m_per_h),
        })
    }

    /// Set one field by its session key, e.g. `set("area", 120.0)`.
    /// The value is stored as given; call `sanitized` before use.
    pub fn set(&mut self, key: &str, value: f64) -> Result<(), InputError> {
        let slot = match key {
            "distance"       => &mut self.dist_min_m,
            "area"           => &mut self.area_first_ha,
            "growth-rate"    => &mut self.area_growth_rate_ha_per_h,
            "closing-speed"  => &mut self.closing_speed_m_per_h,
            "alignment"      => &mut self.alignment_abs,
            "centroid-speed" => &mut self.centroid_speed_m_per_h,
            other            => return Err(InputError::UnknownKey(other.to_string())),
        };
        *slot = value;
        Ok(())
    }
}
