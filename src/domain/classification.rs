// Health and movement classification for a single telemetry record

/// Classification tier driving color and alerting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Notice,
    Critical,
}

/// Health assessment derived from body temperature and heart rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    FeverEmergency,
    PossibleIllness,
    InHeat,
    PossiblePregnancy,
    Healthy,
}

impl HealthStatus {
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::FeverEmergency => "Fever/Emergency",
            HealthStatus::PossibleIllness => "Possible illness",
            HealthStatus::InHeat => "In heat",
            HealthStatus::PossiblePregnancy => "Possible pregnancy",
            HealthStatus::Healthy => "Healthy",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            HealthStatus::FeverEmergency | HealthStatus::PossibleIllness => Severity::Critical,
            HealthStatus::InHeat | HealthStatus::PossiblePregnancy => Severity::Notice,
            HealthStatus::Healthy => Severity::Normal,
        }
    }
}

/// Assess health from body temperature (°C) and heart rate (BPM).
///
/// Rules are evaluated first-match in order; a missing reading fails every
/// numeric comparison, so an all-`None` record falls through to `Healthy`.
/// Ranges come from the veterinary defaults of the original deployment.
pub fn assess_health(object_temp: Option<f64>, heart_rate: Option<f64>) -> HealthStatus {
    let temp_over = |limit: f64| object_temp.is_some_and(|t| t > limit);
    let temp_between = |lo: f64, hi: f64| object_temp.is_some_and(|t| t >= lo && t <= hi);
    let rate_over = |limit: f64| heart_rate.is_some_and(|hr| hr > limit);
    let rate_between = |lo: f64, hi: f64| heart_rate.is_some_and(|hr| hr >= lo && hr <= hi);

    if temp_over(40.5) || rate_over(90.0) {
        HealthStatus::FeverEmergency
    } else if temp_over(39.5) {
        HealthStatus::PossibleIllness
    } else if temp_between(38.0, 39.0) && rate_between(65.0, 85.0) {
        HealthStatus::InHeat
    } else if temp_between(37.0, 37.5) && rate_between(55.0, 65.0) {
        HealthStatus::PossiblePregnancy
    } else {
        HealthStatus::Healthy
    }
}

/// Movement interpretation from gyroscope magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Resting,
    ActiveRunning,
    Eating,
    Normal,
}

impl Movement {
    pub fn label(&self) -> &'static str {
        match self {
            Movement::Resting => "Resting",
            Movement::ActiveRunning => "Active/Running",
            Movement::Eating => "Eating",
            Movement::Normal => "Normal",
        }
    }
}

const QUIET_BASE: f64 = 5.0;
const ACTIVE_BASE: f64 = 60.0;

/// Classify movement from the three angular-rate components.
///
/// Missing components count as 0 toward the magnitude sum. The eating pose is
/// a controlled downward tilt: positive pitch with little roll.
pub fn classify_movement(
    gyro_x: Option<f64>,
    gyro_y: Option<f64>,
    gyro_z: Option<f64>,
) -> Movement {
    let gx = gyro_x.unwrap_or(0.0);
    let gy = gyro_y.unwrap_or(0.0);
    let gz = gyro_z.unwrap_or(0.0);

    let total = gx.abs() + gy.abs() + gz.abs();

    if total < QUIET_BASE * 3.0 {
        Movement::Resting
    } else if total > ACTIVE_BASE * 2.0 {
        Movement::ActiveRunning
    } else if gy > 20.0 && gx.abs() < 30.0 {
        Movement::Eating
    } else {
        Movement::Normal
    }
}
