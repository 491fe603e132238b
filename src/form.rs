//! Input form state: five bounded controls with a focus cursor.

use serde_json::{Map, Value};

use crate::features::{ATTENDANCE, MENTAL_HEALTH, PART_TIME_JOB, SLEEP_HOURS, STUDY_HOURS};

/// A bounded numeric control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl Slider {
    fn nudge(&self, value: f64, steps: f64) -> f64 {
        let moved = value + steps * self.step;
        ((moved / self.step).round() * self.step).clamp(self.min, self.max)
    }
}

pub const STUDY_HOURS_SLIDER: Slider = Slider {
    label: "Study Hours per Day",
    min: 0.0,
    max: 12.0,
    step: 0.25,
    default: 4.0,
};

pub const ATTENDANCE_SLIDER: Slider = Slider {
    label: "Attendance Percentage (%)",
    min: 0.0,
    max: 100.0,
    step: 1.0,
    default: 85.0,
};

pub const SLEEP_HOURS_SLIDER: Slider = Slider {
    label: "Sleep Hours per Night",
    min: 0.0,
    max: 12.0,
    step: 0.25,
    default: 7.0,
};

pub const MENTAL_HEALTH_SLIDER: Slider = Slider {
    label: "Mental Health Rating (1-10)",
    min: 1.0,
    max: 10.0,
    step: 1.0,
    default: 6.0,
};

pub const PART_TIME_JOB_LABEL: &str = "Part-Time Job";
pub const PART_TIME_JOB_OPTIONS: [&str; 2] = ["No", "Yes"];

/// Which control has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    StudyHours,
    Attendance,
    SleepHours,
    MentalHealth,
    PartTimeJob,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::StudyHours,
        Field::Attendance,
        Field::SleepHours,
        Field::MentalHealth,
        Field::PartTimeJob,
    ];

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn slider(self) -> Option<&'static Slider> {
        match self {
            Field::StudyHours => Some(&STUDY_HOURS_SLIDER),
            Field::Attendance => Some(&ATTENDANCE_SLIDER),
            Field::SleepHours => Some(&SLEEP_HOURS_SLIDER),
            Field::MentalHealth => Some(&MENTAL_HEALTH_SLIDER),
            Field::PartTimeJob => None,
        }
    }

    pub fn label(self) -> &'static str {
        self.slider().map_or(PART_TIME_JOB_LABEL, |s| s.label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub study_hours: f64,
    pub attendance: f64,
    pub sleep_hours: f64,
    pub mental_health: i64,
    pub part_time_job: bool,
    focus: Field,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            study_hours: STUDY_HOURS_SLIDER.default,
            attendance: ATTENDANCE_SLIDER.default,
            sleep_hours: SLEEP_HOURS_SLIDER.default,
            mental_health: MENTAL_HEALTH_SLIDER.default as i64,
            part_time_job: false,
            focus: Field::StudyHours,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn focus_next(&mut self) {
        let i = (self.focus.index() + 1) % Field::ALL.len();
        self.focus = Field::ALL[i];
    }

    pub fn focus_prev(&mut self) {
        let n = Field::ALL.len();
        let i = (self.focus.index() + n - 1) % n;
        self.focus = Field::ALL[i];
    }

    pub fn increase(&mut self) {
        self.adjust(1.0);
    }

    pub fn decrease(&mut self) {
        self.adjust(-1.0);
    }

    fn adjust(&mut self, steps: f64) {
        match self.focus {
            Field::StudyHours => self.study_hours = STUDY_HOURS_SLIDER.nudge(self.study_hours, steps),
            Field::Attendance => self.attendance = ATTENDANCE_SLIDER.nudge(self.attendance, steps),
            Field::SleepHours => self.sleep_hours = SLEEP_HOURS_SLIDER.nudge(self.sleep_hours, steps),
            Field::MentalHealth => {
                let v = MENTAL_HEALTH_SLIDER.nudge(self.mental_health as f64, steps);
                self.mental_health = v as i64;
            }
            Field::PartTimeJob => self.part_time_job = !self.part_time_job,
        }
    }

    pub fn part_time_job_label(&self) -> &'static str {
        PART_TIME_JOB_OPTIONS[usize::from(self.part_time_job)]
    }

    /// Current value of `field` as shown next to its label.
    pub fn display(&self, field: Field) -> String {
        match field {
            Field::StudyHours => format!("{:.2}", self.study_hours),
            Field::Attendance => format!("{:.0}", self.attendance),
            Field::SleepHours => format!("{:.2}", self.sleep_hours),
            Field::MentalHealth => self.mental_health.to_string(),
            Field::PartTimeJob => self.part_time_job_label().to_string(),
        }
    }

    /// Position of a slider within its bounds, for drawing. `None` for the radio.
    pub fn fraction(&self, field: Field) -> Option<f64> {
        let slider = field.slider()?;
        let value = match field {
            Field::StudyHours => self.study_hours,
            Field::Attendance => self.attendance,
            Field::SleepHours => self.sleep_hours,
            Field::MentalHealth => self.mental_health as f64,
            Field::PartTimeJob => return None,
        };
        Some((value - slider.min) / (slider.max - slider.min))
    }

    /// The row handed to coercion, in canonical order.
    pub fn submission(&self) -> Map<String, Value> {
        let mut row = Map::new();
        row.insert(STUDY_HOURS.into(), Value::from(self.study_hours));
        row.insert(ATTENDANCE.into(), Value::from(self.attendance));
        row.insert(SLEEP_HOURS.into(), Value::from(self.sleep_hours));
        row.insert(MENTAL_HEALTH.into(), Value::from(self.mental_health));
        row.insert(PART_TIME_JOB.into(), Value::from(i64::from(self.part_time_job)));
        row
    }
}
