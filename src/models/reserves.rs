use serde::{Deserialize, Serialize};

/// A course record already present in Leganto.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetCourseRecord {
    pub id: String,
    #[serde(default)]
    pub code: Option<String>,
}

/// Alma's `{value, desc}` pair; this job always writes both the same.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueDesc {
    pub value: String,
    pub desc: String,
}

impl ValueDesc {
    pub fn same(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            desc: value.clone(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instructor {
    /// `None` is written as `null` so the instructor slot is kept.
    pub primary_id: Option<String>,
}

/// Full-record replace body for `PUT /courses/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseUpdate {
    pub code: String,
    pub name: String,
    pub processing_department: ValueDesc,
    pub term: Vec<ValueDesc>,
    pub academic_department: ValueDesc,
    pub searchable_id: Vec<String>,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
    pub participants: u32,
    pub year: String,
    pub instructor: Vec<Instructor>,
}

pub const PROCESSING_DEPARTMENT: &str = "MAIN";
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// Leading segment of an external code, up to its first `_`.
pub fn searchable_id(code: &str) -> &str {
    code.split('_').next().unwrap_or(code)
}
