use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// A course as listed by Canvas for an account.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceCourse {
    pub id: u64,
    #[serde(default)]
    pub sis_course_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_students: u32,
    #[serde(default)]
    pub account: Option<Account>,
    #[serde(default)]
    pub term: Option<Term>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teachers: Vec<Teacher>,
}

impl SourceCourse {
    pub fn department(&self) -> &str {
        self.account.as_ref().map(|a| a.name.as_str()).unwrap_or("")
    }

    /// Code used in log lines; falls back to the Canvas id when there is no SIS code.
    pub fn display_code(&self) -> String {
        match &self.sis_course_id {
            Some(code) => code.clone(),
            None => format!("canvas:{}", self.id),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Term {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub end_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Teacher {
    pub id: u64,
}

/// A listing entry that could not be read as a `SourceCourse`.
#[derive(Debug)]
pub struct RejectedCourse {
    pub code: String,
    pub error: AppError,
}

/// One entry of a Canvas course listing.
pub type ListedCourse = Result<SourceCourse, RejectedCourse>;

/// Canvas sends `null` for counts and names it has no value for.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
