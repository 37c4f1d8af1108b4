pub mod course;
pub mod reserves;

pub use course::{Account, ListedCourse, RejectedCourse, SourceCourse, Teacher, Term};
pub use reserves::{CourseUpdate, Instructor, TargetCourseRecord, ValueDesc};
