// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, Time};

/// Stable identifier of a persisted assignment.
///
/// Identifiers are issued by the record store when an assignment is appended
/// and are never reused, not even after the assignment is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId(i64);

impl AssignmentId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A course (class group) that assignments are scheduled against.
///
/// Course identity ignores ASCII case, matching `CourseCatalog::resolve`, so
/// a stored `third` and a submitted `Third` count against the same day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    name: String,
}

impl PartialEq for Course {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for Course {}

impl std::hash::Hash for Course {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for byte in self.folded() {
            state.write_u8(byte);
        }
        state.write_u8(0xff);
    }
}

impl PartialOrd for Course {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Course {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.folded().cmp(other.folded())
    }
}

impl Course {
    /// Creates a new `Course`. Surrounding whitespace is dropped.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.trim().to_string(),
        }
    }

    /// Returns the course name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn folded(&self) -> impl Iterator<Item = u8> + '_ {
        self.name.bytes().map(|b| b.to_ascii_lowercase())
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The configured enumeration of courses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseCatalog {
    courses: Vec<Course>,
}

impl CourseCatalog {
    /// Creates a catalog from course names.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, contains an empty name, or
    /// names the same course twice (case-insensitively).
    pub fn new<I, S>(names: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut courses: Vec<Course> = Vec::new();
        for name in names {
            let course: Course = Course::new(name.as_ref());
            if course.name().is_empty() {
                return Err(DomainError::InvalidCourseCatalog(String::from(
                    "Course names cannot be empty",
                )));
            }
            if courses
                .iter()
                .any(|c| c.name().eq_ignore_ascii_case(course.name()))
            {
                return Err(DomainError::InvalidCourseCatalog(format!(
                    "Course '{}' is listed more than once",
                    course.name()
                )));
            }
            courses.push(course);
        }

        if courses.is_empty() {
            return Err(DomainError::InvalidCourseCatalog(String::from(
                "At least one course is required",
            )));
        }

        Ok(Self { courses })
    }

    /// Resolves user input to the canonical catalog entry.
    ///
    /// Matching ignores surrounding whitespace and ASCII case.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownCourse` if no catalog entry matches.
    pub fn resolve(&self, name: &str) -> Result<Course, DomainError> {
        let wanted: &str = name.trim();
        self.courses
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .cloned()
            .ok_or_else(|| DomainError::UnknownCourse {
                course: name.to_string(),
            })
    }

    /// Returns whether the course is part of this catalog.
    #[must_use]
    pub fn contains(&self, course: &Course) -> bool {
        self.resolve(course.name()).is_ok()
    }

    /// Returns the courses in configured order.
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self {
            courses: ["First", "Second", "Third", "Fourth", "Fifth"]
                .iter()
                .map(|name| Course::new(name))
                .collect(),
        }
    }
}

/// A school subject such as "Math" or "Science".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subject {
    value: String,
}

impl Subject {
    /// Creates a new `Subject`. Surrounding whitespace is dropped.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the subject name.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns whether two subjects name the same subject, ignoring case.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.value.to_lowercase() == other.value.to_lowercase()
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The kind of work an assignment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    /// Reading assignment.
    Reading,
    /// Practice exercise.
    Exercise,
    /// Longer-running project.
    Project,
    /// Exam or test.
    Exam,
    /// Presentation in front of the class.
    Presentation,
}

impl TaskType {
    /// All task types in display order.
    pub const ALL: [Self; 5] = [
        Self::Reading,
        Self::Exercise,
        Self::Project,
        Self::Exam,
        Self::Presentation,
    ];

    /// Converts this task type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reading => "Reading",
            Self::Exercise => "Exercise",
            Self::Project => "Project",
            Self::Exam => "Exam",
            Self::Presentation => "Presentation",
        }
    }
}

impl FromStr for TaskType {
    type Err = DomainError;

    /// Parses English names case-insensitively, plus the Spanish labels used
    /// by the legacy spreadsheets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reading" | "lectura" => Ok(Self::Reading),
            "exercise" | "ejercicio" => Ok(Self::Exercise),
            "project" | "proyecto" => Ok(Self::Project),
            "exam" | "examen" => Ok(Self::Exam),
            "presentation" | "presentación" | "presentacion" => Ok(Self::Presentation),
            _ => Err(DomainError::InvalidTaskType(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Actor roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A teacher responsible for exactly one subject.
    Teacher,
    /// Override role: exempt from the daily quota, may view and delete
    /// any assignment.
    Coordinator,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Teacher => "teacher",
            Self::Coordinator => "coordinator",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "teacher" => Ok(Self::Teacher),
            "coordinator" => Ok(Self::Coordinator),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An authenticated identity.
///
/// Actors are supplied by the authentication collaborator and passed
/// explicitly into every operation. Teachers carry exactly one subject;
/// coordinators carry none and are treated as covering all subjects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    login: String,
    display_name: String,
    role: Role,
    subject: Option<Subject>,
}

impl Actor {
    /// Creates a teacher actor.
    #[must_use]
    pub fn teacher(login: &str, display_name: &str, subject: Subject) -> Self {
        Self {
            login: login.to_string(),
            display_name: display_name.to_string(),
            role: Role::Teacher,
            subject: Some(subject),
        }
    }

    /// Creates a coordinator actor.
    #[must_use]
    pub fn coordinator(login: &str, display_name: &str) -> Self {
        Self {
            login: login.to_string(),
            display_name: display_name.to_string(),
            role: Role::Coordinator,
            subject: None,
        }
    }

    /// Returns the login the actor authenticated with.
    #[must_use]
    pub fn login(&self) -> &str {
        &self.login
    }

    /// Returns the display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the assigned subject. `None` for coordinators.
    #[must_use]
    pub const fn subject(&self) -> Option<&Subject> {
        self.subject.as_ref()
    }

    /// Returns whether this actor holds the override role.
    #[must_use]
    pub const fn is_coordinator(&self) -> bool {
        matches!(self.role, Role::Coordinator)
    }
}

/// A validated assignment that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssignment {
    /// The day the work is due.
    pub due_date: Date,
    /// Optional time of day on the due date.
    pub due_time: Option<Time>,
    /// The course the work is assigned to.
    pub course: Course,
    /// The subject the work belongs to.
    pub subject: Subject,
    /// The teacher who assigned the work, as entered.
    pub teacher_name: String,
    /// The kind of work.
    pub task_type: TaskType,
    /// Estimated effort in minutes.
    pub duration_minutes: Option<u16>,
    /// Free-text description.
    pub description: String,
}

impl NewAssignment {
    /// Attaches a store-issued identifier.
    #[must_use]
    pub fn with_id(self, id: AssignmentId) -> Assignment {
        Assignment {
            id,
            due_date: self.due_date,
            due_time: self.due_time,
            course: self.course,
            subject: self.subject,
            teacher_name: self.teacher_name,
            task_type: self.task_type,
            duration_minutes: self.duration_minutes,
            description: self.description,
        }
    }
}

/// A persisted assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// The store-issued identifier.
    pub id: AssignmentId,
    /// The day the work is due.
    pub due_date: Date,
    /// Optional time of day on the due date.
    pub due_time: Option<Time>,
    /// The course the work is assigned to.
    pub course: Course,
    /// The subject the work belongs to.
    pub subject: Subject,
    /// The teacher who assigned the work, as entered.
    pub teacher_name: String,
    /// The kind of work.
    pub task_type: TaskType,
    /// Estimated effort in minutes.
    pub duration_minutes: Option<u16>,
    /// Free-text description.
    pub description: String,
}

impl Assignment {
    /// Returns whether this assignment falls on the given course and day.
    ///
    /// Only the date component is compared; the time of day is ignored.
    #[must_use]
    pub fn is_on(&self, course: &Course, date: Date) -> bool {
        self.course == *course && self.due_date == date
    }
}

/// An unvalidated submission, as collected by the UI shell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentDraft {
    /// Course name.
    pub course: String,
    /// Due date, `YYYY-MM-DD`.
    pub due_date: String,
    /// Optional time of day, `HH:MM`.
    #[serde(default)]
    pub due_time: Option<String>,
    /// Subject name.
    pub subject: String,
    /// Teacher name.
    pub teacher_name: String,
    /// Task type name.
    pub task_type: String,
    /// Estimated effort in minutes.
    #[serde(default)]
    pub duration_minutes: Option<u16>,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}
