use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Student;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FilterField {
    Board,
    Grade,
    Batch,
}

/// What the student directory shows. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DirectoryView {
    /// Show archived students instead of active ones
    pub show_archived: bool,
    pub board: String,
    /// Compared against the grade number rendered as text
    pub grade: String,
    pub batch: String,
    /// Case-insensitive substring of the student's name
    pub search: String,
}

impl DirectoryView {
    pub fn matches(&self, student: &Student) -> bool {
        if student.is_archived != self.show_archived {
            return false;
        }
        if !self.board.is_empty() && student.board != self.board {
            return false;
        }
        if !self.grade.is_empty() && student.grade.to_string() != self.grade {
            return false;
        }
        if !self.batch.is_empty() && student.batch != self.batch {
            return false;
        }
        if !self.search.is_empty()
            && !student
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
        {
            return false;
        }
        true
    }

    pub fn apply<'a>(&self, students: &'a [Student]) -> Vec<&'a Student> {
        students.iter().filter(|s| self.matches(s)).collect()
    }

    pub fn set_filter(&mut self, field: FilterField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FilterField::Board => self.board = value,
            FilterField::Grade => self.grade = value,
            FilterField::Batch => self.batch = value,
        }
    }

    /// Clears filters and search, keeps the archived toggle.
    pub fn clear_filters(&mut self) {
        self.board.clear();
        self.grade.clear();
        self.batch.clear();
        self.search.clear();
    }

    pub fn toggle_archived(&mut self) {
        self.show_archived = !self.show_archived;
    }
}
