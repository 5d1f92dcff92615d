use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    filter::DirectoryView,
    models::{ChapterProgress, Document, Doubt, Student, StudentSubjects, WorkItem},
};

/// Replace the element with the same id in place, or append it. Returns true on replace.
pub fn upsert_by_id<T: Document>(items: &mut Vec<T>, item: T) -> bool {
    match items.iter_mut().find(|i| i.id() == item.id()) {
        Some(existing) => {
            *existing = item;
            true
        }
        None => {
            items.push(item);
            false
        }
    }
}

pub fn remove_by_id<T: Document>(items: &mut Vec<T>, id: &str) -> Option<T> {
    let index = items.iter().position(|i| i.id() == id)?;
    Some(items.remove(index))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Students,
    Subjects,
    Syllabus,
    WorkPool,
    Doubts,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Students => "Student Directory",
            Page::Subjects => "Subject Manager",
            Page::Syllabus => "Syllabus Progress",
            Page::WorkPool => "Work Pool",
            Page::Doubts => "Doubt Box",
        }
    }
}

/// Target of the student form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "mode", content = "student", rename_all = "camelCase")]
pub enum StudentForm {
    New,
    Edit(Student),
}

/// Everything the desk holds in memory.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub students: Vec<Student>,
    /// keyed by student id
    pub subjects: BTreeMap<String, StudentSubjects>,
    pub chapter_progress: Vec<ChapterProgress>,
    pub work_items: Vec<WorkItem>,
    pub doubts: Vec<Doubt>,

    pub page: Page,
    pub directory: DirectoryView,
    pub editing: Option<StudentForm>,
    /// Student open in the detail drawer
    pub viewing: Option<Student>,
}

impl AppState {
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    pub fn visible_students(&self) -> Vec<&Student> {
        self.directory.apply(&self.students)
    }

    pub fn navigate(&mut self, page: Page) {
        self.page = page;
    }

    pub fn open_new_student_form(&mut self) {
        self.editing = Some(StudentForm::New);
    }

    /// Leaves the drawer for the edit form.
    pub fn edit_student(&mut self, student: Student) {
        self.viewing = None;
        self.editing = Some(StudentForm::Edit(student));
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn view_student(&mut self, student: Student) {
        self.viewing = Some(student);
    }

    pub fn close_student(&mut self) {
        self.viewing = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_keeps_length_and_position() {
        let mut students = vec![
            Student::new("a", "A", "CBSE", 9, "X"),
            Student::new("b", "B", "CBSE", 9, "X"),
            Student::new("c", "C", "CBSE", 9, "X"),
        ];
        let replaced = upsert_by_id(&mut students, Student::new("b", "Bee", "ICSE", 10, "Y"));
        assert!(replaced);
        assert_eq!(students.len(), 3);
        assert_eq!(students[1].name, "Bee");

        let replaced = upsert_by_id(&mut students, Student::new("d", "D", "CBSE", 9, "X"));
        assert!(!replaced);
        assert_eq!(students.len(), 4);
        assert_eq!(students[3].id, "d");
    }

    #[test]
    fn test_remove_by_id() {
        let mut students = vec![
            Student::new("a", "A", "CBSE", 9, "X"),
            Student::new("b", "B", "CBSE", 9, "X"),
        ];
        assert_eq!(remove_by_id(&mut students, "a").map(|s| s.id), Some("a".to_string()));
        assert!(remove_by_id(&mut students, "a").is_none());
        assert_eq!(students.len(), 1);
    }

    #[test]
    fn test_edit_closes_drawer() {
        let mut state = AppState::default();
        let student = Student::new("a", "A", "CBSE", 9, "X");
        state.view_student(student.clone());
        state.edit_student(student.clone());
        assert!(state.viewing.is_none());
        assert_eq!(state.editing, Some(StudentForm::Edit(student)));
        state.cancel_edit();
        assert!(state.editing.is_none());

        state.navigate(Page::WorkPool);
        assert_eq!(state.page.title(), "Work Pool");
    }
}
