use std::{future::Future, sync::Arc};

use tracing::{error, info};

use crate::{
    error::Result,
    models::{ChapterProgress, Doubt, Student, StudentSubjects, SubjectData, WorkItem, WorkSource},
    reconcile::changed_doubts,
    repository::Repositories,
    state::{AppState, remove_by_id, upsert_by_id},
    store::DocumentStore,
    sync::Writer,
};

/// Owns the in-memory state and mediates every change to it.
///
/// Each mutation updates local state first, then hands the matching store
/// write to the [`Writer`]. Failed writes are reported and never rolled back,
/// so local and remote may drift apart until the next load.
pub struct Controller<S> {
    repos: Repositories<S>,
    writer: Writer,
    state: AppState,
}

impl<S: DocumentStore> Controller<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            repos: Repositories::new(store),
            writer: Writer::new(),
            state: AppState::default(),
        }
    }

    /// Fetch all five collections. A collection that fails to load starts empty.
    pub async fn load(store: Arc<S>) -> Self {
        let mut controller = Self::new(store);
        let repos = &controller.repos;
        let (students, subjects, chapter_progress, work_items, doubts) = tokio::join!(
            repos.students.get_all(),
            repos.subjects.get_all(),
            repos.chapter_progress.get_all(),
            repos.work_items.get_all(),
            repos.doubts.get_all(),
        );
        let state = &mut controller.state;
        state.students = loaded(students);
        state.subjects = loaded(subjects)
            .into_iter()
            .map(|s| (s.student_id.clone(), s))
            .collect();
        state.chapter_progress = loaded(chapter_progress);
        state.work_items = loaded(work_items);
        state.doubts = loaded(doubts);
        info!(
            "loaded {} students, {} work items, {} doubts",
            state.students.len(),
            state.work_items.len(),
            state.doubts.len()
        );
        controller.reconcile_doubts();
        controller
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// For selection and navigation changes, which never touch the store.
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn writer(&self) -> &Writer {
        &self.writer
    }

    /// Wait for every write issued so far. See [`Writer::flush`].
    pub fn flush(&self) -> impl Future<Output = ()> + Send + 'static {
        self.writer.flush()
    }

    /// Save from the student form: closes the form and opens the saved student.
    pub fn save_student(&mut self, student: Student) {
        upsert_by_id(&mut self.state.students, student.clone());
        self.state.editing = None;
        self.state.viewing = Some(student.clone());

        let repo = self.repos.students.clone();
        self.writer
            .spawn(format!("save student {}", student.id), async move {
                repo.upsert(&student).await
            });
    }

    /// Flip the archival flag. Returns false when the student is unknown.
    pub fn archive_student(&mut self, id: &str) -> bool {
        let Some(student) = self.state.students.iter_mut().find(|s| s.id == id) else {
            return false;
        };
        student.is_archived = !student.is_archived;
        let is_archived = student.is_archived;
        self.state.viewing = None;

        let repo = self.repos.students.clone();
        let id = id.to_string();
        self.writer
            .spawn(format!("archive student {id}"), async move {
                repo.set_archived(&id, is_archived).await
            });
        true
    }

    /// Returns false when the student was not held locally; the store delete is issued either way.
    pub fn delete_student(&mut self, id: &str) -> bool {
        let found = remove_by_id(&mut self.state.students, id).is_some();
        self.state.viewing = None;

        let repo = self.repos.students.clone();
        let id = id.to_string();
        self.writer
            .spawn(format!("delete student {id}"), async move { repo.delete(&id).await });
        found
    }

    pub fn save_subjects(&mut self, student_id: &str, subjects: Vec<SubjectData>) {
        let document = StudentSubjects {
            student_id: student_id.to_string(),
            subjects,
        };
        self.state
            .subjects
            .insert(document.student_id.clone(), document.clone());

        let repo = self.repos.subjects.clone();
        self.writer
            .spawn(format!("save subjects of {student_id}"), async move {
                repo.upsert(&document).await
            });
    }

    /// Progress without entries is removed instead of stored empty. The id is
    /// always derived from student, subject and chapter, a supplied one is ignored.
    pub fn save_chapter_progress(&mut self, mut progress: ChapterProgress) {
        progress.id =
            ChapterProgress::compose_id(&progress.student_id, &progress.subject, progress.chapter_no);
        let repo = self.repos.chapter_progress.clone();
        if progress.is_empty() {
            remove_by_id(&mut self.state.chapter_progress, &progress.id);
            self.writer
                .spawn(format!("delete chapter progress {}", progress.id), async move {
                    repo.delete(&progress.id).await
                });
        } else {
            upsert_by_id(&mut self.state.chapter_progress, progress.clone());
            self.writer
                .spawn(format!("save chapter progress {}", progress.id), async move {
                    repo.upsert(&progress).await
                });
        }
    }

    pub fn save_work_item(&mut self, item: WorkItem) {
        upsert_by_id(&mut self.state.work_items, item.clone());

        let repo = self.repos.work_items.clone();
        self.writer
            .spawn(format!("save work item {}", item.id), async move {
                repo.upsert(&item).await
            });
        self.reconcile_doubts();
    }

    pub fn delete_work_item(&mut self, id: &str) -> bool {
        let found = remove_by_id(&mut self.state.work_items, id).is_some();

        let repo = self.repos.work_items.clone();
        let id = id.to_string();
        self.writer
            .spawn(format!("delete work item {id}"), async move { repo.delete(&id).await });
        self.reconcile_doubts();
        found
    }

    pub fn save_doubt(&mut self, doubt: Doubt) {
        upsert_by_id(&mut self.state.doubts, doubt.clone());

        let repo = self.repos.doubts.clone();
        self.writer
            .spawn(format!("save doubt {}", doubt.id), async move {
                repo.upsert(&doubt).await
            });
    }

    /// Delete a doubt together with the task raised for it, if any.
    pub fn delete_doubt(&mut self, id: &str) -> bool {
        let linked = self
            .state
            .work_items
            .iter()
            .find(|item| item.is_linked_to(id) && item.source == WorkSource::Doubt)
            .map(|item| item.id.clone());
        if let Some(item_id) = &linked {
            remove_by_id(&mut self.state.work_items, item_id);
            let repo = self.repos.work_items.clone();
            let item_id = item_id.clone();
            self.writer
                .spawn(format!("delete linked work item {item_id}"), async move {
                    repo.delete(&item_id).await
                });
        }

        let found = remove_by_id(&mut self.state.doubts, id).is_some();
        let repo = self.repos.doubts.clone();
        let doubt_id = id.to_string();
        self.writer
            .spawn(format!("delete doubt {doubt_id}"), async move {
                repo.delete(&doubt_id).await
            });

        if linked.is_some() {
            self.reconcile_doubts();
        }
        found
    }

    /// Bring every doubt's status in line with the current work items and
    /// persist the ones that changed. Returns how many changed.
    pub fn reconcile_doubts(&mut self) -> usize {
        let changed = changed_doubts(&self.state.doubts, &self.state.work_items);
        for doubt in &changed {
            upsert_by_id(&mut self.state.doubts, doubt.clone());
            let repo = self.repos.doubts.clone();
            let doubt = doubt.clone();
            self.writer
                .spawn(format!("update status of doubt {}", doubt.id), async move {
                    repo.upsert(&doubt).await
                });
        }
        changed.len()
    }
}

fn loaded<T>(result: Result<Vec<T>>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        error!("initial load failed: {}", e);
        Vec::new()
    })
}
