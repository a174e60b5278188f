//! # Relation Hydrator
//!
//! Resolves the group, teacher and subject references of loaded records into
//! embedded summaries. Lookups never fail the request: a group or teacher that
//! cannot be loaded is left out, a subject is replaced by a placeholder.
//!
//! A [`Hydrator`] remembers what it already looked up, so a listing touches
//! each referenced entity once.

use std::collections::HashMap;

use college_core::models::{
    group::{Group, GroupSummary},
    lesson::{Lesson, LessonView},
    schedule::{Schedule, ScheduleView},
    student::{Student, StudentView},
    subject::{Subject, SubjectSummary},
    teacher::{Teacher, TeacherSummary},
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::store::{from_document, Collection, DocumentStore, Filter};

pub struct Hydrator<'a> {
    store: &'a dyn DocumentStore,
    groups: HashMap<Uuid, Option<GroupSummary>>,
    teachers: HashMap<Uuid, Option<TeacherSummary>>,
    subjects: HashMap<Uuid, Option<SubjectSummary>>,
}

/// Loads one entity, treating store and decode failures as a miss.
async fn lookup<T: DeserializeOwned>(store: &dyn DocumentStore, collection: Collection, id: Uuid) -> Option<T> {
    match store.find_one(collection, &Filter::by_id(id)).await {
        Ok(Some(document)) => match from_document(document) {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::warn!(%collection, %id, "undecodable referenced record: {e}");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(%collection, %id, "reference lookup failed: {e}");
            None
        }
    }
}

impl<'a> Hydrator<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            groups: HashMap::new(),
            teachers: HashMap::new(),
            subjects: HashMap::new(),
        }
    }

    async fn group(&mut self, id: Uuid) -> Option<GroupSummary> {
        if let Some(cached) = self.groups.get(&id) {
            return cached.clone();
        }
        let summary = lookup::<Group>(self.store, Collection::Groups, id)
            .await
            .map(GroupSummary::from);
        self.groups.insert(id, summary.clone());
        summary
    }

    async fn teacher(&mut self, id: Uuid) -> Option<TeacherSummary> {
        if let Some(cached) = self.teachers.get(&id) {
            return cached.clone();
        }
        let summary = lookup::<Teacher>(self.store, Collection::Teachers, id)
            .await
            .map(TeacherSummary::from);
        self.teachers.insert(id, summary.clone());
        summary
    }

    async fn subject(&mut self, id: Option<Uuid>) -> SubjectSummary {
        let Some(id) = id else {
            return SubjectSummary::not_specified();
        };
        let summary = match self.subjects.get(&id) {
            Some(cached) => cached.clone(),
            None => {
                let summary = lookup::<Subject>(self.store, Collection::Subjects, id)
                    .await
                    .map(SubjectSummary::from);
                self.subjects.insert(id, summary.clone());
                summary
            }
        };
        summary.unwrap_or_else(|| SubjectSummary::not_found(id))
    }

    pub async fn student(&mut self, student: Student) -> StudentView {
        let group = self.group(student.group_id).await;
        StudentView { student, group }
    }

    pub async fn students(&mut self, students: Vec<Student>) -> Vec<StudentView> {
        let mut views = Vec::with_capacity(students.len());
        for student in students {
            views.push(self.student(student).await);
        }
        views
    }

    pub async fn schedule(&mut self, schedule: Schedule) -> ScheduleView {
        let group = self.group(schedule.group_id).await;
        let teacher = self.teacher(schedule.teacher_id).await;
        let subject = self.subject(schedule.subject_id).await;
        ScheduleView {
            schedule,
            group,
            teacher,
            subject,
        }
    }

    pub async fn schedules(&mut self, schedules: Vec<Schedule>) -> Vec<ScheduleView> {
        let mut views = Vec::with_capacity(schedules.len());
        for schedule in schedules {
            views.push(self.schedule(schedule).await);
        }
        views
    }

    pub async fn lesson(&mut self, lesson: Lesson) -> LessonView {
        let group = self.group(lesson.group_id).await;
        let teacher = self.teacher(lesson.teacher_id).await;
        let subject = self.subject(lesson.subject_id).await;
        LessonView {
            lesson,
            group,
            teacher,
            subject,
        }
    }

    pub async fn lessons(&mut self, lessons: Vec<Lesson>) -> Vec<LessonView> {
        let mut views = Vec::with_capacity(lessons.len());
        for lesson in lessons {
            views.push(self.lesson(lesson).await);
        }
        views
    }
}
