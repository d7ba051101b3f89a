use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::Utc;
use lms_engine::{
    db_types::{Enrollment, Note},
    traits::{StudentSummary, ToggleOutcome},
    StudentApi,
};

use super::{
    helpers::{get_request, post_request},
    mocks::MockBackend,
};
use crate::{
    data_objects::{CompletedLessonToggle, NoteUpsert},
    routes::{LessonToggleRoute, NoteCreateRoute, NoteListRoute, StudentCourseRoute, StudentSummaryRoute},
};

fn configure_students(mock: MockBackend) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        let api = StudentApi::new(mock);
        cfg.service(StudentSummaryRoute::<MockBackend>::new())
            .service(StudentCourseRoute::<MockBackend>::new())
            .service(LessonToggleRoute::<MockBackend>::new())
            .service(NoteListRoute::<MockBackend>::new())
            .service(NoteCreateRoute::<MockBackend>::new())
            .app_data(web::Data::new(api));
    }
}

fn sample_enrollment(user_id: i64, enrollment_id: &str, course_id: i64) -> Enrollment {
    Enrollment {
        id: 1,
        enrollment_id: enrollment_id.to_string(),
        user_id,
        course_id,
        teacher_id: 7,
        order_item_id: 1,
        created_at: Utc::now(),
    }
}

#[actix_web::test]
async fn the_summary_reports_course_and_lesson_counts() {
    let mut mock = MockBackend::new();
    mock.expect_fetch_summary()
        .withf(|user_id| *user_id == 100)
        .returning(|_| Ok(StudentSummary { total_courses: 3, completed_lessons: 17 }));
    let (status, body) = get_request("/student/100/summary", configure_students(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""total_courses":3"#));
    assert!(body.contains(r#""completed_lessons":17"#));
}

#[actix_web::test]
async fn another_students_enrollment_id_is_a_404() {
    let mut mock = MockBackend::new();
    mock.expect_fetch_enrollment().returning(|_, _| Ok(None));
    let (status, body) = get_request("/student/100/courses/AbCd1234AbCd1234", configure_students(mock)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Enrollment 'AbCd1234AbCd1234' does not exist"));
}

#[actix_web::test]
async fn toggling_a_lesson_reports_the_new_state() {
    let mut mock = MockBackend::new();
    mock.expect_fetch_lesson().returning(|id| {
        Ok(Some(lms_engine::db_types::Lesson { id, course_id: 42, title: "Intro".to_string(), duration_secs: 300 }))
    });
    mock.expect_toggle_completed_lesson().returning(|_, _, _| Ok(ToggleOutcome::Added));
    let toggle = CompletedLessonToggle { user_id: 100, course_id: 42, lesson_id: 9 };
    let (status, body) = post_request("/student/lesson-toggle", &toggle, configure_students(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Lesson marked as complete"));
}

#[actix_web::test]
async fn a_lesson_from_another_course_cannot_be_toggled() {
    let mut mock = MockBackend::new();
    mock.expect_fetch_lesson().returning(|id| {
        Ok(Some(lms_engine::db_types::Lesson { id, course_id: 999, title: "Intro".to_string(), duration_secs: 300 }))
    });
    let toggle = CompletedLessonToggle { user_id: 100, course_id: 42, lesson_id: 9 };
    let (status, body) = post_request("/student/lesson-toggle", &toggle, configure_students(mock)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Lesson 9 does not exist"));
}

#[actix_web::test]
async fn notes_are_listed_through_the_enrollment() {
    let mut mock = MockBackend::new();
    mock.expect_fetch_enrollment()
        .withf(|user_id, enrollment_id| *user_id == 100 && enrollment_id == "AbCd1234AbCd1234")
        .returning(|user_id, enrollment_id| Ok(Some(sample_enrollment(user_id, enrollment_id, 42))));
    mock.expect_fetch_notes().withf(|user_id, course_id| *user_id == 100 && *course_id == 42).returning(
        |user_id, course_id| {
            Ok(vec![Note {
                id: 1,
                user_id,
                course_id,
                title: "Ownership".to_string(),
                body: "Borrowing rules".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }])
        },
    );
    let (status, body) = get_request("/student/100/AbCd1234AbCd1234/notes", configure_students(mock)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""title":"Ownership""#));
}

#[actix_web::test]
async fn a_note_cannot_be_created_without_an_enrollment() {
    let mut mock = MockBackend::new();
    mock.expect_fetch_enrollment().returning(|_, _| Ok(None));
    let upsert = NoteUpsert { title: "Ownership".to_string(), body: "Borrowing rules".to_string() };
    let (status, _) = post_request("/student/100/AbCd1234AbCd1234/notes", &upsert, configure_students(mock)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
