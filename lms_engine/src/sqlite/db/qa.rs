use log::debug;
use sqlx::SqliteConnection;

use crate::db_types::{Question, QuestionMessage, QuestionThread};

pub async fn fetch_questions_for_course(
    course_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<QuestionThread>, sqlx::Error> {
    let questions: Vec<Question> =
        sqlx::query_as("SELECT * FROM questions WHERE course_id = $1 ORDER BY created_at DESC, id DESC")
            .bind(course_id)
            .fetch_all(&mut *conn)
            .await?;
    let mut threads = Vec::with_capacity(questions.len());
    for question in questions {
        let messages = fetch_messages(question.id, &mut *conn).await?;
        threads.push(QuestionThread { question, messages });
    }
    Ok(threads)
}

pub async fn fetch_question_by_qa_id(
    qa_id: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Question>, sqlx::Error> {
    let question = sqlx::query_as("SELECT * FROM questions WHERE qa_id = $1").bind(qa_id).fetch_optional(conn).await?;
    Ok(question)
}

pub async fn fetch_messages(question_id: i64, conn: &mut SqliteConnection) -> Result<Vec<QuestionMessage>, sqlx::Error> {
    let messages = sqlx::query_as("SELECT * FROM question_messages WHERE question_id = $1 ORDER BY created_at ASC, id ASC")
        .bind(question_id)
        .fetch_all(conn)
        .await?;
    Ok(messages)
}

pub async fn insert_question(
    qa_id: &str,
    user_id: i64,
    course_id: i64,
    title: &str,
    conn: &mut SqliteConnection,
) -> Result<Question, sqlx::Error> {
    let question: Question =
        sqlx::query_as("INSERT INTO questions (qa_id, user_id, course_id, title) VALUES ($1, $2, $3, $4) RETURNING *")
            .bind(qa_id)
            .bind(user_id)
            .bind(course_id)
            .bind(title)
            .fetch_one(conn)
            .await?;
    debug!("🗃️💬️ Question [{}] inserted with id {}", question.qa_id, question.id);
    Ok(question)
}

pub async fn insert_message(
    question_id: i64,
    user_id: i64,
    course_id: i64,
    body: &str,
    conn: &mut SqliteConnection,
) -> Result<QuestionMessage, sqlx::Error> {
    let message = sqlx::query_as(
        "INSERT INTO question_messages (question_id, user_id, course_id, body) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(question_id)
    .bind(user_id)
    .bind(course_id)
    .bind(body)
    .fetch_one(conn)
    .await?;
    Ok(message)
}
