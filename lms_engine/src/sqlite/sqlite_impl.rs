//! `SqliteDatabase` is a concrete implementation of the course marketplace backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the
//! [`crate::traits`] module.
use std::fmt::Debug;

use lms_common::Cents;
use log::*;
use sqlx::SqlitePool;

use super::db::{carts, catalog, coupons, db_url, new_pool, orders, qa, students};
use crate::{
    api::order_objects::{CouponOutcome, NewOrderRequest, PaymentConfirmation},
    db_types::{
        CartItem,
        Category,
        Country,
        Coupon,
        Course,
        Enrollment,
        Lesson,
        NewCartItem,
        NewNote,
        NewReview,
        Note,
        NotificationKind,
        Order,
        OrderItem,
        OrderOid,
        PaymentStatus,
        QuestionThread,
        Review,
        WishlistEntry,
    },
    helpers::new_public_id,
    traits::{
        CartApiError,
        CartManagement,
        CatalogApiError,
        CatalogManagement,
        CheckoutDatabase,
        OrderFlowError,
        StudentApiError,
        StudentRecords,
        StudentSummary,
        ToggleOutcome,
    },
};

const ORDER_OID_LEN: usize = 12;
const ENROLLMENT_ID_LEN: usize = 16;
const QA_ID_LEN: usize = 16;

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Creates a new database api object, connecting to the database at the url specified by the
    /// `LMS_DATABASE_URL` environment variable, or the default.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        Self::new_with_url(&url, max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub async fn close(&mut self) -> Result<(), sqlx::Error> {
        self.pool.close().await;
        Ok(())
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let categories = catalog::fetch_categories(&mut conn).await?;
        Ok(categories)
    }

    async fn fetch_published_courses(&self) -> Result<Vec<Course>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let courses = catalog::fetch_published_courses(&mut conn).await?;
        Ok(courses)
    }

    async fn fetch_course_by_slug(&self, slug: &str) -> Result<Option<Course>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let course = catalog::fetch_course_by_slug(slug, &mut conn).await?;
        Ok(course)
    }

    async fn fetch_course_by_id(&self, course_id: i64) -> Result<Option<Course>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let course = catalog::fetch_course_by_id(course_id, &mut conn).await?;
        Ok(course)
    }

    async fn search_courses(&self, query: &str) -> Result<Vec<Course>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let courses = catalog::search_courses(query, &mut conn).await?;
        Ok(courses)
    }

    async fn fetch_country_by_name(&self, name: &str) -> Result<Option<Country>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let country = catalog::fetch_country_by_name(name, &mut conn).await?;
        Ok(country)
    }

    async fn fetch_lesson(&self, lesson_id: i64) -> Result<Option<Lesson>, CatalogApiError> {
        let mut conn = self.pool.acquire().await?;
        let lesson = catalog::fetch_lesson(lesson_id, &mut conn).await?;
        Ok(lesson)
    }
}

impl CartManagement for SqliteDatabase {
    async fn upsert_cart_item(&self, item: NewCartItem) -> Result<(CartItem, bool), CartApiError> {
        let mut tx = self.pool.begin().await?;
        let result = carts::upsert_cart_item(item, &mut tx).await?;
        tx.commit().await?;
        Ok(result)
    }

    async fn fetch_cart_items(&self, cart_id: &str) -> Result<Vec<CartItem>, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        let items = carts::fetch_cart_items(cart_id, &mut conn).await?;
        Ok(items)
    }

    async fn delete_cart_item(&self, cart_id: &str, item_id: i64) -> Result<bool, CartApiError> {
        let mut conn = self.pool.acquire().await?;
        let deleted = carts::delete_cart_item(cart_id, item_id, &mut conn).await?;
        Ok(deleted)
    }
}

impl CheckoutDatabase for SqliteDatabase {
    /// Builds the order header and copies the cart lines into order items inside a single
    /// transaction. A course appearing on more than one cart line lands in the order exactly
    /// once; totals are accumulated from the persisted items only.
    async fn create_order_from_cart(&self, req: NewOrderRequest) -> Result<Order, OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        let cart_items = carts::fetch_cart_items(&req.cart_id, &mut tx).await?;
        if cart_items.is_empty() {
            return Err(OrderFlowError::CartEmpty(req.cart_id));
        }
        let oid = OrderOid(new_public_id(ORDER_OID_LEN));
        let user_id = (!req.is_guest()).then_some(req.user_id);
        let order = orders::insert_order(&oid, user_id, &req.full_name, &req.email, &req.country, &mut tx).await?;
        let mut sub_total = Cents::default();
        let mut tax_fee = Cents::default();
        let mut total = Cents::default();
        for line in cart_items {
            if orders::order_has_course(order.id, line.course_id, &mut tx).await? {
                trace!("🗃️📦️ Course #{} is already on order {oid}. Skipping duplicate cart line", line.course_id);
                continue;
            }
            let course = catalog::fetch_course_by_id(line.course_id, &mut tx)
                .await?
                .ok_or(OrderFlowError::DatabaseError(format!("Cart line references missing course {}", line.course_id)))?;
            let item = orders::insert_order_item(
                order.id,
                line.course_id,
                course.teacher_id,
                line.price,
                line.tax_fee,
                line.total,
                &mut tx,
            )
            .await?;
            sub_total += item.price;
            tax_fee += item.tax_fee;
            total += item.total;
        }
        let order = orders::set_order_totals(order.id, sub_total, tax_fee, total, &mut tx).await?;
        tx.commit().await?;
        Ok(order)
    }

    async fn fetch_order_by_oid(&self, oid: &OrderOid) -> Result<Option<Order>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_by_oid(oid, &mut conn).await?;
        Ok(order)
    }

    async fn fetch_order_items(&self, order_id: i64) -> Result<Vec<OrderItem>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        let items = orders::fetch_order_items(order_id, &mut conn).await?;
        Ok(items)
    }

    async fn fetch_coupon_by_code(&self, code: &str) -> Result<Option<Coupon>, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        let coupon = coupons::fetch_coupon_by_code(code, &mut conn).await?;
        Ok(coupon)
    }

    async fn apply_coupon_to_order(&self, oid: &OrderOid, code: &str) -> Result<CouponOutcome, OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::fetch_order_by_oid(oid, &mut tx).await?.ok_or_else(|| OrderFlowError::OrderNotFound(oid.clone()))?;
        let coupon =
            coupons::fetch_coupon_by_code(code, &mut tx).await?.ok_or_else(|| OrderFlowError::CouponNotFound(code.to_string()))?;
        let user_id = order.user_id.ok_or_else(|| OrderFlowError::GuestOrder(oid.clone()))?;
        let items = coupons::fetch_items_for_teacher(order.id, coupon.teacher_id, &mut tx).await?;
        if items.is_empty() {
            return Err(OrderFlowError::CouponNotApplicable(code.to_string()));
        }
        let mut discount = Cents::default();
        let mut applied = 0usize;
        for item in &items {
            if coupons::item_has_coupon(item.id, coupon.id, &mut tx).await? {
                continue;
            }
            let line_discount = item.total.percent(coupon.discount_percent as f64);
            coupons::apply_coupon_to_item(item.id, coupon.id, line_discount, &mut tx).await?;
            discount += line_discount;
            applied += 1;
        }
        if applied == 0 {
            tx.commit().await?;
            return Ok(CouponOutcome::AlreadyApplied { order });
        }
        let order = orders::apply_discount_to_order(order.id, discount, &mut tx).await?;
        coupons::record_coupon_user(coupon.id, user_id, &mut tx).await?;
        tx.commit().await?;
        Ok(CouponOutcome::Applied { order, discount })
    }

    async fn set_card_session_id(&self, oid: &OrderOid, session_id: &str) -> Result<Order, OrderFlowError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::set_card_session_id(oid, session_id, &mut conn)
            .await?
            .ok_or_else(|| OrderFlowError::OrderNotFound(oid.clone()))?;
        Ok(order)
    }

    /// Marks the order paid and fans out enrollments and notifications atomically. An order
    /// that is already `Paid` short-circuits without any writes.
    async fn confirm_order_paid(&self, oid: &OrderOid) -> Result<PaymentConfirmation, OrderFlowError> {
        let mut tx = self.pool.begin().await?;
        let order = orders::fetch_order_by_oid(oid, &mut tx).await?.ok_or_else(|| OrderFlowError::OrderNotFound(oid.clone()))?;
        if order.payment_status == PaymentStatus::Paid {
            return Ok(PaymentConfirmation { order, newly_paid: false, enrollments: Vec::new() });
        }
        let order = orders::mark_order_paid(order.id, &mut tx).await?;
        let items = orders::fetch_order_items(order.id, &mut tx).await?;
        if order.user_id.is_some() {
            orders::insert_notification(
                NotificationKind::CourseEnrollmentCompleted,
                order.user_id,
                None,
                order.id,
                None,
                &mut tx,
            )
            .await?;
        }
        let mut enrollments = Vec::with_capacity(items.len());
        for item in &items {
            orders::insert_notification(
                NotificationKind::NewOrder,
                None,
                Some(item.teacher_id),
                order.id,
                Some(item.id),
                &mut tx,
            )
            .await?;
            if let Some(user_id) = order.user_id {
                let enrollment_id = new_public_id(ENROLLMENT_ID_LEN);
                let enrollment = orders::insert_enrollment(
                    &enrollment_id,
                    user_id,
                    item.course_id,
                    item.teacher_id,
                    item.id,
                    &mut tx,
                )
                .await?;
                enrollments.push(enrollment);
            }
        }
        tx.commit().await?;
        debug!("🗃️✅️ Order {oid} fulfilled with {} enrollments", enrollments.len());
        Ok(PaymentConfirmation { order, newly_paid: true, enrollments })
    }
}

impl StudentRecords for SqliteDatabase {
    async fn fetch_summary(&self, user_id: i64) -> Result<StudentSummary, StudentApiError> {
        let mut conn = self.pool.acquire().await?;
        let summary = students::fetch_summary(user_id, &mut conn).await?;
        Ok(summary)
    }

    async fn fetch_enrollments_for_user(&self, user_id: i64) -> Result<Vec<Enrollment>, StudentApiError> {
        let mut conn = self.pool.acquire().await?;
        let enrollments = students::fetch_enrollments_for_user(user_id, &mut conn).await?;
        Ok(enrollments)
    }

    async fn fetch_enrollment(
        &self,
        user_id: i64,
        enrollment_id: &str,
    ) -> Result<Option<Enrollment>, StudentApiError> {
        let mut conn = self.pool.acquire().await?;
        let enrollment = students::fetch_enrollment(user_id, enrollment_id, &mut conn).await?;
        Ok(enrollment)
    }

    async fn toggle_completed_lesson(
        &self,
        user_id: i64,
        course_id: i64,
        lesson_id: i64,
    ) -> Result<ToggleOutcome, StudentApiError> {
        let mut tx = self.pool.begin().await?;
        let outcome = if students::completed_lesson_exists(user_id, course_id, lesson_id, &mut tx).await? {
            students::delete_completed_lesson(user_id, course_id, lesson_id, &mut tx).await?;
            ToggleOutcome::Removed
        } else {
            students::insert_completed_lesson(user_id, course_id, lesson_id, &mut tx).await?;
            ToggleOutcome::Added
        };
        tx.commit().await?;
        Ok(outcome)
    }

    async fn toggle_wishlist(&self, user_id: i64, course_id: i64) -> Result<ToggleOutcome, StudentApiError> {
        let mut tx = self.pool.begin().await?;
        let outcome = match students::fetch_wishlist_entry(user_id, course_id, &mut tx).await? {
            Some(_) => {
                students::delete_wishlist_entry(user_id, course_id, &mut tx).await?;
                ToggleOutcome::Removed
            },
            None => {
                students::insert_wishlist_entry(user_id, course_id, &mut tx).await?;
                ToggleOutcome::Added
            },
        };
        tx.commit().await?;
        Ok(outcome)
    }

    async fn fetch_wishlist(&self, user_id: i64) -> Result<Vec<WishlistEntry>, StudentApiError> {
        let mut conn = self.pool.acquire().await?;
        let entries = students::fetch_wishlist(user_id, &mut conn).await?;
        Ok(entries)
    }

    async fn fetch_notes(&self, user_id: i64, course_id: i64) -> Result<Vec<Note>, StudentApiError> {
        let mut conn = self.pool.acquire().await?;
        let notes = students::fetch_notes(user_id, course_id, &mut conn).await?;
        Ok(notes)
    }

    async fn create_note(&self, note: NewNote) -> Result<Note, StudentApiError> {
        let mut conn = self.pool.acquire().await?;
        let note = students::insert_note(note, &mut conn).await?;
        Ok(note)
    }

    async fn fetch_note(&self, user_id: i64, course_id: i64, note_id: i64) -> Result<Option<Note>, StudentApiError> {
        let mut conn = self.pool.acquire().await?;
        let note = students::fetch_note(user_id, course_id, note_id, &mut conn).await?;
        Ok(note)
    }

    async fn update_note(
        &self,
        user_id: i64,
        course_id: i64,
        note_id: i64,
        title: &str,
        body: &str,
    ) -> Result<Option<Note>, StudentApiError> {
        let mut conn = self.pool.acquire().await?;
        let note = students::update_note(user_id, course_id, note_id, title, body, &mut conn).await?;
        Ok(note)
    }

    async fn delete_note(&self, user_id: i64, course_id: i64, note_id: i64) -> Result<bool, StudentApiError> {
        let mut conn = self.pool.acquire().await?;
        let deleted = students::delete_note(user_id, course_id, note_id, &mut conn).await?;
        Ok(deleted)
    }

    async fn create_review(&self, review: NewReview) -> Result<Review, StudentApiError> {
        let mut conn = self.pool.acquire().await?;
        let review = students::insert_review(review, &mut conn).await?;
        Ok(review)
    }

    async fn fetch_review(&self, user_id: i64, review_id: i64) -> Result<Option<Review>, StudentApiError> {
        let mut conn = self.pool.acquire().await?;
        let review = students::fetch_review(user_id, review_id, &mut conn).await?;
        Ok(review)
    }

    async fn update_review(
        &self,
        user_id: i64,
        review_id: i64,
        rating: i64,
        review: &str,
    ) -> Result<Option<Review>, StudentApiError> {
        let mut conn = self.pool.acquire().await?;
        let review = students::update_review(user_id, review_id, rating, review, &mut conn).await?;
        Ok(review)
    }

    async fn fetch_questions_for_course(&self, course_id: i64) -> Result<Vec<QuestionThread>, StudentApiError> {
        let mut conn = self.pool.acquire().await?;
        let threads = qa::fetch_questions_for_course(course_id, &mut conn).await?;
        Ok(threads)
    }

    async fn create_question(
        &self,
        user_id: i64,
        course_id: i64,
        title: &str,
        message: &str,
    ) -> Result<QuestionThread, StudentApiError> {
        let mut tx = self.pool.begin().await?;
        let qa_id = new_public_id(QA_ID_LEN);
        let question = qa::insert_question(&qa_id, user_id, course_id, title, &mut tx).await?;
        let first = qa::insert_message(question.id, user_id, course_id, message, &mut tx).await?;
        tx.commit().await?;
        Ok(QuestionThread { question, messages: vec![first] })
    }

    async fn reply_to_question(
        &self,
        qa_id: &str,
        user_id: i64,
        message: &str,
    ) -> Result<Option<QuestionThread>, StudentApiError> {
        let mut tx = self.pool.begin().await?;
        let Some(question) = qa::fetch_question_by_qa_id(qa_id, &mut tx).await? else {
            return Ok(None);
        };
        qa::insert_message(question.id, user_id, question.course_id, message, &mut tx).await?;
        let messages = qa::fetch_messages(question.id, &mut tx).await?;
        tx.commit().await?;
        Ok(Some(QuestionThread { question, messages }))
    }
}
