use lms_engine::{
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
        Order,
        OrderItem,
        OrderOid,
        QuestionThread,
        Review,
        WishlistEntry,
    },
    traits::{
        CartManagement,
        CatalogManagement,
        CheckoutDatabase,
        StudentRecords,
        StudentSummary,
        ToggleOutcome,
    },
    CartApiError,
    CatalogApiError,
    CouponOutcome,
    NewOrderRequest,
    OrderFlowError,
    PaymentConfirmation,
    StudentApiError,
};
use mockall::mock;

mock! {
    pub Backend {}

    impl Clone for Backend {
        fn clone(&self) -> Self;
    }

    impl CatalogManagement for Backend {
        async fn fetch_categories(&self) -> Result<Vec<Category>, CatalogApiError>;
        async fn fetch_published_courses(&self) -> Result<Vec<Course>, CatalogApiError>;
        async fn fetch_course_by_slug(&self, slug: &str) -> Result<Option<Course>, CatalogApiError>;
        async fn fetch_course_by_id(&self, course_id: i64) -> Result<Option<Course>, CatalogApiError>;
        async fn search_courses(&self, query: &str) -> Result<Vec<Course>, CatalogApiError>;
        async fn fetch_country_by_name(&self, name: &str) -> Result<Option<Country>, CatalogApiError>;
        async fn fetch_lesson(&self, lesson_id: i64) -> Result<Option<Lesson>, CatalogApiError>;
    }

    impl CartManagement for Backend {
        async fn upsert_cart_item(&self, item: NewCartItem) -> Result<(CartItem, bool), CartApiError>;
        async fn fetch_cart_items(&self, cart_id: &str) -> Result<Vec<CartItem>, CartApiError>;
        async fn delete_cart_item(&self, cart_id: &str, item_id: i64) -> Result<bool, CartApiError>;
    }

    impl CheckoutDatabase for Backend {
        async fn create_order_from_cart(&self, req: NewOrderRequest) -> Result<Order, OrderFlowError>;
        async fn fetch_order_by_oid(&self, oid: &OrderOid) -> Result<Option<Order>, OrderFlowError>;
        async fn fetch_order_items(&self, order_id: i64) -> Result<Vec<OrderItem>, OrderFlowError>;
        async fn fetch_coupon_by_code(&self, code: &str) -> Result<Option<Coupon>, OrderFlowError>;
        async fn apply_coupon_to_order(&self, oid: &OrderOid, code: &str) -> Result<CouponOutcome, OrderFlowError>;
        async fn set_card_session_id(&self, oid: &OrderOid, session_id: &str) -> Result<Order, OrderFlowError>;
        async fn confirm_order_paid(&self, oid: &OrderOid) -> Result<PaymentConfirmation, OrderFlowError>;
    }

    impl StudentRecords for Backend {
        async fn fetch_summary(&self, user_id: i64) -> Result<StudentSummary, StudentApiError>;
        async fn fetch_enrollments_for_user(&self, user_id: i64) -> Result<Vec<Enrollment>, StudentApiError>;
        async fn fetch_enrollment(&self, user_id: i64, enrollment_id: &str) -> Result<Option<Enrollment>, StudentApiError>;
        async fn toggle_completed_lesson(&self, user_id: i64, course_id: i64, lesson_id: i64) -> Result<ToggleOutcome, StudentApiError>;
        async fn toggle_wishlist(&self, user_id: i64, course_id: i64) -> Result<ToggleOutcome, StudentApiError>;
        async fn fetch_wishlist(&self, user_id: i64) -> Result<Vec<WishlistEntry>, StudentApiError>;
        async fn fetch_notes(&self, user_id: i64, course_id: i64) -> Result<Vec<Note>, StudentApiError>;
        async fn create_note(&self, note: NewNote) -> Result<Note, StudentApiError>;
        async fn fetch_note(&self, user_id: i64, course_id: i64, note_id: i64) -> Result<Option<Note>, StudentApiError>;
        async fn update_note(&self, user_id: i64, course_id: i64, note_id: i64, title: &str, body: &str) -> Result<Option<Note>, StudentApiError>;
        async fn delete_note(&self, user_id: i64, course_id: i64, note_id: i64) -> Result<bool, StudentApiError>;
        async fn create_review(&self, review: NewReview) -> Result<Review, StudentApiError>;
        async fn fetch_review(&self, user_id: i64, review_id: i64) -> Result<Option<Review>, StudentApiError>;
        async fn update_review(&self, user_id: i64, review_id: i64, rating: i64, review: &str) -> Result<Option<Review>, StudentApiError>;
        async fn fetch_questions_for_course(&self, course_id: i64) -> Result<Vec<QuestionThread>, StudentApiError>;
        async fn create_question(&self, user_id: i64, course_id: i64, title: &str, message: &str) -> Result<QuestionThread, StudentApiError>;
        async fn reply_to_question(&self, qa_id: &str, user_id: i64, message: &str) -> Result<Option<QuestionThread>, StudentApiError>;
    }
}
