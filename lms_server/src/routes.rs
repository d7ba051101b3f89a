//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. For this reason, any long, non-cpu-bound operation (e.g. I/O,
//! database operations, etc.) should be expressed as futures or asynchronous functions. Async handlers get executed
//! concurrently by worker threads and thus don't block execution.
use actix_web::{get, web, HttpResponse, Responder};
use gateway_clients::{CardGatewayApi, NewCheckoutSession, WalletGatewayApi};
use lms_common::DEFAULT_CURRENCY_CODE;
use lms_engine::{
    db_types::{NewNote, NewReview, OrderOid},
    traits::{CartManagement, CatalogManagement, CheckoutDatabase, StudentRecords},
    CartApi,
    CartUpsert,
    CatalogApi,
    CouponApplication,
    CouponOutcome,
    NewOrderRequest,
    OrderFlowApi,
    StudentApi,
};
use log::*;

use crate::{
    data_objects::{
        CardCheckoutResponse,
        CompletedLessonToggle,
        JsonResponse,
        NewQuestion,
        NewReviewRequest,
        NoteUpsert,
        OrderResponse,
        PaymentConfirmRequest,
        QaReply,
        ReviewUpdate,
        SearchQuery,
        WishlistToggle,
    },
    errors::ServerError,
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:tt)+) => {
        paste::paste! { pub struct [<$name:camel Route>]<A>(core::marker::PhantomData<fn() -> A>);}
        paste::paste! { impl<A> [<$name:camel Route>]<A> {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self(core::marker::PhantomData::<fn() -> A>)
            }
        }}
        paste::paste! { impl<A> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<A>
        where
            A: $($bounds)+ + 'static,
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::<A>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Catalog  ----------------------------------------------------
route!(category_list => Get "/courses/categories" impl CatalogManagement);
pub async fn category_list<B: CatalogManagement>(
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET category list");
    let categories = api.categories().await?;
    Ok(HttpResponse::Ok().json(categories))
}

route!(course_search => Get "/courses/search" impl CatalogManagement);
pub async fn course_search<B: CatalogManagement>(
    query: web::Query<SearchQuery>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let query = query.into_inner().query;
    debug!("💻️ GET course search for '{query}'");
    let courses = api.search(&query).await?;
    Ok(HttpResponse::Ok().json(courses))
}

route!(course_list => Get "/courses" impl CatalogManagement);
pub async fn course_list<B: CatalogManagement>(api: web::Data<CatalogApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ GET course list");
    let courses = api.published_courses().await?;
    Ok(HttpResponse::Ok().json(courses))
}

route!(course_detail => Get "/courses/{slug}" impl CatalogManagement);
pub async fn course_detail<B: CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CatalogApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let slug = path.into_inner();
    debug!("💻️ GET course detail for '{slug}'");
    let course = api
        .course_by_slug(&slug)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("No published course matches '{slug}'")))?;
    Ok(HttpResponse::Ok().json(course))
}

//----------------------------------------------    Cart    ----------------------------------------------------
route!(cart_add => Post "/cart" impl CartManagement + CatalogManagement);
pub async fn cart_add<B: CartManagement + CatalogManagement>(
    body: web::Json<CartUpsert>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let upsert = body.into_inner();
    debug!("💻️ POST cart item for cart {}", upsert.cart_id);
    let (item, created) = api.upsert(upsert).await?;
    let response = if created { HttpResponse::Created().json(item) } else { HttpResponse::Ok().json(item) };
    Ok(response)
}

route!(cart_stats => Get "/cart/{cart_id}/stats" impl CartManagement + CatalogManagement);
pub async fn cart_stats<B: CartManagement + CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let cart_id = path.into_inner();
    trace!("💻️ GET cart stats for {cart_id}");
    let stats = api.stats(&cart_id).await?;
    Ok(HttpResponse::Ok().json(stats))
}

route!(cart_items => Get "/cart/{cart_id}" impl CartManagement + CatalogManagement);
pub async fn cart_items<B: CartManagement + CatalogManagement>(
    path: web::Path<String>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let cart_id = path.into_inner();
    trace!("💻️ GET cart items for {cart_id}");
    let items = api.items(&cart_id).await?;
    Ok(HttpResponse::Ok().json(items))
}

route!(cart_remove => Delete "/cart/{cart_id}/{item_id}" impl CartManagement + CatalogManagement);
pub async fn cart_remove<B: CartManagement + CatalogManagement>(
    path: web::Path<(String, i64)>,
    api: web::Data<CartApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (cart_id, item_id) = path.into_inner();
    debug!("💻️ DELETE item #{item_id} from cart {cart_id}");
    let deleted = api.remove(&cart_id, item_id).await?;
    if !deleted {
        return Err(ServerError::NotFound(format!("Item #{item_id} is not in cart {cart_id}")));
    }
    Ok(HttpResponse::Ok().json(JsonResponse::success("Item removed from cart")))
}

//----------------------------------------------   Orders   ----------------------------------------------------
route!(order_create => Post "/orders" impl CheckoutDatabase);
pub async fn order_create<B: CheckoutDatabase>(
    body: web::Json<NewOrderRequest>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST new order from cart {}", request.cart_id);
    let order = api.create_order(request).await?;
    Ok(HttpResponse::Created().json(order))
}

route!(order_detail => Get "/orders/{oid}" impl CheckoutDatabase);
pub async fn order_detail<B: CheckoutDatabase>(
    path: web::Path<String>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let oid = OrderOid(path.into_inner());
    trace!("💻️ GET order {oid}");
    let view = api.checkout_view(&oid).await?;
    Ok(HttpResponse::Ok().json(view))
}

route!(coupon_apply => Post "/orders/coupon" impl CheckoutDatabase);
pub async fn coupon_apply<B: CheckoutDatabase>(
    body: web::Json<CouponApplication>,
    api: web::Data<OrderFlowApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let application = body.into_inner();
    debug!("💻️ POST coupon '{}' for order {}", application.coupon_code, application.order_oid);
    let outcome = api.apply_coupon(application).await?;
    let body = match outcome {
        CouponOutcome::Applied { order, discount } => {
            OrderResponse::new(JsonResponse::success(format!("Coupon applied. You saved {discount}")), order)
        },
        CouponOutcome::AlreadyApplied { order } => {
            OrderResponse::new(JsonResponse::warning("Coupon has already been applied to this order"), order)
        },
    };
    Ok(HttpResponse::Ok().json(body))
}

//----------------------------------------------  Payments  ----------------------------------------------------
route!(card_checkout => Post "/payments/card/{oid}" impl CheckoutDatabase);
/// Creates a hosted checkout session with the card provider for the order's current total
/// and stores the session id against the order. The frontend redirects the shopper to the
/// returned URL.
pub async fn card_checkout<B: CheckoutDatabase>(
    path: web::Path<String>,
    api: web::Data<OrderFlowApi<B>>,
    card: web::Data<CardGatewayApi>,
) -> Result<HttpResponse, ServerError> {
    let oid = OrderOid(path.into_inner());
    debug!("💻️ POST card checkout for order {oid}");
    let view = api.checkout_view(&oid).await?;
    let session = NewCheckoutSession::for_order(
        oid.as_str(),
        &view.order.email,
        view.order.total,
        DEFAULT_CURRENCY_CODE,
        card.success_url(),
        card.cancel_url(),
    );
    let session = card.create_session(session).await?;
    api.attach_card_session(&oid, &session.id).await?;
    info!("💻️💳️ Card session {} created for order {oid}", session.id);
    Ok(HttpResponse::Ok().json(CardCheckoutResponse { session_id: session.id, url: session.url }))
}

route!(payment_confirm => Post "/payments/confirm" impl CheckoutDatabase);
/// Verifies payment with the relevant provider and, on success, marks the order paid and
/// fans out enrollments. Exactly one of `session_id` or `wallet_order_id` must be supplied.
/// Confirming an already-paid order is harmless and reports a warning.
pub async fn payment_confirm<B: CheckoutDatabase>(
    body: web::Json<PaymentConfirmRequest>,
    api: web::Data<OrderFlowApi<B>>,
    card: web::Data<CardGatewayApi>,
    wallet: web::Data<WalletGatewayApi>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    let oid = OrderOid(request.order_oid.clone());
    debug!("💻️ POST payment confirmation for order {oid}");
    let paid = match (&request.session_id, &request.wallet_order_id) {
        (Some(session_id), None) => card.fetch_session(session_id).await?.is_paid(),
        (None, Some(wallet_order_id)) => wallet.fetch_order(wallet_order_id).await?.is_completed(),
        _ => {
            return Err(ServerError::InvalidRequestBody(
                "Supply exactly one of session_id or wallet_order_id".to_string(),
            ))
        },
    };
    if !paid {
        info!("💻️💳️ Provider reports order {oid} as unpaid. Not confirming");
        return Ok(HttpResponse::BadRequest().json(JsonResponse::failure("Payment has not been completed")));
    }
    let confirmation = api.confirm_payment(&oid).await?;
    let response = if confirmation.newly_paid {
        OrderResponse::new(JsonResponse::success("Payment successful"), confirmation.order)
    } else {
        OrderResponse::new(JsonResponse::warning("Order has already been paid"), confirmation.order)
    };
    Ok(HttpResponse::Ok().json(response))
}

//----------------------------------------------  Students  ----------------------------------------------------
route!(student_summary => Get "/student/{user_id}/summary" impl StudentRecords + CatalogManagement);
pub async fn student_summary<B: StudentRecords + CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = path.into_inner();
    trace!("💻️ GET summary for user #{user_id}");
    let summary = api.summary(user_id).await?;
    Ok(HttpResponse::Ok().json(summary))
}

route!(student_courses => Get "/student/{user_id}/courses" impl StudentRecords + CatalogManagement);
pub async fn student_courses<B: StudentRecords + CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = path.into_inner();
    trace!("💻️ GET enrollments for user #{user_id}");
    let enrollments = api.enrollments(user_id).await?;
    Ok(HttpResponse::Ok().json(enrollments))
}

route!(student_course => Get "/student/{user_id}/courses/{enrollment_id}" impl StudentRecords + CatalogManagement);
pub async fn student_course<B: StudentRecords + CatalogManagement>(
    path: web::Path<(i64, String)>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (user_id, enrollment_id) = path.into_inner();
    trace!("💻️ GET enrollment {enrollment_id} for user #{user_id}");
    let enrollment = api.enrollment(user_id, &enrollment_id).await?;
    Ok(HttpResponse::Ok().json(enrollment))
}

route!(lesson_toggle => Post "/student/lesson-toggle" impl StudentRecords + CatalogManagement);
pub async fn lesson_toggle<B: StudentRecords + CatalogManagement>(
    body: web::Json<CompletedLessonToggle>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let toggle = body.into_inner();
    debug!("💻️ POST lesson toggle for user #{}, lesson #{}", toggle.user_id, toggle.lesson_id);
    let outcome = api.toggle_completed_lesson(toggle.user_id, toggle.course_id, toggle.lesson_id).await?;
    let message = if outcome.was_added() { "Lesson marked as complete" } else { "Lesson marked as incomplete" };
    Ok(HttpResponse::Ok().json(JsonResponse::success(message)))
}

route!(wishlist_toggle => Post "/student/wishlist" impl StudentRecords + CatalogManagement);
pub async fn wishlist_toggle<B: StudentRecords + CatalogManagement>(
    body: web::Json<WishlistToggle>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let toggle = body.into_inner();
    debug!("💻️ POST wishlist toggle for user #{}, course #{}", toggle.user_id, toggle.course_id);
    let outcome = api.toggle_wishlist(toggle.user_id, toggle.course_id).await?;
    let message = if outcome.was_added() { "Course added to wishlist" } else { "Course removed from wishlist" };
    Ok(HttpResponse::Ok().json(JsonResponse::success(message)))
}

route!(wishlist => Get "/student/{user_id}/wishlist" impl StudentRecords + CatalogManagement);
pub async fn wishlist<B: StudentRecords + CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = path.into_inner();
    trace!("💻️ GET wishlist for user #{user_id}");
    let entries = api.wishlist(user_id).await?;
    Ok(HttpResponse::Ok().json(entries))
}

//----------------------------------------------    Notes   ----------------------------------------------------
route!(note_list => Get "/student/{user_id}/{enrollment_id}/notes" impl StudentRecords + CatalogManagement);
pub async fn note_list<B: StudentRecords + CatalogManagement>(
    path: web::Path<(i64, String)>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (user_id, enrollment_id) = path.into_inner();
    trace!("💻️ GET notes for user #{user_id} on enrollment {enrollment_id}");
    let enrollment = api.enrollment(user_id, &enrollment_id).await?;
    let notes = api.notes(user_id, enrollment.course_id).await?;
    Ok(HttpResponse::Ok().json(notes))
}

route!(note_create => Post "/student/{user_id}/{enrollment_id}/notes" impl StudentRecords + CatalogManagement);
pub async fn note_create<B: StudentRecords + CatalogManagement>(
    path: web::Path<(i64, String)>,
    body: web::Json<NoteUpsert>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (user_id, enrollment_id) = path.into_inner();
    let upsert = body.into_inner();
    debug!("💻️ POST new note for user #{user_id} on enrollment {enrollment_id}");
    let enrollment = api.enrollment(user_id, &enrollment_id).await?;
    let note = NewNote { user_id, course_id: enrollment.course_id, title: upsert.title, body: upsert.body };
    let note = api.create_note(note).await?;
    Ok(HttpResponse::Created().json(note))
}

route!(note_detail => Get "/student/{user_id}/{enrollment_id}/notes/{note_id}" impl StudentRecords + CatalogManagement);
pub async fn note_detail<B: StudentRecords + CatalogManagement>(
    path: web::Path<(i64, String, i64)>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (user_id, enrollment_id, note_id) = path.into_inner();
    trace!("💻️ GET note #{note_id} for user #{user_id}");
    let enrollment = api.enrollment(user_id, &enrollment_id).await?;
    let note = api
        .note(user_id, enrollment.course_id, note_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Note #{note_id} does not exist")))?;
    Ok(HttpResponse::Ok().json(note))
}

route!(note_update => Patch "/student/{user_id}/{enrollment_id}/notes/{note_id}" impl StudentRecords + CatalogManagement);
pub async fn note_update<B: StudentRecords + CatalogManagement>(
    path: web::Path<(i64, String, i64)>,
    body: web::Json<NoteUpsert>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (user_id, enrollment_id, note_id) = path.into_inner();
    let upsert = body.into_inner();
    debug!("💻️ PATCH note #{note_id} for user #{user_id}");
    let enrollment = api.enrollment(user_id, &enrollment_id).await?;
    let note = api
        .update_note(user_id, enrollment.course_id, note_id, &upsert.title, &upsert.body)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Note #{note_id} does not exist")))?;
    Ok(HttpResponse::Ok().json(note))
}

route!(note_delete => Delete "/student/{user_id}/{enrollment_id}/notes/{note_id}" impl StudentRecords + CatalogManagement);
pub async fn note_delete<B: StudentRecords + CatalogManagement>(
    path: web::Path<(i64, String, i64)>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (user_id, enrollment_id, note_id) = path.into_inner();
    debug!("💻️ DELETE note #{note_id} for user #{user_id}");
    let enrollment = api.enrollment(user_id, &enrollment_id).await?;
    let deleted = api.delete_note(user_id, enrollment.course_id, note_id).await?;
    if !deleted {
        return Err(ServerError::NotFound(format!("Note #{note_id} does not exist")));
    }
    Ok(HttpResponse::Ok().json(JsonResponse::success("Note deleted")))
}

//----------------------------------------------   Reviews  ----------------------------------------------------
route!(review_create => Post "/student/review" impl StudentRecords + CatalogManagement);
pub async fn review_create<B: StudentRecords + CatalogManagement>(
    body: web::Json<NewReviewRequest>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let request = body.into_inner();
    debug!("💻️ POST review for course #{} by user #{}", request.course_id, request.user_id);
    let review = api
        .create_review(NewReview {
            user_id: request.user_id,
            course_id: request.course_id,
            rating: request.rating,
            review: request.review,
        })
        .await?;
    Ok(HttpResponse::Created().json(review))
}

route!(review_detail => Get "/student/review/{user_id}/{review_id}" impl StudentRecords + CatalogManagement);
pub async fn review_detail<B: StudentRecords + CatalogManagement>(
    path: web::Path<(i64, i64)>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (user_id, review_id) = path.into_inner();
    trace!("💻️ GET review #{review_id} for user #{user_id}");
    let review = api
        .review(user_id, review_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Review #{review_id} does not exist")))?;
    Ok(HttpResponse::Ok().json(review))
}

route!(review_update => Patch "/student/review/{user_id}/{review_id}" impl StudentRecords + CatalogManagement);
pub async fn review_update<B: StudentRecords + CatalogManagement>(
    path: web::Path<(i64, i64)>,
    body: web::Json<ReviewUpdate>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let (user_id, review_id) = path.into_inner();
    let update = body.into_inner();
    debug!("💻️ PATCH review #{review_id} for user #{user_id}");
    let review = api
        .update_review(user_id, review_id, update.rating, &update.review)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Review #{review_id} does not exist")))?;
    Ok(HttpResponse::Ok().json(review))
}

//----------------------------------------------     Q&A    ----------------------------------------------------
route!(qa_list => Get "/courses/{course_id}/qa" impl StudentRecords + CatalogManagement);
pub async fn qa_list<B: StudentRecords + CatalogManagement>(
    path: web::Path<i64>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let course_id = path.into_inner();
    trace!("💻️ GET question threads for course #{course_id}");
    let threads = api.questions_for_course(course_id).await?;
    Ok(HttpResponse::Ok().json(threads))
}

route!(qa_ask => Post "/courses/{course_id}/qa" impl StudentRecords + CatalogManagement);
pub async fn qa_ask<B: StudentRecords + CatalogManagement>(
    path: web::Path<i64>,
    body: web::Json<NewQuestion>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let course_id = path.into_inner();
    let question = body.into_inner();
    debug!("💻️ POST new question on course #{course_id} by user #{}", question.user_id);
    let thread = api.ask_question(question.user_id, course_id, &question.title, &question.message).await?;
    Ok(HttpResponse::Created().json(thread))
}

route!(qa_reply => Post "/qa/reply" impl StudentRecords + CatalogManagement);
pub async fn qa_reply<B: StudentRecords + CatalogManagement>(
    body: web::Json<QaReply>,
    api: web::Data<StudentApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let reply = body.into_inner();
    debug!("💻️ POST reply to question [{}] by user #{}", reply.qa_id, reply.user_id);
    let thread = api.reply_to_question(&reply.qa_id, reply.user_id, &reply.message).await?;
    Ok(HttpResponse::Ok().json(thread))
}
