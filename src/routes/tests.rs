use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use std::sync::Arc;

use crate::directory::Directory;
use crate::models::appointment::AppointmentStatus;
use crate::models::session::MAX_NAME_CHARS;
use crate::session::SESSION_COOKIE;
use crate::state::AppState;
use crate::store::{AppointmentRepository, InMemoryAppointments};
use crate::views::Views;

macro_rules! app {
    ($store:expr) => {{
        let state = AppState::with_repository(Key::generate(), Views::new().unwrap(), $store);
        test::init_service(
            App::new()
                .configure(|cfg| state.configure(cfg))
                .configure(super::init),
        )
        .await
    }};
}

macro_rules! login {
    ($app:expr, $role:expr, $name:expr) => {{
        let req = test::TestRequest::post()
            .uri("/login")
            .set_form(&[("role", $role), ("name", $name)])
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        session_cookie(&resp)
    }};
}

macro_rules! get_page {
    ($app:expr, $uri:expr, $cookie:expr) => {{
        let req = test::TestRequest::get()
            .uri($uri)
            .cookie($cookie.clone())
            .to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body = test::read_body(resp).await;
        (status, String::from_utf8(body.to_vec()).unwrap())
    }};
}

macro_rules! post_form {
    ($app:expr, $uri:expr, $cookie:expr, $form:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .cookie($cookie.clone())
            .set_form($form)
            .to_request();
        test::call_service(&$app, req).await
    }};
}

fn store() -> Arc<InMemoryAppointments> {
    Arc::new(InMemoryAppointments::new())
}

fn session_cookie<B>(resp: &ServiceResponse<B>) -> Cookie<'static> {
    resp.response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .expect("session cookie")
        .into_owned()
}

fn location<B>(resp: &ServiceResponse<B>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header")
}

fn booking(therapist_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("therapist_id", therapist_id.to_string()),
        ("date", "2024-01-01".to_string()),
        ("time", "10:00".to_string()),
    ]
}

#[actix_web::test]
async fn landing_page_renders_for_anyone() {
    let app = app!(store());
    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn ping_answers_pong() {
    let app = app!(store());
    let req = test::TestRequest::get().uri("/health/ping").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, web::Bytes::from_static(b"pong"));
}

#[actix_web::test]
async fn login_redirects_to_role_dashboard() {
    let app = app!(store());

    for (role, path) in [
        ("patient", "/patient/dashboard"),
        ("therapist", "/therapist/dashboard"),
        ("something-else", "/therapist/dashboard"),
    ] {
        let req = test::TestRequest::post()
            .uri("/login")
            .set_form(&[("role", role), ("name", "Alice")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), path);
    }
}

#[actix_web::test]
async fn patient_dashboard_lists_directory_and_name() {
    let app = app!(store());
    let cookie = login!(app, "patient", "Alice");

    let (status, page) = get_page!(app, "/patient/dashboard", cookie);
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Alice"));
    for name in ["Dr. Sarah Johnson", "Dr. Michael Chen", "Dr. Emily Rodriguez"] {
        assert!(page.contains(name), "missing {name}");
    }
}

#[actix_web::test]
async fn therapist_dashboard_starts_empty() {
    let app = app!(store());
    let cookie = login!(app, "therapist", "Dr. Sarah Johnson");

    let (status, page) = get_page!(app, "/therapist/dashboard", cookie);
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("No appointments booked with you yet."));
}

#[actix_web::test]
async fn booking_shows_up_on_both_dashboards() {
    let appointments = store();
    let app = app!(appointments.clone());
    let bob = login!(app, "patient", "Bob");

    let req = test::TestRequest::post()
        .uri("/patient/book")
        .cookie(bob.clone())
        .set_form(booking("1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/patient/dashboard");

    let booked = appointments.list_for_patient("Bob").unwrap();
    assert_eq!(booked.len(), 1);
    assert_eq!(booked[0].id, 1);
    assert_eq!(booked[0].therapist_id, 1);
    assert_eq!(booked[0].status, AppointmentStatus::Scheduled);

    let (_, page) = get_page!(app, "/patient/dashboard", bob);
    assert!(page.contains("2024-01-01"));
    assert!(page.contains("scheduled"));

    let johnson = login!(app, "therapist", "Dr. Sarah Johnson");
    let (_, page) = get_page!(app, "/therapist/dashboard", johnson);
    assert!(page.contains("Bob"));
    assert!(page.contains("10:00"));

    let chen = login!(app, "therapist", "Dr. Michael Chen");
    let (_, page) = get_page!(app, "/therapist/dashboard", chen);
    assert!(!page.contains("Bob"));
}

#[actix_web::test]
async fn booking_twice_creates_two_records() {
    let appointments = store();
    let app = app!(appointments.clone());
    let bob = login!(app, "patient", "Bob");

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/patient/book")
            .cookie(bob.clone())
            .set_form(booking("2"))
            .to_request();
        test::call_service(&app, req).await;
    }

    let ids: Vec<_> = appointments
        .list_for_patient("Bob")
        .unwrap()
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[actix_web::test]
async fn booking_unknown_therapist_is_not_found() {
    let appointments = store();
    let app = app!(appointments.clone());
    let bob = login!(app, "patient", "Bob");

    let req = test::TestRequest::post()
        .uri("/patient/book")
        .cookie(bob)
        .set_form(booking("42"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(appointments.list_for_patient("Bob").unwrap().is_empty());
}

#[actix_web::test]
async fn booking_with_missing_fields_is_bad_request() {
    let app = app!(store());
    let bob = login!(app, "patient", "Bob");

    let req = test::TestRequest::post()
        .uri("/patient/book")
        .cookie(bob)
        .set_form(&[("date", "2024-01-01")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn booking_without_session_books_nothing() {
    let appointments = store();
    let app = app!(appointments.clone());

    let req = test::TestRequest::post()
        .uri("/patient/book")
        .set_form(booking("1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
    assert!(appointments.list_for_therapists(&[1]).unwrap().is_empty());
}

#[actix_web::test]
async fn status_update_is_reflected_on_dashboard() {
    let appointments = store();
    let app = app!(appointments.clone());
    let bob = login!(app, "patient", "Bob");
    let req = test::TestRequest::post()
        .uri("/patient/book")
        .cookie(bob)
        .set_form(booking("1"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/therapist/update/1")
        .set_form(&[("status", "confirmed")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/therapist/dashboard");
    assert_eq!(
        appointments.list_for_patient("Bob").unwrap()[0].status,
        AppointmentStatus::Confirmed
    );

    let johnson = login!(app, "therapist", "Dr. Sarah Johnson");
    let (_, page) = get_page!(app, "/therapist/dashboard", johnson);
    assert!(page.contains("<td>confirmed</td>"));
}

#[actix_web::test]
async fn updating_unknown_appointment_still_redirects() {
    let appointments = store();
    let app = app!(appointments.clone());

    let req = test::TestRequest::post()
        .uri("/therapist/update/99")
        .set_form(&[("status", "cancelled")])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/therapist/dashboard");
    assert!(appointments.list_for_therapists(&[1, 2, 3]).unwrap().is_empty());
}

#[actix_web::test]
async fn dashboards_redirect_without_matching_role() {
    let app = app!(store());

    for uri in ["/patient/dashboard", "/therapist/dashboard"] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(location(&resp), "/");
    }

    let patient = login!(app, "patient", "Alice");
    let req = test::TestRequest::get()
        .uri("/therapist/dashboard")
        .cookie(patient)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(location(&resp), "/");
}

#[actix_web::test]
async fn logout_clears_session() {
    let app = app!(store());
    login!(app, "patient", "Alice");

    let resp = test::call_service(&app, test::TestRequest::get().uri("/logout").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
    let cleared = session_cookie(&resp);
    assert_eq!(cleared.value(), "");
    assert_eq!(cleared.max_age().map(|age| age.whole_seconds()), Some(0));

    // The browser now sends the emptied cookie back.
    for uri in ["/patient/dashboard", "/therapist/dashboard"] {
        let req = test::TestRequest::get()
            .uri(uri)
            .cookie(Cookie::new(SESSION_COOKIE, ""))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(location(&resp), "/");
    }
}

#[actix_web::test]
async fn tampered_cookie_is_anonymous() {
    let app = app!(store());
    let cookie = login!(app, "therapist", "Dr. Sarah Johnson");
    let forged = cookie.value().replace("therapist", "patient");

    let req = test::TestRequest::get()
        .uri("/patient/dashboard")
        .cookie(Cookie::new(SESSION_COOKIE, forged))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
}

#[actix_web::test]
async fn ready_reports_directory_size() {
    let app = app!(store());
    let req = test::TestRequest::get().uri("/health/ready").to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["therapists"], 3);
}

#[actix_web::test]
async fn names_with_cookie_delimiters_survive_login() {
    let app = app!(store());
    let cookie = login!(app, "patient", "Ann; Lee, \"Jr\"");

    let (status, page) = get_page!(app, "/patient/dashboard", cookie);
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Ann; Lee, &quot;Jr&quot;"));
}

#[actix_web::test]
async fn ready_is_unavailable_with_empty_directory() {
    let state = AppState::with_repository(Key::generate(), Views::new().unwrap(), store())
        .with_directory(Directory::new(Vec::new()));
    let app = test::init_service(
        App::new()
            .configure(|cfg| state.configure(cfg))
            .configure(super::init),
    )
    .await;

    let req = test::TestRequest::get().uri("/health/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["ready"], false);
}

#[actix_web::test]
async fn unrecognized_role_gets_the_therapist_dashboard() {
    let app = app!(store());
    let admin = login!(app, "admin", "Dr. Sarah Johnson");

    let (status, page) = get_page!(app, "/therapist/dashboard", admin);
    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("Dr. Sarah Johnson"));

    let (status, _) = get_page!(app, "/patient/dashboard", admin);
    assert_eq!(status, StatusCode::FOUND);
}

#[actix_web::test]
async fn overlong_name_is_rejected_at_login() {
    let app = app!(store());
    let name = "x".repeat(MAX_NAME_CHARS + 1);

    let req = test::TestRequest::post()
        .uri("/login")
        .set_form(&[("role", "patient"), ("name", name.as_str())])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.response().cookies().next().is_none());
}

#[actix_web::test]
async fn check_in_shows_up_for_patient_and_their_therapist() {
    let app = app!(store());
    let bob = login!(app, "patient", "Bob");
    post_form!(app, "/patient/book", bob, booking("1"));

    let resp = post_form!(
        app,
        "/patient/checkin",
        bob,
        &[("mood", "4"), ("stress", "2"), ("sleep", "5"), ("notes", "Good week")]
    );
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/patient/dashboard");

    let (_, page) = get_page!(app, "/patient/dashboard", bob);
    assert!(page.contains("<td>4/5</td><td>2/5</td>"));
    assert!(page.contains("Good week"));

    let johnson = login!(app, "therapist", "Dr. Sarah Johnson");
    let (_, page) = get_page!(app, "/therapist/dashboard", johnson);
    assert!(page.contains("Good week"));

    let chen = login!(app, "therapist", "Dr. Michael Chen");
    let (_, page) = get_page!(app, "/therapist/dashboard", chen);
    assert!(!page.contains("Good week"));
}

#[actix_web::test]
async fn check_in_with_out_of_range_score_is_bad_request() {
    let app = app!(store());
    let bob = login!(app, "patient", "Bob");

    let resp = post_form!(
        app,
        "/patient/checkin",
        bob,
        &[("mood", "6"), ("stress", "2"), ("sleep", "5")]
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (_, page) = get_page!(app, "/patient/dashboard", bob);
    assert!(page.contains("No check-ins yet."));
}

#[actix_web::test]
async fn check_in_requires_patient_session() {
    let app = app!(store());
    let johnson = login!(app, "therapist", "Dr. Sarah Johnson");

    let resp = post_form!(
        app,
        "/patient/checkin",
        johnson,
        &[("mood", "3"), ("stress", "3"), ("sleep", "3")]
    );
    assert_eq!(location(&resp), "/");
}

#[actix_web::test]
async fn journal_entries_reach_the_therapist() {
    let app = app!(store());
    let bob = login!(app, "patient", "Bob");
    post_form!(app, "/patient/book", bob, booking("2"));

    post_form!(app, "/patient/journal", bob, &[("content", "   ")]);
    let (_, page) = get_page!(app, "/patient/dashboard", bob);
    assert!(page.contains("No journal entries yet."));

    let resp = post_form!(app, "/patient/journal", bob, &[("content", "Walked by the lake")]);
    assert_eq!(location(&resp), "/patient/dashboard");

    let chen = login!(app, "therapist", "Dr. Michael Chen");
    let (_, page) = get_page!(app, "/therapist/dashboard", chen);
    assert!(page.contains("Walked by the lake"));
}

#[actix_web::test]
async fn homework_is_assigned_by_therapist_and_toggled_by_patient() {
    let app = app!(store());
    let bob = login!(app, "patient", "Bob");
    post_form!(app, "/patient/book", bob, booking("1"));

    let johnson = login!(app, "therapist", "Dr. Sarah Johnson");
    let resp = post_form!(
        app,
        "/therapist/homework",
        johnson,
        &[
            ("patient", "Bob"),
            ("title", "Thought diary"),
            ("description", "Challenge three thoughts"),
            ("due_date", "2025-12-27"),
        ]
    );
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/therapist/dashboard");

    let (_, page) = get_page!(app, "/patient/dashboard", bob);
    assert!(page.contains("[open] <strong>Thought diary</strong>"));
    assert!(page.contains("due 2025-12-27"));

    // Someone else's session cannot complete Bob's homework.
    let alice = login!(app, "patient", "Alice");
    post_form!(app, "/patient/homework/1/toggle", alice, &[("", "")]);
    let (_, page) = get_page!(app, "/patient/dashboard", bob);
    assert!(page.contains("[open] <strong>Thought diary</strong>"));

    let resp = post_form!(app, "/patient/homework/1/toggle", bob, &[("", "")]);
    assert_eq!(location(&resp), "/patient/dashboard");

    let (_, page) = get_page!(app, "/therapist/dashboard", johnson);
    assert!(page.contains("[done] <strong>Thought diary</strong>"));
}

#[actix_web::test]
async fn homework_with_bad_due_date_is_bad_request() {
    let app = app!(store());
    let johnson = login!(app, "therapist", "Dr. Sarah Johnson");

    let resp = post_form!(
        app,
        "/therapist/homework",
        johnson,
        &[("patient", "Bob"), ("title", "Sleep log"), ("due_date", "soon")]
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
