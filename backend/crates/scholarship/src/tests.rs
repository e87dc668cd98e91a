//! Router level tests for the scholarship routes.
//! In-memory store, in-memory users and a fake payment processor.

#[cfg(test)]
mod route_tests {
    use std::sync::{Arc, Mutex};

    use auth::application::config::AuthConfig;
    use auth::domain::{Email, User, UserRole};
    use auth::infra::InMemoryUserRepository;
    use auth::presentation::handlers::AuthAppState;
    use auth::presentation::router::auth_router;
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use chrono::{Duration, Utc};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::ScholarshipConfig;
    use crate::domain::entities::{Scholarship, ScholarshipDetails};
    use crate::domain::repository::{PaymentGateway, PaymentIntent, ScholarshipRepository};
    use crate::domain::value_objects::MinorUnits;
    use crate::error::{ScholarshipError, ScholarshipResult};
    use crate::infra::memory::{DocumentCounts, InMemoryDocumentStore};
    use crate::presentation::handlers::ScholarshipAppState;
    use crate::presentation::router::{member_router, moderator_router, public_router};

    // ------------------------------------------------------------------
    // Fixtures
    // ------------------------------------------------------------------

    #[derive(Clone, Default)]
    struct FakeGateway {
        calls: Arc<Mutex<Vec<(u64, String)>>>,
        fail: bool,
    }

    impl FakeGateway {
        fn calls(&self) -> Vec<(u64, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl PaymentGateway for FakeGateway {
        async fn create_payment_intent(
            &self,
            amount: MinorUnits,
            currency: &str,
        ) -> ScholarshipResult<PaymentIntent> {
            self.calls
                .lock()
                .unwrap()
                .push((amount.value(), currency.to_string()));

            if self.fail {
                return Err(ScholarshipError::PaymentGateway("card_declined".to_string()));
            }

            Ok(PaymentIntent {
                id: "pi_test".to_string(),
                client_secret: format!("pi_test_secret_{}", amount.value()),
            })
        }
    }

    struct TestApp {
        router: Router,
        store: InMemoryDocumentStore,
        gateway: FakeGateway,
        auth: AuthAppState<InMemoryUserRepository>,
    }

    impl TestApp {
        fn token(&self, email: &str) -> String {
            self.auth.tokens.issue(&Email::new(email).unwrap()).unwrap().token
        }

        async fn send(
            &self,
            method: &str,
            uri: &str,
            as_user: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(email) = as_user {
                builder = builder.header(header::COOKIE, format!("token={}", self.token(email)));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn seed(&self, scholarship: &Scholarship) {
            ScholarshipRepository::create(&self.store, scholarship)
                .await
                .unwrap();
        }

        async fn counts(&self) -> DocumentCounts {
            self.store.counts().await
        }
    }

    fn test_app_with(staff: Vec<(&str, UserRole)>, failing_gateway: bool) -> TestApp {
        let users = staff.into_iter().map(|(email, role)| {
            let mut user = User::new(Email::new(email).unwrap(), None, None);
            user.set_role(role);
            user
        });
        let auth = AuthAppState::new(
            InMemoryUserRepository::with_users(users),
            AuthConfig::development(),
        );

        let store = InMemoryDocumentStore::new();
        let gateway = FakeGateway {
            fail: failing_gateway,
            ..Default::default()
        };
        let state =
            ScholarshipAppState::new(store.clone(), gateway.clone(), ScholarshipConfig::default());

        let guard = auth.guard();
        let router = Router::new()
            .merge(auth_router(auth.clone()))
            .merge(public_router(state.clone()))
            .merge(member_router(state.clone(), &guard))
            .merge(moderator_router(state, &guard, auth.user_repo.clone()));

        TestApp {
            router,
            store,
            gateway,
            auth,
        }
    }

    fn test_app() -> TestApp {
        test_app_with(
            vec![
                ("mod@x.com", UserRole::Moderator),
                ("a@x.com", UserRole::User),
            ],
            false,
        )
    }

    fn scholarship(name: &str, university: &str, fees: f64, age_days: i64) -> Scholarship {
        let mut s = Scholarship::new(
            ScholarshipDetails {
                scholarship_name: name.to_string(),
                university_name: university.to_string(),
                university_image: None,
                university_country: "Japan".to_string(),
                university_city: "Tokyo".to_string(),
                university_world_rank: Some(25),
                subject_category: "Engineering".to_string(),
                scholarship_category: "Full fund".to_string(),
                degree: "Masters".to_string(),
                tuition_fees: None,
                application_fees: fees,
                service_charge: 5.0,
                application_deadline: Some("2026-12-31".to_string()),
                description: None,
            },
            Email::new("mod@x.com").unwrap(),
        );
        s.post_date = Utc::now() - Duration::days(age_days);
        s
    }

    async fn apply(app: &TestApp, as_user: &str, scholarship: &Scholarship) -> (StatusCode, Value) {
        app.send(
            "POST",
            "/scholarApply",
            Some(as_user),
            Some(json!({
                "scholarshipId": scholarship.id.to_string(),
                "userEmail": as_user,
                "userName": "Applicant",
                "phone": "0100",
                "applyingDegree": "Masters"
            })),
        )
        .await
    }

    // ------------------------------------------------------------------
    // Catalogue
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_featured_is_six_cheapest_then_newest() {
        let app = test_app();
        for (i, fees) in [50.0, 10.0, 30.0, 10.0, 70.0, 20.0, 90.0, 40.0].iter().enumerate() {
            app.seed(&scholarship(&format!("S{i}"), "Uni", *fees, i as i64)).await;
        }

        let (status, body) = app.send("GET", "/", None, None).await;
        assert_eq!(status, StatusCode::OK);

        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 6);
        let fees: Vec<f64> = items
            .iter()
            .map(|s| s["applicationFees"].as_f64().unwrap())
            .collect();
        assert_eq!(fees, vec![10.0, 10.0, 20.0, 30.0, 40.0, 50.0]);
        // Equal fees: newer post first (S1 is one day old, S3 three)
        assert_eq!(items[0]["scholarshipName"], "S1");
        assert_eq!(items[1]["scholarshipName"], "S3");
    }

    #[tokio::test]
    async fn test_search_and_pagination() {
        let app = test_app();
        for i in 0..7 {
            app.seed(&scholarship(&format!("General {i}"), "Osaka University", 10.0, i))
                .await;
        }
        app.seed(&scholarship("Tokyo Merit", "Keio", 10.0, 10)).await;
        app.seed(&scholarship("Global", "University of TOKYO", 10.0, 11))
            .await;

        let (status, body) = app
            .send("GET", "/scholarships?page=2&size=3", None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 9);
        assert_eq!(body["page"], 2);
        assert_eq!(body["size"], 3);
        assert_eq!(body["items"].as_array().unwrap().len(), 3);
        assert_eq!(body["items"][0]["scholarshipName"], "General 3");

        let (_, body) = app
            .send("GET", "/scholarships?search=tokyo", None, None)
            .await;
        assert_eq!(body["total"], 2);

        let (_, body) = app
            .send("GET", "/scholarships?size=1000", None, None)
            .await;
        assert_eq!(body["size"], 50);
    }

    #[tokio::test]
    async fn test_details() {
        let app = test_app();
        let s = scholarship("Known", "Uni", 10.0, 0);
        app.seed(&s).await;

        let (status, body) = app
            .send("GET", &format!("/details/{}", s.id), None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["_id"], s.id.to_string());

        let missing = kernel::id::ScholarshipId::new();
        let (status, body) = app
            .send("GET", &format!("/details/{missing}"), None, None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Scholarship not found" }));

        let (status, _) = app.send("GET", "/details/not-an-id", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_moderator_maintains_catalogue() {
        let app = test_app();
        let details = json!({
            "scholarshipName": "New",
            "universityName": "Uni",
            "universityCountry": "JP",
            "universityCity": "Kyoto",
            "subjectCategory": "Science",
            "scholarshipCategory": "Partial",
            "degree": "Bachelor",
            "applicationFees": 15.0,
            "serviceCharge": 2.0
        });

        // Plain user
        let (status, _) = app
            .send("POST", "/admin/scholarships?email=a@x.com", Some("a@x.com"), Some(details.clone()))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(app.counts().await.scholarships, 0);

        let (status, created) = app
            .send("POST", "/admin/scholarships?email=mod@x.com", Some("mod@x.com"), Some(details))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["postedBy"], "mod@x.com");
        let id = created["_id"].as_str().unwrap().to_string();

        let (status, updated) = app
            .send(
                "PATCH",
                &format!("/admin/scholarships/{id}?email=mod@x.com"),
                Some("mod@x.com"),
                Some(json!({ "applicationFees": 5.0 })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["applicationFees"], 5.0);
        assert_eq!(updated["scholarshipName"], "New");

        let (status, _) = app
            .send("DELETE", &format!("/admin/scholarships/{id}?email=mod@x.com"), Some("mod@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.counts().await.scholarships, 0);
    }

    // ------------------------------------------------------------------
    // Applications
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_apply_for_someone_else_is_forbidden_without_insert() {
        let app = test_app();
        let s = scholarship("S", "Uni", 10.0, 0);
        app.seed(&s).await;

        let (status, body) = app
            .send(
                "POST",
                "/scholarApply",
                Some("a@x.com"),
                Some(json!({ "scholarshipId": s.id.to_string(), "userEmail": "b@x.com" })),
            )
            .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body, json!({ "message": "forbidden access" }));
        assert_eq!(app.counts().await.applications, 0);
    }

    #[tokio::test]
    async fn test_apply_without_cookie_is_401() {
        let app = test_app();
        let s = scholarship("S", "Uni", 10.0, 0);
        app.seed(&s).await;

        let (status, body) = app
            .send(
                "POST",
                "/scholarApply",
                None,
                Some(json!({ "scholarshipId": s.id.to_string(), "userEmail": "a@x.com" })),
            )
            .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "message": "unauthorized access" }));
        assert_eq!(app.counts().await.applications, 0);
    }

    #[tokio::test]
    async fn test_apply_check_and_duplicate() {
        let app = test_app();
        let s = scholarship("S", "Uni", 30.0, 0);
        let other = scholarship("Other", "Uni", 30.0, 0);
        app.seed(&s).await;
        app.seed(&other).await;

        let (status, body) = apply(&app, "a@x.com", &s).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["insertedId"].is_string());

        let (status, _) = apply(&app, "a@x.com", &s).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(app.counts().await.applications, 1);

        let (status, body) = app
            .send(
                "GET",
                &format!("/checkApply?email=a@x.com&scholarshipId={}", s.id),
                Some("a@x.com"),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "pending");
        assert_eq!(body["applicationFees"], 30.0);
        assert_eq!(body["phone"], "0100");

        let (status, body) = app
            .send(
                "GET",
                &format!("/checkApply?email=a@x.com&scholarshipId={}", other.id),
                Some("a@x.com"),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "message": "No application found for the given user and scholarship ID" })
        );
    }

    #[tokio::test]
    async fn test_apply_to_unknown_scholarship_is_404() {
        let app = test_app();
        let ghost = scholarship("Ghost", "Uni", 10.0, 0);

        let (status, _) = apply(&app, "a@x.com", &ghost).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_my_applications_are_query_owned() {
        let app = test_app();
        let s = scholarship("S", "Uni", 10.0, 0);
        app.seed(&s).await;
        apply(&app, "a@x.com", &s).await;

        let (status, body) = app
            .send("GET", "/myApplication?email=a@x.com", Some("a@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = app
            .send("GET", "/myApplication?email=a@x.com", Some("b@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_record_ownership_on_edit_and_cancel() {
        let app = test_app();
        let s = scholarship("S", "Uni", 10.0, 0);
        app.seed(&s).await;
        let (_, body) = apply(&app, "a@x.com", &s).await;
        let id = body["insertedId"].as_str().unwrap().to_string();

        // b owns the query email but not the record
        let (status, _) = app
            .send(
                "PATCH",
                &format!("/applications/{id}?email=b@x.com"),
                Some("b@x.com"),
                Some(json!({ "phone": "9999" })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app
            .send("DELETE", &format!("/applications/{id}?email=b@x.com"), Some("b@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(app.counts().await.applications, 1);

        let (status, body) = app
            .send(
                "PATCH",
                &format!("/applications/{id}?email=a@x.com"),
                Some("a@x.com"),
                Some(json!({ "phone": "9999" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["phone"], "9999");
    }

    #[tokio::test]
    async fn test_status_lifecycle_locks_applicant_edits() {
        let app = test_app();
        let s = scholarship("S", "Uni", 10.0, 0);
        app.seed(&s).await;
        let (_, body) = apply(&app, "a@x.com", &s).await;
        let id = body["insertedId"].as_str().unwrap().to_string();
        let status_uri = format!("/admin/applications/{id}/status?email=mod@x.com");

        // Plain users cannot process applications
        let (status, _) = app
            .send(
                "PATCH",
                &format!("/admin/applications/{id}/status?email=a@x.com"),
                Some("a@x.com"),
                Some(json!({ "status": "processing" })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // Skipping processing is not allowed
        let (status, _) = app
            .send("PATCH", &status_uri, Some("mod@x.com"), Some(json!({ "status": "completed" })))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = app
            .send(
                "PATCH",
                &status_uri,
                Some("mod@x.com"),
                Some(json!({ "status": "processing", "feedback": "Looking good" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "processing");
        assert_eq!(body["feedback"], "Looking good");

        let (status, _) = app
            .send("DELETE", &format!("/applications/{id}?email=a@x.com"), Some("a@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = app
            .send("GET", "/admin/applications?email=mod@x.com&status=processing", Some("mod@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = app
            .send("GET", "/admin/applications?email=mod@x.com&status=approved", Some("mod@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cancel_pending_application() {
        let app = test_app();
        let s = scholarship("S", "Uni", 10.0, 0);
        app.seed(&s).await;
        let (_, body) = apply(&app, "a@x.com", &s).await;
        let id = body["insertedId"].as_str().unwrap().to_string();

        let (status, body) = app
            .send("DELETE", &format!("/applications/{id}?email=a@x.com"), Some("a@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
        assert_eq!(app.counts().await.applications, 0);
    }

    // ------------------------------------------------------------------
    // Reviews
    // ------------------------------------------------------------------

    async fn review(app: &TestApp, as_user: &str, s: &Scholarship, rating: i64) -> (StatusCode, Value) {
        app.send(
            "POST",
            "/saveReview",
            Some(as_user),
            Some(json!({
                "scholarshipId": s.id.to_string(),
                "userEmail": as_user,
                "rating": rating,
                "comment": "Helpful"
            })),
        )
        .await
    }

    #[tokio::test]
    async fn test_reviews_and_average() {
        let app = test_app();
        let s = scholarship("S", "Uni", 10.0, 0);
        app.seed(&s).await;

        let uri = format!("/reviews/scholarship/{}", s.id);
        let (status, body) = app.send("GET", &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["averageRating"], 0.0);
        assert_eq!(body["totalReviews"], 0);

        let (status, body) = review(&app, "a@x.com", &s, 5).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Review saved successfully");
        assert!(body["reviewId"].is_string());
        review(&app, "b@x.com", &s, 4).await;

        let (_, body) = app.send("GET", &uri, None, None).await;
        assert_eq!(body["averageRating"], 4.5);
        assert_eq!(body["totalReviews"], 2);
        assert_eq!(body["reviews"][0]["scholarshipName"], "S");
    }

    #[tokio::test]
    async fn test_review_validation_and_ownership() {
        let app = test_app();
        let s = scholarship("S", "Uni", 10.0, 0);
        app.seed(&s).await;

        let (status, _) = review(&app, "a@x.com", &s, 6).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = review(&app, "a@x.com", &s, 0).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .send(
                "POST",
                "/saveReview",
                Some("a@x.com"),
                Some(json!({ "scholarshipId": s.id.to_string(), "userEmail": "b@x.com", "rating": 5 })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(app.counts().await.reviews, 0);

        let (_, body) = review(&app, "a@x.com", &s, 3).await;
        let id = body["reviewId"].as_str().unwrap().to_string();

        let (status, _) = app
            .send(
                "PATCH",
                &format!("/reviews/{id}?email=b@x.com"),
                Some("b@x.com"),
                Some(json!({ "rating": 1 })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app
            .send(
                "PATCH",
                &format!("/reviews/{id}?email=a@x.com"),
                Some("a@x.com"),
                Some(json!({ "rating": 4, "comment": "Updated" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rating"], 4);
        assert_eq!(body["comment"], "Updated");

        let (_, body) = app
            .send("GET", "/reviews?email=a@x.com", Some("a@x.com"), None)
            .await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = app
            .send("DELETE", &format!("/reviews/{id}?email=a@x.com"), Some("a@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.counts().await.reviews, 0);
    }

    #[tokio::test]
    async fn test_moderator_review_moderation() {
        let app = test_app();
        let s = scholarship("S", "Uni", 10.0, 0);
        app.seed(&s).await;
        let (_, body) = review(&app, "a@x.com", &s, 2).await;
        let id = body["reviewId"].as_str().unwrap().to_string();

        let (status, _) = app
            .send("GET", "/admin/reviews?email=a@x.com", Some("a@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app
            .send("GET", "/admin/reviews?email=mod@x.com", Some("mod@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = app
            .send("DELETE", &format!("/admin/reviews/{id}?email=mod@x.com"), Some("mod@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app
            .send("DELETE", &format!("/admin/reviews/{id}?email=mod@x.com"), Some("mod@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // ------------------------------------------------------------------
    // Payments
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_payment_intent_amount_in_cents() {
        let app = test_app();

        let (status, body) = app
            .send(
                "POST",
                "/create-payment-intent?email=a@x.com",
                Some("a@x.com"),
                Some(json!({ "price": 25.999 })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "clientSecret": "pi_test_secret_2599" }));
        assert_eq!(app.gateway.calls(), vec![(2599, "usd".to_string())]);
    }

    #[tokio::test]
    async fn test_invalid_price_never_reaches_processor() {
        let app = test_app();

        for price in [json!("abc"), json!(0), json!(-3), json!(null)] {
            let (status, body) = app
                .send(
                    "POST",
                    "/create-payment-intent?email=a@x.com",
                    Some("a@x.com"),
                    Some(json!({ "price": price })),
                )
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body, json!({ "message": "Invalid price" }));
        }

        let (status, _) = app
            .send("POST", "/create-payment-intent?email=a@x.com", None, Some(json!({ "price": 10 })))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        assert!(app.gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_processor_failure_is_502() {
        let app = test_app_with(vec![], true);

        let (status, body) = app
            .send(
                "POST",
                "/create-payment-intent?email=a@x.com",
                Some("a@x.com"),
                Some(json!({ "price": "10" })),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, json!({ "message": "Failed to create payment intent" }));
    }

    #[tokio::test]
    async fn test_save_and_check_payment() {
        let app = test_app();
        let s = scholarship("S", "Uni", 10.0, 0);
        let other = scholarship("Other", "Uni", 10.0, 0);

        let payment = json!({
            "email": "a@x.com",
            "scholarshipId": s.id.to_string(),
            "transactionId": "pi_123",
            "amount": 15.0
        });

        let (status, _) = app
            .send("POST", "/savePayment", Some("b@x.com"), Some(payment.clone()))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(app.counts().await.payments, 0);

        let (status, body) = app
            .send("POST", "/savePayment", Some("a@x.com"), Some(payment))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["insertedId"].is_string());

        let (status, body) = app
            .send("GET", &format!("/checkPayment?email=a@x.com&id={}", s.id), Some("a@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["transactionId"], "pi_123");

        let (status, body) = app
            .send("GET", &format!("/checkPayment?email=a@x.com&id={}", other.id), Some("a@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);

        let (_, body) = app
            .send("GET", "/paymentHistory?email=a@x.com", Some("a@x.com"), None)
            .await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, _) = app
            .send("GET", "/paymentHistory?email=a@x.com", Some("b@x.com"), None)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
