use contact_form::domain::{FormField, InputError, SubmissionOutcome};
use contact_form::notifications::ToastKind;
use contact_form::page::ContactFormFields;
use contact_form::submission::{BUSY_MESSAGE, SUCCESS_MESSAGE, Submission, failure_message};
use std::time::Duration;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::spawn_app;

#[tokio::test]
async fn valid_submission_sends_the_mapped_template_params() {
    let app = spawn_app().await;
    app.mock_email_service(200, 1).await;
    app.fill_form(
        "  Mary Jane Watson ",
        "mary.jane@dailybugle.com",
        "Spider sighting",
        "Saw him on 5th avenue.",
    );

    let outcome = app.submit_and_wait().await;

    assert_eq!(outcome, SubmissionOutcome::Success);
    let bodies = app.sent_bodies().await;
    assert_eq!(bodies.len(), 1);
    let body = &bodies[0];
    assert_eq!(body["service_id"], app.settings.email_client.service_id.as_str());
    assert_eq!(body["template_id"], app.settings.email_client.template_id.as_str());
    assert_eq!(body["user_id"], app.settings.email_client.public_key.as_str());

    let params = body["template_params"].as_object().unwrap();
    assert_eq!(params.len(), 7);
    assert_eq!(params["first_name"], "Mary");
    assert_eq!(params["last_name"], "Jane Watson");
    assert_eq!(params["problem"], "Spider sighting");
    assert_eq!(params["mail"], "mary.jane@dailybugle.com");
    assert_eq!(params["msg"], "Saw him on 5th avenue.");
    assert_eq!(params["address"], "");
    assert_eq!(params["phone"], "");
}

#[tokio::test]
async fn incomplete_form_is_rejected_without_dispatch() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let test_cases = [
        ("", "a@b.co", "subject", "message", FormField::Name, "empty name"),
        ("Jane", "", "subject", "message", FormField::Email, "empty email"),
        ("Jane", "a@b.co", " ", "message", FormField::Subject, "whitespace subject"),
        ("Jane", "a@b.co", "subject", "\n\t", FormField::Message, "whitespace message"),
        ("", "", "", "", FormField::Name, "empty form"),
    ];

    for (name, email, subject, message, field, case) in test_cases {
        app.fill_form(name, email, subject, message);

        match app.submit() {
            Submission::Rejected(e) => assert_eq!(
                e,
                InputError::MissingField(field),
                "Wrong field reported for {case}"
            ),
            other => panic!("The form was not rejected for {case}: {other:?}"),
        }
        assert_eq!(
            app.take_alerts(),
            ["Please fill in all fields before submitting."],
            "Missing alert for {case}"
        );
        app.advance(app.restore_delay());
    }
}

#[tokio::test]
async fn malformed_email_is_rejected_without_dispatch() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    for email in ["a@b", "a b@c.com", "plainaddress", "@b.co", "a@.co", "a@b@c.com"] {
        app.fill_form("Jane Doe", email, "subject", "message");

        match app.submit() {
            Submission::Rejected(e) => assert_eq!(e, InputError::InvalidEmail),
            other => panic!("{email} was accepted: {other:?}"),
        }
        assert_eq!(
            app.take_alerts(),
            ["Please enter a valid email address."],
            "Missing alert for {email}"
        );
        app.advance(app.restore_delay());
    }
}

#[tokio::test]
async fn success_clears_the_form_and_shows_one_success_toast() {
    let app = spawn_app().await;
    app.mock_email_service(200, 1).await;
    app.fill_valid_form();

    app.submit_and_wait().await;

    let page = app.app.page().lock();
    assert_eq!(page.form, ContactFormFields::default());
    assert_eq!(page.toasts_shown(), 1);
    let toast = page.toast().unwrap();
    assert_eq!(toast.kind(), ToastKind::Success);
    assert_eq!(toast.message(), SUCCESS_MESSAGE);
    assert!(page.alerts().is_empty());
}

#[tokio::test]
async fn failure_keeps_the_form_and_shows_one_error_toast() {
    let app = spawn_app().await;
    app.mock_email_service(500, 1).await;
    app.fill_valid_form();
    let filled = app.app.page().lock().form.clone();

    let outcome = app.submit_and_wait().await;

    assert!(matches!(outcome, SubmissionOutcome::Failure { .. }));
    let page = app.app.page().lock();
    assert_eq!(page.form, filled);
    assert_eq!(page.toasts_shown(), 1);
    let toast = page.toast().unwrap();
    assert_eq!(toast.kind(), ToastKind::Error);
    assert_eq!(
        toast.message(),
        failure_message(&app.settings.contact_form.fallback_contact)
    );
    assert!(toast.message().contains("chandany67071@gmail.com"));
    // The failure detail never reaches the user.
    assert!(page.alerts().is_empty());
}

#[tokio::test]
async fn slow_email_service_is_a_failure() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(60)))
        .mount(&app.email_server)
        .await;
    app.fill_valid_form();

    // The harness timeout is well under a second.
    let outcome = tokio::time::timeout(Duration::from_secs(2), app.submit_and_wait())
        .await
        .expect("The email client did not time out");

    assert!(matches!(outcome, SubmissionOutcome::Failure { .. }));
    assert_eq!(
        app.app.page().lock().toast().unwrap().kind(),
        ToastKind::Error
    );
}

#[tokio::test]
async fn second_submit_while_in_flight_is_rejected_as_busy() {
    let app = spawn_app().await;
    Mock::given(path("/api/v1.0/email/send"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(200)))
        .expect(2)
        .mount(&app.email_server)
        .await;
    app.fill_valid_form();

    let Submission::Dispatched(first) = app.submit() else {
        panic!("The first submit was not dispatched");
    };
    assert!(matches!(app.submit(), Submission::Busy));
    assert_eq!(app.take_alerts(), [BUSY_MESSAGE]);

    first.await.unwrap();
    // Still locked until the button comes back.
    app.fill_valid_form();
    assert!(matches!(app.submit(), Submission::Busy));
    assert!(app.take_alerts().is_empty());
    assert!(app.app.handler().is_in_flight());

    app.advance(app.restore_delay());
    assert!(!app.app.handler().is_in_flight());

    let outcome = app.submit_and_wait().await;
    assert_eq!(outcome, SubmissionOutcome::Success);
}

#[tokio::test]
async fn resubmitting_right_after_a_rejection_shows_no_busy_alert() {
    let app = spawn_app().await;
    app.mock_email_service(200, 1).await;
    app.fill_form("Jane Doe", "a@b", "subject", "message");

    assert!(matches!(
        app.submit(),
        Submission::Rejected(InputError::InvalidEmail)
    ));
    assert_eq!(app.take_alerts(), ["Please enter a valid email address."]);

    // Fixed before the button came back: held, but nothing is being sent.
    app.fill_form("Jane Doe", "a@b.co", "subject", "message");
    assert!(matches!(app.submit(), Submission::Busy));
    assert!(app.take_alerts().is_empty());

    app.advance(app.restore_delay());
    let outcome = app.submit_and_wait().await;
    assert_eq!(outcome, SubmissionOutcome::Success);
    assert!(app.take_alerts().is_empty());
}

#[tokio::test]
async fn busy_submit_leaves_the_sending_button_alone() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(100)))
        .expect(1)
        .mount(&app.email_server)
        .await;
    app.fill_valid_form();
    let before = app.button();

    let Submission::Dispatched(first) = app.submit() else {
        panic!("The first submit was not dispatched");
    };
    let sending = app.button();
    assert!(matches!(app.submit(), Submission::Busy));
    assert_eq!(app.button(), sending);

    first.await.unwrap();
    app.advance(app.restore_delay());
    assert_eq!(app.button(), before);
}

#[tokio::test]
async fn a_new_outcome_replaces_the_previous_toast() {
    let app = spawn_app().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .up_to_n_times(1)
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(400))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.fill_valid_form();
    app.submit_and_wait().await;
    let first = app.app.page().lock().toast().unwrap().id();
    app.advance(app.restore_delay());

    app.fill_valid_form();
    app.submit_and_wait().await;

    let page = app.app.page().lock();
    let toast = page.toast().unwrap();
    assert_ne!(toast.id(), first);
    assert_eq!(toast.kind(), ToastKind::Error);
    assert_eq!(page.toasts_shown(), 2);
}
