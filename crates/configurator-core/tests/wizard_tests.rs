//! End-to-end tests: import, walk the wizard, submit, deliver.

mod common;

use common::{create_test_service, create_test_service_with_webhook, garden_room_definition, import, veranda_definition};
use configurator_core::{
    engine::Position, AnswerValue, AppointmentSelection, ConfiguratorKey, ContactInfo, Id,
    NavigationError, SubmissionStatus, ValidationError,
};
use serde_json::Value;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

fn contact() -> ContactInfo {
    ContactInfo::new("Ann de Vries", "ann@example.com", "0612345678")
}

/// Accepts one webhook request, answers 200 and returns the JSON body.
async fn capture_webhook() -> (String, tokio::task::JoinHandle<Value>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/hook", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buffer = [0u8; 4096];
        let body = loop {
            let n = stream.read(&mut buffer).await.unwrap();
            assert!(n > 0, "connection closed before the body arrived");
            request.extend_from_slice(&buffer[..n]);
            let text = String::from_utf8_lossy(&request).into_owned();
            if let Some(header_end) = text.find("\r\n\r\n") {
                let length = text[..header_end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= header_end + 4 + length {
                    break request[header_end + 4..header_end + 4 + length].to_vec();
                }
            }
        };
        stream
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
            .await
            .unwrap();
        stream.shutdown().await.ok();
        serde_json::from_slice(&body).unwrap()
    });
    (url, handle)
}

#[tokio::test]
async fn test_full_wizard_with_optional_steps() {
    let (_temp_dir, service) = create_test_service().await;
    import(&service, veranda_definition()).await;

    let mut session = service
        .start_session(&ConfiguratorKey::from("veranda"))
        .await
        .unwrap();

    // color is pre-selected with the first active option
    assert_eq!(
        session.answers().get("color"),
        Some(&AnswerValue::Text("anthracite".into()))
    );
    session.set_answer("color", "black");
    session.advance().unwrap();

    // width is required and bounded
    let rejected = session.advance();
    assert!(matches!(
        rejected,
        Err(NavigationError::Invalid { ref field, error: ValidationError::MissingRequired }) if field == "width"
    ));
    session.set_answer("width", 50.0);
    assert!(session.advance().is_err());
    session.set_answer("width", 500.0);
    session.advance().unwrap();

    assert_eq!(session.position(), Position::Gateway);
    assert_eq!(session.advance(), Err(NavigationError::GatewayUnanswered));
    session.choose_more_customization(true);
    session.advance().unwrap();

    match session.position() {
        Position::Step(step) => assert_eq!(step.field_name, "lighting"),
        other => panic!("expected the lighting step, got {other:?}"),
    }
    session.set_answer("lighting", "spots");
    session.advance().unwrap();
    assert!(session.is_complete());

    let submission = service
        .submit(&session, contact(), AppointmentSelection::none())
        .await
        .unwrap();

    assert_eq!(submission.status, SubmissionStatus::New);
    assert_eq!(
        submission.answers.get("color"),
        Some(&AnswerValue::Text("black".into()))
    );
    assert_eq!(submission.answers.get("width"), Some(&AnswerValue::Number(500.0)));
    assert_eq!(
        submission.answers.get("lighting"),
        Some(&AnswerValue::Text("spots".into()))
    );
    assert_eq!(submission.answers.more_customization(), Some(true));

    let summaries = service.list_configurators().await.unwrap();
    assert_eq!(summaries[0].submission_count, 1);
}

#[tokio::test]
async fn test_declining_customization_skips_optional_steps() {
    let (_temp_dir, service) = create_test_service().await;
    import(&service, veranda_definition()).await;

    let mut session = service
        .start_session(&ConfiguratorKey::from("veranda"))
        .await
        .unwrap();
    session.advance().unwrap();
    session.set_answer("width", 300.0);
    session.advance().unwrap();
    session.choose_more_customization(true);
    session.advance().unwrap();
    session.set_answer("lighting", "led");

    // back to the gateway and say no this time
    assert!(session.retreat());
    assert_eq!(session.position(), Position::Gateway);
    assert!(session.retreat());
    assert_eq!(session.answers().more_customization(), None);
    session.advance().unwrap();
    session.choose_more_customization(false);
    session.advance().unwrap();
    assert!(session.is_complete());

    let submission = service
        .submit(&session, contact(), AppointmentSelection::none())
        .await
        .unwrap();
    assert!(!submission.answers.contains("lighting"));
    assert_eq!(submission.answers.more_customization(), Some(false));
}

#[tokio::test]
async fn test_conditional_step_follows_earlier_answers() {
    let (_temp_dir, service) = create_test_service().await;
    import(&service, garden_room_definition()).await;

    let mut session = service
        .start_session(&ConfiguratorKey::from("garden-room"))
        .await
        .unwrap();
    let visible = |session: &configurator_core::WizardSession| -> Vec<String> {
        session
            .visible_steps()
            .iter()
            .map(|step| step.field_name.clone())
            .collect()
    };

    assert!(!visible(&session).contains(&"insulation".to_string()));
    session.set_answer("height", 280.0);
    assert!(!visible(&session).contains(&"insulation".to_string()));
    session.set_answer("extras", vec!["heater".to_string()]);
    assert!(visible(&session).contains(&"insulation".to_string()));
    session.set_answer("height", 220.0);
    assert!(!visible(&session).contains(&"insulation".to_string()));
}

#[tokio::test]
async fn test_submission_is_posted_to_webhook() {
    let (url, server) = capture_webhook().await;
    let (_temp_dir, service) = create_test_service_with_webhook(Some(url)).await;
    import(&service, veranda_definition()).await;

    let mut session = service
        .start_session(&ConfiguratorKey::from("veranda"))
        .await
        .unwrap();
    session.advance().unwrap();
    session.set_answer("width", 450.0);
    session.advance().unwrap();
    session.choose_more_customization(false);
    session.advance().unwrap();

    let appointment =
        AppointmentSelection::requested(Some("measurement".into()), "2026-11-02", "10:00");
    let submission = service
        .submit(&session, contact(), appointment)
        .await
        .unwrap();

    let body = server.await.unwrap();
    assert_eq!(body["event"], "configurator.submission");
    assert_eq!(body["submissionId"], submission.id);
    assert_eq!(body["configurator"]["slug"], "veranda");
    assert_eq!(body["answers"]["width"], 450.0);
    assert_eq!(body["contact"]["email"], "ann@example.com");
    assert_eq!(body["appointment"]["date"], "2026-11-02");
}

#[tokio::test]
async fn test_failed_webhook_does_not_fail_submission() {
    // nothing listens on the discard port
    let url = "http://127.0.0.1:9/hook".to_string();
    let (_temp_dir, service) = create_test_service_with_webhook(Some(url)).await;
    import(&service, veranda_definition()).await;

    let mut session = service
        .start_session(&ConfiguratorKey::from("veranda"))
        .await
        .unwrap();
    session.advance().unwrap();
    session.set_answer("width", 450.0);
    session.advance().unwrap();
    session.choose_more_customization(false);
    session.advance().unwrap();

    let submission = service
        .submit(&session, contact(), AppointmentSelection::none())
        .await
        .expect("submission must succeed without the webhook");
    assert!(service
        .get_submission(&Id { id: submission.id })
        .await
        .unwrap()
        .is_some());
}
