//! End-to-end tests for the job services client over both transports.
//!
//! REST calls hit a wiremock server; broker calls go through a recording
//! session or the in-process channel broker.

mod support;

use std::sync::Arc;

use jobwire_core::{BrokerSession, JobServicesClient};
use jobwire_domain::{
    BrokerConfig, ClientConfig, Command, JobData, JobRequestInstance, JobWireError, Pagination,
    RestConfig, ServiceResponse, ServiceResponsesList, TransportError, TransportKind,
};
use jobwire_infra::{build_client, connect_in_process};
use serde_json::{json, Value};
use support::RecordingBrokerSession;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rest_client(server: &MockServer) -> JobServicesClient {
    let config = ClientConfig {
        transport: TransportKind::Rest,
        rest: RestConfig { base_url: server.uri(), ..RestConfig::default() },
        ..ClientConfig::default()
    };
    build_client(&config, None).expect("rest client")
}

fn broker_client(session: Arc<RecordingBrokerSession>) -> JobServicesClient {
    let config = ClientConfig { transport: TransportKind::Broker, ..ClientConfig::default() };
    let session: Arc<dyn BrokerSession> = session;
    build_client(&config, Some(session)).expect("broker client")
}

fn statuses(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/* -------------------------------------------------------------------------- */
/* REST transport */
/* -------------------------------------------------------------------------- */

#[tokio::test]
async fn rest_schedule_returns_generated_id() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/server/jobs"))
        .and(query_param("containerId", "containerA"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!(42)))
        .expect(1)
        .mount(&server)
        .await;

    let job = JobRequestInstance::new("org.example.PrintOutCommand").with_data("businessKey", "bk-1");
    let id = rest_client(&server).schedule_request_in("containerA", &job).await?;

    assert_eq!(id, Some(42));
    Ok(())
}

#[tokio::test]
async fn rest_schedule_without_container_sends_empty_container_id() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/server/jobs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "value": 5 })))
        .mount(&server)
        .await;

    let id = rest_client(&server).schedule_request(&JobRequestInstance::new("cmd")).await?;
    assert_eq!(id, Some(5));

    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(received[0].url.query(), Some("containerId="));
    Ok(())
}

#[tokio::test]
async fn rest_schedule_with_wrapped_null_is_absent() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/server/jobs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "value": null })))
        .mount(&server)
        .await;

    let id = rest_client(&server).schedule_request(&JobRequestInstance::new("cmd")).await?;
    assert_eq!(id, None);
    Ok(())
}

#[tokio::test]
async fn rest_list_with_null_items_is_empty() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server/jobs"))
        .and(query_param("status", "ERROR"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "10"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "request-info-instance": null })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = rest_client(&server)
        .get_requests_by_status(&statuses(&["ERROR"]), Pagination::page(1, 10))
        .await?;

    assert!(result.is_empty());
    Ok(())
}

#[tokio::test]
async fn rest_unpaged_query_omits_paging_parameters() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server/jobs/containers/c1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request-info-instance": [
                { "request-instance-id": 11, "request-status": "QUEUED", "request-container-id": "c1" }
            ]
        })))
        .mount(&server)
        .await;

    let result = rest_client(&server)
        .get_requests_by_container("c1", &statuses(&["QUEUED", "RUNNING"]), Pagination::unpaged())
        .await?;
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].container_id.as_deref(), Some("c1"));

    let received = server.received_requests().await.unwrap_or_default();
    let query = received[0].url.query().unwrap_or_default().to_string();
    assert_eq!(query, "status=QUEUED&status=RUNNING");
    Ok(())
}

#[tokio::test]
async fn rest_routes_for_each_filter() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    for route in [
        "/server/jobs/keys/order-1",
        "/server/jobs/commands/org.example.Cmd",
        "/server/jobs/processes/instances/77",
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = rest_client(&server);
    assert!(client.get_requests_by_business_key("order-1", Pagination::unpaged()).await?.is_empty());
    assert!(client
        .get_requests_by_command("org.example.Cmd", Pagination::unpaged())
        .await?
        .is_empty());
    assert!(client
        .get_requests_by_process_instance(77, &[], Pagination::unpaged())
        .await?
        .is_empty());
    Ok(())
}

#[tokio::test]
async fn rest_get_by_id_sends_flags() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server/jobs/9"))
        .and(query_param("withErrors", "true"))
        .and(query_param("withData", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "request-instance-id": 9,
            "request-status": "ERROR",
            "request-errors": { "error-info-instance": [ { "id": 1, "request-id": 9 } ] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let info = rest_client(&server).get_request_by_id(9, true, false).await?;
    let info = info.expect("request info");
    assert_eq!(info.id, Some(9));
    assert_eq!(info.errors.map(|e| e.into_vec().len()), Some(1));
    Ok(())
}

#[tokio::test]
async fn rest_update_data_posts_map() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/server/jobs/4/data"))
        .and(query_param("containerId", "c2"))
        .and(body_json(json!({ "retries": 3 })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut data = JobData::new();
    data.insert("retries".into(), json!(3));
    rest_client(&server).update_request_data(4, Some("c2"), &data).await?;
    Ok(())
}

#[tokio::test]
async fn rest_error_status_surfaces_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/server/jobs/7"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Job 7 not found"))
        .mount(&server)
        .await;

    let err = rest_client(&server).cancel_request(7).await.unwrap_err();
    match err {
        JobWireError::Transport(TransportError::Status { status, body, .. }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "Job 7 not found");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

/* -------------------------------------------------------------------------- */
/* Broker transport */
/* -------------------------------------------------------------------------- */

#[tokio::test]
async fn broker_schedule_unwraps_wrapped_id() -> anyhow::Result<()> {
    let session = RecordingBrokerSession::new();
    session.respond(ServiceResponse::success(r#"{"value":42}"#));

    let job = JobRequestInstance::new("org.example.PrintOutCommand");
    let id = broker_client(session.clone()).schedule_request_in("containerA", &job).await?;
    assert_eq!(id, Some(42));

    let sent = session.take_last().expect("envelope sent");
    assert_eq!(sent.payload_type, "DescriptorCommand");
    assert_eq!(sent.routing_tag, "BPM");
    let command = sent.command();
    assert_eq!(command.method, "scheduleRequest");
    assert_eq!(command.arguments, vec![json!("containerA")]);
    assert_eq!(command.marshaller_format.as_deref(), Some("json"));

    let payload: Value = serde_json::from_str(command.payload.as_deref().unwrap_or_default())?;
    assert_eq!(payload["job-command"], "org.example.PrintOutCommand");

    assert!(session.take_last().is_none(), "reading the envelope clears it");
    Ok(())
}

#[tokio::test]
async fn broker_schedule_with_wrapped_null_is_absent() -> anyhow::Result<()> {
    let session = RecordingBrokerSession::new();
    session.respond(ServiceResponse::success(r#"{"value":null}"#));

    let id = broker_client(session).schedule_request(&JobRequestInstance::new("cmd")).await?;
    assert_eq!(id, None);
    Ok(())
}

#[tokio::test]
async fn broker_cancel_failure_is_remote_operation_error() {
    let session = RecordingBrokerSession::new();
    session.respond(ServiceResponse::failure("not found"));

    let err = broker_client(session.clone()).cancel_request(7).await.unwrap_err();
    assert_eq!(err, JobWireError::RemoteOperation("not found".into()));

    let sent = session.take_last().expect("envelope sent");
    assert_eq!(sent.command().arguments, vec![json!(7)]);
}

#[tokio::test]
async fn broker_failure_on_single_entity_skips_decoding() {
    let session = RecordingBrokerSession::new();
    let mut response = ServiceResponse::failure("boom");
    response.result = Some(json!("<<not decodable>>"));
    session.respond(response);

    let err = broker_client(session).get_request_by_id(1, false, false).await.unwrap_err();
    assert_eq!(err, JobWireError::RemoteOperation("boom".into()));
}

#[tokio::test]
async fn broker_empty_batch_is_protocol_violation() {
    let session = RecordingBrokerSession::new();
    session.respond_batch(ServiceResponsesList::default());

    let err = broker_client(session).requeue_request(3).await.unwrap_err();
    assert!(matches!(err, JobWireError::ProtocolViolation(_)));
}

#[tokio::test]
async fn broker_list_paging_matches_rest_numbers() -> anyhow::Result<()> {
    let session = RecordingBrokerSession::new();
    session.respond(ServiceResponse::success(r#"{"request-info-instance":null}"#));

    let result = broker_client(session.clone())
        .get_requests_by_business_key_and_status("bk", &statuses(&["DONE"]), Pagination::page(2, 25))
        .await?;
    assert!(result.is_empty());

    let sent = session.take_last().expect("envelope sent");
    assert_eq!(sent.command().method, "getRequestsByBusinessKey");
    assert_eq!(sent.command().arguments, vec![json!("bk"), json!(["DONE"]), json!(2), json!(25)]);
    Ok(())
}

#[tokio::test]
async fn broker_unpaged_list_sends_nulls() -> anyhow::Result<()> {
    let session = RecordingBrokerSession::new();

    let result = broker_client(session.clone())
        .get_requests_by_process_instance(5, &[], Pagination::unpaged())
        .await?;
    assert!(result.is_empty());

    let sent = session.take_last().expect("envelope sent");
    assert_eq!(
        sent.command().arguments,
        vec![json!(5), json!([]), Value::Null, Value::Null]
    );
    Ok(())
}

#[tokio::test]
async fn broker_get_by_id_requests_result_format() -> anyhow::Result<()> {
    let session = RecordingBrokerSession::new();
    session.respond(ServiceResponse::success(
        r#"{"request-instance-id": 12, "request-status": "DONE"}"#,
    ));

    let info = broker_client(session.clone()).get_request_by_id(12, true, true).await?;
    assert_eq!(info.and_then(|i| i.id), Some(12));

    let sent = session.take_last().expect("envelope sent");
    let command = sent.command();
    assert!(command.payload.is_none());
    assert_eq!(command.marshaller_format.as_deref(), Some("json"));
    assert_eq!(command.arguments, vec![json!(12), json!(true), json!(true)]);
    Ok(())
}

/* -------------------------------------------------------------------------- */
/* In-process broker */
/* -------------------------------------------------------------------------- */

#[tokio::test]
async fn in_process_broker_round_trip() -> anyhow::Result<()> {
    let config = ClientConfig {
        broker: BrokerConfig { timeout_secs: 5, queue_capacity: 4 },
        ..ClientConfig::default()
    };
    let (client, endpoint) = connect_in_process(&config)?;

    tokio::spawn(endpoint.serve(|message| {
        let reply = match message.envelope() {
            Ok(script) => {
                let Command::Descriptor(command) = &script.commands[0];
                match command.method.as_str() {
                    "scheduleRequest" => ServiceResponse::success(r#"{"value":101}"#),
                    "cancelRequest" => ServiceResponse::failure("already running"),
                    _ => ServiceResponse::no_response(),
                }
            }
            Err(e) => ServiceResponse::failure(e.to_string()),
        };
        ServiceResponsesList::single(reply)
    }));

    let id = client.schedule_request(&JobRequestInstance::new("cmd")).await?;
    assert_eq!(id, Some(101));

    let err = client.cancel_request(101).await.unwrap_err();
    assert!(err.is_remote_failure());

    let listed = client.get_requests_by_command("cmd", Pagination::unpaged()).await?;
    assert!(listed.is_empty());
    Ok(())
}
