//! Backend, job and provider behaviour against a mock server.

use std::sync::Arc;
use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use hqs_adapter_honeywell::{
    ClientConfig, HoneywellBackend, HoneywellClient, HoneywellJob, HoneywellProvider, RetryPolicy,
};
use hqs_hal::{Backend, ChainTokenProvider, HalError, Job, JobId, JobStatus, Qobj};

const MACHINE: &str = "HQS-LT-S1";

fn shared_client(server: &MockServer) -> Arc<HoneywellClient> {
    let config = ClientConfig::default()
        .with_base_url(server.base_url())
        .with_retry(RetryPolicy::none());
    Arc::new(
        HoneywellClient::with_config(config, Arc::new(ChainTokenProvider::new()))
            .unwrap()
            .with_token("test-token"),
    )
}

fn backend_for(server: &MockServer) -> HoneywellBackend {
    HoneywellBackend::new(MACHINE, shared_client(server))
}

// -- status() ---------------------------------------------------------------

#[tokio::test]
async fn test_status_valid() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/machine/HQS-LT-S1");
            then.status(200).json_body(json!({
                "name": MACHINE,
                "operational": true,
                "pending_jobs": 5,
                "status_msg": "active"
            }));
        })
        .await;

    let status = backend_for(&server).status().await.unwrap();
    assert!(status.operational);
    assert_eq!(status.pending_jobs, 5);
    assert_eq!(status.status_msg.as_deref(), Some("active"));
}

#[tokio::test]
async fn test_status_missing_field_is_lookup_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/machine/HQS-LT-S1");
            then.status(200)
                .json_body(json!({"operational": true, "status_msg": null}));
        })
        .await;

    let err = backend_for(&server).status().await.unwrap_err();
    match err {
        HalError::Lookup(msg) => {
            assert!(msg.starts_with("Couldn't get backend status: "), "{msg}");
            assert!(msg.contains("missing field `pending_jobs`"), "{msg}");
        }
        other => panic!("expected lookup error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_status_wrong_type_is_lookup_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/machine/HQS-LT-S1");
            then.status(200)
                .json_body(json!({"operational": "yes", "pending_jobs": 0}));
        })
        .await;

    let err = backend_for(&server).status().await.unwrap_err();
    assert!(matches!(err, HalError::Lookup(msg) if msg.contains("invalid type")));
}

#[tokio::test]
async fn test_status_transport_error_passes_through() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/machine/HQS-LT-S1");
            then.status(404).body("Machine not found");
        })
        .await;

    let err = backend_for(&server).status().await.unwrap_err();
    assert!(matches!(err, HalError::Api { status: 404, .. }));
}

// -- run() / jobs -------------------------------------------------------------

#[tokio::test]
async fn test_run_submits_once_and_returns_handle() {
    let server = MockServer::start_async().await;
    let submit = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/job");
            then.status(200)
                .json_body(json!({"job": "job-1", "status": "queued"}));
        })
        .await;

    let backend = backend_for(&server);
    let job = backend
        .run(Qobj::new("OPENQASM 2.0;", 10))
        .await
        .unwrap();

    submit.assert_calls_async(1).await;
    assert_eq!(job.job_id(), Some(&JobId::new("job-1")));
    assert_eq!(job.current_status(), &JobStatus::Submitted);
    assert_eq!(job.backend_name(), MACHINE);
    assert!(job.submitted_at().is_some());
}

#[tokio::test]
async fn test_run_submission_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/job");
            then.status(400).body("bad program");
        })
        .await;

    let err = backend_for(&server)
        .run(Qobj::new("garbage", 10))
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::Api { status: 400, message } if message == "bad program"));
}

#[tokio::test]
async fn test_run_submits_once_on_gateway_error() {
    let server = MockServer::start_async().await;
    let submit = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/job");
            then.status(502).body("bad gateway");
        })
        .await;

    let backend = HoneywellBackend::new(MACHINE, {
        let config = ClientConfig::default()
            .with_base_url(server.base_url())
            .with_retry(RetryPolicy {
                max_retries: 3,
                initial_backoff: Duration::from_millis(1),
                max_backoff: Duration::from_millis(5),
            });
        Arc::new(
            HoneywellClient::with_config(config, Arc::new(ChainTokenProvider::new()))
                .unwrap()
                .with_token("test-token"),
        )
    });

    let err = backend.run(Qobj::new("OPENQASM 2.0;", 10)).await.unwrap_err();

    submit.assert_calls_async(1).await;
    assert!(matches!(err, HalError::Api { status: 502, .. }));
}

#[tokio::test]
async fn test_job_lifecycle_to_completion() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/job");
            then.status(200)
                .json_body(json!({"job": "job-2", "status": "queued"}));
        })
        .await;
    let mut running = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/job/job-2");
            then.status(200)
                .json_body(json!({"job": "job-2", "status": "running"}));
        })
        .await;

    let backend = backend_for(&server);
    let mut job = backend
        .run(Qobj::new("OPENQASM 2.0;", 4).with_name("bell"))
        .await
        .unwrap();

    assert_eq!(job.status().await.unwrap(), JobStatus::Running);
    running.delete_async().await;

    let completed = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/job/job-2");
            then.status(200).json_body(json!({
                "job": "job-2",
                "status": "completed",
                "results": {"c": ["00", "11", "11", "00"]}
            }));
        })
        .await;

    assert_eq!(job.status().await.unwrap(), JobStatus::Completed);
    assert!(job.finished_at().is_some());

    // Terminal state is sticky: no further polling, result served from the
    // last response.
    assert_eq!(job.status().await.unwrap(), JobStatus::Completed);
    let result = job.result().await.unwrap();
    completed.assert_calls_async(1).await;

    assert_eq!(result.shots, 4);
    assert_eq!(result.counts.get("00"), 2);
    assert_eq!(result.counts.get("11"), 2);
    assert!(result.raw.is_some());
}

#[tokio::test]
async fn test_job_failed() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/job/job-3");
            then.status(200).json_body(json!({
                "job": "job-3",
                "status": "failed",
                "error": {"code": 21, "text": "circuit too deep"}
            }));
        })
        .await;

    let backend = backend_for(&server);
    let mut job = backend.retrieve_job(&JobId::new("job-3"));

    assert_eq!(
        job.status().await.unwrap(),
        JobStatus::Failed("circuit too deep".into())
    );
    let err = job.result().await.unwrap_err();
    assert!(matches!(err, HalError::JobFailed(msg) if msg == "circuit too deep"));

    // Failed is final: the result comes from the cached state.
    mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn test_cancelled_job_result_needs_no_refresh() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/job/job-9");
            then.status(200)
                .json_body(json!({"job": "job-9", "status": "canceled"}));
        })
        .await;

    let mut job = backend_for(&server).retrieve_job(&JobId::new("job-9"));
    assert_eq!(job.status().await.unwrap(), JobStatus::Cancelled);
    assert!(matches!(job.result().await, Err(HalError::InvalidState(_))));
    mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn test_unknown_job_is_api_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/job/missing");
            then.status(404).body("Job not found");
        })
        .await;

    let mut job = backend_for(&server).retrieve_job(&JobId::new("missing"));
    let err = job.status().await.unwrap_err();
    assert!(matches!(err, HalError::Api { status: 404, .. }));
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_job_id_cannot_escape_job_resource() {
    let server = MockServer::start_async().await;
    let machines = server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/machine/");
            then.status(200).json_body(json!([]));
        })
        .await;

    let mut job = backend_for(&server).retrieve_job(&JobId::new("../machine/"));
    let err = job.status().await.unwrap_err();

    machines.assert_calls_async(0).await;
    assert!(matches!(err, HalError::Api { status: 404, .. }));
}

#[tokio::test]
async fn test_result_before_completion() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/job/job-4");
            then.status(200)
                .json_body(json!({"job": "job-4", "status": "queued", "queue-position": 3}));
        })
        .await;

    let mut job = backend_for(&server).retrieve_job(&JobId::new("job-4"));
    let err = job.result().await.unwrap_err();
    assert!(matches!(err, HalError::InvalidState(_)));
    assert_eq!(job.current_status(), &JobStatus::Queued);
    assert_eq!(job.last_response().and_then(|r| r.queue_position), Some(3));
}

#[tokio::test]
async fn test_wait_for_final_state() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/job/job-5");
            then.status(200).json_body(json!({
                "job": "job-5",
                "status": "completed",
                "results": {"c": ["1", "1"]}
            }));
        })
        .await;

    let mut job = backend_for(&server).retrieve_job(&JobId::new("job-5"));
    let result = job
        .wait_for_final_state(Duration::from_secs(5), Duration::from_millis(10))
        .await
        .unwrap();
    assert_eq!(result.counts.get("1"), 2);
}

#[tokio::test]
async fn test_wait_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/job/job-6");
            then.status(200)
                .json_body(json!({"job": "job-6", "status": "running"}));
        })
        .await;

    let mut job = backend_for(&server).retrieve_job(&JobId::new("job-6"));
    let err = job
        .wait_for_final_state(Duration::from_millis(30), Duration::from_millis(10))
        .await
        .unwrap_err();
    assert!(matches!(err, HalError::Timeout(id) if id == "job-6"));
}

#[tokio::test]
async fn test_cancel_job() {
    let server = MockServer::start_async().await;
    let cancel = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/job/job-7/cancel");
            then.status(200).json_body(json!({}));
        })
        .await;

    let mut job = backend_for(&server).retrieve_job(&JobId::new("job-7"));
    job.cancel().await.unwrap();
    cancel.assert_async().await;
}

#[tokio::test]
async fn test_submit_twice_rejected() {
    let server = MockServer::start_async().await;
    let submit = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/job");
            then.status(200)
                .json_body(json!({"job": "job-8", "status": "queued"}));
        })
        .await;

    let mut job = backend_for(&server)
        .run(Qobj::new("OPENQASM 2.0;", 1))
        .await
        .unwrap();
    let err = job.submit().await.unwrap_err();

    submit.assert_calls_async(1).await;
    assert!(matches!(err, HalError::InvalidState(msg) if msg.contains("job-8")));
}

#[tokio::test]
async fn test_unsubmitted_job_needs_no_network() {
    let server = MockServer::start_async().await;
    let any = server
        .mock_async(|_when, then| {
            then.status(500);
        })
        .await;

    let mut job = HoneywellJob::new(MACHINE, shared_client(&server), Qobj::new("p", 1));
    assert_eq!(job.status().await.unwrap(), JobStatus::Created);
    assert!(job.job_id().is_none());
    assert!(matches!(job.cancel().await, Err(HalError::InvalidState(_))));

    any.assert_calls_async(0).await;
}

#[tokio::test]
async fn test_retrieve_jobs_no_network() {
    let server = MockServer::start_async().await;
    let any = server
        .mock_async(|_when, then| {
            then.status(500);
        })
        .await;

    let backend = backend_for(&server);
    let ids = [JobId::new("id1"), JobId::new("id2")];
    let jobs = backend.retrieve_jobs(&ids);

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].job_id(), Some(&ids[0]));
    assert_eq!(jobs[1].job_id(), Some(&ids[1]));
    assert!(jobs.iter().all(|j| j.backend_name() == MACHINE));
    any.assert_calls_async(0).await;
}

// -- provider -----------------------------------------------------------------

#[tokio::test]
async fn test_provider_lists_named_backends() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/machine/");
            then.status(200).json_body(json!([
                {"name": "HQS-LT-S1"},
                {"name": "HQS-LT-S1-SIM"},
                {"id": 3}
            ]));
        })
        .await;

    let provider = HoneywellProvider::from_shared(shared_client(&server));
    let backends = provider.backends().await.unwrap();
    let names: Vec<&str> = backends.iter().map(|b| b.name()).collect();
    assert_eq!(names, ["HQS-LT-S1", "HQS-LT-S1-SIM"]);

    let direct = provider.get_backend("HQS-LT-S2");
    assert_eq!(direct.name(), "HQS-LT-S2");
    assert!(Arc::ptr_eq(direct.client(), provider.client()));
}
