mod common;

use common::fixtures::*;
use common::{GeneratedPdf, TestResult, init_logging, is_cancelled};
use refcards::{
    CancellationFlag, GenerationRequest, PipelineBuilder, PipelineError, ProgressReporter,
};
use refcards_traits::CodeEncoder;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

#[tokio::test]
async fn test_no_links_fails_before_encoding() -> TestResult {
    init_logging();

    let encoder = Arc::new(CountingEncoder::default());
    let pipeline = PipelineBuilder::new()
        .with_shared_encoder(encoder.clone() as Arc<dyn CodeEncoder>)
        .build()?;

    let err = pipeline
        .generate(GenerationRequest::new("no links here\nftp://nope.example\n"))
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::NoLinks));
    assert_eq!(err.to_string(), "No URLs found in uploaded file.");
    assert!(err.is_client_error());
    assert_eq!(encoder.calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[test]
fn test_invalid_config_is_a_validation_error() -> TestResult {
    init_logging();

    let err = GenerationRequest::new("https://example.com")
        .with_json_config(r#"{"paperSize": "B5"}"#)
        .unwrap_err();
    assert!(matches!(err, PipelineError::Validation(_)));

    let err = GenerationRequest::new("https://example.com")
        .with_json_config("{not json")
        .unwrap_err();
    assert!(err.is_client_error());
    Ok(())
}

#[test]
fn test_zero_concurrency_is_rejected() -> TestResult {
    let err = PipelineBuilder::new().with_concurrency(0).build().unwrap_err();
    assert!(matches!(err, PipelineError::Validation(_)));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_out_of_order_encoding_keeps_input_order() -> TestResult {
    init_logging();

    let pipeline = PipelineBuilder::new()
        .with_encoder(SlowFirstEncoder { total: 12 })
        .with_concurrency(4)
        .build()?;
    let request = GenerationRequest::new(referral_links(12))
        .with_json_config(r#"{"urlDisplayStyle": "full"}"#)?;
    let output = pipeline.generate(request).await?;
    let pdf = GeneratedPdf::from_bytes(output.document)?;

    let text = common::pdf_assertions::extract_text(&pdf.doc);
    let mut last = 0;
    for i in 1..=12 {
        let label = text
            .find(&format!("#{:03}", i))
            .unwrap_or_else(|| panic!("label #{:03} missing", i));
        let code = text
            .find(&format!("CODE{:04}", i))
            .unwrap_or_else(|| panic!("code {} missing", i));
        assert!(label >= last, "label #{:03} out of order", i);
        assert!(code > label, "code {} printed before its label", i);
        last = code;
    }
    Ok(())
}

#[tokio::test]
async fn test_encoder_failure_produces_no_document() -> TestResult {
    init_logging();

    let pipeline = PipelineBuilder::new()
        .with_encoder(FailingEncoder { needle: "CODE0003" })
        .with_concurrency(2)
        .build()?;
    let err = pipeline
        .generate(GenerationRequest::new(referral_links(6)))
        .await
        .unwrap_err();

    match err {
        PipelineError::Encoding { index, url, .. } => {
            assert_eq!(index, 2);
            assert!(url.ends_with("CODE0003"));
        }
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_progress_is_monotonic_and_completes() -> TestResult {
    init_logging();

    let pipeline = PipelineBuilder::new()
        .with_encoder(SleepyEncoder {
            delay: Duration::from_millis(5),
        })
        .with_concurrency(2)
        .build()?;
    let job = pipeline.spawn(GenerationRequest::new(referral_links(20)));

    let mut progress = job.progress();
    let watcher = tokio::spawn(async move {
        let mut seen = vec![*progress.borrow_and_update()];
        while progress.changed().await.is_ok() {
            seen.push(*progress.borrow_and_update());
        }
        seen
    });

    let output = job.join().await?;
    let seen = watcher.await?;

    assert_eq!(output.stats.total_codes, 20);
    assert_eq!(seen.last(), Some(&100));
    assert!(seen.windows(2).all(|w| w[0] <= w[1]), "progress went backwards: {seen:?}");
    Ok(())
}

#[tokio::test]
async fn test_generate_with_reports_through_the_given_reporter() -> TestResult {
    init_logging();

    let pipeline = PipelineBuilder::new()
        .with_encoder(CountingEncoder::default())
        .build()?;
    let (reporter, receiver) = ProgressReporter::new();
    pipeline
        .generate_with(
            GenerationRequest::new(referral_links(3)),
            &reporter,
            &CancellationFlag::new(),
        )
        .await?;
    assert_eq!(*receiver.borrow(), 100);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancelled_job_stops_early() -> TestResult {
    init_logging();

    let pipeline = PipelineBuilder::new()
        .with_encoder(SleepyEncoder {
            delay: Duration::from_millis(50),
        })
        .with_concurrency(1)
        .build()?;
    let job = pipeline.spawn(GenerationRequest::new(referral_links(40)));
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(!job.is_finished());
    job.cancel();

    let result = job.join().await;
    assert!(is_cancelled(&result), "expected cancellation, got {:?}", result.err());
    Ok(())
}

#[tokio::test]
async fn test_cancel_flag_set_before_start() -> TestResult {
    init_logging();

    let encoder = Arc::new(CountingEncoder::default());
    let pipeline = PipelineBuilder::new()
        .with_shared_encoder(encoder.clone() as Arc<dyn CodeEncoder>)
        .build()?;
    let cancel = CancellationFlag::new();
    cancel.cancel();

    let result = pipeline
        .generate_with(
            GenerationRequest::new(referral_links(5)),
            &ProgressReporter::detached(),
            &cancel,
        )
        .await;
    assert!(is_cancelled(&result));
    assert_eq!(encoder.calls.load(Ordering::SeqCst), 0);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_jobs_share_a_pipeline() -> TestResult {
    init_logging();

    let pipeline = PipelineBuilder::new()
        .with_encoder(CountingEncoder::default())
        .build()?;
    let a = pipeline.spawn(GenerationRequest::new(referral_links(9)));
    let b = pipeline.spawn(GenerationRequest::new(referral_links(19)));

    let (a, b) = (a.join().await?, b.join().await?);
    assert_eq!(a.stats.total_pages, 1);
    assert_eq!(b.stats.total_pages, 3);
    assert_eq!(GeneratedPdf::from_bytes(b.document)?.page_count(), 3);
    Ok(())
}
