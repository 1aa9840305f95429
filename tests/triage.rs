use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use ndarray::Array2;
use symptom_triage::{
    data::{ModelColumns, SymptomDictionary},
    model::{classify, Classifier, DiagnosisCategory},
    nlp::{assemble, MatchPolicy},
    report::Outcome,
    TriageContext, TriageError,
};

/// Flags only the respiratory category and counts invocations.
struct Recording {
    calls: Arc<AtomicUsize>,
    fail: bool,
    width: usize,
}

impl Classifier for Recording {
    fn n_features(&self) -> usize {
        self.width
    }

    fn predict(&self, x: &Array2<f64>) -> anyhow::Result<Array2<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("model exploded");
        }
        Ok(Array2::from_shape_fn((x.nrows(), 5), |(_, j)| u8::from(j == 0)))
    }

    fn predict_proba(&self, x: &Array2<f64>) -> anyhow::Result<Vec<Array2<f64>>> {
        Ok((0..5)
            .map(|j| {
                let p = if j == 0 { 0.9 } else { 0.1 };
                Array2::from_shape_fn((x.nrows(), 2), |(_, k)| if k == 1 { p } else { 1.0 - p })
            })
            .collect())
    }
}

fn columns() -> ModelColumns {
    ModelColumns::new(vec!["BATUK".into(), "DEMAM".into(), "MUAL".into(), "PUSING".into()]).unwrap()
}

fn context(fail: bool) -> (TriageContext, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let classifier = Recording {
        calls: Arc::clone(&calls),
        fail,
        width: 4,
    };
    let dictionary = SymptomDictionary::from_pairs([
        ("batuk", "BATUK"),
        ("demam", "DEMAM"),
        ("panas", "DEMAM"),
        ("pusing", "PUSING"),
        ("ruam", "RUAM"),
    ]);
    let ctx = TriageContext::new(dictionary, columns(), Box::new(classifier), MatchPolicy::All);
    (ctx, calls)
}

#[test]
fn feature_vector_follows_column_order() {
    let assembly = assemble(["PUSING", "RUAM", "BATUK", "PUSING"], &columns());
    assert_eq!(assembly.vector.columns(), columns().as_slice());
    assert_eq!(assembly.vector.values(), &[1, 0, 0, 1]);
    assert_eq!(assembly.vector.active(), vec!["BATUK", "PUSING"]);
    assert_eq!(assembly.dropped, vec!["RUAM".to_string()]);
}

#[test]
fn classify_runs_on_an_all_zero_vector() {
    let (ctx, calls) = context(false);
    let vector = assemble(std::iter::empty(), ctx.columns()).vector;
    let prediction = classify(ctx.classifier(), &vector).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let positives: Vec<DiagnosisCategory> = prediction.positives().map(|s| s.category).collect();
    assert_eq!(positives, vec![DiagnosisCategory::Respiratory]);
}

#[test]
fn text_without_symptoms_skips_prediction() {
    let (ctx, calls) = context(false);
    let report = ctx.triage_text("pasien datang untuk kontrol rutin").unwrap();
    assert!(report.symptoms.is_empty());
    assert_eq!(report.outcome, Outcome::NoSymptoms);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn blank_text_is_rejected_before_prediction() {
    let (ctx, calls) = context(false);
    assert!(matches!(ctx.triage_text(" \n "), Err(TriageError::EmptyComplaint)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn text_path_reports_findings_and_dropped_labels() {
    let (ctx, calls) = context(false);
    let report = ctx.triage_text("Panas tinggi, batuk, ada ruam").unwrap();
    assert_eq!(report.symptoms, vec!["BATUK", "DEMAM", "RUAM"]);
    assert_eq!(report.dropped, vec!["RUAM".to_string()]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let findings = report.findings();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0].name, "Diagnosa J");
    assert!((findings[0].probability - 0.9).abs() < 1e-12);
}

#[test]
fn empty_selection_still_predicts() {
    let (ctx, calls) = context(false);
    let report = ctx.triage_selection::<&str>(&[]).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.findings().len(), 1);
}

#[test]
fn unknown_selection_is_rejected() {
    let (ctx, calls) = context(false);
    let err = ctx.triage_selection(&["batuk", "pusingg"]).unwrap_err();
    match err {
        TriageError::UnknownSymptoms(names) => {
            assert_eq!(names, vec!["pusingg (did you mean PUSING?)".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn classifier_failure_yields_no_partial_results() {
    let (ctx, _) = context(true);
    let report = ctx.triage_text("demam dan pusing").unwrap();
    match &report.outcome {
        Outcome::Failed { message } => assert!(message.contains("model exploded")),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(report.findings().is_empty());
}

#[test]
fn width_mismatch_is_caught_before_calling_the_model() {
    let calls = Arc::new(AtomicUsize::new(0));
    let classifier = Recording {
        calls: Arc::clone(&calls),
        fail: false,
        width: 7,
    };
    let vector = assemble(["MUAL"], &columns()).vector;
    let err = classify(&classifier, &vector).unwrap_err();
    assert!(matches!(err, TriageError::ShapeMismatch { expected: 7, found: 4 }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
