//! Integration tests for presentation conversion.

use slidecat::config::{ConvertConfig, ConverterConfig, ExecutionMode};
use slidecat::convert::{FileOutcome, convert_presentations};
use slidecat::error::SlideCatError;
use slidecat::output::OutputFormatter;
use slidecat::resolve::InputSpec;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::common::touch;

fn config(inputs: InputSpec, output_dir: PathBuf, mode: ExecutionMode, soffice: &Path) -> ConvertConfig {
    ConvertConfig {
        inputs,
        output_dir,
        mode,
        converter: ConverterConfig::new(soffice),
    }
}

fn outcome_set(outcomes: &[FileOutcome]) -> BTreeSet<(PathBuf, bool)> {
    outcomes
        .iter()
        .map(|o| (o.source().to_path_buf(), o.is_converted()))
        .collect()
}

#[cfg(unix)]
mod with_fake_converter {
    use super::*;
    use crate::common::fake_soffice;
    use serial_test::serial;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    #[serial]
    async fn test_sequential_and_parallel_agree() {
        let temp_dir = TempDir::new().unwrap();
        let soffice = fake_soffice(temp_dir.path());

        let mut inputs: Vec<String> = (1..=5)
            .map(|i| touch(temp_dir.path(), &format!("deck{i}.pptx")).display().to_string())
            .collect();
        inputs.push(touch(temp_dir.path(), "broken.pptx").display().to_string());
        inputs.push(temp_dir.path().join("gone.pptx").display().to_string());

        let sequential = convert_presentations(
            &config(
                InputSpec::Paths(inputs.clone()),
                temp_dir.path().join("seq"),
                ExecutionMode::Sequential,
                &soffice,
            ),
            &OutputFormatter::quiet(),
        )
        .await
        .unwrap();

        let parallel = convert_presentations(
            &config(
                InputSpec::Paths(inputs),
                temp_dir.path().join("par"),
                ExecutionMode::Parallel { workers: 3 },
                &soffice,
            ),
            &OutputFormatter::quiet(),
        )
        .await
        .unwrap();

        assert_eq!(sequential.converted_count(), 5);
        assert_eq!(sequential.skipped_count(), 2);
        assert_eq!(outcome_set(&sequential.outcomes), outcome_set(&parallel.outcomes));

        for dir in ["seq", "par"] {
            for i in 1..=5 {
                assert!(temp_dir.path().join(dir).join(format!("deck{i}.pdf")).exists());
            }
            assert!(!temp_dir.path().join(dir).join("broken.pdf").exists());
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_failed_conversion_is_skipped_with_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let soffice = fake_soffice(temp_dir.path());
        let broken = touch(temp_dir.path(), "broken.pptx");

        let report = convert_presentations(
            &config(
                InputSpec::Paths(vec![broken.display().to_string()]),
                temp_dir.path().join("out"),
                ExecutionMode::Sequential,
                &soffice,
            ),
            &OutputFormatter::quiet(),
        )
        .await
        .unwrap();

        match &report.outcomes[..] {
            [FileOutcome::Skipped { error, .. }] => {
                assert!(matches!(error, SlideCatError::ExternalProcessFailure { .. }));
                assert!(error.to_string().contains("could not be loaded"));
            }
            other => panic!("expected one skipped file, got {other:?}"),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_pattern_input_creates_nested_output_dir() {
        let temp_dir = TempDir::new().unwrap();
        let soffice = fake_soffice(temp_dir.path());
        let decks = temp_dir.path().join("decks");
        std::fs::create_dir(&decks).unwrap();
        touch(&decks, "b.pptx");
        touch(&decks, "a.PPTX");
        touch(&decks, "notes.txt");

        let output_dir = temp_dir.path().join("build/pdf");
        let report = convert_presentations(
            &config(
                InputSpec::Pattern(format!("{}/*", decks.display())),
                output_dir.clone(),
                ExecutionMode::Sequential,
                &soffice,
            ),
            &OutputFormatter::quiet(),
        )
        .await
        .unwrap();

        assert_eq!(report.converted_count(), 2);
        assert!(output_dir.join("a.pdf").exists());
        assert!(output_dir.join("b.pdf").exists());
    }
}

#[tokio::test]
async fn test_missing_inputs_do_not_need_a_converter() {
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("out");

    let report = convert_presentations(
        &config(
            InputSpec::Paths(vec![temp_dir.path().join("slides.pptx").display().to_string()]),
            output_dir.clone(),
            ExecutionMode::Parallel { workers: 4 },
            Path::new("/nonexistent/soffice"),
        ),
        &OutputFormatter::quiet(),
    )
    .await
    .unwrap();

    assert_eq!(report.skipped_count(), 1);
    assert!(output_dir.is_dir());
}

#[tokio::test]
async fn test_missing_converter_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let deck = touch(temp_dir.path(), "deck.pptx");

    let result = convert_presentations(
        &config(
            InputSpec::Paths(vec![deck.display().to_string()]),
            temp_dir.path().join("out"),
            ExecutionMode::Sequential,
            Path::new("/nonexistent/soffice"),
        ),
        &OutputFormatter::quiet(),
    )
    .await;

    let err = result.unwrap_err();
    assert!(matches!(err, SlideCatError::ConverterNotFound { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_no_valid_presentations() {
    let temp_dir = TempDir::new().unwrap();
    let notes = touch(temp_dir.path(), "notes.txt");

    let result = convert_presentations(
        &config(
            InputSpec::Paths(vec![notes.display().to_string()]),
            temp_dir.path().join("out"),
            ExecutionMode::Sequential,
            Path::new("/nonexistent/soffice"),
        ),
        &OutputFormatter::quiet(),
    )
    .await;

    assert!(matches!(result, Err(SlideCatError::NoValidFiles { .. })));
    assert!(!temp_dir.path().join("out").exists());
}
