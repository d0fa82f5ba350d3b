// ============================================================
// Layer 2 — Self-Test Harness
// ============================================================
// Drives one InferenceBackend through the three self-test
// actions and reports on a line-oriented output stream:
//
//   classify-zeros   stage zeros, run, print the margin
//   classify-sample  stage the compiled-in sample, run, print the margin
//   golden-test      run every golden case in order, then itemize
//                    mismatches and print one summary line
//
// The only constructor is `init`, which loads the model. A
// harness value therefore always wraps an initialized backend.

use std::io::Write;

use anyhow::{bail, Context, Result};

use crate::application::config::HarnessConfig;
use crate::domain::golden::{decision_margin, CaseOutcome, GoldenReport, InputSelector};
use crate::domain::menu::{Menu, MenuAction};
use crate::domain::traits::{InferenceBackend, MenuDispatcher};
use crate::infra::model_data::ModelAssets;

pub struct SelfTestHarness<B: InferenceBackend, W: Write> {
    backend: B,
    assets:  ModelAssets,
    config:  HarnessConfig,
    out:     W,
}

impl<B: InferenceBackend, W: Write> SelfTestHarness<B, W> {
    /// Load the model blob into `backend`. Call once per backend.
    pub fn init(mut backend: B, assets: ModelAssets, config: HarnessConfig, out: W) -> Result<Self> {
        tracing::info!(model = assets.name, bytes = assets.blob.len(), "Loading model");
        backend
            .load_model(assets.blob)
            .with_context(|| format!("loading {} model", assets.name))?;
        Ok(Self { backend, assets, config, out })
    }

    /// Run a forward pass on whatever input is staged and return
    /// `output[1] - output[0]`.
    pub fn classify(&mut self) -> Result<i32> {
        writeln!(self.out, "Running {}", self.assets.name)?;
        self.backend.run_inference()?;
        let margin = decision_margin(self.backend.output()?)?;
        tracing::debug!(margin, "Forward pass done");
        Ok(margin)
    }

    /// Menu action `1`: stage an all-zero input, classify, and
    /// print `  result is <n>`. Returns the margin as well.
    pub fn classify_zeros(&mut self) -> Result<i32> {
        self.classify_and_print(InputSelector::Zeros)
    }

    /// Menu action `2`: stage the compiled-in sample, classify, and
    /// print the margin. Fails if the build carried no sample input.
    pub fn classify_sample(&mut self) -> Result<i32> {
        self.classify_and_print(InputSelector::Sample)
    }

    /// Run the golden suite and print its report.
    /// Mismatches are reported, not returned as errors.
    pub fn golden_test(&mut self) -> Result<GoldenReport> {
        let cases = self.config.golden.clone();
        let mut outcomes = Vec::with_capacity(cases.len());

        for (index, case) in cases.into_iter().enumerate() {
            self.stage(case.input)?;
            let actual = self.classify()?;
            outcomes.push(CaseOutcome { index, name: case.name, actual, expected: case.expected });
        }

        let report = GoldenReport { outcomes };
        write!(self.out, "{report}")?;
        self.out.flush()?;

        for o in report.failures() {
            tracing::warn!(
                index = o.index,
                case = %o.name,
                actual = o.actual,
                expected = o.expected,
                "Golden mismatch"
            );
        }
        if report.passed() {
            tracing::info!(cases = report.outcomes.len(), "Golden tests passed");
        }
        Ok(report)
    }

    /// Route a selected menu action to the matching method.
    /// The numeric result is already printed, so only errors travel back
    /// to the dispatcher.
    pub fn dispatch(&mut self, action: MenuAction) -> Result<()> {
        match action {
            MenuAction::ClassifyZeros  => self.classify_zeros().map(drop),
            MenuAction::ClassifySample => self.classify_sample().map(drop),
            MenuAction::GoldenTest     => self.golden_test().map(drop),
        }
    }

    /// The menu for this harness, titled with the model name.
    /// Built fresh on each call; nothing is stored globally.
    pub fn menu(&self) -> Menu {
        Menu::self_test(self.assets.name)
    }

    /// Hand control to `dispatcher` until the user leaves the menu.
    pub fn run_menu(&mut self, dispatcher: &mut dyn MenuDispatcher) -> Result<()> {
        let menu = self.menu();
        dispatcher.run(&menu, &mut |action| self.dispatch(action))
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }

    fn stage(&mut self, input: InputSelector) -> Result<()> {
        match input {
            InputSelector::Zeros  => self.backend.set_input_zeros(),
            InputSelector::Sample => {
                if self.assets.sample_input.is_empty() {
                    bail!("no sample input compiled in (set MLP_SELFTEST_INPUT at build time)");
                }
                self.backend.set_input(self.assets.sample_input)
            }
        }
    }

    fn classify_and_print(&mut self, input: InputSelector) -> Result<i32> {
        self.stage(input)?;
        let result = self.classify()?;
        writeln!(self.out, "  result is {result}")?;
        self.out.flush()?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, bail};

    use crate::domain::golden::GoldenCase;
    use crate::infra::recorded_backend::{RecordedBackend, RecordedInput, Recording, RecordingFile};

    const SAMPLE: &[u8] = &[7, 0, 255, 3];

    fn assets() -> ModelAssets {
        ModelAssets { name: "MLP_32x32", blob: &[0x54, 0x46, 0x4c, 0x33], sample_input: SAMPLE }
    }

    /// Answers with a fixed output vector per input kind.
    #[derive(Default)]
    struct FakeBackend {
        zeros_output:  Vec<i8>,
        sample_output: Vec<i8>,
        loads:         usize,
        runs:          usize,
        staged:        Option<InputSelector>,
        last:          Option<Vec<i8>>,
    }

    impl FakeBackend {
        fn new(zeros_output: Vec<i8>, sample_output: Vec<i8>) -> Self {
            Self { zeros_output, sample_output, ..Default::default() }
        }

        /// Outputs that reproduce the default golden margins (-193, -175).
        fn golden() -> Self {
            Self::new(vec![100, -93], vec![80, -95])
        }
    }

    impl InferenceBackend for FakeBackend {
        fn load_model(&mut self, _model: &[u8]) -> Result<()> {
            self.loads += 1;
            Ok(())
        }

        fn set_input(&mut self, input: &[u8]) -> Result<()> {
            if input != SAMPLE {
                bail!("unexpected input {input:?}");
            }
            self.staged = Some(InputSelector::Sample);
            Ok(())
        }

        fn set_input_zeros(&mut self) -> Result<()> {
            self.staged = Some(InputSelector::Zeros);
            Ok(())
        }

        fn run_inference(&mut self) -> Result<()> {
            self.runs += 1;
            self.last = match self.staged.ok_or_else(|| anyhow!("no input staged"))? {
                InputSelector::Zeros  => Some(self.zeros_output.clone()),
                InputSelector::Sample => Some(self.sample_output.clone()),
            };
            Ok(())
        }

        fn output(&self) -> Result<&[i8]> {
            self.last.as_deref().ok_or_else(|| anyhow!("no output"))
        }
    }

    fn harness(backend: FakeBackend) -> SelfTestHarness<FakeBackend, Vec<u8>> {
        SelfTestHarness::init(backend, assets(), HarnessConfig::default(), Vec::new()).unwrap()
    }

    fn printed(h: SelfTestHarness<FakeBackend, Vec<u8>>) -> String {
        String::from_utf8(h.into_output()).unwrap()
    }

    #[test]
    fn test_init_loads_model_once() {
        let h = harness(FakeBackend::golden());
        assert_eq!(h.backend().loads, 1);
        assert_eq!(h.backend().runs, 0);
    }

    #[test]
    fn test_classify_zeros_prints_diagnostic_and_result() {
        let mut h = harness(FakeBackend::golden());
        assert_eq!(h.classify_zeros().unwrap(), -193);
        assert_eq!(printed(h), "Running MLP_32x32\n  result is -193\n");
    }

    #[test]
    fn test_classify_sample() {
        let mut h = harness(FakeBackend::golden());
        assert_eq!(h.classify_sample().unwrap(), -175);
    }

    #[test]
    fn test_classify_zeros_is_repeatable() {
        let mut h = harness(FakeBackend::golden());
        let first = h.classify_zeros().unwrap();
        let second = h.classify_zeros().unwrap();
        assert_eq!(first, second);
        assert_eq!(h.backend().loads, 1);
    }

    #[test]
    fn test_margin_operand_order() {
        let mut h = harness(FakeBackend::new(vec![1, 11], vec![11, 1]));
        assert_eq!(h.classify_zeros().unwrap(), 10);
        assert_eq!(h.classify_sample().unwrap(), -10);
    }

    #[test]
    fn test_golden_passes_with_correct_backend() {
        let mut h = harness(FakeBackend::golden());
        let report = h.golden_test().unwrap();
        assert!(report.passed());
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(h.backend().runs, 2);

        let out = printed(h);
        assert_eq!(out, "Running MLP_32x32\nRunning MLP_32x32\nOK   Golden tests passed\n");
    }

    #[test]
    fn test_golden_reports_only_the_mismatching_case() {
        // zeros margin becomes -200 instead of -193
        let mut h = harness(FakeBackend::new(vec![100, -100], vec![80, -95]));
        let report = h.golden_test().unwrap();
        assert!(!report.passed());

        let out = printed(h);
        assert!(out.contains("*** Golden test 0 failed: -200 (actual) != -193 (expected)\n"));
        assert!(!out.contains("Golden test 1 failed"));
        assert!(out.ends_with("FAIL Golden tests failed\n"));
    }

    #[test]
    fn test_golden_runs_cases_in_suite_order() {
        let config = HarnessConfig::with_golden(vec![
            GoldenCase::new("s", InputSelector::Sample, -175),
            GoldenCase::new("z", InputSelector::Zeros, -193),
            GoldenCase::new("s2", InputSelector::Sample, 0),
        ]);
        let mut h = SelfTestHarness::init(FakeBackend::golden(), assets(), config, Vec::new()).unwrap();
        let report = h.golden_test().unwrap();

        let actual: Vec<i32> = report.outcomes.iter().map(|o| o.actual).collect();
        assert_eq!(actual, vec![-175, -193, -175]);
        assert_eq!(report.failures().map(|o| o.index).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_backend_fault_propagates() {
        let mut h = harness(FakeBackend::new(vec![1], vec![1, 2]));
        assert!(h.classify_zeros().is_err());
        assert!(h.golden_test().is_err());
    }

    #[test]
    fn test_dispatch_routes_actions() {
        let mut h = harness(FakeBackend::golden());
        h.dispatch(MenuAction::ClassifySample).unwrap();
        h.dispatch(MenuAction::GoldenTest).unwrap();
        assert_eq!(h.backend().runs, 3);
        assert!(printed(h).contains("  result is -175\n"));
    }

    #[test]
    fn test_menu_uses_model_name() {
        let h = harness(FakeBackend::golden());
        assert_eq!(h.menu().title, "Tests for MLP_32x32 model");
    }

    #[test]
    fn test_end_to_end_over_recorded_backend() {
        let backend = RecordedBackend::new(RecordingFile {
            model_len:  Some(4),
            recordings: vec![
                Recording { input: RecordedInput::Zeros, output: vec![100, -93] },
                Recording { input: RecordedInput::Bytes(SAMPLE.to_vec()), output: vec![80, -95] },
            ],
        });
        let mut h = SelfTestHarness::init(backend, assets(), HarnessConfig::default(), Vec::new()).unwrap();

        assert_eq!(h.classify_zeros().unwrap(), -193);
        assert_eq!(h.classify_sample().unwrap(), -175);
        assert!(h.golden_test().unwrap().passed());

        let out = String::from_utf8(h.into_output()).unwrap();
        assert!(out.ends_with("OK   Golden tests passed\n"));
    }

    #[test]
    fn test_init_fails_on_model_mismatch() {
        let backend = RecordedBackend::new(RecordingFile { model_len: Some(99), recordings: vec![] });
        let err = SelfTestHarness::init(backend, assets(), HarnessConfig::default(), Vec::new())
            .err()
            .unwrap();
        assert!(format!("{err:#}").contains("loading MLP_32x32 model"));
    }

    #[test]
    fn test_empty_sample_is_an_error_not_a_zeros_replay() {
        let backend = RecordedBackend::new(RecordingFile {
            model_len:  None,
            recordings: vec![Recording { input: RecordedInput::Zeros, output: vec![100, -93] }],
        });
        let no_sample = ModelAssets { sample_input: &[], ..assets() };
        let mut h = SelfTestHarness::init(backend, no_sample, HarnessConfig::default(), Vec::new()).unwrap();

        let err = h.classify_sample().unwrap_err();
        assert!(err.to_string().contains("no sample input"));
        assert!(h.golden_test().is_err());
        assert_eq!(h.classify_zeros().unwrap(), -193);
    }
}
