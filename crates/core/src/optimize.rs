//! The "produce optimized font" operation.

use std::path::{Path, PathBuf};

use log::{debug, error, warn};

use crate::{
    CacheDecision, CharSet, Error, FontConfig, FontPaths, PosterContext, Result, SubsetPlanner,
    delegate::{FontSubsetDelegate, SubsetReport, default_delegate, warn_unavailable},
    io::FontFile,
};

/// Inputs describing one poster render.
#[derive(Debug, Clone, Default)]
pub struct OptimizeRequest {
    pub poster: Option<PosterContext>,
    pub extra_chars: Option<String>,
    pub documents: Vec<PathBuf>,
    /// Regenerate even when the cached subset is still fresh.
    pub force: bool,
}

impl OptimizeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_poster(mut self, poster: PosterContext) -> Self {
        self.poster = Some(poster);
        self
    }

    pub fn with_extra_chars(mut self, chars: impl Into<String>) -> Self {
        self.extra_chars = Some(chars.into());
        self
    }

    pub fn with_documents(mut self, documents: impl IntoIterator<Item = PathBuf>) -> Self {
        self.documents.extend(documents);
        self
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// The target alphabet under `config`: baseline and declared characters
    /// plus the extra characters, poster data and scanned documents.
    pub fn alphabet(&self, config: &FontConfig) -> CharSet {
        let mut planner = SubsetPlanner::new(config);
        if let Some(extra) = &self.extra_chars {
            planner.add_chars(extra);
        }
        if let Some(poster) = &self.poster {
            planner.add_poster(poster);
        }
        for document in &self.documents {
            planner.add_document(document);
        }
        planner.build()
    }
}

/// Produces subset fonts for posters, reusing fresh artifacts.
pub struct FontOptimizer {
    paths: FontPaths,
    config: FontConfig,
    delegate: Option<Box<dyn FontSubsetDelegate>>,
}

impl FontOptimizer {
    /// Uses the delegate compiled into this build.
    pub fn new(paths: FontPaths, config: FontConfig) -> Self {
        Self::with_delegate(paths, config, default_delegate())
    }

    /// Uses `delegate`; `None` means subsetting is unavailable.
    pub fn with_delegate(
        paths: FontPaths,
        config: FontConfig,
        delegate: Option<Box<dyn FontSubsetDelegate>>,
    ) -> Self {
        if delegate.is_none() {
            warn_unavailable();
        }
        Self {
            paths,
            config,
            delegate,
        }
    }

    pub fn is_available(&self) -> bool {
        self.delegate.is_some()
    }

    /// Path of the font to use for the poster described by `request`.
    ///
    /// Returns the subset artifact when it is fresh or was just produced,
    /// and the source font in every other case. Never fails.
    pub fn optimize(&self, request: &OptimizeRequest) -> PathBuf {
        let source = &self.paths.source;
        if self.delegate.is_none() {
            return source.clone();
        }

        if !request.force && CacheDecision::evaluate(&self.paths).is_reuse() {
            debug!("Reusing subset font {}", self.paths.subset.display());
            return self.paths.subset.clone();
        }

        let alphabet = self.plan(request);
        match self.subset_with(&alphabet) {
            Ok(report) => {
                report.log(source, &self.paths.subset);
                self.paths.subset.clone()
            }
            Err(e @ Error::MissingInput(_)) => {
                error!("{e}");
                source.clone()
            }
            Err(e) => {
                warn!("{e}; using original font {}", source.display());
                source.clone()
            }
        }
    }

    /// The target alphabet for `request`, without touching any font.
    pub fn plan(&self, request: &OptimizeRequest) -> CharSet {
        request.alphabet(&self.config)
    }

    /// Writes the subset for `alphabet`, ignoring any cached artifact.
    pub fn subset_with(&self, alphabet: &CharSet) -> Result<SubsetReport> {
        let delegate = self.delegate.as_deref().ok_or(Error::DelegateUnavailable)?;
        if !FontFile::new(&self.paths.source).exists() {
            return Err(Error::MissingInput(self.paths.source.clone()));
        }
        delegate.subset(&self.paths.source, &self.paths.subset, alphabet)
    }
}

/// One-shot optimization for the fonts in `font_dir` with the build's delegate.
pub fn create_optimized_font(
    font_dir: &Path,
    config: FontConfig,
    poster: Option<PosterContext>,
    extra_chars: Option<&str>,
) -> PathBuf {
    let optimizer = FontOptimizer::new(FontPaths::in_dir(font_dir), config);
    let mut request = OptimizeRequest::new();
    request.poster = poster;
    request.extra_chars = extra_chars.map(str::to_string);
    optimizer.optimize(&request)
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        fs::{File, write},
        rc::Rc,
        time::{Duration, SystemTime},
    };

    use tempfile::{TempDir, tempdir};

    use super::*;
    use crate::inventory::base_chars;

    /// Records every alphabet it is asked for and writes a small stub font.
    #[derive(Clone, Default)]
    struct RecordingDelegate {
        calls: Rc<RefCell<Vec<CharSet>>>,
        fail: bool,
    }

    impl RecordingDelegate {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    impl FontSubsetDelegate for RecordingDelegate {
        fn subset(&self, source: &Path, target: &Path, alphabet: &CharSet) -> Result<SubsetReport> {
            self.calls.borrow_mut().push(alphabet.clone());
            if self.fail {
                return Err(Error::DelegateFailure(anyhow::anyhow!("corrupt font")));
            }
            write(target, b"sub")?;
            Ok(SubsetReport {
                original_bytes: FontFile::new(source).size().map_err(Error::DelegateFailure)?,
                subset_bytes: 3,
                char_count: alphabet.len(),
                glyph_count: None,
            })
        }
    }

    fn setup() -> (TempDir, FontPaths) {
        let dir = tempdir().unwrap();
        let paths = FontPaths::in_dir(dir.path());
        write(&paths.source, b"original font bytes").unwrap();
        (dir, paths)
    }

    fn optimizer(paths: &FontPaths, delegate: &RecordingDelegate) -> FontOptimizer {
        FontOptimizer::with_delegate(
            paths.clone(),
            FontConfig::default(),
            Some(Box::new(delegate.clone())),
        )
    }

    fn set_mtime(path: &Path, secs: u64) {
        let time = SystemTime::UNIX_EPOCH + Duration::from_secs(secs);
        File::options().write(true).open(path).unwrap().set_modified(time).unwrap();
    }

    fn run_poster() -> PosterContext {
        PosterContext::new().with_years([2023]).with_types(["Run"]).with_units("km")
    }

    #[test]
    fn test_end_to_end_regenerates() {
        let (_dir, paths) = setup();
        let delegate = RecordingDelegate::default();
        let optimizer = optimizer(&paths, &delegate);

        let result = optimizer.optimize(&OptimizeRequest::new().with_poster(run_poster()));

        assert_eq!(result, paths.subset);
        assert_eq!(delegate.call_count(), 1);
        let calls = delegate.calls.borrow();
        let alphabet = &calls[0];
        assert!(alphabet.is_superset(&base_chars()));
        assert!(alphabet.contains_all("2023Runkm"));

        let subset_time = FontFile::new(&paths.subset).modified().unwrap();
        let source_time = FontFile::new(&paths.source).modified().unwrap();
        assert!(subset_time >= source_time);
    }

    #[test]
    fn test_second_call_reuses() {
        let (_dir, paths) = setup();
        let delegate = RecordingDelegate::default();
        let optimizer = optimizer(&paths, &delegate);
        let request = OptimizeRequest::new().with_poster(run_poster());

        let first = optimizer.optimize(&request);
        let second = optimizer.optimize(&request);

        assert_eq!(first, second);
        assert_eq!(delegate.call_count(), 1);
    }

    #[test]
    fn test_force_skips_reuse() {
        let (_dir, paths) = setup();
        let delegate = RecordingDelegate::default();
        let optimizer = optimizer(&paths, &delegate);

        optimizer.optimize(&OptimizeRequest::new());
        let result = optimizer.optimize(&OptimizeRequest::new().force(true));

        assert_eq!(result, paths.subset);
        assert_eq!(delegate.call_count(), 2);
    }

    #[test]
    fn test_stale_subset_is_regenerated() {
        let (_dir, paths) = setup();
        write(&paths.subset, b"old").unwrap();
        set_mtime(&paths.subset, 1_000);
        set_mtime(&paths.source, 2_000);

        let delegate = RecordingDelegate::default();
        let result = optimizer(&paths, &delegate).optimize(&OptimizeRequest::new());

        assert_eq!(result, paths.subset);
        assert_eq!(delegate.call_count(), 1);
    }

    #[test]
    fn test_unavailable_returns_source() {
        let (_dir, paths) = setup();
        write(&paths.subset, b"fresh").unwrap();
        let optimizer = FontOptimizer::with_delegate(paths.clone(), FontConfig::default(), None);

        assert!(!optimizer.is_available());
        let result = optimizer.optimize(&OptimizeRequest::new().with_poster(run_poster()));
        assert_eq!(result, paths.source);
    }

    #[test]
    fn test_delegate_failure_returns_source() {
        let (_dir, paths) = setup();
        let delegate = RecordingDelegate::failing();

        let result = optimizer(&paths, &delegate).optimize(&OptimizeRequest::new());

        assert_eq!(result, paths.source);
        assert_eq!(delegate.call_count(), 1);
        assert!(!paths.subset.exists());
    }

    #[test]
    fn test_missing_source_returns_source_without_delegate_call() {
        let dir = tempdir().unwrap();
        let paths = FontPaths::in_dir(dir.path());
        let delegate = RecordingDelegate::default();

        let result = optimizer(&paths, &delegate).optimize(&OptimizeRequest::new());

        assert_eq!(result, paths.source);
        assert_eq!(delegate.call_count(), 0);
    }

    #[test]
    fn test_plan_includes_documents_and_extras() {
        let (dir, paths) = setup();
        let svg = dir.path().join("poster.svg");
        write(&svg, "<text>骑行 2024</text>").unwrap();

        let optimizer = optimizer(&paths, &RecordingDelegate::default());
        let request = OptimizeRequest::new().with_extra_chars("张").with_documents([svg]);
        let alphabet = optimizer.plan(&request);

        assert!(alphabet.contains_all("骑行张"));
        assert!(alphabet.is_superset(&base_chars()));
    }

    #[test]
    fn test_subset_with_unavailable() {
        let (_dir, paths) = setup();
        let optimizer = FontOptimizer::with_delegate(paths, FontConfig::default(), None);
        let err = optimizer.subset_with(&CharSet::from("a")).unwrap_err();
        assert!(matches!(err, Error::DelegateUnavailable));
    }

    #[test]
    fn test_request_alphabet_honors_exact_config() {
        let config = FontConfig {
            custom_chars: "张".into(),
            exact_chars_only: true,
            ..Default::default()
        };
        let request = OptimizeRequest::new()
            .with_poster(PosterContext::new().with_years([2024]))
            .with_extra_chars("x");

        assert_eq!(request.alphabet(&config), CharSet::from("张2024x"));
    }

    #[test]
    fn test_regenerated_subset_can_be_removed() {
        let (_dir, paths) = setup();
        let delegate = RecordingDelegate::default();

        optimizer(&paths, &delegate).optimize(&OptimizeRequest::new());
        assert!(paths.remove_subset().unwrap());
        assert!(paths.source.exists());
    }
}
