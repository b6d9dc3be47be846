//! Turns a finished simulation into a history record.

use chrono::{DateTime, Local};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use url::Url;

use crate::{GenerationRequest, HistoryRecord, RunId};

/// Titles longer than this many characters are cut and get [`TITLE_ELLIPSIS`].
pub const TITLE_MAX_CHARS: usize = 30;
pub const TITLE_ELLIPSIS: &str = "...";

pub const DEFAULT_SAMPLE_VIDEOS: [&str; 3] = [
    "https://mazwai.com/videvo_files/video/free/2015-09/small_watermarked/MH19_5_original_x264.webm",
    "https://mazwai.com/videvo_files/video/free/2019-01/small_watermarked/190111_07_BuildingsTraffic_1080p_preview.webm",
    "https://mazwai.com/videvo_files/video/free/2019-01/small_watermarked/190111_01_CannonBeach_1080p_preview.webm",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("at least one sample video is required")]
    Empty,
    #[error("invalid sample video url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// Fixed, non-empty set of result videos a run can resolve to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleAssets {
    urls: Vec<String>,
}

impl SampleAssets {
    pub fn new<I, S>(urls: I) -> Result<Self, AssetError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls = urls
            .into_iter()
            .map(|raw| {
                let raw = raw.into();
                Url::parse(raw.trim())
                    .map(String::from)
                    .map_err(|err| AssetError::InvalidUrl {
                        url: raw.clone(),
                        reason: err.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if urls.is_empty() {
            return Err(AssetError::Empty);
        }
        Ok(Self { urls })
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.iter().any(|candidate| candidate == url)
    }
}

impl Default for SampleAssets {
    fn default() -> Self {
        Self {
            urls: DEFAULT_SAMPLE_VIDEOS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Source of the choice among sample assets.
pub trait AssetPicker: Send {
    /// Returns an index in `0..candidates`. `candidates` is never zero.
    fn pick(&mut self, candidates: usize) -> usize;
}

/// Uniform random choice.
#[derive(Debug, Clone)]
pub struct RandomPicker<R = StdRng> {
    rng: R,
}

impl RandomPicker<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng + Send> AssetPicker for RandomPicker<R> {
    fn pick(&mut self, candidates: usize) -> usize {
        self.rng.gen_range(0..candidates)
    }
}

/// Always picks the same index (wrapped into range).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPicker(pub usize);

impl AssetPicker for FixedPicker {
    fn pick(&mut self, candidates: usize) -> usize {
        self.0 % candidates
    }
}

pub trait Clock: Send {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Builds history records for completed runs.
pub struct Resolver {
    assets: SampleAssets,
    picker: Box<dyn AssetPicker>,
    clock: Box<dyn Clock>,
}

impl Resolver {
    pub fn new(
        assets: SampleAssets,
        picker: impl AssetPicker + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            assets,
            picker: Box::new(picker),
            clock: Box::new(clock),
        }
    }

    /// Default assets, entropy-seeded choice, system clock.
    pub fn with_defaults() -> Self {
        Self::new(
            SampleAssets::default(),
            RandomPicker::from_entropy(),
            SystemClock,
        )
    }

    pub fn assets(&self) -> &SampleAssets {
        &self.assets
    }

    pub fn complete(&mut self, run_id: RunId, request: &GenerationRequest) -> HistoryRecord {
        let urls = self.assets.urls();
        let index = self.picker.pick(urls.len()).min(urls.len() - 1);
        HistoryRecord {
            id: run_id,
            title: make_title(request.scenario()),
            style: request.style(),
            video_url: urls[index].clone(),
            created_at: self.clock.now(),
            thumbnail_url: None,
        }
    }
}

/// First [`TITLE_MAX_CHARS`] characters of the trimmed scenario, marked when cut.
pub fn make_title(scenario: &str) -> String {
    let trimmed = scenario.trim();
    if trimmed.chars().count() <= TITLE_MAX_CHARS {
        return trimmed.to_string();
    }
    let mut title: String = trimmed.chars().take(TITLE_MAX_CHARS).collect();
    title.push_str(TITLE_ELLIPSIS);
    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{submit, Style};
    use chrono::TimeZone;

    struct FrozenClock(DateTime<Local>);

    impl Clock for FrozenClock {
        fn now(&self) -> DateTime<Local> {
            self.0
        }
    }

    fn frozen() -> FrozenClock {
        FrozenClock(Local.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap())
    }

    #[test]
    fn long_titles_are_truncated_with_marker() {
        let title = make_title("The quick brown fox jumps over the lazy dog");
        assert_eq!(title, "The quick brown fox jumps over...");
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + TITLE_ELLIPSIS.len());
    }

    #[test]
    fn short_titles_are_kept_verbatim() {
        assert_eq!(make_title("1234567890"), "1234567890");
        let exactly_thirty = "a".repeat(30);
        assert_eq!(make_title(&exactly_thirty), exactly_thirty);
        assert_eq!(make_title("  padded scenario text  "), "padded scenario text");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let title = make_title(&"é".repeat(40));
        assert_eq!(title, format!("{}...", "é".repeat(30)));
    }

    #[test]
    fn sample_assets_reject_empty_and_invalid() {
        assert_eq!(SampleAssets::new(Vec::<String>::new()), Err(AssetError::Empty));
        assert!(matches!(
            SampleAssets::new(["not a url"]),
            Err(AssetError::InvalidUrl { .. })
        ));
        let assets = SampleAssets::new(["https://example.com/a.webm"]).expect("valid");
        assert!(assets.contains("https://example.com/a.webm"));
    }

    #[test]
    fn default_assets_are_valid_urls() {
        let defaults = SampleAssets::default();
        assert_eq!(
            SampleAssets::new(defaults.urls().to_vec()).as_ref(),
            Ok(&defaults)
        );
    }

    #[test]
    fn complete_builds_record_from_request() {
        let mut resolver = Resolver::new(SampleAssets::default(), FixedPicker(1), frozen());
        let request = submit("Attack the northern ridge at dawn", Some(Style::Timelapse))
            .expect("valid");

        let record = resolver.complete(7, &request);

        assert_eq!(record.id, 7);
        assert_eq!(record.title, "Attack the northern ridge at d...");
        assert_eq!(record.style, Style::Timelapse);
        assert_eq!(record.video_url, DEFAULT_SAMPLE_VIDEOS[1]);
        assert_eq!(record.created_at_display(), "12:30:00");
        assert_eq!(record.thumbnail_url, None);
    }

    #[test]
    fn random_choice_stays_within_candidates() {
        let mut resolver =
            Resolver::new(SampleAssets::default(), RandomPicker::seeded(42), frozen());
        let request = submit("Convoy escort through the pass", None).expect("valid");
        for run_id in 1..=50 {
            let record = resolver.complete(run_id, &request);
            assert!(resolver.assets().contains(&record.video_url));
        }
    }

    #[test]
    fn fixed_picker_wraps_out_of_range_index() {
        assert_eq!(FixedPicker(5).pick(3), 2);
    }
}
