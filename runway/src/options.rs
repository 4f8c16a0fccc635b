use std::sync::Arc;

use crate::{Frame, PassReport};

/// Estimates the height of an item that has not been measured yet.
pub type HeightEstimator<T> = Arc<dyn Fn(&T) -> f64 + Send + Sync>;

/// A callback fired when a frame is committed for repaint.
pub type OnCommitCallback<K, T> = Arc<dyn Fn(&Frame<K, T>) + Send + Sync>;

/// A diagnostics hook fired after every update pass, committed or not.
pub type OnPassCallback = Arc<dyn Fn(&PassReport) + Send + Sync>;

/// Configuration for [`crate::Virtualizer`].
///
/// This type is cheap to clone: callbacks are stored in `Arc`s so adapters can tweak a few
/// fields and call `Virtualizer::set_options` without reallocating closures.
pub struct VirtualizerOptions<K, T> {
    /// Height used for items that have not been measured yet.
    pub estimate_height: HeightEstimator<T>,

    /// Layout shifts up to this magnitude are absorbed silently instead of being compensated
    /// with a viewport scroll. Defaults to `3.0`.
    pub scroll_correction_epsilon: f64,

    /// Scroll inactivity after which the layout is normalized even if the drift is
    /// off-screen. Defaults to `1500`.
    pub quiescence_ms: u64,

    /// Extra length rendered above and below the viewport. Defaults to `0.0`.
    pub overscan: f64,

    /// Keep one departing item rendered when a recompute adds nothing and drops something.
    ///
    /// See [`crate::calculate_rendition_retaining`].
    pub retain_departing: bool,

    /// Optional callback fired when a frame is committed.
    pub on_commit: Option<OnCommitCallback<K, T>>,

    /// Optional diagnostics hook fired after every update pass.
    pub on_pass: Option<OnPassCallback>,
}

impl<K, T> Clone for VirtualizerOptions<K, T> {
    fn clone(&self) -> Self {
        Self {
            estimate_height: Arc::clone(&self.estimate_height),
            scroll_correction_epsilon: self.scroll_correction_epsilon,
            quiescence_ms: self.quiescence_ms,
            overscan: self.overscan,
            retain_departing: self.retain_departing,
            on_commit: self.on_commit.clone(),
            on_pass: self.on_pass.clone(),
        }
    }
}

impl<K, T> VirtualizerOptions<K, T> {
    /// Creates options with the given height estimator and default tuning.
    pub fn new(estimate_height: impl Fn(&T) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            estimate_height: Arc::new(estimate_height),
            scroll_correction_epsilon: 3.0,
            quiescence_ms: 1500,
            overscan: 0.0,
            retain_departing: false,
            on_commit: None,
            on_pass: None,
        }
    }

    /// Creates options that estimate every item at `height`.
    pub fn uniform(height: f64) -> Self {
        Self::new(move |_| height)
    }

    pub fn with_estimate_height(
        mut self,
        estimate_height: impl Fn(&T) -> f64 + Send + Sync + 'static,
    ) -> Self {
        self.estimate_height = Arc::new(estimate_height);
        self
    }

    pub fn with_scroll_correction_epsilon(mut self, epsilon: f64) -> Self {
        self.scroll_correction_epsilon = epsilon.max(0.0);
        self
    }

    pub fn with_quiescence_ms(mut self, quiescence_ms: u64) -> Self {
        self.quiescence_ms = quiescence_ms;
        self
    }

    pub fn with_overscan(mut self, overscan: f64) -> Self {
        self.overscan = overscan.max(0.0);
        self
    }

    pub fn with_retain_departing(mut self, retain_departing: bool) -> Self {
        self.retain_departing = retain_departing;
        self
    }

    pub fn with_on_commit(
        mut self,
        on_commit: Option<impl Fn(&Frame<K, T>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_commit = on_commit.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_pass(
        mut self,
        on_pass: Option<impl Fn(&PassReport) + Send + Sync + 'static>,
    ) -> Self {
        self.on_pass = on_pass.map(|f| Arc::new(f) as _);
        self
    }
}

impl<K, T> core::fmt::Debug for VirtualizerOptions<K, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualizerOptions")
            .field("scroll_correction_epsilon", &self.scroll_correction_epsilon)
            .field("quiescence_ms", &self.quiescence_ms)
            .field("overscan", &self.overscan)
            .field("retain_departing", &self.retain_departing)
            .field("on_commit", &self.on_commit.is_some())
            .field("on_pass", &self.on_pass.is_some())
            .finish_non_exhaustive()
    }
}
