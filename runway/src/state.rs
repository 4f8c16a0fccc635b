/// A diagnostics snapshot of one update pass.
///
/// Delivered to the `on_pass` hook. With `feature = "serde"`, this type implements
/// `Serialize`/`Deserialize`, so hosts can log passes as structured records.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassReport {
    /// List index relaxation was anchored at, if the layout was relaxed.
    pub pivot: Option<usize>,
    /// Some rendered item reported a new height.
    pub heights_changed: bool,
    /// Rectangles were repositioned (relaxation and/or normalization).
    pub layout_changed: bool,
    /// Shift applied by normalization (`0` if none).
    pub correction: f64,
    /// A compensating `scroll_by` was issued (the correction exceeded epsilon).
    pub scrolled: bool,
    pub rendition_len: usize,
    pub runway_height: f64,
    /// A frame was committed for repaint.
    pub committed: bool,
}
