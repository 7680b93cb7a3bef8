use std::fmt::Write as _;

use crate::settings::BackgroundSettings;
use crate::theme::ColorOverrides;

/// Container-level presentation applied around whatever a generator produced.
///
/// Generators never see these values: intensity becomes the wrapper opacity, blur becomes a
/// wrapper filter, and color overrides become scoped variables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WrapperStyle {
    /// `intensity / 100`.
    pub opacity: f64,
    /// Blur radius in CSS pixels; zero means no filter at all.
    pub blur_px: f64,
    pub overrides: Option<ColorOverrides>,
}

impl WrapperStyle {
    pub fn new(settings: BackgroundSettings, overrides: Option<ColorOverrides>) -> Self {
        let s = settings.sanitized();
        Self {
            opacity: s.intensity_unit(),
            blur_px: s.blur,
            overrides,
        }
    }

    /// The CSS `filter` value, or `None` when the property must be omitted.
    pub fn filter(&self) -> Option<String> {
        (self.blur_px > 0.0).then(|| format!("blur({}px)", fmt_num(self.blur_px)))
    }

    /// Declarations for the wrapper element, in emission order.
    ///
    /// The layer fills its container, sits beneath foreground content and lets pointer
    /// events through.
    pub fn declarations(&self) -> Vec<(&'static str, String)> {
        let mut decls = vec![
            ("position", "absolute".to_owned()),
            ("inset", "0".to_owned()),
            ("width", "100%".to_owned()),
            ("height", "100%".to_owned()),
            ("overflow", "hidden".to_owned()),
            ("pointer-events", "none".to_owned()),
            ("z-index", "0".to_owned()),
            ("opacity", fmt_num(self.opacity)),
        ];
        if let Some(filter) = self.filter() {
            decls.push(("filter", filter));
            decls.push(("will-change", "filter".to_owned()));
        }
        if let Some(o) = &self.overrides {
            decls.extend(o.css_vars());
        }
        decls
    }

    /// Inline `style` attribute value.
    pub fn css(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.declarations() {
            let _ = write!(out, "{name}:{value};");
        }
        out
    }
}

fn fmt_num(v: f64) -> String {
    let r = (v * 1000.0).round() / 1000.0;
    if r == r.trunc() {
        format!("{}", r as i64)
    } else {
        format!("{r}")
    }
}
