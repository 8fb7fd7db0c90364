use lightningcss::targets::{Browsers, Targets};

/// Encode a browser version the way lightningcss expects it.
const fn version(major: u32, minor: u32) -> u32 {
    (major << 16) | (minor << 8)
}

/// Options for the styles plugin.
#[derive(Debug, Clone)]
pub struct StylesPluginOptions {
    /// Print minified CSS.
    pub minify: bool,
    /// Browsers the output must support; syntax they lack is lowered.
    pub browsers: Option<Browsers>,
    /// Only process files whose path contains one of these substrings.
    pub include: Vec<String>,
    /// Skip files whose path contains one of these substrings.
    pub exclude: Vec<String>,
}

impl Default for StylesPluginOptions {
    fn default() -> Self {
        Self {
            minify: true,
            browsers: Some(Self::default_browsers()),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl StylesPluginOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Baseline browsers: none of them understand CSS nesting, so nested
    /// rules are always flattened by default.
    pub fn default_browsers() -> Browsers {
        Browsers {
            chrome: Some(version(95, 0)),
            edge: Some(version(95, 0)),
            firefox: Some(version(90, 0)),
            safari: Some(version(14, 0)),
            ios_saf: Some(version(14, 0)),
            ..Browsers::default()
        }
    }

    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    /// Replace the browser targets. `None` keeps modern syntax as written.
    pub fn with_browsers(mut self, browsers: Option<Browsers>) -> Self {
        self.browsers = browsers;
        self
    }

    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include.push(pattern.into());
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    pub(crate) fn targets(&self) -> Targets {
        self.browsers.map(Targets::from).unwrap_or_default()
    }

    /// Whether a module id passes the include/exclude filters.
    pub(crate) fn should_process(&self, path: &str) -> bool {
        if self.exclude.iter().any(|p| path.contains(p.as_str())) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| path.contains(p.as_str()))
    }
}
