//! Build configuration.
//!
//! [`BuildConfig`] is a plain value: entry patterns, an output directory, two
//! optimization toggles and an ordered plugin list. Builder methods consume
//! and return the config; once handed to a [`BuildInvoker`](crate::BuildInvoker)
//! it is moved and cannot be reused.

use std::path::{Path, PathBuf};

use crate::plugin::PluginHandle;

/// Everything the build facility needs to know about one build.
///
/// Values are stored exactly as given. The facility, not the config, decides
/// whether they are acceptable.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    entry_patterns: Vec<String>,
    outdir: PathBuf,
    minify: bool,
    tree_shaking: bool,
    plugins: Vec<PluginHandle>,
    cwd: Option<PathBuf>,
}

impl BuildConfig {
    /// Create a config from entry-point glob patterns.
    ///
    /// Starts with `dist` as output directory, minification off, tree-shaking
    /// on and no plugins.
    pub fn new<I, S>(entry_patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entry_patterns: entry_patterns.into_iter().map(Into::into).collect(),
            outdir: PathBuf::from("dist"),
            minify: false,
            tree_shaking: true,
            plugins: Vec::new(),
            cwd: None,
        }
    }

    /// Set the output directory
    pub fn outdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.outdir = dir.into();
        self
    }

    pub fn minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    pub fn tree_shaking(mut self, enabled: bool) -> Self {
        self.tree_shaking = enabled;
        self
    }

    /// Append a plugin. Plugins keep the order in which they are added.
    pub fn plugin(mut self, plugin: PluginHandle) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Append several plugins, in iteration order.
    pub fn plugins(mut self, plugins: impl IntoIterator<Item = PluginHandle>) -> Self {
        self.plugins.extend(plugins);
        self
    }

    /// Directory that relative patterns and the output directory resolve against.
    ///
    /// Defaults to the process working directory.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn entry_patterns(&self) -> &[String] {
        &self.entry_patterns
    }

    pub fn output_dir(&self) -> &Path {
        &self.outdir
    }

    pub fn is_minify(&self) -> bool {
        self.minify
    }

    pub fn is_tree_shaking(&self) -> bool {
        self.tree_shaking
    }

    pub fn plugin_handles(&self) -> &[PluginHandle] {
        &self.plugins
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Names of the configured plugins, in order.
    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(PluginHandle::name).collect()
    }

    /// Consume the config, yielding the plugin list.
    pub(crate) fn into_plugins(self) -> Vec<PluginHandle> {
        self.plugins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Plugin;
    use std::borrow::Cow;

    #[derive(Debug)]
    struct Named(&'static str);

    impl Plugin for Named {
        fn name(&self) -> Cow<'static, str> {
            Cow::Borrowed(self.0)
        }

        fn register_hook_usage(&self) -> crate::HookUsage {
            crate::HookUsage::empty()
        }
    }

    #[test]
    fn test_defaults() {
        let config = BuildConfig::new(["src/**/*.js"]);
        assert_eq!(config.entry_patterns(), ["src/**/*.js"]);
        assert_eq!(config.output_dir(), Path::new("dist"));
        assert!(!config.is_minify());
        assert!(config.is_tree_shaking());
        assert!(config.plugin_handles().is_empty());
        assert!(config.working_dir().is_none());
    }

    #[test]
    fn test_values_kept_verbatim() {
        let config = BuildConfig::new(["assets/**/*", "extra/*.css"])
            .outdir("public")
            .minify(true)
            .tree_shaking(false)
            .cwd("/project");

        assert_eq!(config.entry_patterns(), ["assets/**/*", "extra/*.css"]);
        assert_eq!(config.output_dir(), Path::new("public"));
        assert!(config.is_minify());
        assert!(!config.is_tree_shaking());
        assert_eq!(config.working_dir(), Some(Path::new("/project")));
    }

    #[test]
    fn test_empty_patterns_are_accepted_here() {
        let config = BuildConfig::new(Vec::<String>::new());
        assert!(config.entry_patterns().is_empty());
    }

    #[test]
    fn test_plugin_order_and_duplicates_preserved() {
        let config = BuildConfig::new(["a.js"])
            .plugin(PluginHandle::new(Named("b")))
            .plugins([PluginHandle::new(Named("a")), PluginHandle::new(Named("b"))]);

        assert_eq!(config.plugin_names(), vec!["b", "a", "b"]);
    }
}
