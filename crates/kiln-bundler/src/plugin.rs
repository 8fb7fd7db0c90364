//! Opaque plugin handles.
//!
//! A [`PluginHandle`] wraps any Rolldown [`Plugin`] so it can travel inside a
//! [`BuildConfig`](crate::BuildConfig) without kiln ever looking into it. The
//! handle remembers the plugin's name for logging; everything else is passed
//! through to the bundler untouched.

use std::borrow::Cow;
use std::sync::Arc;

use rolldown_plugin::{__inner::SharedPluginable, Plugin};

/// A plugin registered with the build facility.
#[derive(Debug, Clone)]
pub struct PluginHandle {
    name: Cow<'static, str>,
    inner: SharedPluginable,
}

impl PluginHandle {
    pub fn new<P>(plugin: P) -> Self
    where
        P: Plugin + 'static,
    {
        let name = plugin.name();
        Self {
            name,
            inner: Arc::new(plugin),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_pluginable(self) -> SharedPluginable {
        self.inner
    }
}

impl<P> From<Arc<P>> for PluginHandle
where
    P: Plugin + 'static,
{
    fn from(plugin: Arc<P>) -> Self {
        let name = plugin.name();
        Self { name, inner: plugin }
    }
}

/// Shorthand for [`PluginHandle::new`].
pub fn plugin<P>(plugin: P) -> PluginHandle
where
    P: Plugin + 'static,
{
    PluginHandle::new(plugin)
}
