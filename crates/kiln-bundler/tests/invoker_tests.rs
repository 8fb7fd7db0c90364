//! Invoker pass-through tests against a recording facility.

mod helpers;

use std::path::PathBuf;

use helpers::{NamedPlugin, RecordingFacility};
use kiln_bundler::{BuildConfig, BuildInvoker, DiagnosticKind, PluginHandle, plugin};

#[tokio::test]
async fn test_plugin_order_is_preserved() {
    let invoker = BuildInvoker::new(RecordingFacility::default());
    let config = BuildConfig::new(["assets/**/*"])
        .plugin(plugin(NamedPlugin("styles")))
        .plugin(plugin(NamedPlugin("images")))
        .plugin(plugin(NamedPlugin("styles")))
        .plugin(plugin(NamedPlugin("banner")));

    invoker.invoke(config).await.unwrap();

    let seen = invoker.facility().single_call();
    assert_eq!(seen.plugins, vec!["styles", "images", "styles", "banner"]);
}

#[tokio::test]
async fn test_toggles_passed_verbatim() {
    for (minify, tree_shaking) in [(true, true), (true, false), (false, true), (false, false)] {
        let invoker = BuildInvoker::new(RecordingFacility::default());
        let config = BuildConfig::new(["assets/**/*"])
            .minify(minify)
            .tree_shaking(tree_shaking);

        invoker.invoke(config).await.unwrap();

        let seen = invoker.facility().single_call();
        assert_eq!(seen.minify, minify);
        assert_eq!(seen.tree_shaking, tree_shaking);
    }
}

#[tokio::test]
async fn test_patterns_and_outdir_passed_verbatim() {
    let invoker = BuildInvoker::new(RecordingFacility::default());
    let config = BuildConfig::new(["b/**/*.css", "a/*.js", "b/**/*.css"]).outdir("../public");

    invoker.invoke(config).await.unwrap();

    let seen = invoker.facility().single_call();
    assert_eq!(seen.patterns, vec!["b/**/*.css", "a/*.js", "b/**/*.css"]);
    assert_eq!(seen.outdir, PathBuf::from("../public"));
}

#[tokio::test]
async fn test_facility_failure_propagates() {
    let invoker = BuildInvoker::new(RecordingFacility::failing(DiagnosticKind::Plugin));

    let err = invoker
        .invoke(BuildConfig::new(["x.css"]).plugin(PluginHandle::new(NamedPlugin("styles"))))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(&DiagnosticKind::Plugin));
    assert_eq!(invoker.facility().calls().len(), 1);
}
