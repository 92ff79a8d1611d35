mod common;

#[cfg(test)]
mod tests {
    use super::common::{ScriptedRunner, placeholder_jdk, seed_inputs, wix_archive};
    use kodegen_bundler_jvm::bundler::{
        BuildLayout, BuildParameters, BuildState, Bundler, TargetPlatform,
    };
    use kodegen_bundler_jvm::error::InstallerError;
    use std::path::Path;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn builder(root: &Path, platform: TargetPlatform) -> kodegen_bundler_jvm::bundler::BuildParametersBuilder {
        let inputs = seed_inputs(root);
        BuildParameters::builder()
            .main_jar(&inputs.main_jar)
            .main_class("com.example.Main")
            .jdk_home(placeholder_jdk(root))
            .jre_version(17)
            .platform(platform)
            .layout(BuildLayout::new(&inputs.target))
    }

    fn lossy(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_linux_build_packaging_arguments() {
        let tmp = tempfile::tempdir().unwrap();
        let params = builder(tmp.path(), TargetPlatform::Linux).build().unwrap();
        let layout = params.layout().clone();
        let runner = ScriptedRunner::new().with_output("jdeps", "java.base\n");
        let mut bundler = Bundler::with_runner(params.clone(), runner);

        let report = bundler.bundle().await.unwrap();

        assert_eq!(bundler.state(), BuildState::Done);
        assert_eq!(report.modules.to_arg(), "java.base");
        // the scripted runner writes no installer file
        assert!(report.artifacts.is_empty());

        let expected = vec![
            "--input".to_string(),
            lossy(&layout.staged_libs_dir()),
            "--dest".to_string(),
            lossy(layout.installer_dir()),
            "--runtime-image".to_string(),
            lossy(&layout.runtime_image_dir()),
            "--java-options".to_string(),
            "-Xmx4096m".to_string(),
            "--main-jar".to_string(),
            lossy(params.main_jar()),
            "--main-class".to_string(),
            "com.example.Main".to_string(),
            "--type".to_string(),
            "rpm".to_string(),
            "--linux-shortcut".to_string(),
        ];
        let jpackage = bundler.runner().calls_to("jpackage");
        assert_eq!(jpackage.len(), 1);
        assert_eq!(jpackage[0].arguments(), expected.as_slice());
    }

    #[tokio::test]
    async fn test_license_and_passthrough_arguments() {
        let tmp = tempfile::tempdir().unwrap();
        let params = builder(tmp.path(), TargetPlatform::Linux)
            .license_name(Some("Apache-2.0".to_string()))
            .jpackage_extra(vec!["--app-version".to_string(), "2.1.0".to_string()])
            .build()
            .unwrap();
        let runner = ScriptedRunner::new().with_output("jdeps", "java.base");
        let mut bundler = Bundler::with_runner(params, runner);

        bundler.bundle().await.unwrap();

        let call = &bundler.runner().calls_to("jpackage")[0];
        let args = call.arguments();
        assert_eq!(call.value_of("--linux-rpm-license-type"), Some("Apache-2.0"));
        let passthrough = args.iter().position(|a| a == "--app-version").unwrap();
        let main_class = args.iter().position(|a| a == "--main-class").unwrap();
        let platform = args.iter().position(|a| a == "--type").unwrap();
        assert!(main_class < passthrough && passthrough < platform);
    }

    #[tokio::test]
    async fn test_staging_drops_previous_build_output() {
        let tmp = tempfile::tempdir().unwrap();
        let params = builder(tmp.path(), TargetPlatform::Linux).build().unwrap();
        let layout = params.layout().clone();
        std::fs::create_dir_all(layout.staged_libs_dir()).unwrap();
        std::fs::write(layout.staged_libs_dir().join("stale.jar"), b"old").unwrap();
        std::fs::create_dir_all(layout.runtime_image_dir().join("bin")).unwrap();

        let runner = ScriptedRunner::new().with_output("jdeps", "java.base");
        let mut bundler = Bundler::with_runner(params, runner);
        bundler.bundle().await.unwrap();

        let mut staged: Vec<String> = std::fs::read_dir(layout.staged_libs_dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        staged.sort();
        assert_eq!(staged, ["app.jar", "guava.jar", "jackson-core.jar"]);

        let jdeps = &bundler.runner().calls_to("jdeps")[0];
        assert!(jdeps.arguments().iter().all(|a| !a.contains("stale.jar")));
    }

    #[tokio::test]
    async fn test_failing_jdeps_halts_pipeline() {
        let tmp = tempfile::tempdir().unwrap();
        let params = builder(tmp.path(), TargetPlatform::Linux).build().unwrap();
        let runner = ScriptedRunner::new().failing("jdeps");
        let mut bundler = Bundler::with_runner(params, runner);

        let err = bundler.bundle().await.unwrap_err();

        assert!(matches!(err, InstallerError::DependencyAnalysis(_)));
        assert!(err.to_string().contains("jdeps exited with exit code 1"));
        assert_eq!(bundler.state(), BuildState::Failed);
        assert!(bundler.runner().calls_to("jlink").is_empty());
        assert!(bundler.runner().calls_to("jpackage").is_empty());
    }

    #[tokio::test]
    async fn test_failing_jpackage_is_a_packaging_error() {
        let tmp = tempfile::tempdir().unwrap();
        let params = builder(tmp.path(), TargetPlatform::Linux).build().unwrap();
        let runner = ScriptedRunner::new()
            .with_output("jdeps", "java.base")
            .failing("jpackage");
        let mut bundler = Bundler::with_runner(params, runner);

        let err = bundler.bundle().await.unwrap_err();

        assert!(matches!(err, InstallerError::Packaging(_)));
        assert_eq!(err.stage(), "packaging");
    }

    #[tokio::test]
    async fn test_windows_builds_provision_wix_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wix311-binaries.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(wix_archive()))
            .expect(1)
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let params = builder(tmp.path(), TargetPlatform::Windows)
            .toolchain_url(format!("{}/wix311-binaries.zip", server.uri()))
            .build()
            .unwrap();
        let toolchain = params.layout().toolchain_dir();

        for _ in 0..2 {
            let runner = ScriptedRunner::new().with_output("jdeps", "java.base,java.desktop");
            let mut bundler = Bundler::with_runner(params.clone(), runner);
            bundler.bundle().await.unwrap();

            let call = &bundler.runner().calls_to("jpackage")[0];
            assert_eq!(call.value_of("--type"), Some("msi"));
            let win_flags: Vec<&str> = call
                .arguments()
                .iter()
                .filter(|a| a.starts_with("--win-"))
                .map(String::as_str)
                .collect();
            assert_eq!(
                win_flags,
                [
                    "--win-dir-chooser",
                    "--win-shortcut",
                    "--win-shortcut-prompt",
                    "--win-per-user-install",
                    "--win-menu",
                ]
            );
            assert_eq!(call.search_paths(), [toolchain.clone()]);
            assert!(toolchain.join("candle.exe").is_file());
        }
    }

    #[tokio::test]
    async fn test_failed_wix_download_stops_before_jpackage() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let params = builder(tmp.path(), TargetPlatform::Windows)
            .toolchain_url(format!("{}/missing.zip", server.uri()))
            .build()
            .unwrap();
        let runner = ScriptedRunner::new().with_output("jdeps", "java.base");
        let mut bundler = Bundler::with_runner(params.clone(), runner);

        let err = bundler.bundle().await.unwrap_err();

        assert!(matches!(err, InstallerError::ToolchainProvision(_)));
        assert!(bundler.runner().calls_to("jpackage").is_empty());
        assert!(!params.layout().toolchain_dir().exists());
    }
}
